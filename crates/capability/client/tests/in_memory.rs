use api_contract::{
    BatimentFilters, BatimentUpsertRequest, MurPayload, NiveauPayload, OuverturePayload,
    Pagination, PiecePayload,
};
use batiment_client::{ApiError, ApiOperation, BatimentApi, InMemoryBatimentApi};
use domain::{
    Fondations, Point3D, StatutBatiment, Terrain, TypeBatiment, TypeFondation, TypeMur,
    TypeOuverture, TypePiece, TypeSol,
};
use std::collections::HashSet;

fn niveau(nom: &str, numero: i32) -> NiveauPayload {
    NiveauPayload {
        nom: nom.to_string(),
        numero,
        altitude: numero as f64 * 2.5,
        altitude_plancher: None,
        hauteur_sous_plafond: 2.5,
        surface: None,
    }
}

fn mur() -> MurPayload {
    MurPayload {
        nom: Some("Façade nord".to_string()),
        longueur: 8.0,
        hauteur: 2.5,
        epaisseur: 0.2,
        type_mur: TypeMur::MurPorteur,
        materiau: None,
        orientation: None,
    }
}

#[tokio::test]
async fn init_then_get_returns_empty_building() {
    let api = InMemoryBatimentApi::new();
    let created = api
        .init("Maison Dupont", TypeBatiment::MaisonIndividuelle)
        .await
        .expect("init");
    let fetched = api.get(&created.id).await.expect("get");
    assert_eq!(fetched.nom, "Maison Dupont");
    assert_eq!(fetched.type_batiment, TypeBatiment::MaisonIndividuelle);
    assert_eq!(fetched.statut, StatutBatiment::Brouillon);
    assert!(fetched.has_no_elements());
    assert!(fetched.date_creation.is_some());
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let api = InMemoryBatimentApi::new();
    let err = api
        .init("   ", TypeBatiment::Immeuble)
        .await
        .expect_err("blank");
    assert_eq!(err.status, Some(400));
    assert_eq!(err.errors[0].field, "nom");
    assert!(api.is_empty());
}

#[tokio::test]
async fn set_terrain_replaces_instead_of_merging() {
    let api = InMemoryBatimentApi::new();
    let id = api
        .init("Maison", TypeBatiment::MaisonIndividuelle)
        .await
        .expect("init")
        .id;
    let first = Terrain {
        surface: 800.0,
        type_sol: Some(TypeSol::Roche),
        portance_sol: Some(3.0),
        contour: Some(vec![Point3D { x: 0.0, y: 0.0, z: None }]),
        ..Terrain::default()
    };
    api.set_terrain(&id, &first).await.expect("first");
    let second = Terrain {
        surface: 500.0,
        type_sol: Some(TypeSol::Argile),
        ..Terrain::default()
    };
    api.set_terrain(&id, &second).await.expect("second");
    let fetched = api.get(&id).await.expect("get");
    assert_eq!(fetched.terrain, Some(second));
}

#[tokio::test]
async fn delete_terrain_clears_it() {
    let api = InMemoryBatimentApi::new();
    let id = api
        .init("Maison", TypeBatiment::MaisonIndividuelle)
        .await
        .expect("init")
        .id;
    api.set_terrain(
        &id,
        &Terrain {
            surface: 500.0,
            ..Terrain::default()
        },
    )
    .await
    .expect("set");
    let after = api.delete_terrain(&id).await.expect("delete");
    assert!(after.terrain.is_none());
    assert!(api.get(&id).await.expect("get").terrain.is_none());
}

#[tokio::test]
async fn nested_collections_are_path_addressed() {
    let api = InMemoryBatimentApi::new();
    let id = api
        .init("Maison", TypeBatiment::MaisonIndividuelle)
        .await
        .expect("init")
        .id;
    let batiment = api.add_niveau(&id, &niveau("RDC", 0)).await.expect("niveau");
    let niveau_id = batiment.niveaux[0].id.clone();
    let batiment = api
        .add_piece(
            &id,
            &niveau_id,
            &PiecePayload {
                nom: "Salon".to_string(),
                type_piece: TypePiece::Salon,
                surface: 32.5,
                hauteur_sous_plafond: None,
            },
        )
        .await
        .expect("piece");
    assert_eq!(batiment.niveaux[0].pieces.len(), 1);

    let batiment = api.add_mur(&id, &niveau_id, &mur()).await.expect("mur");
    let mur_id = batiment.niveaux[0].murs[0].id.clone();
    assert_eq!(batiment.niveaux[0].murs[0].surface, Some(20.0));

    let batiment = api
        .add_ouverture(
            &id,
            &niveau_id,
            &mur_id,
            &OuverturePayload {
                nom: "Fenêtre salon".to_string(),
                type_ouverture: TypeOuverture::Fenetre,
                largeur: 1.2,
                hauteur: 1.0,
            },
        )
        .await
        .expect("ouverture");
    let ouverture = &batiment.niveaux[0].murs[0].ouvertures[0];
    assert_eq!(ouverture.id_mur.as_deref(), Some(mur_id.as_str()));

    let err = api
        .delete_mur(&id, &niveau_id, "unknown")
        .await
        .expect_err("missing mur");
    assert!(err.is_not_found());

    let batiment = api.delete_mur(&id, &niveau_id, &mur_id).await.expect("delete");
    assert!(batiment.niveaux[0].murs.is_empty());
}

#[tokio::test]
async fn duplicate_copies_levels_with_new_ids() {
    let api = InMemoryBatimentApi::new();
    let source = api
        .init("Maison", TypeBatiment::MaisonIndividuelle)
        .await
        .expect("init");
    for numero in 0..3 {
        api.add_niveau(&source.id, &niveau(&format!("N{numero}"), numero))
            .await
            .expect("niveau");
    }
    let source = api.get(&source.id).await.expect("source");

    let copy = api
        .duplicate(&source.id, Some("Maison bis"))
        .await
        .expect("duplicate");
    assert_ne!(copy.id, source.id);
    assert_eq!(copy.nom, "Maison bis");
    assert_eq!(copy.niveaux.len(), 3);
    let source_ids: HashSet<&str> = source.niveaux.iter().map(|n| n.id.as_str()).collect();
    for (original, copied) in source.niveaux.iter().zip(&copy.niveaux) {
        assert!(!source_ids.contains(copied.id.as_str()));
        assert_eq!(original.nom, copied.nom);
        assert_eq!(original.numero, copied.numero);
    }

    let default_name = api.duplicate(&source.id, None).await.expect("duplicate");
    assert_eq!(default_name.nom, "Maison (copie)");
}

#[tokio::test]
async fn duplicate_level_appends_after_highest_numero() {
    let api = InMemoryBatimentApi::new();
    let id = api
        .init("Maison", TypeBatiment::MaisonIndividuelle)
        .await
        .expect("init")
        .id;
    api.add_niveau(&id, &niveau("RDC", 0)).await.expect("rdc");
    let batiment = api.add_niveau(&id, &niveau("Étage 3", 3)).await.expect("e3");
    let rdc = batiment.niveaux[0].id.clone();
    let batiment = api.duplicate_niveau(&id, &rdc).await.expect("duplicate");
    let copy = batiment.niveaux.last().expect("copy");
    assert_eq!(copy.numero, 4);
    assert_eq!(copy.nom, "RDC (copie)");
}

#[tokio::test]
async fn pages_are_disjoint() {
    let api = InMemoryBatimentApi::new();
    for index in 0..45 {
        api.init(&format!("Batiment {index:02}"), TypeBatiment::Immeuble)
            .await
            .expect("init");
    }
    let filters = BatimentFilters::default();
    let first = api
        .list(&filters, &Pagination::new(0, 20))
        .await
        .expect("page 0");
    let second = api
        .list(&filters, &Pagination::new(1, 20))
        .await
        .expect("page 1");
    assert_eq!(first.total_elements, 45);
    assert_eq!(first.total_pages, 3);
    let ids: HashSet<String> = first
        .content
        .iter()
        .chain(second.content.iter())
        .map(|b| b.id.clone())
        .collect();
    assert_eq!(ids.len(), 40);
}

#[tokio::test]
async fn list_filters_by_name_and_type() {
    let api = InMemoryBatimentApi::new();
    api.init("Maison Martin", TypeBatiment::MaisonIndividuelle)
        .await
        .expect("init");
    api.init("Grange Martin", TypeBatiment::BatimentAgricole)
        .await
        .expect("init");
    api.init("Résidence", TypeBatiment::Immeuble)
        .await
        .expect("init");

    let filters = BatimentFilters {
        nom: Some("martin".to_string()),
        ..BatimentFilters::default()
    };
    let page = api
        .list(&filters, &Pagination::default())
        .await
        .expect("list");
    assert_eq!(page.total_elements, 2);

    let filters = BatimentFilters {
        nom: Some("martin".to_string()),
        type_batiment: Some(TypeBatiment::BatimentAgricole),
        statut: None,
    };
    let page = api
        .list(&filters, &Pagination::default())
        .await
        .expect("list");
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].nom, "Grange Martin");
}

#[tokio::test]
async fn create_with_validation_rejects_incomplete_building() {
    let api = InMemoryBatimentApi::new();
    let request =
        BatimentUpsertRequest::basic("Maison", TypeBatiment::MaisonIndividuelle, None);
    let err = api.create(&request, true).await.expect_err("invalid");
    assert_eq!(err.status, Some(400));
    assert_eq!(err.code.as_deref(), Some("VALIDATION.FAILED"));
    assert!(!err.errors.is_empty());
    assert!(api.is_empty());

    let created = api.create(&request, false).await.expect("create");
    let report = api.validate(&created.id).await.expect("validate");
    assert!(!report.valid);
    assert_eq!(report.error_count, Some(report.errors.len() as u32));
}

#[tokio::test]
async fn injected_failure_applies_once() {
    let api = InMemoryBatimentApi::new();
    let id = api
        .init("Maison", TypeBatiment::MaisonIndividuelle)
        .await
        .expect("init")
        .id;
    api.fail_next(ApiOperation::SetFondations, ApiError::internal("boom"));
    let fondations = Fondations::new(TypeFondation::RadierGeneral, 0.8);
    let err = api
        .set_fondations(&id, &fondations)
        .await
        .expect_err("injected");
    assert_eq!(err.status, Some(500));
    assert!(api.get(&id).await.expect("get").fondations.is_none());

    api.set_fondations(&id, &fondations).await.expect("second");
    assert_eq!(api.calls(ApiOperation::SetFondations), 2);
}

#[tokio::test]
async fn create_and_update_trim_the_name_like_init() {
    let api = InMemoryBatimentApi::new();
    let request =
        BatimentUpsertRequest::basic("  Maison Martin ", TypeBatiment::MaisonIndividuelle, None);
    let created = api.create(&request, false).await.expect("create");
    assert_eq!(created.nom, "Maison Martin");

    let request = BatimentUpsertRequest::basic("\tVilla Martin  ", TypeBatiment::Immeuble, None);
    let updated = api
        .update(&created.id, &request, false)
        .await
        .expect("update");
    assert_eq!(updated.nom, "Villa Martin");
    assert_eq!(api.get(&created.id).await.expect("get").nom, "Villa Martin");
}
