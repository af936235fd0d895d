use api_contract::{BatimentFilters, MurPayload, NiveauPayload, Pagination, PiecePayload};
use batiment_cache::BatimentRepository;
use batiment_client::{
    ApiError, ApiOperation, BatimentApi, CredentialStore, HttpBatimentApi, InMemoryBatimentApi,
    InMemoryCredentialStore,
};
use batiment_config::ClientConfig;
use batiment_dev_server::{AppState, app};
use batiment_wizard::{FormeBatiment, RollbackPolicy, SubmissionStep, WizardData, WizardOutcome};
use domain::{Fondations, Terrain, TypeBatiment, TypeFondation, TypeMur, TypePiece, TypeSol};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::net::TcpListener;

/// 在回环地址上启动开发服务，返回服务端内存实现与指向它的 HTTP 客户端配置。
async fn spawn(
    state: impl FnOnce(Arc<dyn BatimentApi>) -> AppState,
) -> (Arc<InMemoryBatimentApi>, ClientConfig) {
    let backend = Arc::new(InMemoryBatimentApi::new());
    let shared: Arc<dyn BatimentApi> = backend.clone();
    let router = app(state(shared));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    let config = ClientConfig {
        api_url: format!("http://{addr}/api"),
        ..ClientConfig::default()
    };
    (backend, config)
}

async fn client() -> (Arc<InMemoryBatimentApi>, HttpBatimentApi) {
    let (backend, config) = spawn(AppState::new).await;
    (backend, HttpBatimentApi::new(&config).expect("client"))
}

fn niveau(nom: &str, numero: i32) -> NiveauPayload {
    NiveauPayload {
        nom: nom.to_string(),
        numero,
        altitude: 0.0,
        altitude_plancher: None,
        hauteur_sous_plafond: 2.5,
        surface: None,
    }
}

#[tokio::test]
async fn init_then_get_over_http() {
    let (_, api) = client().await;
    let created = api
        .init("Maison Test", TypeBatiment::MaisonIndividuelle)
        .await
        .expect("init");
    let fetched = api.get(&created.id).await.expect("get");
    assert_eq!(fetched.nom, "Maison Test");
    assert_eq!(fetched.type_batiment, TypeBatiment::MaisonIndividuelle);
    assert!(fetched.has_no_elements());
}

#[tokio::test]
async fn singletons_replace_and_delete() {
    let (_, api) = client().await;
    let id = api
        .init("Maison", TypeBatiment::MaisonIndividuelle)
        .await
        .expect("init")
        .id;
    let first = Terrain {
        surface: 500.0,
        type_sol: Some(TypeSol::Argile),
        ..Terrain::default()
    };
    let second = Terrain {
        surface: 320.0,
        ..Terrain::default()
    };
    api.set_terrain(&id, &first).await.expect("terrain");
    let batiment = api.set_terrain(&id, &second).await.expect("terrain");
    assert_eq!(batiment.terrain, Some(second));

    api.set_fondations(&id, &Fondations::new(TypeFondation::SemellesFilantes, 0.8))
        .await
        .expect("fondations");
    let batiment = api.delete_terrain(&id).await.expect("delete terrain");
    assert!(batiment.terrain.is_none());
    assert!(batiment.fondations.is_some());
}

#[tokio::test]
async fn duplicate_copies_levels_with_fresh_ids() {
    let (_, api) = client().await;
    let id = api
        .init("Source", TypeBatiment::Immeuble)
        .await
        .expect("init")
        .id;
    api.add_niveau(&id, &niveau("RDC", 0)).await.expect("niveau");
    let batiment = api
        .add_niveau(&id, &niveau("Étage 1", 1))
        .await
        .expect("niveau");
    let niveau_id = batiment.niveaux[0].id.clone();
    api.add_piece(
        &id,
        &niveau_id,
        &PiecePayload {
            nom: "Salon".to_string(),
            type_piece: TypePiece::Salon,
            surface: 25.0,
            hauteur_sous_plafond: None,
        },
    )
    .await
    .expect("piece");
    api.add_mur(
        &id,
        &niveau_id,
        &MurPayload {
            nom: Some("Mur nord".to_string()),
            type_mur: TypeMur::MurPorteur,
            longueur: 10.0,
            hauteur: 2.5,
            epaisseur: 0.2,
            materiau: None,
            orientation: None,
        },
    )
    .await
    .expect("mur");

    let copy = api.duplicate(&id, Some("Copie")).await.expect("duplicate");
    assert_ne!(copy.id, id);
    assert_eq!(copy.nom, "Copie");
    assert_eq!(copy.niveaux.len(), 2);
    let source = api.get(&id).await.expect("source");
    let source_ids: HashSet<_> = source.niveaux.iter().map(|n| n.id.clone()).collect();
    assert!(copy.niveaux.iter().all(|n| !source_ids.contains(&n.id)));
    let rdc = copy.niveaux_ordonnes()[0];
    assert_eq!(rdc.pieces.len(), 1);
    assert_eq!(rdc.murs.len(), 1);
    assert_ne!(rdc.pieces[0].id, source.niveaux_ordonnes()[0].pieces[0].id);
}

#[tokio::test]
async fn pages_are_disjoint_and_cover_the_list() {
    let (backend, api) = client().await;
    for index in 0..7 {
        backend
            .init(&format!("Bâtiment {index}"), TypeBatiment::Immeuble)
            .await
            .expect("init");
    }
    let filters = BatimentFilters::default();
    let mut seen = HashSet::new();
    for page in 0..3 {
        let result = api
            .list(&filters, &Pagination::new(page, 3))
            .await
            .expect("page");
        assert_eq!(result.total_elements, 7);
        assert_eq!(result.total_pages, 3);
        for batiment in result.content {
            assert!(seen.insert(batiment.id), "duplicate across pages");
        }
    }
    assert_eq!(seen.len(), 7);
    assert_eq!(api.list_all().await.expect("all").len(), 7);
}

#[tokio::test]
async fn server_errors_keep_status_and_code() {
    let (_, api) = client().await;
    let err = api.get("missing").await.expect_err("missing");
    assert_eq!(err.status, Some(404));
    assert!(err.is_not_found());

    let id = api
        .init("Maison", TypeBatiment::MaisonIndividuelle)
        .await
        .expect("init")
        .id;
    let err = api
        .delete_niveau(&id, "absent")
        .await
        .expect_err("missing level");
    assert_eq!(err.status, Some(404));
}

#[tokio::test]
async fn unauthorized_clears_stored_token() {
    let (_, config) = spawn(|api| AppState::new(api).with_token("fresh")).await;
    let credentials = Arc::new(InMemoryCredentialStore::with_token("stale"));
    let api = HttpBatimentApi::with_credentials(&config, credentials.clone()).expect("client");

    let err = api.list_all().await.expect_err("unauthorized");
    assert!(err.is_unauthorized());
    assert_eq!(err.code.as_deref(), Some("AUTH.UNAUTHORIZED"));
    assert_eq!(credentials.token(), None);

    credentials.set_token("fresh").expect("store token");
    assert!(api.list_all().await.expect("authorized").is_empty());
}

fn maison_test() -> WizardData {
    let mut data = WizardData::default();
    data.general.nom = Some("Maison Test".to_string());
    data.general.type_batiment = Some(TypeBatiment::MaisonIndividuelle);
    data.general.forme = Some(FormeBatiment::Rectangulaire);
    data.dimensions.longueur = Some(12.0);
    data.dimensions.largeur = Some(9.0);
    data.dimensions.nombre_niveaux = Some(2);
    data.dimensions.hauteur_sous_plafond = Some(2.5);
    data.terrain.surface = Some(500.0);
    data.terrain.type_sol = Some(TypeSol::Argile);
    data.fondations.type_fondation = Some(TypeFondation::RadierGeneral);
    data.fondations.profondeur = Some(0.8);
    data
}

#[tokio::test]
async fn wizard_builds_building_over_http() {
    let (_, api) = client().await;
    let repository = BatimentRepository::new(Arc::new(api));
    let outcome = batiment_wizard::submit(&repository, &maison_test(), RollbackPolicy::Keep).await;
    let WizardOutcome::Succeeded(batiment) = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    let niveaux = batiment.niveaux_ordonnes();
    assert_eq!(niveaux.len(), 2);
    assert_eq!((niveaux[0].nom.as_str(), niveaux[0].altitude), ("RDC", 0.0));
    assert_eq!((niveaux[1].nom.as_str(), niveaux[1].altitude), ("Étage 1", 2.5));
    assert_eq!(batiment.terrain.as_ref().map(|t| t.surface), Some(500.0));
    assert_eq!(batiment.fondations.as_ref().map(|f| f.profondeur), Some(0.8));

    let listed = repository.list_all().await.expect("list");
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn wizard_partial_failure_over_http() {
    let (backend, api) = client().await;
    backend.fail_next(ApiOperation::SetFondations, ApiError::internal("boom"));
    let repository = BatimentRepository::new(Arc::new(api.clone()));
    let outcome = batiment_wizard::submit(&repository, &maison_test(), RollbackPolicy::Keep).await;
    let WizardOutcome::PartiallyCreated(report) = outcome else {
        panic!("expected partial creation, got {outcome:?}");
    };
    let failure = report.failures().next().expect("one failure");
    assert_eq!(failure.step, SubmissionStep::Fondations);
    assert_eq!(failure.error.as_ref().and_then(|err| err.status), Some(500));

    let stored = api.get(&report.batiment_id).await.expect("still exists");
    assert!(stored.fondations.is_none());
    assert_eq!(stored.niveaux.len(), 2);
}
