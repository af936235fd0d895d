use domain::{
    Batiment, Fondations, Niveau, Severity, StatutBatiment, Terrain, TypeBatiment, TypeFondation,
    TypeSol, ValidationIssue, ValidationReport,
};
use serde_json::{Value, json};

fn niveau(id: &str, numero: i32) -> Niveau {
    Niveau {
        id: id.to_string(),
        nom: format!("Niveau {numero}"),
        numero,
        altitude: 0.0,
        altitude_plancher: None,
        hauteur_sous_plafond: 2.5,
        surface: None,
        pieces: vec![],
        murs: vec![],
        cloisons: vec![],
        plancher: None,
        tremies: vec![],
    }
}

#[test]
fn batiment_uses_wire_names() {
    let mut batiment = Batiment::empty("b-1", "Maison", TypeBatiment::MaisonIndividuelle);
    batiment.terrain = Some(Terrain {
        surface: 500.0,
        type_sol: Some(TypeSol::Argile),
        profondeur_nappe_phreatique: Some(3.0),
        ..Terrain::default()
    });
    let value = serde_json::to_value(&batiment).expect("serialize");
    assert_eq!(value["type"], "MAISON_INDIVIDUELLE");
    assert_eq!(value["statut"], "BROUILLON");
    assert_eq!(value["terrain"]["typeSol"], "ARGILE");
    assert_eq!(value["terrain"]["profondeurNappePhréatique"], 3.0);
    assert!(value.get("fondations").is_none());
}

#[test]
fn empty_batiment_has_no_elements() {
    let batiment = Batiment::empty("b-1", "Maison", TypeBatiment::Immeuble);
    assert!(batiment.has_no_elements());
    assert_eq!(batiment.statut, StatutBatiment::Brouillon);
}

#[test]
fn fondations_keep_opaque_details() {
    let payload = json!({
        "typeFondation": "RADIER_GENERAL",
        "profondeur": 0.8,
        "radier": { "epaisseur": 0.25 }
    });
    let fondations: Fondations = serde_json::from_value(payload.clone()).expect("parse");
    assert_eq!(fondations.type_fondation, TypeFondation::RadierGeneral);
    assert!(fondations.details.contains_key("radier"));
    let back: Value = serde_json::to_value(&fondations).expect("serialize");
    assert_eq!(back, payload);
}

#[test]
fn niveaux_are_ordered_by_numero_not_position() {
    let mut batiment = Batiment::empty("b-1", "Maison", TypeBatiment::Immeuble);
    batiment.niveaux = vec![niveau("n-2", 2), niveau("n-0", 0), niveau("n-1b", 1), niveau("n-1", 1)];
    let ids: Vec<&str> = batiment
        .niveaux_ordonnes()
        .into_iter()
        .map(|niveau| niveau.id.as_str())
        .collect();
    assert_eq!(ids, vec!["n-0", "n-1b", "n-1", "n-2"]);
}

#[test]
fn report_lists_errors_before_warnings() {
    let issue = |rule: &str, severity| ValidationIssue {
        rule_name: rule.to_string(),
        field: None,
        message: rule.to_lowercase(),
        severity,
    };
    let report = ValidationReport::from_issues(vec![
        issue("W1", Severity::Warning),
        issue("E1", Severity::Error),
        issue("I1", Severity::Info),
    ]);
    assert!(!report.valid);
    let rules: Vec<&str> = report.issues().map(|i| i.rule_name.as_str()).collect();
    assert_eq!(rules, vec!["E1", "W1"]);
}

#[test]
fn missing_collections_default_to_empty() {
    let payload = r#"{"id":"b-1","nom":"Hangar","type":"BATIMENT_AGRICOLE","statut":"EN_COURS"}"#;
    let batiment: Batiment = serde_json::from_str(payload).expect("parse");
    assert!(batiment.niveaux.is_empty());
    assert_eq!(batiment.statut, StatutBatiment::EnCours);
}
