use api_contract::{
    BatimentFilters, BatimentInitRequest, DuplicateRequest, ErrorBody, ListQuery, NiveauPayload,
    Page, Pagination,
};
use domain::{StatutBatiment, TypeBatiment};
use serde_json::Value;

#[test]
fn init_request_is_camel_case() {
    let request = BatimentInitRequest {
        nom: "Maison Test".to_string(),
        type_batiment: TypeBatiment::MaisonIndividuelle,
    };
    let value = serde_json::to_value(request).expect("serialize");
    assert_eq!(value["nom"], "Maison Test");
    assert_eq!(value["type"], "MAISON_INDIVIDUELLE");
}

#[test]
fn duplicate_request_omits_missing_name() {
    let value = serde_json::to_value(DuplicateRequest::default()).expect("serialize");
    assert!(value.get("nouveauNom").is_none());
    let value = serde_json::to_value(DuplicateRequest {
        nouveau_nom: Some("Copie".to_string()),
    })
    .expect("serialize");
    assert_eq!(value["nouveauNom"], "Copie");
}

#[test]
fn list_query_flattens_filters_and_pagination() {
    let query = ListQuery {
        filters: BatimentFilters {
            nom: Some("mais".to_string()),
            type_batiment: None,
            statut: Some(StatutBatiment::EnCours),
        },
        pagination: Pagination::new(1, 20),
    };
    let value = serde_json::to_value(query).expect("serialize");
    assert_eq!(value["nom"], "mais");
    assert_eq!(value["statut"], "EN_COURS");
    assert_eq!(value["page"], 1);
    assert_eq!(value["size"], 20);
    assert!(value.get("type").is_none());
    assert!(value.get("sort").is_none());
}

#[test]
fn pagination_defaults_to_first_page_of_twenty() {
    let pagination: Pagination = serde_json::from_str("{}").expect("parse");
    assert_eq!(pagination, Pagination::default());
    assert_eq!(pagination.size, 20);
}

#[test]
fn page_slices_are_disjoint() {
    let items: Vec<u32> = (0..45).collect();
    let first = Page::slice(items.clone(), &Pagination::new(0, 20));
    let second = Page::slice(items.clone(), &Pagination::new(1, 20));
    let last = Page::slice(items, &Pagination::new(2, 20));
    assert_eq!(first.total_elements, 45);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.content.len() + second.content.len(), 40);
    assert!(first.content.iter().all(|i| !second.content.contains(i)));
    assert_eq!(last.content, vec![40, 41, 42, 43, 44]);
    assert_eq!(last.number, 2);
}

#[test]
fn page_is_camel_case() {
    let page = Page::slice(vec!["a"], &Pagination::default());
    let value = serde_json::to_value(page).expect("serialize");
    assert!(value.get("totalElements").is_some());
    assert!(value.get("totalPages").is_some());
    assert!(value.get("total_elements").is_none());
}

#[test]
fn error_body_tolerates_sparse_payload() {
    let body: ErrorBody = serde_json::from_str(r#"{"message":"boom"}"#).expect("parse");
    assert_eq!(body.message.as_deref(), Some("boom"));
    assert!(body.errors.is_none());
    let body: ErrorBody = serde_json::from_str(
        r#"{"message":"invalid","status":400,"code":"VALIDATION","errors":[{"field":"nom","message":"requis"}]}"#,
    )
    .expect("parse");
    assert_eq!(body.errors.expect("errors")[0].field, "nom");
}

#[test]
fn niveau_payload_numbers_are_plain() {
    let payload = NiveauPayload {
        nom: "RDC".to_string(),
        numero: 0,
        altitude: 0.0,
        altitude_plancher: None,
        hauteur_sous_plafond: 2.5,
        surface: None,
    };
    let value = serde_json::to_value(payload).expect("serialize");
    assert!(matches!(value.get("hauteurSousPlafond"), Some(Value::Number(_))));
    assert!(value.get("surface").is_none());
}
