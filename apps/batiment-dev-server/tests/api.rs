use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use batiment_client::{BatimentApi, InMemoryBatimentApi};
use batiment_dev_server::{AppState, app};
use bytes::Bytes;
use domain::TypeBatiment;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn router() -> (Arc<InMemoryBatimentApi>, Router) {
    let api = Arc::new(InMemoryBatimentApi::new());
    let router = app(AppState::new(api.clone()));
    (api, router)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes: Bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json")
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn health_reports_ok_with_trace_headers() {
    let (_, router) = router();
    let response = router
        .oneshot(empty_request("GET", "/health"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert!(response.headers().contains_key("x-trace-id"));
    assert_eq!(body_json(response).await, json!({ "ok": true }));
}

#[tokio::test]
async fn init_then_get_returns_camel_case_aggregate() {
    let (_, router) = router();
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/batiments/init",
            json!({ "nom": "Maison Test", "type": "MAISON_INDIVIDUELLE" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    let id = created["id"].as_str().expect("id").to_string();
    assert_eq!(created["statut"], "BROUILLON");

    let response = router
        .oneshot(empty_request("GET", &format!("/api/batiments/{id}")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["nom"], "Maison Test");
    assert_eq!(fetched["type"], "MAISON_INDIVIDUELLE");
    assert!(fetched["niveaux"].as_array().is_some_and(Vec::is_empty));
}

#[tokio::test]
async fn unknown_building_yields_uniform_error() {
    let (_, router) = router();
    let response = router
        .oneshot(empty_request("GET", "/api/batiments/missing"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["code"], "RESOURCE.NOT_FOUND");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn blank_name_is_rejected_with_field_errors() {
    let (_, router) = router();
    let response = router
        .oneshot(json_request(
            "POST",
            "/api/batiments?validate=false",
            json!({ "nom": "  ", "type": "IMMEUBLE" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errors"][0]["field"], "nom");
}

#[tokio::test]
async fn list_filters_by_type_and_pages() {
    let (api, router) = router();
    for index in 0..3 {
        api.init(&format!("Maison {index}"), TypeBatiment::MaisonIndividuelle)
            .await
            .expect("init");
    }
    api.init("Hangar", TypeBatiment::BatimentAgricole)
        .await
        .expect("init");

    let response = router
        .oneshot(empty_request(
            "GET",
            "/api/batiments?type=MAISON_INDIVIDUELLE&page=1&size=2",
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await;
    assert_eq!(page["totalElements"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["number"], 1);
    assert_eq!(page["content"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn terrain_delete_and_missing_system_delete_route() {
    let (api, router) = router();
    let id = api
        .init("Maison", TypeBatiment::MaisonIndividuelle)
        .await
        .expect("init")
        .id;

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/batiments/{id}/terrain"),
            json!({ "surface": 500.0, "typeSol": "ARGILE" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["terrain"]["surface"], 500.0);

    let response = router
        .clone()
        .oneshot(empty_request("DELETE", &format!("/api/batiments/{id}/terrain")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.get("terrain").is_none_or(Value::is_null));

    let response = router
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/batiments/{id}/charpente"),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn duplicate_accepts_missing_body() {
    let (api, router) = router();
    let id = api
        .init("Source", TypeBatiment::Immeuble)
        .await
        .expect("init")
        .id;
    let response = router
        .oneshot(empty_request("POST", &format!("/api/batiments/{id}/duplicate")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let copy = body_json(response).await;
    assert_ne!(copy["id"], Value::String(id));
    assert_eq!(copy["nom"], "Source (copie)");
}

#[tokio::test]
async fn delete_returns_no_content() {
    let (api, router) = router();
    let id = api
        .init("Temporaire", TypeBatiment::Immeuble)
        .await
        .expect("init")
        .id;
    let response = router
        .oneshot(empty_request("DELETE", &format!("/api/batiments/{id}")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(api.is_empty());
}

#[tokio::test]
async fn configured_token_guards_api_routes_only() {
    let api = Arc::new(InMemoryBatimentApi::new());
    let router = app(AppState::new(api).with_token("secret"));

    let response = router
        .clone()
        .oneshot(empty_request("GET", "/api/batiments/all"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "AUTH.UNAUTHORIZED");

    let request = Request::builder()
        .uri("/api/batiments/all")
        .header(header::AUTHORIZATION, "Bearer secret")
        .body(Body::empty())
        .expect("request");
    let response = router.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(empty_request("GET", "/health"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}
