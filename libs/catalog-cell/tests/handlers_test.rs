// libs/catalog-cell/tests/handlers_test.rs
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use catalog_cell::router::catalog_routes;
use catalog_cell::{Catalog, CatalogRepository};

const BARBERS: &str = r#"[
    {"id": 1, "name": "Rafael", "specialty": "Degradê"},
    {"id": 2, "name": "Bruno", "specialty": "Barba"}
]"#;

const SERVICES: &str = r#"[
    {"categoryName": "Combos", "services": [{"id": 6, "name": "Corte + Barba", "duration": 60, "price": 75.0}]},
    {"categoryName": "Cabelo", "services": [{"id": 1, "name": "Corte", "duration": 30, "price": 45.0}]}
]"#;

fn create_test_app(barbers: &str, services: &str) -> Router {
    let catalog: Arc<dyn CatalogRepository> = Arc::new(Catalog::from_json(barbers, services).unwrap());
    catalog_routes(catalog)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_list_barbers() {
    let app = create_test_app(BARBERS, SERVICES);

    let (status, body) = get_json(app, "/barbers").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["name"], "Rafael");
    assert_eq!(body["data"][1]["specialty"], "Barba");
}

#[tokio::test]
async fn test_list_services_flattened_with_category() {
    let app = create_test_app(BARBERS, SERVICES);

    let (status, body) = get_json(app, "/services").await;

    assert_eq!(status, StatusCode::OK);
    let services = body["data"].as_array().unwrap();
    assert_eq!(services.len(), 2);
    assert_eq!(services[0]["id"], 1);
    assert_eq!(services[0]["category"], "Cabelo");
    assert_eq!(services[0]["duration"], 30);
    assert_eq!(services[1]["id"], 6);
    assert_eq!(services[1]["category"], "Combos");
    assert_eq!(services[1]["price"], 75.0);
}

#[tokio::test]
async fn test_empty_barber_catalog_is_not_found() {
    let app = create_test_app("[]", SERVICES);

    let (status, body) = get_json(app, "/barbers").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BARBERS_NOT_FOUND");
    assert_eq!(body["error"]["message"], "No barbers available");
}

#[tokio::test]
async fn test_empty_service_catalog_is_not_found() {
    let app = create_test_app(BARBERS, "[]");

    let (status, body) = get_json(app, "/services").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "SERVICES_NOT_FOUND");
}
