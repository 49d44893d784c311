// libs/catalog-cell/src/router.rs
use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::services::CatalogRepository;

pub fn catalog_routes(catalog: Arc<dyn CatalogRepository>) -> Router {
    Router::new()
        .route("/barbers", get(handlers::list_barbers))
        .route("/services", get(handlers::list_services))
        .with_state(catalog)
}
