// libs/catalog-cell/src/handlers.rs
use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;

use crate::services::CatalogRepository;

#[axum::debug_handler]
pub async fn list_barbers(
    State(catalog): State<Arc<dyn CatalogRepository>>,
) -> Result<Json<Value>, AppError> {
    let barbers = catalog.barbers();
    debug!("Listing {} barbers", barbers.len());

    if barbers.is_empty() {
        return Err(AppError::BarbersNotFound);
    }

    Ok(Json(json!({
        "success": true,
        "data": barbers
    })))
}

#[axum::debug_handler]
pub async fn list_services(
    State(catalog): State<Arc<dyn CatalogRepository>>,
) -> Result<Json<Value>, AppError> {
    let services = catalog.services();
    debug!("Listing {} services", services.len());

    if services.is_empty() {
        return Err(AppError::ServicesNotFound);
    }

    Ok(Json(json!({
        "success": true,
        "data": services
    })))
}
