use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::{appointment_routes, AppointmentState};
use catalog_cell::{router::catalog_routes, CatalogRepository};
use shared_config::AppConfig;

pub fn create_router(config: Arc<AppConfig>, catalog: Arc<dyn CatalogRepository>) -> Router {
    let appointments = Arc::new(AppointmentState::new(config, Arc::clone(&catalog)));

    Router::new()
        .route("/", get(|| async { "Distrito Barbearia API is running!" }))
        .merge(catalog_routes(catalog))
        .merge(appointment_routes(appointments))
}
