// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{routing::post, Router};
use tracing::warn;

use catalog_cell::CatalogRepository;
use notification_cell::{ConfirmationMailer, SmtpEmailService};
use shared_config::AppConfig;

use crate::handlers;
use crate::services::slots::SlotSettings;
use crate::store::{AppointmentStore, RestAppointmentStore};

/// Shared, read-only state for the appointment endpoints.
pub struct AppointmentState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub mailer: Option<Arc<dyn ConfirmationMailer>>,
    settings: SlotSettings,
}

impl AppointmentState {
    pub fn new(config: Arc<AppConfig>, catalog: Arc<dyn CatalogRepository>) -> Self {
        let mailer: Option<Arc<dyn ConfirmationMailer>> = match SmtpEmailService::new(&config) {
            Ok(service) => Some(Arc::new(service)),
            Err(e) => {
                warn!("{} - confirmation emails will fail", e);
                None
            }
        };

        let settings = SlotSettings::from_config(&config);

        Self { config, catalog, mailer, settings }
    }

    /// Replaces the mailer built from config, e.g. with a different transport.
    pub fn with_mailer(mut self, mailer: Arc<dyn ConfirmationMailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    /// A fresh store client, dropped when the request finishes.
    pub fn store(&self) -> Arc<dyn AppointmentStore> {
        Arc::new(RestAppointmentStore::new(&self.config))
    }

    /// Window and buffer, validated once when the state is built.
    pub fn slot_settings(&self) -> SlotSettings {
        self.settings
    }
}

pub fn appointment_routes(state: Arc<AppointmentState>) -> Router {
    Router::new()
        .route("/time-slots", post(handlers::get_time_slots))
        .route("/appointments", post(handlers::create_appointment))
        .route("/appointment/confirmation", post(handlers::send_confirmation))
        .with_state(state)
}
