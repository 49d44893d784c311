// libs/appointment-cell/src/store.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_database::{DocumentStoreClient, Filter};

use crate::models::{AppointmentRecord, BookedAppointment, STATUS_CANCELLED};

/// Persistence the appointment services depend on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Bookings for one barber on one date, cancelled ones excluded.
    async fn find_active_bookings(&self, barber_id: u32, date: &str) -> Result<Vec<BookedAppointment>>;

    /// Returns the id the store assigned.
    async fn insert_appointment(&self, record: &AppointmentRecord) -> Result<String>;

    async fn find_appointment(&self, appointment_id: &str) -> Result<Option<AppointmentRecord>>;
}

/// `AppointmentStore` over the document store's REST API.
pub struct RestAppointmentStore {
    client: DocumentStoreClient,
    collection: String,
}

impl RestAppointmentStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: DocumentStoreClient::new(config),
            collection: config.appointments_collection.clone(),
        }
    }
}

#[async_trait]
impl AppointmentStore for RestAppointmentStore {
    async fn find_active_bookings(&self, barber_id: u32, date: &str) -> Result<Vec<BookedAppointment>> {
        let filter = Filter::new()
            .eq("barber_id", barber_id)
            .eq("date", date)
            .neq("status", STATUS_CANCELLED);

        let documents = self.client.find(&self.collection, &filter).await?;
        debug!("Found {} bookings for barber {} on {}", documents.len(), barber_id, date);

        let mut bookings = Vec::with_capacity(documents.len());
        for document in documents {
            match serde_json::from_value::<BookedAppointment>(document) {
                Ok(booking) => bookings.push(booking),
                Err(e) => warn!("Skipping malformed booking document: {}", e),
            }
        }

        Ok(bookings)
    }

    async fn insert_appointment(&self, record: &AppointmentRecord) -> Result<String> {
        let document = serde_json::to_value(record).context("Failed to serialize appointment")?;
        let result = self.client.insert_one(&self.collection, document).await?;
        Ok(result.inserted_id)
    }

    async fn find_appointment(&self, appointment_id: &str) -> Result<Option<AppointmentRecord>> {
        let filter = Filter::new().eq("id", appointment_id);

        let document: Option<Value> = self.client.find_one(&self.collection, &filter).await?;
        document
            .map(|doc| serde_json::from_value(doc).context("Failed to parse appointment document"))
            .transpose()
    }
}
