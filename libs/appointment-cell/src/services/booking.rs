use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::{debug, error, info};

use catalog_cell::CatalogRepository;

use crate::models::{
    AppointmentError, AppointmentRecord, AppointmentResponse, CreateAppointmentRequest, NewAppointment,
    STATUS_CONFIRMED,
};
use crate::services::availability::AvailabilityService;
use crate::services::slots::SlotSettings;
use crate::services::validation::{today, validate_create_request};
use crate::store::AppointmentStore;

const CONFIRMATION_CODE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CONFIRMATION_CODE_LEN: usize = 6;

/// Six characters drawn uniformly from `A-Z0-9`.
pub fn generate_confirmation_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CONFIRMATION_CODE_LEN)
        .map(|_| CONFIRMATION_CODE_CHARS[rng.gen_range(0..CONFIRMATION_CODE_CHARS.len())] as char)
        .collect()
}

/// Turns a validated request into the document that gets stored.
pub fn to_record(appointment: NewAppointment) -> AppointmentRecord {
    AppointmentRecord {
        barber_id: appointment.barber_id,
        service_id: appointment.service_id,
        date: appointment.date,
        time: appointment.time,
        customer_name: appointment.customer_name,
        customer_email: appointment.customer_email,
        customer_whatsapp: appointment.customer_whatsapp,
        payment_method: appointment.payment_method,
        status: STATUS_CONFIRMED.to_string(),
        created_at: Utc::now(),
        confirmation_code: generate_confirmation_code(),
    }
}

pub struct AppointmentBookingService {
    catalog: Arc<dyn CatalogRepository>,
    store: Arc<dyn AppointmentStore>,
    availability: AvailabilityService,
}

impl AppointmentBookingService {
    pub fn new(catalog: Arc<dyn CatalogRepository>, store: Arc<dyn AppointmentStore>, settings: SlotSettings) -> Self {
        let availability = AvailabilityService::new(Arc::clone(&catalog), Arc::clone(&store), settings);
        Self { catalog, store, availability }
    }

    pub async fn create_appointment(
        &self,
        request: &CreateAppointmentRequest,
    ) -> Result<AppointmentResponse, AppointmentError> {
        let appointment = validate_create_request(request, self.catalog.as_ref(), today())?;

        let service = self.catalog.service(appointment.service_id).ok_or_else(|| {
            error!(service_id = appointment.service_id, "Service not found");
            AppointmentError::ServiceNotFound
        })?;

        self.availability
            .check_time_slot_availability(
                appointment.barber_id,
                &appointment.date,
                &appointment.time,
                appointment.service_id,
            )
            .await?;

        let barber = self.catalog.barber(appointment.barber_id).ok_or_else(|| {
            error!(barber_id = appointment.barber_id, "Barber not found");
            AppointmentError::BarberUnavailable
        })?;

        let record = to_record(appointment);

        debug!(
            barber_id = record.barber_id,
            service_id = record.service_id,
            date = %record.date,
            time = %record.time,
            payment_method = %record.payment_method,
            confirmation_code = %record.confirmation_code,
            "Inserting appointment"
        );

        let id = self.store.insert_appointment(&record).await.map_err(|e| {
            error!(
                barber_id = record.barber_id,
                service_id = record.service_id,
                date = %record.date,
                time = %record.time,
                "Error saving appointment to database: {}", e
            );
            AppointmentError::DatabaseError(format!("Error creating appointment: {}", e))
        })?;

        info!(appointment_id = %id, "Appointment inserted");

        Ok(AppointmentResponse::from_record(id, record, barber, service))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use assert_matches::assert_matches;
    use catalog_cell::Catalog;
    use serde_json::json;
    use shared_utils::test_utils::date_in_days;

    use crate::models::{BookedAppointment, PaymentMethod};
    use crate::store::MockAppointmentStore;

    const BARBERS: &str = r#"[
        {"id": 1, "name": "Rafael", "specialty": "Degradê"},
        {"id": 2, "name": "Bruno", "specialty": "Barba"}
    ]"#;
    const SERVICES: &str = r#"[{"categoryName": "Cabelo", "services": [{"id": 1, "name": "Corte", "duration": 30, "price": 45.0}]}]"#;

    fn service_with(store: MockAppointmentStore) -> AppointmentBookingService {
        let catalog = Arc::new(Catalog::from_json(BARBERS, SERVICES).unwrap());
        AppointmentBookingService::new(catalog, Arc::new(store), SlotSettings::default())
    }

    fn request(barber_id: u32, time: &str) -> CreateAppointmentRequest {
        CreateAppointmentRequest {
            barber_id: Some(json!(barber_id)),
            service_id: Some(json!(1)),
            date: Some(json!(date_in_days(5))),
            time: Some(json!(time)),
            customer_name: Some(json!("Joao Silva")),
            customer_email: Some(json!("joao@example.com")),
            customer_whatsapp: Some(json!("+55 11 99999-0000")),
            payment_method: Some(json!("now")),
        }
    }

    #[test]
    fn test_confirmation_code_shape() {
        for _ in 0..50 {
            let code = generate_confirmation_code();
            assert_eq!(code.len(), 6);
            assert!(code.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
        }
    }

    #[tokio::test]
    async fn test_create_appointment() {
        let mut store = MockAppointmentStore::new();
        store.expect_find_active_bookings().times(1).returning(|_, _| Ok(vec![]));
        store
            .expect_insert_appointment()
            .times(1)
            .withf(|record| record.status == "confirmed" && record.barber_id == 1)
            .returning(|_| Ok("apt-1".to_string()));

        let response = service_with(store).create_appointment(&request(1, "10:00 AM")).await.unwrap();

        assert_eq!(response.id, "apt-1");
        assert_eq!(response.barber.name, "Rafael");
        assert_eq!(response.service.duration, 30);
        assert_eq!(response.payment_method, PaymentMethod::Now);
        assert_eq!(response.confirmation_code.len(), 6);
    }

    #[tokio::test]
    async fn test_invalid_request_never_touches_store() {
        let mut store = MockAppointmentStore::new();
        store.expect_find_active_bookings().times(0);
        store.expect_insert_appointment().times(0);

        let mut bad = request(1, "10:00 AM");
        bad.customer_email = Some(json!("nope"));

        let result = service_with(store).create_appointment(&bad).await;
        assert_matches!(result, Err(AppointmentError::Validation(ref details)) if details[0].field == "customerEmail");
    }

    #[tokio::test]
    async fn test_overlap_blocks_insert() {
        let mut store = MockAppointmentStore::new();
        store.expect_find_active_bookings().returning(|barber_id, date| {
            Ok(vec![BookedAppointment {
                id: None,
                barber_id,
                date: date.to_string(),
                time: "10:00 AM".to_string(),
                service_id: Some(1),
            }])
        });
        store.expect_insert_appointment().times(0);

        let result = service_with(store).create_appointment(&request(1, "10:30 AM")).await;
        assert_matches!(result, Err(AppointmentError::TimeSlotUnavailable));
    }

    #[tokio::test]
    async fn test_insert_failure_is_wrapped() {
        let mut store = MockAppointmentStore::new();
        store.expect_find_active_bookings().returning(|_, _| Ok(vec![]));
        store
            .expect_insert_appointment()
            .returning(|_| Err(anyhow!("Document store error (503): unavailable")));

        let result = service_with(store).create_appointment(&request(2, "3:00 PM")).await;
        assert_matches!(
            result,
            Err(AppointmentError::DatabaseError(ref msg)) if msg.starts_with("Error creating appointment: ")
        );
    }
}
