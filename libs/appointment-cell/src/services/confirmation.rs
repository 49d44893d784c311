use std::sync::Arc;

use tracing::{debug, error, info};

use catalog_cell::CatalogRepository;
use notification_cell::{BarberSummary, ConfirmationEmail, ConfirmationMailer, ServiceSummary};

use crate::models::{AppointmentError, ConfirmationResult};
use crate::store::AppointmentStore;

pub struct ConfirmationService {
    catalog: Arc<dyn CatalogRepository>,
    store: Arc<dyn AppointmentStore>,
    mailer: Option<Arc<dyn ConfirmationMailer>>,
}

impl ConfirmationService {
    /// `mailer` is `None` when SMTP is not configured; sends then fail.
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        store: Arc<dyn AppointmentStore>,
        mailer: Option<Arc<dyn ConfirmationMailer>>,
    ) -> Self {
        Self { catalog, store, mailer }
    }

    pub async fn send_confirmation_email(&self, appointment_id: &str) -> Result<ConfirmationResult, AppointmentError> {
        if appointment_id.is_empty() {
            return Err(AppointmentError::validation("appointmentId", "Appointment ID is required"));
        }

        debug!(appointment_id, "Looking up appointment");

        let appointment = self.store.find_appointment(appointment_id).await.map_err(|e| {
            error!(appointment_id, "Error sending confirmation email: {}", e);
            AppointmentError::DatabaseError(format!("Error sending confirmation email: {}", e))
        })?;

        info!(appointment_id, found = appointment.is_some(), "Appointment lookup finished");

        let appointment = appointment.ok_or_else(|| {
            error!(appointment_id, "Appointment not found");
            AppointmentError::NotFound
        })?;

        let barber = self.catalog.barber(appointment.barber_id).ok_or_else(|| {
            error!(barber_id = appointment.barber_id, "Barber not found");
            AppointmentError::BarberNotFound
        })?;

        let service = self.catalog.service(appointment.service_id).ok_or_else(|| {
            error!(service_id = appointment.service_id, "Service not found");
            AppointmentError::ServiceNotFound
        })?;

        let mailer = self.mailer.as_ref().ok_or_else(|| {
            error!(appointment_id, "SMTP transport is not configured");
            AppointmentError::EmailSendFailed
        })?;

        let email = ConfirmationEmail {
            customer_email: appointment.customer_email,
            customer_name: appointment.customer_name,
            barber: BarberSummary {
                name: barber.name.clone(),
                specialty: barber.specialty.clone(),
            },
            service: ServiceSummary {
                name: service.name.clone(),
                price: service.price,
                duration: service.duration,
            },
            date: appointment.date,
            time: appointment.time,
            confirmation_code: appointment.confirmation_code,
            customer_whatsapp: appointment.customer_whatsapp,
            payment_method: appointment.payment_method.to_string(),
        };

        let receipt = mailer.send_confirmation_email(&email).await.map_err(|e| {
            error!(appointment_id, "Error sending confirmation email: {}", e);
            AppointmentError::EmailSendFailed
        })?;

        info!(
            appointment_id,
            message_id = %receipt.message_id,
            "Confirmation email sent successfully"
        );

        Ok(ConfirmationResult {
            success: true,
            appointment_id: appointment_id.to_string(),
            email_sent: true,
            sent_at: receipt.sent_at,
            message_id: receipt.message_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use catalog_cell::Catalog;
    use chrono::Utc;
    use notification_cell::{EmailReceipt, NotificationError};
    use std::sync::Mutex;

    use crate::models::{AppointmentRecord, PaymentMethod};
    use crate::store::MockAppointmentStore;

    const BARBERS: &str = r#"[{"id": 1, "name": "Rafael", "specialty": "Degradê"}]"#;
    const SERVICES: &str = r#"[{"categoryName": "Cabelo", "services": [{"id": 1, "name": "Corte", "duration": 30, "price": 45.0}]}]"#;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<ConfirmationEmail>>,
        fail: bool,
    }

    #[async_trait]
    impl ConfirmationMailer for RecordingMailer {
        async fn send_confirmation_email(&self, email: &ConfirmationEmail) -> Result<EmailReceipt, NotificationError> {
            if self.fail {
                return Err(NotificationError::SendFailed("smtp down".to_string()));
            }
            self.sent.lock().unwrap().push(email.clone());
            Ok(EmailReceipt {
                message_id: "msg-1".to_string(),
                sent_at: Utc::now(),
            })
        }
    }

    fn record(barber_id: u32) -> AppointmentRecord {
        AppointmentRecord {
            barber_id,
            service_id: 1,
            date: "2026-10-20".to_string(),
            time: "10:00 AM".to_string(),
            customer_name: "Joao Silva".to_string(),
            customer_email: "joao@example.com".to_string(),
            customer_whatsapp: "+55 11 99999-0000".to_string(),
            payment_method: PaymentMethod::Later,
            status: "confirmed".to_string(),
            created_at: Utc::now(),
            confirmation_code: "AB12CD".to_string(),
        }
    }

    fn service_with(store: MockAppointmentStore, mailer: Option<Arc<dyn ConfirmationMailer>>) -> ConfirmationService {
        let catalog = Arc::new(Catalog::from_json(BARBERS, SERVICES).unwrap());
        ConfirmationService::new(catalog, Arc::new(store), mailer)
    }

    #[tokio::test]
    async fn test_sends_email_with_catalog_details() {
        let mut store = MockAppointmentStore::new();
        store.expect_find_appointment().returning(|_| Ok(Some(record(1))));
        let mailer = Arc::new(RecordingMailer::default());
        let shared: Arc<dyn ConfirmationMailer> = mailer.clone();

        let result = service_with(store, Some(shared))
            .send_confirmation_email("apt-1")
            .await
            .unwrap();

        assert!(result.success && result.email_sent);
        assert_eq!(result.appointment_id, "apt-1");
        assert_eq!(result.message_id, "msg-1");

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].barber.specialty, "Degradê");
        assert_eq!(sent[0].service.price, 45.0);
        assert_eq!(sent[0].payment_method, "later");
    }

    #[tokio::test]
    async fn test_missing_appointment() {
        let mut store = MockAppointmentStore::new();
        store.expect_find_appointment().returning(|_| Ok(None));

        let result = service_with(store, None).send_confirmation_email("nope").await;
        assert_matches!(result, Err(AppointmentError::NotFound));
    }

    #[tokio::test]
    async fn test_unknown_barber_on_record() {
        let mut store = MockAppointmentStore::new();
        store.expect_find_appointment().returning(|_| Ok(Some(record(9))));

        let result = service_with(store, None).send_confirmation_email("apt-1").await;
        assert_matches!(result, Err(AppointmentError::BarberNotFound));
    }

    #[tokio::test]
    async fn test_delivery_failures() {
        let mut store = MockAppointmentStore::new();
        store.expect_find_appointment().returning(|_| Ok(Some(record(1))));
        let failing: Arc<dyn ConfirmationMailer> = Arc::new(RecordingMailer { fail: true, ..Default::default() });

        let result = service_with(store, Some(failing)).send_confirmation_email("apt-1").await;
        assert_matches!(result, Err(AppointmentError::EmailSendFailed));

        let mut store = MockAppointmentStore::new();
        store.expect_find_appointment().returning(|_| Ok(Some(record(1))));

        let result = service_with(store, None).send_confirmation_email("apt-1").await;
        assert_matches!(result, Err(AppointmentError::EmailSendFailed));
    }

    #[tokio::test]
    async fn test_store_failure_is_internal() {
        let mut store = MockAppointmentStore::new();
        store.expect_find_appointment().returning(|_| Err(anyhow!("boom")));

        let result = service_with(store, None).send_confirmation_email("apt-1").await;
        assert_matches!(result, Err(AppointmentError::DatabaseError(ref msg)) if msg == "Error sending confirmation email: boom");
    }
}
