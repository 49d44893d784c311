use std::sync::Arc;

use chrono::{Duration, Local};
use serde_json::{json, Value};

use shared_config::AppConfig;

pub struct TestConfig {
    pub document_store_url: String,
    pub document_store_api_key: String,
    pub smtp_username: String,
    pub smtp_password: String,
    pub email_from: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            document_store_url: "http://localhost:54321".to_string(),
            document_store_api_key: "test-store-key".to_string(),
            smtp_username: "agenda@distritobarbearia.com.br".to_string(),
            smtp_password: "test-app-password".to_string(),
            email_from: "agenda@distritobarbearia.com.br".to_string(),
        }
    }
}

impl TestConfig {
    /// Points the document store at a mock server.
    pub fn with_mock_server(uri: &str) -> Self {
        Self {
            document_store_url: uri.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            document_store_url: self.document_store_url.clone(),
            document_store_api_key: self.document_store_api_key.clone(),
            smtp_username: self.smtp_username.clone(),
            smtp_password: self.smtp_password.clone(),
            email_from: self.email_from.clone(),
            ..AppConfig::default()
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// `YYYY-MM-DD` for a day relative to today, local time.
pub fn date_in_days(days: i64) -> String {
    (Local::now().date_naive() + Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

pub struct MockStoreResponses;

impl MockStoreResponses {
    pub fn appointment_document(
        id: &str,
        barber_id: u32,
        service_id: u32,
        date: &str,
        time: &str,
    ) -> Value {
        json!({
            "id": id,
            "barber_id": barber_id,
            "service_id": service_id,
            "date": date,
            "time": time,
            "customer_name": "Joao Silva",
            "customer_email": "joao@example.com",
            "customer_whatsapp": "+55 11 99999-0000",
            "payment_method": "later",
            "status": "confirmed",
            "created_at": "2026-10-18T12:00:00Z",
            "confirmation_code": "AB12CD"
        })
    }
}
