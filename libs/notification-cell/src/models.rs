// libs/notification-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarberSummary {
    pub name: String,
    pub specialty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub name: String,
    pub price: f64,
    pub duration: u32,
}

/// Everything a confirmation email shows about one appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationEmail {
    pub customer_email: String,
    pub customer_name: String,
    pub barber: BarberSummary,
    pub service: ServiceSummary,
    pub date: String,
    pub time: String,
    pub confirmation_code: String,
    pub customer_whatsapp: String,
    pub payment_method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailReceipt {
    pub message_id: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("SMTP transport is not configured")]
    NotConfigured,

    #[error("Invalid email address {0:?}")]
    InvalidAddress(String),

    #[error("Email delivery failed: {0}")]
    SendFailed(String),
}

impl From<NotificationError> for AppError {
    fn from(_: NotificationError) -> Self {
        AppError::EmailSendFailed
    }
}
