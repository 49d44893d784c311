// libs/appointment-cell/src/models.rs
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use catalog_cell::{Barber, Service};
use shared_models::error::{AppError, FieldError};

pub const STATUS_CONFIRMED: &str = "confirmed";
pub const STATUS_CANCELLED: &str = "cancelled";

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

// Fields stay loosely typed so a wrong JSON type is reported per field instead
// of rejecting the whole body.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotsRequest {
    pub barber_id: Option<Value>,
    pub service_id: Option<Value>,
    pub date: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub barber_id: Option<Value>,
    pub service_id: Option<Value>,
    pub date: Option<Value>,
    pub time: Option<Value>,
    pub customer_name: Option<Value>,
    pub customer_email: Option<Value>,
    pub customer_whatsapp: Option<Value>,
    pub payment_method: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationRequest {
    pub appointment_id: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Later,
    Now,
}

impl PaymentMethod {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "later" => Some(PaymentMethod::Later),
            "now" => Some(PaymentMethod::Now),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Later => "later",
            PaymentMethod::Now => "now",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A create request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub barber_id: u32,
    pub service_id: u32,
    pub date: String,
    pub time: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_whatsapp: String,
    pub payment_method: PaymentMethod,
}

// ==============================================================================
// STORED MODELS
// ==============================================================================

/// Appointment document as persisted in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub barber_id: u32,
    pub service_id: u32,
    pub date: String,
    pub time: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_whatsapp: String,
    pub payment_method: PaymentMethod,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub confirmation_code: String,
}

/// The slice of an existing booking the availability checks need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookedAppointment {
    #[serde(default)]
    pub id: Option<Value>,
    pub barber_id: u32,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub service_id: Option<u32>,
}

// ==============================================================================
// RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotsResponse {
    pub date: String,
    pub available_slots: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub id: String,
    pub barber: Barber,
    pub service: Service,
    pub date: String,
    pub time: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_whatsapp: String,
    pub payment_method: PaymentMethod,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub confirmation_code: String,
}

impl AppointmentResponse {
    pub fn from_record(id: String, record: AppointmentRecord, barber: &Barber, service: &Service) -> Self {
        Self {
            id,
            barber: barber.clone(),
            service: service.clone(),
            date: record.date,
            time: record.time,
            customer_name: record.customer_name,
            customer_email: record.customer_email,
            customer_whatsapp: record.customer_whatsapp,
            payment_method: record.payment_method,
            status: record.status,
            created_at: record.created_at,
            confirmation_code: record.confirmation_code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationResult {
    pub success: bool,
    pub appointment_id: String,
    pub email_sent: bool,
    pub sent_at: DateTime<Utc>,
    pub message_id: String,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Invalid input data")]
    Validation(Vec<FieldError>),

    #[error("Date must be in the future")]
    InvalidDate,

    #[error("Barber not found")]
    BarberNotFound,

    #[error("Service not found")]
    ServiceNotFound,

    #[error("The selected time slot is not available")]
    TimeSlotUnavailable,

    #[error("Barber is not available at the selected time")]
    BarberUnavailable,

    #[error("Appointment not found")]
    NotFound,

    #[error("Failed to send confirmation email")]
    EmailSendFailed,

    #[error("{0}")]
    DatabaseError(String),

    #[error("{0}")]
    Internal(String),
}

impl AppointmentError {
    pub fn validation(field: &str, message: &str) -> Self {
        AppointmentError::Validation(vec![FieldError::new(field, message)])
    }
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::Validation(details) => AppError::Validation(details),
            AppointmentError::InvalidDate => AppError::InvalidDate,
            AppointmentError::BarberNotFound => AppError::BarberNotFound,
            AppointmentError::ServiceNotFound => AppError::ServiceNotFound,
            AppointmentError::TimeSlotUnavailable => AppError::TimeSlotUnavailable,
            AppointmentError::BarberUnavailable => AppError::BarberUnavailable,
            AppointmentError::NotFound => AppError::AppointmentNotFound,
            AppointmentError::EmailSendFailed => AppError::EmailSendFailed,
            AppointmentError::DatabaseError(message) | AppointmentError::Internal(message) => {
                AppError::Internal(message)
            }
        }
    }
}
