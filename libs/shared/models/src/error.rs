use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Stable error codes returned to API clients in `error.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    InvalidDate,
    BarberNotFound,
    ServiceNotFound,
    BarbersNotFound,
    ServicesNotFound,
    TimeSlotUnavailable,
    BarberUnavailable,
    AppointmentNotFound,
    EmailSendFailed,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidDate => "INVALID_DATE",
            ErrorCode::BarberNotFound => "BARBER_NOT_FOUND",
            ErrorCode::ServiceNotFound => "SERVICE_NOT_FOUND",
            ErrorCode::BarbersNotFound => "BARBERS_NOT_FOUND",
            ErrorCode::ServicesNotFound => "SERVICES_NOT_FOUND",
            ErrorCode::TimeSlotUnavailable => "TIME_SLOT_UNAVAILABLE",
            ErrorCode::BarberUnavailable => "BARBER_UNAVAILABLE",
            ErrorCode::AppointmentNotFound => "APPOINTMENT_NOT_FOUND",
            ErrorCode::EmailSendFailed => "EMAIL_SEND_FAILED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationError | ErrorCode::InvalidDate => StatusCode::BAD_REQUEST,
            ErrorCode::BarberNotFound
            | ErrorCode::ServiceNotFound
            | ErrorCode::BarbersNotFound
            | ErrorCode::ServicesNotFound
            | ErrorCode::AppointmentNotFound => StatusCode::NOT_FOUND,
            ErrorCode::TimeSlotUnavailable | ErrorCode::BarberUnavailable => StatusCode::CONFLICT,
            ErrorCode::EmailSendFailed | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input data")]
    Validation(Vec<FieldError>),

    #[error("Date must be in the future")]
    InvalidDate,

    #[error("Barber not found")]
    BarberNotFound,

    #[error("Service not found")]
    ServiceNotFound,

    #[error("No barbers available")]
    BarbersNotFound,

    #[error("No services available")]
    ServicesNotFound,

    #[error("The selected time slot is not available")]
    TimeSlotUnavailable,

    #[error("Barber is not available at the selected time")]
    BarberUnavailable,

    #[error("Appointment not found")]
    AppointmentNotFound,

    #[error("Failed to send confirmation email")]
    EmailSendFailed,

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::new(field, message)])
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::InvalidDate => ErrorCode::InvalidDate,
            AppError::BarberNotFound => ErrorCode::BarberNotFound,
            AppError::ServiceNotFound => ErrorCode::ServiceNotFound,
            AppError::BarbersNotFound => ErrorCode::BarbersNotFound,
            AppError::ServicesNotFound => ErrorCode::ServicesNotFound,
            AppError::TimeSlotUnavailable => ErrorCode::TimeSlotUnavailable,
            AppError::BarberUnavailable => ErrorCode::BarberUnavailable,
            AppError::AppointmentNotFound => ErrorCode::AppointmentNotFound,
            AppError::EmailSendFailed => ErrorCode::EmailSendFailed,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }

    pub fn details(&self) -> Option<&[FieldError]> {
        match self {
            AppError::Validation(details) => Some(details),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = code.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(code = %code, "Error: {}: {}", status, message);
        } else {
            tracing::warn!(code = %code, "Request rejected: {}: {}", status, message);
        }

        let mut error = json!({
            "code": code,
            "message": message,
        });
        if let Some(details) = self.details() {
            error["details"] = json!(details);
        }

        let body = Json(json!({
            "success": false,
            "error": error
        }));

        (status, body).into_response()
    }
}
