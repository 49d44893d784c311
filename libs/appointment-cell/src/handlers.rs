// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use shared_models::error::AppError;
use shared_utils::redact_sensitive;

use crate::models::{ConfirmationRequest, CreateAppointmentRequest, TimeSlotsRequest, TimeSlotsResponse};
use crate::router::AppointmentState;
use crate::services::validation::{today, validate_confirmation_request, validate_time_slots_request};
use crate::services::{AppointmentBookingService, AvailabilityService, ConfirmationService};

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            warn!("Rejected request body: {}", rejection.body_text());
            Err(AppError::validation("body", rejection.body_text()))
        }
    }
}

fn log_input<T: Serialize>(operation: &str, input: &T) {
    let value = serde_json::to_value(input).unwrap_or(Value::Null);
    info!(operation, input = %redact_sensitive(&value), "Request received");
}

#[axum::debug_handler]
pub async fn get_time_slots(
    State(state): State<Arc<AppointmentState>>,
    payload: Result<Json<TimeSlotsRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let request = parse_body(payload)?;
    log_input("getAvailableTimeSlots", &request);

    let (barber_id, service_id, date) = validate_time_slots_request(&request, today())?;

    let service = AvailabilityService::new(Arc::clone(&state.catalog), state.store(), state.slot_settings());
    let available_slots = service.get_available_time_slots(barber_id, service_id, &date).await?;

    info!(
        barber_id,
        ?service_id,
        date = %date,
        slots_count = available_slots.len(),
        "Time slots retrieved successfully"
    );

    Ok(Json(json!({
        "success": true,
        "data": TimeSlotsResponse { date, available_slots }
    })))
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppointmentState>>,
    payload: Result<Json<CreateAppointmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let request = parse_body(payload)?;
    log_input("createAppointment", &request);

    let service = AppointmentBookingService::new(Arc::clone(&state.catalog), state.store(), state.slot_settings());
    let appointment = service.create_appointment(&request).await?;

    info!(
        appointment_id = %appointment.id,
        barber_id = appointment.barber.id,
        service_id = appointment.service.id,
        date = %appointment.date,
        time = %appointment.time,
        "Appointment created successfully"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": appointment,
            "message": "Appointment created successfully"
        })),
    ))
}

#[axum::debug_handler]
pub async fn send_confirmation(
    State(state): State<Arc<AppointmentState>>,
    payload: Result<Json<ConfirmationRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let request = parse_body(payload)?;
    log_input("sendConfirmationEmail", &request);

    let appointment_id = validate_confirmation_request(&request)?;

    let service = ConfirmationService::new(Arc::clone(&state.catalog), state.store(), state.mailer.clone());
    let result = service.send_confirmation_email(&appointment_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": result,
        "message": "Confirmation email sent successfully"
    })))
}
