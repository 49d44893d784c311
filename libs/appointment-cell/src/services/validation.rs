use chrono::{Local, NaiveDate};
use regex::Regex;
use serde_json::Value;

use catalog_cell::CatalogRepository;
use shared_models::error::FieldError;

use crate::models::{
    AppointmentError, ConfirmationRequest, CreateAppointmentRequest, NewAppointment, PaymentMethod,
    TimeSlotsRequest,
};

const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";
const TIME_PATTERN: &str = r"(?i)^(0?[1-9]|1[0-2]):[0-5][0-9]\s?(AM|PM)$";
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

const NAME_MIN_CHARS: usize = 3;
const NAME_MAX_CHARS: usize = 100;

/// Today's date on the server's local calendar.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// True only for a well-formed `YYYY-MM-DD` date after `today`.
pub fn is_future_date(date: &str, today: NaiveDate) -> bool {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d > today)
        .unwrap_or(false)
}

struct Patterns {
    date: Regex,
    time: Regex,
    email: Regex,
}

impl Patterns {
    fn compile() -> Result<Self, AppointmentError> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| AppointmentError::Internal(format!("Invalid validation pattern: {}", e)))
        };

        Ok(Self {
            date: compile(DATE_PATTERN)?,
            time: compile(TIME_PATTERN)?,
            email: compile(EMAIL_PATTERN)?,
        })
    }
}

/// Collects field errors in request order.
#[derive(Default)]
struct Errors(Vec<FieldError>);

impl Errors {
    fn push(&mut self, field: &str, message: &str) {
        self.0.push(FieldError::new(field, message));
    }

    fn finish<T>(self, value: Option<T>) -> Result<T, AppointmentError> {
        match value {
            Some(value) if self.0.is_empty() => Ok(value),
            _ => Err(AppointmentError::Validation(self.0)),
        }
    }
}

enum TextValue<'a> {
    Missing,
    NotAString,
    Text(&'a str),
}

fn text_value(value: &Option<Value>) -> TextValue<'_> {
    match value {
        None | Some(Value::Null) => TextValue::Missing,
        Some(Value::String(text)) if text.is_empty() => TextValue::Missing,
        Some(Value::String(text)) => TextValue::Text(text),
        Some(_) => TextValue::NotAString,
    }
}

/// Required string field: pushes the required or type error and returns the text.
fn check_text<'a>(
    errors: &mut Errors,
    field: &str,
    value: &'a Option<Value>,
    required: &str,
    not_a_string: &str,
) -> Option<&'a str> {
    match text_value(value) {
        TextValue::Missing => errors.push(field, required),
        TextValue::NotAString => errors.push(field, not_a_string),
        TextValue::Text(text) => return Some(text),
    }
    None
}

enum IdValue {
    Missing,
    NotANumber,
    Invalid,
    Id(u32),
}

fn id_value(value: &Option<Value>) -> IdValue {
    match value {
        None | Some(Value::Null) => IdValue::Missing,
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map_or(IdValue::Invalid, IdValue::Id),
        Some(_) => IdValue::NotANumber,
    }
}

/// Pushes the usual id errors and returns the id when it is usable.
fn check_id(errors: &mut Errors, field: &str, noun: &str, value: &Option<Value>) -> Option<u32> {
    match id_value(value) {
        IdValue::Missing => errors.push(field, &format!("{} ID is required", noun)),
        IdValue::NotANumber => errors.push(field, &format!("{} ID must be a number", noun)),
        IdValue::Invalid => errors.push(field, &format!("Invalid {} ID", noun.to_lowercase())),
        IdValue::Id(id) => return Some(id),
    }
    None
}

fn check_date(errors: &mut Errors, patterns: &Patterns, value: &Option<Value>, today: NaiveDate) -> Option<String> {
    const FORMAT: &str = "Date must be in format YYYY-MM-DD";
    let date = check_text(errors, "date", value, "Date is required", FORMAT)?;

    if !patterns.date.is_match(date) || NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        errors.push("date", FORMAT);
        return None;
    }
    if !is_future_date(date, today) {
        errors.push("date", "Date must be in the future");
        return None;
    }

    Some(date.to_string())
}

/// Returns `(barber_id, service_id, date)` for a time-slot query.
pub fn validate_time_slots_request(
    request: &TimeSlotsRequest,
    today: NaiveDate,
) -> Result<(u32, Option<u32>, String), AppointmentError> {
    let patterns = Patterns::compile()?;
    let mut errors = Errors::default();

    let date = check_date(&mut errors, &patterns, &request.date, today);
    let barber_id = check_id(&mut errors, "barberId", "Barber", &request.barber_id);

    let service_id = match id_value(&request.service_id) {
        IdValue::Missing => Some(None),
        IdValue::Id(id) => Some(Some(id)),
        IdValue::NotANumber => {
            errors.push("serviceId", "Service ID must be a number");
            None
        }
        IdValue::Invalid => {
            errors.push("serviceId", "Invalid service ID");
            None
        }
    };

    let parsed = match (barber_id, service_id, date) {
        (Some(barber_id), Some(service_id), Some(date)) => Some((barber_id, service_id, date)),
        _ => None,
    };
    errors.finish(parsed)
}

pub fn validate_create_request(
    request: &CreateAppointmentRequest,
    catalog: &dyn CatalogRepository,
    today: NaiveDate,
) -> Result<NewAppointment, AppointmentError> {
    let patterns = Patterns::compile()?;
    let mut errors = Errors::default();

    let barber_id = check_id(&mut errors, "barberId", "Barber", &request.barber_id).filter(|&id| {
        let known = catalog.barber(id).is_some();
        if !known {
            errors.push("barberId", "Invalid barber ID");
        }
        known
    });

    let service_id = check_id(&mut errors, "serviceId", "Service", &request.service_id).filter(|&id| {
        let known = catalog.service(id).is_some();
        if !known {
            errors.push("serviceId", "Invalid service ID");
        }
        known
    });

    let date = check_date(&mut errors, &patterns, &request.date, today);

    const TIME_FORMAT: &str = "Time must be in format HH:MM AM/PM";
    let time = check_text(&mut errors, "time", &request.time, "Time is required", TIME_FORMAT).and_then(|time| {
        if patterns.time.is_match(time) {
            Some(time.to_string())
        } else {
            errors.push("time", TIME_FORMAT);
            None
        }
    });

    let customer_name = check_text(
        &mut errors,
        "customerName",
        &request.customer_name,
        "Customer name is required",
        "Customer name must be a string",
    )
    .and_then(|name| {
        if (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name.chars().count()) {
            Some(name.to_string())
        } else {
            errors.push("customerName", "Customer name must be between 3 and 100 characters");
            None
        }
    });

    let customer_email = check_text(
        &mut errors,
        "customerEmail",
        &request.customer_email,
        "Customer email is required",
        "Customer email must be a string",
    )
    .and_then(|email| {
        if patterns.email.is_match(email) {
            Some(email.to_string())
        } else {
            errors.push("customerEmail", "Invalid email format");
            None
        }
    });

    let customer_whatsapp = check_text(
        &mut errors,
        "customerWhatsapp",
        &request.customer_whatsapp,
        "Customer WhatsApp is required",
        "Customer WhatsApp must be a string",
    )
    .map(str::to_string);

    const PAYMENT_CHOICES: &str = "Payment method must be either \"later\" or \"now\"";
    let payment_method = check_text(
        &mut errors,
        "paymentMethod",
        &request.payment_method,
        "Payment method is required",
        PAYMENT_CHOICES,
    )
    .and_then(|method| {
        let parsed = PaymentMethod::parse(method);
        if parsed.is_none() {
            errors.push("paymentMethod", PAYMENT_CHOICES);
        }
        parsed
    });

    let appointment = match (
        barber_id,
        service_id,
        date,
        time,
        customer_name,
        customer_email,
        customer_whatsapp,
        payment_method,
    ) {
        (
            Some(barber_id),
            Some(service_id),
            Some(date),
            Some(time),
            Some(customer_name),
            Some(customer_email),
            Some(customer_whatsapp),
            Some(payment_method),
        ) => Some(NewAppointment {
            barber_id,
            service_id,
            date,
            time,
            customer_name,
            customer_email,
            customer_whatsapp,
            payment_method,
        }),
        _ => None,
    };
    errors.finish(appointment)
}

/// Appointment ids may arrive as strings or numbers.
pub fn validate_confirmation_request(request: &ConfirmationRequest) -> Result<String, AppointmentError> {
    match &request.appointment_id {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(AppointmentError::validation("appointmentId", "Appointment ID is required")),
    }
}
