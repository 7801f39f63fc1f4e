use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::car::CarId;
use crate::error::{AppError, AppResult};

/// Booking identifiers. New bookings get a UUID; older collections carry
/// millisecond timestamps, which still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookingId {
    Number(i64),
    Text(String),
}

impl BookingId {
    pub fn generate() -> Self {
        BookingId::Text(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingId::Number(n) => write!(f, "{}", n),
            BookingId::Text(s) => f.write_str(s),
        }
    }
}

/// A customer's reservation of one car. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub car_id: CarId,
    #[serde(deserialize_with = "text")]
    pub customer_name: String,
    #[serde(deserialize_with = "text")]
    pub customer_email: String,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub driver_license: Option<String>,
    /// Dates are opaque strings; no calendar validation happens here.
    #[serde(deserialize_with = "text")]
    pub start_date: String,
    #[serde(deserialize_with = "text")]
    pub end_date: String,
    /// Creation instant.
    pub timestamp: DateTime<Utc>,
}

impl Booking {
    pub fn new(request: NewBooking) -> Self {
        Self {
            id: BookingId::generate(),
            car_id: request.car_id,
            customer_name: request.customer_name,
            customer_email: request.customer_email,
            customer_phone: request.customer_phone,
            driver_license: request.driver_license,
            start_date: request.start_date,
            end_date: request.end_date,
            timestamp: Utc::now(),
        }
    }
}

/// Strings pass through; any other JSON value is kept as its JSON text.
fn value_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Value::deserialize(deserializer).map(value_text)
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Option::<Value>::deserialize(deserializer).map(|v| v.map(value_text))
}

/// Null and blank strings are absent; everything else counts as given.
fn is_present(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Raw `POST /book` body. Fields are untyped JSON: the only check applied is
/// presence, so a phone number sent as a number is as good as a string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub car_id: Option<Value>,
    pub customer_name: Option<Value>,
    pub customer_email: Option<Value>,
    pub customer_phone: Option<Value>,
    pub driver_license: Option<Value>,
    pub start_date: Option<Value>,
    pub end_date: Option<Value>,
}

/// A booking request that passed presence validation.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub car_id: CarId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub driver_license: Option<String>,
    pub start_date: String,
    pub end_date: String,
}

impl CreateBooking {
    /// Names of required fields that are absent or empty, in request order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("carId", &self.car_id),
            ("customerName", &self.customer_name),
            ("customerEmail", &self.customer_email),
            ("startDate", &self.start_date),
            ("endDate", &self.end_date),
        ]
        .into_iter()
        .filter(|(_, value)| !is_present(value))
        .map(|(name, _)| name)
        .collect()
    }

    pub fn validate(self) -> AppResult<NewBooking> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            tracing::debug!(?missing, "Rejected booking request");
            return Err(AppError::Validation(
                "Missing required booking fields".to_string(),
            ));
        }

        // Every required field is present past this point.
        let required = |v: Option<Value>| v.map(value_text).unwrap_or_default();
        let optional = |v: Option<Value>| v.filter(|v| !v.is_null()).map(value_text);

        // A present id of a type no car can have matches nothing.
        let car_id = self
            .car_id
            .as_ref()
            .and_then(CarId::from_json)
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        Ok(NewBooking {
            car_id,
            customer_name: required(self.customer_name),
            customer_email: required(self.customer_email),
            customer_phone: optional(self.customer_phone),
            driver_license: optional(self.driver_license),
            start_date: required(self.start_date),
            end_date: required(self.end_date),
        })
    }
}
