use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Car identifiers arrive as JSON numbers or strings. Matching is strict:
/// `1` and `"1"` are different cars.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CarId {
    Number(i64),
    Text(String),
}

impl CarId {
    /// Reads an id out of an untyped request value. Anything other than an
    /// integer or a string cannot name a car.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(CarId::Number),
            Value::String(s) => Some(CarId::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarId::Number(n) => write!(f, "{}", n),
            CarId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CarId {
    fn from(n: i64) -> Self {
        CarId::Number(n)
    }
}

impl From<&str> for CarId {
    fn from(s: &str) -> Self {
        CarId::Text(s.to_string())
    }
}

/// A rentable vehicle. Only `id` and `booked` mean anything to this service;
/// make, model, price and whatever else the fleet file carries ride along in
/// `details` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    #[serde(default)]
    pub booked: bool,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Car {
    pub fn is_available(&self) -> bool {
        !self.booked
    }
}
