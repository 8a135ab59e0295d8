//! Serde helpers that decode loosely typed API values exactly once.
//!
//! The backend sends nullable columns either as plain JSON values or as
//! `{"Float64": 1.5, "Valid": true}` / `{"Time": "...", "Valid": true}`
//! wrappers, and amounts sometimes arrive as strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::currency::parse_amount;

const VALID_KEY: &str = "Valid";
const WRAPPED_KEYS: [&str; 4] = ["Float64", "Int64", "Time", "String"];

/// Returns the inner value of a nullable wrapper, or the value itself.
/// `None` means null or an invalid wrapper.
fn unwrap_nullable(value: &Value) -> Option<&Value> {
    match value {
        Value::Null => None,
        Value::Object(map) if map.contains_key(VALID_KEY) => {
            if !map.get(VALID_KEY).and_then(Value::as_bool).unwrap_or(false) {
                return None;
            }
            WRAPPED_KEYS.iter().find_map(|key| map.get(*key))
        }
        other => Some(other),
    }
}

/// Coerces any JSON value to an amount. Garbage becomes `0.0`.
pub fn coerce_amount(value: &Value) -> f64 {
    match unwrap_nullable(value) {
        Some(Value::Number(number)) => number.as_f64().filter(|n| n.is_finite()).unwrap_or(0.0),
        Some(Value::String(raw)) => parse_amount(raw),
        _ => 0.0,
    }
}

fn coerce_optional_amount(value: &Value) -> Option<f64> {
    unwrap_nullable(value).map(coerce_amount)
}

fn coerce_time(value: &Value) -> Option<DateTime<Utc>> {
    let raw = unwrap_nullable(value)?.as_str()?;
    // Zero time is how the backend encodes "never".
    if raw.starts_with("0001-01-01") {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_amount(&Value::deserialize(deserializer)?))
}

pub fn optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_optional_amount(&Value::deserialize(deserializer)?))
}

pub fn optional_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_time(&Value::deserialize(deserializer)?))
}
