use crate::error::{Result, TimeError};
use chrono::{DateTime, Utc};
use serde_json::{Number, Value};

/// Largest distance from the epoch, in milliseconds, a timestamp may have.
pub const MAX_TIMESTAMP_MS: f64 = 8.64e15;

/// Interprets a caller-supplied timestamp. Numbers and numeric strings are
/// Unix milliseconds (fraction truncated toward zero); RFC 3339 strings are
/// accepted as-is. Absent, `null` or blank means the caller sent nothing.
pub fn parse_timestamp(value: Option<&Value>) -> Result<DateTime<Utc>> {
    let millis = match value {
        None | Some(Value::Null) => return Err(TimeError::MissingTimestamp),
        Some(Value::Number(number)) => number.as_f64().ok_or(TimeError::InvalidTimestamp)?,
        Some(Value::String(raw)) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return Err(TimeError::MissingTimestamp);
            }
            match raw.parse::<f64>() {
                Ok(millis) => millis,
                Err(_) => {
                    return DateTime::parse_from_rfc3339(raw)
                        .map(|dt| dt.with_timezone(&Utc))
                        .map_err(|_| TimeError::InvalidTimestamp)
                }
            }
        }
        Some(_) => return Err(TimeError::InvalidTimestamp),
    };
    instant_from_millis(millis)
}

pub fn instant_from_millis(millis: f64) -> Result<DateTime<Utc>> {
    if !millis.is_finite() || millis.abs() > MAX_TIMESTAMP_MS {
        return Err(TimeError::InvalidTimestamp);
    }
    DateTime::<Utc>::from_timestamp_millis(millis.trunc() as i64).ok_or(TimeError::InvalidTimestamp)
}

/// Text of an argument as JavaScript's `String()` would produce it, so a
/// number or `null` sent where text was expected still reads sensibly.
pub fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number_string(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// JavaScript truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn number_string(number: &Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    if let Some(int) = number.as_u64() {
        return int.to_string();
    }
    match number.as_f64() {
        Some(n) if n == 0.0 => "0".to_string(),
        Some(n) if n.fract() == 0.0 && n.abs() < 1e21 => format!("{:.0}", n),
        Some(n) => n.to_string(),
        None => number.to_string(),
    }
}

/// Seconds since the epoch, rounded toward negative infinity.
pub fn unix_seconds(instant: DateTime<Utc>) -> i64 {
    instant.timestamp()
}
