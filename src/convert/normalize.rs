//! Value normalization: reduce one JSON value to a display scalar.
//!
//! Recognizes the two MongoDB extended-JSON wrappers (`$oid`, `$date`) and
//! passes every other shape through untouched. Also hosts the shared
//! text-rendering and numeric-coercion helpers used by the codecs.

use crate::convert::types::ConvertError;
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static NUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?\d+(\.\d+)?([eE][+-]?\d+)?$").unwrap()
});

/// Reduce a value to its display scalar.
///
/// - an object carrying `$oid` yields that key's value;
/// - an object carrying `$date` yields the ISO-8601 string of the instant;
/// - everything else (scalar, array, other objects) is returned unchanged.
pub fn normalize(value: &Value) -> Result<Value, ConvertError> {
    if let Value::Object(obj) = value {
        if let Some(oid) = obj.get("$oid") {
            return Ok(oid.clone());
        }
        if let Some(payload) = obj.get("$date") {
            return Ok(Value::String(iso_instant(payload)?));
        }
    }
    Ok(value.clone())
}

/// Parse a `$date` payload (RFC 3339 string, bare date, or epoch
/// milliseconds) and render it with millisecond precision and a `Z` suffix.
fn iso_instant(payload: &Value) -> Result<String, ConvertError> {
    let instant: DateTime<Utc> = match payload {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|_| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map(|d| Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)))
            })
            .map_err(|_| ConvertError::InvalidDate(s.clone()))?,
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
            .ok_or_else(|| ConvertError::InvalidDate(n.to_string()))?,
        other => return Err(ConvertError::InvalidDate(other.to_string())),
    };
    Ok(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Render a normalized value as cell text. Nulls render empty; objects and
/// arrays that survived normalization render as compact JSON.
pub fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Coerce a CSV cell to a JSON number when the entire cell is numeric.
/// Integral cells become i64 so they print without a trailing `.0`.
pub fn coerce_number(cell: &str) -> Option<Value> {
    if !NUMERIC_REGEX.is_match(cell) {
        return None;
    }
    if let Ok(i) = cell.parse::<i64>() {
        return Some(Value::Number(i.into()));
    }
    cell.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}
