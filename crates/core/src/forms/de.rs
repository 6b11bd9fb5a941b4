//! Lenient field decoders for form value bags and backend payloads.
//!
//! Browsers post numbers as strings, checkboxes as `"on"`, and dates in
//! several shapes. Each decoder here accepts what it can and yields `None`
//! for anything else, so decoding a form never fails on a single field and
//! the schema's own rules report what is missing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

fn raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Option::<Value>::deserialize(deserializer)
}

/// Parse `YYYY-MM-DD`, or the date part of a date-time.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_datetime(input).map(|dt| dt.date()))
}

/// Parse RFC 3339 (offset dropped after conversion to UTC) or a naive
/// date-time as sent by `datetime-local` inputs.
pub fn parse_datetime(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(input) {
        return Some(with_offset.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
}

fn as_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Any scalar, as a string.
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(raw(deserializer)?.and_then(as_string))
}

/// Any scalar, as a string with surrounding whitespace removed.
pub fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(string(deserializer)?.map(|s| s.trim().to_string()))
}

/// Trimmed text where blank means absent.
pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(trimmed(deserializer)?.filter(|s| !s.is_empty()))
}

/// A number or a numeric string. Empty strings are absent.
pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(raw(deserializer)?.as_ref().and_then(as_f64))
}

/// An integer or an integral string.
pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(raw(deserializer)?.as_ref().and_then(as_i64))
}

/// `true`/`false`, plus checkbox spellings (`"on"`, `"1"`, `""`).
pub fn boolean<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(raw(deserializer)?.and_then(|value| match value {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "1" | "yes" => Some(true),
            "false" | "off" | "0" | "no" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }))
}

/// Checkbox that is off unless it reads as on.
pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(boolean(deserializer)?.unwrap_or(false))
}

pub fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    Ok(raw(deserializer)?
        .and_then(as_string)
        .and_then(|s| parse_date(&s)))
}

pub fn datetime<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error> {
    Ok(raw(deserializer)?
        .and_then(as_string)
        .and_then(|s| parse_datetime(&s)))
}

/// Array of integers; a single scalar counts as a one-element array and
/// elements that are not integers are dropped.
pub fn integer_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<i64>, D::Error> {
    Ok(match raw(deserializer)? {
        Some(Value::Array(items)) => items.iter().filter_map(as_i64).collect(),
        Some(scalar) => as_i64(&scalar).into_iter().collect(),
        None => Vec::new(),
    })
}

/// Array of strings; a single scalar counts as a one-element array.
pub fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match raw(deserializer)? {
        Some(Value::Array(items)) => items.into_iter().filter_map(as_string).collect(),
        Some(scalar) => as_string(scalar).into_iter().collect(),
        None => Vec::new(),
    })
}

/// Array of nested rows. Anything that is not an array is an empty list,
/// and rows that are not objects are dropped, so the schema's own length
/// rule names the field.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(Value::Array(items)) = raw(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| T::deserialize(item).ok())
        .collect())
}
