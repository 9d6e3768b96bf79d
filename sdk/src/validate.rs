//! Field-level validation helpers shared by the request types.

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::SdkError;

/// Wire format for date-time fields.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wire format for date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Rejects empty or whitespace-only strings.
pub(crate) fn non_blank(field: &str, value: &str) -> Result<(), SdkError> {
    if value.trim().is_empty() {
        return Err(SdkError::validation(format!(
            "{} must be a non-empty string",
            field
        )));
    }
    Ok(())
}

/// Rejects empty slices.
pub(crate) fn non_empty<T>(field: &str, values: &[T]) -> Result<(), SdkError> {
    if values.is_empty() {
        return Err(SdkError::validation(format!(
            "{} must be a non-empty list",
            field
        )));
    }
    Ok(())
}

/// Enforces a lower bound on an integer field.
pub(crate) fn at_least(field: &str, value: i64, min: i64) -> Result<(), SdkError> {
    if value < min {
        return Err(SdkError::validation(format!(
            "{} must be greater than or equal to {}",
            field, min
        )));
    }
    Ok(())
}

/// Enforces a maximum length in characters.
pub(crate) fn max_chars(field: &str, value: &str, max: usize) -> Result<(), SdkError> {
    if value.chars().count() > max {
        return Err(SdkError::validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

/// Parses a `YYYY-MM-DD HH:MM:SS` value.
pub(crate) fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).ok()
}

/// Parses a `YYYY-MM-DD` value.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Checks that every entry is an absolute http(s) URL with a host.
pub(crate) fn http_urls(field: &str, values: &[String]) -> Result<(), SdkError> {
    for value in values {
        let valid = url::Url::parse(value)
            .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
            .unwrap_or(false);
        if !valid {
            return Err(SdkError::validation(format!(
                "{} contains an invalid URL: {}",
                field, value
            )));
        }
    }
    Ok(())
}

/// Unwraps a loose value that must be a list, naming `field` on failure.
///
/// The list may be empty; callers decide whether that is acceptable.
pub(crate) fn expect_list(field: &str, value: Value) -> Result<Vec<Value>, SdkError> {
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(SdkError::validation(format!("{} must be a list", field))),
    }
}

/// Like [`expect_list`] but also rejects an empty list.
pub(crate) fn expect_non_empty_list(field: &str, value: Value) -> Result<Vec<Value>, SdkError> {
    let items = expect_list(field, value)?;
    non_empty(field, &items)?;
    Ok(items)
}

/// Deserializes a loose value into `T`.
pub(crate) fn deserialize<T: DeserializeOwned>(value: Value) -> Result<T, SdkError> {
    serde_json::from_value(value).map_err(SdkError::from)
}
