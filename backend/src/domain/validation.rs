//! Shared field validation helpers for domain services.
//!
//! Services validate request payloads before touching a repository so the
//! same rules apply regardless of which adapter drove the call. Failures
//! carry structured details naming the offending field and a stable code.

use serde_json::json;

use crate::domain::Error;

/// Validation error codes attached to invalid-request details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldErrorCode {
    MissingField,
    TooLong,
    NotPositive,
    Negative,
}

impl FieldErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::TooLong => "too_long",
            Self::NotPositive => "not_positive",
            Self::Negative => "negative",
        }
    }
}

fn field_error(field: &'static str, message: String, code: FieldErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

fn too_long_error(field: &'static str, max: usize) -> Error {
    Error::invalid_request(format!("{field} must be at most {max} characters")).with_details(
        json!({
            "field": field,
            "code": FieldErrorCode::TooLong.as_str(),
            "max": max,
        }),
    )
}

/// Require a non-blank, bounded text field and return it trimmed.
pub(crate) fn non_blank(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(field_error(
            field,
            format!("{field} must not be empty"),
            FieldErrorCode::MissingField,
        ));
    }
    if trimmed.chars().count() > max {
        return Err(too_long_error(field, max));
    }
    Ok(trimmed.to_owned())
}

/// Bound an optional text field, normalising blank input to `None`.
pub(crate) fn optional_text(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, Error> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > max {
        return Err(too_long_error(field, max));
    }
    Ok(Some(trimmed.to_owned()))
}

/// Require a strictly positive quantity.
pub(crate) fn positive_quantity(field: &'static str, value: i32) -> Result<i32, Error> {
    if value <= 0 {
        return Err(field_error(
            field,
            format!("{field} must be greater than zero"),
            FieldErrorCode::NotPositive,
        ));
    }
    Ok(value)
}

/// Require a zero-or-positive count.
pub(crate) fn non_negative(field: &'static str, value: i32) -> Result<i32, Error> {
    if value < 0 {
        return Err(field_error(
            field,
            format!("{field} must not be negative"),
            FieldErrorCode::Negative,
        ));
    }
    Ok(value)
}
