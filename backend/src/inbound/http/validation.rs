//! Wire-level field parsing for the HTTP handlers.
//!
//! Handlers parse identifiers, timestamps, and status vocabularies here so
//! every malformed field produces the same `invalid_request` shape: a
//! message naming the field and a details object carrying the
//! machine-readable code and the rejected value.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

/// Machine-readable codes attached to rejected fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldCode {
    InvalidUuid,
    InvalidTimestamp,
    InvalidValue,
}

impl FieldCode {
    fn as_str(self) -> &'static str {
        match self {
            FieldCode::InvalidUuid => "invalid_uuid",
            FieldCode::InvalidTimestamp => "invalid_timestamp",
            FieldCode::InvalidValue => "invalid_value",
        }
    }
}

/// A request field name, fixed at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Collects field context before shaping the final error.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_value(self, code: FieldCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }

    fn with_expected(
        self,
        code: FieldCode,
        value: impl Into<String>,
        expected: &'static [&'static str],
    ) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
            "expected": expected,
        }))
    }

    fn with_index(
        self,
        code: FieldCode,
        index: usize,
        value: impl Into<String>,
        expected: &'static [&'static str],
    ) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "index": index,
            "value": value.into(),
            "code": code.as_str(),
            "expected": expected,
        }))
    }
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} is not a valid UUID"))
        .with_value(FieldCode::InvalidUuid, value)
}

pub(crate) fn parse_uuid(value: String, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(&value).map_err(|_| invalid_uuid_error(field, &value))
}

pub(crate) fn parse_optional_uuid(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<Uuid>, Error> {
    value.map(|raw| parse_uuid(raw, field)).transpose()
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} is not an RFC 3339 timestamp"))
        .with_value(FieldCode::InvalidTimestamp, value)
}

pub(crate) fn parse_rfc3339_timestamp(
    value: String,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(&value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| invalid_timestamp_error(field, &value))
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| parse_rfc3339_timestamp(raw, field))
        .transpose()
}

/// Parse a closed status vocabulary, reporting the accepted values on
/// failure.
pub(crate) fn parse_enum<T: FromStr>(
    value: String,
    field: FieldName,
    allowed: &'static [&'static str],
) -> Result<T, Error> {
    value.parse().map_err(|_| {
        let field = field.as_str();
        ValidationError::new(field, format!("{field} is not a recognised value"))
            .with_expected(FieldCode::InvalidValue, value, allowed)
    })
}

/// Parse a list of closed-vocabulary values, reporting the first offending
/// index on failure.
pub(crate) fn parse_enum_list<T: FromStr>(
    values: Vec<String>,
    field: FieldName,
    allowed: &'static [&'static str],
) -> Result<Vec<T>, Error> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            value.parse().map_err(|_| {
                let field = field.as_str();
                ValidationError::new(field, format!("{field} contains an unrecognised value"))
                    .with_index(FieldCode::InvalidValue, index, value, allowed)
            })
        })
        .collect()
}
