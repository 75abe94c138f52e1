//! OpenAPI schemas for the domain error surface.
//!
//! The domain crate never derives `ToSchema`; these wrappers register the
//! wire shape of [`crate::domain::Error`] and [`crate::domain::ErrorCode`]
//! with utoipa under the domain type names, keeping framework concerns in
//! the inbound layer.

use utoipa::ToSchema;

/// Mirror of [`crate::domain::ErrorCode`] for the generated document.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// Malformed input or a failed validation rule.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Missing or failed authentication.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Signed in, but not permitted to do this.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// No such record.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request lost against the current state of the record.
    #[schema(rename = "conflict")]
    Conflict,
    /// A downstream dependency did not answer.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// Unexpected server-side failure.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// The envelope every non-2xx response carries, registered under the domain
/// error's name.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Serialised only through the generated OpenAPI document"
)]
pub struct ErrorSchema {
    /// Machine-readable code, stable across releases.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable description of what went wrong.
    #[schema(example = "disaster not found")]
    message: String,
    /// Identifier correlating this response with server logs.
    #[schema(example = "8d3f2a6b-94c1-4e7d-b5a8-1f6e9c0d4b72")]
    trace_id: Option<String>,
    /// Structured context, for example the failing field.
    details: Option<serde_json::Value>,
}
