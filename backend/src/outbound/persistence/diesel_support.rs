//! Shared error mapping and casts for the Diesel adapters.
//!
//! Every adapter maps [`PoolError`] and [`diesel::result::Error`] into its
//! own port error enum. Taking the constructors as closures keeps the mapping
//! in one place without coupling this module to any single port.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Which port constructor a statement failure goes through, with the stable
/// text the mapped error will carry.
enum FailureClass {
    Query(&'static str),
    Connection(&'static str),
}

fn classify(error: &DieselError) -> FailureClass {
    match error {
        DieselError::NotFound => FailureClass::Query("record not found"),
        DieselError::QueryBuilderError(_) => FailureClass::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            FailureClass::Connection("database connection error")
        }
        _ => FailureClass::Query("database error"),
    }
}

fn log_failure(error: &DieselError) {
    if let DieselError::DatabaseError(kind, info) = error {
        debug!(?kind, message = info.message(), "database statement failed");
    } else {
        debug!(error = %error, "database statement failed");
    }
}

/// Map a pool failure through the port's connection-error constructor.
pub(crate) fn map_checkout_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let (PoolError::Build { message } | PoolError::Checkout { message }) = error;
    connection(message)
}

/// Map common Diesel failures through query/connection constructors.
///
/// The raw database detail is logged here and dropped from the mapped error:
/// port errors carry stable text while the log line carries the diagnosis.
pub(crate) fn map_statement_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    log_failure(&error);
    match classify(&error) {
        FailureClass::Query(message) => query(message),
        FailureClass::Connection(message) => connection(message),
    }
}

/// Whether the error is a unique-constraint violation.
///
/// Adapters with uniqueness semantics (volunteer per account, category
/// names, one active assignment per pair) translate this into their typed
/// duplicate variant before falling back to the generic mapping.
pub(crate) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Parse a stored enum string through the port's query-error constructor.
///
/// Canonical strings are written by this crate, so a parse failure means the
/// row was edited out of band; it surfaces as a query error naming the value.
pub(crate) fn parse_stored<T, E, Q>(raw: &str, query: Q) -> Result<T, E>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    Q: FnOnce(String) -> E,
{
    raw.parse().map_err(|err: T::Err| query(err.to_string()))
}

/// Cast a stored version counter to the domain's u32.
#[expect(
    clippy::cast_sign_loss,
    reason = "version columns are non-negative by schema constraint"
)]
pub(crate) fn version_from_db(version: i32) -> u32 {
    version as u32
}

/// Cast a domain version counter to the stored i32.
#[expect(
    clippy::cast_possible_wrap,
    reason = "version counters stay far below i32::MAX"
)]
pub(crate) fn version_to_db(version: u32) -> i32 {
    version as i32
}
