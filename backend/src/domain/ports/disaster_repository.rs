//! Port for disaster persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Disaster;

use super::define_port_error;

define_port_error! {
    /// Errors raised by disaster repository adapters.
    pub enum DisasterRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "disaster repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "disaster repository query failed: {message}",
        /// The disaster does not exist.
        Missing => "disaster not found",
        /// Optimistic concurrency check failed.
        VersionConflict { expected: u32, actual: u32 } =>
            "version conflict: expected {expected}, found {actual}",
        /// Dependent records block deletion.
        HasDependants { details: String } =>
            "disaster has dependent records: {details}",
    }
}

/// Port for disaster storage and retrieval.
///
/// # Version semantics
///
/// - New disasters start at version 1.
/// - [`DisasterRepository::update`] persists the entity only when the stored
///   version equals `expected_version`, and writes `disaster.version` (set by
///   the service to `expected_version + 1`) in the same statement.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DisasterRepository: Send + Sync {
    /// Persist a new disaster.
    async fn insert(&self, disaster: &Disaster) -> Result<(), DisasterRepositoryError>;

    /// Fetch a disaster by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Disaster>, DisasterRepositoryError>;

    /// List all disasters, newest first.
    async fn list(&self) -> Result<Vec<Disaster>, DisasterRepositoryError>;

    /// Persist changes to an existing disaster under an optimistic check.
    async fn update(
        &self,
        disaster: &Disaster,
        expected_version: u32,
    ) -> Result<(), DisasterRepositoryError>;

    /// Delete a disaster.
    ///
    /// Fails with [`DisasterRepositoryError::HasDependants`] while missions,
    /// assignments, or resource requests still reference it.
    async fn delete(&self, id: Uuid) -> Result<(), DisasterRepositoryError>;
}
