//! Port for mission persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Mission, MissionStatus};

use super::define_port_error;

define_port_error! {
    /// Errors raised by mission repository adapters.
    pub enum MissionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "mission repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "mission repository query failed: {message}",
        /// The mission does not exist.
        Missing => "mission not found",
        /// The referenced disaster does not exist.
        MissingDisaster => "mission disaster not found",
        /// The referenced volunteer profile does not exist.
        MissingVolunteer => "assigned volunteer not found",
        /// Optimistic concurrency check failed.
        VersionConflict { expected: u32, actual: u32 } =>
            "version conflict: expected {expected}, found {actual}",
    }
}

/// Port for mission storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MissionRepository: Send + Sync {
    /// Persist a new mission.
    async fn insert(&self, mission: &Mission) -> Result<(), MissionRepositoryError>;

    /// Fetch a mission by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Mission>, MissionRepositoryError>;

    /// List all missions, newest first.
    async fn list(&self) -> Result<Vec<Mission>, MissionRepositoryError>;

    /// List missions assigned to a volunteer, newest first.
    async fn list_for_volunteer(
        &self,
        volunteer_id: Uuid,
    ) -> Result<Vec<Mission>, MissionRepositoryError>;

    /// Persist changes to an existing mission under an optimistic check.
    async fn update(
        &self,
        mission: &Mission,
        expected_version: u32,
    ) -> Result<(), MissionRepositoryError>;

    /// Update a mission's lifecycle status and return the stored row.
    ///
    /// Status transitions are deliberate last-write-wins: they do not bump
    /// or check the version counter.
    async fn set_status(
        &self,
        id: Uuid,
        status: MissionStatus,
    ) -> Result<Mission, MissionRepositoryError>;
}
