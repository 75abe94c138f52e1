//! Port for volunteer profile persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{UserId, Volunteer};

use super::define_port_error;

define_port_error! {
    /// Errors raised by volunteer repository adapters.
    pub enum VolunteerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "volunteer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "volunteer repository query failed: {message}",
        /// The profile does not exist.
        Missing => "volunteer profile not found",
        /// The account already has a profile.
        DuplicateProfile => "volunteer profile already exists for this account",
        /// Optimistic concurrency check failed.
        VersionConflict { expected: u32, actual: u32 } =>
            "version conflict: expected {expected}, found {actual}",
    }
}

/// Port for volunteer profile storage and retrieval.
///
/// Registration is get-or-create at the service level: the service looks up
/// by account first and treats [`VolunteerRepositoryError::DuplicateProfile`]
/// from a racing insert as "already registered".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VolunteerRepository: Send + Sync {
    /// Persist a new profile.
    ///
    /// Fails with [`VolunteerRepositoryError::DuplicateProfile`] when the
    /// account already has one.
    async fn insert(&self, volunteer: &Volunteer) -> Result<(), VolunteerRepositoryError>;

    /// Fetch a profile by its id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Volunteer>, VolunteerRepositoryError>;

    /// Fetch the profile owned by an account.
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Volunteer>, VolunteerRepositoryError>;

    /// List all profiles, newest registration first.
    async fn list(&self) -> Result<Vec<Volunteer>, VolunteerRepositoryError>;

    /// Persist changes to an existing profile under an optimistic check.
    async fn update(
        &self,
        volunteer: &Volunteer,
        expected_version: u32,
    ) -> Result<(), VolunteerRepositoryError>;
}
