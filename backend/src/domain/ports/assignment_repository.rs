//! Port for assignment persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Assignment, AssignmentStatus};

use super::define_port_error;

define_port_error! {
    /// Errors raised by assignment repository adapters.
    pub enum AssignmentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "assignment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "assignment repository query failed: {message}",
        /// The assignment does not exist.
        Missing => "assignment not found",
        /// The volunteer/disaster pair is already assigned.
        DuplicateAssignment => "volunteer is already assigned to this disaster",
        /// The volunteer profile does not exist.
        MissingVolunteer => "assigned volunteer not found",
        /// The disaster does not exist.
        MissingDisaster => "assigned disaster not found",
    }
}

/// Port for assignment storage.
///
/// Mutations keep the volunteer's availability in step with the assignment
/// inside one transaction: creating an active assignment marks the volunteer
/// `Assigned`, while completing, cancelling, or deleting it restores
/// `Available`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Persist a new assignment and mark the volunteer as assigned.
    ///
    /// Fails with [`AssignmentRepositoryError::DuplicateAssignment`] when
    /// the volunteer/disaster pair already exists.
    async fn create(&self, assignment: &Assignment) -> Result<(), AssignmentRepositoryError>;

    /// Fetch an assignment by id.
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Assignment>, AssignmentRepositoryError>;

    /// List all assignments, newest first.
    async fn list(&self) -> Result<Vec<Assignment>, AssignmentRepositoryError>;

    /// List a volunteer's assignments, newest first.
    async fn list_for_volunteer(
        &self,
        volunteer_id: Uuid,
    ) -> Result<Vec<Assignment>, AssignmentRepositoryError>;

    /// Update an assignment's status, flipping availability as needed, and
    /// return the stored row.
    async fn set_status(
        &self,
        id: Uuid,
        status: AssignmentStatus,
    ) -> Result<Assignment, AssignmentRepositoryError>;

    /// Delete an assignment, restoring availability when it was active.
    async fn delete(&self, id: Uuid) -> Result<(), AssignmentRepositoryError>;
}
