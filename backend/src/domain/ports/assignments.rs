//! Driving ports for volunteer assignment use-cases.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Assignment, AssignmentStatus, Error, UserId};

/// Payload for assigning a volunteer to a disaster.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAssignment {
    /// Volunteer profile being deployed.
    pub volunteer_id: Uuid,
    /// Disaster the volunteer is deployed to.
    pub disaster_id: Uuid,
    /// Role on the ground, e.g. "logistics".
    pub role: Option<String>,
}

/// Domain use-case port for assignment mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssignmentsCommand: Send + Sync {
    /// Deploy a volunteer to a disaster.
    ///
    /// Assigning the same volunteer to the same disaster twice is a
    /// conflict, and the volunteer's availability flips to `Assigned`.
    async fn assign(
        &self,
        caller: &UserId,
        assignment: NewAssignment,
    ) -> Result<Assignment, Error>;

    /// Move an assignment through its lifecycle, restoring the volunteer's
    /// availability when it completes or is cancelled.
    async fn update_status(
        &self,
        caller: &UserId,
        id: Uuid,
        status: AssignmentStatus,
    ) -> Result<Assignment, Error>;

    /// Remove an assignment outright. Administrators only.
    async fn withdraw(&self, caller: &UserId, id: Uuid) -> Result<(), Error>;
}

/// Domain use-case port for assignment reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssignmentsQuery: Send + Sync {
    /// Fetch one assignment.
    async fn get(&self, caller: &UserId, id: Uuid) -> Result<Assignment, Error>;

    /// List every assignment on record, newest first.
    async fn list(&self, caller: &UserId) -> Result<Vec<Assignment>, Error>;

    /// List the caller's own assignments, newest first.
    ///
    /// Fails with `not_found` when the caller has no volunteer profile.
    async fn list_mine(&self, caller: &UserId) -> Result<Vec<Assignment>, Error>;
}
