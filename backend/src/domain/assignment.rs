//! Volunteer assignment data model.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::enums::status_enum;
use crate::domain::user::UserId;

/// Maximum accepted length for an assignment role label.
pub const ASSIGNMENT_ROLE_MAX: usize = 150;

status_enum! {
    /// Lifecycle state of an assignment.
    AssignmentStatus, ParseAssignmentStatusError, "assignment status" {
        /// The volunteer is actively deployed.
        Assigned => "Assigned",
        /// The work finished normally.
        Completed => "Completed",
        /// The deployment was called off.
        Cancelled => "Cancelled",
    }
}

/// A volunteer deployed to a disaster.
///
/// ## Invariants
/// - At most one active assignment exists per volunteer/disaster pair;
///   completed or cancelled deployments do not block a new one.
/// - While `status` is [`AssignmentStatus::Assigned`] the volunteer's
///   availability reads [`crate::domain::AvailabilityStatus::Assigned`];
///   completing or cancelling restores availability.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Stable identifier.
    pub id: Uuid,
    /// Volunteer profile being deployed.
    pub volunteer_id: Uuid,
    /// Disaster the volunteer is deployed to.
    pub disaster_id: Uuid,
    /// When the assignment was made.
    pub assigned_at: DateTime<Utc>,
    /// Role on the ground, e.g. "logistics".
    pub role: Option<String>,
    /// Lifecycle state.
    pub status: AssignmentStatus,
    /// Coordinator or admin who made the assignment.
    pub assigned_by: UserId,
}
