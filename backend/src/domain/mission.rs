//! Mission data model.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::enums::status_enum;
use crate::domain::user::UserId;

/// Maximum accepted length for a mission title.
pub const MISSION_TITLE_MAX: usize = 200;
/// Maximum accepted length for a mission description.
pub const MISSION_DESCRIPTION_MAX: usize = 2000;

status_enum! {
    /// Lifecycle state of a mission.
    MissionStatus, ParseMissionStatusError, "mission status" {
        /// Created but not yet started.
        Open => "Open",
        /// Work is underway.
        InProgress => "InProgress",
        /// The mission finished normally.
        Completed => "Completed",
    }
}

status_enum! {
    /// Scheduling priority of a mission.
    MissionPriority, ParseMissionPriorityError, "mission priority" {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Critical => "Critical",
    }
}

/// A discrete piece of relief work within a disaster.
///
/// ## Invariants
/// - `title` is non-blank and bounded.
/// - `assigned_to`, when set, references an existing volunteer profile.
/// - `version` increments on every successful update.
#[derive(Debug, Clone, PartialEq)]
pub struct Mission {
    /// Stable identifier.
    pub id: Uuid,
    /// Disaster the mission belongs to.
    pub disaster_id: Uuid,
    /// Short description of the work, e.g. "Sandbag the riverbank".
    pub title: String,
    /// Detailed briefing.
    pub description: Option<String>,
    /// Volunteer profile tasked with the mission, when one is.
    pub assigned_to: Option<Uuid>,
    /// Lifecycle state.
    pub status: MissionStatus,
    /// Scheduling priority.
    pub priority: MissionPriority,
    /// Deadline for completion, when one exists.
    pub due_at: Option<DateTime<Utc>>,
    /// When the mission was created.
    pub created_at: DateTime<Utc>,
    /// Coordinator or admin who created the mission.
    pub created_by: UserId,
    /// Optimistic concurrency counter.
    pub version: u32,
}
