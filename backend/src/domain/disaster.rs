//! Disaster data model.
//!
//! A disaster is the root record the rest of the system hangs off: missions,
//! volunteer assignments, and resource requests all reference one.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::enums::status_enum;
use crate::domain::user::UserId;

/// Maximum accepted length for a disaster name.
pub const DISASTER_NAME_MAX: usize = 150;
/// Maximum accepted length for a disaster location.
pub const DISASTER_LOCATION_MAX: usize = 200;
/// Maximum accepted length for a disaster description.
pub const DISASTER_DESCRIPTION_MAX: usize = 2000;

status_enum! {
    /// Category of hazard a disaster belongs to.
    DisasterKind, ParseDisasterKindError, "disaster kind" {
        /// Riverine or flash flooding.
        Flood => "Flood",
        /// Wildfire or structural fire.
        Fire => "Fire",
        /// Seismic event.
        Earthquake => "Earthquake",
        /// Hurricane, cyclone, or severe storm.
        Storm => "Storm",
        /// Prolonged water shortage.
        Drought => "Drought",
        /// Disease outbreak.
        Epidemic => "Epidemic",
        /// Anything that does not fit the categories above.
        Other => "Other",
    }
}

status_enum! {
    /// Operational severity of a disaster.
    SeverityLevel, ParseSeverityLevelError, "severity level" {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Critical => "Critical",
    }
}

status_enum! {
    /// Lifecycle state of a disaster.
    DisasterStatus, ParseDisasterStatusError, "disaster status" {
        /// Response is ongoing.
        Active => "Active",
        /// Response has been wound down.
        Resolved => "Resolved",
    }
}

/// A reported disaster.
///
/// ## Invariants
/// - `name` and `location` are non-blank and bounded.
/// - `version` increments on every successful update and backs optimistic
///   concurrency checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Disaster {
    /// Stable identifier.
    pub id: Uuid,
    /// Short human-readable name, e.g. "River Aire flooding".
    pub name: String,
    /// Affected area description.
    pub location: String,
    /// Free-form situation notes.
    pub description: Option<String>,
    /// Hazard category.
    pub kind: DisasterKind,
    /// Operational severity.
    pub severity: SeverityLevel,
    /// Lifecycle state.
    pub status: DisasterStatus,
    /// When the disaster began.
    pub started_at: DateTime<Utc>,
    /// Estimated number of people affected, when known.
    pub estimated_affected: Option<i32>,
    /// Account that reported the disaster.
    pub reported_by: UserId,
    /// Optimistic concurrency counter.
    pub version: u32,
}
