//! Volunteer profile data model.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::enums::status_enum;
use crate::domain::user::UserId;

/// Maximum accepted length for the skills summary.
pub const SKILLS_MAX: usize = 500;
/// Maximum accepted length for the contact address.
pub const ADDRESS_MAX: usize = 300;
/// Maximum accepted length for the emergency contact line.
pub const EMERGENCY_CONTACT_MAX: usize = 150;

status_enum! {
    /// Whether a volunteer can currently take on an assignment.
    AvailabilityStatus, ParseAvailabilityStatusError, "availability status" {
        /// Free to be assigned.
        Available => "Available",
        /// Temporarily occupied outside the assignment workflow.
        Busy => "Busy",
        /// Stood down at the volunteer's request.
        Unavailable => "Unavailable",
        /// Holding an active assignment.
        Assigned => "Assigned",
    }
}

impl Default for AvailabilityStatus {
    fn default() -> Self {
        Self::Available
    }
}

/// A volunteer profile attached to a directory account.
///
/// ## Invariants
/// - At most one profile exists per account; registration is get-or-create.
/// - `availability` flips to [`AvailabilityStatus::Assigned`] while an
///   active assignment exists and back to [`AvailabilityStatus::Available`]
///   when it completes or is cancelled.
#[derive(Debug, Clone, PartialEq)]
pub struct Volunteer {
    /// Stable profile identifier, distinct from the account id.
    pub id: Uuid,
    /// Owning directory account.
    pub user_id: UserId,
    /// Free-form skills summary, e.g. "first aid, HGV licence".
    pub skills: Option<String>,
    /// Current availability.
    pub availability: AvailabilityStatus,
    /// Contact address.
    pub address: Option<String>,
    /// Emergency contact line.
    pub emergency_contact: Option<String>,
    /// When the profile was registered.
    pub registered_at: DateTime<Utc>,
    /// Optimistic concurrency counter.
    pub version: u32,
}

/// Outcome of a registration request.
///
/// Registration is idempotent: a second request from the same account
/// returns the existing profile instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub enum VolunteerRegistration {
    /// A new profile was created.
    Created(Volunteer),
    /// The account already had a profile; it is returned unchanged.
    AlreadyRegistered(Volunteer),
}

impl VolunteerRegistration {
    /// The profile regardless of whether it was just created.
    #[must_use]
    pub fn profile(&self) -> &Volunteer {
        match self {
            Self::Created(profile) | Self::AlreadyRegistered(profile) => profile,
        }
    }

    /// Whether this registration created the profile.
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}
