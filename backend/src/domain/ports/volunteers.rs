//! Driving ports for volunteer profile use-cases.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{AvailabilityStatus, Error, UserId, Volunteer, VolunteerRegistration};

/// Payload for registering as a volunteer.
///
/// Registration is keyed on the caller's account; there is nothing to
/// identify here beyond the profile details.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolunteerSignup {
    /// Free-form skills summary.
    pub skills: Option<String>,
    /// Starting availability.
    pub availability: AvailabilityStatus,
    /// Contact address.
    pub address: Option<String>,
    /// Emergency contact line.
    pub emergency_contact: Option<String>,
}

/// Full replacement payload for updating a volunteer profile.
#[derive(Debug, Clone, PartialEq)]
pub struct VolunteerChanges {
    /// Free-form skills summary.
    pub skills: Option<String>,
    /// Current availability.
    pub availability: AvailabilityStatus,
    /// Contact address.
    pub address: Option<String>,
    /// Emergency contact line.
    pub emergency_contact: Option<String>,
    /// Version the caller last read.
    pub expected_version: u32,
}

/// Domain use-case port for volunteer profile mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VolunteersCommand: Send + Sync {
    /// Register the caller as a volunteer, or return the existing profile.
    async fn register(
        &self,
        caller: &UserId,
        signup: VolunteerSignup,
    ) -> Result<VolunteerRegistration, Error>;

    /// Apply a full update to a profile.
    ///
    /// Volunteers may edit their own profile; editing someone else's needs
    /// the `edit_all_volunteers` capability.
    async fn update(
        &self,
        caller: &UserId,
        id: Uuid,
        changes: VolunteerChanges,
    ) -> Result<Volunteer, Error>;
}

/// Domain use-case port for volunteer profile reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VolunteersQuery: Send + Sync {
    /// Fetch one profile by id.
    async fn get(&self, caller: &UserId, id: Uuid) -> Result<Volunteer, Error>;

    /// Fetch the caller's own profile, or `None` when they have not
    /// registered.
    async fn my_profile(&self, caller: &UserId) -> Result<Option<Volunteer>, Error>;

    /// List all profiles, newest registration first.
    async fn list(&self, caller: &UserId) -> Result<Vec<Volunteer>, Error>;
}
