//! Capability derivation for role-based authorisation.
//!
//! `Permissions` is the flat capability set entity services gate on, and
//! `PermissionEngine` is the only place the role-to-capability mapping
//! lives. Handlers and services never test role names directly.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{PermissionsQuery, UserDirectory, UserDirectoryError};
use crate::domain::{Error, Role, RoleSet, UserId};

/// Flat capability set for one subject against at most one record.
///
/// The default value is all-false and doubles as the capability set of an
/// unknown subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Permissions {
    /// Read disasters.
    pub view_disasters: bool,
    /// Report new disasters.
    pub create_disasters: bool,
    /// Edit disasters the subject reported.
    pub edit_own_disasters: bool,
    /// Edit any disaster.
    pub edit_all_disasters: bool,
    /// Delete disasters.
    pub delete_disasters: bool,
    /// Mark disasters resolved.
    pub resolve_disasters: bool,
    /// Read volunteer profiles.
    pub view_volunteers: bool,
    /// Register a volunteer profile for the subject.
    pub register_as_volunteer: bool,
    /// Edit the subject's own volunteer profile.
    pub edit_own_volunteer: bool,
    /// Edit any volunteer profile.
    pub edit_all_volunteers: bool,
    /// Contact volunteers about deployments.
    pub contact_volunteers: bool,
    /// Read donations.
    pub view_donations: bool,
    /// Pledge donations.
    pub create_donations: bool,
    /// Progress donation status and read other donors' pledges.
    pub manage_donations: bool,
    /// Read missions.
    pub view_missions: bool,
    /// Create missions.
    pub create_missions: bool,
    /// Assign volunteers to disasters.
    pub assign_missions: bool,
    /// Edit missions and progress their status.
    pub manage_missions: bool,
    /// Administer accounts and role grants.
    pub manage_users: bool,
    /// Administer resource categories, resources and requests.
    pub manage_system: bool,
    /// Read aggregate reports.
    pub view_reports: bool,
}

impl Permissions {
    /// Derive the capability set for a resolved subject.
    ///
    /// `owner` states whether the subject owns the record under
    /// consideration. Baseline capabilities (viewing, reporting disasters,
    /// registering, pledging) hold for every resolved subject regardless of
    /// role.
    #[must_use]
    pub fn for_roles(roles: &RoleSet, owner: bool) -> Self {
        let admin = roles.contains(&Role::Admin);
        let coordinating = admin || roles.contains(&Role::Coordinator);
        Self {
            view_disasters: true,
            create_disasters: true,
            edit_own_disasters: owner,
            edit_all_disasters: coordinating,
            delete_disasters: admin,
            resolve_disasters: coordinating || owner,
            view_volunteers: true,
            register_as_volunteer: true,
            edit_own_volunteer: owner,
            edit_all_volunteers: admin,
            contact_volunteers: coordinating,
            view_donations: true,
            create_donations: true,
            manage_donations: coordinating,
            view_missions: true,
            create_missions: coordinating,
            assign_missions: coordinating,
            manage_missions: coordinating,
            manage_users: admin,
            manage_system: admin,
            view_reports: coordinating,
        }
    }

    /// Whether the subject resolved to a known account.
    ///
    /// Every known account holds the baseline view capabilities, so any of
    /// them serves as the signal; an unresolved subject holds none.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.view_disasters
    }
}

/// Turn a capability flag into an authorisation decision.
pub(crate) fn authorize(allowed: bool, action: &'static str) -> Result<(), Error> {
    if allowed {
        Ok(())
    } else {
        Err(Error::forbidden(format!("not permitted to {action}")))
    }
}

/// Capability resolver backed by the user directory.
#[derive(Clone)]
pub struct PermissionEngine<D> {
    directory: Arc<D>,
}

impl<D> PermissionEngine<D> {
    /// Create an engine over the given directory.
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl<D> PermissionsQuery for PermissionEngine<D>
where
    D: UserDirectory,
{
    async fn permissions_for(
        &self,
        subject: &UserId,
        resource_owner: Option<UserId>,
    ) -> Result<Permissions, Error> {
        let roles = match self.directory.roles_for(subject).await {
            Ok(Some(roles)) => roles,
            // Unknown subjects get the all-false set; only directory
            // failures are errors.
            Ok(None) => return Ok(Permissions::default()),
            Err(UserDirectoryError::Connection { message }) => {
                return Err(Error::service_unavailable(format!(
                    "user directory unavailable: {message}"
                )));
            }
            Err(error) => {
                return Err(Error::internal(format!("role lookup failed: {error}")));
            }
        };
        let owner = resource_owner.as_ref() == Some(subject);
        Ok(Permissions::for_roles(&roles, owner))
    }
}

#[cfg(test)]
#[path = "permissions_tests.rs"]
mod tests;
