//! Volunteer profile domain service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::domain::permissions::authorize;
use crate::domain::ports::{
    PermissionsQuery, VolunteerChanges, VolunteerRepository, VolunteerRepositoryError,
    VolunteerSignup, VolunteersCommand, VolunteersQuery,
};
use crate::domain::validation::optional_text;
use crate::domain::{
    ADDRESS_MAX, EMERGENCY_CONTACT_MAX, Error, SKILLS_MAX, UserId, Volunteer,
    VolunteerRegistration,
};

fn version_conflict(expected: u32, actual: u32) -> Error {
    Error::conflict("volunteer profile was modified by someone else").with_details(json!({
        "expectedVersion": expected,
        "actualVersion": actual,
        "code": "version_mismatch",
    }))
}

fn map_repository_error(error: VolunteerRepositoryError) -> Error {
    match error {
        VolunteerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("volunteer repository unavailable: {message}"))
        }
        VolunteerRepositoryError::Query { message } => {
            Error::internal(format!("volunteer repository error: {message}"))
        }
        VolunteerRepositoryError::Missing => Error::not_found("volunteer profile not found"),
        VolunteerRepositoryError::DuplicateProfile => {
            Error::conflict("volunteer profile already exists for this account")
        }
        VolunteerRepositoryError::VersionConflict { expected, actual } => {
            version_conflict(expected, actual)
        }
    }
}

/// Volunteer service implementing the volunteer driving ports.
#[derive(Clone)]
pub struct VolunteerService<P, R> {
    permissions: Arc<P>,
    repository: Arc<R>,
}

impl<P, R> VolunteerService<P, R> {
    /// Create a service over the permission engine and repository.
    pub fn new(permissions: Arc<P>, repository: Arc<R>) -> Self {
        Self {
            permissions,
            repository,
        }
    }
}

#[async_trait]
impl<P, R> VolunteersCommand for VolunteerService<P, R>
where
    P: PermissionsQuery,
    R: VolunteerRepository,
{
    async fn register(
        &self,
        caller: &UserId,
        signup: VolunteerSignup,
    ) -> Result<VolunteerRegistration, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.register_as_volunteer, "register as a volunteer")?;

        let skills = optional_text("skills", signup.skills, SKILLS_MAX)?;
        let address = optional_text("address", signup.address, ADDRESS_MAX)?;
        let emergency_contact = optional_text(
            "emergencyContact",
            signup.emergency_contact,
            EMERGENCY_CONTACT_MAX,
        )?;

        if let Some(existing) = self
            .repository
            .find_by_user(caller)
            .await
            .map_err(map_repository_error)?
        {
            return Ok(VolunteerRegistration::AlreadyRegistered(existing));
        }

        let volunteer = Volunteer {
            id: Uuid::new_v4(),
            user_id: caller.clone(),
            skills,
            availability: signup.availability,
            address,
            emergency_contact,
            registered_at: Utc::now(),
            version: 1,
        };
        match self.repository.insert(&volunteer).await {
            Ok(()) => Ok(VolunteerRegistration::Created(volunteer)),
            // A racing registration won; surface the profile it created.
            Err(VolunteerRepositoryError::DuplicateProfile) => self
                .repository
                .find_by_user(caller)
                .await
                .map_err(map_repository_error)?
                .map(VolunteerRegistration::AlreadyRegistered)
                .ok_or_else(|| {
                    Error::internal("volunteer profile vanished after a duplicate insert")
                }),
            Err(error) => Err(map_repository_error(error)),
        }
    }

    async fn update(
        &self,
        caller: &UserId,
        id: Uuid,
        changes: VolunteerChanges,
    ) -> Result<Volunteer, Error> {
        let current = self
            .repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("volunteer profile not found"))?;
        let permissions = self
            .permissions
            .permissions_for(caller, Some(current.user_id.clone()))
            .await?;
        authorize(
            permissions.edit_all_volunteers || permissions.edit_own_volunteer,
            "edit this volunteer profile",
        )?;

        let skills = optional_text("skills", changes.skills, SKILLS_MAX)?;
        let address = optional_text("address", changes.address, ADDRESS_MAX)?;
        let emergency_contact = optional_text(
            "emergencyContact",
            changes.emergency_contact,
            EMERGENCY_CONTACT_MAX,
        )?;
        if current.version != changes.expected_version {
            return Err(version_conflict(changes.expected_version, current.version));
        }

        let updated = Volunteer {
            skills,
            availability: changes.availability,
            address,
            emergency_contact,
            version: changes.expected_version + 1,
            ..current
        };
        self.repository
            .update(&updated, changes.expected_version)
            .await
            .map_err(map_repository_error)?;
        Ok(updated)
    }
}

#[async_trait]
impl<P, R> VolunteersQuery for VolunteerService<P, R>
where
    P: PermissionsQuery,
    R: VolunteerRepository,
{
    async fn get(&self, caller: &UserId, id: Uuid) -> Result<Volunteer, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.view_volunteers, "view volunteers")?;
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("volunteer profile not found"))
    }

    async fn my_profile(&self, caller: &UserId) -> Result<Option<Volunteer>, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.view_volunteers, "view volunteers")?;
        self.repository
            .find_by_user(caller)
            .await
            .map_err(map_repository_error)
    }

    async fn list(&self, caller: &UserId) -> Result<Vec<Volunteer>, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.view_volunteers, "view volunteers")?;
        self.repository.list().await.map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "volunteer_service_tests.rs"]
mod tests;
