//! Mission domain service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::domain::permissions::authorize;
use crate::domain::ports::{
    MissionChanges, MissionRepository, MissionRepositoryError, MissionsCommand, MissionsQuery,
    NewMission, PermissionsQuery, VolunteerRepository, VolunteerRepositoryError,
};
use crate::domain::validation::{non_blank, optional_text};
use crate::domain::{
    Error, MISSION_DESCRIPTION_MAX, MISSION_TITLE_MAX, Mission, MissionStatus, UserId,
};

fn version_conflict(expected: u32, actual: u32) -> Error {
    Error::conflict("mission was modified by someone else").with_details(json!({
        "expectedVersion": expected,
        "actualVersion": actual,
        "code": "version_mismatch",
    }))
}

fn map_repository_error(error: MissionRepositoryError) -> Error {
    match error {
        MissionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("mission repository unavailable: {message}"))
        }
        MissionRepositoryError::Query { message } => {
            Error::internal(format!("mission repository error: {message}"))
        }
        MissionRepositoryError::Missing => Error::not_found("mission not found"),
        MissionRepositoryError::MissingDisaster => Error::not_found("mission disaster not found"),
        MissionRepositoryError::MissingVolunteer => {
            Error::not_found("assigned volunteer not found")
        }
        MissionRepositoryError::VersionConflict { expected, actual } => {
            version_conflict(expected, actual)
        }
    }
}

fn map_volunteer_error(error: VolunteerRepositoryError) -> Error {
    match error {
        VolunteerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("volunteer repository unavailable: {message}"))
        }
        other => Error::internal(format!("volunteer lookup failed: {other}")),
    }
}

/// Mission service implementing the mission driving ports.
#[derive(Clone)]
pub struct MissionService<P, R, V> {
    permissions: Arc<P>,
    repository: Arc<R>,
    volunteers: Arc<V>,
}

impl<P, R, V> MissionService<P, R, V> {
    /// Create a service over the permission engine and repositories.
    pub fn new(permissions: Arc<P>, repository: Arc<R>, volunteers: Arc<V>) -> Self {
        Self {
            permissions,
            repository,
            volunteers,
        }
    }
}

#[async_trait]
impl<P, R, V> MissionsCommand for MissionService<P, R, V>
where
    P: PermissionsQuery,
    R: MissionRepository,
    V: VolunteerRepository,
{
    async fn create(&self, caller: &UserId, mission: NewMission) -> Result<Mission, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.create_missions, "create missions")?;

        let title = non_blank("title", &mission.title, MISSION_TITLE_MAX)?;
        let description =
            optional_text("description", mission.description, MISSION_DESCRIPTION_MAX)?;

        let mission = Mission {
            id: Uuid::new_v4(),
            disaster_id: mission.disaster_id,
            title,
            description,
            assigned_to: mission.assigned_to,
            status: MissionStatus::Open,
            priority: mission.priority,
            due_at: mission.due_at,
            created_at: Utc::now(),
            created_by: caller.clone(),
            version: 1,
        };
        self.repository
            .insert(&mission)
            .await
            .map_err(map_repository_error)?;
        Ok(mission)
    }

    async fn update(
        &self,
        caller: &UserId,
        id: Uuid,
        changes: MissionChanges,
    ) -> Result<Mission, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.manage_missions, "manage missions")?;

        let current = self
            .repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("mission not found"))?;

        let title = non_blank("title", &changes.title, MISSION_TITLE_MAX)?;
        let description =
            optional_text("description", changes.description, MISSION_DESCRIPTION_MAX)?;
        if current.version != changes.expected_version {
            return Err(version_conflict(changes.expected_version, current.version));
        }

        let updated = Mission {
            title,
            description,
            assigned_to: changes.assigned_to,
            status: changes.status,
            priority: changes.priority,
            due_at: changes.due_at,
            version: changes.expected_version + 1,
            ..current
        };
        self.repository
            .update(&updated, changes.expected_version)
            .await
            .map_err(map_repository_error)?;
        Ok(updated)
    }

    async fn update_status(
        &self,
        caller: &UserId,
        id: Uuid,
        status: MissionStatus,
    ) -> Result<Mission, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.manage_missions, "manage missions")?;

        self.repository
            .set_status(id, status)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<P, R, V> MissionsQuery for MissionService<P, R, V>
where
    P: PermissionsQuery,
    R: MissionRepository,
    V: VolunteerRepository,
{
    async fn get(&self, caller: &UserId, id: Uuid) -> Result<Mission, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.view_missions, "view missions")?;
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("mission not found"))
    }

    async fn list(&self, caller: &UserId) -> Result<Vec<Mission>, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.view_missions, "view missions")?;
        self.repository.list().await.map_err(map_repository_error)
    }

    async fn list_mine(&self, caller: &UserId) -> Result<Vec<Mission>, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.view_missions, "view missions")?;
        let Some(profile) = self
            .volunteers
            .find_by_user(caller)
            .await
            .map_err(map_volunteer_error)?
        else {
            // Unregistered callers cannot hold missions yet.
            return Ok(Vec::new());
        };
        self.repository
            .list_for_volunteer(profile.id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "mission_service_tests.rs"]
mod tests;
