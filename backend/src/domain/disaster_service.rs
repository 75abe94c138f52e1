//! Disaster domain service.
//!
//! Implements the disaster driving ports: every operation resolves the
//! caller's capabilities first, validates input, and only then touches the
//! repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::domain::permissions::authorize;
use crate::domain::ports::{
    DisasterChanges, DisasterRepository, DisasterRepositoryError, DisastersCommand, DisastersQuery,
    NewDisaster, PermissionsQuery,
};
use crate::domain::validation::{non_blank, non_negative, optional_text};
use crate::domain::{
    DISASTER_DESCRIPTION_MAX, DISASTER_LOCATION_MAX, DISASTER_NAME_MAX, Disaster, DisasterStatus,
    Error, UserId,
};

fn version_conflict(expected: u32, actual: u32) -> Error {
    Error::conflict("disaster was modified by someone else").with_details(json!({
        "expectedVersion": expected,
        "actualVersion": actual,
        "code": "version_mismatch",
    }))
}

fn map_repository_error(error: DisasterRepositoryError) -> Error {
    match error {
        DisasterRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("disaster repository unavailable: {message}"))
        }
        DisasterRepositoryError::Query { message } => {
            Error::internal(format!("disaster repository error: {message}"))
        }
        DisasterRepositoryError::Missing => Error::not_found("disaster not found"),
        DisasterRepositoryError::VersionConflict { expected, actual } => {
            version_conflict(expected, actual)
        }
        DisasterRepositoryError::HasDependants { details } => Error::conflict(format!(
            "disaster still has dependent records: {details}"
        )),
    }
}

/// Disaster service implementing the disaster driving ports.
#[derive(Clone)]
pub struct DisasterService<P, R> {
    permissions: Arc<P>,
    repository: Arc<R>,
}

impl<P, R> DisasterService<P, R> {
    /// Create a service over the permission engine and repository.
    pub fn new(permissions: Arc<P>, repository: Arc<R>) -> Self {
        Self {
            permissions,
            repository,
        }
    }
}

impl<P, R> DisasterService<P, R>
where
    P: PermissionsQuery,
    R: DisasterRepository,
{
    async fn fetch(&self, id: Uuid) -> Result<Disaster, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("disaster not found"))
    }
}

#[async_trait]
impl<P, R> DisastersCommand for DisasterService<P, R>
where
    P: PermissionsQuery,
    R: DisasterRepository,
{
    async fn report(&self, caller: &UserId, disaster: NewDisaster) -> Result<Disaster, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.create_disasters, "report disasters")?;

        let name = non_blank("name", &disaster.name, DISASTER_NAME_MAX)?;
        let location = non_blank("location", &disaster.location, DISASTER_LOCATION_MAX)?;
        let description =
            optional_text("description", disaster.description, DISASTER_DESCRIPTION_MAX)?;
        if let Some(count) = disaster.estimated_affected {
            non_negative("estimatedAffected", count)?;
        }

        let disaster = Disaster {
            id: Uuid::new_v4(),
            name,
            location,
            description,
            kind: disaster.kind,
            severity: disaster.severity,
            status: DisasterStatus::Active,
            started_at: Utc::now(),
            estimated_affected: disaster.estimated_affected,
            reported_by: caller.clone(),
            version: 1,
        };
        self.repository
            .insert(&disaster)
            .await
            .map_err(map_repository_error)?;
        Ok(disaster)
    }

    async fn update(
        &self,
        caller: &UserId,
        id: Uuid,
        changes: DisasterChanges,
    ) -> Result<Disaster, Error> {
        let current = self.fetch(id).await?;
        let permissions = self
            .permissions
            .permissions_for(caller, Some(current.reported_by.clone()))
            .await?;
        authorize(
            permissions.edit_all_disasters || permissions.edit_own_disasters,
            "edit this disaster",
        )?;

        let name = non_blank("name", &changes.name, DISASTER_NAME_MAX)?;
        let location = non_blank("location", &changes.location, DISASTER_LOCATION_MAX)?;
        let description =
            optional_text("description", changes.description, DISASTER_DESCRIPTION_MAX)?;
        if let Some(count) = changes.estimated_affected {
            non_negative("estimatedAffected", count)?;
        }
        if current.version != changes.expected_version {
            return Err(version_conflict(changes.expected_version, current.version));
        }

        let updated = Disaster {
            name,
            location,
            description,
            kind: changes.kind,
            severity: changes.severity,
            status: changes.status,
            estimated_affected: changes.estimated_affected,
            version: changes.expected_version + 1,
            ..current
        };
        self.repository
            .update(&updated, changes.expected_version)
            .await
            .map_err(map_repository_error)?;
        Ok(updated)
    }

    async fn resolve(&self, caller: &UserId, id: Uuid) -> Result<Disaster, Error> {
        let current = self.fetch(id).await?;
        let permissions = self
            .permissions
            .permissions_for(caller, Some(current.reported_by.clone()))
            .await?;
        authorize(permissions.resolve_disasters, "resolve this disaster")?;

        let expected_version = current.version;
        let resolved = Disaster {
            status: DisasterStatus::Resolved,
            version: expected_version + 1,
            ..current
        };
        self.repository
            .update(&resolved, expected_version)
            .await
            .map_err(map_repository_error)?;
        Ok(resolved)
    }

    async fn delete(&self, caller: &UserId, id: Uuid) -> Result<(), Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.delete_disasters, "delete disasters")?;

        self.repository
            .delete(id)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<P, R> DisastersQuery for DisasterService<P, R>
where
    P: PermissionsQuery,
    R: DisasterRepository,
{
    async fn get(&self, caller: &UserId, id: Uuid) -> Result<Disaster, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.view_disasters, "view disasters")?;
        self.fetch(id).await
    }

    async fn list(&self, caller: &UserId) -> Result<Vec<Disaster>, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.view_disasters, "view disasters")?;
        self.repository.list().await.map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "disaster_service_tests.rs"]
mod tests;
