//! Inventory domain service: resource categories and stocked resources.
//!
//! Mutations share the `manage_donations` gate with the donation workflow;
//! reads are open to any signed-in account except the low-stock report.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::domain::permissions::authorize;
use crate::domain::ports::{
    CategoryChanges, NewCategory, NewResource, PermissionsQuery, ResourceChanges,
    ResourceRepository, ResourceRepositoryError, ResourcesCommand, ResourcesQuery,
};
use crate::domain::validation::{non_blank, non_negative, optional_text};
use crate::domain::{
    CATEGORY_DESCRIPTION_MAX, CATEGORY_NAME_MAX, Error, RESOURCE_DESCRIPTION_MAX,
    RESOURCE_NAME_MAX, RESOURCE_UNIT_MAX, Resource, ResourceCategory, UserId,
};

fn version_conflict(expected: u32, actual: u32) -> Error {
    Error::conflict("resource was modified by someone else").with_details(json!({
        "expectedVersion": expected,
        "actualVersion": actual,
        "code": "version_mismatch",
    }))
}

fn map_repository_error(error: ResourceRepositoryError) -> Error {
    match error {
        ResourceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("resource repository unavailable: {message}"))
        }
        ResourceRepositoryError::Query { message } => {
            Error::internal(format!("resource repository error: {message}"))
        }
        ResourceRepositoryError::Missing => Error::not_found("resource not found"),
        ResourceRepositoryError::MissingCategory => {
            Error::not_found("resource category not found")
        }
        ResourceRepositoryError::DuplicateCategory { name } => {
            Error::conflict(format!("resource category already exists: {name}"))
        }
        ResourceRepositoryError::CategoryInUse => {
            Error::conflict("resource category still has resources")
        }
        ResourceRepositoryError::ResourceInUse => {
            Error::conflict("resource still has donations or requests")
        }
        ResourceRepositoryError::VersionConflict { expected, actual } => {
            version_conflict(expected, actual)
        }
    }
}

/// Inventory service implementing the resource driving ports.
#[derive(Clone)]
pub struct ResourceService<P, R> {
    permissions: Arc<P>,
    repository: Arc<R>,
}

impl<P, R> ResourceService<P, R> {
    /// Create a service over the permission engine and repository.
    pub fn new(permissions: Arc<P>, repository: Arc<R>) -> Self {
        Self {
            permissions,
            repository,
        }
    }
}

impl<P, R> ResourceService<P, R>
where
    P: PermissionsQuery,
    R: ResourceRepository,
{
    async fn authorize_management(&self, caller: &UserId) -> Result<(), Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.manage_donations, "manage the inventory")
    }
}

#[async_trait]
impl<P, R> ResourcesCommand for ResourceService<P, R>
where
    P: PermissionsQuery,
    R: ResourceRepository,
{
    async fn create_category(
        &self,
        caller: &UserId,
        category: NewCategory,
    ) -> Result<ResourceCategory, Error> {
        self.authorize_management(caller).await?;

        let name = non_blank("name", &category.name, CATEGORY_NAME_MAX)?;
        let description =
            optional_text("description", category.description, CATEGORY_DESCRIPTION_MAX)?;

        let category = ResourceCategory {
            id: Uuid::new_v4(),
            name,
            description,
        };
        self.repository
            .insert_category(&category)
            .await
            .map_err(map_repository_error)?;
        Ok(category)
    }

    async fn update_category(
        &self,
        caller: &UserId,
        id: Uuid,
        changes: CategoryChanges,
    ) -> Result<ResourceCategory, Error> {
        self.authorize_management(caller).await?;

        let name = non_blank("name", &changes.name, CATEGORY_NAME_MAX)?;
        let description =
            optional_text("description", changes.description, CATEGORY_DESCRIPTION_MAX)?;

        self.repository
            .find_category(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("resource category not found"))?;

        let category = ResourceCategory {
            id,
            name,
            description,
        };
        self.repository
            .update_category(&category)
            .await
            .map_err(map_repository_error)?;
        Ok(category)
    }

    async fn delete_category(&self, caller: &UserId, id: Uuid) -> Result<(), Error> {
        self.authorize_management(caller).await?;
        self.repository
            .delete_category(id)
            .await
            .map_err(map_repository_error)
    }

    async fn create_resource(
        &self,
        caller: &UserId,
        resource: NewResource,
    ) -> Result<Resource, Error> {
        self.authorize_management(caller).await?;

        let name = non_blank("name", &resource.name, RESOURCE_NAME_MAX)?;
        let description =
            optional_text("description", resource.description, RESOURCE_DESCRIPTION_MAX)?;
        let unit = optional_text("unit", resource.unit, RESOURCE_UNIT_MAX)?;
        non_negative("currentQuantity", resource.current_quantity)?;
        non_negative("thresholdQuantity", resource.threshold_quantity)?;

        let resource = Resource {
            id: Uuid::new_v4(),
            name,
            category_id: resource.category_id,
            description,
            unit,
            current_quantity: resource.current_quantity,
            threshold_quantity: resource.threshold_quantity,
            version: 1,
        };
        self.repository
            .insert_resource(&resource)
            .await
            .map_err(map_repository_error)?;
        Ok(resource)
    }

    async fn update_resource(
        &self,
        caller: &UserId,
        id: Uuid,
        changes: ResourceChanges,
    ) -> Result<Resource, Error> {
        self.authorize_management(caller).await?;

        let current = self
            .repository
            .find_resource(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("resource not found"))?;

        let name = non_blank("name", &changes.name, RESOURCE_NAME_MAX)?;
        let description =
            optional_text("description", changes.description, RESOURCE_DESCRIPTION_MAX)?;
        let unit = optional_text("unit", changes.unit, RESOURCE_UNIT_MAX)?;
        non_negative("thresholdQuantity", changes.threshold_quantity)?;
        if current.version != changes.expected_version {
            return Err(version_conflict(changes.expected_version, current.version));
        }

        let updated = Resource {
            name,
            category_id: changes.category_id,
            description,
            unit,
            threshold_quantity: changes.threshold_quantity,
            version: changes.expected_version + 1,
            ..current
        };
        self.repository
            .update_resource(&updated, changes.expected_version)
            .await
            .map_err(map_repository_error)?;
        Ok(updated)
    }

    async fn delete_resource(&self, caller: &UserId, id: Uuid) -> Result<(), Error> {
        self.authorize_management(caller).await?;
        self.repository
            .delete_resource(id)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<P, R> ResourcesQuery for ResourceService<P, R>
where
    P: PermissionsQuery,
    R: ResourceRepository,
{
    async fn list_categories(&self, caller: &UserId) -> Result<Vec<ResourceCategory>, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.is_resolved(), "browse the inventory")?;
        self.repository
            .list_categories()
            .await
            .map_err(map_repository_error)
    }

    async fn get_resource(&self, caller: &UserId, id: Uuid) -> Result<Resource, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.is_resolved(), "browse the inventory")?;
        self.repository
            .find_resource(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("resource not found"))
    }

    async fn list_resources(&self, caller: &UserId) -> Result<Vec<Resource>, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.is_resolved(), "browse the inventory")?;
        self.repository
            .list_resources()
            .await
            .map_err(map_repository_error)
    }

    async fn list_low_stock(&self, caller: &UserId) -> Result<Vec<Resource>, Error> {
        self.authorize_management(caller).await?;
        self.repository
            .list_low_stock()
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "resource_service_tests.rs"]
mod tests;
