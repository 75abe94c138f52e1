//! Driving ports for inventory use-cases: categories and resources.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, Resource, ResourceCategory, UserId};

/// Payload for creating a resource category.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    /// Unique display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Replacement payload for updating a category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryChanges {
    /// Unique display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Payload for creating a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResource {
    /// Display name.
    pub name: String,
    /// Owning category.
    pub category_id: Uuid,
    /// Optional description.
    pub description: Option<String>,
    /// Unit the quantities are counted in.
    pub unit: Option<String>,
    /// Opening stock; must not be negative.
    pub current_quantity: i32,
    /// Stock level at which the resource is flagged as low.
    pub threshold_quantity: i32,
}

/// Replacement payload for updating a resource.
///
/// Stock is deliberately absent: `current_quantity` only moves through
/// donations and fulfilled requests.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceChanges {
    /// Display name.
    pub name: String,
    /// Owning category.
    pub category_id: Uuid,
    /// Optional description.
    pub description: Option<String>,
    /// Unit the quantities are counted in.
    pub unit: Option<String>,
    /// Stock level at which the resource is flagged as low.
    pub threshold_quantity: i32,
    /// Version the caller last read.
    pub expected_version: u32,
}

/// Domain use-case port for inventory mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourcesCommand: Send + Sync {
    /// Create a category.
    async fn create_category(
        &self,
        caller: &UserId,
        category: NewCategory,
    ) -> Result<ResourceCategory, Error>;

    /// Rename or re-describe a category.
    async fn update_category(
        &self,
        caller: &UserId,
        id: Uuid,
        changes: CategoryChanges,
    ) -> Result<ResourceCategory, Error>;

    /// Delete an empty category.
    async fn delete_category(&self, caller: &UserId, id: Uuid) -> Result<(), Error>;

    /// Create a resource within a category.
    async fn create_resource(
        &self,
        caller: &UserId,
        resource: NewResource,
    ) -> Result<Resource, Error>;

    /// Apply a full update to a resource.
    async fn update_resource(
        &self,
        caller: &UserId,
        id: Uuid,
        changes: ResourceChanges,
    ) -> Result<Resource, Error>;

    /// Delete a resource nothing references.
    async fn delete_resource(&self, caller: &UserId, id: Uuid) -> Result<(), Error>;
}

/// Domain use-case port for inventory reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourcesQuery: Send + Sync {
    /// List all categories sorted by name.
    async fn list_categories(&self, caller: &UserId) -> Result<Vec<ResourceCategory>, Error>;

    /// Fetch one resource.
    async fn get_resource(&self, caller: &UserId, id: Uuid) -> Result<Resource, Error>;

    /// List all resources sorted by name.
    async fn list_resources(&self, caller: &UserId) -> Result<Vec<Resource>, Error>;

    /// List resources at or below their stock threshold.
    async fn list_low_stock(&self, caller: &UserId) -> Result<Vec<Resource>, Error>;
}
