//! Port for resource and category persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Resource, ResourceCategory};

use super::define_port_error;

define_port_error! {
    /// Errors raised by resource repository adapters.
    pub enum ResourceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "resource repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "resource repository query failed: {message}",
        /// The resource does not exist.
        Missing => "resource not found",
        /// The category does not exist.
        MissingCategory => "resource category not found",
        /// A category with this name already exists.
        DuplicateCategory { name: String } =>
            "resource category already exists: {name}",
        /// Resources still reference the category.
        CategoryInUse => "resource category still has resources",
        /// Donations or requests still reference the resource.
        ResourceInUse => "resource still has donations or requests",
        /// Optimistic concurrency check failed.
        VersionConflict { expected: u32, actual: u32 } =>
            "version conflict: expected {expected}, found {actual}",
    }
}

/// Port for inventory storage: categories and the resources within them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Persist a new category.
    ///
    /// Fails with [`ResourceRepositoryError::DuplicateCategory`] when the
    /// name is already taken.
    async fn insert_category(
        &self,
        category: &ResourceCategory,
    ) -> Result<(), ResourceRepositoryError>;

    /// Fetch a category by id.
    async fn find_category(
        &self,
        id: Uuid,
    ) -> Result<Option<ResourceCategory>, ResourceRepositoryError>;

    /// List all categories sorted by name.
    async fn list_categories(&self) -> Result<Vec<ResourceCategory>, ResourceRepositoryError>;

    /// Persist changes to an existing category.
    async fn update_category(
        &self,
        category: &ResourceCategory,
    ) -> Result<(), ResourceRepositoryError>;

    /// Delete a category.
    ///
    /// Fails with [`ResourceRepositoryError::CategoryInUse`] while resources
    /// still belong to it.
    async fn delete_category(&self, id: Uuid) -> Result<(), ResourceRepositoryError>;

    /// Persist a new resource.
    ///
    /// Fails with [`ResourceRepositoryError::MissingCategory`] when the
    /// referenced category does not exist.
    async fn insert_resource(&self, resource: &Resource) -> Result<(), ResourceRepositoryError>;

    /// Fetch a resource by id.
    async fn find_resource(&self, id: Uuid) -> Result<Option<Resource>, ResourceRepositoryError>;

    /// List all resources sorted by name.
    async fn list_resources(&self) -> Result<Vec<Resource>, ResourceRepositoryError>;

    /// List resources at or below their stock threshold, lowest stock first.
    async fn list_low_stock(&self) -> Result<Vec<Resource>, ResourceRepositoryError>;

    /// Persist changes to an existing resource under an optimistic check.
    async fn update_resource(
        &self,
        resource: &Resource,
        expected_version: u32,
    ) -> Result<(), ResourceRepositoryError>;

    /// Delete a resource.
    ///
    /// Fails with [`ResourceRepositoryError::ResourceInUse`] while donations
    /// or resource requests still reference it.
    async fn delete_resource(&self, id: Uuid) -> Result<(), ResourceRepositoryError>;
}
