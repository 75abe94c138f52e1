//! PostgreSQL-backed `ResourceRepository` implementation using Diesel ORM.
//!
//! Covers both categories and the resources within them. Resource updates
//! run under an optimistic version check and never touch `current_quantity`;
//! stock moves only through the donation and fulfilment transactions.
//! Deletions refuse while dependent rows still reference the target.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ResourceRepository, ResourceRepositoryError};
use crate::domain::{Resource, ResourceCategory};

use super::diesel_support::{
    is_unique_violation, map_checkout_error, map_statement_error, version_from_db, version_to_db,
};
use super::models::{
    NewResourceCategoryRow, NewResourceRow, ResourceCategoryRow, ResourceCategoryUpdate,
    ResourceRow, ResourceUpdate,
};
use super::pool::{DbPool, PoolError};
use super::schema::{donations, resource_categories, resource_requests, resources};

/// Diesel-backed implementation of the resource repository port.
#[derive(Clone)]
pub struct DieselResourceRepository {
    pool: DbPool,
}

impl DieselResourceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to resource repository errors.
fn map_pool_error(error: PoolError) -> ResourceRepositoryError {
    map_checkout_error(error, ResourceRepositoryError::connection)
}

/// Map Diesel errors to resource repository errors.
fn map_diesel_error(error: diesel::result::Error) -> ResourceRepositoryError {
    map_statement_error(
        error,
        ResourceRepositoryError::query,
        ResourceRepositoryError::connection,
    )
}

/// Map category write errors, folding the name index hit into
/// `DuplicateCategory`.
fn map_category_error(error: diesel::result::Error, name: &str) -> ResourceRepositoryError {
    if is_unique_violation(&error) {
        return ResourceRepositoryError::duplicate_category(name);
    }
    map_diesel_error(error)
}

/// Convert a database row into a domain category.
fn row_to_category(row: ResourceCategoryRow) -> ResourceCategory {
    let ResourceCategoryRow {
        id,
        name,
        description,
    } = row;

    ResourceCategory {
        id,
        name,
        description,
    }
}

/// Convert a database row into a domain resource.
fn row_to_resource(row: ResourceRow) -> Resource {
    let ResourceRow {
        id,
        name,
        category_id,
        description,
        unit,
        current_quantity,
        threshold_quantity,
        version,
    } = row;

    Resource {
        id,
        name,
        category_id,
        description,
        unit,
        current_quantity,
        threshold_quantity,
        version: version_from_db(version),
    }
}

/// What deleting a category found inside its transaction.
enum CategoryDeleteOutcome {
    Deleted,
    Missing,
    InUse,
}

/// What inserting a resource found inside its transaction.
enum ResourceInsertOutcome {
    Inserted,
    MissingCategory,
}

/// What a version-checked resource update found inside its transaction.
enum ResourceUpdateOutcome {
    Updated,
    Missing,
    MissingCategory,
    Conflict { actual: u32 },
}

/// What deleting a resource found inside its transaction.
enum ResourceDeleteOutcome {
    Deleted,
    Missing,
    InUse,
}

#[async_trait]
impl ResourceRepository for DieselResourceRepository {
    async fn insert_category(
        &self,
        category: &ResourceCategory,
    ) -> Result<(), ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewResourceCategoryRow {
            id: category.id,
            name: &category.name,
            description: category.description.as_deref(),
        };

        diesel::insert_into(resource_categories::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_category_error(err, &category.name))
    }

    async fn find_category(
        &self,
        id: Uuid,
    ) -> Result<Option<ResourceCategory>, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = resource_categories::table
            .filter(resource_categories::id.eq(id))
            .select(ResourceCategoryRow::as_select())
            .first::<ResourceCategoryRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_category))
    }

    async fn list_categories(&self) -> Result<Vec<ResourceCategory>, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ResourceCategoryRow> = resource_categories::table
            .order(resource_categories::name.asc())
            .select(ResourceCategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_category).collect())
    }

    async fn update_category(
        &self,
        category: &ResourceCategory,
    ) -> Result<(), ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = ResourceCategoryUpdate {
            name: &category.name,
            description: category.description.as_deref(),
        };

        let updated_rows = diesel::update(
            resource_categories::table.filter(resource_categories::id.eq(category.id)),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(|err| map_category_error(err, &category.name))?;

        if updated_rows == 0 {
            return Err(ResourceRepositoryError::missing_category());
        }
        Ok(())
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let outcome = conn
            .transaction(|conn| {
                async move {
                    let member_count: i64 = resources::table
                        .filter(resources::category_id.eq(id))
                        .count()
                        .get_result(conn)
                        .await?;
                    if member_count > 0 {
                        return Ok(CategoryDeleteOutcome::InUse);
                    }

                    let deleted_rows = diesel::delete(
                        resource_categories::table.filter(resource_categories::id.eq(id)),
                    )
                    .execute(conn)
                    .await?;

                    Ok(if deleted_rows == 0 {
                        CategoryDeleteOutcome::Missing
                    } else {
                        CategoryDeleteOutcome::Deleted
                    })
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match outcome {
            CategoryDeleteOutcome::Deleted => Ok(()),
            CategoryDeleteOutcome::Missing => Err(ResourceRepositoryError::missing_category()),
            CategoryDeleteOutcome::InUse => Err(ResourceRepositoryError::category_in_use()),
        }
    }

    async fn insert_resource(&self, resource: &Resource) -> Result<(), ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewResourceRow {
            id: resource.id,
            name: &resource.name,
            category_id: resource.category_id,
            description: resource.description.as_deref(),
            unit: resource.unit.as_deref(),
            current_quantity: resource.current_quantity,
            threshold_quantity: resource.threshold_quantity,
            version: version_to_db(resource.version),
        };

        let outcome = conn
            .transaction(|conn| {
                async move {
                    let category_exists: bool = diesel::select(diesel::dsl::exists(
                        resource_categories::table
                            .filter(resource_categories::id.eq(new_row.category_id)),
                    ))
                    .get_result(conn)
                    .await?;
                    if !category_exists {
                        return Ok(ResourceInsertOutcome::MissingCategory);
                    }

                    diesel::insert_into(resources::table)
                        .values(&new_row)
                        .execute(conn)
                        .await?;

                    Ok(ResourceInsertOutcome::Inserted)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match outcome {
            ResourceInsertOutcome::Inserted => Ok(()),
            ResourceInsertOutcome::MissingCategory => {
                Err(ResourceRepositoryError::missing_category())
            }
        }
    }

    async fn find_resource(&self, id: Uuid) -> Result<Option<Resource>, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = resources::table
            .filter(resources::id.eq(id))
            .select(ResourceRow::as_select())
            .first::<ResourceRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_resource))
    }

    async fn list_resources(&self) -> Result<Vec<Resource>, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ResourceRow> = resources::table
            .order(resources::name.asc())
            .select(ResourceRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_resource).collect())
    }

    async fn list_low_stock(&self) -> Result<Vec<Resource>, ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ResourceRow> = resources::table
            .filter(resources::current_quantity.le(resources::threshold_quantity))
            .order((resources::current_quantity.asc(), resources::name.asc()))
            .select(ResourceRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_resource).collect())
    }

    async fn update_resource(
        &self,
        resource: &Resource,
        expected_version: u32,
    ) -> Result<(), ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id = resource.id;
        let changes = ResourceUpdate {
            name: &resource.name,
            category_id: resource.category_id,
            description: resource.description.as_deref(),
            unit: resource.unit.as_deref(),
            threshold_quantity: resource.threshold_quantity,
            version: version_to_db(resource.version),
        };

        let outcome = conn
            .transaction(|conn| {
                async move {
                    let category_exists: bool = diesel::select(diesel::dsl::exists(
                        resource_categories::table
                            .filter(resource_categories::id.eq(changes.category_id)),
                    ))
                    .get_result(conn)
                    .await?;
                    if !category_exists {
                        return Ok(ResourceUpdateOutcome::MissingCategory);
                    }

                    let updated_rows = diesel::update(resources::table)
                        .filter(
                            resources::id
                                .eq(id)
                                .and(resources::version.eq(version_to_db(expected_version))),
                        )
                        .set(&changes)
                        .execute(conn)
                        .await?;
                    if updated_rows > 0 {
                        return Ok(ResourceUpdateOutcome::Updated);
                    }

                    let current = resources::table
                        .filter(resources::id.eq(id))
                        .select(ResourceRow::as_select())
                        .first::<ResourceRow>(conn)
                        .await
                        .optional()?;

                    Ok(match current {
                        Some(row) => ResourceUpdateOutcome::Conflict {
                            actual: version_from_db(row.version),
                        },
                        None => ResourceUpdateOutcome::Missing,
                    })
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match outcome {
            ResourceUpdateOutcome::Updated => Ok(()),
            ResourceUpdateOutcome::Missing => Err(ResourceRepositoryError::missing()),
            ResourceUpdateOutcome::MissingCategory => {
                Err(ResourceRepositoryError::missing_category())
            }
            ResourceUpdateOutcome::Conflict { actual } => {
                Err(ResourceRepositoryError::version_conflict(expected_version, actual))
            }
        }
    }

    async fn delete_resource(&self, id: Uuid) -> Result<(), ResourceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let outcome = conn
            .transaction(|conn| {
                async move {
                    let donation_count: i64 = donations::table
                        .filter(donations::resource_id.eq(id))
                        .count()
                        .get_result(conn)
                        .await?;
                    if donation_count > 0 {
                        return Ok(ResourceDeleteOutcome::InUse);
                    }

                    let request_count: i64 = resource_requests::table
                        .filter(resource_requests::resource_id.eq(id))
                        .count()
                        .get_result(conn)
                        .await?;
                    if request_count > 0 {
                        return Ok(ResourceDeleteOutcome::InUse);
                    }

                    let deleted_rows =
                        diesel::delete(resources::table.filter(resources::id.eq(id)))
                            .execute(conn)
                            .await?;

                    Ok(if deleted_rows == 0 {
                        ResourceDeleteOutcome::Missing
                    } else {
                        ResourceDeleteOutcome::Deleted
                    })
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match outcome {
            ResourceDeleteOutcome::Deleted => Ok(()),
            ResourceDeleteOutcome::Missing => Err(ResourceRepositoryError::missing()),
            ResourceDeleteOutcome::InUse => Err(ResourceRepositoryError::resource_in_use()),
        }
    }
}
