//! PostgreSQL-backed `ResourceRequestRepository` implementation using Diesel
//! ORM.
//!
//! Fulfilment debits the resource's stock with a conditional update and flips
//! the request to `Fulfilled` in the same transaction. The debit's filter
//! demands enough stock, so a shortfall touches no rows and is reported back
//! without changing anything.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ResourceRequestRepository, ResourceRequestRepositoryError};
use crate::domain::{Fulfilment, RequestStatus, ResourceRequest, UserId};

use super::diesel_support::{map_checkout_error, map_statement_error, parse_stored};
use super::models::{NewResourceRequestRow, ResourceRequestRow};
use super::pool::{DbPool, PoolError};
use super::schema::{disasters, resource_requests, resources};

/// Diesel-backed implementation of the resource request repository port.
#[derive(Clone)]
pub struct DieselResourceRequestRepository {
    pool: DbPool,
}

impl DieselResourceRequestRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to resource request repository errors.
fn map_pool_error(error: PoolError) -> ResourceRequestRepositoryError {
    map_checkout_error(error, ResourceRequestRepositoryError::connection)
}

/// Map Diesel errors to resource request repository errors.
fn map_diesel_error(error: diesel::result::Error) -> ResourceRequestRepositoryError {
    map_statement_error(
        error,
        ResourceRequestRepositoryError::query,
        ResourceRequestRepositoryError::connection,
    )
}

/// Convert a database row into a domain resource request.
fn row_to_request(
    row: ResourceRequestRow,
) -> Result<ResourceRequest, ResourceRequestRepositoryError> {
    let ResourceRequestRow {
        id,
        disaster_id,
        resource_id,
        quantity_requested,
        urgency,
        status,
        requested_by,
        requested_at,
        required_by,
    } = row;

    Ok(ResourceRequest {
        id,
        disaster_id,
        resource_id,
        quantity_requested,
        urgency: parse_stored(&urgency, ResourceRequestRepositoryError::query)?,
        status: parse_stored(&status, ResourceRequestRepositoryError::query)?,
        requested_by: UserId::from_uuid(requested_by),
        requested_at,
        required_by,
    })
}

/// What opening a request found inside its transaction.
enum InsertOutcome {
    Inserted,
    MissingDisaster,
    MissingResource,
}

/// What fulfilling a request found inside its transaction.
enum FulfilOutcome {
    Fulfilled(ResourceRequestRow),
    NotFulfillable(String),
    InsufficientStock { available: i32, requested: i32 },
    MissingRequest,
    MissingResource,
}

#[async_trait]
impl ResourceRequestRepository for DieselResourceRequestRepository {
    async fn insert(
        &self,
        request: &ResourceRequest,
    ) -> Result<(), ResourceRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewResourceRequestRow {
            id: request.id,
            disaster_id: request.disaster_id,
            resource_id: request.resource_id,
            quantity_requested: request.quantity_requested,
            urgency: request.urgency.as_str(),
            status: request.status.as_str(),
            requested_by: *request.requested_by.as_uuid(),
            requested_at: request.requested_at,
            required_by: request.required_by,
        };

        let outcome = conn
            .transaction(|conn| {
                async move {
                    let disaster_exists: bool = diesel::select(diesel::dsl::exists(
                        disasters::table.filter(disasters::id.eq(new_row.disaster_id)),
                    ))
                    .get_result(conn)
                    .await?;
                    if !disaster_exists {
                        return Ok(InsertOutcome::MissingDisaster);
                    }

                    let resource_exists: bool = diesel::select(diesel::dsl::exists(
                        resources::table.filter(resources::id.eq(new_row.resource_id)),
                    ))
                    .get_result(conn)
                    .await?;
                    if !resource_exists {
                        return Ok(InsertOutcome::MissingResource);
                    }

                    diesel::insert_into(resource_requests::table)
                        .values(&new_row)
                        .execute(conn)
                        .await?;

                    Ok(InsertOutcome::Inserted)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match outcome {
            InsertOutcome::Inserted => Ok(()),
            InsertOutcome::MissingDisaster => {
                Err(ResourceRequestRepositoryError::missing_disaster())
            }
            InsertOutcome::MissingResource => {
                Err(ResourceRequestRepositoryError::missing_resource())
            }
        }
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ResourceRequest>, ResourceRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = resource_requests::table
            .filter(resource_requests::id.eq(id))
            .select(ResourceRequestRow::as_select())
            .first::<ResourceRequestRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_request).transpose()
    }

    async fn list(&self) -> Result<Vec<ResourceRequest>, ResourceRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ResourceRequestRow> = resource_requests::table
            .order((resource_requests::requested_at.desc(), resource_requests::id.desc()))
            .select(ResourceRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_request).collect()
    }

    async fn fulfil(&self, id: Uuid) -> Result<Fulfilment, ResourceRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let outcome = conn
            .transaction(|conn| {
                async move {
                    let row = resource_requests::table
                        .filter(resource_requests::id.eq(id))
                        .select(ResourceRequestRow::as_select())
                        .first::<ResourceRequestRow>(conn)
                        .await
                        .optional()?;
                    let Some(mut row) = row else {
                        return Ok(FulfilOutcome::MissingRequest);
                    };

                    // Only pending or approved requests may move stock; an
                    // out-of-band status string refuses fulfilment too.
                    let fulfillable = row.status == RequestStatus::Pending.as_str()
                        || row.status == RequestStatus::Approved.as_str();
                    if !fulfillable {
                        return Ok(FulfilOutcome::NotFulfillable(row.status));
                    }

                    let debited_rows = diesel::update(
                        resources::table.filter(
                            resources::id.eq(row.resource_id).and(
                                resources::current_quantity.ge(row.quantity_requested),
                            ),
                        ),
                    )
                    .set(
                        resources::current_quantity
                            .eq(resources::current_quantity - row.quantity_requested),
                    )
                    .execute(conn)
                    .await?;

                    if debited_rows == 0 {
                        let available = resources::table
                            .filter(resources::id.eq(row.resource_id))
                            .select(resources::current_quantity)
                            .first::<i32>(conn)
                            .await
                            .optional()?;

                        return Ok(match available {
                            Some(available) => FulfilOutcome::InsufficientStock {
                                available,
                                requested: row.quantity_requested,
                            },
                            None => FulfilOutcome::MissingResource,
                        });
                    }

                    diesel::update(
                        resource_requests::table.filter(resource_requests::id.eq(id)),
                    )
                    .set(resource_requests::status.eq(RequestStatus::Fulfilled.as_str()))
                    .execute(conn)
                    .await?;

                    row.status = RequestStatus::Fulfilled.as_str().to_owned();
                    Ok(FulfilOutcome::Fulfilled(row))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match outcome {
            FulfilOutcome::Fulfilled(row) => Ok(Fulfilment::Completed(row_to_request(row)?)),
            FulfilOutcome::InsufficientStock {
                available,
                requested,
            } => Ok(Fulfilment::InsufficientStock {
                available,
                requested,
            }),
            FulfilOutcome::NotFulfillable(status) => {
                Err(ResourceRequestRepositoryError::not_fulfillable(status))
            }
            FulfilOutcome::MissingRequest => Err(ResourceRequestRepositoryError::missing()),
            FulfilOutcome::MissingResource => {
                Err(ResourceRequestRepositoryError::missing_resource())
            }
        }
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: RequestStatus,
    ) -> Result<ResourceRequest, ResourceRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated_rows =
            diesel::update(resource_requests::table.filter(resource_requests::id.eq(id)))
                .set(resource_requests::status.eq(status.as_str()))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;

        if updated_rows == 0 {
            return Err(ResourceRequestRepositoryError::missing());
        }

        let row = resource_requests::table
            .filter(resource_requests::id.eq(id))
            .select(ResourceRequestRow::as_select())
            .first::<ResourceRequestRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => row_to_request(row),
            None => Err(ResourceRequestRepositoryError::missing()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), ResourceRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted_rows =
            diesel::delete(resource_requests::table.filter(resource_requests::id.eq(id)))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;

        if deleted_rows == 0 {
            return Err(ResourceRequestRepositoryError::missing());
        }
        Ok(())
    }
}
