//! PostgreSQL-backed `AssignmentRepository` implementation using Diesel ORM.
//!
//! Every mutation keeps the volunteer's availability in step with the
//! assignment inside one transaction. A partial unique index on the
//! volunteer/disaster pair (active rows only) backs the duplicate check, so
//! an insert racing the pre-check still surfaces as `DuplicateAssignment`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{AssignmentRepository, AssignmentRepositoryError};
use crate::domain::{Assignment, AssignmentStatus, AvailabilityStatus, UserId};

use super::diesel_support::{
    is_unique_violation, map_checkout_error, map_statement_error, parse_stored,
};
use super::models::{AssignmentRow, NewAssignmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{assignments, disasters, volunteers};

/// Diesel-backed implementation of the assignment repository port.
#[derive(Clone)]
pub struct DieselAssignmentRepository {
    pool: DbPool,
}

impl DieselAssignmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to assignment repository errors.
fn map_pool_error(error: PoolError) -> AssignmentRepositoryError {
    map_checkout_error(error, AssignmentRepositoryError::connection)
}

/// Map Diesel errors to assignment repository errors.
fn map_diesel_error(error: diesel::result::Error) -> AssignmentRepositoryError {
    map_statement_error(
        error,
        AssignmentRepositoryError::query,
        AssignmentRepositoryError::connection,
    )
}

/// Map write errors, folding the partial index hit into `DuplicateAssignment`.
fn map_conflict_error(error: diesel::result::Error) -> AssignmentRepositoryError {
    if is_unique_violation(&error) {
        return AssignmentRepositoryError::duplicate_assignment();
    }
    map_diesel_error(error)
}

/// Convert a database row into a domain assignment.
fn row_to_assignment(row: AssignmentRow) -> Result<Assignment, AssignmentRepositoryError> {
    let AssignmentRow {
        id,
        volunteer_id,
        disaster_id,
        assigned_at,
        role,
        status,
        assigned_by,
    } = row;

    Ok(Assignment {
        id,
        volunteer_id,
        disaster_id,
        assigned_at,
        role,
        status: parse_stored(&status, AssignmentRepositoryError::query)?,
        assigned_by: UserId::from_uuid(assigned_by),
    })
}

/// Availability a volunteer should read while an assignment holds `status`.
fn availability_for(status: AssignmentStatus) -> AvailabilityStatus {
    match status {
        AssignmentStatus::Assigned => AvailabilityStatus::Assigned,
        AssignmentStatus::Completed | AssignmentStatus::Cancelled => AvailabilityStatus::Available,
    }
}

/// What creating an assignment found inside its transaction.
enum CreateOutcome {
    Created,
    MissingVolunteer,
    MissingDisaster,
    Duplicate,
}

/// What a status change or deletion found inside its transaction.
enum MutateOutcome {
    Done(AssignmentRow),
    Missing,
}

#[async_trait]
impl AssignmentRepository for DieselAssignmentRepository {
    async fn create(&self, assignment: &Assignment) -> Result<(), AssignmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewAssignmentRow {
            id: assignment.id,
            volunteer_id: assignment.volunteer_id,
            disaster_id: assignment.disaster_id,
            assigned_at: assignment.assigned_at,
            role: assignment.role.as_deref(),
            status: assignment.status.as_str(),
            assigned_by: *assignment.assigned_by.as_uuid(),
        };

        let outcome = conn
            .transaction(|conn| {
                async move {
                    let volunteer_exists: bool = diesel::select(diesel::dsl::exists(
                        volunteers::table.filter(volunteers::id.eq(new_row.volunteer_id)),
                    ))
                    .get_result(conn)
                    .await?;
                    if !volunteer_exists {
                        return Ok(CreateOutcome::MissingVolunteer);
                    }

                    let disaster_exists: bool = diesel::select(diesel::dsl::exists(
                        disasters::table.filter(disasters::id.eq(new_row.disaster_id)),
                    ))
                    .get_result(conn)
                    .await?;
                    if !disaster_exists {
                        return Ok(CreateOutcome::MissingDisaster);
                    }

                    let already_assigned: bool = diesel::select(diesel::dsl::exists(
                        assignments::table.filter(
                            assignments::volunteer_id
                                .eq(new_row.volunteer_id)
                                .and(assignments::disaster_id.eq(new_row.disaster_id))
                                .and(
                                    assignments::status
                                        .eq(AssignmentStatus::Assigned.as_str()),
                                ),
                        ),
                    ))
                    .get_result(conn)
                    .await?;
                    if already_assigned {
                        return Ok(CreateOutcome::Duplicate);
                    }

                    diesel::insert_into(assignments::table)
                        .values(&new_row)
                        .execute(conn)
                        .await?;

                    diesel::update(
                        volunteers::table.filter(volunteers::id.eq(new_row.volunteer_id)),
                    )
                    .set(volunteers::availability.eq(AvailabilityStatus::Assigned.as_str()))
                    .execute(conn)
                    .await?;

                    Ok(CreateOutcome::Created)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_conflict_error)?;

        match outcome {
            CreateOutcome::Created => Ok(()),
            CreateOutcome::MissingVolunteer => Err(AssignmentRepositoryError::missing_volunteer()),
            CreateOutcome::MissingDisaster => Err(AssignmentRepositoryError::missing_disaster()),
            CreateOutcome::Duplicate => Err(AssignmentRepositoryError::duplicate_assignment()),
        }
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Assignment>, AssignmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = assignments::table
            .filter(assignments::id.eq(id))
            .select(AssignmentRow::as_select())
            .first::<AssignmentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_assignment).transpose()
    }

    async fn list(&self) -> Result<Vec<Assignment>, AssignmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AssignmentRow> = assignments::table
            .order((assignments::assigned_at.desc(), assignments::id.desc()))
            .select(AssignmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_assignment).collect()
    }

    async fn list_for_volunteer(
        &self,
        volunteer_id: Uuid,
    ) -> Result<Vec<Assignment>, AssignmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AssignmentRow> = assignments::table
            .filter(assignments::volunteer_id.eq(volunteer_id))
            .order((assignments::assigned_at.desc(), assignments::id.desc()))
            .select(AssignmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_assignment).collect()
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: AssignmentStatus,
    ) -> Result<Assignment, AssignmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let outcome = conn
            .transaction(|conn| {
                async move {
                    let row = assignments::table
                        .filter(assignments::id.eq(id))
                        .select(AssignmentRow::as_select())
                        .first::<AssignmentRow>(conn)
                        .await
                        .optional()?;
                    let Some(mut row) = row else {
                        return Ok(MutateOutcome::Missing);
                    };

                    diesel::update(assignments::table.filter(assignments::id.eq(id)))
                        .set(assignments::status.eq(status.as_str()))
                        .execute(conn)
                        .await?;

                    diesel::update(
                        volunteers::table.filter(volunteers::id.eq(row.volunteer_id)),
                    )
                    .set(volunteers::availability.eq(availability_for(status).as_str()))
                    .execute(conn)
                    .await?;

                    row.status = status.as_str().to_owned();
                    Ok(MutateOutcome::Done(row))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_conflict_error)?;

        match outcome {
            MutateOutcome::Done(row) => row_to_assignment(row),
            MutateOutcome::Missing => Err(AssignmentRepositoryError::missing()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), AssignmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let outcome = conn
            .transaction(|conn| {
                async move {
                    let row = assignments::table
                        .filter(assignments::id.eq(id))
                        .select(AssignmentRow::as_select())
                        .first::<AssignmentRow>(conn)
                        .await
                        .optional()?;
                    let Some(row) = row else {
                        return Ok(MutateOutcome::Missing);
                    };

                    diesel::delete(assignments::table.filter(assignments::id.eq(id)))
                        .execute(conn)
                        .await?;

                    if row.status == AssignmentStatus::Assigned.as_str() {
                        diesel::update(
                            volunteers::table.filter(volunteers::id.eq(row.volunteer_id)),
                        )
                        .set(
                            volunteers::availability
                                .eq(AvailabilityStatus::Available.as_str()),
                        )
                        .execute(conn)
                        .await?;
                    }

                    Ok(MutateOutcome::Done(row))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match outcome {
            MutateOutcome::Done(_) => Ok(()),
            MutateOutcome::Missing => Err(AssignmentRepositoryError::missing()),
        }
    }
}
