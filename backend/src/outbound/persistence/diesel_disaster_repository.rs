//! PostgreSQL-backed `DisasterRepository` implementation using Diesel ORM.
//!
//! Updates run under an optimistic version check; deletion refuses while
//! missions, assignments, or resource requests still reference the disaster.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{DisasterRepository, DisasterRepositoryError};
use crate::domain::{Disaster, UserId};

use super::diesel_support::{
    map_checkout_error, map_statement_error, parse_stored, version_from_db, version_to_db,
};
use super::models::{DisasterRow, DisasterUpdate, NewDisasterRow};
use super::pool::{DbPool, PoolError};
use super::schema::{assignments, disasters, missions, resource_requests};

/// Diesel-backed implementation of the disaster repository port.
#[derive(Clone)]
pub struct DieselDisasterRepository {
    pool: DbPool,
}

impl DieselDisasterRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to disaster repository errors.
fn map_pool_error(error: PoolError) -> DisasterRepositoryError {
    map_checkout_error(error, DisasterRepositoryError::connection)
}

/// Map Diesel errors to disaster repository errors.
fn map_diesel_error(error: diesel::result::Error) -> DisasterRepositoryError {
    map_statement_error(
        error,
        DisasterRepositoryError::query,
        DisasterRepositoryError::connection,
    )
}

/// Convert a database row into a domain disaster.
fn row_to_disaster(row: DisasterRow) -> Result<Disaster, DisasterRepositoryError> {
    let DisasterRow {
        id,
        name,
        location,
        description,
        kind,
        severity,
        status,
        started_at,
        estimated_affected,
        reported_by,
        version,
    } = row;

    Ok(Disaster {
        id,
        name,
        location,
        description,
        kind: parse_stored(&kind, DisasterRepositoryError::query)?,
        severity: parse_stored(&severity, DisasterRepositoryError::query)?,
        status: parse_stored(&status, DisasterRepositoryError::query)?,
        started_at,
        estimated_affected,
        reported_by: UserId::from_uuid(reported_by),
        version: version_from_db(version),
    })
}

/// Work out why a version-checked update touched no rows.
async fn diagnose_update_failure<C>(
    conn: &mut C,
    id: Uuid,
    expected_version: u32,
) -> DisasterRepositoryError
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let current = disasters::table
        .filter(disasters::id.eq(id))
        .select(DisasterRow::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(map_diesel_error);

    match current {
        Ok(Some(row)) => {
            DisasterRepositoryError::version_conflict(expected_version, version_from_db(row.version))
        }
        Ok(None) => DisasterRepositoryError::missing(),
        Err(err) => err,
    }
}

/// What deleting a disaster found inside its transaction.
enum DeleteOutcome {
    Deleted,
    Missing,
    Blocked(String),
}

#[async_trait]
impl DisasterRepository for DieselDisasterRepository {
    async fn insert(&self, disaster: &Disaster) -> Result<(), DisasterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewDisasterRow {
            id: disaster.id,
            name: &disaster.name,
            location: &disaster.location,
            description: disaster.description.as_deref(),
            kind: disaster.kind.as_str(),
            severity: disaster.severity.as_str(),
            status: disaster.status.as_str(),
            started_at: disaster.started_at,
            estimated_affected: disaster.estimated_affected,
            reported_by: *disaster.reported_by.as_uuid(),
            version: version_to_db(disaster.version),
        };

        diesel::insert_into(disasters::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Disaster>, DisasterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = disasters::table
            .filter(disasters::id.eq(id))
            .select(DisasterRow::as_select())
            .first::<DisasterRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_disaster).transpose()
    }

    async fn list(&self) -> Result<Vec<Disaster>, DisasterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DisasterRow> = disasters::table
            .order((disasters::started_at.desc(), disasters::id.desc()))
            .select(DisasterRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_disaster).collect()
    }

    async fn update(
        &self,
        disaster: &Disaster,
        expected_version: u32,
    ) -> Result<(), DisasterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = DisasterUpdate {
            name: &disaster.name,
            location: &disaster.location,
            description: disaster.description.as_deref(),
            kind: disaster.kind.as_str(),
            severity: disaster.severity.as_str(),
            status: disaster.status.as_str(),
            estimated_affected: disaster.estimated_affected,
            version: version_to_db(disaster.version),
        };

        let updated_rows = diesel::update(disasters::table)
            .filter(
                disasters::id
                    .eq(disaster.id)
                    .and(disasters::version.eq(version_to_db(expected_version))),
            )
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated_rows == 0 {
            return Err(diagnose_update_failure(&mut conn, disaster.id, expected_version).await);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DisasterRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let outcome = conn
            .transaction(|conn| {
                async move {
                    let mut blockers = Vec::new();

                    let mission_count: i64 = missions::table
                        .filter(missions::disaster_id.eq(id))
                        .count()
                        .get_result(conn)
                        .await?;
                    if mission_count > 0 {
                        blockers.push("missions");
                    }

                    let assignment_count: i64 = assignments::table
                        .filter(assignments::disaster_id.eq(id))
                        .count()
                        .get_result(conn)
                        .await?;
                    if assignment_count > 0 {
                        blockers.push("assignments");
                    }

                    let request_count: i64 = resource_requests::table
                        .filter(resource_requests::disaster_id.eq(id))
                        .count()
                        .get_result(conn)
                        .await?;
                    if request_count > 0 {
                        blockers.push("resource requests");
                    }

                    if !blockers.is_empty() {
                        return Ok(DeleteOutcome::Blocked(blockers.join(", ")));
                    }

                    let deleted_rows =
                        diesel::delete(disasters::table.filter(disasters::id.eq(id)))
                            .execute(conn)
                            .await?;

                    Ok(if deleted_rows == 0 {
                        DeleteOutcome::Missing
                    } else {
                        DeleteOutcome::Deleted
                    })
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match outcome {
            DeleteOutcome::Deleted => Ok(()),
            DeleteOutcome::Missing => Err(DisasterRepositoryError::missing()),
            DeleteOutcome::Blocked(details) => Err(DisasterRepositoryError::has_dependants(details)),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use chrono::Utc;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> DisasterRow {
        DisasterRow {
            id: Uuid::new_v4(),
            name: "River Aire flooding".to_owned(),
            location: "Leeds".to_owned(),
            description: None,
            kind: "Flood".to_owned(),
            severity: "High".to_owned(),
            status: "Active".to_owned(),
            started_at: Utc::now(),
            estimated_affected: Some(1200),
            reported_by: Uuid::new_v4(),
            version: 3,
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let pool_err = PoolError::checkout("connection refused");
        let repo_err = map_pool_error(pool_err);

        assert!(matches!(repo_err, DisasterRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let diesel_err = diesel::result::Error::NotFound;
        let repo_err = map_diesel_error(diesel_err);

        assert!(matches!(repo_err, DisasterRepositoryError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn row_conversion_restores_typed_fields(valid_row: DisasterRow) {
        let reporter = valid_row.reported_by;

        let disaster = row_to_disaster(valid_row).expect("valid row should convert");

        assert_eq!(disaster.kind, crate::domain::DisasterKind::Flood);
        assert_eq!(disaster.status, crate::domain::DisasterStatus::Active);
        assert_eq!(disaster.reported_by, UserId::from_uuid(reporter));
        assert_eq!(disaster.version, 3);
    }

    #[rstest]
    fn row_conversion_rejects_an_unknown_kind(mut valid_row: DisasterRow) {
        valid_row.kind = "Meteor".to_owned();

        let error = row_to_disaster(valid_row).expect_err("unknown kind should fail");
        assert!(matches!(error, DisasterRepositoryError::Query { .. }));
        assert!(error.to_string().contains("Meteor"));
    }
}
