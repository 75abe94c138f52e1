//! PostgreSQL-backed `MissionRepository` implementation using Diesel ORM.
//!
//! Inserts and updates verify the referenced disaster and volunteer inside
//! the writing transaction. Full updates run under an optimistic version
//! check; status flips are last-write-wins and leave the version alone.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{MissionRepository, MissionRepositoryError};
use crate::domain::{Mission, MissionStatus, UserId};

use super::diesel_support::{
    map_checkout_error, map_statement_error, parse_stored, version_from_db, version_to_db,
};
use super::models::{MissionRow, MissionUpdate, NewMissionRow};
use super::pool::{DbPool, PoolError};
use super::schema::{disasters, missions, volunteers};

/// Diesel-backed implementation of the mission repository port.
#[derive(Clone)]
pub struct DieselMissionRepository {
    pool: DbPool,
}

impl DieselMissionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to mission repository errors.
fn map_pool_error(error: PoolError) -> MissionRepositoryError {
    map_checkout_error(error, MissionRepositoryError::connection)
}

/// Map Diesel errors to mission repository errors.
fn map_diesel_error(error: diesel::result::Error) -> MissionRepositoryError {
    map_statement_error(
        error,
        MissionRepositoryError::query,
        MissionRepositoryError::connection,
    )
}

/// Convert a database row into a domain mission.
fn row_to_mission(row: MissionRow) -> Result<Mission, MissionRepositoryError> {
    let MissionRow {
        id,
        disaster_id,
        title,
        description,
        assigned_to,
        status,
        priority,
        due_at,
        created_at,
        created_by,
        version,
    } = row;

    Ok(Mission {
        id,
        disaster_id,
        title,
        description,
        assigned_to,
        status: parse_stored(&status, MissionRepositoryError::query)?,
        priority: parse_stored(&priority, MissionRepositoryError::query)?,
        due_at,
        created_at,
        created_by: UserId::from_uuid(created_by),
        version: version_from_db(version),
    })
}

/// Check inside a transaction that an assigned volunteer profile exists.
async fn volunteer_exists<C>(
    conn: &mut C,
    volunteer_id: Uuid,
) -> Result<bool, diesel::result::Error>
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    diesel::select(diesel::dsl::exists(
        volunteers::table.filter(volunteers::id.eq(volunteer_id)),
    ))
    .get_result(conn)
    .await
}

/// What inserting a mission found inside its transaction.
enum InsertOutcome {
    Inserted,
    MissingDisaster,
    MissingVolunteer,
}

/// What a version-checked mission update found inside its transaction.
enum UpdateOutcome {
    Updated,
    Missing,
    MissingVolunteer,
    Conflict { actual: u32 },
}

#[async_trait]
impl MissionRepository for DieselMissionRepository {
    async fn insert(&self, mission: &Mission) -> Result<(), MissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewMissionRow {
            id: mission.id,
            disaster_id: mission.disaster_id,
            title: &mission.title,
            description: mission.description.as_deref(),
            assigned_to: mission.assigned_to,
            status: mission.status.as_str(),
            priority: mission.priority.as_str(),
            due_at: mission.due_at,
            created_at: mission.created_at,
            created_by: *mission.created_by.as_uuid(),
            version: version_to_db(mission.version),
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

                    if let Some(volunteer_id) = new_row.assigned_to {
                        if !volunteer_exists(conn, volunteer_id).await? {
                            return Ok(InsertOutcome::MissingVolunteer);
                        }
                    }

                    diesel::insert_into(missions::table)
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
            InsertOutcome::MissingDisaster => Err(MissionRepositoryError::missing_disaster()),
            InsertOutcome::MissingVolunteer => Err(MissionRepositoryError::missing_volunteer()),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Mission>, MissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = missions::table
            .filter(missions::id.eq(id))
            .select(MissionRow::as_select())
            .first::<MissionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_mission).transpose()
    }

    async fn list(&self) -> Result<Vec<Mission>, MissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MissionRow> = missions::table
            .order((missions::created_at.desc(), missions::id.desc()))
            .select(MissionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_mission).collect()
    }

    async fn list_for_volunteer(
        &self,
        volunteer_id: Uuid,
    ) -> Result<Vec<Mission>, MissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MissionRow> = missions::table
            .filter(missions::assigned_to.eq(volunteer_id))
            .order((missions::created_at.desc(), missions::id.desc()))
            .select(MissionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_mission).collect()
    }

    async fn update(
        &self,
        mission: &Mission,
        expected_version: u32,
    ) -> Result<(), MissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id = mission.id;
        let changes = MissionUpdate {
            title: &mission.title,
            description: mission.description.as_deref(),
            assigned_to: mission.assigned_to,
            status: mission.status.as_str(),
            priority: mission.priority.as_str(),
            due_at: mission.due_at,
            version: version_to_db(mission.version),
        };

        let outcome = conn
            .transaction(|conn| {
                async move {
                    if let Some(volunteer_id) = changes.assigned_to {
                        if !volunteer_exists(conn, volunteer_id).await? {
                            return Ok(UpdateOutcome::MissingVolunteer);
                        }
                    }

                    let updated_rows = diesel::update(missions::table)
                        .filter(
                            missions::id
                                .eq(id)
                                .and(missions::version.eq(version_to_db(expected_version))),
                        )
                        .set(&changes)
                        .execute(conn)
                        .await?;
                    if updated_rows > 0 {
                        return Ok(UpdateOutcome::Updated);
                    }

                    let current = missions::table
                        .filter(missions::id.eq(id))
                        .select(MissionRow::as_select())
                        .first::<MissionRow>(conn)
                        .await
                        .optional()?;

                    Ok(match current {
                        Some(row) => UpdateOutcome::Conflict {
                            actual: version_from_db(row.version),
                        },
                        None => UpdateOutcome::Missing,
                    })
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match outcome {
            UpdateOutcome::Updated => Ok(()),
            UpdateOutcome::Missing => Err(MissionRepositoryError::missing()),
            UpdateOutcome::MissingVolunteer => Err(MissionRepositoryError::missing_volunteer()),
            UpdateOutcome::Conflict { actual } => {
                Err(MissionRepositoryError::version_conflict(expected_version, actual))
            }
        }
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: MissionStatus,
    ) -> Result<Mission, MissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated_rows = diesel::update(missions::table.filter(missions::id.eq(id)))
            .set(missions::status.eq(status.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated_rows == 0 {
            return Err(MissionRepositoryError::missing());
        }

        let row = missions::table
            .filter(missions::id.eq(id))
            .select(MissionRow::as_select())
            .first::<MissionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => row_to_mission(row),
            None => Err(MissionRepositoryError::missing()),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use chrono::Utc;
    use rstest::{fixture, rstest};

    use crate::domain::MissionPriority;

    use super::*;

    #[fixture]
    fn valid_row() -> MissionRow {
        MissionRow {
            id: Uuid::new_v4(),
            disaster_id: Uuid::new_v4(),
            title: "Sandbag the riverbank".to_owned(),
            description: None,
            assigned_to: Some(Uuid::new_v4()),
            status: "Open".to_owned(),
            priority: "High".to_owned(),
            due_at: None,
            created_at: Utc::now(),
            created_by: Uuid::new_v4(),
            version: 2,
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let pool_err = PoolError::checkout("connection refused");
        let repo_err = map_pool_error(pool_err);

        assert!(matches!(repo_err, MissionRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let diesel_err = diesel::result::Error::NotFound;
        let repo_err = map_diesel_error(diesel_err);

        assert!(matches!(repo_err, MissionRepositoryError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn row_conversion_restores_typed_fields(valid_row: MissionRow) {
        let creator = valid_row.created_by;

        let mission = row_to_mission(valid_row).expect("valid row should convert");

        assert_eq!(mission.status, MissionStatus::Open);
        assert_eq!(mission.priority, MissionPriority::High);
        assert_eq!(mission.created_by, UserId::from_uuid(creator));
        assert_eq!(mission.version, 2);
    }

    #[rstest]
    fn row_conversion_rejects_an_unknown_priority(mut valid_row: MissionRow) {
        valid_row.priority = "Urgent".to_owned();

        let error = row_to_mission(valid_row).expect_err("unknown priority should fail");
        assert!(matches!(error, MissionRepositoryError::Query { .. }));
        assert!(error.to_string().contains("Urgent"));
    }
}
