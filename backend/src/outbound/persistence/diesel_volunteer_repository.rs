//! PostgreSQL-backed `VolunteerRepository` implementation using Diesel ORM.
//!
//! The `user_id` unique index backs one-profile-per-account: a racing insert
//! surfaces as `DuplicateProfile` rather than a generic query error.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{VolunteerRepository, VolunteerRepositoryError};
use crate::domain::{UserId, Volunteer};

use super::diesel_support::{
    is_unique_violation, map_checkout_error, map_statement_error, parse_stored, version_from_db,
    version_to_db,
};
use super::models::{NewVolunteerRow, VolunteerRow, VolunteerUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::volunteers;

/// Diesel-backed implementation of the volunteer repository port.
#[derive(Clone)]
pub struct DieselVolunteerRepository {
    pool: DbPool,
}

impl DieselVolunteerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to volunteer repository errors.
fn map_pool_error(error: PoolError) -> VolunteerRepositoryError {
    map_checkout_error(error, VolunteerRepositoryError::connection)
}

/// Map Diesel errors to volunteer repository errors.
fn map_diesel_error(error: diesel::result::Error) -> VolunteerRepositoryError {
    map_statement_error(
        error,
        VolunteerRepositoryError::query,
        VolunteerRepositoryError::connection,
    )
}

/// Map insert errors, folding the unique index hit into `DuplicateProfile`.
fn map_insert_error(error: diesel::result::Error) -> VolunteerRepositoryError {
    if is_unique_violation(&error) {
        return VolunteerRepositoryError::duplicate_profile();
    }
    map_diesel_error(error)
}

/// Convert a database row into a domain volunteer profile.
fn row_to_volunteer(row: VolunteerRow) -> Result<Volunteer, VolunteerRepositoryError> {
    let VolunteerRow {
        id,
        user_id,
        skills,
        availability,
        address,
        emergency_contact,
        registered_at,
        version,
    } = row;

    Ok(Volunteer {
        id,
        user_id: UserId::from_uuid(user_id),
        skills,
        availability: parse_stored(&availability, VolunteerRepositoryError::query)?,
        address,
        emergency_contact,
        registered_at,
        version: version_from_db(version),
    })
}

/// Work out why a version-checked update touched no rows.
async fn diagnose_update_failure<C>(
    conn: &mut C,
    id: Uuid,
    expected_version: u32,
) -> VolunteerRepositoryError
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let current = volunteers::table
        .filter(volunteers::id.eq(id))
        .select(VolunteerRow::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(map_diesel_error);

    match current {
        Ok(Some(row)) => VolunteerRepositoryError::version_conflict(
            expected_version,
            version_from_db(row.version),
        ),
        Ok(None) => VolunteerRepositoryError::missing(),
        Err(err) => err,
    }
}

#[async_trait]
impl VolunteerRepository for DieselVolunteerRepository {
    async fn insert(&self, volunteer: &Volunteer) -> Result<(), VolunteerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewVolunteerRow {
            id: volunteer.id,
            user_id: *volunteer.user_id.as_uuid(),
            skills: volunteer.skills.as_deref(),
            availability: volunteer.availability.as_str(),
            address: volunteer.address.as_deref(),
            emergency_contact: volunteer.emergency_contact.as_deref(),
            registered_at: volunteer.registered_at,
            version: version_to_db(volunteer.version),
        };

        diesel::insert_into(volunteers::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_insert_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Volunteer>, VolunteerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = volunteers::table
            .filter(volunteers::id.eq(id))
            .select(VolunteerRow::as_select())
            .first::<VolunteerRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_volunteer).transpose()
    }

    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Volunteer>, VolunteerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = volunteers::table
            .filter(volunteers::user_id.eq(user_id.as_uuid()))
            .select(VolunteerRow::as_select())
            .first::<VolunteerRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_volunteer).transpose()
    }

    async fn list(&self) -> Result<Vec<Volunteer>, VolunteerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<VolunteerRow> = volunteers::table
            .order((volunteers::registered_at.desc(), volunteers::id.desc()))
            .select(VolunteerRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_volunteer).collect()
    }

    async fn update(
        &self,
        volunteer: &Volunteer,
        expected_version: u32,
    ) -> Result<(), VolunteerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = VolunteerUpdate {
            skills: volunteer.skills.as_deref(),
            availability: volunteer.availability.as_str(),
            address: volunteer.address.as_deref(),
            emergency_contact: volunteer.emergency_contact.as_deref(),
            version: version_to_db(volunteer.version),
        };

        let updated_rows = diesel::update(volunteers::table)
            .filter(
                volunteers::id
                    .eq(volunteer.id)
                    .and(volunteers::version.eq(version_to_db(expected_version))),
            )
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated_rows == 0 {
            return Err(diagnose_update_failure(&mut conn, volunteer.id, expected_version).await);
        }
        Ok(())
    }
}
