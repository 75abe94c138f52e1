//! PostgreSQL-backed `DonationRepository` implementation using Diesel ORM.
//!
//! Recording a donation credits the target resource's stock in the same
//! transaction, so the donation row and the stock level never disagree.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{DonationRepository, DonationRepositoryError};
use crate::domain::{Donation, DonationStatus, UserId};

use super::diesel_support::{map_checkout_error, map_statement_error, parse_stored};
use super::models::{DonationRow, NewDonationRow};
use super::pool::{DbPool, PoolError};
use super::schema::{donations, resources};

/// Diesel-backed implementation of the donation repository port.
#[derive(Clone)]
pub struct DieselDonationRepository {
    pool: DbPool,
}

impl DieselDonationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to donation repository errors.
fn map_pool_error(error: PoolError) -> DonationRepositoryError {
    map_checkout_error(error, DonationRepositoryError::connection)
}

/// Map Diesel errors to donation repository errors.
fn map_diesel_error(error: diesel::result::Error) -> DonationRepositoryError {
    map_statement_error(
        error,
        DonationRepositoryError::query,
        DonationRepositoryError::connection,
    )
}

/// Convert a database row into a domain donation.
fn row_to_donation(row: DonationRow) -> Result<Donation, DonationRepositoryError> {
    let DonationRow {
        id,
        donor_id,
        resource_id,
        quantity,
        donated_at,
        status,
        notes,
    } = row;

    Ok(Donation {
        id,
        donor_id: UserId::from_uuid(donor_id),
        resource_id,
        quantity,
        donated_at,
        status: parse_stored(&status, DonationRepositoryError::query)?,
        notes,
    })
}

/// What recording a donation found inside its transaction.
enum RecordOutcome {
    Recorded,
    MissingResource,
}

#[async_trait]
impl DonationRepository for DieselDonationRepository {
    async fn record(&self, donation: &Donation) -> Result<(), DonationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewDonationRow {
            id: donation.id,
            donor_id: *donation.donor_id.as_uuid(),
            resource_id: donation.resource_id,
            quantity: donation.quantity,
            donated_at: donation.donated_at,
            status: donation.status.as_str(),
            notes: donation.notes.as_deref(),
        };

        let outcome = conn
            .transaction(|conn| {
                async move {
                    // The credit doubles as the existence check: zero rows
                    // means the resource is gone and nothing was written.
                    let credited_rows = diesel::update(
                        resources::table.filter(resources::id.eq(new_row.resource_id)),
                    )
                    .set(
                        resources::current_quantity
                            .eq(resources::current_quantity + new_row.quantity),
                    )
                    .execute(conn)
                    .await?;

                    if credited_rows == 0 {
                        return Ok(RecordOutcome::MissingResource);
                    }

                    diesel::insert_into(donations::table)
                        .values(&new_row)
                        .execute(conn)
                        .await?;

                    Ok(RecordOutcome::Recorded)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match outcome {
            RecordOutcome::Recorded => Ok(()),
            RecordOutcome::MissingResource => Err(DonationRepositoryError::missing_resource()),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Donation>, DonationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = donations::table
            .filter(donations::id.eq(id))
            .select(DonationRow::as_select())
            .first::<DonationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_donation).transpose()
    }

    async fn list(&self) -> Result<Vec<Donation>, DonationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DonationRow> = donations::table
            .order((donations::donated_at.desc(), donations::id.desc()))
            .select(DonationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_donation).collect()
    }

    async fn list_for_donor(
        &self,
        donor_id: &UserId,
    ) -> Result<Vec<Donation>, DonationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DonationRow> = donations::table
            .filter(donations::donor_id.eq(donor_id.as_uuid()))
            .order((donations::donated_at.desc(), donations::id.desc()))
            .select(DonationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_donation).collect()
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: DonationStatus,
    ) -> Result<Donation, DonationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated_rows = diesel::update(donations::table.filter(donations::id.eq(id)))
            .set(donations::status.eq(status.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if updated_rows == 0 {
            return Err(DonationRepositoryError::missing());
        }

        let row = donations::table
            .filter(donations::id.eq(id))
            .select(DonationRow::as_select())
            .first::<DonationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => row_to_donation(row),
            None => Err(DonationRepositoryError::missing()),
        }
    }
}
