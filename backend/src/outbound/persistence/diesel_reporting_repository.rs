//! PostgreSQL-backed `ReportingRepository` implementation using Diesel ORM.
//!
//! Read-only aggregations over the relief tables. Counts run sequentially on
//! one pooled connection; the dashboards tolerate counts from adjacent
//! moments, so nothing here takes a transaction.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ReportingRepository, ReportingRepositoryError};
use crate::domain::{AdminCounts, DisasterStatus, MissionStatus, ReliefOverview};

use super::diesel_support::{map_checkout_error, map_statement_error};
use super::pool::{DbPool, PoolError};
use super::schema::{
    disasters, donations, missions, resource_requests, resources, users, volunteers,
};

/// Diesel-backed implementation of the reporting repository port.
#[derive(Clone)]
pub struct DieselReportingRepository {
    pool: DbPool,
}

impl DieselReportingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to reporting repository errors.
fn map_pool_error(error: PoolError) -> ReportingRepositoryError {
    map_checkout_error(error, ReportingRepositoryError::connection)
}

/// Map Diesel errors to reporting repository errors.
fn map_diesel_error(error: diesel::result::Error) -> ReportingRepositoryError {
    map_statement_error(
        error,
        ReportingRepositoryError::query,
        ReportingRepositoryError::connection,
    )
}

#[async_trait]
impl ReportingRepository for DieselReportingRepository {
    async fn overview_counts(&self) -> Result<ReliefOverview, ReportingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let disaster_count: i64 = disasters::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let active_disasters: i64 = disasters::table
            .filter(disasters::status.eq(DisasterStatus::Active.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let volunteer_count: i64 = volunteers::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let active_missions: i64 = missions::table
            .filter(missions::status.eq_any([
                MissionStatus::Open.as_str(),
                MissionStatus::InProgress.as_str(),
            ]))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        // Int4 sums surface as a nullable BigInt; no donations means zero.
        let donated_units: Option<i64> = donations::table
            .select(diesel::dsl::sum(donations::quantity))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(ReliefOverview {
            disasters: disaster_count,
            active_disasters,
            volunteers: volunteer_count,
            active_missions,
            donated_units: donated_units.unwrap_or(0),
        })
    }

    async fn admin_counts(&self) -> Result<AdminCounts, ReportingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let account_count: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let disaster_count: i64 = disasters::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let volunteer_count: i64 = volunteers::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let donation_count: i64 = donations::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mission_count: i64 = missions::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let request_count: i64 = resource_requests::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let low_stock_count: i64 = resources::table
            .filter(resources::current_quantity.le(resources::threshold_quantity))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(AdminCounts {
            accounts: account_count,
            disasters: disaster_count,
            volunteers: volunteer_count,
            donations: donation_count,
            missions: mission_count,
            resource_requests: request_count,
            low_stock_resources: low_stock_count,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this adapter's error mapping.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let pool_err = PoolError::checkout("connection refused");
        let repo_err = map_pool_error(pool_err);

        assert!(matches!(
            repo_err,
            ReportingRepositoryError::Connection { .. }
        ));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let diesel_err = diesel::result::Error::NotFound;
        let repo_err = map_diesel_error(diesel_err);

        assert!(matches!(repo_err, ReportingRepositoryError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }
}
