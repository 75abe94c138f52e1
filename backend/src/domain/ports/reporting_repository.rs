//! Port for aggregated reporting reads.

use async_trait::async_trait;

use crate::domain::{AdminCounts, ReliefOverview};

use super::define_port_error;

define_port_error! {
    /// Errors raised by reporting repository adapters.
    pub enum ReportingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "reporting repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "reporting repository query failed: {message}",
    }
}

/// Port for cross-entity count queries.
///
/// These are read-only aggregations; writes always go through the entity
/// repositories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportingRepository: Send + Sync {
    /// Counts for the situation overview.
    async fn overview_counts(&self) -> Result<ReliefOverview, ReportingRepositoryError>;

    /// Counts for the administrator dashboard.
    async fn admin_counts(&self) -> Result<AdminCounts, ReportingRepositoryError>;
}
