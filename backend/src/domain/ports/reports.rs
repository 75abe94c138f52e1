//! Driving port for reporting use-cases.

use async_trait::async_trait;

use crate::domain::{AdminDashboard, Error, ReliefOverview, UserId};

/// Domain use-case port for aggregate reports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportsQuery: Send + Sync {
    /// Situation overview counts, open to any signed-in account.
    async fn overview(&self, caller: &UserId) -> Result<ReliefOverview, Error>;

    /// Administrative dashboard with counts and the latest accounts.
    ///
    /// Requires `view_reports`.
    async fn admin_dashboard(&self, caller: &UserId) -> Result<AdminDashboard, Error>;
}
