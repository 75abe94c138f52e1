//! Reporting domain service.
//!
//! Serves the typed dashboard read models; all counting happens in the
//! reporting repository so a dashboard render is a handful of aggregate
//! queries rather than entity scans.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::permissions::authorize;
use crate::domain::ports::{
    PermissionsQuery, ReportingRepository, ReportingRepositoryError, ReportsQuery, UserDirectory,
    UserDirectoryError,
};
use crate::domain::{AdminDashboard, Error, ReliefOverview, UserId};

/// How many of the newest accounts the dashboard lists.
const RECENT_ACCOUNT_LIMIT: usize = 5;

fn map_repository_error(error: ReportingRepositoryError) -> Error {
    match error {
        ReportingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("reporting repository unavailable: {message}"))
        }
        ReportingRepositoryError::Query { message } => {
            Error::internal(format!("reporting repository error: {message}"))
        }
    }
}

fn map_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        other => Error::internal(format!("account listing failed: {other}")),
    }
}

/// Reporting service implementing the reports driving port.
#[derive(Clone)]
pub struct ReportingService<P, R, D> {
    permissions: Arc<P>,
    repository: Arc<R>,
    directory: Arc<D>,
}

impl<P, R, D> ReportingService<P, R, D> {
    /// Create a service over the permission engine, reporting repository,
    /// and user directory.
    pub fn new(permissions: Arc<P>, repository: Arc<R>, directory: Arc<D>) -> Self {
        Self {
            permissions,
            repository,
            directory,
        }
    }
}

#[async_trait]
impl<P, R, D> ReportsQuery for ReportingService<P, R, D>
where
    P: PermissionsQuery,
    R: ReportingRepository,
    D: UserDirectory,
{
    async fn overview(&self, caller: &UserId) -> Result<ReliefOverview, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.is_resolved(), "view the situation overview")?;
        self.repository
            .overview_counts()
            .await
            .map_err(map_repository_error)
    }

    async fn admin_dashboard(&self, caller: &UserId) -> Result<AdminDashboard, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.view_reports, "view the dashboard")?;

        let counts = self
            .repository
            .admin_counts()
            .await
            .map_err(map_repository_error)?;
        let mut recent_accounts = self
            .directory
            .list_accounts()
            .await
            .map_err(map_directory_error)?;
        recent_accounts.truncate(RECENT_ACCOUNT_LIMIT);
        Ok(AdminDashboard::from_parts(counts, recent_accounts))
    }
}

#[cfg(test)]
#[path = "reporting_service_tests.rs"]
mod tests;
