//! Aggregated reporting read models.
//!
//! These are assembled by the reporting service; nothing here is persisted
//! directly.

use crate::domain::user::AccountWithRoles;

/// Headline counts for the situation overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReliefOverview {
    /// All disasters on record.
    pub disasters: i64,
    /// Disasters currently active.
    pub active_disasters: i64,
    /// Registered volunteer profiles.
    pub volunteers: i64,
    /// Missions open or in progress.
    pub active_missions: i64,
    /// Units of stock pledged through donations.
    pub donated_units: i64,
}

/// Count block backing the administrator dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdminCounts {
    /// Directory accounts.
    pub accounts: i64,
    /// All disasters on record.
    pub disasters: i64,
    /// Registered volunteer profiles.
    pub volunteers: i64,
    /// Donations recorded.
    pub donations: i64,
    /// Missions on record.
    pub missions: i64,
    /// Resource requests on record.
    pub resource_requests: i64,
    /// Resources at or below their stock threshold.
    pub low_stock_resources: i64,
}

/// Administrator dashboard payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminDashboard {
    /// Directory accounts.
    pub accounts: i64,
    /// All disasters on record.
    pub disasters: i64,
    /// Registered volunteer profiles.
    pub volunteers: i64,
    /// Donations recorded.
    pub donations: i64,
    /// Missions on record.
    pub missions: i64,
    /// Resource requests on record.
    pub resource_requests: i64,
    /// Resources at or below their stock threshold.
    pub low_stock_resources: i64,
    /// Most recently created accounts with their roles, newest first.
    pub recent_accounts: Vec<AccountWithRoles>,
}

impl AdminDashboard {
    /// Combine the stored counts with the latest accounts.
    #[must_use]
    pub fn from_parts(counts: AdminCounts, recent_accounts: Vec<AccountWithRoles>) -> Self {
        Self {
            accounts: counts.accounts,
            disasters: counts.disasters,
            volunteers: counts.volunteers,
            donations: counts.donations,
            missions: counts.missions,
            resource_requests: counts.resource_requests,
            low_stock_resources: counts.low_stock_resources,
            recent_accounts,
        }
    }
}
