//! Driving port for account administration use-cases.

use async_trait::async_trait;

use crate::domain::{AccountWithRoles, Error, RoleSet, UserId};

/// Domain use-case port for managing directory accounts.
///
/// Every operation needs the `manage_users` capability, which only
/// administrators hold.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAdministration: Send + Sync {
    /// List every account with its roles, newest first.
    async fn list_accounts(&self, caller: &UserId) -> Result<Vec<AccountWithRoles>, Error>;

    /// Replace an account's role grants.
    async fn update_roles(
        &self,
        caller: &UserId,
        account_id: &UserId,
        roles: RoleSet,
    ) -> Result<AccountWithRoles, Error>;

    /// Delete an account.
    ///
    /// Deleting your own account is a conflict; another administrator has
    /// to do it.
    async fn delete_account(&self, caller: &UserId, account_id: &UserId) -> Result<(), Error>;
}
