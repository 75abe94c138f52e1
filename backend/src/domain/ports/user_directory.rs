//! Port for the user directory.
//!
//! The directory owns accounts and role grants. The permission engine reads
//! it on every request, and user administration writes through it, so the
//! trait covers both lookup and management operations.

use async_trait::async_trait;

use crate::domain::{AccountWithRoles, EmailAddress, RoleSet, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } =>
            "user directory connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user directory query failed: {message}",
        /// The account does not exist.
        Missing => "account not found",
        /// The account still owns records that block deletion.
        HasDependants { details: String } =>
            "account has dependent records: {details}",
    }
}

/// Port for account and role lookups plus account administration.
///
/// # Unknown accounts
///
/// Lookup methods return `Ok(None)` for unknown accounts; only transport or
/// query failures surface as errors. The permission engine depends on this
/// to treat an unresolved identity as "no capabilities" rather than a fault.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch an account by id.
    async fn find_account(
        &self,
        id: &UserId,
    ) -> Result<Option<UserAccount>, UserDirectoryError>;

    /// Fetch an account by its login email.
    async fn find_account_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserDirectoryError>;

    /// Fetch the roles granted to an account.
    ///
    /// Returns `None` when the account itself does not exist; a known
    /// account with no grants yields `Some` of an empty set.
    async fn roles_for(&self, id: &UserId) -> Result<Option<RoleSet>, UserDirectoryError>;

    /// List every account with its roles, newest account first.
    async fn list_accounts(&self) -> Result<Vec<AccountWithRoles>, UserDirectoryError>;

    /// Replace an account's role grants with the supplied set.
    async fn replace_roles(
        &self,
        id: &UserId,
        roles: &RoleSet,
    ) -> Result<(), UserDirectoryError>;

    /// Delete an account and its role grants.
    ///
    /// Fails with [`UserDirectoryError::HasDependants`] when other records
    /// still reference the account.
    async fn delete_account(&self, id: &UserId) -> Result<(), UserDirectoryError>;
}
