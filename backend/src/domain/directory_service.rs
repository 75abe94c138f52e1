//! Account administration domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::permissions::authorize;
use crate::domain::ports::{
    PermissionsQuery, UserAdministration, UserDirectory, UserDirectoryError,
};
use crate::domain::{AccountWithRoles, Error, RoleSet, UserId};

fn map_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Query { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
        UserDirectoryError::Missing => Error::not_found("account not found"),
        UserDirectoryError::HasDependants { details } => {
            Error::conflict(format!("account has dependent records: {details}"))
        }
    }
}

/// Administration service over the user directory.
#[derive(Clone)]
pub struct DirectoryService<P, D> {
    permissions: Arc<P>,
    directory: Arc<D>,
}

impl<P, D> DirectoryService<P, D> {
    /// Create a service over the permission engine and directory.
    pub fn new(permissions: Arc<P>, directory: Arc<D>) -> Self {
        Self {
            permissions,
            directory,
        }
    }
}

impl<P, D> DirectoryService<P, D>
where
    P: PermissionsQuery,
    D: UserDirectory,
{
    async fn authorize_administration(&self, caller: &UserId) -> Result<(), Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.manage_users, "administer accounts")
    }
}

#[async_trait]
impl<P, D> UserAdministration for DirectoryService<P, D>
where
    P: PermissionsQuery,
    D: UserDirectory,
{
    async fn list_accounts(&self, caller: &UserId) -> Result<Vec<AccountWithRoles>, Error> {
        self.authorize_administration(caller).await?;
        self.directory
            .list_accounts()
            .await
            .map_err(map_directory_error)
    }

    async fn update_roles(
        &self,
        caller: &UserId,
        account_id: &UserId,
        roles: RoleSet,
    ) -> Result<AccountWithRoles, Error> {
        self.authorize_administration(caller).await?;

        let account = self
            .directory
            .find_account(account_id)
            .await
            .map_err(map_directory_error)?
            .ok_or_else(|| Error::not_found("account not found"))?;
        self.directory
            .replace_roles(account_id, &roles)
            .await
            .map_err(map_directory_error)?;
        Ok(AccountWithRoles { account, roles })
    }

    async fn delete_account(&self, caller: &UserId, account_id: &UserId) -> Result<(), Error> {
        self.authorize_administration(caller).await?;

        if account_id == caller {
            return Err(Error::conflict("cannot delete the signed-in account"));
        }
        self.directory
            .delete_account(account_id)
            .await
            .map_err(map_directory_error)
    }
}

#[cfg(test)]
#[path = "directory_service_tests.rs"]
mod tests;
