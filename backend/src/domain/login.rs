//! Directory-backed development authenticator.
//!
//! Resolves the login email through the user directory and accepts a single
//! shared development password. Production deployments swap this for a real
//! identity provider behind the same [`LoginService`] port.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{LoginService, UserDirectory, UserDirectoryError};
use crate::domain::{EmailAddress, Error, LoginCredentials, UserId};

/// Password accepted for every directory account in development builds.
pub const DEVELOPMENT_PASSWORD: &str = "Admin123!";

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

fn map_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        other => Error::internal(format!("account lookup failed: {other}")),
    }
}

/// Development [`LoginService`] adapter over the user directory.
#[derive(Clone)]
pub struct DirectoryLoginService<D> {
    directory: Arc<D>,
}

impl<D> DirectoryLoginService<D> {
    /// Create an authenticator over the given directory.
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl<D> LoginService for DirectoryLoginService<D>
where
    D: UserDirectory,
{
    async fn authenticate(&self, credentials: LoginCredentials) -> Result<UserId, Error> {
        // Malformed emails cannot match an account, so they fail the same
        // way a wrong password does.
        let Ok(email) = EmailAddress::new(credentials.email()) else {
            return Err(invalid_credentials());
        };
        let account = self
            .directory
            .find_account_by_email(&email)
            .await
            .map_err(map_directory_error)?
            .ok_or_else(invalid_credentials)?;
        if credentials.password() != DEVELOPMENT_PASSWORD {
            return Err(invalid_credentials());
        }
        Ok(account.id().clone())
    }
}
