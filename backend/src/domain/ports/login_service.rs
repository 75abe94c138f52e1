//! Driving port for credential checks.
//!
//! Inbound adapters authenticate through this trait without importing the
//! backing identity store, so handler tests can swap in a stub and stay
//! deterministic. The development implementation resolves the email against
//! the user directory and accepts a shared development password; a real
//! identity provider would implement the same trait.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Validates sign-in credentials for the session layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check the credentials and return the account they belong to.
    ///
    /// Takes ownership so the zeroising password wrapper drops as soon as
    /// the attempt finishes.
    async fn authenticate(&self, credentials: LoginCredentials) -> Result<UserId, Error>;
}
