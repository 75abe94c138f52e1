//! Driving port for capability resolution.
//!
//! Every entity service gates its operations on the flags returned here.
//! Keeping resolution behind a port lets service tests pin down exactly
//! which capabilities a scenario grants.

use async_trait::async_trait;

use crate::domain::{Error, Permissions, UserId};

/// Domain use-case port for resolving a caller's capabilities.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionsQuery: Send + Sync {
    /// Resolve the capability set for `subject`.
    ///
    /// `resource_owner` names the owner of the record under consideration,
    /// when the operation concerns one; ownership-scoped flags such as
    /// `edit_own_disasters` are true only when it matches the subject.
    ///
    /// Unknown subjects resolve to the all-false set rather than an error.
    async fn permissions_for(
        &self,
        subject: &UserId,
        resource_owner: Option<UserId>,
    ) -> Result<Permissions, Error>;
}
