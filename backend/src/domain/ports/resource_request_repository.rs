//! Port for resource request persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Fulfilment, RequestStatus, ResourceRequest};

use super::define_port_error;

define_port_error! {
    /// Errors raised by resource request repository adapters.
    pub enum ResourceRequestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "resource request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "resource request repository query failed: {message}",
        /// The request does not exist.
        Missing => "resource request not found",
        /// The referenced resource does not exist.
        MissingResource => "requested resource not found",
        /// The referenced disaster does not exist.
        MissingDisaster => "requested disaster not found",
        /// The request is no longer in a fulfillable state.
        NotFulfillable { status: String } =>
            "request cannot be fulfilled from status {status}",
    }
}

/// Port for resource request storage.
///
/// Fulfilment re-reads the request and the resource inside one transaction:
/// the stock debit and the status flip to `Fulfilled` either both happen or
/// neither does, and a shortfall is reported as
/// [`Fulfilment::InsufficientStock`] without touching anything.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceRequestRepository: Send + Sync {
    /// Persist a new request.
    async fn insert(
        &self,
        request: &ResourceRequest,
    ) -> Result<(), ResourceRequestRepositoryError>;

    /// Fetch a request by id.
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ResourceRequest>, ResourceRequestRepositoryError>;

    /// List all requests, newest first.
    async fn list(&self) -> Result<Vec<ResourceRequest>, ResourceRequestRepositoryError>;

    /// Attempt to fulfil a request by debiting the resource's stock.
    ///
    /// Fails with [`ResourceRequestRepositoryError::NotFulfillable`] when
    /// the request has already been fulfilled.
    async fn fulfil(&self, id: Uuid) -> Result<Fulfilment, ResourceRequestRepositoryError>;

    /// Update a request's review status and return the stored row.
    async fn set_status(
        &self,
        id: Uuid,
        status: RequestStatus,
    ) -> Result<ResourceRequest, ResourceRequestRepositoryError>;

    /// Delete a request.
    async fn delete(&self, id: Uuid) -> Result<(), ResourceRequestRepositoryError>;
}
