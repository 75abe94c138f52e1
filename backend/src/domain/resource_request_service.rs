//! Resource request domain service.
//!
//! Requests move stock towards disasters. Every operation sits behind the
//! coordinating `manage_donations` gate; fulfilment delegates the
//! stock-and-status transaction to the repository so the debit and the flip
//! to `Fulfilled` cannot come apart.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::permissions::authorize;
use crate::domain::ports::{
    NewResourceRequest, PermissionsQuery, ResourceRequestRepository,
    ResourceRequestRepositoryError, ResourceRequestsCommand, ResourceRequestsQuery,
};
use crate::domain::validation::positive_quantity;
use crate::domain::{Error, Fulfilment, RequestStatus, ResourceRequest, UserId};

fn map_repository_error(error: ResourceRequestRepositoryError) -> Error {
    match error {
        ResourceRequestRepositoryError::Connection { message } => Error::service_unavailable(
            format!("resource request repository unavailable: {message}"),
        ),
        ResourceRequestRepositoryError::Query { message } => {
            Error::internal(format!("resource request repository error: {message}"))
        }
        ResourceRequestRepositoryError::Missing => Error::not_found("resource request not found"),
        ResourceRequestRepositoryError::MissingResource => {
            Error::not_found("requested resource not found")
        }
        ResourceRequestRepositoryError::MissingDisaster => {
            Error::not_found("requested disaster not found")
        }
        ResourceRequestRepositoryError::NotFulfillable { status } => {
            Error::conflict(format!("request cannot be fulfilled from status {status}"))
        }
    }
}

/// Resource request service implementing the request driving ports.
#[derive(Clone)]
pub struct ResourceRequestService<P, R> {
    permissions: Arc<P>,
    repository: Arc<R>,
}

impl<P, R> ResourceRequestService<P, R> {
    /// Create a service over the permission engine and repository.
    pub fn new(permissions: Arc<P>, repository: Arc<R>) -> Self {
        Self {
            permissions,
            repository,
        }
    }
}

impl<P, R> ResourceRequestService<P, R>
where
    P: PermissionsQuery,
    R: ResourceRequestRepository,
{
    async fn authorize_coordination(&self, caller: &UserId) -> Result<(), Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.manage_donations, "coordinate resource requests")
    }
}

#[async_trait]
impl<P, R> ResourceRequestsCommand for ResourceRequestService<P, R>
where
    P: PermissionsQuery,
    R: ResourceRequestRepository,
{
    async fn open(
        &self,
        caller: &UserId,
        request: NewResourceRequest,
    ) -> Result<ResourceRequest, Error> {
        self.authorize_coordination(caller).await?;

        positive_quantity("quantityRequested", request.quantity_requested)?;

        let request = ResourceRequest {
            id: Uuid::new_v4(),
            disaster_id: request.disaster_id,
            resource_id: request.resource_id,
            quantity_requested: request.quantity_requested,
            urgency: request.urgency,
            status: RequestStatus::Pending,
            requested_by: caller.clone(),
            requested_at: Utc::now(),
            required_by: request.required_by,
        };
        self.repository
            .insert(&request)
            .await
            .map_err(map_repository_error)?;
        Ok(request)
    }

    async fn fulfil(&self, caller: &UserId, id: Uuid) -> Result<Fulfilment, Error> {
        self.authorize_coordination(caller).await?;

        self.repository
            .fulfil(id)
            .await
            .map_err(map_repository_error)
    }

    async fn update_status(
        &self,
        caller: &UserId,
        id: Uuid,
        status: RequestStatus,
    ) -> Result<ResourceRequest, Error> {
        self.authorize_coordination(caller).await?;

        // Fulfilment debits stock, so it cannot be reached by a plain
        // status write.
        if status == RequestStatus::Fulfilled {
            return Err(Error::invalid_request(
                "requests are fulfilled through the fulfil operation",
            ));
        }
        self.repository
            .set_status(id, status)
            .await
            .map_err(map_repository_error)
    }

    async fn withdraw(&self, caller: &UserId, id: Uuid) -> Result<(), Error> {
        self.authorize_coordination(caller).await?;

        self.repository
            .delete(id)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<P, R> ResourceRequestsQuery for ResourceRequestService<P, R>
where
    P: PermissionsQuery,
    R: ResourceRequestRepository,
{
    async fn get(&self, caller: &UserId, id: Uuid) -> Result<ResourceRequest, Error> {
        self.authorize_coordination(caller).await?;
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("resource request not found"))
    }

    async fn list(&self, caller: &UserId) -> Result<Vec<ResourceRequest>, Error> {
        self.authorize_coordination(caller).await?;
        self.repository.list().await.map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "resource_request_service_tests.rs"]
mod tests;
