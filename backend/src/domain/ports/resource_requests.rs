//! Driving ports for resource request use-cases.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Error, Fulfilment, RequestStatus, ResourceRequest, UrgencyLevel, UserId};

/// Payload for opening a resource request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResourceRequest {
    /// Disaster the stock is destined for.
    pub disaster_id: Uuid,
    /// Resource being requested.
    pub resource_id: Uuid,
    /// Units requested; must be positive.
    pub quantity_requested: i32,
    /// How urgently the stock is needed.
    pub urgency: UrgencyLevel,
    /// Date the stock is needed by, when one exists.
    pub required_by: Option<DateTime<Utc>>,
}

/// Domain use-case port for resource request mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceRequestsCommand: Send + Sync {
    /// Open a request for stock against a disaster.
    async fn open(
        &self,
        caller: &UserId,
        request: NewResourceRequest,
    ) -> Result<ResourceRequest, Error>;

    /// Attempt to fulfil a request.
    ///
    /// A shortfall is a normal answer, reported as
    /// [`Fulfilment::InsufficientStock`] with the stock left untouched.
    async fn fulfil(&self, caller: &UserId, id: Uuid) -> Result<Fulfilment, Error>;

    /// Move a request through review without touching stock.
    async fn update_status(
        &self,
        caller: &UserId,
        id: Uuid,
        status: RequestStatus,
    ) -> Result<ResourceRequest, Error>;

    /// Withdraw a request outright.
    async fn withdraw(&self, caller: &UserId, id: Uuid) -> Result<(), Error>;
}

/// Domain use-case port for resource request reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceRequestsQuery: Send + Sync {
    /// Fetch one request.
    async fn get(&self, caller: &UserId, id: Uuid) -> Result<ResourceRequest, Error>;

    /// List every request on record, newest first.
    async fn list(&self, caller: &UserId) -> Result<Vec<ResourceRequest>, Error>;
}
