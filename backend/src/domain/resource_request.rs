//! Resource request data model.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::enums::status_enum;
use crate::domain::user::UserId;

status_enum! {
    /// How urgently requested stock is needed.
    UrgencyLevel, ParseUrgencyLevelError, "urgency level" {
        Low => "Low",
        Normal => "Normal",
        High => "High",
        Critical => "Critical",
    }
}

status_enum! {
    /// Lifecycle state of a resource request.
    RequestStatus, ParseRequestStatusError, "request status" {
        /// Awaiting review.
        Pending => "Pending",
        /// Approved but stock has not moved yet.
        Approved => "Approved",
        /// Stock has been debited and despatched.
        Fulfilled => "Fulfilled",
    }
}

/// A request for stock to be sent to a disaster.
///
/// ## Invariants
/// - `quantity_requested` is strictly positive.
/// - Fulfilment atomically debits the referenced resource's stock; a
///   request never fulfils partially.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRequest {
    /// Stable identifier.
    pub id: Uuid,
    /// Disaster the stock is destined for.
    pub disaster_id: Uuid,
    /// Resource being requested.
    pub resource_id: Uuid,
    /// Units requested.
    pub quantity_requested: i32,
    /// How urgently the stock is needed.
    pub urgency: UrgencyLevel,
    /// Lifecycle state.
    pub status: RequestStatus,
    /// Account that opened the request.
    pub requested_by: UserId,
    /// When the request was opened.
    pub requested_at: DateTime<Utc>,
    /// Date the stock is needed by, when one exists.
    pub required_by: Option<DateTime<Utc>>,
}

impl ResourceRequest {
    /// Whether the request is still in a state that can be fulfilled.
    #[must_use]
    pub fn is_fulfillable(&self) -> bool {
        matches!(self.status, RequestStatus::Pending | RequestStatus::Approved)
    }
}

/// Outcome of attempting to fulfil a request.
///
/// Insufficient stock is an expected answer rather than an error: the
/// caller is told how far short the inventory is and nothing changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Fulfilment {
    /// Stock was debited and the request is now fulfilled.
    Completed(ResourceRequest),
    /// The inventory could not cover the request; nothing changed.
    InsufficientStock {
        /// Units currently in stock.
        available: i32,
        /// Units the request needs.
        requested: i32,
    },
}
