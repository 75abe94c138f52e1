//! Driving ports for donation use-cases.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Donation, DonationStatus, Error, UserId};

/// Payload for pledging a donation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDonation {
    /// Resource the stock counts against.
    pub resource_id: Uuid,
    /// Number of units pledged; must be positive.
    pub quantity: i32,
    /// Free-form notes from the donor.
    pub notes: Option<String>,
}

/// Domain use-case port for donation mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationsCommand: Send + Sync {
    /// Record a pledge from `caller`, crediting the resource's stock.
    async fn pledge(&self, caller: &UserId, donation: NewDonation) -> Result<Donation, Error>;

    /// Move a donation through its lifecycle.
    async fn update_status(
        &self,
        caller: &UserId,
        id: Uuid,
        status: DonationStatus,
    ) -> Result<Donation, Error>;
}

/// Domain use-case port for donation reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationsQuery: Send + Sync {
    /// Fetch one donation.
    ///
    /// Donors see their own donations; anything else needs the
    /// `manage_donations` capability.
    async fn get(&self, caller: &UserId, id: Uuid) -> Result<Donation, Error>;

    /// List every donation on record, newest first.
    async fn list_all(&self, caller: &UserId) -> Result<Vec<Donation>, Error>;

    /// List the caller's own donations, newest first.
    async fn list_mine(&self, caller: &UserId) -> Result<Vec<Donation>, Error>;
}
