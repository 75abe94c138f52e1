//! Donation data model.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::enums::status_enum;
use crate::domain::user::UserId;

/// Maximum accepted length for donation notes.
pub const DONATION_NOTES_MAX: usize = 1000;

status_enum! {
    /// Lifecycle state of a donation.
    DonationStatus, ParseDonationStatusError, "donation status" {
        /// Pledged but not yet handed over.
        Pending => "Pending",
        /// Stock has been received into the inventory.
        Received => "Received",
        /// Stock has been passed on to the field.
        Distributed => "Distributed",
    }
}

/// A pledge of stock against a resource.
///
/// ## Invariants
/// - `quantity` is strictly positive.
/// - Recording a donation atomically increments the target resource's
///   stock by `quantity`.
#[derive(Debug, Clone, PartialEq)]
pub struct Donation {
    /// Stable identifier.
    pub id: Uuid,
    /// Account that pledged the donation.
    pub donor_id: UserId,
    /// Resource the stock counts against.
    pub resource_id: Uuid,
    /// Number of units pledged.
    pub quantity: i32,
    /// When the pledge was recorded.
    pub donated_at: DateTime<Utc>,
    /// Lifecycle state.
    pub status: DonationStatus,
    /// Free-form notes from the donor.
    pub notes: Option<String>,
}
