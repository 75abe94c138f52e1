//! Port for donation persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Donation, DonationStatus, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by donation repository adapters.
    pub enum DonationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "donation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "donation repository query failed: {message}",
        /// The donation does not exist.
        Missing => "donation not found",
        /// The resource being donated to does not exist.
        MissingResource => "donated resource not found",
    }
}

/// Port for donation storage.
///
/// Recording a donation and crediting the resource's stock happen in one
/// transaction inside the adapter; the service never sees a state where the
/// donation exists but the stock was not credited.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationRepository: Send + Sync {
    /// Persist a donation and credit the resource's stock atomically.
    async fn record(&self, donation: &Donation) -> Result<(), DonationRepositoryError>;

    /// Fetch a donation by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Donation>, DonationRepositoryError>;

    /// List all donations, newest first.
    async fn list(&self) -> Result<Vec<Donation>, DonationRepositoryError>;

    /// List one donor's donations, newest first.
    async fn list_for_donor(
        &self,
        donor_id: &UserId,
    ) -> Result<Vec<Donation>, DonationRepositoryError>;

    /// Update a donation's lifecycle status and return the stored row.
    async fn set_status(
        &self,
        id: Uuid,
        status: DonationStatus,
    ) -> Result<Donation, DonationRepositoryError>;
}
