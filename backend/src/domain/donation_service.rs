//! Donation domain service.
//!
//! Pledging credits the target resource's stock in the same repository
//! transaction, so a recorded donation always has its units counted.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::permissions::authorize;
use crate::domain::ports::{
    DonationRepository, DonationRepositoryError, DonationsCommand, DonationsQuery, NewDonation,
    PermissionsQuery,
};
use crate::domain::validation::{optional_text, positive_quantity};
use crate::domain::{DONATION_NOTES_MAX, Donation, DonationStatus, Error, UserId};

fn map_repository_error(error: DonationRepositoryError) -> Error {
    match error {
        DonationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("donation repository unavailable: {message}"))
        }
        DonationRepositoryError::Query { message } => {
            Error::internal(format!("donation repository error: {message}"))
        }
        DonationRepositoryError::Missing => Error::not_found("donation not found"),
        DonationRepositoryError::MissingResource => Error::not_found("donated resource not found"),
    }
}

/// Donation service implementing the donation driving ports.
#[derive(Clone)]
pub struct DonationService<P, R> {
    permissions: Arc<P>,
    repository: Arc<R>,
}

impl<P, R> DonationService<P, R> {
    /// Create a service over the permission engine and repository.
    pub fn new(permissions: Arc<P>, repository: Arc<R>) -> Self {
        Self {
            permissions,
            repository,
        }
    }
}

#[async_trait]
impl<P, R> DonationsCommand for DonationService<P, R>
where
    P: PermissionsQuery,
    R: DonationRepository,
{
    async fn pledge(&self, caller: &UserId, donation: NewDonation) -> Result<Donation, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.create_donations, "pledge donations")?;

        positive_quantity("quantity", donation.quantity)?;
        let notes = optional_text("notes", donation.notes, DONATION_NOTES_MAX)?;

        let donation = Donation {
            id: Uuid::new_v4(),
            donor_id: caller.clone(),
            resource_id: donation.resource_id,
            quantity: donation.quantity,
            donated_at: Utc::now(),
            status: DonationStatus::Pending,
            notes,
        };
        self.repository
            .record(&donation)
            .await
            .map_err(map_repository_error)?;
        Ok(donation)
    }

    async fn update_status(
        &self,
        caller: &UserId,
        id: Uuid,
        status: DonationStatus,
    ) -> Result<Donation, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.manage_donations, "manage donations")?;

        self.repository
            .set_status(id, status)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<P, R> DonationsQuery for DonationService<P, R>
where
    P: PermissionsQuery,
    R: DonationRepository,
{
    async fn get(&self, caller: &UserId, id: Uuid) -> Result<Donation, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        let donation = self
            .repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("donation not found"))?;
        let donor = donation.donor_id == *caller;
        authorize(
            donor || permissions.manage_donations,
            "view this donation",
        )?;
        Ok(donation)
    }

    async fn list_all(&self, caller: &UserId) -> Result<Vec<Donation>, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.manage_donations, "list all donations")?;
        self.repository.list().await.map_err(map_repository_error)
    }

    async fn list_mine(&self, caller: &UserId) -> Result<Vec<Donation>, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.view_donations, "view donations")?;
        self.repository
            .list_for_donor(caller)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "donation_service_tests.rs"]
mod tests;
