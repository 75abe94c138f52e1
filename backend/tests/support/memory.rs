//! In-memory persistence fakes for the HTTP integration suites.
//!
//! One [`ReliefStore`] stands in for the whole database: every driven port
//! is implemented over the same mutex-guarded collections, so the
//! cross-entity contracts the SQL adapters promise (stock credits on
//! donation, availability flips on assignment, dependant-guarded deletes)
//! stay observable through the API.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use backend::domain::ports::{
    AssignmentRepository, AssignmentRepositoryError, DisasterRepository, DisasterRepositoryError,
    DonationRepository, DonationRepositoryError, MissionRepository, MissionRepositoryError,
    ReportingRepository, ReportingRepositoryError, ResourceRepository, ResourceRepositoryError,
    ResourceRequestRepository, ResourceRequestRepositoryError, UserDirectory, UserDirectoryError,
    VolunteerRepository, VolunteerRepositoryError,
};
use backend::domain::{
    AccountWithRoles, AdminCounts, Assignment, AssignmentStatus, AvailabilityStatus, Disaster,
    DisasterStatus, Donation, DonationStatus, EmailAddress, Fulfilment, Mission, MissionStatus,
    ReliefOverview, RequestStatus, Resource, ResourceCategory, ResourceRequest, RoleSet,
    UserAccount, UserId, Volunteer,
};

/// Every persisted collection behind one fake database.
#[derive(Default)]
pub struct ReliefStore {
    accounts: Mutex<Vec<AccountWithRoles>>,
    disasters: Mutex<Vec<Disaster>>,
    volunteers: Mutex<Vec<Volunteer>>,
    donations: Mutex<Vec<Donation>>,
    assignments: Mutex<Vec<Assignment>>,
    missions: Mutex<Vec<Mission>>,
    categories: Mutex<Vec<ResourceCategory>>,
    resources: Mutex<Vec<Resource>>,
    requests: Mutex<Vec<ResourceRequest>>,
}

impl ReliefStore {
    /// Seed a directory account with its role grants.
    ///
    /// Accounts have no HTTP write path; the directory is provisioned out
    /// of band, so tests build their cast here.
    pub fn seed_account(&self, account: UserAccount, roles: RoleSet) {
        self.accounts
            .lock()
            .expect("accounts lock")
            .push(AccountWithRoles { account, roles });
    }
}

fn availability_for(status: AssignmentStatus) -> AvailabilityStatus {
    match status {
        AssignmentStatus::Assigned => AvailabilityStatus::Assigned,
        AssignmentStatus::Completed | AssignmentStatus::Cancelled => AvailabilityStatus::Available,
    }
}

#[async_trait]
impl UserDirectory for ReliefStore {
    async fn find_account(&self, id: &UserId) -> Result<Option<UserAccount>, UserDirectoryError> {
        let accounts = self.accounts.lock().expect("accounts lock");
        Ok(accounts
            .iter()
            .find(|entry| entry.account.id() == id)
            .map(|entry| entry.account.clone()))
    }

    async fn find_account_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserDirectoryError> {
        let accounts = self.accounts.lock().expect("accounts lock");
        Ok(accounts
            .iter()
            .find(|entry| entry.account.email() == email)
            .map(|entry| entry.account.clone()))
    }

    async fn roles_for(&self, id: &UserId) -> Result<Option<RoleSet>, UserDirectoryError> {
        let accounts = self.accounts.lock().expect("accounts lock");
        Ok(accounts
            .iter()
            .find(|entry| entry.account.id() == id)
            .map(|entry| entry.roles.clone()))
    }

    async fn list_accounts(&self) -> Result<Vec<AccountWithRoles>, UserDirectoryError> {
        let mut entries = self.accounts.lock().expect("accounts lock").clone();
        entries.sort_by(|a, b| {
            (b.account.created_at(), b.account.id())
                .cmp(&(a.account.created_at(), a.account.id()))
        });
        Ok(entries)
    }

    async fn replace_roles(
        &self,
        id: &UserId,
        roles: &RoleSet,
    ) -> Result<(), UserDirectoryError> {
        let mut accounts = self.accounts.lock().expect("accounts lock");
        let entry = accounts
            .iter_mut()
            .find(|entry| entry.account.id() == id)
            .ok_or_else(UserDirectoryError::missing)?;
        entry.roles = roles.clone();
        Ok(())
    }

    async fn delete_account(&self, id: &UserId) -> Result<(), UserDirectoryError> {
        let mut blockers = Vec::new();
        if self
            .disasters
            .lock()
            .expect("disasters lock")
            .iter()
            .any(|row| row.reported_by == *id)
        {
            blockers.push("disasters");
        }
        if self
            .volunteers
            .lock()
            .expect("volunteers lock")
            .iter()
            .any(|row| row.user_id == *id)
        {
            blockers.push("volunteer profile");
        }
        if self
            .donations
            .lock()
            .expect("donations lock")
            .iter()
            .any(|row| row.donor_id == *id)
        {
            blockers.push("donations");
        }
        if self
            .assignments
            .lock()
            .expect("assignments lock")
            .iter()
            .any(|row| row.assigned_by == *id)
        {
            blockers.push("assignments");
        }
        if self
            .missions
            .lock()
            .expect("missions lock")
            .iter()
            .any(|row| row.created_by == *id)
        {
            blockers.push("missions");
        }
        if self
            .requests
            .lock()
            .expect("requests lock")
            .iter()
            .any(|row| row.requested_by == *id)
        {
            blockers.push("resource requests");
        }
        if !blockers.is_empty() {
            return Err(UserDirectoryError::has_dependants(blockers.join(", ")));
        }

        let mut accounts = self.accounts.lock().expect("accounts lock");
        let before = accounts.len();
        accounts.retain(|entry| entry.account.id() != id);
        if accounts.len() == before {
            return Err(UserDirectoryError::missing());
        }
        Ok(())
    }
}

#[async_trait]
impl DisasterRepository for ReliefStore {
    async fn insert(&self, disaster: &Disaster) -> Result<(), DisasterRepositoryError> {
        self.disasters
            .lock()
            .expect("disasters lock")
            .push(disaster.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Disaster>, DisasterRepositoryError> {
        let rows = self.disasters.lock().expect("disasters lock");
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Disaster>, DisasterRepositoryError> {
        let mut rows = self.disasters.lock().expect("disasters lock").clone();
        rows.sort_by(|a, b| (b.started_at, b.id).cmp(&(a.started_at, a.id)));
        Ok(rows)
    }

    async fn update(
        &self,
        disaster: &Disaster,
        expected_version: u32,
    ) -> Result<(), DisasterRepositoryError> {
        let mut rows = self.disasters.lock().expect("disasters lock");
        let row = rows
            .iter_mut()
            .find(|row| row.id == disaster.id)
            .ok_or_else(DisasterRepositoryError::missing)?;
        if row.version != expected_version {
            return Err(DisasterRepositoryError::version_conflict(
                expected_version,
                row.version,
            ));
        }
        *row = disaster.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DisasterRepositoryError> {
        let mut blockers = Vec::new();
        if self
            .missions
            .lock()
            .expect("missions lock")
            .iter()
            .any(|row| row.disaster_id == id)
        {
            blockers.push("missions");
        }
        if self
            .assignments
            .lock()
            .expect("assignments lock")
            .iter()
            .any(|row| row.disaster_id == id)
        {
            blockers.push("assignments");
        }
        if self
            .requests
            .lock()
            .expect("requests lock")
            .iter()
            .any(|row| row.disaster_id == id)
        {
            blockers.push("resource requests");
        }
        if !blockers.is_empty() {
            return Err(DisasterRepositoryError::has_dependants(blockers.join(", ")));
        }

        let mut rows = self.disasters.lock().expect("disasters lock");
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(DisasterRepositoryError::missing());
        }
        Ok(())
    }
}

#[async_trait]
impl VolunteerRepository for ReliefStore {
    async fn insert(&self, volunteer: &Volunteer) -> Result<(), VolunteerRepositoryError> {
        let mut rows = self.volunteers.lock().expect("volunteers lock");
        if rows.iter().any(|row| row.user_id == volunteer.user_id) {
            return Err(VolunteerRepositoryError::duplicate_profile());
        }
        rows.push(volunteer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Volunteer>, VolunteerRepositoryError> {
        let rows = self.volunteers.lock().expect("volunteers lock");
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Volunteer>, VolunteerRepositoryError> {
        let rows = self.volunteers.lock().expect("volunteers lock");
        Ok(rows.iter().find(|row| row.user_id == *user_id).cloned())
    }

    async fn list(&self) -> Result<Vec<Volunteer>, VolunteerRepositoryError> {
        let mut rows = self.volunteers.lock().expect("volunteers lock").clone();
        rows.sort_by(|a, b| (b.registered_at, b.id).cmp(&(a.registered_at, a.id)));
        Ok(rows)
    }

    async fn update(
        &self,
        volunteer: &Volunteer,
        expected_version: u32,
    ) -> Result<(), VolunteerRepositoryError> {
        let mut rows = self.volunteers.lock().expect("volunteers lock");
        let row = rows
            .iter_mut()
            .find(|row| row.id == volunteer.id)
            .ok_or_else(VolunteerRepositoryError::missing)?;
        if row.version != expected_version {
            return Err(VolunteerRepositoryError::version_conflict(
                expected_version,
                row.version,
            ));
        }
        *row = volunteer.clone();
        Ok(())
    }
}

#[async_trait]
impl DonationRepository for ReliefStore {
    async fn record(&self, donation: &Donation) -> Result<(), DonationRepositoryError> {
        {
            // The credit doubles as the existence check.
            let mut resources = self.resources.lock().expect("resources lock");
            let Some(resource) = resources
                .iter_mut()
                .find(|row| row.id == donation.resource_id)
            else {
                return Err(DonationRepositoryError::missing_resource());
            };
            resource.current_quantity += donation.quantity;
        }
        self.donations
            .lock()
            .expect("donations lock")
            .push(donation.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Donation>, DonationRepositoryError> {
        let rows = self.donations.lock().expect("donations lock");
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Donation>, DonationRepositoryError> {
        let mut rows = self.donations.lock().expect("donations lock").clone();
        rows.sort_by(|a, b| (b.donated_at, b.id).cmp(&(a.donated_at, a.id)));
        Ok(rows)
    }

    async fn list_for_donor(
        &self,
        donor_id: &UserId,
    ) -> Result<Vec<Donation>, DonationRepositoryError> {
        let rows = self.donations.lock().expect("donations lock");
        let mut mine: Vec<Donation> = rows
            .iter()
            .filter(|row| row.donor_id == *donor_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| (b.donated_at, b.id).cmp(&(a.donated_at, a.id)));
        Ok(mine)
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: DonationStatus,
    ) -> Result<Donation, DonationRepositoryError> {
        let mut rows = self.donations.lock().expect("donations lock");
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(DonationRepositoryError::missing)?;
        row.status = status;
        Ok(row.clone())
    }
}

#[async_trait]
impl AssignmentRepository for ReliefStore {
    async fn create(&self, assignment: &Assignment) -> Result<(), AssignmentRepositoryError> {
        if !self
            .volunteers
            .lock()
            .expect("volunteers lock")
            .iter()
            .any(|row| row.id == assignment.volunteer_id)
        {
            return Err(AssignmentRepositoryError::missing_volunteer());
        }
        if !self
            .disasters
            .lock()
            .expect("disasters lock")
            .iter()
            .any(|row| row.id == assignment.disaster_id)
        {
            return Err(AssignmentRepositoryError::missing_disaster());
        }
        {
            // Only active rows back the duplicate check; finished
            // deployments do not block a redeployment.
            let rows = self.assignments.lock().expect("assignments lock");
            if rows.iter().any(|row| {
                row.volunteer_id == assignment.volunteer_id
                    && row.disaster_id == assignment.disaster_id
                    && row.status == AssignmentStatus::Assigned
            }) {
                return Err(AssignmentRepositoryError::duplicate_assignment());
            }
        }

        let mut volunteers = self.volunteers.lock().expect("volunteers lock");
        if let Some(volunteer) = volunteers
            .iter_mut()
            .find(|row| row.id == assignment.volunteer_id)
        {
            volunteer.availability = AvailabilityStatus::Assigned;
        }
        drop(volunteers);
        self.assignments
            .lock()
            .expect("assignments lock")
            .push(assignment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Assignment>, AssignmentRepositoryError> {
        let rows = self.assignments.lock().expect("assignments lock");
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Assignment>, AssignmentRepositoryError> {
        let mut rows = self.assignments.lock().expect("assignments lock").clone();
        rows.sort_by(|a, b| (b.assigned_at, b.id).cmp(&(a.assigned_at, a.id)));
        Ok(rows)
    }

    async fn list_for_volunteer(
        &self,
        volunteer_id: Uuid,
    ) -> Result<Vec<Assignment>, AssignmentRepositoryError> {
        let rows = self.assignments.lock().expect("assignments lock");
        let mut mine: Vec<Assignment> = rows
            .iter()
            .filter(|row| row.volunteer_id == volunteer_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| (b.assigned_at, b.id).cmp(&(a.assigned_at, a.id)));
        Ok(mine)
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: AssignmentStatus,
    ) -> Result<Assignment, AssignmentRepositoryError> {
        let updated = {
            let mut rows = self.assignments.lock().expect("assignments lock");
            let row = rows
                .iter_mut()
                .find(|row| row.id == id)
                .ok_or_else(AssignmentRepositoryError::missing)?;
            row.status = status;
            row.clone()
        };

        let mut volunteers = self.volunteers.lock().expect("volunteers lock");
        if let Some(volunteer) = volunteers
            .iter_mut()
            .find(|row| row.id == updated.volunteer_id)
        {
            volunteer.availability = availability_for(status);
        }
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AssignmentRepositoryError> {
        let removed = {
            let mut rows = self.assignments.lock().expect("assignments lock");
            let index = rows
                .iter()
                .position(|row| row.id == id)
                .ok_or_else(AssignmentRepositoryError::missing)?;
            rows.remove(index)
        };

        if removed.status == AssignmentStatus::Assigned {
            let mut volunteers = self.volunteers.lock().expect("volunteers lock");
            if let Some(volunteer) = volunteers
                .iter_mut()
                .find(|row| row.id == removed.volunteer_id)
            {
                volunteer.availability = AvailabilityStatus::Available;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl MissionRepository for ReliefStore {
    async fn insert(&self, mission: &Mission) -> Result<(), MissionRepositoryError> {
        if !self
            .disasters
            .lock()
            .expect("disasters lock")
            .iter()
            .any(|row| row.id == mission.disaster_id)
        {
            return Err(MissionRepositoryError::missing_disaster());
        }
        if let Some(volunteer_id) = mission.assigned_to {
            if !self
                .volunteers
                .lock()
                .expect("volunteers lock")
                .iter()
                .any(|row| row.id == volunteer_id)
            {
                return Err(MissionRepositoryError::missing_volunteer());
            }
        }
        self.missions
            .lock()
            .expect("missions lock")
            .push(mission.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Mission>, MissionRepositoryError> {
        let rows = self.missions.lock().expect("missions lock");
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Mission>, MissionRepositoryError> {
        let mut rows = self.missions.lock().expect("missions lock").clone();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(rows)
    }

    async fn list_for_volunteer(
        &self,
        volunteer_id: Uuid,
    ) -> Result<Vec<Mission>, MissionRepositoryError> {
        let rows = self.missions.lock().expect("missions lock");
        let mut mine: Vec<Mission> = rows
            .iter()
            .filter(|row| row.assigned_to == Some(volunteer_id))
            .cloned()
            .collect();
        mine.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(mine)
    }

    async fn update(
        &self,
        mission: &Mission,
        expected_version: u32,
    ) -> Result<(), MissionRepositoryError> {
        if let Some(volunteer_id) = mission.assigned_to {
            if !self
                .volunteers
                .lock()
                .expect("volunteers lock")
                .iter()
                .any(|row| row.id == volunteer_id)
            {
                return Err(MissionRepositoryError::missing_volunteer());
            }
        }
        let mut rows = self.missions.lock().expect("missions lock");
        let row = rows
            .iter_mut()
            .find(|row| row.id == mission.id)
            .ok_or_else(MissionRepositoryError::missing)?;
        if row.version != expected_version {
            return Err(MissionRepositoryError::version_conflict(
                expected_version,
                row.version,
            ));
        }
        *row = mission.clone();
        Ok(())
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: MissionStatus,
    ) -> Result<Mission, MissionRepositoryError> {
        let mut rows = self.missions.lock().expect("missions lock");
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(MissionRepositoryError::missing)?;
        row.status = status;
        Ok(row.clone())
    }
}

#[async_trait]
impl ResourceRepository for ReliefStore {
    async fn insert_category(
        &self,
        category: &ResourceCategory,
    ) -> Result<(), ResourceRepositoryError> {
        let mut rows = self.categories.lock().expect("categories lock");
        if rows.iter().any(|row| row.name == category.name) {
            return Err(ResourceRepositoryError::duplicate_category(
                category.name.clone(),
            ));
        }
        rows.push(category.clone());
        Ok(())
    }

    async fn find_category(
        &self,
        id: Uuid,
    ) -> Result<Option<ResourceCategory>, ResourceRepositoryError> {
        let rows = self.categories.lock().expect("categories lock");
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<ResourceCategory>, ResourceRepositoryError> {
        let mut rows = self.categories.lock().expect("categories lock").clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn update_category(
        &self,
        category: &ResourceCategory,
    ) -> Result<(), ResourceRepositoryError> {
        let mut rows = self.categories.lock().expect("categories lock");
        if rows
            .iter()
            .any(|row| row.id != category.id && row.name == category.name)
        {
            return Err(ResourceRepositoryError::duplicate_category(
                category.name.clone(),
            ));
        }
        let row = rows
            .iter_mut()
            .find(|row| row.id == category.id)
            .ok_or_else(ResourceRepositoryError::missing_category)?;
        *row = category.clone();
        Ok(())
    }

    async fn delete_category(&self, id: Uuid) -> Result<(), ResourceRepositoryError> {
        if self
            .resources
            .lock()
            .expect("resources lock")
            .iter()
            .any(|row| row.category_id == id)
        {
            return Err(ResourceRepositoryError::category_in_use());
        }
        let mut rows = self.categories.lock().expect("categories lock");
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(ResourceRepositoryError::missing_category());
        }
        Ok(())
    }

    async fn insert_resource(&self, resource: &Resource) -> Result<(), ResourceRepositoryError> {
        if !self
            .categories
            .lock()
            .expect("categories lock")
            .iter()
            .any(|row| row.id == resource.category_id)
        {
            return Err(ResourceRepositoryError::missing_category());
        }
        self.resources
            .lock()
            .expect("resources lock")
            .push(resource.clone());
        Ok(())
    }

    async fn find_resource(&self, id: Uuid) -> Result<Option<Resource>, ResourceRepositoryError> {
        let rows = self.resources.lock().expect("resources lock");
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn list_resources(&self) -> Result<Vec<Resource>, ResourceRepositoryError> {
        let mut rows = self.resources.lock().expect("resources lock").clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn list_low_stock(&self) -> Result<Vec<Resource>, ResourceRepositoryError> {
        let rows = self.resources.lock().expect("resources lock");
        let mut low: Vec<Resource> = rows
            .iter()
            .filter(|row| row.is_low_stock())
            .cloned()
            .collect();
        low.sort_by(|a, b| {
            (a.current_quantity, a.name.clone()).cmp(&(b.current_quantity, b.name.clone()))
        });
        Ok(low)
    }

    async fn update_resource(
        &self,
        resource: &Resource,
        expected_version: u32,
    ) -> Result<(), ResourceRepositoryError> {
        if !self
            .categories
            .lock()
            .expect("categories lock")
            .iter()
            .any(|row| row.id == resource.category_id)
        {
            return Err(ResourceRepositoryError::missing_category());
        }
        let mut rows = self.resources.lock().expect("resources lock");
        let row = rows
            .iter_mut()
            .find(|row| row.id == resource.id)
            .ok_or_else(ResourceRepositoryError::missing)?;
        if row.version != expected_version {
            return Err(ResourceRepositoryError::version_conflict(
                expected_version,
                row.version,
            ));
        }
        *row = resource.clone();
        Ok(())
    }

    async fn delete_resource(&self, id: Uuid) -> Result<(), ResourceRepositoryError> {
        if self
            .donations
            .lock()
            .expect("donations lock")
            .iter()
            .any(|row| row.resource_id == id)
        {
            return Err(ResourceRepositoryError::resource_in_use());
        }
        if self
            .requests
            .lock()
            .expect("requests lock")
            .iter()
            .any(|row| row.resource_id == id)
        {
            return Err(ResourceRepositoryError::resource_in_use());
        }
        let mut rows = self.resources.lock().expect("resources lock");
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(ResourceRepositoryError::missing());
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceRequestRepository for ReliefStore {
    async fn insert(
        &self,
        request: &ResourceRequest,
    ) -> Result<(), ResourceRequestRepositoryError> {
        if !self
            .disasters
            .lock()
            .expect("disasters lock")
            .iter()
            .any(|row| row.id == request.disaster_id)
        {
            return Err(ResourceRequestRepositoryError::missing_disaster());
        }
        if !self
            .resources
            .lock()
            .expect("resources lock")
            .iter()
            .any(|row| row.id == request.resource_id)
        {
            return Err(ResourceRequestRepositoryError::missing_resource());
        }
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ResourceRequest>, ResourceRequestRepositoryError> {
        let rows = self.requests.lock().expect("requests lock");
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<ResourceRequest>, ResourceRequestRepositoryError> {
        let mut rows = self.requests.lock().expect("requests lock").clone();
        rows.sort_by(|a, b| (b.requested_at, b.id).cmp(&(a.requested_at, a.id)));
        Ok(rows)
    }

    async fn fulfil(&self, id: Uuid) -> Result<Fulfilment, ResourceRequestRepositoryError> {
        let mut rows = self.requests.lock().expect("requests lock");
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(ResourceRequestRepositoryError::missing)?;
        if !row.is_fulfillable() {
            return Err(ResourceRequestRepositoryError::not_fulfillable(
                row.status.as_str(),
            ));
        }

        let mut resources = self.resources.lock().expect("resources lock");
        let resource = resources
            .iter_mut()
            .find(|resource| resource.id == row.resource_id)
            .ok_or_else(ResourceRequestRepositoryError::missing_resource)?;
        if resource.current_quantity < row.quantity_requested {
            return Ok(Fulfilment::InsufficientStock {
                available: resource.current_quantity,
                requested: row.quantity_requested,
            });
        }

        resource.current_quantity -= row.quantity_requested;
        row.status = RequestStatus::Fulfilled;
        Ok(Fulfilment::Completed(row.clone()))
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: RequestStatus,
    ) -> Result<ResourceRequest, ResourceRequestRepositoryError> {
        let mut rows = self.requests.lock().expect("requests lock");
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(ResourceRequestRepositoryError::missing)?;
        row.status = status;
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ResourceRequestRepositoryError> {
        let mut rows = self.requests.lock().expect("requests lock");
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(ResourceRequestRepositoryError::missing());
        }
        Ok(())
    }
}

#[async_trait]
impl ReportingRepository for ReliefStore {
    async fn overview_counts(&self) -> Result<ReliefOverview, ReportingRepositoryError> {
        let disasters = self.disasters.lock().expect("disasters lock");
        let volunteers = self.volunteers.lock().expect("volunteers lock");
        let missions = self.missions.lock().expect("missions lock");
        let donations = self.donations.lock().expect("donations lock");
        Ok(ReliefOverview {
            disasters: disasters.len() as i64,
            active_disasters: disasters
                .iter()
                .filter(|row| row.status == DisasterStatus::Active)
                .count() as i64,
            volunteers: volunteers.len() as i64,
            active_missions: missions
                .iter()
                .filter(|row| row.status != MissionStatus::Completed)
                .count() as i64,
            donated_units: donations.iter().map(|row| i64::from(row.quantity)).sum(),
        })
    }

    async fn admin_counts(&self) -> Result<AdminCounts, ReportingRepositoryError> {
        Ok(AdminCounts {
            accounts: self.accounts.lock().expect("accounts lock").len() as i64,
            disasters: self.disasters.lock().expect("disasters lock").len() as i64,
            volunteers: self.volunteers.lock().expect("volunteers lock").len() as i64,
            donations: self.donations.lock().expect("donations lock").len() as i64,
            missions: self.missions.lock().expect("missions lock").len() as i64,
            resource_requests: self.requests.lock().expect("requests lock").len() as i64,
            low_stock_resources: self
                .resources
                .lock()
                .expect("resources lock")
                .iter()
                .filter(|row| row.is_low_stock())
                .count() as i64,
        })
    }
}
