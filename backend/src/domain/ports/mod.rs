//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod assignment_repository;
mod assignments;
mod disaster_repository;
mod disasters;
mod donation_repository;
mod donations;
mod login_service;
mod mission_repository;
mod missions;
mod permissions_query;
mod reporting_repository;
mod reports;
mod resource_repository;
mod resource_request_repository;
mod resource_requests;
mod resources;
mod user_administration;
mod user_directory;
mod volunteer_repository;
mod volunteers;

#[cfg(test)]
pub use assignment_repository::MockAssignmentRepository;
pub use assignment_repository::{AssignmentRepository, AssignmentRepositoryError};
#[cfg(test)]
pub use assignments::{MockAssignmentsCommand, MockAssignmentsQuery};
pub use assignments::{AssignmentsCommand, AssignmentsQuery, NewAssignment};
#[cfg(test)]
pub use disaster_repository::MockDisasterRepository;
pub use disaster_repository::{DisasterRepository, DisasterRepositoryError};
#[cfg(test)]
pub use disasters::{MockDisastersCommand, MockDisastersQuery};
pub use disasters::{DisasterChanges, DisastersCommand, DisastersQuery, NewDisaster};
#[cfg(test)]
pub use donation_repository::MockDonationRepository;
pub use donation_repository::{DonationRepository, DonationRepositoryError};
#[cfg(test)]
pub use donations::{MockDonationsCommand, MockDonationsQuery};
pub use donations::{DonationsCommand, DonationsQuery, NewDonation};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use mission_repository::MockMissionRepository;
pub use mission_repository::{MissionRepository, MissionRepositoryError};
#[cfg(test)]
pub use missions::{MockMissionsCommand, MockMissionsQuery};
pub use missions::{MissionChanges, MissionsCommand, MissionsQuery, NewMission};
#[cfg(test)]
pub use permissions_query::MockPermissionsQuery;
pub use permissions_query::PermissionsQuery;
#[cfg(test)]
pub use reporting_repository::MockReportingRepository;
pub use reporting_repository::{ReportingRepository, ReportingRepositoryError};
#[cfg(test)]
pub use reports::MockReportsQuery;
pub use reports::ReportsQuery;
#[cfg(test)]
pub use resource_repository::MockResourceRepository;
pub use resource_repository::{ResourceRepository, ResourceRepositoryError};
#[cfg(test)]
pub use resource_request_repository::MockResourceRequestRepository;
pub use resource_request_repository::{ResourceRequestRepository, ResourceRequestRepositoryError};
#[cfg(test)]
pub use resource_requests::{MockResourceRequestsCommand, MockResourceRequestsQuery};
pub use resource_requests::{NewResourceRequest, ResourceRequestsCommand, ResourceRequestsQuery};
#[cfg(test)]
pub use resources::{MockResourcesCommand, MockResourcesQuery};
pub use resources::{
    CategoryChanges, NewCategory, NewResource, ResourceChanges, ResourcesCommand, ResourcesQuery,
};
#[cfg(test)]
pub use user_administration::MockUserAdministration;
pub use user_administration::UserAdministration;
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{UserDirectory, UserDirectoryError};
#[cfg(test)]
pub use volunteer_repository::MockVolunteerRepository;
pub use volunteer_repository::{VolunteerRepository, VolunteerRepositoryError};
#[cfg(test)]
pub use volunteers::{MockVolunteersCommand, MockVolunteersQuery};
pub use volunteers::{VolunteerChanges, VolunteerSignup, VolunteersCommand, VolunteersQuery};
