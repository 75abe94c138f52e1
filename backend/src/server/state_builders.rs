//! Builders wiring persistence adapters into the HTTP state ports.

use std::sync::Arc;

use actix_web::web;

use backend::domain::{
    AssignmentService, DirectoryLoginService, DirectoryService, DisasterService, DonationService,
    MissionService, PermissionEngine, ReportingService, ResourceRequestService, ResourceService,
    VolunteerService,
};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::persistence::{
    DieselAssignmentRepository, DieselDisasterRepository, DieselDonationRepository,
    DieselMissionRepository, DieselReportingRepository, DieselResourceRepository,
    DieselResourceRequestRepository, DieselUserDirectory, DieselVolunteerRepository,
};

use super::ServerConfig;

/// Build the shared HTTP state over database-backed adapters.
///
/// Every service resolves capabilities through one permission engine over one
/// user directory, so role lookups share the same pool. The volunteer
/// repository is shared with the assignment and mission services, which need
/// it to resolve the caller's profile for their `mine` listings.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let pool = &config.pool;

    let directory = Arc::new(DieselUserDirectory::new(pool.clone()));
    let permissions = Arc::new(PermissionEngine::new(directory.clone()));
    let volunteer_repo = Arc::new(DieselVolunteerRepository::new(pool.clone()));

    let disasters = Arc::new(DisasterService::new(
        permissions.clone(),
        Arc::new(DieselDisasterRepository::new(pool.clone())),
    ));
    let volunteers = Arc::new(VolunteerService::new(
        permissions.clone(),
        volunteer_repo.clone(),
    ));
    let donations = Arc::new(DonationService::new(
        permissions.clone(),
        Arc::new(DieselDonationRepository::new(pool.clone())),
    ));
    let assignments = Arc::new(AssignmentService::new(
        permissions.clone(),
        Arc::new(DieselAssignmentRepository::new(pool.clone())),
        volunteer_repo.clone(),
    ));
    let missions = Arc::new(MissionService::new(
        permissions.clone(),
        Arc::new(DieselMissionRepository::new(pool.clone())),
        volunteer_repo,
    ));
    let resources = Arc::new(ResourceService::new(
        permissions.clone(),
        Arc::new(DieselResourceRepository::new(pool.clone())),
    ));
    let resource_requests = Arc::new(ResourceRequestService::new(
        permissions.clone(),
        Arc::new(DieselResourceRequestRepository::new(pool.clone())),
    ));
    let accounts = Arc::new(DirectoryService::new(
        permissions.clone(),
        directory.clone(),
    ));
    let reports = Arc::new(ReportingService::new(
        permissions.clone(),
        Arc::new(DieselReportingRepository::new(pool.clone())),
        directory.clone(),
    ));

    web::Data::new(HttpState::new(HttpStatePorts {
        login: Arc::new(DirectoryLoginService::new(directory)),
        permissions,
        disasters: disasters.clone(),
        disasters_query: disasters,
        volunteers: volunteers.clone(),
        volunteers_query: volunteers,
        donations: donations.clone(),
        donations_query: donations,
        assignments: assignments.clone(),
        assignments_query: assignments,
        missions: missions.clone(),
        missions_query: missions,
        resources: resources.clone(),
        resources_query: resources,
        resource_requests: resource_requests.clone(),
        resource_requests_query: resource_requests,
        accounts,
        reports,
    }))
}
