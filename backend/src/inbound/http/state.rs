//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AssignmentsCommand, AssignmentsQuery, DisastersCommand, DisastersQuery, DonationsCommand,
    DonationsQuery, LoginService, MissionsCommand, MissionsQuery, PermissionsQuery, ReportsQuery,
    ResourceRequestsCommand, ResourceRequestsQuery, ResourcesCommand, ResourcesQuery,
    UserAdministration, VolunteersCommand, VolunteersQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
///
/// Command ports take the bare entity name; the paired read side carries a
/// `_query` suffix.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub permissions: Arc<dyn PermissionsQuery>,
    pub disasters: Arc<dyn DisastersCommand>,
    pub disasters_query: Arc<dyn DisastersQuery>,
    pub volunteers: Arc<dyn VolunteersCommand>,
    pub volunteers_query: Arc<dyn VolunteersQuery>,
    pub donations: Arc<dyn DonationsCommand>,
    pub donations_query: Arc<dyn DonationsQuery>,
    pub assignments: Arc<dyn AssignmentsCommand>,
    pub assignments_query: Arc<dyn AssignmentsQuery>,
    pub missions: Arc<dyn MissionsCommand>,
    pub missions_query: Arc<dyn MissionsQuery>,
    pub resources: Arc<dyn ResourcesCommand>,
    pub resources_query: Arc<dyn ResourcesQuery>,
    pub resource_requests: Arc<dyn ResourceRequestsCommand>,
    pub resource_requests_query: Arc<dyn ResourceRequestsQuery>,
    pub accounts: Arc<dyn UserAdministration>,
    pub reports: Arc<dyn ReportsQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub permissions: Arc<dyn PermissionsQuery>,
    pub disasters: Arc<dyn DisastersCommand>,
    pub disasters_query: Arc<dyn DisastersQuery>,
    pub volunteers: Arc<dyn VolunteersCommand>,
    pub volunteers_query: Arc<dyn VolunteersQuery>,
    pub donations: Arc<dyn DonationsCommand>,
    pub donations_query: Arc<dyn DonationsQuery>,
    pub assignments: Arc<dyn AssignmentsCommand>,
    pub assignments_query: Arc<dyn AssignmentsQuery>,
    pub missions: Arc<dyn MissionsCommand>,
    pub missions_query: Arc<dyn MissionsQuery>,
    pub resources: Arc<dyn ResourcesCommand>,
    pub resources_query: Arc<dyn ResourcesQuery>,
    pub resource_requests: Arc<dyn ResourceRequestsCommand>,
    pub resource_requests_query: Arc<dyn ResourceRequestsQuery>,
    pub accounts: Arc<dyn UserAdministration>,
    pub reports: Arc<dyn ReportsQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            permissions,
            disasters,
            disasters_query,
            volunteers,
            volunteers_query,
            donations,
            donations_query,
            assignments,
            assignments_query,
            missions,
            missions_query,
            resources,
            resources_query,
            resource_requests,
            resource_requests_query,
            accounts,
            reports,
        } = ports;
        Self {
            login,
            permissions,
            disasters,
            disasters_query,
            volunteers,
            volunteers_query,
            donations,
            donations_query,
            assignments,
            assignments_query,
            missions,
            missions_query,
            resources,
            resources_query,
            resource_requests,
            resource_requests_query,
            accounts,
            reports,
        }
    }
}
