//! Shared harness for the HTTP integration suites.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! each suite declares `mod support;` to pull in this module. It provides a
//! seeded in-memory world, an app factory that wires the real domain
//! services over that world the way the server's composition root does, and
//! a cookie sign-in helper.

pub mod memory;

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use chrono::{Duration, Utc};
use serde_json::json;

use backend::Trace;
use backend::domain::{
    AssignmentService, DirectoryLoginService, DirectoryService, DisasterService, DonationService,
    EmailAddress, MissionService, PermissionEngine, PersonName, ReportingService,
    ResourceRequestService, ResourceService, Role, RoleSet, UserAccount, UserId, VolunteerService,
};
use backend::inbound::http::admin::{delete_account, list_accounts, update_account_roles};
use backend::inbound::http::assignments::{
    create_assignment, get_assignment, list_assignments, my_assignments, update_assignment_status,
    withdraw_assignment,
};
use backend::inbound::http::auth::{current_session, login, logout};
use backend::inbound::http::disasters::{
    delete_disaster, get_disaster, list_disasters, report_disaster, resolve_disaster,
    update_disaster,
};
use backend::inbound::http::donations::{
    get_donation, list_donations, my_donations, pledge_donation, update_donation_status,
};
use backend::inbound::http::missions::{
    create_mission, get_mission, list_missions, my_missions, update_mission,
    update_mission_status,
};
use backend::inbound::http::reports::{admin_dashboard, relief_overview};
use backend::inbound::http::resource_requests::{
    fulfil_resource_request, get_resource_request, list_resource_requests, open_resource_request,
    update_resource_request_status, withdraw_resource_request,
};
use backend::inbound::http::resources::{
    create_category, create_resource, delete_category, delete_resource, get_resource,
    list_categories, list_low_stock_resources, list_resources, update_category, update_resource,
};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::inbound::http::volunteers::{
    get_volunteer, list_volunteers, my_volunteer_profile, register_volunteer, update_volunteer,
};

use memory::ReliefStore;

pub const ADMIN_EMAIL: &str = "amara.okafor@relief.example";
pub const COORDINATOR_EMAIL: &str = "lindiwe.dlamini@relief.example";
pub const VOLUNTEER_EMAIL: &str = "sipho.ndlovu@relief.example";
pub const DONOR_EMAIL: &str = "priya.naidoo@relief.example";

/// A seeded store plus the identities of its directory accounts.
pub struct SeededWorld {
    pub store: Arc<ReliefStore>,
    pub admin: UserId,
    pub coordinator: UserId,
    pub volunteer: UserId,
    pub donor: UserId,
}

fn seed(
    store: &ReliefStore,
    email: &str,
    first: &str,
    last: &str,
    role: Role,
    hours_ago: i64,
) -> UserId {
    let id = UserId::random();
    let account = UserAccount::new(
        id.clone(),
        EmailAddress::new(email).expect("seed email"),
        PersonName::new(first).expect("seed first name"),
        PersonName::new(last).expect("seed last name"),
        Utc::now() - Duration::hours(hours_ago),
    );
    store.seed_account(account, RoleSet::from([role]));
    id
}

/// Seed one account per role.
///
/// Accounts are staggered an hour apart so newest-first listings have a
/// deterministic order: donor, volunteer, coordinator, admin.
pub fn seeded_world() -> SeededWorld {
    let store = Arc::new(ReliefStore::default());
    let admin = seed(&store, ADMIN_EMAIL, "Amara", "Okafor", Role::Admin, 4);
    let coordinator = seed(
        &store,
        COORDINATOR_EMAIL,
        "Lindiwe",
        "Dlamini",
        Role::Coordinator,
        3,
    );
    let volunteer = seed(&store, VOLUNTEER_EMAIL, "Sipho", "Ndlovu", Role::Volunteer, 2);
    let donor = seed(&store, DONOR_EMAIL, "Priya", "Naidoo", Role::Donor, 1);
    SeededWorld {
        store,
        admin,
        coordinator,
        volunteer,
        donor,
    }
}

/// Wire the real domain services over the shared store.
///
/// Mirrors the server's composition root: one permission engine over one
/// directory, the volunteer repository shared with the assignment and
/// mission services. Here the store plays every adapter at once.
pub fn http_state(store: &Arc<ReliefStore>) -> web::Data<HttpState> {
    let permissions = Arc::new(PermissionEngine::new(store.clone()));

    let disasters = Arc::new(DisasterService::new(permissions.clone(), store.clone()));
    let volunteers = Arc::new(VolunteerService::new(permissions.clone(), store.clone()));
    let donations = Arc::new(DonationService::new(permissions.clone(), store.clone()));
    let assignments = Arc::new(AssignmentService::new(
        permissions.clone(),
        store.clone(),
        store.clone(),
    ));
    let missions = Arc::new(MissionService::new(
        permissions.clone(),
        store.clone(),
        store.clone(),
    ));
    let resources = Arc::new(ResourceService::new(permissions.clone(), store.clone()));
    let resource_requests = Arc::new(ResourceRequestService::new(
        permissions.clone(),
        store.clone(),
    ));
    let accounts = Arc::new(DirectoryService::new(permissions.clone(), store.clone()));
    let reports = Arc::new(ReportingService::new(
        permissions.clone(),
        store.clone(),
        store.clone(),
    ));

    web::Data::new(HttpState::new(HttpStatePorts {
        login: Arc::new(DirectoryLoginService::new(store.clone())),
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

/// Build the full API app over the store and initialise it for calls.
///
/// Route order matches the server: literal segments register ahead of their
/// `/{id}` siblings.
pub async fn spawn_app(
    store: &Arc<ReliefStore>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    let api = web::scope("/api")
        .wrap(session)
        .service(login)
        .service(logout)
        .service(current_session)
        .service(report_disaster)
        .service(list_disasters)
        .service(get_disaster)
        .service(update_disaster)
        .service(resolve_disaster)
        .service(delete_disaster)
        .service(register_volunteer)
        .service(list_volunteers)
        .service(my_volunteer_profile)
        .service(get_volunteer)
        .service(update_volunteer)
        .service(pledge_donation)
        .service(list_donations)
        .service(my_donations)
        .service(get_donation)
        .service(update_donation_status)
        .service(create_assignment)
        .service(list_assignments)
        .service(my_assignments)
        .service(get_assignment)
        .service(update_assignment_status)
        .service(withdraw_assignment)
        .service(create_mission)
        .service(list_missions)
        .service(my_missions)
        .service(get_mission)
        .service(update_mission)
        .service(update_mission_status)
        .service(create_category)
        .service(list_categories)
        .service(update_category)
        .service(delete_category)
        .service(create_resource)
        .service(list_resources)
        .service(list_low_stock_resources)
        .service(get_resource)
        .service(update_resource)
        .service(delete_resource)
        .service(open_resource_request)
        .service(list_resource_requests)
        .service(get_resource_request)
        .service(fulfil_resource_request)
        .service(update_resource_request_status)
        .service(withdraw_resource_request)
        .service(list_accounts)
        .service(update_account_roles)
        .service(delete_account)
        .service(relief_overview)
        .service(admin_dashboard);

    test::init_service(App::new().app_data(http_state(store)).wrap(Trace).service(api)).await
}

/// Sign in through `/api/login` and return the session cookie.
pub async fn sign_in(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    email: &str,
) -> Cookie<'static> {
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({
                "email": email,
                "password": "Admin123!",
            }))
            .to_request(),
    )
    .await;
    assert!(
        response.status().is_success(),
        "sign-in as {email} failed: {}",
        response.status()
    );
    response
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie")
        .into_owned()
}
