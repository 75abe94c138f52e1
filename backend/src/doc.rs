//! OpenAPI document assembly.
//!
//! [`ApiDoc`] gathers every inbound handler path, the request and response
//! bodies they exchange, and the error wrappers from
//! [`crate::inbound::http::schemas`] into one generated document. Domain
//! types stay free of utoipa derives; the inbound layer owns the schema
//! definitions it publishes.
//!
//! Swagger UI serves the document in debug builds, and
//! `cargo run --bin openapi-dump` prints it for client generation and CI
//! diffing.

use crate::inbound::http::admin::{
    AccountResponse, DeleteAccountResponseBody, UpdateRolesRequestBody,
};
use crate::inbound::http::assignments::{
    AssignmentResponse, CreateAssignmentRequestBody, UpdateAssignmentStatusRequestBody,
    WithdrawAssignmentResponseBody,
};
use crate::inbound::http::auth::{
    LoginRequestBody, LoginResponseBody, LogoutResponseBody, PermissionFlagsBody,
    SessionInfoResponseBody,
};
use crate::inbound::http::disasters::{
    DeleteDisasterResponseBody, DisasterResponse, ReportDisasterRequestBody,
    UpdateDisasterRequestBody,
};
use crate::inbound::http::donations::{
    DonationResponse, PledgeDonationRequestBody, UpdateDonationStatusRequestBody,
};
use crate::inbound::http::missions::{
    CreateMissionRequestBody, MissionResponse, UpdateMissionRequestBody,
    UpdateMissionStatusRequestBody,
};
use crate::inbound::http::reports::{DashboardResponseBody, OverviewResponseBody};
use crate::inbound::http::resource_requests::{
    FulfilResponseBody, OpenResourceRequestRequestBody, ResourceRequestResponse,
    UpdateRequestStatusRequestBody, WithdrawRequestResponseBody,
};
use crate::inbound::http::resources::{
    CategoryRequestBody, CategoryResponse, CreateResourceRequestBody,
    DeleteInventoryResponseBody, ResourceResponse, UpdateResourceRequestBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::volunteers::{
    RegisterVolunteerRequestBody, RegisterVolunteerResponseBody, UpdateVolunteerRequestBody,
    VolunteerResponse,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the session cookie scheme the API authenticates with.
struct SessionCookieScheme;

impl Modify for SessionCookieScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let cookie = ApiKeyValue::with_description(
            "session",
            "Session cookie issued by POST /api/login.",
        );
        openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default)
            .add_security_scheme(
                "SessionCookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(cookie)),
            );
    }
}

/// OpenAPI document for the relief coordination API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionCookieScheme),
    info(
        title = "Relief coordination backend API",
        description = "HTTP interface for disaster relief coordination: \
            disasters, volunteers, assignments, missions, donations, \
            inventory and reporting.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::disasters::report_disaster,
        crate::inbound::http::disasters::list_disasters,
        crate::inbound::http::disasters::get_disaster,
        crate::inbound::http::disasters::update_disaster,
        crate::inbound::http::disasters::resolve_disaster,
        crate::inbound::http::disasters::delete_disaster,
        crate::inbound::http::volunteers::register_volunteer,
        crate::inbound::http::volunteers::list_volunteers,
        crate::inbound::http::volunteers::my_volunteer_profile,
        crate::inbound::http::volunteers::get_volunteer,
        crate::inbound::http::volunteers::update_volunteer,
        crate::inbound::http::donations::pledge_donation,
        crate::inbound::http::donations::list_donations,
        crate::inbound::http::donations::my_donations,
        crate::inbound::http::donations::get_donation,
        crate::inbound::http::donations::update_donation_status,
        crate::inbound::http::assignments::create_assignment,
        crate::inbound::http::assignments::list_assignments,
        crate::inbound::http::assignments::my_assignments,
        crate::inbound::http::assignments::get_assignment,
        crate::inbound::http::assignments::update_assignment_status,
        crate::inbound::http::assignments::withdraw_assignment,
        crate::inbound::http::missions::create_mission,
        crate::inbound::http::missions::list_missions,
        crate::inbound::http::missions::my_missions,
        crate::inbound::http::missions::get_mission,
        crate::inbound::http::missions::update_mission,
        crate::inbound::http::missions::update_mission_status,
        crate::inbound::http::resources::create_category,
        crate::inbound::http::resources::list_categories,
        crate::inbound::http::resources::update_category,
        crate::inbound::http::resources::delete_category,
        crate::inbound::http::resources::create_resource,
        crate::inbound::http::resources::list_resources,
        crate::inbound::http::resources::list_low_stock_resources,
        crate::inbound::http::resources::get_resource,
        crate::inbound::http::resources::update_resource,
        crate::inbound::http::resources::delete_resource,
        crate::inbound::http::resource_requests::open_resource_request,
        crate::inbound::http::resource_requests::list_resource_requests,
        crate::inbound::http::resource_requests::get_resource_request,
        crate::inbound::http::resource_requests::fulfil_resource_request,
        crate::inbound::http::resource_requests::update_resource_request_status,
        crate::inbound::http::resource_requests::withdraw_resource_request,
        crate::inbound::http::admin::list_accounts,
        crate::inbound::http::admin::update_account_roles,
        crate::inbound::http::admin::delete_account,
        crate::inbound::http::reports::relief_overview,
        crate::inbound::http::reports::admin_dashboard,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequestBody,
        LoginResponseBody,
        LogoutResponseBody,
        PermissionFlagsBody,
        SessionInfoResponseBody,
        ReportDisasterRequestBody,
        UpdateDisasterRequestBody,
        DisasterResponse,
        DeleteDisasterResponseBody,
        RegisterVolunteerRequestBody,
        UpdateVolunteerRequestBody,
        VolunteerResponse,
        RegisterVolunteerResponseBody,
        PledgeDonationRequestBody,
        UpdateDonationStatusRequestBody,
        DonationResponse,
        CreateAssignmentRequestBody,
        UpdateAssignmentStatusRequestBody,
        AssignmentResponse,
        WithdrawAssignmentResponseBody,
        CreateMissionRequestBody,
        UpdateMissionRequestBody,
        UpdateMissionStatusRequestBody,
        MissionResponse,
        CategoryRequestBody,
        CategoryResponse,
        CreateResourceRequestBody,
        UpdateResourceRequestBody,
        ResourceResponse,
        DeleteInventoryResponseBody,
        OpenResourceRequestRequestBody,
        UpdateRequestStatusRequestBody,
        ResourceRequestResponse,
        FulfilResponseBody,
        WithdrawRequestResponseBody,
        UpdateRolesRequestBody,
        AccountResponse,
        DeleteAccountResponseBody,
        OverviewResponseBody,
        DashboardResponseBody,
    )),
    tags(
        (name = "auth", description = "Session establishment and identity"),
        (name = "disasters", description = "Disaster records and their lifecycle"),
        (name = "volunteers", description = "Volunteer profiles"),
        (name = "donations", description = "Donation pledges and stock credits"),
        (name = "assignments", description = "Volunteer deployments to disasters"),
        (name = "missions", description = "Field missions within disasters"),
        (name = "resources", description = "Inventory categories and resources"),
        (name = "resource-requests", description = "Stock requests and fulfilment"),
        (name = "admin", description = "Account administration"),
        (name = "reports", description = "Aggregate reporting"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
