//! Domain primitives, entities, and services.
//!
//! Purpose: Define the strongly typed relief-coordination model used by the
//! API and persistence layers. Keep types immutable and document invariants
//! in each type's Rustdoc; all capability checks live here, behind the
//! driving ports in [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Permissions (alias to `permissions::Permissions`): capability flags
//!   derived from a subject's roles.
//! - The entity modules (disaster, volunteer, donation, mission,
//!   assignment, resource, resource request) and the services that
//!   implement their driving ports.

pub mod ports;

mod assignment;
mod assignment_service;
mod auth;
mod directory_service;
mod disaster;
mod disaster_service;
mod donation;
mod donation_service;
mod enums;
mod error;
mod login;
mod mission;
mod mission_service;
mod permissions;
mod reporting;
mod reporting_service;
mod resource;
mod resource_request;
mod resource_request_service;
mod resource_service;
mod user;
mod validation;
mod volunteer;
mod volunteer_service;

pub use self::assignment::{
    ASSIGNMENT_ROLE_MAX, Assignment, AssignmentStatus, ParseAssignmentStatusError,
};
pub use self::assignment_service::AssignmentService;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::directory_service::DirectoryService;
pub use self::disaster::{
    DISASTER_DESCRIPTION_MAX, DISASTER_LOCATION_MAX, DISASTER_NAME_MAX, Disaster, DisasterKind,
    DisasterStatus, ParseDisasterKindError, ParseDisasterStatusError, ParseSeverityLevelError,
    SeverityLevel,
};
pub use self::disaster_service::DisasterService;
pub use self::donation::{
    DONATION_NOTES_MAX, Donation, DonationStatus, ParseDonationStatusError,
};
pub use self::donation_service::DonationService;
pub use self::error::{Error, ErrorCode, ErrorDto, ErrorValidationError, TRACE_ID_HEADER};
pub use self::login::{DEVELOPMENT_PASSWORD, DirectoryLoginService};
pub use self::mission::{
    MISSION_DESCRIPTION_MAX, MISSION_TITLE_MAX, Mission, MissionPriority, MissionStatus,
    ParseMissionPriorityError, ParseMissionStatusError,
};
pub use self::mission_service::MissionService;
pub use self::permissions::{PermissionEngine, Permissions};
pub use self::reporting::{AdminCounts, AdminDashboard, ReliefOverview};
pub use self::reporting_service::ReportingService;
pub use self::resource::{
    CATEGORY_DESCRIPTION_MAX, CATEGORY_NAME_MAX, DEFAULT_THRESHOLD_QUANTITY,
    RESOURCE_DESCRIPTION_MAX, RESOURCE_NAME_MAX, RESOURCE_UNIT_MAX, Resource, ResourceCategory,
};
pub use self::resource_request::{
    Fulfilment, ParseRequestStatusError, ParseUrgencyLevelError, RequestStatus, ResourceRequest,
    UrgencyLevel,
};
pub use self::resource_request_service::ResourceRequestService;
pub use self::resource_service::ResourceService;
pub use self::user::{
    AccountWithRoles, EMAIL_MAX, EmailAddress, NAME_MAX, ParseRoleError, PersonName, Role,
    RoleSet, UserAccount, UserId, UserValidationError,
};
pub use self::volunteer::{
    ADDRESS_MAX, AvailabilityStatus, EMERGENCY_CONTACT_MAX, ParseAvailabilityStatusError,
    SKILLS_MAX, Volunteer, VolunteerRegistration,
};
pub use self::volunteer_service::VolunteerService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
