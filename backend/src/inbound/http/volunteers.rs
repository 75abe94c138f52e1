//! Volunteer profile HTTP handlers.
//!
//! ```text
//! POST /api/volunteers
//! GET /api/volunteers
//! GET /api/volunteers/me
//! GET /api/volunteers/{id}
//! PUT /api/volunteers/{id}
//! ```

use actix_web::{get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{VolunteerChanges, VolunteerSignup};
use crate::domain::{AvailabilityStatus, Error, Volunteer};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_enum, parse_uuid};

/// Request payload for registering as a volunteer.
///
/// `availability` defaults to `Available` when omitted.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterVolunteerRequestBody {
    pub skills: Option<String>,
    pub availability: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
}

/// Full replacement payload for updating a volunteer profile.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVolunteerRequestBody {
    pub skills: Option<String>,
    pub availability: String,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub expected_version: u32,
}

/// Response payload for a volunteer profile.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerResponse {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub user_id: String,
    pub skills: Option<String>,
    pub availability: String,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    #[schema(format = "date-time")]
    pub registered_at: String,
    pub version: u32,
}

/// Response payload for a registration request.
///
/// Registration is idempotent; `created` is false when the account already
/// had a profile and the existing one is returned unchanged.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterVolunteerResponseBody {
    pub created: bool,
    pub volunteer: VolunteerResponse,
}

#[derive(Debug, Deserialize)]
struct VolunteerPath {
    id: String,
}

impl From<Volunteer> for VolunteerResponse {
    fn from(value: Volunteer) -> Self {
        Self {
            id: value.id.to_string(),
            user_id: value.user_id.to_string(),
            skills: value.skills,
            availability: value.availability.as_str().to_owned(),
            address: value.address,
            emergency_contact: value.emergency_contact,
            registered_at: value.registered_at.to_rfc3339(),
            version: value.version,
        }
    }
}

fn parse_signup(payload: RegisterVolunteerRequestBody) -> Result<VolunteerSignup, Error> {
    let availability = payload
        .availability
        .map(|raw| {
            parse_enum(
                raw,
                FieldName::new("availability"),
                AvailabilityStatus::ALLOWED,
            )
        })
        .transpose()?
        .unwrap_or_default();
    Ok(VolunteerSignup {
        skills: payload.skills,
        availability,
        address: payload.address,
        emergency_contact: payload.emergency_contact,
    })
}

fn parse_volunteer_changes(payload: UpdateVolunteerRequestBody) -> Result<VolunteerChanges, Error> {
    Ok(VolunteerChanges {
        skills: payload.skills,
        availability: parse_enum(
            payload.availability,
            FieldName::new("availability"),
            AvailabilityStatus::ALLOWED,
        )?,
        address: payload.address,
        emergency_contact: payload.emergency_contact,
        expected_version: payload.expected_version,
    })
}

/// Register the caller as a volunteer.
#[utoipa::path(
    post,
    path = "/api/volunteers",
    request_body = RegisterVolunteerRequestBody,
    responses(
        (status = 200, description = "Profile created or already registered", body = RegisterVolunteerResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["volunteers"],
    operation_id = "registerVolunteer",
    security(("SessionCookie" = []))
)]
#[post("/volunteers")]
pub async fn register_volunteer(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterVolunteerRequestBody>,
) -> ApiResult<web::Json<RegisterVolunteerResponseBody>> {
    let caller = session.require_user_id()?;
    let signup = parse_signup(payload.into_inner())?;
    let registration = state.volunteers.register(&caller, signup).await?;
    let created = registration.is_created();
    Ok(web::Json(RegisterVolunteerResponseBody {
        created,
        volunteer: VolunteerResponse::from(registration.profile().clone()),
    }))
}

/// List all volunteer profiles, newest registration first.
#[utoipa::path(
    get,
    path = "/api/volunteers",
    responses(
        (status = 200, description = "Volunteers", body = [VolunteerResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["volunteers"],
    operation_id = "listVolunteers",
    security(("SessionCookie" = []))
)]
#[get("/volunteers")]
pub async fn list_volunteers(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<VolunteerResponse>>> {
    let caller = session.require_user_id()?;
    let volunteers = state.volunteers_query.list(&caller).await?;
    Ok(web::Json(
        volunteers
            .into_iter()
            .map(VolunteerResponse::from)
            .collect(),
    ))
}

/// Fetch the caller's own volunteer profile.
#[utoipa::path(
    get,
    path = "/api/volunteers/me",
    responses(
        (status = 200, description = "Profile", body = VolunteerResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Caller has not registered", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["volunteers"],
    operation_id = "myVolunteerProfile",
    security(("SessionCookie" = []))
)]
#[get("/volunteers/me")]
pub async fn my_volunteer_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<VolunteerResponse>> {
    let caller = session.require_user_id()?;
    let profile = state
        .volunteers_query
        .my_profile(&caller)
        .await?
        .ok_or_else(|| Error::not_found("no volunteer profile for this account"))?;
    Ok(web::Json(VolunteerResponse::from(profile)))
}

/// Fetch one volunteer profile.
#[utoipa::path(
    get,
    path = "/api/volunteers/{id}",
    params(("id" = String, Path, description = "Volunteer profile identifier")),
    responses(
        (status = 200, description = "Profile", body = VolunteerResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["volunteers"],
    operation_id = "getVolunteer",
    security(("SessionCookie" = []))
)]
#[get("/volunteers/{id}")]
pub async fn get_volunteer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<VolunteerPath>,
) -> ApiResult<web::Json<VolunteerResponse>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    let profile = state.volunteers_query.get(&caller, id).await?;
    Ok(web::Json(VolunteerResponse::from(profile)))
}

/// Apply a full update to a volunteer profile.
///
/// Volunteers may edit their own profile; editing someone else's needs the
/// broader capability.
#[utoipa::path(
    put,
    path = "/api/volunteers/{id}",
    request_body = UpdateVolunteerRequestBody,
    params(("id" = String, Path, description = "Volunteer profile identifier")),
    responses(
        (status = 200, description = "Profile updated", body = VolunteerResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Version conflict", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["volunteers"],
    operation_id = "updateVolunteer",
    security(("SessionCookie" = []))
)]
#[put("/volunteers/{id}")]
pub async fn update_volunteer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<VolunteerPath>,
    payload: web::Json<UpdateVolunteerRequestBody>,
) -> ApiResult<web::Json<VolunteerResponse>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    let changes = parse_volunteer_changes(payload.into_inner())?;
    let updated = state.volunteers.update(&caller, id, changes).await?;
    Ok(web::Json(VolunteerResponse::from(updated)))
}

#[cfg(test)]
#[path = "volunteers_tests.rs"]
mod tests;
