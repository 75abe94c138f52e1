//! Authentication HTTP handlers.
//!
//! ```text
//! POST /api/login {"email":"nomsa@example.org","password":"..."}
//! POST /api/logout
//! GET /api/session
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, LoginValidationError, Permissions};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestBody {
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequestBody> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequestBody) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Response payload for a successful login.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseBody {
    #[schema(format = "uuid")]
    pub user_id: String,
}

/// Response payload for logout.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponseBody {
    pub signed_out: bool,
}

/// The caller's capability flags, for client-side UI gating.
///
/// These mirror the server-side checks; the server re-evaluates every
/// operation regardless of what a client renders.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionFlagsBody {
    pub view_disasters: bool,
    pub create_disasters: bool,
    pub edit_own_disasters: bool,
    pub edit_all_disasters: bool,
    pub delete_disasters: bool,
    pub resolve_disasters: bool,
    pub view_volunteers: bool,
    pub register_as_volunteer: bool,
    pub edit_own_volunteer: bool,
    pub edit_all_volunteers: bool,
    pub contact_volunteers: bool,
    pub view_donations: bool,
    pub create_donations: bool,
    pub manage_donations: bool,
    pub view_missions: bool,
    pub create_missions: bool,
    pub assign_missions: bool,
    pub manage_missions: bool,
    pub manage_users: bool,
    pub manage_system: bool,
    pub view_reports: bool,
}

impl From<Permissions> for PermissionFlagsBody {
    fn from(value: Permissions) -> Self {
        let Permissions {
            view_disasters,
            create_disasters,
            edit_own_disasters,
            edit_all_disasters,
            delete_disasters,
            resolve_disasters,
            view_volunteers,
            register_as_volunteer,
            edit_own_volunteer,
            edit_all_volunteers,
            contact_volunteers,
            view_donations,
            create_donations,
            manage_donations,
            view_missions,
            create_missions,
            assign_missions,
            manage_missions,
            manage_users,
            manage_system,
            view_reports,
        } = value;
        Self {
            view_disasters,
            create_disasters,
            edit_own_disasters,
            edit_all_disasters,
            delete_disasters,
            resolve_disasters,
            view_volunteers,
            register_as_volunteer,
            edit_own_volunteer,
            edit_all_volunteers,
            contact_volunteers,
            view_donations,
            create_donations,
            manage_donations,
            view_missions,
            create_missions,
            assign_missions,
            manage_missions,
            manage_users,
            manage_system,
            view_reports,
        }
    }
}

/// Response payload describing the current session.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfoResponseBody {
    #[schema(format = "uuid")]
    pub user_id: String,
    pub permissions: PermissionFlagsBody,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequestBody,
    responses(
        (
            status = 200,
            description = "Login success",
            body = LoginResponseBody,
            headers(("Set-Cookie" = String, description = "Session cookie"))
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequestBody>,
) -> ApiResult<web::Json<LoginResponseBody>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(credentials).await?;
    session.persist_user(&user_id)?;
    Ok(web::Json(LoginResponseBody {
        user_id: user_id.to_string(),
    }))
}

/// Discard the current session.
///
/// Signing out without a session is fine; the handler purges whatever
/// cookie arrived and reports success either way.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Session cleared", body = LogoutResponseBody)
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<web::Json<LogoutResponseBody>> {
    session.clear();
    Ok(web::Json(LogoutResponseBody { signed_out: true }))
}

/// Describe the signed-in user and their capability flags.
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Current session", body = SessionInfoResponseBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentSession",
    security(("SessionCookie" = []))
)]
#[get("/session")]
pub async fn current_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SessionInfoResponseBody>> {
    let user_id = session.require_user_id()?;
    let permissions = state.permissions.permissions_for(&user_id, None).await?;
    Ok(web::Json(SessionInfoResponseBody {
        user_id: user_id.to_string(),
        permissions: permissions.into(),
    }))
}
