//! Assignment HTTP handlers.
//!
//! ```text
//! POST /api/assignments
//! GET /api/assignments
//! GET /api/assignments/mine
//! GET /api/assignments/{id}
//! PUT /api/assignments/{id}/status
//! DELETE /api/assignments/{id}
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::NewAssignment;
use crate::domain::{Assignment, AssignmentStatus, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_enum, parse_uuid};

/// Request payload for deploying a volunteer to a disaster.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequestBody {
    #[schema(format = "uuid")]
    pub volunteer_id: String,
    #[schema(format = "uuid")]
    pub disaster_id: String,
    pub role: Option<String>,
}

/// Request payload for moving an assignment through its lifecycle.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignmentStatusRequestBody {
    pub status: String,
}

/// Response payload for an assignment.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub volunteer_id: String,
    #[schema(format = "uuid")]
    pub disaster_id: String,
    #[schema(format = "date-time")]
    pub assigned_at: String,
    pub role: Option<String>,
    pub status: String,
    #[schema(format = "uuid")]
    pub assigned_by: String,
}

/// Response payload for withdrawing an assignment.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawAssignmentResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct AssignmentPath {
    id: String,
}

impl From<Assignment> for AssignmentResponse {
    fn from(value: Assignment) -> Self {
        Self {
            id: value.id.to_string(),
            volunteer_id: value.volunteer_id.to_string(),
            disaster_id: value.disaster_id.to_string(),
            assigned_at: value.assigned_at.to_rfc3339(),
            role: value.role,
            status: value.status.as_str().to_owned(),
            assigned_by: value.assigned_by.to_string(),
        }
    }
}

fn parse_new_assignment(payload: CreateAssignmentRequestBody) -> Result<NewAssignment, Error> {
    Ok(NewAssignment {
        volunteer_id: parse_uuid(payload.volunteer_id, FieldName::new("volunteerId"))?,
        disaster_id: parse_uuid(payload.disaster_id, FieldName::new("disasterId"))?,
        role: payload.role,
    })
}

/// Deploy a volunteer to a disaster.
#[utoipa::path(
    post,
    path = "/api/assignments",
    request_body = CreateAssignmentRequestBody,
    responses(
        (status = 200, description = "Volunteer assigned", body = AssignmentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Unknown volunteer or disaster", body = ErrorSchema),
        (status = 409, description = "Already assigned", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["assignments"],
    operation_id = "createAssignment",
    security(("SessionCookie" = []))
)]
#[post("/assignments")]
pub async fn create_assignment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateAssignmentRequestBody>,
) -> ApiResult<web::Json<AssignmentResponse>> {
    let caller = session.require_user_id()?;
    let assignment = parse_new_assignment(payload.into_inner())?;
    let created = state.assignments.assign(&caller, assignment).await?;
    Ok(web::Json(AssignmentResponse::from(created)))
}

/// List every assignment on record, newest first.
#[utoipa::path(
    get,
    path = "/api/assignments",
    responses(
        (status = 200, description = "Assignments", body = [AssignmentResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["assignments"],
    operation_id = "listAssignments",
    security(("SessionCookie" = []))
)]
#[get("/assignments")]
pub async fn list_assignments(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<AssignmentResponse>>> {
    let caller = session.require_user_id()?;
    let assignments = state.assignments_query.list(&caller).await?;
    Ok(web::Json(
        assignments
            .into_iter()
            .map(AssignmentResponse::from)
            .collect(),
    ))
}

/// List the caller's own assignments, newest first.
#[utoipa::path(
    get,
    path = "/api/assignments/mine",
    responses(
        (status = 200, description = "Assignments", body = [AssignmentResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No volunteer profile", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["assignments"],
    operation_id = "myAssignments",
    security(("SessionCookie" = []))
)]
#[get("/assignments/mine")]
pub async fn my_assignments(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<AssignmentResponse>>> {
    let caller = session.require_user_id()?;
    let assignments = state.assignments_query.list_mine(&caller).await?;
    Ok(web::Json(
        assignments
            .into_iter()
            .map(AssignmentResponse::from)
            .collect(),
    ))
}

/// Fetch one assignment.
#[utoipa::path(
    get,
    path = "/api/assignments/{id}",
    params(("id" = String, Path, description = "Assignment identifier")),
    responses(
        (status = 200, description = "Assignment", body = AssignmentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["assignments"],
    operation_id = "getAssignment",
    security(("SessionCookie" = []))
)]
#[get("/assignments/{id}")]
pub async fn get_assignment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<AssignmentPath>,
) -> ApiResult<web::Json<AssignmentResponse>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    let assignment = state.assignments_query.get(&caller, id).await?;
    Ok(web::Json(AssignmentResponse::from(assignment)))
}

/// Move an assignment through its lifecycle.
#[utoipa::path(
    put,
    path = "/api/assignments/{id}/status",
    params(("id" = String, Path, description = "Assignment identifier")),
    request_body = UpdateAssignmentStatusRequestBody,
    responses(
        (status = 200, description = "Assignment updated", body = AssignmentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["assignments"],
    operation_id = "updateAssignmentStatus",
    security(("SessionCookie" = []))
)]
#[put("/assignments/{id}/status")]
pub async fn update_assignment_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<AssignmentPath>,
    payload: web::Json<UpdateAssignmentStatusRequestBody>,
) -> ApiResult<web::Json<AssignmentResponse>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    let status = parse_enum(
        payload.into_inner().status,
        FieldName::new("status"),
        AssignmentStatus::ALLOWED,
    )?;
    let updated = state
        .assignments
        .update_status(&caller, id, status)
        .await?;
    Ok(web::Json(AssignmentResponse::from(updated)))
}

/// Withdraw an assignment outright.
#[utoipa::path(
    delete,
    path = "/api/assignments/{id}",
    params(("id" = String, Path, description = "Assignment identifier")),
    responses(
        (status = 200, description = "Assignment withdrawn", body = WithdrawAssignmentResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["assignments"],
    operation_id = "withdrawAssignment",
    security(("SessionCookie" = []))
)]
#[delete("/assignments/{id}")]
pub async fn withdraw_assignment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<AssignmentPath>,
) -> ApiResult<web::Json<WithdrawAssignmentResponseBody>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    state.assignments.withdraw(&caller, id).await?;
    Ok(web::Json(WithdrawAssignmentResponseBody {
        id: id.to_string(),
    }))
}

#[cfg(test)]
#[path = "assignments_tests.rs"]
mod tests;
