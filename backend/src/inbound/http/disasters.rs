//! Disaster HTTP handlers.
//!
//! ```text
//! POST /api/disasters
//! GET /api/disasters
//! GET /api/disasters/{id}
//! PUT /api/disasters/{id}
//! POST /api/disasters/{id}/resolve
//! DELETE /api/disasters/{id}
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{DisasterChanges, NewDisaster};
use crate::domain::{Disaster, DisasterKind, DisasterStatus, Error, SeverityLevel};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_enum, parse_uuid};

/// Request payload for reporting a disaster.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportDisasterRequestBody {
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub kind: String,
    pub severity: String,
    pub estimated_affected: Option<i32>,
}

/// Full replacement payload for updating a disaster.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDisasterRequestBody {
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub kind: String,
    pub severity: String,
    pub status: String,
    pub estimated_affected: Option<i32>,
    pub expected_version: u32,
}

/// Response payload for a disaster.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DisasterResponse {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub kind: String,
    pub severity: String,
    pub status: String,
    #[schema(format = "date-time")]
    pub started_at: String,
    pub estimated_affected: Option<i32>,
    #[schema(format = "uuid")]
    pub reported_by: String,
    pub version: u32,
}

/// Response payload for deleting a disaster.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDisasterResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct DisasterPath {
    id: String,
}

impl From<Disaster> for DisasterResponse {
    fn from(value: Disaster) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            location: value.location,
            description: value.description,
            kind: value.kind.as_str().to_owned(),
            severity: value.severity.as_str().to_owned(),
            status: value.status.as_str().to_owned(),
            started_at: value.started_at.to_rfc3339(),
            estimated_affected: value.estimated_affected,
            reported_by: value.reported_by.to_string(),
            version: value.version,
        }
    }
}

fn parse_new_disaster(payload: ReportDisasterRequestBody) -> Result<NewDisaster, Error> {
    Ok(NewDisaster {
        name: payload.name,
        location: payload.location,
        description: payload.description,
        kind: parse_enum(payload.kind, FieldName::new("kind"), DisasterKind::ALLOWED)?,
        severity: parse_enum(
            payload.severity,
            FieldName::new("severity"),
            SeverityLevel::ALLOWED,
        )?,
        estimated_affected: payload.estimated_affected,
    })
}

fn parse_disaster_changes(payload: UpdateDisasterRequestBody) -> Result<DisasterChanges, Error> {
    Ok(DisasterChanges {
        name: payload.name,
        location: payload.location,
        description: payload.description,
        kind: parse_enum(payload.kind, FieldName::new("kind"), DisasterKind::ALLOWED)?,
        severity: parse_enum(
            payload.severity,
            FieldName::new("severity"),
            SeverityLevel::ALLOWED,
        )?,
        status: parse_enum(
            payload.status,
            FieldName::new("status"),
            DisasterStatus::ALLOWED,
        )?,
        estimated_affected: payload.estimated_affected,
        expected_version: payload.expected_version,
    })
}

/// Report a new disaster.
#[utoipa::path(
    post,
    path = "/api/disasters",
    request_body = ReportDisasterRequestBody,
    responses(
        (status = 200, description = "Disaster reported", body = DisasterResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["disasters"],
    operation_id = "reportDisaster",
    security(("SessionCookie" = []))
)]
#[post("/disasters")]
pub async fn report_disaster(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ReportDisasterRequestBody>,
) -> ApiResult<web::Json<DisasterResponse>> {
    let caller = session.require_user_id()?;
    let disaster = parse_new_disaster(payload.into_inner())?;
    let created = state.disasters.report(&caller, disaster).await?;
    Ok(web::Json(DisasterResponse::from(created)))
}

/// List all disasters, newest first.
#[utoipa::path(
    get,
    path = "/api/disasters",
    responses(
        (status = 200, description = "Disasters", body = [DisasterResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["disasters"],
    operation_id = "listDisasters",
    security(("SessionCookie" = []))
)]
#[get("/disasters")]
pub async fn list_disasters(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<DisasterResponse>>> {
    let caller = session.require_user_id()?;
    let disasters = state.disasters_query.list(&caller).await?;
    Ok(web::Json(
        disasters.into_iter().map(DisasterResponse::from).collect(),
    ))
}

/// Fetch one disaster.
#[utoipa::path(
    get,
    path = "/api/disasters/{id}",
    params(("id" = String, Path, description = "Disaster identifier")),
    responses(
        (status = 200, description = "Disaster", body = DisasterResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["disasters"],
    operation_id = "getDisaster",
    security(("SessionCookie" = []))
)]
#[get("/disasters/{id}")]
pub async fn get_disaster(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<DisasterPath>,
) -> ApiResult<web::Json<DisasterResponse>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    let disaster = state.disasters_query.get(&caller, id).await?;
    Ok(web::Json(DisasterResponse::from(disaster)))
}

/// Apply a full update to a disaster.
#[utoipa::path(
    put,
    path = "/api/disasters/{id}",
    request_body = UpdateDisasterRequestBody,
    params(("id" = String, Path, description = "Disaster identifier")),
    responses(
        (status = 200, description = "Disaster updated", body = DisasterResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Version conflict", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["disasters"],
    operation_id = "updateDisaster",
    security(("SessionCookie" = []))
)]
#[put("/disasters/{id}")]
pub async fn update_disaster(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<DisasterPath>,
    payload: web::Json<UpdateDisasterRequestBody>,
) -> ApiResult<web::Json<DisasterResponse>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    let changes = parse_disaster_changes(payload.into_inner())?;
    let updated = state.disasters.update(&caller, id, changes).await?;
    Ok(web::Json(DisasterResponse::from(updated)))
}

/// Mark a disaster as resolved.
#[utoipa::path(
    post,
    path = "/api/disasters/{id}/resolve",
    params(("id" = String, Path, description = "Disaster identifier")),
    responses(
        (status = 200, description = "Disaster resolved", body = DisasterResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Concurrent modification", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["disasters"],
    operation_id = "resolveDisaster",
    security(("SessionCookie" = []))
)]
#[post("/disasters/{id}/resolve")]
pub async fn resolve_disaster(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<DisasterPath>,
) -> ApiResult<web::Json<DisasterResponse>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    let resolved = state.disasters.resolve(&caller, id).await?;
    Ok(web::Json(DisasterResponse::from(resolved)))
}

/// Delete a disaster outright.
#[utoipa::path(
    delete,
    path = "/api/disasters/{id}",
    params(("id" = String, Path, description = "Disaster identifier")),
    responses(
        (status = 200, description = "Disaster deleted", body = DeleteDisasterResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Disaster still referenced", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["disasters"],
    operation_id = "deleteDisaster",
    security(("SessionCookie" = []))
)]
#[delete("/disasters/{id}")]
pub async fn delete_disaster(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<DisasterPath>,
) -> ApiResult<web::Json<DeleteDisasterResponseBody>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    state.disasters.delete(&caller, id).await?;
    Ok(web::Json(DeleteDisasterResponseBody { id: id.to_string() }))
}

#[cfg(test)]
#[path = "disasters_tests.rs"]
mod tests;
