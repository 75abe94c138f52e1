//! Mission HTTP handlers.
//!
//! ```text
//! POST /api/missions
//! GET /api/missions
//! GET /api/missions/mine
//! GET /api/missions/{id}
//! PUT /api/missions/{id}
//! PUT /api/missions/{id}/status
//! ```

use actix_web::{get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{MissionChanges, NewMission};
use crate::domain::{Error, Mission, MissionPriority, MissionStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_enum, parse_optional_rfc3339_timestamp, parse_optional_uuid, parse_uuid,
};

/// Request payload for creating a mission.
///
/// `priority` defaults to `Medium` when omitted.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMissionRequestBody {
    #[schema(format = "uuid")]
    pub disaster_id: String,
    pub title: String,
    pub description: Option<String>,
    #[schema(format = "uuid")]
    pub assigned_to: Option<String>,
    pub priority: Option<String>,
    #[schema(format = "date-time")]
    pub due_at: Option<String>,
}

/// Full replacement payload for updating a mission.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMissionRequestBody {
    pub title: String,
    pub description: Option<String>,
    #[schema(format = "uuid")]
    pub assigned_to: Option<String>,
    pub status: String,
    pub priority: String,
    #[schema(format = "date-time")]
    pub due_at: Option<String>,
    pub expected_version: u32,
}

/// Request payload for moving a mission through its lifecycle.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMissionStatusRequestBody {
    pub status: String,
}

/// Response payload for a mission.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MissionResponse {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub disaster_id: String,
    pub title: String,
    pub description: Option<String>,
    #[schema(format = "uuid")]
    pub assigned_to: Option<String>,
    pub status: String,
    pub priority: String,
    #[schema(format = "date-time")]
    pub due_at: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "uuid")]
    pub created_by: String,
    pub version: u32,
}

#[derive(Debug, Deserialize)]
struct MissionPath {
    id: String,
}

impl From<Mission> for MissionResponse {
    fn from(value: Mission) -> Self {
        Self {
            id: value.id.to_string(),
            disaster_id: value.disaster_id.to_string(),
            title: value.title,
            description: value.description,
            assigned_to: value.assigned_to.map(|id| id.to_string()),
            status: value.status.as_str().to_owned(),
            priority: value.priority.as_str().to_owned(),
            due_at: value.due_at.map(|at| at.to_rfc3339()),
            created_at: value.created_at.to_rfc3339(),
            created_by: value.created_by.to_string(),
            version: value.version,
        }
    }
}

fn parse_new_mission(payload: CreateMissionRequestBody) -> Result<NewMission, Error> {
    Ok(NewMission {
        disaster_id: parse_uuid(payload.disaster_id, FieldName::new("disasterId"))?,
        title: payload.title,
        description: payload.description,
        assigned_to: parse_optional_uuid(payload.assigned_to, FieldName::new("assignedTo"))?,
        priority: payload
            .priority
            .map(|raw| parse_enum(raw, FieldName::new("priority"), MissionPriority::ALLOWED))
            .transpose()?
            .unwrap_or(MissionPriority::Medium),
        due_at: parse_optional_rfc3339_timestamp(payload.due_at, FieldName::new("dueAt"))?,
    })
}

fn parse_mission_changes(payload: UpdateMissionRequestBody) -> Result<MissionChanges, Error> {
    Ok(MissionChanges {
        title: payload.title,
        description: payload.description,
        assigned_to: parse_optional_uuid(payload.assigned_to, FieldName::new("assignedTo"))?,
        status: parse_enum(
            payload.status,
            FieldName::new("status"),
            MissionStatus::ALLOWED,
        )?,
        priority: parse_enum(
            payload.priority,
            FieldName::new("priority"),
            MissionPriority::ALLOWED,
        )?,
        due_at: parse_optional_rfc3339_timestamp(payload.due_at, FieldName::new("dueAt"))?,
        expected_version: payload.expected_version,
    })
}

/// Create a mission within a disaster.
#[utoipa::path(
    post,
    path = "/api/missions",
    request_body = CreateMissionRequestBody,
    responses(
        (status = 200, description = "Mission created", body = MissionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Unknown disaster or volunteer", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["missions"],
    operation_id = "createMission",
    security(("SessionCookie" = []))
)]
#[post("/missions")]
pub async fn create_mission(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateMissionRequestBody>,
) -> ApiResult<web::Json<MissionResponse>> {
    let caller = session.require_user_id()?;
    let mission = parse_new_mission(payload.into_inner())?;
    let created = state.missions.create(&caller, mission).await?;
    Ok(web::Json(MissionResponse::from(created)))
}

/// List every mission on record, newest first.
#[utoipa::path(
    get,
    path = "/api/missions",
    responses(
        (status = 200, description = "Missions", body = [MissionResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["missions"],
    operation_id = "listMissions",
    security(("SessionCookie" = []))
)]
#[get("/missions")]
pub async fn list_missions(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<MissionResponse>>> {
    let caller = session.require_user_id()?;
    let missions = state.missions_query.list(&caller).await?;
    Ok(web::Json(
        missions.into_iter().map(MissionResponse::from).collect(),
    ))
}

/// List missions assigned to the caller's volunteer profile.
#[utoipa::path(
    get,
    path = "/api/missions/mine",
    responses(
        (status = 200, description = "Missions", body = [MissionResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["missions"],
    operation_id = "myMissions",
    security(("SessionCookie" = []))
)]
#[get("/missions/mine")]
pub async fn my_missions(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<MissionResponse>>> {
    let caller = session.require_user_id()?;
    let missions = state.missions_query.list_mine(&caller).await?;
    Ok(web::Json(
        missions.into_iter().map(MissionResponse::from).collect(),
    ))
}

/// Fetch one mission.
#[utoipa::path(
    get,
    path = "/api/missions/{id}",
    params(("id" = String, Path, description = "Mission identifier")),
    responses(
        (status = 200, description = "Mission", body = MissionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["missions"],
    operation_id = "getMission",
    security(("SessionCookie" = []))
)]
#[get("/missions/{id}")]
pub async fn get_mission(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<MissionPath>,
) -> ApiResult<web::Json<MissionResponse>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    let mission = state.missions_query.get(&caller, id).await?;
    Ok(web::Json(MissionResponse::from(mission)))
}

/// Apply a full update to a mission.
#[utoipa::path(
    put,
    path = "/api/missions/{id}",
    params(("id" = String, Path, description = "Mission identifier")),
    request_body = UpdateMissionRequestBody,
    responses(
        (status = 200, description = "Mission updated", body = MissionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Version conflict", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["missions"],
    operation_id = "updateMission",
    security(("SessionCookie" = []))
)]
#[put("/missions/{id}")]
pub async fn update_mission(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<MissionPath>,
    payload: web::Json<UpdateMissionRequestBody>,
) -> ApiResult<web::Json<MissionResponse>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    let changes = parse_mission_changes(payload.into_inner())?;
    let updated = state.missions.update(&caller, id, changes).await?;
    Ok(web::Json(MissionResponse::from(updated)))
}

/// Move a mission through its lifecycle.
#[utoipa::path(
    put,
    path = "/api/missions/{id}/status",
    params(("id" = String, Path, description = "Mission identifier")),
    request_body = UpdateMissionStatusRequestBody,
    responses(
        (status = 200, description = "Mission updated", body = MissionResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["missions"],
    operation_id = "updateMissionStatus",
    security(("SessionCookie" = []))
)]
#[put("/missions/{id}/status")]
pub async fn update_mission_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<MissionPath>,
    payload: web::Json<UpdateMissionStatusRequestBody>,
) -> ApiResult<web::Json<MissionResponse>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    let status = parse_enum(
        payload.into_inner().status,
        FieldName::new("status"),
        MissionStatus::ALLOWED,
    )?;
    let updated = state.missions.update_status(&caller, id, status).await?;
    Ok(web::Json(MissionResponse::from(updated)))
}

#[cfg(test)]
#[path = "missions_tests.rs"]
mod tests;
