//! Resource request HTTP handlers.
//!
//! ```text
//! POST /api/resource-requests
//! GET /api/resource-requests
//! GET /api/resource-requests/{id}
//! POST /api/resource-requests/{id}/fulfil
//! PUT /api/resource-requests/{id}/status
//! DELETE /api/resource-requests/{id}
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::NewResourceRequest;
use crate::domain::{Error, Fulfilment, RequestStatus, ResourceRequest, UrgencyLevel};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_enum, parse_optional_rfc3339_timestamp, parse_uuid,
};

/// Request payload for opening a resource request.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenResourceRequestRequestBody {
    #[schema(format = "uuid")]
    pub disaster_id: String,
    #[schema(format = "uuid")]
    pub resource_id: String,
    pub quantity_requested: i32,
    pub urgency: String,
    #[schema(format = "date-time")]
    pub required_by: Option<String>,
}

/// Request payload for moving a request through review.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequestStatusRequestBody {
    pub status: String,
}

/// Response payload for a resource request.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequestResponse {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub disaster_id: String,
    #[schema(format = "uuid")]
    pub resource_id: String,
    pub quantity_requested: i32,
    pub urgency: String,
    pub status: String,
    #[schema(format = "uuid")]
    pub requested_by: String,
    #[schema(format = "date-time")]
    pub requested_at: String,
    #[schema(format = "date-time")]
    pub required_by: Option<String>,
}

/// Response payload for a fulfilment attempt.
///
/// A shortfall is a normal answer: `outcome` is `insufficient_stock`,
/// `request` is absent and the stock figures say how far short the
/// inventory fell.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FulfilResponseBody {
    pub outcome: String,
    pub request: Option<ResourceRequestResponse>,
    pub available: Option<i32>,
    pub requested: Option<i32>,
}

/// Response payload for withdrawing a request.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawRequestResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct ResourceRequestPath {
    id: String,
}

impl From<ResourceRequest> for ResourceRequestResponse {
    fn from(value: ResourceRequest) -> Self {
        Self {
            id: value.id.to_string(),
            disaster_id: value.disaster_id.to_string(),
            resource_id: value.resource_id.to_string(),
            quantity_requested: value.quantity_requested,
            urgency: value.urgency.as_str().to_owned(),
            status: value.status.as_str().to_owned(),
            requested_by: value.requested_by.to_string(),
            requested_at: value.requested_at.to_rfc3339(),
            required_by: value.required_by.map(|at| at.to_rfc3339()),
        }
    }
}

impl From<Fulfilment> for FulfilResponseBody {
    fn from(value: Fulfilment) -> Self {
        match value {
            Fulfilment::Completed(request) => Self {
                outcome: "fulfilled".to_owned(),
                request: Some(ResourceRequestResponse::from(request)),
                available: None,
                requested: None,
            },
            Fulfilment::InsufficientStock {
                available,
                requested,
            } => Self {
                outcome: "insufficient_stock".to_owned(),
                request: None,
                available: Some(available),
                requested: Some(requested),
            },
        }
    }
}

fn parse_new_request(payload: OpenResourceRequestRequestBody) -> Result<NewResourceRequest, Error> {
    Ok(NewResourceRequest {
        disaster_id: parse_uuid(payload.disaster_id, FieldName::new("disasterId"))?,
        resource_id: parse_uuid(payload.resource_id, FieldName::new("resourceId"))?,
        quantity_requested: payload.quantity_requested,
        urgency: parse_enum(
            payload.urgency,
            FieldName::new("urgency"),
            UrgencyLevel::ALLOWED,
        )?,
        required_by: parse_optional_rfc3339_timestamp(
            payload.required_by,
            FieldName::new("requiredBy"),
        )?,
    })
}

/// Open a request for stock against a disaster.
#[utoipa::path(
    post,
    path = "/api/resource-requests",
    request_body = OpenResourceRequestRequestBody,
    responses(
        (status = 200, description = "Request opened", body = ResourceRequestResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Unknown disaster or resource", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["resource-requests"],
    operation_id = "openResourceRequest",
    security(("SessionCookie" = []))
)]
#[post("/resource-requests")]
pub async fn open_resource_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<OpenResourceRequestRequestBody>,
) -> ApiResult<web::Json<ResourceRequestResponse>> {
    let caller = session.require_user_id()?;
    let request = parse_new_request(payload.into_inner())?;
    let opened = state.resource_requests.open(&caller, request).await?;
    Ok(web::Json(ResourceRequestResponse::from(opened)))
}

/// List every request on record, newest first.
#[utoipa::path(
    get,
    path = "/api/resource-requests",
    responses(
        (status = 200, description = "Requests", body = [ResourceRequestResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["resource-requests"],
    operation_id = "listResourceRequests",
    security(("SessionCookie" = []))
)]
#[get("/resource-requests")]
pub async fn list_resource_requests(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ResourceRequestResponse>>> {
    let caller = session.require_user_id()?;
    let requests = state.resource_requests_query.list(&caller).await?;
    Ok(web::Json(
        requests
            .into_iter()
            .map(ResourceRequestResponse::from)
            .collect(),
    ))
}

/// Fetch one request.
#[utoipa::path(
    get,
    path = "/api/resource-requests/{id}",
    params(("id" = String, Path, description = "Request identifier")),
    responses(
        (status = 200, description = "Request", body = ResourceRequestResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["resource-requests"],
    operation_id = "getResourceRequest",
    security(("SessionCookie" = []))
)]
#[get("/resource-requests/{id}")]
pub async fn get_resource_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ResourceRequestPath>,
) -> ApiResult<web::Json<ResourceRequestResponse>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    let request = state.resource_requests_query.get(&caller, id).await?;
    Ok(web::Json(ResourceRequestResponse::from(request)))
}

/// Attempt to fulfil a request.
#[utoipa::path(
    post,
    path = "/api/resource-requests/{id}/fulfil",
    params(("id" = String, Path, description = "Request identifier")),
    responses(
        (status = 200, description = "Fulfilment outcome", body = FulfilResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Request already closed", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["resource-requests"],
    operation_id = "fulfilResourceRequest",
    security(("SessionCookie" = []))
)]
#[post("/resource-requests/{id}/fulfil")]
pub async fn fulfil_resource_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ResourceRequestPath>,
) -> ApiResult<web::Json<FulfilResponseBody>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    let outcome = state.resource_requests.fulfil(&caller, id).await?;
    Ok(web::Json(FulfilResponseBody::from(outcome)))
}

/// Move a request through review without touching stock.
#[utoipa::path(
    put,
    path = "/api/resource-requests/{id}/status",
    params(("id" = String, Path, description = "Request identifier")),
    request_body = UpdateRequestStatusRequestBody,
    responses(
        (status = 200, description = "Request updated", body = ResourceRequestResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["resource-requests"],
    operation_id = "updateResourceRequestStatus",
    security(("SessionCookie" = []))
)]
#[put("/resource-requests/{id}/status")]
pub async fn update_resource_request_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ResourceRequestPath>,
    payload: web::Json<UpdateRequestStatusRequestBody>,
) -> ApiResult<web::Json<ResourceRequestResponse>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    let status = parse_enum(
        payload.into_inner().status,
        FieldName::new("status"),
        RequestStatus::ALLOWED,
    )?;
    let updated = state
        .resource_requests
        .update_status(&caller, id, status)
        .await?;
    Ok(web::Json(ResourceRequestResponse::from(updated)))
}

/// Withdraw a request outright.
#[utoipa::path(
    delete,
    path = "/api/resource-requests/{id}",
    params(("id" = String, Path, description = "Request identifier")),
    responses(
        (status = 200, description = "Request withdrawn", body = WithdrawRequestResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["resource-requests"],
    operation_id = "withdrawResourceRequest",
    security(("SessionCookie" = []))
)]
#[delete("/resource-requests/{id}")]
pub async fn withdraw_resource_request(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<ResourceRequestPath>,
) -> ApiResult<web::Json<WithdrawRequestResponseBody>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    state.resource_requests.withdraw(&caller, id).await?;
    Ok(web::Json(WithdrawRequestResponseBody {
        id: id.to_string(),
    }))
}

#[cfg(test)]
#[path = "resource_requests_tests.rs"]
mod tests;
