//! Donation HTTP handlers.
//!
//! ```text
//! POST /api/donations
//! GET /api/donations
//! GET /api/donations/mine
//! GET /api/donations/{id}
//! PUT /api/donations/{id}/status
//! ```

use actix_web::{get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::NewDonation;
use crate::domain::{Donation, DonationStatus, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_enum, parse_uuid};

/// Request payload for pledging a donation.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PledgeDonationRequestBody {
    #[schema(format = "uuid")]
    pub resource_id: String,
    pub quantity: i32,
    pub notes: Option<String>,
}

/// Request payload for moving a donation through its lifecycle.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDonationStatusRequestBody {
    pub status: String,
}

/// Response payload for a donation.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationResponse {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub donor_id: String,
    #[schema(format = "uuid")]
    pub resource_id: String,
    pub quantity: i32,
    #[schema(format = "date-time")]
    pub donated_at: String,
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DonationPath {
    id: String,
}

impl From<Donation> for DonationResponse {
    fn from(value: Donation) -> Self {
        Self {
            id: value.id.to_string(),
            donor_id: value.donor_id.to_string(),
            resource_id: value.resource_id.to_string(),
            quantity: value.quantity,
            donated_at: value.donated_at.to_rfc3339(),
            status: value.status.as_str().to_owned(),
            notes: value.notes,
        }
    }
}

fn parse_new_donation(payload: PledgeDonationRequestBody) -> Result<NewDonation, Error> {
    Ok(NewDonation {
        resource_id: parse_uuid(payload.resource_id, FieldName::new("resourceId"))?,
        quantity: payload.quantity,
        notes: payload.notes,
    })
}

/// Pledge a donation against a resource.
#[utoipa::path(
    post,
    path = "/api/donations",
    request_body = PledgeDonationRequestBody,
    responses(
        (status = 200, description = "Donation pledged", body = DonationResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Unknown resource", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["donations"],
    operation_id = "pledgeDonation",
    security(("SessionCookie" = []))
)]
#[post("/donations")]
pub async fn pledge_donation(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PledgeDonationRequestBody>,
) -> ApiResult<web::Json<DonationResponse>> {
    let caller = session.require_user_id()?;
    let donation = parse_new_donation(payload.into_inner())?;
    let pledged = state.donations.pledge(&caller, donation).await?;
    Ok(web::Json(DonationResponse::from(pledged)))
}

/// List every donation on record, newest first.
#[utoipa::path(
    get,
    path = "/api/donations",
    responses(
        (status = 200, description = "Donations", body = [DonationResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["donations"],
    operation_id = "listDonations",
    security(("SessionCookie" = []))
)]
#[get("/donations")]
pub async fn list_donations(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<DonationResponse>>> {
    let caller = session.require_user_id()?;
    let donations = state.donations_query.list_all(&caller).await?;
    Ok(web::Json(
        donations.into_iter().map(DonationResponse::from).collect(),
    ))
}

/// List the caller's own donations, newest first.
#[utoipa::path(
    get,
    path = "/api/donations/mine",
    responses(
        (status = 200, description = "Donations", body = [DonationResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["donations"],
    operation_id = "myDonations",
    security(("SessionCookie" = []))
)]
#[get("/donations/mine")]
pub async fn my_donations(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<DonationResponse>>> {
    let caller = session.require_user_id()?;
    let donations = state.donations_query.list_mine(&caller).await?;
    Ok(web::Json(
        donations.into_iter().map(DonationResponse::from).collect(),
    ))
}

/// Fetch one donation.
#[utoipa::path(
    get,
    path = "/api/donations/{id}",
    params(("id" = String, Path, description = "Donation identifier")),
    responses(
        (status = 200, description = "Donation", body = DonationResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["donations"],
    operation_id = "getDonation",
    security(("SessionCookie" = []))
)]
#[get("/donations/{id}")]
pub async fn get_donation(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<DonationPath>,
) -> ApiResult<web::Json<DonationResponse>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    let donation = state.donations_query.get(&caller, id).await?;
    Ok(web::Json(DonationResponse::from(donation)))
}

/// Move a donation through its lifecycle.
#[utoipa::path(
    put,
    path = "/api/donations/{id}/status",
    params(("id" = String, Path, description = "Donation identifier")),
    request_body = UpdateDonationStatusRequestBody,
    responses(
        (status = 200, description = "Donation updated", body = DonationResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["donations"],
    operation_id = "updateDonationStatus",
    security(("SessionCookie" = []))
)]
#[put("/donations/{id}/status")]
pub async fn update_donation_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<DonationPath>,
    payload: web::Json<UpdateDonationStatusRequestBody>,
) -> ApiResult<web::Json<DonationResponse>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    let status = parse_enum(
        payload.into_inner().status,
        FieldName::new("status"),
        DonationStatus::ALLOWED,
    )?;
    let updated = state.donations.update_status(&caller, id, status).await?;
    Ok(web::Json(DonationResponse::from(updated)))
}

#[cfg(test)]
#[path = "donations_tests.rs"]
mod tests;
