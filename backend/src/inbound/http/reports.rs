//! Reporting HTTP handlers.
//!
//! ```text
//! GET /api/reports/overview
//! GET /api/reports/dashboard
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{AdminDashboard, ReliefOverview};
use crate::inbound::http::ApiResult;
use crate::inbound::http::admin::AccountResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Response payload for the situation overview.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponseBody {
    pub disasters: i64,
    pub active_disasters: i64,
    pub volunteers: i64,
    pub active_missions: i64,
    pub donated_units: i64,
}

/// Response payload for the administrator dashboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponseBody {
    pub accounts: i64,
    pub disasters: i64,
    pub volunteers: i64,
    pub donations: i64,
    pub missions: i64,
    pub resource_requests: i64,
    pub low_stock_resources: i64,
    pub recent_accounts: Vec<AccountResponse>,
}

impl From<ReliefOverview> for OverviewResponseBody {
    fn from(value: ReliefOverview) -> Self {
        Self {
            disasters: value.disasters,
            active_disasters: value.active_disasters,
            volunteers: value.volunteers,
            active_missions: value.active_missions,
            donated_units: value.donated_units,
        }
    }
}

impl From<AdminDashboard> for DashboardResponseBody {
    fn from(value: AdminDashboard) -> Self {
        Self {
            accounts: value.accounts,
            disasters: value.disasters,
            volunteers: value.volunteers,
            donations: value.donations,
            missions: value.missions,
            resource_requests: value.resource_requests,
            low_stock_resources: value.low_stock_resources,
            recent_accounts: value
                .recent_accounts
                .into_iter()
                .map(AccountResponse::from)
                .collect(),
        }
    }
}

/// Situation overview counts, open to any signed-in account.
#[utoipa::path(
    get,
    path = "/api/reports/overview",
    responses(
        (status = 200, description = "Overview counts", body = OverviewResponseBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "reliefOverview",
    security(("SessionCookie" = []))
)]
#[get("/reports/overview")]
pub async fn relief_overview(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<OverviewResponseBody>> {
    let caller = session.require_user_id()?;
    let overview = state.reports.overview(&caller).await?;
    Ok(web::Json(OverviewResponseBody::from(overview)))
}

/// Administrative dashboard with counts and the latest accounts.
#[utoipa::path(
    get,
    path = "/api/reports/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = DashboardResponseBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "adminDashboard",
    security(("SessionCookie" = []))
)]
#[get("/reports/dashboard")]
pub async fn admin_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DashboardResponseBody>> {
    let caller = session.require_user_id()?;
    let dashboard = state.reports.admin_dashboard(&caller).await?;
    Ok(web::Json(DashboardResponseBody::from(dashboard)))
}
