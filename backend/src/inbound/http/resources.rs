//! Inventory HTTP handlers: resource categories and resources.
//!
//! ```text
//! POST /api/categories
//! GET /api/categories
//! PUT /api/categories/{id}
//! DELETE /api/categories/{id}
//! POST /api/resources
//! GET /api/resources
//! GET /api/resources/low-stock
//! GET /api/resources/{id}
//! PUT /api/resources/{id}
//! DELETE /api/resources/{id}
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CategoryChanges, NewCategory, NewResource, ResourceChanges};
use crate::domain::{Error, Resource, ResourceCategory};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Request payload for creating or updating a category.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequestBody {
    pub name: String,
    pub description: Option<String>,
}

/// Response payload for a category.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// Request payload for creating a resource.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceRequestBody {
    pub name: String,
    #[schema(format = "uuid")]
    pub category_id: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub current_quantity: i32,
    pub threshold_quantity: i32,
}

/// Full replacement payload for updating a resource.
///
/// Stock is deliberately absent: `currentQuantity` only moves through
/// donations and fulfilled requests.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourceRequestBody {
    pub name: String,
    #[schema(format = "uuid")]
    pub category_id: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub threshold_quantity: i32,
    pub expected_version: u32,
}

/// Response payload for a resource.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
    #[schema(format = "uuid")]
    pub category_id: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub current_quantity: i32,
    pub threshold_quantity: i32,
    pub version: u32,
}

/// Response payload for deleting a category or resource.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteInventoryResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct InventoryPath {
    id: String,
}

impl From<ResourceCategory> for CategoryResponse {
    fn from(value: ResourceCategory) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            description: value.description,
        }
    }
}

impl From<Resource> for ResourceResponse {
    fn from(value: Resource) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            category_id: value.category_id.to_string(),
            description: value.description,
            unit: value.unit,
            current_quantity: value.current_quantity,
            threshold_quantity: value.threshold_quantity,
            version: value.version,
        }
    }
}

fn parse_new_resource(payload: CreateResourceRequestBody) -> Result<NewResource, Error> {
    Ok(NewResource {
        name: payload.name,
        category_id: parse_uuid(payload.category_id, FieldName::new("categoryId"))?,
        description: payload.description,
        unit: payload.unit,
        current_quantity: payload.current_quantity,
        threshold_quantity: payload.threshold_quantity,
    })
}

fn parse_resource_changes(payload: UpdateResourceRequestBody) -> Result<ResourceChanges, Error> {
    Ok(ResourceChanges {
        name: payload.name,
        category_id: parse_uuid(payload.category_id, FieldName::new("categoryId"))?,
        description: payload.description,
        unit: payload.unit,
        threshold_quantity: payload.threshold_quantity,
        expected_version: payload.expected_version,
    })
}

/// Create a resource category.
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryRequestBody,
    responses(
        (status = 200, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 409, description = "Name already taken", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["resources"],
    operation_id = "createCategory",
    security(("SessionCookie" = []))
)]
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CategoryRequestBody>,
) -> ApiResult<web::Json<CategoryResponse>> {
    let caller = session.require_user_id()?;
    let payload = payload.into_inner();
    let category = NewCategory {
        name: payload.name,
        description: payload.description,
    };
    let created = state.resources.create_category(&caller, category).await?;
    Ok(web::Json(CategoryResponse::from(created)))
}

/// List all categories sorted by name.
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Categories", body = [CategoryResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["resources"],
    operation_id = "listCategories",
    security(("SessionCookie" = []))
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<CategoryResponse>>> {
    let caller = session.require_user_id()?;
    let categories = state.resources_query.list_categories(&caller).await?;
    Ok(web::Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// Rename or re-describe a category.
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(("id" = String, Path, description = "Category identifier")),
    request_body = CategoryRequestBody,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Name already taken", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["resources"],
    operation_id = "updateCategory",
    security(("SessionCookie" = []))
)]
#[put("/categories/{id}")]
pub async fn update_category(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<InventoryPath>,
    payload: web::Json<CategoryRequestBody>,
) -> ApiResult<web::Json<CategoryResponse>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    let payload = payload.into_inner();
    let changes = CategoryChanges {
        name: payload.name,
        description: payload.description,
    };
    let updated = state
        .resources
        .update_category(&caller, id, changes)
        .await?;
    Ok(web::Json(CategoryResponse::from(updated)))
}

/// Delete an empty category.
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = String, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Category deleted", body = DeleteInventoryResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Category still has resources", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["resources"],
    operation_id = "deleteCategory",
    security(("SessionCookie" = []))
)]
#[delete("/categories/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<InventoryPath>,
) -> ApiResult<web::Json<DeleteInventoryResponseBody>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    state.resources.delete_category(&caller, id).await?;
    Ok(web::Json(DeleteInventoryResponseBody { id: id.to_string() }))
}

/// Create a resource within a category.
#[utoipa::path(
    post,
    path = "/api/resources",
    request_body = CreateResourceRequestBody,
    responses(
        (status = 200, description = "Resource created", body = ResourceResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Unknown category", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["resources"],
    operation_id = "createResource",
    security(("SessionCookie" = []))
)]
#[post("/resources")]
pub async fn create_resource(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateResourceRequestBody>,
) -> ApiResult<web::Json<ResourceResponse>> {
    let caller = session.require_user_id()?;
    let resource = parse_new_resource(payload.into_inner())?;
    let created = state.resources.create_resource(&caller, resource).await?;
    Ok(web::Json(ResourceResponse::from(created)))
}

/// List all resources sorted by name.
#[utoipa::path(
    get,
    path = "/api/resources",
    responses(
        (status = 200, description = "Resources", body = [ResourceResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["resources"],
    operation_id = "listResources",
    security(("SessionCookie" = []))
)]
#[get("/resources")]
pub async fn list_resources(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ResourceResponse>>> {
    let caller = session.require_user_id()?;
    let resources = state.resources_query.list_resources(&caller).await?;
    Ok(web::Json(
        resources.into_iter().map(ResourceResponse::from).collect(),
    ))
}

/// List resources at or below their stock threshold.
#[utoipa::path(
    get,
    path = "/api/resources/low-stock",
    responses(
        (status = 200, description = "Low-stock resources", body = [ResourceResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["resources"],
    operation_id = "listLowStockResources",
    security(("SessionCookie" = []))
)]
#[get("/resources/low-stock")]
pub async fn list_low_stock_resources(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ResourceResponse>>> {
    let caller = session.require_user_id()?;
    let resources = state.resources_query.list_low_stock(&caller).await?;
    Ok(web::Json(
        resources.into_iter().map(ResourceResponse::from).collect(),
    ))
}

/// Fetch one resource.
#[utoipa::path(
    get,
    path = "/api/resources/{id}",
    params(("id" = String, Path, description = "Resource identifier")),
    responses(
        (status = 200, description = "Resource", body = ResourceResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["resources"],
    operation_id = "getResource",
    security(("SessionCookie" = []))
)]
#[get("/resources/{id}")]
pub async fn get_resource(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<InventoryPath>,
) -> ApiResult<web::Json<ResourceResponse>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    let resource = state.resources_query.get_resource(&caller, id).await?;
    Ok(web::Json(ResourceResponse::from(resource)))
}

/// Apply a full update to a resource.
#[utoipa::path(
    put,
    path = "/api/resources/{id}",
    params(("id" = String, Path, description = "Resource identifier")),
    request_body = UpdateResourceRequestBody,
    responses(
        (status = 200, description = "Resource updated", body = ResourceResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Version conflict", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["resources"],
    operation_id = "updateResource",
    security(("SessionCookie" = []))
)]
#[put("/resources/{id}")]
pub async fn update_resource(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<InventoryPath>,
    payload: web::Json<UpdateResourceRequestBody>,
) -> ApiResult<web::Json<ResourceResponse>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    let changes = parse_resource_changes(payload.into_inner())?;
    let updated = state
        .resources
        .update_resource(&caller, id, changes)
        .await?;
    Ok(web::Json(ResourceResponse::from(updated)))
}

/// Delete a resource nothing references.
#[utoipa::path(
    delete,
    path = "/api/resources/{id}",
    params(("id" = String, Path, description = "Resource identifier")),
    responses(
        (status = 200, description = "Resource deleted", body = DeleteInventoryResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Resource still referenced", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["resources"],
    operation_id = "deleteResource",
    security(("SessionCookie" = []))
)]
#[delete("/resources/{id}")]
pub async fn delete_resource(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<InventoryPath>,
) -> ApiResult<web::Json<DeleteInventoryResponseBody>> {
    let caller = session.require_user_id()?;
    let id = parse_uuid(path.into_inner().id, FieldName::new("id"))?;
    state.resources.delete_resource(&caller, id).await?;
    Ok(web::Json(DeleteInventoryResponseBody { id: id.to_string() }))
}

#[cfg(test)]
#[path = "resources_tests.rs"]
mod tests;
