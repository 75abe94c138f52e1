//! Inventory, donation, and resource-request flows end to end.

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::{Value, json};

// Shared harness carries pieces used by the other integration suites too.
#[allow(dead_code)]
mod support;

use support::{COORDINATOR_EMAIL, DONOR_EMAIL, VOLUNTEER_EMAIL, seeded_world, sign_in, spawn_app};

async fn create_category(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: &Cookie<'static>,
    name: &str,
) -> String {
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/categories")
            .cookie(cookie.clone())
            .set_json(json!({ "name": name }))
            .to_request(),
    )
    .await;
    assert!(
        response.status().is_success(),
        "category creation failed: {}",
        response.status()
    );
    let body: Value = actix_test::read_body_json(response).await;
    body.get("id")
        .and_then(Value::as_str)
        .expect("category id")
        .to_owned()
}

async fn create_resource(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: &Cookie<'static>,
    category_id: &str,
    name: &str,
    current: i32,
    threshold: i32,
) -> String {
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/resources")
            .cookie(cookie.clone())
            .set_json(json!({
                "name": name,
                "categoryId": category_id,
                "unit": "units",
                "currentQuantity": current,
                "thresholdQuantity": threshold,
            }))
            .to_request(),
    )
    .await;
    assert!(
        response.status().is_success(),
        "resource creation failed: {}",
        response.status()
    );
    let body: Value = actix_test::read_body_json(response).await;
    body.get("id")
        .and_then(Value::as_str)
        .expect("resource id")
        .to_owned()
}

async fn fetch_resource(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: &Cookie<'static>,
    id: &str,
) -> Value {
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/resources/{id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert!(response.status().is_success());
    actix_test::read_body_json(response).await
}

async fn report_disaster(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: &Cookie<'static>,
) -> String {
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/disasters")
            .cookie(cookie.clone())
            .set_json(json!({
                "name": "Valley reservoir breach",
                "location": "Wharfedale",
                "kind": "Flood",
                "severity": "Critical",
            }))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success());
    let body: Value = actix_test::read_body_json(response).await;
    body.get("id")
        .and_then(Value::as_str)
        .expect("disaster id")
        .to_owned()
}

async fn open_request(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: &Cookie<'static>,
    disaster_id: &str,
    resource_id: &str,
    quantity: i32,
) -> String {
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/resource-requests")
            .cookie(cookie.clone())
            .set_json(json!({
                "disasterId": disaster_id,
                "resourceId": resource_id,
                "quantityRequested": quantity,
                "urgency": "High",
            }))
            .to_request(),
    )
    .await;
    assert!(
        response.status().is_success(),
        "request creation failed: {}",
        response.status()
    );
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("status").and_then(Value::as_str), Some("Pending"));
    body.get("id")
        .and_then(Value::as_str)
        .expect("request id")
        .to_owned()
}

#[actix_web::test]
async fn inventory_management_is_gated_to_coordinators() {
    let world = seeded_world();
    let app = spawn_app(&world.store).await;

    let donor = sign_in(&app, DONOR_EMAIL).await;
    let denied = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/categories")
            .cookie(donor.clone())
            .set_json(json!({ "name": "Water" }))
            .to_request(),
    )
    .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(denied).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("not permitted to manage the inventory")
    );

    let coordinator = sign_in(&app, COORDINATOR_EMAIL).await;
    create_category(&app, &coordinator, "Water").await;

    let duplicate = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/categories")
            .cookie(coordinator)
            .set_json(json!({ "name": "Water" }))
            .to_request(),
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(duplicate).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("resource category already exists: Water")
    );

    // Browsing stays open to every signed-in account.
    let browse = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/resources")
            .cookie(donor)
            .to_request(),
    )
    .await;
    assert!(browse.status().is_success());
}

#[actix_web::test]
async fn stocked_resources_list_alphabetically() {
    let world = seeded_world();
    let app = spawn_app(&world.store).await;
    let coordinator = sign_in(&app, COORDINATOR_EMAIL).await;
    let category = create_category(&app, &coordinator, "Food and drink").await;
    create_resource(&app, &coordinator, &category, "Tinned beans", 30, 10).await;
    create_resource(&app, &coordinator, &category, "Bottled water", 40, 10).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/resources")
            .cookie(coordinator)
            .to_request(),
    )
    .await;
    assert!(response.status().is_success());
    let body: Value = actix_test::read_body_json(response).await;
    let rows = body.as_array().expect("resource list");
    let names: Vec<&str> = rows
        .iter()
        .filter_map(|row| row.get("name").and_then(Value::as_str))
        .collect();
    assert_eq!(names, ["Bottled water", "Tinned beans"]);
    assert!(
        rows.iter()
            .all(|row| row.get("version").and_then(Value::as_u64) == Some(1))
    );
}

#[actix_web::test]
async fn pledged_donations_credit_the_stock() {
    let world = seeded_world();
    let app = spawn_app(&world.store).await;
    let coordinator = sign_in(&app, COORDINATOR_EMAIL).await;
    let category = create_category(&app, &coordinator, "Bedding").await;
    let resource = create_resource(&app, &coordinator, &category, "Blankets", 40, 10).await;

    let donor = sign_in(&app, DONOR_EMAIL).await;
    let pledged = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/donations")
            .cookie(donor.clone())
            .set_json(json!({
                "resourceId": resource,
                "quantity": 25,
                "notes": "Collected by the rotary club",
            }))
            .to_request(),
    )
    .await;
    assert!(pledged.status().is_success());
    let pledged: Value = actix_test::read_body_json(pledged).await;
    assert_eq!(
        pledged.get("donorId").and_then(Value::as_str),
        Some(world.donor.as_ref())
    );
    assert_eq!(pledged.get("status").and_then(Value::as_str), Some("Pending"));
    let donation_id = pledged
        .get("id")
        .and_then(Value::as_str)
        .expect("donation id")
        .to_owned();

    let stocked = fetch_resource(&app, &donor, &resource).await;
    assert_eq!(
        stocked.get("currentQuantity").and_then(Value::as_i64),
        Some(65)
    );

    let mine = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/donations/mine")
            .cookie(donor.clone())
            .to_request(),
    )
    .await;
    assert!(mine.status().is_success());
    let mine: Value = actix_test::read_body_json(mine).await;
    assert_eq!(mine.as_array().map(Vec::len), Some(1));

    let all = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/donations")
            .cookie(donor)
            .to_request(),
    )
    .await;
    assert_eq!(all.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(all).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("not permitted to list all donations")
    );

    let received = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/donations/{donation_id}/status"))
            .cookie(coordinator)
            .set_json(json!({ "status": "Received" }))
            .to_request(),
    )
    .await;
    assert!(received.status().is_success());
    let received: Value = actix_test::read_body_json(received).await;
    assert_eq!(
        received.get("status").and_then(Value::as_str),
        Some("Received")
    );
}

#[actix_web::test]
async fn a_pledge_must_name_positive_stock() {
    let world = seeded_world();
    let app = spawn_app(&world.store).await;
    let coordinator = sign_in(&app, COORDINATOR_EMAIL).await;
    let category = create_category(&app, &coordinator, "Bedding").await;
    let resource = create_resource(&app, &coordinator, &category, "Blankets", 40, 10).await;

    let donor = sign_in(&app, DONOR_EMAIL).await;
    let empty = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/donations")
            .cookie(donor.clone())
            .set_json(json!({ "resourceId": resource, "quantity": 0 }))
            .to_request(),
    )
    .await;
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(empty).await;
    let details = body.get("details").expect("details");
    assert_eq!(details.get("field").and_then(Value::as_str), Some("quantity"));
    assert_eq!(
        details.get("code").and_then(Value::as_str),
        Some("not_positive")
    );

    let unknown = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/donations")
            .cookie(donor)
            .set_json(json!({
                "resourceId": uuid::Uuid::new_v4().to_string(),
                "quantity": 5,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(unknown).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("donated resource not found")
    );
}

#[actix_web::test]
async fn low_stock_lists_only_depleted_resources_for_coordinators() {
    let world = seeded_world();
    let app = spawn_app(&world.store).await;
    let coordinator = sign_in(&app, COORDINATOR_EMAIL).await;
    let category = create_category(&app, &coordinator, "Shelter").await;
    create_resource(&app, &coordinator, &category, "Blankets", 5, 20).await;
    create_resource(&app, &coordinator, &category, "Bottled water", 100, 10).await;
    create_resource(&app, &coordinator, &category, "Tents", 2, 5).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/resources/low-stock")
            .cookie(coordinator)
            .to_request(),
    )
    .await;
    assert!(response.status().is_success());
    let body: Value = actix_test::read_body_json(response).await;
    let names: Vec<&str> = body
        .as_array()
        .expect("low stock list")
        .iter()
        .filter_map(|row| row.get("name").and_then(Value::as_str))
        .collect();
    assert_eq!(names, ["Tents", "Blankets"]);

    let donor = sign_in(&app, DONOR_EMAIL).await;
    let denied = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/resources/low-stock")
            .cookie(donor)
            .to_request(),
    )
    .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn fulfilment_debits_stock_and_closes_the_request() {
    let world = seeded_world();
    let app = spawn_app(&world.store).await;
    let volunteer = sign_in(&app, VOLUNTEER_EMAIL).await;
    let disaster = report_disaster(&app, &volunteer).await;

    let coordinator = sign_in(&app, COORDINATOR_EMAIL).await;
    let category = create_category(&app, &coordinator, "Bedding").await;
    let resource = create_resource(&app, &coordinator, &category, "Blankets", 40, 10).await;
    let request = open_request(&app, &coordinator, &disaster, &resource, 30).await;

    let fulfilled = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/resource-requests/{request}/fulfil"))
            .cookie(coordinator.clone())
            .to_request(),
    )
    .await;
    assert!(fulfilled.status().is_success());
    let fulfilled: Value = actix_test::read_body_json(fulfilled).await;
    assert_eq!(
        fulfilled.get("outcome").and_then(Value::as_str),
        Some("fulfilled")
    );
    assert_eq!(
        fulfilled
            .get("request")
            .and_then(|request| request.get("status"))
            .and_then(Value::as_str),
        Some("Fulfilled")
    );

    let stocked = fetch_resource(&app, &coordinator, &resource).await;
    assert_eq!(
        stocked.get("currentQuantity").and_then(Value::as_i64),
        Some(10)
    );

    let again = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/resource-requests/{request}/fulfil"))
            .cookie(coordinator)
            .to_request(),
    )
    .await;
    assert_eq!(again.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(again).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("request cannot be fulfilled from status Fulfilled")
    );
}

#[actix_web::test]
async fn a_shortfall_reports_the_gap_and_changes_nothing() {
    let world = seeded_world();
    let app = spawn_app(&world.store).await;
    let volunteer = sign_in(&app, VOLUNTEER_EMAIL).await;
    let disaster = report_disaster(&app, &volunteer).await;

    let coordinator = sign_in(&app, COORDINATOR_EMAIL).await;
    let category = create_category(&app, &coordinator, "Bedding").await;
    let resource = create_resource(&app, &coordinator, &category, "Blankets", 10, 5).await;
    let request = open_request(&app, &coordinator, &disaster, &resource, 40).await;

    let short = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/resource-requests/{request}/fulfil"))
            .cookie(coordinator.clone())
            .to_request(),
    )
    .await;
    assert!(short.status().is_success());
    let short: Value = actix_test::read_body_json(short).await;
    assert_eq!(
        short.get("outcome").and_then(Value::as_str),
        Some("insufficient_stock")
    );
    assert_eq!(short.get("available").and_then(Value::as_i64), Some(10));
    assert_eq!(short.get("requested").and_then(Value::as_i64), Some(40));

    let stocked = fetch_resource(&app, &coordinator, &resource).await;
    assert_eq!(
        stocked.get("currentQuantity").and_then(Value::as_i64),
        Some(10)
    );

    let unchanged = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/resource-requests/{request}"))
            .cookie(coordinator)
            .to_request(),
    )
    .await;
    assert!(unchanged.status().is_success());
    let unchanged: Value = actix_test::read_body_json(unchanged).await;
    assert_eq!(
        unchanged.get("status").and_then(Value::as_str),
        Some("Pending")
    );
}

#[actix_web::test]
async fn the_status_route_never_fulfils() {
    let world = seeded_world();
    let app = spawn_app(&world.store).await;
    let volunteer = sign_in(&app, VOLUNTEER_EMAIL).await;
    let disaster = report_disaster(&app, &volunteer).await;

    let coordinator = sign_in(&app, COORDINATOR_EMAIL).await;
    let category = create_category(&app, &coordinator, "Bedding").await;
    let resource = create_resource(&app, &coordinator, &category, "Blankets", 40, 10).await;
    let request = open_request(&app, &coordinator, &disaster, &resource, 10).await;

    let blocked = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/resource-requests/{request}/status"))
            .cookie(coordinator.clone())
            .set_json(json!({ "status": "Fulfilled" }))
            .to_request(),
    )
    .await;
    assert_eq!(blocked.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(blocked).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("requests are fulfilled through the fulfil operation")
    );

    let approved = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/resource-requests/{request}/status"))
            .cookie(coordinator)
            .set_json(json!({ "status": "Approved" }))
            .to_request(),
    )
    .await;
    assert!(approved.status().is_success());
    let approved: Value = actix_test::read_body_json(approved).await;
    assert_eq!(
        approved.get("status").and_then(Value::as_str),
        Some("Approved")
    );
}

#[actix_web::test]
async fn stock_in_use_cannot_be_deleted() {
    let world = seeded_world();
    let app = spawn_app(&world.store).await;
    let coordinator = sign_in(&app, COORDINATOR_EMAIL).await;
    let category = create_category(&app, &coordinator, "Bedding").await;
    let resource = create_resource(&app, &coordinator, &category, "Blankets", 40, 10).await;

    let category_blocked = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/categories/{category}"))
            .cookie(coordinator.clone())
            .to_request(),
    )
    .await;
    assert_eq!(category_blocked.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(category_blocked).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("resource category still has resources")
    );

    let donor = sign_in(&app, DONOR_EMAIL).await;
    let pledged = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/donations")
            .cookie(donor)
            .set_json(json!({ "resourceId": resource, "quantity": 5 }))
            .to_request(),
    )
    .await;
    assert!(pledged.status().is_success());

    let resource_blocked = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/resources/{resource}"))
            .cookie(coordinator.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resource_blocked.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(resource_blocked).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("resource still has donations or requests")
    );

    let spare = create_category(&app, &coordinator, "Seasonal surplus").await;
    let removed = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/categories/{spare}"))
            .cookie(coordinator)
            .to_request(),
    )
    .await;
    assert!(removed.status().is_success());
    let removed: Value = actix_test::read_body_json(removed).await;
    assert_eq!(
        removed.get("id").and_then(Value::as_str),
        Some(spare.as_str())
    );
}

#[actix_web::test]
async fn request_coordination_is_gated() {
    let world = seeded_world();
    let app = spawn_app(&world.store).await;
    let volunteer = sign_in(&app, VOLUNTEER_EMAIL).await;
    let disaster = report_disaster(&app, &volunteer).await;

    let donor = sign_in(&app, DONOR_EMAIL).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/resource-requests")
            .cookie(donor)
            .set_json(json!({
                "disasterId": disaster,
                "resourceId": uuid::Uuid::new_v4().to_string(),
                "quantityRequested": 10,
                "urgency": "Normal",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("not permitted to coordinate resource requests")
    );
}
