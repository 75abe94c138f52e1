//! Tests for inventory API handlers.

use super::*;
use crate::domain::ports::{MockResourcesCommand, MockResourcesQuery};
use crate::inbound::http::auth::login;
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::{
    TEST_USER_ID, login_and_get_cookie, stub_ports, test_session_middleware,
};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

const CATEGORY_ID: &str = "3c4d5e6f-7a8b-4c9d-8e0f-1a2b3c4d5e6f";
const RESOURCE_ID: &str = "7a8b9c0d-1e2f-4a3b-8c4d-5e6f7a8b9c0d";

fn sample_category() -> ResourceCategory {
    ResourceCategory {
        id: Uuid::parse_str(CATEGORY_ID).expect("category id"),
        name: "Medical supplies".into(),
        description: Some("Bandages, kits, medication".into()),
    }
}

fn sample_resource() -> Resource {
    Resource {
        id: Uuid::parse_str(RESOURCE_ID).expect("resource id"),
        name: "Bottled water".into(),
        category_id: Uuid::parse_str(CATEGORY_ID).expect("category id"),
        description: None,
        unit: Some("litres".into()),
        current_quantity: 250,
        threshold_quantity: 100,
        version: 1,
    }
}

fn test_app(
    ports: HttpStatePorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    // `/resources/low-stock` must register ahead of `/resources/{id}`.
    App::new()
        .app_data(web::Data::new(HttpState::new(ports)))
        .wrap(test_session_middleware())
        .service(
            web::scope("/api")
                .service(login)
                .service(create_category)
                .service(list_categories)
                .service(update_category)
                .service(delete_category)
                .service(create_resource)
                .service(list_resources)
                .service(list_low_stock_resources)
                .service(get_resource)
                .service(update_resource)
                .service(delete_resource),
        )
}

#[actix_web::test]
async fn creating_a_category_returns_it() {
    let mut resources = MockResourcesCommand::new();
    resources
        .expect_create_category()
        .withf(|caller, category| {
            caller.as_ref() == TEST_USER_ID && category.name == "Medical supplies"
        })
        .returning(|_, _| Ok(sample_category()));
    let app = actix_test::init_service(test_app(HttpStatePorts {
        resources: Arc::new(resources),
        ..stub_ports()
    }))
    .await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/categories")
            .cookie(cookie)
            .set_json(json!({
                "name": "Medical supplies",
                "description": "Bandages, kits, medication",
            }))
            .to_request(),
    )
    .await;

    assert!(response.status().is_success());
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("id").and_then(Value::as_str), Some(CATEGORY_ID));
    assert_eq!(
        body.get("name").and_then(Value::as_str),
        Some("Medical supplies")
    );
}

#[actix_web::test]
async fn duplicate_category_names_are_a_conflict() {
    let mut resources = MockResourcesCommand::new();
    resources
        .expect_create_category()
        .returning(|_, _| Err(Error::conflict("category name already in use")));
    let app = actix_test::init_service(test_app(HttpStatePorts {
        resources: Arc::new(resources),
        ..stub_ports()
    }))
    .await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/categories")
            .cookie(cookie)
            .set_json(json!({ "name": "Medical supplies" }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn deleting_a_populated_category_is_a_conflict() {
    let mut resources = MockResourcesCommand::new();
    resources
        .expect_delete_category()
        .returning(|_, _| Err(Error::conflict("category still has resources")));
    let app = actix_test::init_service(test_app(HttpStatePorts {
        resources: Arc::new(resources),
        ..stub_ports()
    }))
    .await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/categories/{CATEGORY_ID}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("category still has resources")
    );
}

#[actix_web::test]
async fn creating_a_resource_returns_the_camel_case_record() {
    let mut resources = MockResourcesCommand::new();
    resources
        .expect_create_resource()
        .withf(|_, resource| {
            resource.category_id.to_string() == CATEGORY_ID && resource.current_quantity == 250
        })
        .returning(|_, _| Ok(sample_resource()));
    let app = actix_test::init_service(test_app(HttpStatePorts {
        resources: Arc::new(resources),
        ..stub_ports()
    }))
    .await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/resources")
            .cookie(cookie)
            .set_json(json!({
                "name": "Bottled water",
                "categoryId": CATEGORY_ID,
                "unit": "litres",
                "currentQuantity": 250,
                "thresholdQuantity": 100,
            }))
            .to_request(),
    )
    .await;

    assert!(response.status().is_success());
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("currentQuantity").and_then(Value::as_i64),
        Some(250)
    );
    assert_eq!(
        body.get("thresholdQuantity").and_then(Value::as_i64),
        Some(100)
    );
    assert!(body.get("current_quantity").is_none());
}

#[actix_web::test]
async fn low_stock_listing_uses_the_dedicated_route() {
    let mut resources_query = MockResourcesQuery::new();
    resources_query.expect_list_low_stock().returning(|_| {
        Ok(vec![Resource {
            current_quantity: 40,
            ..sample_resource()
        }])
    });
    let app = actix_test::init_service(test_app(HttpStatePorts {
        resources_query: Arc::new(resources_query),
        ..stub_ports()
    }))
    .await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/resources/low-stock")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert!(response.status().is_success());
    let body: Value = actix_test::read_body_json(response).await;
    let listed = body.as_array().expect("array body");
    assert_eq!(listed.len(), 1);
    assert_eq!(
        listed[0].get("currentQuantity").and_then(Value::as_i64),
        Some(40)
    );
}

#[actix_web::test]
async fn resource_update_omits_stock_and_surfaces_conflicts() {
    let mut resources = MockResourcesCommand::new();
    resources
        .expect_update_resource()
        .withf(|_, id, changes| {
            id.to_string() == RESOURCE_ID
                && changes.threshold_quantity == 120
                && changes.expected_version == 1
        })
        .returning(|_, _, _| {
            Ok(Resource {
                threshold_quantity: 120,
                version: 2,
                ..sample_resource()
            })
        });
    let app = actix_test::init_service(test_app(HttpStatePorts {
        resources: Arc::new(resources),
        ..stub_ports()
    }))
    .await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/resources/{RESOURCE_ID}"))
            .cookie(cookie)
            .set_json(json!({
                "name": "Bottled water",
                "categoryId": CATEGORY_ID,
                "unit": "litres",
                "thresholdQuantity": 120,
                "expectedVersion": 1,
            }))
            .to_request(),
    )
    .await;

    assert!(response.status().is_success());
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("thresholdQuantity").and_then(Value::as_i64),
        Some(120)
    );
    assert_eq!(body.get("version").and_then(Value::as_u64), Some(2));
}

#[actix_web::test]
async fn get_rejects_a_malformed_id() {
    let app = actix_test::init_service(test_app(stub_ports())).await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/resources/not-a-uuid")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("details")
            .and_then(|details| details.get("code"))
            .and_then(Value::as_str),
        Some("invalid_uuid")
    );
}

#[actix_web::test]
async fn deleting_a_referenced_resource_is_a_conflict() {
    let mut resources = MockResourcesCommand::new();
    resources
        .expect_delete_resource()
        .returning(|_, _| Err(Error::conflict("resource still referenced")));
    let app = actix_test::init_service(test_app(HttpStatePorts {
        resources: Arc::new(resources),
        ..stub_ports()
    }))
    .await;
    let cookie = login_and_get_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/resources/{RESOURCE_ID}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn listing_requires_a_session() {
    let app = actix_test::init_service(test_app(stub_ports())).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/resources")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
