//! Shared fixtures for the inbound HTTP handler tests.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::test as actix_test;
use async_trait::async_trait;
use serde_json::json;

use super::state::HttpStatePorts;
use crate::domain::ports::{
    LoginService, MockAssignmentsCommand, MockAssignmentsQuery, MockDisastersCommand,
    MockDisastersQuery, MockDonationsCommand, MockDonationsQuery, MockMissionsCommand,
    MockMissionsQuery, MockPermissionsQuery, MockReportsQuery, MockResourceRequestsCommand,
    MockResourceRequestsQuery, MockResourcesCommand, MockResourcesQuery, MockUserAdministration,
    MockVolunteersCommand, MockVolunteersQuery,
};
use crate::domain::{Error, LoginCredentials, UserId};

/// User id every [`StubLogin`] sign-in resolves to.
pub const TEST_USER_ID: &str = "6d1f2c67-5f07-4b97-9a3c-2d4f5e6a7b80";

/// The caller identity behind [`login_and_get_cookie`].
pub fn test_user() -> UserId {
    UserId::new(TEST_USER_ID).expect("test user id is a valid UUID")
}

/// Session middleware for handler tests: a throwaway key per call and the
/// `Secure` flag off, so plain HTTP test requests carry the cookie. The
/// cookie name matches the production middleware.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    let throwaway_key = Key::generate();
    SessionMiddleware::builder(CookieSessionStore::default(), throwaway_key)
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Login port that accepts any credentials and signs in [`TEST_USER_ID`].
pub struct StubLogin;

#[async_trait]
impl LoginService for StubLogin {
    async fn authenticate(&self, _credentials: LoginCredentials) -> Result<UserId, Error> {
        Ok(test_user())
    }
}

/// Ports bundle where every port is an expectation-free mock.
///
/// Handler tests replace the ports they exercise via struct update syntax;
/// anything left stubbed panics if the handler under test reaches for it.
/// The login port is a working [`StubLogin`] so every test can mint a
/// session cookie.
pub fn stub_ports() -> HttpStatePorts {
    HttpStatePorts {
        login: Arc::new(StubLogin),
        permissions: Arc::new(MockPermissionsQuery::new()),
        disasters: Arc::new(MockDisastersCommand::new()),
        disasters_query: Arc::new(MockDisastersQuery::new()),
        volunteers: Arc::new(MockVolunteersCommand::new()),
        volunteers_query: Arc::new(MockVolunteersQuery::new()),
        donations: Arc::new(MockDonationsCommand::new()),
        donations_query: Arc::new(MockDonationsQuery::new()),
        assignments: Arc::new(MockAssignmentsCommand::new()),
        assignments_query: Arc::new(MockAssignmentsQuery::new()),
        missions: Arc::new(MockMissionsCommand::new()),
        missions_query: Arc::new(MockMissionsQuery::new()),
        resources: Arc::new(MockResourcesCommand::new()),
        resources_query: Arc::new(MockResourcesQuery::new()),
        resource_requests: Arc::new(MockResourceRequestsCommand::new()),
        resource_requests_query: Arc::new(MockResourceRequestsQuery::new()),
        accounts: Arc::new(MockUserAdministration::new()),
        reports: Arc::new(MockReportsQuery::new()),
    }
}

/// Sign in through `/api/login` and return the session cookie.
///
/// The app under test must mount the login handler alongside the routes it
/// exercises so the cookie is minted under the same session key.
pub async fn login_and_get_cookie(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> Cookie<'static> {
    let login_req = actix_test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({
            "email": "responder@example.org",
            "password": "Admin123!",
        }))
        .to_request();
    let login_res = actix_test::call_service(app, login_req).await;
    assert!(login_res.status().is_success());
    login_res
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie")
        .into_owned()
}
