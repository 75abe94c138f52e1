//! Account administration HTTP handlers.
//!
//! ```text
//! GET /api/admin/accounts
//! PUT /api/admin/accounts/{id}/roles
//! DELETE /api/admin/accounts/{id}
//! ```

use actix_web::{delete, get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AccountWithRoles, Role, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_enum_list, parse_uuid};

/// Accepted role names, in the order the domain declares them.
const ROLE_ALLOWED: &[&str] = &["Admin", "Coordinator", "Volunteer", "Donor"];

/// Request payload for replacing an account's role grants.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRolesRequestBody {
    pub roles: Vec<String>,
}

/// Response payload for a directory account and its roles.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    #[schema(format = "uuid")]
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    #[schema(format = "date-time")]
    pub created_at: String,
    pub roles: Vec<String>,
}

/// Response payload for deleting an account.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAccountResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct AccountPath {
    id: String,
}

impl From<AccountWithRoles> for AccountResponse {
    fn from(value: AccountWithRoles) -> Self {
        let AccountWithRoles { account, roles } = value;
        Self {
            id: account.id().to_string(),
            email: account.email().to_string(),
            first_name: account.first_name().to_string(),
            last_name: account.last_name().to_string(),
            full_name: account.full_name(),
            created_at: account.created_at().to_rfc3339(),
            roles: roles.iter().map(|role| role.as_str().to_owned()).collect(),
        }
    }
}

/// List every account with its roles, newest first.
#[utoipa::path(
    get,
    path = "/api/admin/accounts",
    responses(
        (status = 200, description = "Accounts", body = [AccountResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listAccounts",
    security(("SessionCookie" = []))
)]
#[get("/admin/accounts")]
pub async fn list_accounts(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<AccountResponse>>> {
    let caller = session.require_user_id()?;
    let accounts = state.accounts.list_accounts(&caller).await?;
    Ok(web::Json(
        accounts.into_iter().map(AccountResponse::from).collect(),
    ))
}

/// Replace an account's role grants.
#[utoipa::path(
    put,
    path = "/api/admin/accounts/{id}/roles",
    params(("id" = String, Path, description = "Account identifier")),
    request_body = UpdateRolesRequestBody,
    responses(
        (status = 200, description = "Roles updated", body = AccountResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "updateAccountRoles",
    security(("SessionCookie" = []))
)]
#[put("/admin/accounts/{id}/roles")]
pub async fn update_account_roles(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<AccountPath>,
    payload: web::Json<UpdateRolesRequestBody>,
) -> ApiResult<web::Json<AccountResponse>> {
    let caller = session.require_user_id()?;
    let account_id =
        UserId::from_uuid(parse_uuid(path.into_inner().id, FieldName::new("id"))?);
    let roles: Vec<Role> =
        parse_enum_list(payload.into_inner().roles, FieldName::new("roles"), ROLE_ALLOWED)?;
    let updated = state
        .accounts
        .update_roles(&caller, &account_id, roles.into_iter().collect())
        .await?;
    Ok(web::Json(AccountResponse::from(updated)))
}

/// Delete an account.
#[utoipa::path(
    delete,
    path = "/api/admin/accounts/{id}",
    params(("id" = String, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Account deleted", body = DeleteAccountResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Cannot delete your own account", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "deleteAccount",
    security(("SessionCookie" = []))
)]
#[delete("/admin/accounts/{id}")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<AccountPath>,
) -> ApiResult<web::Json<DeleteAccountResponseBody>> {
    let caller = session.require_user_id()?;
    let account_id =
        UserId::from_uuid(parse_uuid(path.into_inner().id, FieldName::new("id"))?);
    state.accounts.delete_account(&caller, &account_id).await?;
    Ok(web::Json(DeleteAccountResponseBody {
        id: account_id.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserAdministration;
    use crate::domain::{EmailAddress, Error, PersonName, UserAccount};
    use crate::inbound::http::auth::login;
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::{
        TEST_USER_ID, login_and_get_cookie, stub_ports, test_session_middleware, test_user,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use chrono::Utc;
    use serde_json::{Value, json};
    use std::sync::Arc;

    const ACCOUNT_ID: &str = "1a2b3c4d-5e6f-4a0b-8c1d-2e3f4a5b6c7d";

    fn sample_account() -> AccountWithRoles {
        AccountWithRoles {
            account: UserAccount::new(
                test_user(),
                EmailAddress::new("responder@example.org").expect("email"),
                PersonName::new("Naledi").expect("first name"),
                PersonName::new("Dlamini").expect("last name"),
                Utc::now(),
            ),
            roles: [Role::Admin].into_iter().collect(),
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
        App::new()
            .app_data(web::Data::new(HttpState::new(ports)))
            .wrap(test_session_middleware())
            .service(
                web::scope("/api")
                    .service(login)
                    .service(list_accounts)
                    .service(update_account_roles)
                    .service(delete_account),
            )
    }

    #[test]
    fn role_names_cover_every_domain_role() {
        assert_eq!(ROLE_ALLOWED.len(), Role::ALL.len());
        for (name, role) in ROLE_ALLOWED.iter().zip(Role::ALL) {
            assert_eq!(*name, role.as_str());
        }
    }

    #[actix_web::test]
    async fn listing_accounts_returns_camel_case_records() {
        let mut accounts = MockUserAdministration::new();
        accounts
            .expect_list_accounts()
            .withf(|caller| caller.as_ref() == TEST_USER_ID)
            .returning(|_| Ok(vec![sample_account()]));
        let app = actix_test::init_service(test_app(HttpStatePorts {
            accounts: Arc::new(accounts),
            ..stub_ports()
        }))
        .await;
        let cookie = login_and_get_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/admin/accounts")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert!(response.status().is_success());
        let body: Value = actix_test::read_body_json(response).await;
        let listed = body.as_array().expect("array body");
        assert_eq!(listed.len(), 1);
        assert_eq!(
            listed[0].get("fullName").and_then(Value::as_str),
            Some("Naledi Dlamini")
        );
        assert_eq!(
            listed[0].get("roles"),
            Some(&json!(["Admin"])),
        );
        assert!(listed[0].get("full_name").is_none());
    }

    #[actix_web::test]
    async fn updating_roles_replaces_the_grant_set() {
        let mut accounts = MockUserAdministration::new();
        accounts
            .expect_update_roles()
            .withf(|caller, account_id, roles| {
                caller.as_ref() == TEST_USER_ID
                    && account_id.as_ref() == ACCOUNT_ID
                    && roles.contains(&Role::Coordinator)
                    && roles.contains(&Role::Volunteer)
                    && roles.len() == 2
            })
            .returning(|_, _, roles| {
                let mut account = sample_account();
                account.roles = roles;
                Ok(account)
            });
        let app = actix_test::init_service(test_app(HttpStatePorts {
            accounts: Arc::new(accounts),
            ..stub_ports()
        }))
        .await;
        let cookie = login_and_get_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/api/admin/accounts/{ACCOUNT_ID}/roles"))
                .cookie(cookie)
                .set_json(json!({ "roles": ["Coordinator", "Volunteer"] }))
                .to_request(),
        )
        .await;

        assert!(response.status().is_success());
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("roles"),
            Some(&json!(["Coordinator", "Volunteer"])),
        );
    }

    #[actix_web::test]
    async fn updating_roles_rejects_an_unknown_role() {
        let app = actix_test::init_service(test_app(stub_ports())).await;
        let cookie = login_and_get_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/api/admin/accounts/{ACCOUNT_ID}/roles"))
                .cookie(cookie)
                .set_json(json!({ "roles": ["Coordinator", "Overlord"] }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        let details = body.get("details").expect("details present");
        assert_eq!(details.get("field").and_then(Value::as_str), Some("roles"));
        assert_eq!(details.get("index").and_then(Value::as_u64), Some(1));
    }

    #[actix_web::test]
    async fn self_deletion_is_a_conflict() {
        let mut accounts = MockUserAdministration::new();
        accounts.expect_delete_account().returning(|_, _| {
            Err(Error::conflict(
                "administrators cannot delete their own account",
            ))
        });
        let app = actix_test::init_service(test_app(HttpStatePorts {
            accounts: Arc::new(accounts),
            ..stub_ports()
        }))
        .await;
        let cookie = login_and_get_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/admin/accounts/{TEST_USER_ID}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("code").and_then(Value::as_str), Some("conflict"));
    }

    #[actix_web::test]
    async fn delete_returns_the_deleted_id() {
        let mut accounts = MockUserAdministration::new();
        accounts
            .expect_delete_account()
            .withf(|_, account_id| account_id.as_ref() == ACCOUNT_ID)
            .returning(|_, _| Ok(()));
        let app = actix_test::init_service(test_app(HttpStatePorts {
            accounts: Arc::new(accounts),
            ..stub_ports()
        }))
        .await;
        let cookie = login_and_get_cookie(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/admin/accounts/{ACCOUNT_ID}"))
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert!(response.status().is_success());
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("id").and_then(Value::as_str), Some(ACCOUNT_ID));
    }
}
