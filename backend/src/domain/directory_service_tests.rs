//! Tests for the account administration service.

use std::sync::Arc;

use chrono::Utc;

use super::*;
use crate::domain::ports::{MockPermissionsQuery, MockUserDirectory};
use crate::domain::{EmailAddress, ErrorCode, Permissions, PersonName, Role, UserAccount};

fn admin() -> Permissions {
    Permissions::for_roles(&RoleSet::from([Role::Admin]), false)
}

fn coordinator() -> Permissions {
    Permissions::for_roles(&RoleSet::from([Role::Coordinator]), false)
}

fn permissions_returning(permissions: Permissions) -> MockPermissionsQuery {
    let mut query = MockPermissionsQuery::new();
    query
        .expect_permissions_for()
        .returning(move |_, _| Ok(permissions));
    query
}

fn account(id: &UserId) -> UserAccount {
    UserAccount::new(
        id.clone(),
        EmailAddress::new("sizwe@example.org").expect("valid email"),
        PersonName::new("Sizwe").expect("valid first name"),
        PersonName::new("Dlamini").expect("valid last name"),
        Utc::now(),
    )
}

#[tokio::test]
async fn list_accounts_is_admin_only() {
    let mut directory = MockUserDirectory::new();
    directory.expect_list_accounts().times(0);

    let service = DirectoryService::new(
        Arc::new(permissions_returning(coordinator())),
        Arc::new(directory),
    );
    let error = service
        .list_accounts(&UserId::random())
        .await
        .expect_err("coordinators cannot list accounts");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn list_accounts_returns_the_directory_listing() {
    let subject = UserId::random();
    let listing = vec![AccountWithRoles {
        account: account(&subject),
        roles: RoleSet::from([Role::Volunteer]),
    }];

    let mut directory = MockUserDirectory::new();
    directory
        .expect_list_accounts()
        .times(1)
        .return_once(move || Ok(listing));

    let service = DirectoryService::new(
        Arc::new(permissions_returning(admin())),
        Arc::new(directory),
    );
    let accounts = service
        .list_accounts(&UserId::random())
        .await
        .expect("listing succeeds");

    assert_eq!(accounts.len(), 1);
    assert!(accounts[0].roles.contains(&Role::Volunteer));
}

#[tokio::test]
async fn update_roles_replaces_the_grant_set() {
    let subject = UserId::random();
    let stored = account(&subject);
    let target = subject.clone();
    let granted = RoleSet::from([Role::Coordinator, Role::Volunteer]);
    let expected = granted.clone();

    let mut directory = MockUserDirectory::new();
    directory
        .expect_find_account()
        .times(1)
        .return_once(move |_| Ok(Some(stored)));
    directory
        .expect_replace_roles()
        .times(1)
        .withf(move |id, roles| *id == target && *roles == expected)
        .return_once(|_, _| Ok(()));

    let service = DirectoryService::new(
        Arc::new(permissions_returning(admin())),
        Arc::new(directory),
    );
    let updated = service
        .update_roles(&UserId::random(), &subject, granted)
        .await
        .expect("role update succeeds");

    assert!(updated.roles.contains(&Role::Coordinator));
    assert_eq!(updated.account.id(), &subject);
}

#[tokio::test]
async fn update_roles_for_an_unknown_account_is_not_found() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_find_account()
        .times(1)
        .return_once(|_| Ok(None));
    directory.expect_replace_roles().times(0);

    let service = DirectoryService::new(
        Arc::new(permissions_returning(admin())),
        Arc::new(directory),
    );
    let error = service
        .update_roles(&UserId::random(), &UserId::random(), RoleSet::new())
        .await
        .expect_err("unknown account rejected");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn deleting_the_signed_in_account_is_a_conflict() {
    let caller = UserId::random();

    let mut directory = MockUserDirectory::new();
    directory.expect_delete_account().times(0);

    let service = DirectoryService::new(
        Arc::new(permissions_returning(admin())),
        Arc::new(directory),
    );
    let error = service
        .delete_account(&caller, &caller.clone())
        .await
        .expect_err("self-deletion rejected");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), "cannot delete the signed-in account");
}

#[tokio::test]
async fn delete_account_with_dependants_is_a_conflict() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_delete_account()
        .times(1)
        .return_once(|_| Err(UserDirectoryError::has_dependants("reported disasters")));

    let service = DirectoryService::new(
        Arc::new(permissions_returning(admin())),
        Arc::new(directory),
    );
    let error = service
        .delete_account(&UserId::random(), &UserId::random())
        .await
        .expect_err("dependants block deletion");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn delete_account_removes_a_clean_account() {
    let subject = UserId::random();
    let target = subject.clone();

    let mut directory = MockUserDirectory::new();
    directory
        .expect_delete_account()
        .times(1)
        .withf(move |id| *id == target)
        .return_once(|_| Ok(()));

    let service = DirectoryService::new(
        Arc::new(permissions_returning(admin())),
        Arc::new(directory),
    );
    service
        .delete_account(&UserId::random(), &subject)
        .await
        .expect("deletion succeeds");
}

#[tokio::test]
async fn directory_outages_surface_as_service_unavailable() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_list_accounts()
        .times(1)
        .return_once(|| Err(UserDirectoryError::connection("pool exhausted")));

    let service = DirectoryService::new(
        Arc::new(permissions_returning(admin())),
        Arc::new(directory),
    );
    let error = service
        .list_accounts(&UserId::random())
        .await
        .expect_err("service unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
