//! PostgreSQL-backed `UserDirectory` implementation using Diesel ORM.
//!
//! Accounts live in `users` and grants in `user_roles`. Unknown accounts are
//! `Ok(None)` rather than errors; the permission engine treats an unresolved
//! identity as holding no capabilities. Unknown role strings in storage are
//! logged and skipped, so a hand-edited grant can never widen permissions.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{
    AccountWithRoles, EmailAddress, PersonName, Role, RoleSet, UserAccount, UserId,
    UserValidationError,
};

use super::diesel_support::{map_checkout_error, map_statement_error};
use super::models::{NewUserRoleRow, UserAccountRow, UserRoleRow};
use super::pool::{DbPool, PoolError};
use super::schema::{
    assignments, disasters, donations, missions, resource_requests, user_roles, users, volunteers,
};

/// Diesel-backed implementation of the user directory port.
#[derive(Clone)]
pub struct DieselUserDirectory {
    pool: DbPool,
}

impl DieselUserDirectory {
    /// Create a new directory with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to directory errors.
fn map_pool_error(error: PoolError) -> UserDirectoryError {
    map_checkout_error(error, UserDirectoryError::connection)
}

/// Map Diesel errors to directory errors.
fn map_diesel_error(error: diesel::result::Error) -> UserDirectoryError {
    map_statement_error(error, UserDirectoryError::query, UserDirectoryError::connection)
}

/// Map identity validation failures on stored rows to query errors.
fn map_validation_error(error: UserValidationError) -> UserDirectoryError {
    UserDirectoryError::query(error.to_string())
}

/// Convert a database row into a directory account.
fn row_to_account(row: UserAccountRow) -> Result<UserAccount, UserDirectoryError> {
    let UserAccountRow {
        id,
        email,
        first_name,
        last_name,
        created_at,
    } = row;

    Ok(UserAccount::new(
        UserId::from_uuid(id),
        EmailAddress::new(&email).map_err(map_validation_error)?,
        PersonName::new(&first_name).map_err(map_validation_error)?,
        PersonName::new(&last_name).map_err(map_validation_error)?,
        created_at,
    ))
}

/// Parse a stored grant into the set, skipping unknown role names.
fn insert_parsed_role(roles: &mut RoleSet, user_id: Uuid, raw: &str) {
    match raw.parse::<Role>() {
        Ok(role) => {
            roles.insert(role);
        }
        Err(_) => {
            tracing::warn!(user_id = %user_id, role = raw, "ignoring unknown role grant");
        }
    }
}

/// What replacing an account's grants found inside its transaction.
enum ReplaceOutcome {
    Replaced,
    Missing,
}

/// What deleting an account found inside its transaction.
enum DeleteOutcome {
    Deleted,
    Missing,
    Blocked(String),
}

#[async_trait]
impl UserDirectory for DieselUserDirectory {
    async fn find_account(
        &self,
        id: &UserId,
    ) -> Result<Option<UserAccount>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserAccountRow::as_select())
            .first::<UserAccountRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn find_account_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserAccountRow::as_select())
            .first::<UserAccountRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn roles_for(&self, id: &UserId) -> Result<Option<RoleSet>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let account_exists: bool = diesel::select(diesel::dsl::exists(
            users::table.filter(users::id.eq(id.as_uuid())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        if !account_exists {
            return Ok(None);
        }

        let grant_rows: Vec<UserRoleRow> = user_roles::table
            .filter(user_roles::user_id.eq(id.as_uuid()))
            .select(UserRoleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut roles = RoleSet::new();
        for row in grant_rows {
            insert_parsed_role(&mut roles, row.user_id, &row.role);
        }
        Ok(Some(roles))
    }

    async fn list_accounts(&self) -> Result<Vec<AccountWithRoles>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let account_rows: Vec<UserAccountRow> = users::table
            .order((users::created_at.desc(), users::id.desc()))
            .select(UserAccountRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let grant_rows: Vec<UserRoleRow> = user_roles::table
            .select(UserRoleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut grants: HashMap<Uuid, RoleSet> = HashMap::new();
        for row in grant_rows {
            let entry = grants.entry(row.user_id).or_default();
            insert_parsed_role(entry, row.user_id, &row.role);
        }

        let mut accounts = Vec::with_capacity(account_rows.len());
        for row in account_rows {
            let id = row.id;
            let account = row_to_account(row)?;
            let roles = grants.remove(&id).unwrap_or_default();
            accounts.push(AccountWithRoles { account, roles });
        }
        Ok(accounts)
    }

    async fn replace_roles(
        &self,
        id: &UserId,
        roles: &RoleSet,
    ) -> Result<(), UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let user_id = *id.as_uuid();
        let new_rows: Vec<NewUserRoleRow<'_>> = roles
            .iter()
            .map(|role| NewUserRoleRow {
                user_id,
                role: role.as_str(),
            })
            .collect();

        let outcome = conn
            .transaction(|conn| {
                async move {
                    let account_exists: bool = diesel::select(diesel::dsl::exists(
                        users::table.filter(users::id.eq(user_id)),
                    ))
                    .get_result(conn)
                    .await?;
                    if !account_exists {
                        return Ok(ReplaceOutcome::Missing);
                    }

                    diesel::delete(user_roles::table.filter(user_roles::user_id.eq(user_id)))
                        .execute(conn)
                        .await?;

                    if !new_rows.is_empty() {
                        diesel::insert_into(user_roles::table)
                            .values(&new_rows)
                            .execute(conn)
                            .await?;
                    }

                    Ok(ReplaceOutcome::Replaced)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match outcome {
            ReplaceOutcome::Replaced => Ok(()),
            ReplaceOutcome::Missing => Err(UserDirectoryError::missing()),
        }
    }

    async fn delete_account(&self, id: &UserId) -> Result<(), UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let user_id = *id.as_uuid();
        let outcome = conn
            .transaction(|conn| {
                async move {
                    let mut blockers = Vec::new();

                    let disaster_count: i64 = disasters::table
                        .filter(disasters::reported_by.eq(user_id))
                        .count()
                        .get_result(conn)
                        .await?;
                    if disaster_count > 0 {
                        blockers.push("disasters");
                    }

                    let profile_count: i64 = volunteers::table
                        .filter(volunteers::user_id.eq(user_id))
                        .count()
                        .get_result(conn)
                        .await?;
                    if profile_count > 0 {
                        blockers.push("volunteer profile");
                    }

                    let donation_count: i64 = donations::table
                        .filter(donations::donor_id.eq(user_id))
                        .count()
                        .get_result(conn)
                        .await?;
                    if donation_count > 0 {
                        blockers.push("donations");
                    }

                    let assignment_count: i64 = assignments::table
                        .filter(assignments::assigned_by.eq(user_id))
                        .count()
                        .get_result(conn)
                        .await?;
                    if assignment_count > 0 {
                        blockers.push("assignments");
                    }

                    let mission_count: i64 = missions::table
                        .filter(missions::created_by.eq(user_id))
                        .count()
                        .get_result(conn)
                        .await?;
                    if mission_count > 0 {
                        blockers.push("missions");
                    }

                    let request_count: i64 = resource_requests::table
                        .filter(resource_requests::requested_by.eq(user_id))
                        .count()
                        .get_result(conn)
                        .await?;
                    if request_count > 0 {
                        blockers.push("resource requests");
                    }

                    if !blockers.is_empty() {
                        return Ok(DeleteOutcome::Blocked(blockers.join(", ")));
                    }

                    diesel::delete(user_roles::table.filter(user_roles::user_id.eq(user_id)))
                        .execute(conn)
                        .await?;

                    let deleted_rows =
                        diesel::delete(users::table.filter(users::id.eq(user_id)))
                            .execute(conn)
                            .await?;

                    Ok(if deleted_rows == 0 {
                        DeleteOutcome::Missing
                    } else {
                        DeleteOutcome::Deleted
                    })
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match outcome {
            DeleteOutcome::Deleted => Ok(()),
            DeleteOutcome::Missing => Err(UserDirectoryError::missing()),
            DeleteOutcome::Blocked(details) => Err(UserDirectoryError::has_dependants(details)),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use chrono::Utc;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> UserAccountRow {
        UserAccountRow {
            id: Uuid::new_v4(),
            email: "ada@example.org".to_owned(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let pool_err = PoolError::checkout("connection refused");
        let repo_err = map_pool_error(pool_err);

        assert!(matches!(repo_err, UserDirectoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let diesel_err = diesel::result::Error::NotFound;
        let repo_err = map_diesel_error(diesel_err);

        assert!(matches!(repo_err, UserDirectoryError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn row_conversion_builds_the_account(valid_row: UserAccountRow) {
        let id = valid_row.id;

        let account = row_to_account(valid_row).expect("valid row should convert");

        assert_eq!(account.id(), &UserId::from_uuid(id));
        assert_eq!(account.email().as_ref(), "ada@example.org");
        assert_eq!(account.full_name(), "Ada Lovelace");
    }

    #[rstest]
    fn row_conversion_rejects_a_blank_name(mut valid_row: UserAccountRow) {
        valid_row.first_name = "   ".to_owned();

        let error = row_to_account(valid_row).expect_err("blank name should fail");
        assert!(matches!(error, UserDirectoryError::Query { .. }));
    }

    #[rstest]
    fn unknown_role_grants_are_skipped() {
        let mut roles = RoleSet::new();
        let user_id = Uuid::new_v4();

        insert_parsed_role(&mut roles, user_id, "Admin");
        insert_parsed_role(&mut roles, user_id, "Superuser");
        insert_parsed_role(&mut roles, user_id, "Donor");

        assert_eq!(roles.len(), 2);
        assert!(roles.contains(&Role::Admin));
        assert!(roles.contains(&Role::Donor));
    }
}
