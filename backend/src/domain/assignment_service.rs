//! Volunteer assignment domain service.
//!
//! Assignment mutations keep the linked volunteer's availability in step
//! with the deployment; the repository performs both writes in one
//! transaction.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::permissions::authorize;
use crate::domain::ports::{
    AssignmentRepository, AssignmentRepositoryError, AssignmentsCommand, AssignmentsQuery,
    NewAssignment, PermissionsQuery, VolunteerRepository, VolunteerRepositoryError,
};
use crate::domain::validation::optional_text;
use crate::domain::{ASSIGNMENT_ROLE_MAX, Assignment, AssignmentStatus, Error, UserId};

fn map_repository_error(error: AssignmentRepositoryError) -> Error {
    match error {
        AssignmentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("assignment repository unavailable: {message}"))
        }
        AssignmentRepositoryError::Query { message } => {
            Error::internal(format!("assignment repository error: {message}"))
        }
        AssignmentRepositoryError::Missing => Error::not_found("assignment not found"),
        AssignmentRepositoryError::DuplicateAssignment => {
            Error::conflict("volunteer is already assigned to this disaster")
        }
        AssignmentRepositoryError::MissingVolunteer => {
            Error::not_found("assigned volunteer not found")
        }
        AssignmentRepositoryError::MissingDisaster => {
            Error::not_found("assigned disaster not found")
        }
    }
}

fn map_volunteer_error(error: VolunteerRepositoryError) -> Error {
    match error {
        VolunteerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("volunteer repository unavailable: {message}"))
        }
        other => Error::internal(format!("volunteer lookup failed: {other}")),
    }
}

/// Assignment service implementing the assignment driving ports.
///
/// Carries the volunteer repository alongside the assignment repository so
/// `list_mine` can resolve the caller's profile.
#[derive(Clone)]
pub struct AssignmentService<P, R, V> {
    permissions: Arc<P>,
    repository: Arc<R>,
    volunteers: Arc<V>,
}

impl<P, R, V> AssignmentService<P, R, V> {
    /// Create a service over the permission engine and repositories.
    pub fn new(permissions: Arc<P>, repository: Arc<R>, volunteers: Arc<V>) -> Self {
        Self {
            permissions,
            repository,
            volunteers,
        }
    }
}

#[async_trait]
impl<P, R, V> AssignmentsCommand for AssignmentService<P, R, V>
where
    P: PermissionsQuery,
    R: AssignmentRepository,
    V: VolunteerRepository,
{
    async fn assign(
        &self,
        caller: &UserId,
        assignment: NewAssignment,
    ) -> Result<Assignment, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.assign_missions, "assign volunteers")?;

        let role = optional_text("role", assignment.role, ASSIGNMENT_ROLE_MAX)?;

        let assignment = Assignment {
            id: Uuid::new_v4(),
            volunteer_id: assignment.volunteer_id,
            disaster_id: assignment.disaster_id,
            assigned_at: Utc::now(),
            role,
            status: AssignmentStatus::Assigned,
            assigned_by: caller.clone(),
        };
        self.repository
            .create(&assignment)
            .await
            .map_err(map_repository_error)?;
        Ok(assignment)
    }

    async fn update_status(
        &self,
        caller: &UserId,
        id: Uuid,
        status: AssignmentStatus,
    ) -> Result<Assignment, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.assign_missions, "manage assignments")?;

        self.repository
            .set_status(id, status)
            .await
            .map_err(map_repository_error)
    }

    async fn withdraw(&self, caller: &UserId, id: Uuid) -> Result<(), Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.manage_users, "withdraw assignments")?;

        self.repository
            .delete(id)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<P, R, V> AssignmentsQuery for AssignmentService<P, R, V>
where
    P: PermissionsQuery,
    R: AssignmentRepository,
    V: VolunteerRepository,
{
    async fn get(&self, caller: &UserId, id: Uuid) -> Result<Assignment, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.assign_missions, "view assignments")?;
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("assignment not found"))
    }

    async fn list(&self, caller: &UserId) -> Result<Vec<Assignment>, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.assign_missions, "view assignments")?;
        self.repository.list().await.map_err(map_repository_error)
    }

    async fn list_mine(&self, caller: &UserId) -> Result<Vec<Assignment>, Error> {
        let permissions = self.permissions.permissions_for(caller, None).await?;
        authorize(permissions.view_missions, "view assignments")?;
        let profile = self
            .volunteers
            .find_by_user(caller)
            .await
            .map_err(map_volunteer_error)?
            .ok_or_else(|| Error::not_found("no volunteer profile for this account"))?;
        self.repository
            .list_for_volunteer(profile.id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "assignment_service_tests.rs"]
mod tests;
