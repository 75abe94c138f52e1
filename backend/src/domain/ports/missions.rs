//! Driving ports for mission use-cases.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Error, Mission, MissionPriority, MissionStatus, UserId};

/// Payload for creating a mission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMission {
    /// Disaster the mission belongs to.
    pub disaster_id: Uuid,
    /// Short description of the work.
    pub title: String,
    /// Detailed briefing.
    pub description: Option<String>,
    /// Volunteer profile tasked with the mission, when one is.
    pub assigned_to: Option<Uuid>,
    /// Scheduling priority.
    pub priority: MissionPriority,
    /// Deadline for completion, when one exists.
    pub due_at: Option<DateTime<Utc>>,
}

/// Full replacement payload for updating a mission.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionChanges {
    /// Short description of the work.
    pub title: String,
    /// Detailed briefing.
    pub description: Option<String>,
    /// Volunteer profile tasked with the mission, when one is.
    pub assigned_to: Option<Uuid>,
    /// Lifecycle state.
    pub status: MissionStatus,
    /// Scheduling priority.
    pub priority: MissionPriority,
    /// Deadline for completion, when one exists.
    pub due_at: Option<DateTime<Utc>>,
    /// Version the caller last read.
    pub expected_version: u32,
}

/// Domain use-case port for mission mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MissionsCommand: Send + Sync {
    /// Create a mission within a disaster.
    async fn create(&self, caller: &UserId, mission: NewMission) -> Result<Mission, Error>;

    /// Apply a full update to a mission.
    async fn update(
        &self,
        caller: &UserId,
        id: Uuid,
        changes: MissionChanges,
    ) -> Result<Mission, Error>;

    /// Move a mission through its lifecycle.
    async fn update_status(
        &self,
        caller: &UserId,
        id: Uuid,
        status: MissionStatus,
    ) -> Result<Mission, Error>;
}

/// Domain use-case port for mission reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MissionsQuery: Send + Sync {
    /// Fetch one mission.
    async fn get(&self, caller: &UserId, id: Uuid) -> Result<Mission, Error>;

    /// List every mission on record, newest first.
    async fn list(&self, caller: &UserId) -> Result<Vec<Mission>, Error>;

    /// List missions assigned to the caller's volunteer profile.
    ///
    /// Callers without a profile get an empty list; missions simply cannot
    /// be assigned to them yet.
    async fn list_mine(&self, caller: &UserId) -> Result<Vec<Mission>, Error>;
}
