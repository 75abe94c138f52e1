//! Driving ports for disaster use-cases.
//!
//! Inbound adapters call these to report, amend, and read disasters without
//! importing persistence concerns. Capability checks happen behind the port,
//! so handler tests only need a mock returning canned outcomes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Disaster, DisasterKind, DisasterStatus, Error, SeverityLevel, UserId};

/// Payload for reporting a new disaster.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDisaster {
    /// Short human-readable name.
    pub name: String,
    /// Affected area description.
    pub location: String,
    /// Free-form situation notes.
    pub description: Option<String>,
    /// Hazard category.
    pub kind: DisasterKind,
    /// Operational severity.
    pub severity: SeverityLevel,
    /// Estimated number of people affected, when known.
    pub estimated_affected: Option<i32>,
}

/// Full replacement payload for updating a disaster.
#[derive(Debug, Clone, PartialEq)]
pub struct DisasterChanges {
    /// Short human-readable name.
    pub name: String,
    /// Affected area description.
    pub location: String,
    /// Free-form situation notes.
    pub description: Option<String>,
    /// Hazard category.
    pub kind: DisasterKind,
    /// Operational severity.
    pub severity: SeverityLevel,
    /// Lifecycle state.
    pub status: DisasterStatus,
    /// Estimated number of people affected, when known.
    pub estimated_affected: Option<i32>,
    /// Version the caller last read; the update fails with a conflict when
    /// the stored version has moved on.
    pub expected_version: u32,
}

/// Domain use-case port for disaster mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DisastersCommand: Send + Sync {
    /// Report a new disaster on behalf of `caller`.
    async fn report(&self, caller: &UserId, disaster: NewDisaster) -> Result<Disaster, Error>;

    /// Apply a full update to an existing disaster.
    async fn update(
        &self,
        caller: &UserId,
        id: Uuid,
        changes: DisasterChanges,
    ) -> Result<Disaster, Error>;

    /// Mark a disaster as resolved.
    async fn resolve(&self, caller: &UserId, id: Uuid) -> Result<Disaster, Error>;

    /// Delete a disaster outright.
    async fn delete(&self, caller: &UserId, id: Uuid) -> Result<(), Error>;
}

/// Domain use-case port for disaster reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DisastersQuery: Send + Sync {
    /// Fetch one disaster.
    async fn get(&self, caller: &UserId, id: Uuid) -> Result<Disaster, Error>;

    /// List all disasters, newest first.
    async fn list(&self, caller: &UserId) -> Result<Vec<Disaster>, Error>;
}
