//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    assignments, disasters, donations, missions, resource_categories, resource_requests, resources,
    user_roles, users, volunteers,
};

// ---------------------------------------------------------------------------
// Directory models
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserAccountRow {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading role grants.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRoleRow {
    pub user_id: Uuid,
    pub role: String,
    #[expect(dead_code, reason = "schema field for future grant auditing")]
    pub granted_at: DateTime<Utc>,
}

/// Insertable struct for writing role grants.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_roles)]
pub(crate) struct NewUserRoleRow<'a> {
    pub user_id: Uuid,
    pub role: &'a str,
}

// ---------------------------------------------------------------------------
// Disaster models
// ---------------------------------------------------------------------------

/// Row struct for reading from the disasters table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = disasters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DisasterRow {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub kind: String,
    pub severity: String,
    pub status: String,
    pub started_at: DateTime<Utc>,
    pub estimated_affected: Option<i32>,
    pub reported_by: Uuid,
    pub version: i32,
}

/// Insertable struct for creating disaster records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = disasters)]
pub(crate) struct NewDisasterRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub location: &'a str,
    pub description: Option<&'a str>,
    pub kind: &'a str,
    pub severity: &'a str,
    pub status: &'a str,
    pub started_at: DateTime<Utc>,
    pub estimated_affected: Option<i32>,
    pub reported_by: Uuid,
    pub version: i32,
}

/// Changeset struct for full disaster updates.
///
/// Updates are full replacements, so `None` in an optional column clears it.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = disasters)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct DisasterUpdate<'a> {
    pub name: &'a str,
    pub location: &'a str,
    pub description: Option<&'a str>,
    pub kind: &'a str,
    pub severity: &'a str,
    pub status: &'a str,
    pub estimated_affected: Option<i32>,
    pub version: i32,
}

// ---------------------------------------------------------------------------
// Volunteer models
// ---------------------------------------------------------------------------

/// Row struct for reading from the volunteers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = volunteers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VolunteerRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skills: Option<String>,
    pub availability: String,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub registered_at: DateTime<Utc>,
    pub version: i32,
}

/// Insertable struct for creating volunteer profiles.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = volunteers)]
pub(crate) struct NewVolunteerRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skills: Option<&'a str>,
    pub availability: &'a str,
    pub address: Option<&'a str>,
    pub emergency_contact: Option<&'a str>,
    pub registered_at: DateTime<Utc>,
    pub version: i32,
}

/// Changeset struct for full profile updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = volunteers)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct VolunteerUpdate<'a> {
    pub skills: Option<&'a str>,
    pub availability: &'a str,
    pub address: Option<&'a str>,
    pub emergency_contact: Option<&'a str>,
    pub version: i32,
}

// ---------------------------------------------------------------------------
// Inventory models
// ---------------------------------------------------------------------------

/// Row struct for reading from the resource_categories table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = resource_categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ResourceCategoryRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// Insertable struct for creating categories.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = resource_categories)]
pub(crate) struct NewResourceCategoryRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

/// Changeset struct for full category updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = resource_categories)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ResourceCategoryUpdate<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

/// Row struct for reading from the resources table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = resources)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ResourceRow {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub current_quantity: i32,
    pub threshold_quantity: i32,
    pub version: i32,
}

/// Insertable struct for creating resources.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = resources)]
pub(crate) struct NewResourceRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub category_id: Uuid,
    pub description: Option<&'a str>,
    pub unit: Option<&'a str>,
    pub current_quantity: i32,
    pub threshold_quantity: i32,
    pub version: i32,
}

/// Changeset struct for resource metadata updates.
///
/// Deliberately omits `current_quantity`: stock only moves through donation
/// and fulfilment transactions, so a metadata update racing a stock write
/// cannot clobber it.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = resources)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ResourceUpdate<'a> {
    pub name: &'a str,
    pub category_id: Uuid,
    pub description: Option<&'a str>,
    pub unit: Option<&'a str>,
    pub threshold_quantity: i32,
    pub version: i32,
}

// ---------------------------------------------------------------------------
// Donation models
// ---------------------------------------------------------------------------

/// Row struct for reading from the donations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = donations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DonationRow {
    pub id: Uuid,
    pub donor_id: Uuid,
    pub resource_id: Uuid,
    pub quantity: i32,
    pub donated_at: DateTime<Utc>,
    pub status: String,
    pub notes: Option<String>,
}

/// Insertable struct for recording donations.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = donations)]
pub(crate) struct NewDonationRow<'a> {
    pub id: Uuid,
    pub donor_id: Uuid,
    pub resource_id: Uuid,
    pub quantity: i32,
    pub donated_at: DateTime<Utc>,
    pub status: &'a str,
    pub notes: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Assignment models
// ---------------------------------------------------------------------------

/// Row struct for reading from the assignments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = assignments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AssignmentRow {
    pub id: Uuid,
    pub volunteer_id: Uuid,
    pub disaster_id: Uuid,
    pub assigned_at: DateTime<Utc>,
    pub role: Option<String>,
    pub status: String,
    pub assigned_by: Uuid,
}

/// Insertable struct for creating assignments.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = assignments)]
pub(crate) struct NewAssignmentRow<'a> {
    pub id: Uuid,
    pub volunteer_id: Uuid,
    pub disaster_id: Uuid,
    pub assigned_at: DateTime<Utc>,
    pub role: Option<&'a str>,
    pub status: &'a str,
    pub assigned_by: Uuid,
}

// ---------------------------------------------------------------------------
// Mission models
// ---------------------------------------------------------------------------

/// Row struct for reading from the missions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = missions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MissionRow {
    pub id: Uuid,
    pub disaster_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub status: String,
    pub priority: String,
    pub due_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub version: i32,
}

/// Insertable struct for creating missions.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = missions)]
pub(crate) struct NewMissionRow<'a> {
    pub id: Uuid,
    pub disaster_id: Uuid,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub assigned_to: Option<Uuid>,
    pub status: &'a str,
    pub priority: &'a str,
    pub due_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub version: i32,
}

/// Changeset struct for full mission updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = missions)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct MissionUpdate<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub assigned_to: Option<Uuid>,
    pub status: &'a str,
    pub priority: &'a str,
    pub due_at: Option<DateTime<Utc>>,
    pub version: i32,
}

// ---------------------------------------------------------------------------
// Resource request models
// ---------------------------------------------------------------------------

/// Row struct for reading from the resource_requests table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = resource_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ResourceRequestRow {
    pub id: Uuid,
    pub disaster_id: Uuid,
    pub resource_id: Uuid,
    pub quantity_requested: i32,
    pub urgency: String,
    pub status: String,
    pub requested_by: Uuid,
    pub requested_at: DateTime<Utc>,
    pub required_by: Option<DateTime<Utc>>,
}

/// Insertable struct for opening requests.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = resource_requests)]
pub(crate) struct NewResourceRequestRow<'a> {
    pub id: Uuid,
    pub disaster_id: Uuid,
    pub resource_id: Uuid,
    pub quantity_requested: i32,
    pub urgency: &'a str,
    pub status: &'a str,
    pub requested_by: Uuid,
    pub requested_at: DateTime<Utc>,
    pub required_by: Option<DateTime<Utc>>,
}
