//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Directory accounts.
    ///
    /// The `email` column carries a unique index and is stored lowercased.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Login and contact email, unique, lowercased.
        email -> Varchar,
        /// Given name.
        first_name -> Varchar,
        /// Family name.
        last_name -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Role grants, one row per (account, role) pair.
    user_roles (user_id, role) {
        /// Account holding the grant.
        user_id -> Uuid,
        /// Canonical role name (`Admin`, `Coordinator`, `Volunteer`, `Donor`).
        role -> Varchar,
        /// When the grant was made. Defaults to `now()` on insert.
        granted_at -> Timestamptz,
    }
}

diesel::table! {
    /// Reported disasters.
    disasters (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Short human-readable name.
        name -> Varchar,
        /// Affected area description.
        location -> Varchar,
        /// Free-form situation notes.
        description -> Nullable<Text>,
        /// Canonical `DisasterKind` string.
        kind -> Varchar,
        /// Canonical `SeverityLevel` string.
        severity -> Varchar,
        /// Canonical `DisasterStatus` string.
        status -> Varchar,
        /// When the disaster began.
        started_at -> Timestamptz,
        /// Estimated number of people affected, when known.
        estimated_affected -> Nullable<Int4>,
        /// Account that reported the disaster.
        reported_by -> Uuid,
        /// Optimistic concurrency counter, non-negative.
        version -> Int4,
    }
}

diesel::table! {
    /// Volunteer profiles.
    ///
    /// The `user_id` column carries a unique index: one profile per account.
    volunteers (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning directory account, unique.
        user_id -> Uuid,
        /// Free-form skills summary.
        skills -> Nullable<Varchar>,
        /// Canonical `AvailabilityStatus` string.
        availability -> Varchar,
        /// Contact address.
        address -> Nullable<Varchar>,
        /// Emergency contact line.
        emergency_contact -> Nullable<Varchar>,
        /// When the profile was registered.
        registered_at -> Timestamptz,
        /// Optimistic concurrency counter, non-negative.
        version -> Int4,
    }
}

diesel::table! {
    /// Inventory categories.
    ///
    /// The `name` column carries a unique index.
    resource_categories (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique display name.
        name -> Varchar,
        /// What belongs in the category.
        description -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Stocked relief resources.
    resources (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// Owning category.
        category_id -> Uuid,
        /// Free-form description.
        description -> Nullable<Varchar>,
        /// Unit the quantities are counted in.
        unit -> Nullable<Varchar>,
        /// Units currently in stock, non-negative.
        current_quantity -> Int4,
        /// Stock level at which the resource is flagged as low.
        threshold_quantity -> Int4,
        /// Optimistic concurrency counter, non-negative.
        version -> Int4,
    }
}

diesel::table! {
    /// Donation pledges against resources.
    donations (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Account that pledged the donation.
        donor_id -> Uuid,
        /// Resource the stock counts against.
        resource_id -> Uuid,
        /// Units pledged, strictly positive.
        quantity -> Int4,
        /// When the pledge was recorded.
        donated_at -> Timestamptz,
        /// Canonical `DonationStatus` string.
        status -> Varchar,
        /// Free-form notes from the donor.
        notes -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Volunteer deployments.
    ///
    /// A partial unique index on `(volunteer_id, disaster_id)` where
    /// `status = 'Assigned'` enforces at most one active deployment per pair.
    assignments (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Volunteer profile being deployed.
        volunteer_id -> Uuid,
        /// Disaster the volunteer is deployed to.
        disaster_id -> Uuid,
        /// When the assignment was made.
        assigned_at -> Timestamptz,
        /// Role on the ground.
        role -> Nullable<Varchar>,
        /// Canonical `AssignmentStatus` string.
        status -> Varchar,
        /// Coordinator or admin who made the assignment.
        assigned_by -> Uuid,
    }
}

diesel::table! {
    /// Relief missions within a disaster.
    missions (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Disaster the mission belongs to.
        disaster_id -> Uuid,
        /// Short description of the work.
        title -> Varchar,
        /// Detailed briefing.
        description -> Nullable<Text>,
        /// Volunteer profile tasked with the mission, when one is.
        assigned_to -> Nullable<Uuid>,
        /// Canonical `MissionStatus` string.
        status -> Varchar,
        /// Canonical `MissionPriority` string.
        priority -> Varchar,
        /// Deadline for completion, when one exists.
        due_at -> Nullable<Timestamptz>,
        /// When the mission was created.
        created_at -> Timestamptz,
        /// Coordinator or admin who created the mission.
        created_by -> Uuid,
        /// Optimistic concurrency counter, non-negative.
        version -> Int4,
    }
}

diesel::table! {
    /// Requests for stock to be sent to a disaster.
    resource_requests (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Disaster the stock is destined for.
        disaster_id -> Uuid,
        /// Resource being requested.
        resource_id -> Uuid,
        /// Units requested, strictly positive.
        quantity_requested -> Int4,
        /// Canonical `UrgencyLevel` string.
        urgency -> Varchar,
        /// Canonical `RequestStatus` string.
        status -> Varchar,
        /// Account that opened the request.
        requested_by -> Uuid,
        /// When the request was opened.
        requested_at -> Timestamptz,
        /// Date the stock is needed by, when one exists.
        required_by -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(user_roles -> users (user_id));
diesel::joinable!(disasters -> users (reported_by));
diesel::joinable!(volunteers -> users (user_id));
diesel::joinable!(resources -> resource_categories (category_id));
diesel::joinable!(donations -> resources (resource_id));
diesel::joinable!(donations -> users (donor_id));
diesel::joinable!(assignments -> volunteers (volunteer_id));
diesel::joinable!(assignments -> disasters (disaster_id));
diesel::joinable!(assignments -> users (assigned_by));
diesel::joinable!(missions -> disasters (disaster_id));
diesel::joinable!(missions -> volunteers (assigned_to));
diesel::joinable!(missions -> users (created_by));
diesel::joinable!(resource_requests -> disasters (disaster_id));
diesel::joinable!(resource_requests -> resources (resource_id));
diesel::joinable!(resource_requests -> users (requested_by));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    user_roles,
    disasters,
    volunteers,
    resource_categories,
    resources,
    donations,
    assignments,
    missions,
    resource_requests,
);
