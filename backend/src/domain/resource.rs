//! Relief resource and category data model.

use uuid::Uuid;

/// Maximum accepted length for a resource name.
pub const RESOURCE_NAME_MAX: usize = 150;
/// Maximum accepted length for a resource description.
pub const RESOURCE_DESCRIPTION_MAX: usize = 1000;
/// Maximum accepted length for a unit label.
pub const RESOURCE_UNIT_MAX: usize = 50;
/// Maximum accepted length for a category name.
pub const CATEGORY_NAME_MAX: usize = 100;
/// Maximum accepted length for a category description.
pub const CATEGORY_DESCRIPTION_MAX: usize = 500;
/// Default alert threshold for newly created resources.
pub const DEFAULT_THRESHOLD_QUANTITY: i32 = 5;

/// Grouping for resources of the same kind, e.g. "Medical supplies".
///
/// ## Invariants
/// - `name` is unique and non-blank.
/// - A category with resources attached cannot be deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceCategory {
    /// Stable identifier.
    pub id: Uuid,
    /// Unique display name.
    pub name: String,
    /// Optional description of what belongs in the category.
    pub description: Option<String>,
}

/// A stocked relief resource.
///
/// ## Invariants
/// - `current_quantity` and `threshold_quantity` are never negative.
/// - `current_quantity` only changes through received donations and
///   fulfilled resource requests.
/// - `version` increments on every successful update.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// Stable identifier.
    pub id: Uuid,
    /// Display name, e.g. "Bottled water".
    pub name: String,
    /// Owning category.
    pub category_id: Uuid,
    /// Optional description.
    pub description: Option<String>,
    /// Unit the quantities are counted in, e.g. "litres".
    pub unit: Option<String>,
    /// Units currently in stock.
    pub current_quantity: i32,
    /// Stock level at which the resource is flagged as low.
    pub threshold_quantity: i32,
    /// Optimistic concurrency counter.
    pub version: u32,
}

impl Resource {
    /// Whether stock has fallen to or below the alert threshold.
    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        self.current_quantity <= self.threshold_quantity
    }
}
