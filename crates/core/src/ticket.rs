//! Ticket vocabularies and validation helpers.
//!
//! Category, priority and status are closed sets. The API layer validates
//! every write against them before it reaches the database; the `tickets`
//! table carries matching `CHECK` constraints as a backstop.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

pub const CATEGORY_BILLING: &str = "billing";
pub const CATEGORY_TECHNICAL: &str = "technical";
pub const CATEGORY_ACCOUNT: &str = "account";
pub const CATEGORY_GENERAL: &str = "general";

/// All valid ticket categories.
pub const VALID_CATEGORIES: &[&str] = &[
    CATEGORY_BILLING,
    CATEGORY_TECHNICAL,
    CATEGORY_ACCOUNT,
    CATEGORY_GENERAL,
];

// ---------------------------------------------------------------------------
// Priorities
// ---------------------------------------------------------------------------

pub const PRIORITY_LOW: &str = "low";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_HIGH: &str = "high";
pub const PRIORITY_CRITICAL: &str = "critical";

/// All valid ticket priorities, lowest first.
pub const VALID_PRIORITIES: &[&str] = &[
    PRIORITY_LOW,
    PRIORITY_MEDIUM,
    PRIORITY_HIGH,
    PRIORITY_CRITICAL,
];

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

/// Initial status for a newly created ticket.
pub const STATUS_OPEN: &str = "open";
/// Someone is working on the ticket.
pub const STATUS_IN_PROGRESS: &str = "in_progress";
/// The underlying issue has been fixed.
pub const STATUS_RESOLVED: &str = "resolved";
/// The ticket has been closed.
pub const STATUS_CLOSED: &str = "closed";

/// All valid ticket statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_OPEN,
    STATUS_IN_PROGRESS,
    STATUS_RESOLVED,
    STATUS_CLOSED,
];

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_member(field: &str, value: &str, allowed: &[&str]) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {field} '{value}'. Must be one of: {allowed:?}"
        )))
    }
}

/// Validate that a category string is one of the known categories.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    validate_member("category", category, VALID_CATEGORIES)
}

/// Validate that a priority string is one of the known priorities.
pub fn validate_priority(priority: &str) -> Result<(), CoreError> {
    validate_member("priority", priority, VALID_PRIORITIES)
}

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    validate_member("status", status, VALID_STATUSES)
}

/// Validate whichever vocabulary fields are present on a write.
///
/// Used by both create (where category and priority are always present)
/// and partial update (where any of them may be omitted).
pub fn validate_fields(
    category: Option<&str>,
    priority: Option<&str>,
    status: Option<&str>,
) -> Result<(), CoreError> {
    if let Some(c) = category {
        validate_category(c)?;
    }
    if let Some(p) = priority {
        validate_priority(p)?;
    }
    if let Some(s) = status {
        validate_status(s)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
