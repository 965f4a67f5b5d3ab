//! Ticket entity model and DTOs.

use helpdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ticket {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new ticket.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTicket {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub category: String,
    pub priority: String,
    /// Defaults to `open` if omitted.
    pub status: Option<String>,
}

/// DTO for updating an existing ticket. All fields are optional.
///
/// `id` and `created_at` are not part of the DTO; if a client sends them
/// they are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTicket {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

/// Query parameters for listing tickets.
///
/// Built from raw query pairs so that a repeated key never rejects the
/// request: the last occurrence wins and unknown keys are ignored.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TicketListParams {
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl FromIterator<(String, String)> for TicketListParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "category" => &mut params.category,
                "priority" => &mut params.priority,
                "status" => &mut params.status,
                "search" => &mut params.search,
                _ => continue,
            };
            *slot = Some(value);
        }
        params
    }
}

/// A `(value, count)` row from a `GROUP BY` aggregate.
#[derive(Debug, Clone, FromRow)]
pub struct CountRow {
    pub value: String,
    pub count: i64,
}
