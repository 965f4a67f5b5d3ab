//! Aggregate statistics over the whole ticket set.
//!
//! The repository layer does the counting and grouping in SQL; this module
//! turns those raw counts into the published snapshot.

use std::collections::BTreeMap;

use serde::Serialize;

/// Count of tickets per distinct value of a categorical field.
pub type Breakdown = BTreeMap<String, i64>;

/// Global ticket statistics snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketStats {
    pub total_tickets: i64,
    pub open_tickets: i64,
    pub avg_tickets_per_day: f64,
    pub priority_breakdown: Breakdown,
    pub category_breakdown: Breakdown,
}

impl TicketStats {
    /// Assemble a snapshot from raw aggregate results.
    ///
    /// `daily_counts` holds one entry per calendar day that has at least one
    /// ticket. The breakdown rows are `(value, count)` pairs.
    pub fn from_counts(
        total_tickets: i64,
        open_tickets: i64,
        daily_counts: &[i64],
        priority_rows: impl IntoIterator<Item = (String, i64)>,
        category_rows: impl IntoIterator<Item = (String, i64)>,
    ) -> Self {
        Self {
            total_tickets,
            open_tickets,
            avg_tickets_per_day: average_per_day(daily_counts),
            priority_breakdown: priority_rows.into_iter().collect(),
            category_breakdown: category_rows.into_iter().collect(),
        }
    }
}

/// Mean of the per-day counts, rounded to two decimals. `0.0` when empty.
pub fn average_per_day(daily_counts: &[i64]) -> f64 {
    if daily_counts.is_empty() {
        return 0.0;
    }
    let total: i64 = daily_counts.iter().sum();
    round_2dp(total as f64 / daily_counts.len() as f64)
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
