//! Ticket list filtering.
//!
//! A list request is reduced to an ordered pipeline of [`FilterStage`]s,
//! always applied as category → priority → status → search. Each stage
//! narrows the candidate set; the repository layer turns every stage into
//! one `AND`-joined SQL predicate.

/// Escape character used in generated `LIKE` patterns.
pub const LIKE_ESCAPE: char = '\\';

/// One predicate-narrowing step over the ticket list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterStage<'a> {
    /// Exact match on `category`.
    Category(&'a str),
    /// Exact match on `priority`.
    Priority(&'a str),
    /// Exact match on `status`.
    Status(&'a str),
    /// Case-insensitive substring match on `title` OR `description`.
    Search(&'a str),
}

/// Normalized list filters.
///
/// Empty strings are treated as absent. Values are not checked against the
/// ticket vocabularies: an unknown category simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter<'a> {
    pub category: Option<&'a str>,
    pub priority: Option<&'a str>,
    pub status: Option<&'a str>,
    pub search: Option<&'a str>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl<'a> TicketFilter<'a> {
    /// Build a filter from raw query parameters.
    pub fn from_params(
        category: Option<&'a str>,
        priority: Option<&'a str>,
        status: Option<&'a str>,
        search: Option<&'a str>,
    ) -> Self {
        Self {
            category: non_empty(category),
            priority: non_empty(priority),
            status: non_empty(status),
            search: non_empty(search),
        }
    }

    /// The active stages, in application order.
    pub fn stages(&self) -> Vec<FilterStage<'a>> {
        [
            self.category.map(FilterStage::Category),
            self.priority.map(FilterStage::Priority),
            self.status.map(FilterStage::Status),
            self.search.map(FilterStage::Search),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// `true` when no stage is active and the full list is returned.
    pub fn is_empty(&self) -> bool {
        self.stages().is_empty()
    }
}

/// Build a `LIKE`/`ILIKE` pattern matching `needle` anywhere in a value.
///
/// `%`, `_` and the escape character itself are escaped so user input is
/// matched literally. Pair with `ESCAPE '\'` in the SQL.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
