use std::sync::Arc;

use crate::classifier::TicketClassifier;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: helpdesk_db::DbPool,
    /// Classification adapter backed by the configured language model.
    pub classifier: Arc<TicketClassifier>,
}
