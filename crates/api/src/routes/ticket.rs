//! Route definitions for tickets.
//!
//! Paths keep their trailing slash.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::ticket;
use crate::state::AppState;

/// Ticket routes.
///
/// ```text
/// GET     /tickets/              -> list
/// POST    /tickets/              -> create
/// GET     /tickets/stats/        -> stats
/// POST    /tickets/classify/     -> classify
/// GET     /tickets/{id}/         -> get_by_id
/// PUT     /tickets/{id}/         -> update
/// PATCH   /tickets/{id}/         -> update
/// DELETE  /tickets/{id}/         -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tickets/", get(ticket::list).post(ticket::create))
        .route("/tickets/stats/", get(ticket::stats))
        .route("/tickets/classify/", post(ticket::classify))
        .route(
            "/tickets/{id}/",
            get(ticket::get_by_id)
                .put(ticket::update)
                .patch(ticket::update)
                .delete(ticket::delete),
        )
}
