pub mod health;
pub mod ticket;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tickets/                   list, create
/// /tickets/stats/             global statistics
/// /tickets/classify/          AI-assisted category/priority suggestion
/// /tickets/{id}/              get, update (PUT/PATCH), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(ticket::router())
}
