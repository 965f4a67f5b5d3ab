//! Handlers for the `/tickets` resource.
//!
//! CRUD, filtered listing, global statistics and AI-assisted
//! classification. JSON body rejections are reported as 400s with the
//! standard error envelope.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use helpdesk_core::classify::Classification;
use helpdesk_core::error::CoreError;
use helpdesk_core::filter::TicketFilter;
use helpdesk_core::stats::TicketStats;
use helpdesk_core::ticket;
use helpdesk_core::types::DbId;
use helpdesk_db::models::ticket::{CreateTicket, Ticket, TicketListParams, UpdateTicket};
use helpdesk_db::repositories::TicketRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /tickets/classify/`.
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub description: Option<String>,
}

/// Response body for `POST /tickets/classify/`.
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub suggested_category: Option<String>,
    pub suggested_priority: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Ticket",
        id,
    })
}

/// A `{id}` segment that is not an integer names no ticket.
fn ticket_id(path: Result<Path<DbId>, PathRejection>) -> AppResult<DbId> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Unparseable ticket id");
        AppError::NotFound("Ticket not found".into())
    })
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(input)| input)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/tickets/
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateTicket>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Ticket>)> {
    let input = json_body(payload)?;
    input.validate()?;
    ticket::validate_fields(
        Some(input.category.as_str()),
        Some(input.priority.as_str()),
        input.status.as_deref(),
    )?;

    let created = TicketRepo::create(&state.pool, &input).await?;

    tracing::info!(
        ticket_id = created.id,
        category = %created.category,
        priority = %created.priority,
        "Ticket created",
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/tickets/?category=&priority=&status=&search=
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<Json<Vec<Ticket>>> {
    let Query(pairs) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let params: TicketListParams = pairs.into_iter().collect();
    let filter = TicketFilter::from_params(
        params.category.as_deref(),
        params.priority.as_deref(),
        params.status.as_deref(),
        params.search.as_deref(),
    );
    let tickets = TicketRepo::list_filtered(&state.pool, &filter).await?;
    Ok(Json(tickets))
}

/// GET /api/tickets/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<Ticket>> {
    let id = ticket_id(path)?;
    let found = TicketRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(found))
}

/// PUT|PATCH /api/tickets/{id}/
///
/// Both verbs apply a partial update: omitted fields are left unchanged.
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<UpdateTicket>, JsonRejection>,
) -> AppResult<Json<Ticket>> {
    let id = ticket_id(path)?;
    let input = json_body(payload)?;
    input.validate()?;
    ticket::validate_fields(
        input.category.as_deref(),
        input.priority.as_deref(),
        input.status.as_deref(),
    )?;

    let updated = TicketRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(ticket_id = id, status = %updated.status, "Ticket updated");

    Ok(Json(updated))
}

/// DELETE /api/tickets/{id}/
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<StatusCode> {
    let id = ticket_id(path)?;
    if TicketRepo::delete(&state.pool, id).await? {
        tracing::info!(ticket_id = id, "Ticket deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

// ---------------------------------------------------------------------------
// GET /api/tickets/stats/
// ---------------------------------------------------------------------------

/// Global statistics over every ticket. Ignores query parameters.
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<TicketStats>> {
    let stats = TicketRepo::stats(&state.pool).await?;
    Ok(Json(stats))
}

// ---------------------------------------------------------------------------
// POST /api/tickets/classify/
// ---------------------------------------------------------------------------

/// Suggest a category and priority for a ticket description.
///
/// Model failures are not surfaced: the response carries two nulls and
/// the reason is logged.
pub async fn classify(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> AppResult<Json<ClassifyResponse>> {
    // An unreadable body has no description either.
    let description = payload.ok().and_then(|Json(body)| body.description);

    let classification = state.classifier.classify(description.as_deref()).await?;

    if let Classification::Unavailable { reason } = &classification {
        tracing::warn!(%reason, "Ticket classification unavailable, returning empty suggestion");
    }

    let (suggested_category, suggested_priority) = classification.into_suggestion();

    Ok(Json(ClassifyResponse {
        suggested_category,
        suggested_priority,
    }))
}
