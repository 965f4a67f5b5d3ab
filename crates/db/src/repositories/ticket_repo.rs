//! Repository for the `tickets` table.

use helpdesk_core::filter::{contains_pattern, FilterStage, TicketFilter};
use helpdesk_core::stats::TicketStats;
use helpdesk_core::ticket::STATUS_OPEN;
use helpdesk_core::types::DbId;
use sqlx::postgres::PgExecutor;
use sqlx::PgPool;

use crate::models::ticket::{CountRow, CreateTicket, Ticket, UpdateTicket};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, category, priority, status, created_at";

/// Provides CRUD and aggregate operations for tickets.
pub struct TicketRepo;

impl TicketRepo {
    /// Insert a new ticket, returning the created row.
    ///
    /// If `status` is `None` in the input, defaults to `open`.
    pub async fn create(pool: &PgPool, input: &CreateTicket) -> Result<Ticket, sqlx::Error> {
        let query = format!(
            "INSERT INTO tickets (title, description, category, priority, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.priority)
            .bind(input.status.as_deref().unwrap_or(STATUS_OPEN))
            .fetch_one(pool)
            .await
    }

    /// Find a ticket by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = $1");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tickets matching every active stage of `filter`.
    ///
    /// Results are in insertion order.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &TicketFilter<'_>,
    ) -> Result<Vec<Ticket>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut binds: Vec<String> = Vec::new();

        for stage in filter.stages() {
            let param_idx = binds.len() + 1;
            match stage {
                FilterStage::Category(value) => {
                    conditions.push(format!("category = ${param_idx}"));
                    binds.push(value.to_string());
                }
                FilterStage::Priority(value) => {
                    conditions.push(format!("priority = ${param_idx}"));
                    binds.push(value.to_string());
                }
                FilterStage::Status(value) => {
                    conditions.push(format!("status = ${param_idx}"));
                    binds.push(value.to_string());
                }
                FilterStage::Search(needle) => {
                    conditions.push(format!(
                        "(title ILIKE ${param_idx} ESCAPE '\\' \
                          OR description ILIKE ${param_idx} ESCAPE '\\')"
                    ));
                    binds.push(contains_pattern(needle));
                }
            }
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!("SELECT {COLUMNS} FROM tickets {where_clause} ORDER BY id ASC");

        let mut q = sqlx::query_as::<_, Ticket>(&query);
        for value in binds {
            q = q.bind(value);
        }
        q.fetch_all(pool).await
    }

    /// Update a ticket. Only non-`None` fields in `input` are applied.
    ///
    /// `id` and `created_at` are never modified. Returns `None` if no row
    /// with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTicket,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!(
            "UPDATE tickets SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                priority = COALESCE($5, priority),
                status = COALESCE($6, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.priority)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a ticket by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Aggregates
    // -----------------------------------------------------------------------

    /// Total ticket count and the number of open tickets.
    pub async fn count_totals<'e>(
        executor: impl PgExecutor<'e>,
    ) -> Result<(i64, i64), sqlx::Error> {
        sqlx::query_as::<_, (i64, i64)>(
            "SELECT \
                COUNT(*)::BIGINT, \
                COUNT(*) FILTER (WHERE status = $1)::BIGINT \
             FROM tickets",
        )
        .bind(STATUS_OPEN)
        .fetch_one(executor)
        .await
    }

    /// Ticket counts per UTC calendar day, one entry per day with tickets.
    pub async fn daily_counts<'e>(
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT \
             FROM tickets \
             GROUP BY (created_at AT TIME ZONE 'UTC')::DATE \
             ORDER BY (created_at AT TIME ZONE 'UTC')::DATE",
        )
        .fetch_all(executor)
        .await
    }

    /// Ticket count per distinct priority.
    pub async fn priority_breakdown<'e>(
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<CountRow>, sqlx::Error> {
        sqlx::query_as::<_, CountRow>(
            "SELECT priority AS value, COUNT(*)::BIGINT AS count \
             FROM tickets GROUP BY priority ORDER BY priority",
        )
        .fetch_all(executor)
        .await
    }

    /// Ticket count per distinct category.
    pub async fn category_breakdown<'e>(
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<CountRow>, sqlx::Error> {
        sqlx::query_as::<_, CountRow>(
            "SELECT category AS value, COUNT(*)::BIGINT AS count \
             FROM tickets GROUP BY category ORDER BY category",
        )
        .fetch_all(executor)
        .await
    }

    /// Compute the global statistics snapshot.
    ///
    /// The four aggregates run in one `REPEATABLE READ` transaction so they
    /// all see the same set of rows.
    pub async fn stats(pool: &PgPool) -> Result<TicketStats, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let (total, open) = Self::count_totals(&mut *tx).await?;
        let daily = Self::daily_counts(&mut *tx).await?;
        let priorities = Self::priority_breakdown(&mut *tx).await?;
        let categories = Self::category_breakdown(&mut *tx).await?;

        tx.commit().await?;

        Ok(TicketStats::from_counts(
            total,
            open,
            &daily,
            priorities.into_iter().map(|r| (r.value, r.count)),
            categories.into_iter().map(|r| (r.value, r.count)),
        ))
    }
}
