//! Repository for the `events` table.

use sqlx::PgPool;
use vigia_core::types::DbId;

use crate::models::event::EventRow;

/// Column list for `events` queries.
const COLUMNS: &str = "id, event_type, company_id, source_entity_type, source_entity_id, \
     actor_user_id, payload, created_at";

/// Provides insert and lookup operations for the durable event log.
pub struct EventRepo;

impl EventRepo {
    /// Insert an event row, returning the generated ID.
    pub async fn insert(
        pool: &PgPool,
        event_type: &str,
        company_id: Option<DbId>,
        source_entity_type: Option<&str>,
        source_entity_id: Option<DbId>,
        actor_user_id: Option<DbId>,
        payload: &serde_json::Value,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO events (event_type, company_id, source_entity_type, source_entity_id, \
                                 actor_user_id, payload) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(event_type)
        .bind(company_id)
        .bind(source_entity_type)
        .bind(source_entity_id)
        .bind(actor_user_id)
        .bind(payload)
        .fetch_one(pool)
        .await
    }

    /// Most recent event row of a given type, if any.
    ///
    /// The persistence service writes asynchronously, so a freshly published
    /// event may not have a row yet; callers must tolerate `None`.
    pub async fn find_latest_by_type(
        pool: &PgPool,
        event_type: &str,
    ) -> Result<Option<EventRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events WHERE event_type = $1 ORDER BY id DESC LIMIT 1"
        );
        sqlx::query_as::<_, EventRow>(&query)
            .bind(event_type)
            .fetch_optional(pool)
            .await
    }

    /// Recent events for a company, newest first.
    pub async fn list_for_company(
        pool: &PgPool,
        company_id: DbId,
        limit: i64,
    ) -> Result<Vec<EventRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events \
             WHERE company_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, EventRow>(&query)
            .bind(company_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
