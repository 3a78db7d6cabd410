//! Durable domain-event log model.

use serde::Serialize;
use sqlx::FromRow;
use vigia_core::types::{DbId, Timestamp};

/// A row from the `events` table. Written by the event persistence service;
/// read back for audit and notification linkage.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventRow {
    pub id: DbId,
    /// Dot-separated event name, e.g. `"incident.status_changed"`.
    pub event_type: String,
    /// Tenant scope of the event, if any.
    pub company_id: Option<DbId>,
    pub source_entity_type: Option<String>,
    pub source_entity_id: Option<DbId>,
    pub actor_user_id: Option<DbId>,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}
