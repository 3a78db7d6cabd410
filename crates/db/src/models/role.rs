//! Role lookup-table model.

use serde::Serialize;
use sqlx::FromRow;
use vigia_core::types::{DbId, Timestamp};

/// A row from the `roles` table. Seeded at migration time; names match the
/// constants in `vigia_core::roles`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}
