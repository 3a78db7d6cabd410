//! Repository for the `roles` lookup table.

use sqlx::PgPool;
use vigia_core::types::DbId;

use crate::models::role::Role;

/// Provides lookups against the seeded `roles` table.
pub struct RoleRepo;

impl RoleRepo {
    /// Resolve a role ID to its name. Errors with `RowNotFound` for unknown IDs.
    pub async fn resolve_name(pool: &PgPool, role_id: DbId) -> Result<String, sqlx::Error> {
        sqlx::query_scalar("SELECT name FROM roles WHERE id = $1")
            .bind(role_id)
            .fetch_one(pool)
            .await
    }

    /// Find a role by its well-known name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            "SELECT id, name, description, created_at FROM roles WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(pool)
        .await
    }
}
