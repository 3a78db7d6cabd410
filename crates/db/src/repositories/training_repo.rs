//! Repository for the `training_sessions` table.

use sqlx::PgPool;
use vigia_core::types::DbId;

use crate::models::status::TrainingStatus;
use crate::models::training::{CreateTraining, TrainingSession, UpdateTraining};

/// Column list for `training_sessions` queries.
const COLUMNS: &str = "id, company_id, topic, trainer, scheduled_on, duration_hours, \
     attendee_count, status_id, created_at, updated_at";

/// Provides CRUD operations for training sessions.
pub struct TrainingRepo;

impl TrainingRepo {
    /// Schedule a new training session, returning the created row.
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        input: &CreateTraining,
    ) -> Result<TrainingSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO training_sessions \
                 (company_id, topic, trainer, scheduled_on, duration_hours, status_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainingSession>(&query)
            .bind(company_id)
            .bind(&input.topic)
            .bind(&input.trainer)
            .bind(input.scheduled_on)
            .bind(input.duration_hours)
            .bind(TrainingStatus::Planned.id())
            .fetch_one(pool)
            .await
    }

    /// Find a training session by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TrainingSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM training_sessions WHERE id = $1");
        sqlx::query_as::<_, TrainingSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a company's training sessions by scheduled date.
    pub async fn list_for_company(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<TrainingSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM training_sessions \
             WHERE company_id = $1 \
             ORDER BY scheduled_on ASC NULLS LAST, created_at DESC"
        );
        sqlx::query_as::<_, TrainingSession>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }

    /// Update a training session. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTraining,
    ) -> Result<Option<TrainingSession>, sqlx::Error> {
        let query = format!(
            "UPDATE training_sessions SET
                topic = COALESCE($2, topic),
                trainer = COALESCE($3, trainer),
                scheduled_on = COALESCE($4, scheduled_on),
                duration_hours = COALESCE($5, duration_hours),
                attendee_count = COALESCE($6, attendee_count),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainingSession>(&query)
            .bind(id)
            .bind(&input.topic)
            .bind(&input.trainer)
            .bind(input.scheduled_on)
            .bind(input.duration_hours)
            .bind(input.attendee_count)
            .fetch_optional(pool)
            .await
    }

    /// Mark a session completed with its final attendee count.
    pub async fn complete(
        pool: &PgPool,
        id: DbId,
        attendee_count: Option<i32>,
    ) -> Result<Option<TrainingSession>, sqlx::Error> {
        let query = format!(
            "UPDATE training_sessions SET
                status_id = $2,
                attendee_count = COALESCE($3, attendee_count),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainingSession>(&query)
            .bind(id)
            .bind(TrainingStatus::Completed.id())
            .bind(attendee_count)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a training session.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM training_sessions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
