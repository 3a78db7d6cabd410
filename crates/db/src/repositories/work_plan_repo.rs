//! Repository for the `work_plan_activities` table.

use sqlx::PgPool;
use vigia_core::types::DbId;

use crate::models::status::ActivityStatus;
use crate::models::work_plan::{CreateActivity, UpdateActivity, WorkPlanActivity};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, company_id, title, objective, target, description, scope, \
     responsible, resources, scheduled_on, scheduled_time, status_id, attendance_sheet_path, \
     photo_paths, deleted_at, created_at, updated_at";

/// Provides CRUD operations for work-plan activities.
pub struct WorkPlanRepo;

impl WorkPlanRepo {
    /// Plan a new activity for a company, returning the created row.
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        input: &CreateActivity,
    ) -> Result<WorkPlanActivity, sqlx::Error> {
        let query = format!(
            "INSERT INTO work_plan_activities \
                 (company_id, title, objective, target, description, scope, responsible, \
                  resources, scheduled_on, scheduled_time, status_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkPlanActivity>(&query)
            .bind(company_id)
            .bind(&input.title)
            .bind(&input.objective)
            .bind(&input.target)
            .bind(&input.description)
            .bind(&input.scope)
            .bind(&input.responsible)
            .bind(&input.resources)
            .bind(input.scheduled_on)
            .bind(&input.scheduled_time)
            .bind(ActivityStatus::Planned.id())
            .fetch_one(pool)
            .await
    }

    /// Find an activity by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WorkPlanActivity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM work_plan_activities WHERE id = $1 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, WorkPlanActivity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a company's activities ordered by scheduled date, then creation.
    pub async fn list_for_company(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<WorkPlanActivity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM work_plan_activities \
             WHERE company_id = $1 AND deleted_at IS NULL \
             ORDER BY scheduled_on ASC NULLS LAST, created_at DESC"
        );
        sqlx::query_as::<_, WorkPlanActivity>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }

    /// Update an activity. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateActivity,
    ) -> Result<Option<WorkPlanActivity>, sqlx::Error> {
        let query = format!(
            "UPDATE work_plan_activities SET
                title = COALESCE($2, title),
                objective = COALESCE($3, objective),
                target = COALESCE($4, target),
                description = COALESCE($5, description),
                scope = COALESCE($6, scope),
                responsible = COALESCE($7, responsible),
                resources = COALESCE($8, resources),
                scheduled_on = COALESCE($9, scheduled_on),
                scheduled_time = COALESCE($10, scheduled_time),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkPlanActivity>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.objective)
            .bind(&input.target)
            .bind(&input.description)
            .bind(&input.scope)
            .bind(&input.responsible)
            .bind(&input.resources)
            .bind(input.scheduled_on)
            .bind(&input.scheduled_time)
            .fetch_optional(pool)
            .await
    }

    /// Attach the attendance-sheet evidence path.
    pub async fn set_attendance_sheet(
        pool: &PgPool,
        id: DbId,
        path: &str,
    ) -> Result<Option<WorkPlanActivity>, sqlx::Error> {
        let query = format!(
            "UPDATE work_plan_activities SET attendance_sheet_path = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkPlanActivity>(&query)
            .bind(id)
            .bind(path)
            .fetch_optional(pool)
            .await
    }

    /// Replace the stored photo set (canonical JSON-array form).
    pub async fn set_photo_paths(
        pool: &PgPool,
        id: DbId,
        photo_paths: Option<&str>,
    ) -> Result<Option<WorkPlanActivity>, sqlx::Error> {
        let query = format!(
            "UPDATE work_plan_activities SET photo_paths = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkPlanActivity>(&query)
            .bind(id)
            .bind(photo_paths)
            .fetch_optional(pool)
            .await
    }

    /// Move an activity to a new status.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status_id: i16,
    ) -> Result<Option<WorkPlanActivity>, sqlx::Error> {
        let query = format!(
            "UPDATE work_plan_activities SET status_id = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkPlanActivity>(&query)
            .bind(id)
            .bind(status_id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an activity. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE work_plan_activities SET deleted_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted activity.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE work_plan_activities SET deleted_at = NULL \
             WHERE id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count activities in a given status for a company.
    pub async fn count_by_status(
        pool: &PgPool,
        company_id: DbId,
        status_id: i16,
    ) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM work_plan_activities \
             WHERE company_id = $1 AND status_id = $2 AND deleted_at IS NULL",
        )
        .bind(company_id)
        .bind(status_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}
