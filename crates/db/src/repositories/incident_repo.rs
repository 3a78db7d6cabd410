//! Repository for the `incidents` table.

use sqlx::PgPool;
use vigia_core::types::{DbId, Timestamp};

use crate::models::incident::{CreateIncident, Incident, UpdateIncident};
use crate::models::status::IncidentStatus;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, company_id, location, description, occurred_at, status_id, \
     observations, evidence_paths, reported_by, deleted_at, created_at, updated_at";

/// Per-status count row for the dashboard summary.
#[derive(Debug, sqlx::FromRow)]
pub struct StatusCount {
    pub status_id: i16,
    pub count: i64,
}

/// Provides CRUD operations for incidents.
pub struct IncidentRepo;

impl IncidentRepo {
    /// Report a new incident for a company, returning the created row.
    ///
    /// New incidents always start Open.
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        reported_by: Option<DbId>,
        input: &CreateIncident,
    ) -> Result<Incident, sqlx::Error> {
        let query = format!(
            "INSERT INTO incidents (company_id, location, description, occurred_at, status_id, \
                                    reported_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Incident>(&query)
            .bind(company_id)
            .bind(&input.location)
            .bind(&input.description)
            .bind(input.occurred_at)
            .bind(IncidentStatus::Open.id())
            .bind(reported_by)
            .fetch_one(pool)
            .await
    }

    /// Find an incident by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Incident>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM incidents WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Incident>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a company's incidents, newest first. Excludes soft-deleted rows.
    pub async fn list_for_company(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<Incident>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM incidents \
             WHERE company_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Incident>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }

    /// Update incident details. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateIncident,
    ) -> Result<Option<Incident>, sqlx::Error> {
        let query = format!(
            "UPDATE incidents SET
                location = COALESCE($2, location),
                description = COALESCE($3, description),
                occurred_at = COALESCE($4, occurred_at),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Incident>(&query)
            .bind(id)
            .bind(&input.location)
            .bind(&input.description)
            .bind(input.occurred_at)
            .fetch_optional(pool)
            .await
    }

    /// Set an incident's status. Transitions are unconstrained by design.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status_id: i16,
    ) -> Result<Option<Incident>, sqlx::Error> {
        let query = format!(
            "UPDATE incidents SET status_id = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Incident>(&query)
            .bind(id)
            .bind(status_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the observations log with an extended copy.
    ///
    /// The log is append-only by convention: callers build the new value
    /// with `vigia_core::observations::append_entry`, never by truncating.
    pub async fn set_observations(
        pool: &PgPool,
        id: DbId,
        observations: &str,
    ) -> Result<Option<Incident>, sqlx::Error> {
        let query = format!(
            "UPDATE incidents SET observations = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Incident>(&query)
            .bind(id)
            .bind(observations)
            .fetch_optional(pool)
            .await
    }

    /// Replace the stored evidence value (canonical JSON-array form).
    pub async fn set_evidence(
        pool: &PgPool,
        id: DbId,
        evidence_paths: Option<&str>,
    ) -> Result<Option<Incident>, sqlx::Error> {
        let query = format!(
            "UPDATE incidents SET evidence_paths = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Incident>(&query)
            .bind(id)
            .bind(evidence_paths)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an incident. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE incidents SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted incident (delete compensation path).
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE incidents SET deleted_at = NULL WHERE id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Occurrence timestamps of a company's incidents (chart aggregation).
    pub async fn occurrence_dates(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<Option<Timestamp>>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT occurred_at FROM incidents WHERE company_id = $1 AND deleted_at IS NULL",
        )
        .bind(company_id)
        .fetch_all(pool)
        .await
    }

    /// Incident counts grouped by status for a company.
    pub async fn status_counts(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT status_id, COUNT(*) AS count FROM incidents \
             WHERE company_id = $1 AND deleted_at IS NULL \
             GROUP BY status_id ORDER BY status_id",
        )
        .bind(company_id)
        .fetch_all(pool)
        .await
    }
}
