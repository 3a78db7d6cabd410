//! Repository for the `hazard_entries` table.

use sqlx::PgPool;
use vigia_core::types::DbId;

use crate::models::hazard::HazardEntry;

/// Column list for `hazard_entries` queries.
const COLUMNS: &str = "id, company_id, process_area, hazard_description, probability, severity, \
     risk_score, risk_level, control_measures, created_at, updated_at";

/// Provides CRUD operations for hazard matrix entries.
pub struct HazardRepo;

impl HazardRepo {
    /// Insert a hazard entry with its derived risk fields.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        process_area: &str,
        hazard_description: &str,
        probability: i16,
        severity: i16,
        risk_score: i16,
        risk_level: &str,
        control_measures: Option<&str>,
    ) -> Result<HazardEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO hazard_entries \
                 (company_id, process_area, hazard_description, probability, severity, \
                  risk_score, risk_level, control_measures)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HazardEntry>(&query)
            .bind(company_id)
            .bind(process_area)
            .bind(hazard_description)
            .bind(probability)
            .bind(severity)
            .bind(risk_score)
            .bind(risk_level)
            .bind(control_measures)
            .fetch_one(pool)
            .await
    }

    /// Find a hazard entry by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<HazardEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hazard_entries WHERE id = $1");
        sqlx::query_as::<_, HazardEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a company's hazard matrix, highest risk first.
    pub async fn list_for_company(
        pool: &PgPool,
        company_id: DbId,
    ) -> Result<Vec<HazardEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM hazard_entries \
             WHERE company_id = $1 \
             ORDER BY risk_score DESC, created_at DESC"
        );
        sqlx::query_as::<_, HazardEntry>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }

    /// Rewrite a hazard entry with fully resolved fields.
    ///
    /// The handler recomputes risk from the merged probability/severity, so
    /// this takes final values rather than a partial DTO.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        process_area: &str,
        hazard_description: &str,
        probability: i16,
        severity: i16,
        risk_score: i16,
        risk_level: &str,
        control_measures: Option<&str>,
    ) -> Result<Option<HazardEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE hazard_entries SET
                process_area = $2,
                hazard_description = $3,
                probability = $4,
                severity = $5,
                risk_score = $6,
                risk_level = $7,
                control_measures = $8,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HazardEntry>(&query)
            .bind(id)
            .bind(process_area)
            .bind(hazard_description)
            .bind(probability)
            .bind(severity)
            .bind(risk_score)
            .bind(risk_level)
            .bind(control_measures)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a hazard entry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM hazard_entries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
