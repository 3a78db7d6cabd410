//! Hazard matrix entry model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vigia_core::types::{DbId, Timestamp};

/// A row from the `hazard_entries` table.
///
/// `risk_score` and `risk_level` are derived server-side from probability
/// and severity via `vigia_core::risk`, never accepted from clients.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HazardEntry {
    pub id: DbId,
    pub company_id: DbId,
    pub process_area: String,
    pub hazard_description: String,
    pub probability: i16,
    pub severity: i16,
    pub risk_score: i16,
    pub risk_level: String,
    pub control_measures: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a hazard entry.
#[derive(Debug, Deserialize)]
pub struct CreateHazardEntry {
    pub process_area: String,
    pub hazard_description: String,
    pub probability: i16,
    pub severity: i16,
    pub control_measures: Option<String>,
}

/// DTO for updating a hazard entry. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateHazardEntry {
    pub process_area: Option<String>,
    pub hazard_description: Option<String>,
    pub probability: Option<i16>,
    pub severity: Option<i16>,
    pub control_measures: Option<String>,
}
