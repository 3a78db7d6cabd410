//! Incident entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vigia_core::types::{DbId, Timestamp};

/// A row from the `incidents` table.
///
/// `observations` is an append-only free-text log; `evidence_paths` is the
/// raw stored value, which historic clients wrote in three shapes (bare
/// path, JSON array, JSON-encoded string). Normalize it with
/// `vigia_core::evidence::EvidenceRefs::parse` before use -- never hand the
/// raw column to display code.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Incident {
    pub id: DbId,
    pub company_id: DbId,
    pub location: Option<String>,
    pub description: Option<String>,
    pub occurred_at: Option<Timestamp>,
    pub status_id: i16,
    pub observations: Option<String>,
    pub evidence_paths: Option<String>,
    pub reported_by: Option<DbId>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for reporting a new incident.
#[derive(Debug, Deserialize)]
pub struct CreateIncident {
    pub location: Option<String>,
    pub description: Option<String>,
    pub occurred_at: Option<Timestamp>,
}

/// DTO for updating incident details. All fields are optional; the
/// observations log and evidence have their own append-style operations.
#[derive(Debug, Deserialize)]
pub struct UpdateIncident {
    pub location: Option<String>,
    pub description: Option<String>,
    pub occurred_at: Option<Timestamp>,
}
