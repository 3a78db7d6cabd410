//! Work-plan activity entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vigia_core::types::{DbId, Timestamp};

/// A row from the `work_plan_activities` table.
///
/// An activity is created Planned and may only move to Executed once both
/// evidence files (attendance sheet + photo set) are attached.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkPlanActivity {
    pub id: DbId,
    pub company_id: DbId,
    pub title: String,
    pub objective: Option<String>,
    pub target: Option<String>,
    pub description: Option<String>,
    pub scope: Option<String>,
    pub responsible: Option<String>,
    pub resources: Option<String>,
    pub scheduled_on: Option<NaiveDate>,
    /// Display-form time of day, e.g. `"10:00"`.
    pub scheduled_time: Option<String>,
    pub status_id: i16,
    pub attendance_sheet_path: Option<String>,
    /// JSON array of stored photo paths.
    pub photo_paths: Option<String>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for planning a new activity.
#[derive(Debug, Deserialize)]
pub struct CreateActivity {
    pub title: String,
    pub objective: Option<String>,
    pub target: Option<String>,
    pub description: Option<String>,
    pub scope: Option<String>,
    pub responsible: Option<String>,
    pub resources: Option<String>,
    pub scheduled_on: Option<NaiveDate>,
    pub scheduled_time: Option<String>,
}

/// DTO for updating an activity. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateActivity {
    pub title: Option<String>,
    pub objective: Option<String>,
    pub target: Option<String>,
    pub description: Option<String>,
    pub scope: Option<String>,
    pub responsible: Option<String>,
    pub resources: Option<String>,
    pub scheduled_on: Option<NaiveDate>,
    pub scheduled_time: Option<String>,
}
