//! Training session model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vigia_core::types::{DbId, Timestamp};

/// A row from the `training_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainingSession {
    pub id: DbId,
    pub company_id: DbId,
    pub topic: String,
    pub trainer: Option<String>,
    pub scheduled_on: Option<NaiveDate>,
    pub duration_hours: Option<i32>,
    pub attendee_count: Option<i32>,
    pub status_id: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for scheduling a training session.
#[derive(Debug, Deserialize)]
pub struct CreateTraining {
    pub topic: String,
    pub trainer: Option<String>,
    pub scheduled_on: Option<NaiveDate>,
    pub duration_hours: Option<i32>,
}

/// DTO for updating a training session. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateTraining {
    pub topic: Option<String>,
    pub trainer: Option<String>,
    pub scheduled_on: Option<NaiveDate>,
    pub duration_hours: Option<i32>,
    pub attendee_count: Option<i32>,
}
