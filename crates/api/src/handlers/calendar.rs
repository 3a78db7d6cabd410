//! Handler for the `/calendar/holidays` endpoint.

use axum::extract::Query;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use vigia_core::holidays;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;

/// Supported year range for holiday computation.
const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

/// Query params for `GET /calendar/holidays`.
#[derive(Debug, Deserialize)]
pub struct HolidaysQuery {
    pub year: i32,
    /// Zero-based month index (0 = January), matching the calendar widget.
    pub month: u32,
}

/// GET /api/v1/calendar/holidays?year=2024&month=0
///
/// Day-of-month numbers that are Colombian public holidays in the month.
pub async fn holidays_in_month(
    RequireAuth(_user): RequireAuth,
    Query(params): Query<HolidaysQuery>,
) -> AppResult<impl IntoResponse> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&params.year) {
        return Err(AppError::BadRequest(format!(
            "year must be between {MIN_YEAR} and {MAX_YEAR}"
        )));
    }
    if params.month > 11 {
        return Err(AppError::BadRequest(
            "month must be a zero-based index between 0 and 11".into(),
        ));
    }

    let days = holidays::holidays_in_month(params.year, params.month);
    Ok(Json(DataResponse { data: days }))
}
