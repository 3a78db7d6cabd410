//! Route definitions for the `/calendar` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::calendar;
use crate::state::AppState;

/// Routes mounted at `/calendar`.
pub fn router() -> Router<AppState> {
    Router::new().route("/holidays", get(calendar::holidays_in_month))
}
