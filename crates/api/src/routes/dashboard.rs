//! Route definitions for the dashboard widgets.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/widgets/incidents-by-month",
            get(dashboard::incidents_by_month),
        )
        .route("/widgets/status-summary", get(dashboard::status_summary))
}
