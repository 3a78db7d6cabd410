//! Route definitions for the `/exports` endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::export;
use crate::state::AppState;

/// Routes mounted at `/exports`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/incidents", get(export::export_incidents))
        .route("/work-plan", get(export::export_work_plan))
}
