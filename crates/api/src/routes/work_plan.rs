//! Route definitions for the `/work-plan` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::work_plan;
use crate::state::AppState;

/// Routes mounted at `/work-plan`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(work_plan::list_activities).post(work_plan::create_activity),
        )
        .route(
            "/{id}",
            get(work_plan::get_activity)
                .put(work_plan::update_activity)
                .delete(work_plan::delete_activity),
        )
        .route("/{id}/execute", post(work_plan::execute_activity))
        .route("/{id}/evidence", post(work_plan::upload_evidence))
}
