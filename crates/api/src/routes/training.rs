//! Route definitions for the `/trainings` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::training;
use crate::state::AppState;

/// Routes mounted at `/trainings`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(training::list_trainings).post(training::create_training),
        )
        .route(
            "/{id}",
            put(training::update_training).delete(training::delete_training),
        )
        .route("/{id}/complete", post(training::complete_training))
}
