//! Route definitions for the `/hazards` resource (hazard matrix).

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::hazard;
use crate::state::AppState;

/// Routes mounted at `/hazards`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(hazard::list_hazards).post(hazard::create_hazard))
        .route(
            "/{id}",
            put(hazard::update_hazard).delete(hazard::delete_hazard),
        )
}
