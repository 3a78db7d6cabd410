//! Route definitions for the `/incidents` resource.
//!
//! Reading and reporting are open to any authenticated member; mutations
//! require OSH staff.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::incident;
use crate::state::AppState;

/// Routes mounted at `/incidents`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(incident::list_incidents).post(incident::create_incident),
        )
        .route(
            "/{id}",
            get(incident::get_incident)
                .put(incident::update_incident)
                .delete(incident::delete_incident),
        )
        .route("/{id}/status", post(incident::change_status))
        .route("/{id}/observations", post(incident::append_observation))
        .route("/{id}/evidence", post(incident::upload_evidence))
}
