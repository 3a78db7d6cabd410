//! Route definitions for the `/companies` resource.
//!
//! Creation and mutation are super_admin only; members may read their own
//! company.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::company;
use crate::state::AppState;

/// Routes mounted at `/companies`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(company::list_companies).post(company::create_company),
        )
        .route(
            "/{id}",
            get(company::get_company).put(company::update_company),
        )
        .route("/{id}/deactivate", post(company::deactivate_company))
}
