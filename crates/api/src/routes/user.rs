//! Route definitions for the `/users` resource (memberships).
//!
//! All endpoints require the company_admin role (or super_admin).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list_users).post(user::create_user))
        .route("/{id}", get(user::get_user).put(user::update_user))
        .route("/{id}/deactivate", post(user::deactivate_user))
        .route("/{id}/reset-password", post(user::reset_password))
}
