pub mod auth;
pub mod calendar;
pub mod company;
pub mod dashboard;
pub mod export;
pub mod hazard;
pub mod health;
pub mod incident;
pub mod notification;
pub mod training;
pub mod user;
pub mod work_plan;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                  WebSocket change feed (token query param)
///
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
///
/// /companies                           list, create (super_admin)
/// /companies/{id}                      get, update, deactivate
///
/// /users                               list, create (company_admin+)
/// /users/{id}                          get, update, deactivate, reset-password
///
/// /incidents                           list, create
/// /incidents/{id}                      get, update, delete
/// /incidents/{id}/status               change status (POST)
/// /incidents/{id}/observations         append log entry (POST)
/// /incidents/{id}/evidence             multipart upload (POST)
///
/// /work-plan                           list, create
/// /work-plan/{id}                      get, update, delete
/// /work-plan/{id}/execute              Planned -> Executed (POST)
/// /work-plan/{id}/evidence             multipart upload (POST)
///
/// /hazards                             list, create
/// /hazards/{id}                        update, delete
///
/// /trainings                           list, create
/// /trainings/{id}                      update, delete
/// /trainings/{id}/complete             mark completed (POST)
///
/// /dashboard/widgets/incidents-by-month   12 month buckets
/// /dashboard/widgets/status-summary       per-status counts
/// /calendar/holidays                      holiday days for (year, month)
///
/// /exports/incidents                   CSV or JSON rows
/// /exports/work-plan                   CSV or JSON rows
///
/// /notifications                       list
/// /notifications/read-all              mark all read (POST)
/// /notifications/unread-count          unread counter
/// /notifications/{id}/read             mark one read (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/auth", auth::router())
        .nest("/companies", company::router())
        .nest("/users", user::router())
        .nest("/incidents", incident::router())
        .nest("/work-plan", work_plan::router())
        .nest("/hazards", hazard::router())
        .nest("/trainings", training::router())
        .nest("/dashboard", dashboard::router())
        .nest("/calendar", calendar::router())
        .nest("/exports", export::router())
        .nest("/notifications", notification::router())
}
