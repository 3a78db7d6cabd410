//! Handlers for the dashboard summary widgets.
//!
//! Aggregations run over already-fetched in-memory data via `vigia_core`;
//! the queries only project the columns each widget needs.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use vigia_core::month_summary::{monthly_counts, MonthCount};
use vigia_db::models::status::{ActivityStatus, IncidentStatus};
use vigia_db::repositories::{IncidentRepo, WorkPlanRepo};

use super::{resolve_company_scope, ScopeQuery};
use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Incident counts per status plus work-plan progress.
#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub incidents_open: i64,
    pub incidents_in_progress: i64,
    pub incidents_closed: i64,
    pub activities_planned: i64,
    pub activities_executed: i64,
}

/// GET /api/v1/dashboard/widgets/incidents-by-month
///
/// Twelve calendar-month buckets of incident occurrence dates. All years
/// merge into the same month bucket; incidents without a date are skipped.
pub async fn incidents_by_month(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
) -> AppResult<impl IntoResponse> {
    let company_id = resolve_company_scope(&user, scope.company_id)?;

    let dates = IncidentRepo::occurrence_dates(&state.pool, company_id).await?;
    let counts: Vec<MonthCount> =
        monthly_counts(dates.into_iter().map(|ts| ts.map(|t| t.date_naive())));

    Ok(Json(DataResponse { data: counts }))
}

/// GET /api/v1/dashboard/widgets/status-summary
pub async fn status_summary(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
) -> AppResult<impl IntoResponse> {
    let company_id = resolve_company_scope(&user, scope.company_id)?;

    let incident_counts = IncidentRepo::status_counts(&state.pool, company_id).await?;
    let count_for = |status: IncidentStatus| {
        incident_counts
            .iter()
            .find(|c| c.status_id == status.id())
            .map(|c| c.count)
            .unwrap_or(0)
    };

    let summary = StatusSummary {
        incidents_open: count_for(IncidentStatus::Open),
        incidents_in_progress: count_for(IncidentStatus::InProgress),
        incidents_closed: count_for(IncidentStatus::Closed),
        activities_planned: WorkPlanRepo::count_by_status(
            &state.pool,
            company_id,
            ActivityStatus::Planned.id(),
        )
        .await?,
        activities_executed: WorkPlanRepo::count_by_status(
            &state.pool,
            company_id,
            ActivityStatus::Executed.id(),
        )
        .await?,
    };

    Ok(Json(DataResponse { data: summary }))
}
