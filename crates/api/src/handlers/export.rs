//! Handlers for the `/exports` endpoints.
//!
//! Row assembly is pure core logic; this layer only fetches records, picks
//! the output encoding (CSV attachment or JSON rows), and maps the
//! zero-record signal to a 400 instead of shipping an empty document.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use vigia_core::export::{
    incident_rows, work_plan_rows, IncidentExportRecord, WorkPlanExportRecord, INCIDENT_HEADERS,
    WORK_PLAN_HEADERS,
};
use vigia_core::types::DbId;
use vigia_db::models::status::{ActivityStatus, IncidentStatus};
use vigia_db::repositories::{IncidentRepo, WorkPlanRepo};

use super::resolve_company_scope;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query params for export endpoints.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub company_id: Option<DbId>,
    /// `csv` (default) or `json`.
    pub format: Option<String>,
}

/// JSON payload when `format=json` is requested.
#[derive(Debug, Serialize)]
pub struct ExportRows {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// GET /api/v1/exports/incidents
pub async fn export_incidents(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ExportQuery>,
) -> AppResult<axum::response::Response> {
    let company_id = resolve_company_scope(&user, params.company_id)?;

    let records: Vec<IncidentExportRecord> = IncidentRepo::list_for_company(&state.pool, company_id)
        .await?
        .into_iter()
        .map(|i| IncidentExportRecord {
            location: i.location,
            description: i.description,
            occurred_on: i.occurred_at.map(|t| t.date_naive()),
            status: IncidentStatus::from_id(i.status_id).map(|s| s.label().to_string()),
            observations: i.observations,
        })
        .collect();

    let rows = incident_rows(&records)?;
    render(&params, &INCIDENT_HEADERS, rows, "incidentes.csv")
}

/// GET /api/v1/exports/work-plan
pub async fn export_work_plan(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ExportQuery>,
) -> AppResult<axum::response::Response> {
    let company_id = resolve_company_scope(&user, params.company_id)?;

    let records: Vec<WorkPlanExportRecord> = WorkPlanRepo::list_for_company(&state.pool, company_id)
        .await?
        .into_iter()
        .map(|a| WorkPlanExportRecord {
            title: Some(a.title),
            objective: a.objective,
            target: a.target,
            scope: a.scope,
            responsible: a.responsible,
            resources: a.resources,
            scheduled_on: a.scheduled_on,
            scheduled_time: a.scheduled_time,
            status: ActivityStatus::from_id(a.status_id).map(|s| s.label().to_string()),
        })
        .collect();

    let rows = work_plan_rows(&records)?;
    render(&params, &WORK_PLAN_HEADERS, rows, "plan_de_trabajo.csv")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Encode assembled rows as a CSV attachment or a JSON body.
fn render(
    params: &ExportQuery,
    headers: &'static [&'static str],
    rows: Vec<Vec<String>>,
    filename: &str,
) -> AppResult<axum::response::Response> {
    match params.format.as_deref().unwrap_or("csv") {
        "json" => Ok(Json(DataResponse {
            data: ExportRows {
                headers: headers.to_vec(),
                rows,
            },
        })
        .into_response()),
        "csv" => {
            let bytes = to_csv(headers, &rows)?;
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{filename}\""),
                    ),
                ],
                bytes,
            )
                .into_response())
        }
        other => Err(AppError::BadRequest(format!(
            "Unknown format '{other}'. Expected csv or json"
        ))),
    }
}

/// Serialize headers + rows into CSV bytes.
fn to_csv(headers: &[&str], rows: &[Vec<String>]) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(headers)
        .map_err(|e| AppError::InternalError(format!("CSV encoding error: {e}")))?;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| AppError::InternalError(format!("CSV encoding error: {e}")))?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::InternalError(format!("CSV encoding error: {e}")))
}
