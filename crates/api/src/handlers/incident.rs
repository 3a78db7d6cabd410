//! Handlers for the `/incidents` resource.
//!
//! List/detail responses carry the normalized evidence union and the latest
//! assignment scraped from the observations log, so clients never touch the
//! raw stored encodings.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use vigia_core::compensate::Tentative;
use vigia_core::error::CoreError;
use vigia_core::evidence::EvidenceRefs;
use vigia_core::observations::{self, Assignment};
use vigia_core::types::{DbId, Timestamp};
use vigia_db::models::incident::{CreateIncident, Incident, UpdateIncident};
use vigia_db::models::status::IncidentStatus;
use vigia_db::repositories::IncidentRepo;
use vigia_events::DomainEvent;

use super::{ensure_same_company, resolve_company_scope, ScopeQuery};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireOshStaff};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response / request types
// ---------------------------------------------------------------------------

/// Display-ready incident representation.
#[derive(Debug, Serialize)]
pub struct IncidentView {
    pub id: DbId,
    pub company_id: DbId,
    pub location: Option<String>,
    pub description: Option<String>,
    pub occurred_at: Option<Timestamp>,
    pub status_id: i16,
    /// Display label for the status, `"---"` for unknown ids.
    pub status: String,
    pub observations: Option<String>,
    /// Normalized evidence references.
    pub evidence: EvidenceRefs,
    /// Latest assignee / due date from the observations log.
    pub assignment: Assignment,
    pub reported_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Incident> for IncidentView {
    fn from(row: Incident) -> Self {
        let evidence = EvidenceRefs::parse(row.evidence_paths.as_deref());
        let assignment = observations::latest_assignment(row.observations.as_deref().unwrap_or(""));
        let status = IncidentStatus::from_id(row.status_id)
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| vigia_core::types::PLACEHOLDER.to_string());
        Self {
            id: row.id,
            company_id: row.company_id,
            location: row.location,
            description: row.description,
            occurred_at: row.occurred_at,
            status_id: row.status_id,
            status,
            observations: row.observations,
            evidence,
            assignment,
            reported_by: row.reported_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Request body for `POST /incidents/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    pub status_id: i16,
}

/// Request body for `POST /incidents/{id}/observations`.
#[derive(Debug, Deserialize)]
pub struct AppendObservationRequest {
    pub note: String,
    /// Name appended as the assignment marker, if provided.
    pub responsible: Option<String>,
    /// Due date (`YYYY-MM-DD`) appended as the due-date marker, if provided.
    pub due_date: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/incidents
///
/// List the company's incidents with normalized evidence and assignments.
pub async fn list_incidents(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
) -> AppResult<impl IntoResponse> {
    let company_id = resolve_company_scope(&user, scope.company_id)?;
    let rows = IncidentRepo::list_for_company(&state.pool, company_id).await?;
    let items: Vec<IncidentView> = rows.into_iter().map(IncidentView::from).collect();
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/incidents
///
/// Report a new incident. Any authenticated member may report.
pub async fn create_incident(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
    Json(input): Json<CreateIncident>,
) -> AppResult<impl IntoResponse> {
    let company_id = resolve_company_scope(&user, scope.company_id)?;

    let incident =
        IncidentRepo::create(&state.pool, company_id, Some(user.user_id), &input).await?;

    tracing::info!(incident_id = incident.id, company_id, "Incident reported");
    state.event_bus.publish(
        DomainEvent::new("incident.created")
            .with_company(company_id)
            .with_source("incident", incident.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({ "location": incident.location.clone() })),
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: IncidentView::from(incident),
        }),
    ))
}

/// GET /api/v1/incidents/{id}
pub async fn get_incident(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let incident = find_scoped_incident(&state, &user, id).await?;
    Ok(Json(DataResponse {
        data: IncidentView::from(incident),
    }))
}

/// PUT /api/v1/incidents/{id}
pub async fn update_incident(
    RequireOshStaff(user): RequireOshStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateIncident>,
) -> AppResult<impl IntoResponse> {
    find_scoped_incident(&state, &user, id).await?;

    let updated = IncidentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Incident",
                id,
            })
        })?;

    Ok(Json(DataResponse {
        data: IncidentView::from(updated),
    }))
}

/// POST /api/v1/incidents/{id}/status
///
/// Move an incident to any status; transitions are unconstrained. The
/// conventional assignee/due-date for In-Progress travels through the
/// observations endpoint, not here.
pub async fn change_status(
    RequireOshStaff(user): RequireOshStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ChangeStatusRequest>,
) -> AppResult<impl IntoResponse> {
    find_scoped_incident(&state, &user, id).await?;

    let status = IncidentStatus::from_id(input.status_id).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Unknown status_id {}",
            input.status_id
        )))
    })?;

    let updated = IncidentRepo::set_status(&state.pool, id, status.id())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Incident",
                id,
            })
        })?;

    state.event_bus.publish(
        DomainEvent::new("incident.status_changed")
            .with_company(updated.company_id)
            .with_source("incident", updated.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({ "status": status.label() })),
    );

    Ok(Json(DataResponse {
        data: IncidentView::from(updated),
    }))
}

/// POST /api/v1/incidents/{id}/observations
///
/// Append an entry to the observations log. The log is append-only; there
/// is no operation that rewrites or removes past entries.
pub async fn append_observation(
    RequireOshStaff(user): RequireOshStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AppendObservationRequest>,
) -> AppResult<impl IntoResponse> {
    let incident = find_scoped_incident(&state, &user, id).await?;

    let log = observations::append_entry(
        incident.observations.as_deref().unwrap_or(""),
        chrono::Utc::now(),
        &input.note,
        input.responsible.as_deref(),
        input.due_date.as_deref(),
    );

    let updated = IncidentRepo::set_observations(&state.pool, id, &log)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Incident",
                id,
            })
        })?;

    Ok(Json(DataResponse {
        data: IncidentView::from(updated),
    }))
}

/// POST /api/v1/incidents/{id}/evidence
///
/// Attach uploaded files as evidence. The stored value is rewritten in the
/// canonical JSON-array form regardless of what older rows contain.
pub async fn upload_evidence(
    RequireOshStaff(user): RequireOshStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let incident = find_scoped_incident(&state, &user, id).await?;

    let mut refs = EvidenceRefs::parse(incident.evidence_paths.as_deref());
    let mut uploaded = 0usize;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let filename = sanitize_filename(field.file_name().unwrap_or("adjunto"));
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

        let key = format!("incidents/{id}/{}-{filename}", uuid::Uuid::new_v4());
        state
            .evidence_store
            .put(&key, &bytes)
            .await
            .map_err(|e| AppError::InternalError(format!("Evidence store error: {e}")))?;

        refs = refs.push(key);
        uploaded += 1;
    }

    if uploaded == 0 {
        return Err(AppError::BadRequest("No files in upload".into()));
    }

    let updated = IncidentRepo::set_evidence(&state.pool, id, refs.to_stored().as_deref())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Incident",
                id,
            })
        })?;

    tracing::info!(incident_id = id, uploaded, "Evidence attached");

    Ok(Json(DataResponse {
        data: IncidentView::from(updated),
    }))
}

/// DELETE /api/v1/incidents/{id}
///
/// Optimistic delete: the row is soft-deleted first (visible effect), then
/// stored evidence is purged. If the purge fails the row is restored and
/// the error surfaces to the caller.
pub async fn delete_incident(
    RequireOshStaff(user): RequireOshStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let incident = find_scoped_incident(&state, &user, id).await?;
    let evidence = EvidenceRefs::parse(incident.evidence_paths.as_deref());

    if !IncidentRepo::soft_delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Incident",
            id,
        }));
    }
    let tentative = Tentative::applied("incident.delete", id);

    for path in evidence.paths() {
        if let Err(e) = state.evidence_store.delete(path).await {
            let (outcome, incident_id) = tentative.compensate();
            IncidentRepo::restore(&state.pool, incident_id).await?;
            tracing::warn!(
                incident_id,
                outcome = outcome.label(),
                error = %e,
                "Evidence purge failed, incident restored"
            );
            return Err(AppError::InternalError(format!(
                "Evidence purge failed: {e}"
            )));
        }
    }

    let outcome = tentative.confirm();
    tracing::info!(incident_id = id, outcome = outcome.label(), "Incident deleted");

    state.event_bus.publish(
        DomainEvent::new("incident.deleted")
            .with_company(incident.company_id)
            .with_source("incident", id)
            .with_actor(user.user_id),
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load an incident and verify the caller's tenant scope.
async fn find_scoped_incident(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<Incident> {
    let incident = IncidentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Incident",
                id,
            })
        })?;
    ensure_same_company(user, incident.company_id)?;
    Ok(incident)
}

/// Keep filenames storage-safe: alphanumerics, dot, dash, underscore.
pub(crate) fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "adjunto".to_string()
    } else {
        cleaned
    }
}
