//! Handlers for the `/work-plan` resource.
//!
//! Activities are created Planned and move to Executed only when both
//! evidence files (attendance sheet + at least one photo) are attached.
//! That rule is enforced here, server-side, on the execute transition.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use vigia_core::compensate::Tentative;
use vigia_core::error::CoreError;
use vigia_core::evidence::EvidenceRefs;
use vigia_core::types::DbId;
use vigia_db::models::status::ActivityStatus;
use vigia_db::models::work_plan::{CreateActivity, UpdateActivity, WorkPlanActivity};
use vigia_db::repositories::WorkPlanRepo;
use vigia_events::DomainEvent;

use super::{ensure_same_company, resolve_company_scope, ScopeQuery};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireOshStaff};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Display-ready activity representation with normalized photo refs.
#[derive(Debug, Serialize)]
pub struct ActivityView {
    #[serde(flatten)]
    pub row: WorkPlanActivity,
    /// Display label for the status.
    pub status: String,
    /// Normalized photo references.
    pub photos: EvidenceRefs,
}

impl From<WorkPlanActivity> for ActivityView {
    fn from(row: WorkPlanActivity) -> Self {
        let photos = EvidenceRefs::parse(row.photo_paths.as_deref());
        let status = ActivityStatus::from_id(row.status_id)
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| vigia_core::types::PLACEHOLDER.to_string());
        Self { row, status, photos }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/work-plan
pub async fn list_activities(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
) -> AppResult<impl IntoResponse> {
    let company_id = resolve_company_scope(&user, scope.company_id)?;
    let rows = WorkPlanRepo::list_for_company(&state.pool, company_id).await?;
    let items: Vec<ActivityView> = rows.into_iter().map(ActivityView::from).collect();
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/work-plan
pub async fn create_activity(
    RequireOshStaff(user): RequireOshStaff,
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
    Json(input): Json<CreateActivity>,
) -> AppResult<impl IntoResponse> {
    let company_id = resolve_company_scope(&user, scope.company_id)?;

    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Activity title must not be empty".into(),
        )));
    }

    let activity = WorkPlanRepo::create(&state.pool, company_id, &input).await?;

    state.event_bus.publish(
        DomainEvent::new("work_plan.created")
            .with_company(company_id)
            .with_source("activity", activity.id)
            .with_actor(user.user_id),
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ActivityView::from(activity),
        }),
    ))
}

/// GET /api/v1/work-plan/{id}
pub async fn get_activity(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let activity = find_scoped_activity(&state, &user, id).await?;
    Ok(Json(DataResponse {
        data: ActivityView::from(activity),
    }))
}

/// PUT /api/v1/work-plan/{id}
pub async fn update_activity(
    RequireOshStaff(user): RequireOshStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateActivity>,
) -> AppResult<impl IntoResponse> {
    find_scoped_activity(&state, &user, id).await?;

    let updated = WorkPlanRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Activity",
                id,
            })
        })?;

    Ok(Json(DataResponse {
        data: ActivityView::from(updated),
    }))
}

/// POST /api/v1/work-plan/{id}/evidence
///
/// Multipart upload. The `attendance_sheet` field replaces the attendance
/// sheet; every `photos` field appends to the photo set.
pub async fn upload_evidence(
    RequireOshStaff(user): RequireOshStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let activity = find_scoped_activity(&state, &user, id).await?;

    let mut photos = EvidenceRefs::parse(activity.photo_paths.as_deref());
    let mut attendance: Option<String> = None;
    let mut uploaded = 0usize;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        let filename = super::incident::sanitize_filename(field.file_name().unwrap_or("adjunto"));
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

        let key = format!("work-plan/{id}/{}-{filename}", uuid::Uuid::new_v4());
        state
            .evidence_store
            .put(&key, &bytes)
            .await
            .map_err(|e| AppError::InternalError(format!("Evidence store error: {e}")))?;

        match field_name.as_str() {
            "attendance_sheet" => attendance = Some(key),
            "photos" => photos = photos.push(key),
            other => {
                return Err(AppError::BadRequest(format!(
                    "Unknown evidence field '{other}'. Expected attendance_sheet or photos"
                )));
            }
        }
        uploaded += 1;
    }

    if uploaded == 0 {
        return Err(AppError::BadRequest("No files in upload".into()));
    }

    if let Some(path) = &attendance {
        WorkPlanRepo::set_attendance_sheet(&state.pool, id, path).await?;
    }
    let updated = WorkPlanRepo::set_photo_paths(&state.pool, id, photos.to_stored().as_deref())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Activity",
                id,
            })
        })?;

    tracing::info!(activity_id = id, uploaded, "Activity evidence attached");

    Ok(Json(DataResponse {
        data: ActivityView::from(updated),
    }))
}

/// POST /api/v1/work-plan/{id}/execute
///
/// Transition Planned -> Executed. Rejected with 400 unless both the
/// attendance sheet and at least one photo are already attached.
pub async fn execute_activity(
    RequireOshStaff(user): RequireOshStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let activity = find_scoped_activity(&state, &user, id).await?;

    if activity.status_id == ActivityStatus::Executed.id() {
        return Err(AppError::Core(CoreError::Conflict(
            "Activity is already executed".into(),
        )));
    }

    let has_photos = !matches!(
        EvidenceRefs::parse(activity.photo_paths.as_deref()),
        EvidenceRefs::None
    );
    if activity.attendance_sheet_path.is_none() || !has_photos {
        return Err(AppError::Core(CoreError::Validation(
            "Executing an activity requires an attendance sheet and at least one photo".into(),
        )));
    }

    let updated = WorkPlanRepo::set_status(&state.pool, id, ActivityStatus::Executed.id())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Activity",
                id,
            })
        })?;

    state.event_bus.publish(
        DomainEvent::new("work_plan.executed")
            .with_company(updated.company_id)
            .with_source("activity", updated.id)
            .with_actor(user.user_id),
    );

    Ok(Json(DataResponse {
        data: ActivityView::from(updated),
    }))
}

/// DELETE /api/v1/work-plan/{id}
///
/// Same optimistic pattern as incident deletion: soft-delete first, purge
/// evidence, restore on purge failure.
pub async fn delete_activity(
    RequireOshStaff(user): RequireOshStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let activity = find_scoped_activity(&state, &user, id).await?;

    let mut paths: Vec<String> = EvidenceRefs::parse(activity.photo_paths.as_deref())
        .paths()
        .into_iter()
        .map(str::to_string)
        .collect();
    if let Some(sheet) = &activity.attendance_sheet_path {
        paths.push(sheet.clone());
    }

    if !WorkPlanRepo::soft_delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Activity",
            id,
        }));
    }
    let tentative = Tentative::applied("activity.delete", id);

    for path in &paths {
        if let Err(e) = state.evidence_store.delete(path).await {
            let (outcome, activity_id) = tentative.compensate();
            WorkPlanRepo::restore(&state.pool, activity_id).await?;
            tracing::warn!(
                activity_id,
                outcome = outcome.label(),
                error = %e,
                "Evidence purge failed, activity restored"
            );
            return Err(AppError::InternalError(format!(
                "Evidence purge failed: {e}"
            )));
        }
    }

    let outcome = tentative.confirm();
    tracing::info!(activity_id = id, outcome = outcome.label(), "Activity deleted");

    state.event_bus.publish(
        DomainEvent::new("work_plan.deleted")
            .with_company(activity.company_id)
            .with_source("activity", id)
            .with_actor(user.user_id),
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load an activity and verify the caller's tenant scope.
async fn find_scoped_activity(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<WorkPlanActivity> {
    let activity = WorkPlanRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Activity",
                id,
            })
        })?;
    ensure_same_company(user, activity.company_id)?;
    Ok(activity)
}
