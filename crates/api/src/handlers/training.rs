//! Handlers for the `/trainings` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use vigia_core::error::CoreError;
use vigia_core::types::DbId;
use vigia_db::models::training::{CreateTraining, TrainingSession, UpdateTraining};
use vigia_db::repositories::TrainingRepo;

use super::{ensure_same_company, resolve_company_scope, ScopeQuery};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireOshStaff};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /trainings/{id}/complete`.
#[derive(Debug, Deserialize)]
pub struct CompleteTrainingRequest {
    pub attendee_count: Option<i32>,
}

/// GET /api/v1/trainings
pub async fn list_trainings(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
) -> AppResult<impl IntoResponse> {
    let company_id = resolve_company_scope(&user, scope.company_id)?;
    let sessions = TrainingRepo::list_for_company(&state.pool, company_id).await?;
    Ok(Json(DataResponse { data: sessions }))
}

/// POST /api/v1/trainings
pub async fn create_training(
    RequireOshStaff(user): RequireOshStaff,
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
    Json(input): Json<CreateTraining>,
) -> AppResult<impl IntoResponse> {
    let company_id = resolve_company_scope(&user, scope.company_id)?;

    if input.topic.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Training topic must not be empty".into(),
        )));
    }

    let session = TrainingRepo::create(&state.pool, company_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// PUT /api/v1/trainings/{id}
pub async fn update_training(
    RequireOshStaff(user): RequireOshStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTraining>,
) -> AppResult<impl IntoResponse> {
    find_scoped_training(&state, &user, id).await?;

    let updated = TrainingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "TrainingSession",
                id,
            })
        })?;

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/trainings/{id}/complete
pub async fn complete_training(
    RequireOshStaff(user): RequireOshStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CompleteTrainingRequest>,
) -> AppResult<impl IntoResponse> {
    find_scoped_training(&state, &user, id).await?;

    let updated = TrainingRepo::complete(&state.pool, id, input.attendee_count)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "TrainingSession",
                id,
            })
        })?;

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/trainings/{id}
pub async fn delete_training(
    RequireOshStaff(user): RequireOshStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_scoped_training(&state, &user, id).await?;
    TrainingRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Load a training session and verify the caller's tenant scope.
async fn find_scoped_training(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<TrainingSession> {
    let session = TrainingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "TrainingSession",
                id,
            })
        })?;
    ensure_same_company(user, session.company_id)?;
    Ok(session)
}
