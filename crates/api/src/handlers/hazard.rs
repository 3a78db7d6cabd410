//! Handlers for the `/hazards` resource (hazard matrix).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vigia_core::error::CoreError;
use vigia_core::risk;
use vigia_core::types::DbId;
use vigia_db::models::hazard::{CreateHazardEntry, HazardEntry, UpdateHazardEntry};
use vigia_db::repositories::HazardRepo;

use super::{ensure_same_company, resolve_company_scope, ScopeQuery};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireOshStaff};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/hazards
///
/// List the company's hazard matrix, highest risk first.
pub async fn list_hazards(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
) -> AppResult<impl IntoResponse> {
    let company_id = resolve_company_scope(&user, scope.company_id)?;
    let entries = HazardRepo::list_for_company(&state.pool, company_id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/hazards
///
/// Create a hazard entry. Risk score and level are derived server-side.
pub async fn create_hazard(
    RequireOshStaff(user): RequireOshStaff,
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
    Json(input): Json<CreateHazardEntry>,
) -> AppResult<impl IntoResponse> {
    let company_id = resolve_company_scope(&user, scope.company_id)?;

    let score = risk::risk_score(input.probability, input.severity)?;
    let level = risk::classify(score);

    let entry = HazardRepo::create(
        &state.pool,
        company_id,
        &input.process_area,
        &input.hazard_description,
        input.probability,
        input.severity,
        score,
        level.label(),
        input.control_measures.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// PUT /api/v1/hazards/{id}
///
/// Update an entry; risk is recomputed from the merged values.
pub async fn update_hazard(
    RequireOshStaff(user): RequireOshStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateHazardEntry>,
) -> AppResult<impl IntoResponse> {
    let existing = find_scoped_hazard(&state, &user, id).await?;

    let probability = input.probability.unwrap_or(existing.probability);
    let severity = input.severity.unwrap_or(existing.severity);
    let score = risk::risk_score(probability, severity)?;
    let level = risk::classify(score);

    let process_area = input.process_area.unwrap_or(existing.process_area);
    let hazard_description = input
        .hazard_description
        .unwrap_or(existing.hazard_description);
    let control_measures = input.control_measures.or(existing.control_measures);

    let updated = HazardRepo::update(
        &state.pool,
        id,
        &process_area,
        &hazard_description,
        probability,
        severity,
        score,
        level.label(),
        control_measures.as_deref(),
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "HazardEntry",
            id,
        })
    })?;

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/hazards/{id}
pub async fn delete_hazard(
    RequireOshStaff(user): RequireOshStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_scoped_hazard(&state, &user, id).await?;
    HazardRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Load a hazard entry and verify the caller's tenant scope.
async fn find_scoped_hazard(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<HazardEntry> {
    let entry = HazardRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "HazardEntry",
                id,
            })
        })?;
    ensure_same_company(user, entry.company_id)?;
    Ok(entry)
}
