//! Handlers for the `/users` resource (company membership management).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;
use vigia_core::error::CoreError;
use vigia_core::plans;
use vigia_core::types::DbId;
use vigia_db::models::user::{CreateUser, UpdateUser, UserResponse};
use vigia_db::repositories::{CompanyRepo, RoleRepo, UserRepo};

use super::{resolve_company_scope, ScopeQuery};
use crate::auth::password::{generate_temp_password, hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireCompanyAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Minimum accepted password length for new memberships.
const MIN_PASSWORD_LEN: usize = 10;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    /// Role name, e.g. `"osh_responsible"`. Never `super_admin` here.
    pub role: String,
    pub job_title: Option<String>,
}

/// Response for `POST /users/{id}/reset-password`.
#[derive(Debug, Serialize)]
pub struct ResetPasswordResponse {
    /// One-time plaintext; shown once, only the hash is stored.
    pub temporary_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/users
///
/// List the company's memberships. Company admin or super admin.
pub async fn list_users(
    RequireCompanyAdmin(user): RequireCompanyAdmin,
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
) -> AppResult<impl IntoResponse> {
    let company_id = resolve_company_scope(&user, scope.company_id)?;

    let users = UserRepo::list_for_company(&state.pool, company_id).await?;

    let mut items = Vec::with_capacity(users.len());
    for u in users {
        let role = RoleRepo::resolve_name(&state.pool, u.role_id).await?;
        items.push(UserResponse::from_user(u, role));
    }

    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/users
///
/// Create a membership in the company, subject to the plan's active-user
/// limit. Company admin or super admin.
pub async fn create_user(
    RequireCompanyAdmin(user): RequireCompanyAdmin,
    State(state): State<AppState>,
    Query(scope): Query<ScopeQuery>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    let company_id = resolve_company_scope(&user, scope.company_id)?;

    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_password_strength(&input.password, MIN_PASSWORD_LEN)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // Memberships never escalate to platform operator.
    if input.role == vigia_core::roles::ROLE_SUPER_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot create super_admin memberships".into(),
        )));
    }

    let role = RoleRepo::find_by_name(&state.pool, &input.role)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Unknown role '{}'",
                input.role
            )))
        })?;

    // Enforce the subscription plan's active-member limit.
    let company = CompanyRepo::find_by_id(&state.pool, company_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Company",
                id: company_id,
            })
        })?;
    let active = UserRepo::count_active_for_company(&state.pool, company_id).await?;
    if !plans::can_add_user(&company.plan, active) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Active user limit reached for the {} plan",
            company.plan
        ))));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let created = UserRepo::create(
        &state.pool,
        &CreateUser {
            company_id: Some(company_id),
            full_name: input.full_name,
            email: input.email,
            password_hash,
            role_id: role.id,
            job_title: input.job_title,
        },
    )
    .await?;

    tracing::info!(user_id = created.id, company_id, "Membership created");

    let response = UserResponse::from_user(created, role.name);
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    RequireCompanyAdmin(user): RequireCompanyAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let target = find_scoped_user(&state, &user, id).await?;
    let role = RoleRepo::resolve_name(&state.pool, target.role_id).await?;
    Ok(Json(DataResponse {
        data: UserResponse::from_user(target, role),
    }))
}

/// PUT /api/v1/users/{id}
pub async fn update_user(
    RequireCompanyAdmin(user): RequireCompanyAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    find_scoped_user(&state, &user, id).await?;

    let updated = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let role = RoleRepo::resolve_name(&state.pool, updated.role_id).await?;
    Ok(Json(DataResponse {
        data: UserResponse::from_user(updated, role),
    }))
}

/// POST /api/v1/users/{id}/deactivate
pub async fn deactivate_user(
    RequireCompanyAdmin(user): RequireCompanyAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_scoped_user(&state, &user, id).await?;
    UserRepo::set_active(&state.pool, id, false).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/users/{id}/reset-password
///
/// Issue a temporary password; the plaintext is returned exactly once.
pub async fn reset_password(
    RequireCompanyAdmin(user): RequireCompanyAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_scoped_user(&state, &user, id).await?;

    let temporary_password = generate_temp_password();
    let hash = hash_password(&temporary_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::set_password_hash(&state.pool, id, &hash).await?;

    tracing::info!(user_id = id, "Password reset by admin");

    Ok(Json(DataResponse {
        data: ResetPasswordResponse { temporary_password },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a user and verify the caller may administer it.
async fn find_scoped_user(
    state: &AppState,
    caller: &crate::middleware::auth::AuthUser,
    id: DbId,
) -> AppResult<vigia_db::models::user::User> {
    let target = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    if let Some(own) = caller.company_id {
        if target.company_id != Some(own) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Cannot access another company's data".into(),
            )));
        }
    }
    Ok(target)
}
