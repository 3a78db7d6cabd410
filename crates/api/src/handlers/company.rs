//! Handlers for the `/companies` resource (super_admin tenancy management).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vigia_core::error::CoreError;
use vigia_core::plans;
use vigia_core::types::DbId;
use vigia_db::models::company::{CreateCompany, UpdateCompany};
use vigia_db::repositories::CompanyRepo;
use vigia_events::DomainEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireSuperAdmin};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/companies
///
/// List all tenant companies. Super admin only.
pub async fn list_companies(
    RequireSuperAdmin(_user): RequireSuperAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let companies = CompanyRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: companies }))
}

/// POST /api/v1/companies
///
/// Create a tenant company. Super admin only.
pub async fn create_company(
    RequireSuperAdmin(user): RequireSuperAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCompany>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Company name must not be empty".into(),
        )));
    }
    if let Some(plan) = &input.plan {
        plans::validate_plan(plan)?;
    }

    let company = CompanyRepo::create(&state.pool, &input).await?;

    tracing::info!(company_id = company.id, name = %company.name, "Company created");
    state.event_bus.publish(
        DomainEvent::new("company.created")
            .with_company(company.id)
            .with_source("company", company.id)
            .with_actor(user.user_id),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: company })))
}

/// GET /api/v1/companies/{id}
///
/// Fetch one company. Super admin, or any member of that company.
pub async fn get_company(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_own_or_super(&user, id)?;

    let company = CompanyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Company",
                id,
            })
        })?;

    Ok(Json(DataResponse { data: company }))
}

/// PUT /api/v1/companies/{id}
///
/// Update a company. Super admin only.
pub async fn update_company(
    RequireSuperAdmin(_user): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCompany>,
) -> AppResult<impl IntoResponse> {
    if let Some(plan) = &input.plan {
        plans::validate_plan(plan)?;
    }

    let company = CompanyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Company",
                id,
            })
        })?;

    Ok(Json(DataResponse { data: company }))
}

/// POST /api/v1/companies/{id}/deactivate
///
/// Mark a company inactive. Its data stays; logins keep working but the
/// tenant is flagged for the UI. Super admin only.
pub async fn deactivate_company(
    RequireSuperAdmin(_user): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let updated = CompanyRepo::set_active(&state.pool, id, false).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Company",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Allow super admins through; members may only read their own company.
fn ensure_own_or_super(user: &AuthUser, company_id: DbId) -> AppResult<()> {
    match user.company_id {
        None => Ok(()), // super_admin
        Some(own) if own == company_id => Ok(()),
        Some(_) => Err(AppError::Core(CoreError::Forbidden(
            "Cannot access another company's data".into(),
        ))),
    }
}
