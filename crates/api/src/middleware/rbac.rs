//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the minimum requirement. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vigia_core::error::CoreError;
use vigia_core::roles::{is_company_admin, is_osh_staff, ROLE_SUPER_ADMIN};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `super_admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn platform_only(RequireSuperAdmin(user): RequireSuperAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be a super_admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireSuperAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireSuperAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_SUPER_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Super admin role required".into(),
            )));
        }
        Ok(RequireSuperAdmin(user))
    }
}

/// Requires `company_admin` or `super_admin`. Rejects with 403 otherwise.
pub struct RequireCompanyAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireCompanyAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_company_admin(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Company admin role required".into(),
            )));
        }
        Ok(RequireCompanyAdmin(user))
    }
}

/// Requires an OSH-managing role (`osh_responsible`, `company_admin`, or
/// `super_admin`). Rejects with 403 Forbidden otherwise.
pub struct RequireOshStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireOshStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_osh_staff(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "OSH staff role required".into(),
            )));
        }
        Ok(RequireOshStaff(user))
    }
}

/// Requires any authenticated user (any valid role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for use in
/// route definitions where the intent "this route requires authentication"
/// should be self-documenting.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
