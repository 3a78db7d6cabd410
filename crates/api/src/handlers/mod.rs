//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the corresponding repository in `vigia_db`, map
//! errors via [`AppError`](crate::error::AppError), publish domain events,
//! and wrap payloads in [`DataResponse`](crate::response::DataResponse).

pub mod auth;
pub mod calendar;
pub mod company;
pub mod dashboard;
pub mod export;
pub mod hazard;
pub mod incident;
pub mod notification;
pub mod training;
pub mod user;
pub mod work_plan;

use serde::Deserialize;
use vigia_core::error::CoreError;
use vigia_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// Optional tenant override accepted on list/summary endpoints.
///
/// Ignored for company-scoped users (their token decides); required for
/// super_admin, who has no company of their own.
#[derive(Debug, Deserialize)]
pub struct ScopeQuery {
    pub company_id: Option<DbId>,
}

/// Resolve the tenant a request operates on.
///
/// Company-scoped users always act within their own company; an explicit
/// mismatching `company_id` is rejected rather than silently ignored.
/// Super admins must name the tenant explicitly.
pub fn resolve_company_scope(user: &AuthUser, requested: Option<DbId>) -> AppResult<DbId> {
    match user.company_id {
        Some(own) => match requested {
            Some(other) if other != own => Err(AppError::Core(CoreError::Forbidden(
                "Cannot access another company's data".into(),
            ))),
            _ => Ok(own),
        },
        None => requested.ok_or_else(|| {
            AppError::BadRequest("company_id query parameter is required for super_admin".into())
        }),
    }
}

/// Ensure a tenant-owned record belongs to the caller's resolved company.
pub fn ensure_same_company(user: &AuthUser, record_company_id: DbId) -> AppResult<()> {
    match user.company_id {
        Some(own) if own != record_company_id => Err(AppError::Core(CoreError::Forbidden(
            "Cannot access another company's data".into(),
        ))),
        _ => Ok(()),
    }
}
