//! User / membership entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vigia_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    /// Tenant scope. `None` only for super_admin accounts.
    pub company_id: Option<DbId>,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub job_title: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub company_id: Option<DbId>,
    pub full_name: String,
    pub email: String,
    /// Resolved role name (e.g. `"osh_responsible"`).
    pub role: String,
    pub role_id: DbId,
    pub job_title: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl UserResponse {
    /// Build the safe representation from a full row and its role name.
    pub fn from_user(user: User, role: String) -> Self {
        Self {
            id: user.id,
            company_id: user.company_id,
            full_name: user.full_name,
            email: user.email,
            role,
            role_id: user.role_id,
            job_title: user.job_title,
            is_active: user.is_active,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub company_id: Option<DbId>,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub job_title: Option<String>,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<DbId>,
    pub job_title: Option<String>,
    pub is_active: Option<bool>,
}
