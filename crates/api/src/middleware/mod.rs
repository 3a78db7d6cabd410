//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireSuperAdmin`] -- Requires the `super_admin` role.
//! - [`rbac::RequireCompanyAdmin`] -- Requires `company_admin` or `super_admin`.
//! - [`rbac::RequireOshStaff`] -- Requires any OSH-managing role.
//! - [`rbac::RequireAuth`] -- Requires any authenticated user.

pub mod auth;
pub mod rbac;
