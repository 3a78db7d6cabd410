//! Well-known role name constants.
//!
//! These must match the seed data in `20260410000002_create_roles_table.sql`.

pub const ROLE_SUPER_ADMIN: &str = "super_admin";
pub const ROLE_COMPANY_ADMIN: &str = "company_admin";
pub const ROLE_OSH_RESPONSIBLE: &str = "osh_responsible";
pub const ROLE_WORKER: &str = "worker";

/// Returns `true` for roles allowed to administer company memberships.
pub fn is_company_admin(role: &str) -> bool {
    role == ROLE_SUPER_ADMIN || role == ROLE_COMPANY_ADMIN
}

/// Returns `true` for roles allowed to manage OSH records
/// (incidents, work plan, hazard matrix, trainings).
pub fn is_osh_staff(role: &str) -> bool {
    role == ROLE_SUPER_ADMIN || role == ROLE_COMPANY_ADMIN || role == ROLE_OSH_RESPONSIBLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn super_admin_is_osh_staff_and_company_admin() {
        assert!(is_company_admin(ROLE_SUPER_ADMIN));
        assert!(is_osh_staff(ROLE_SUPER_ADMIN));
    }

    #[test]
    fn osh_responsible_is_staff_but_not_admin() {
        assert!(is_osh_staff(ROLE_OSH_RESPONSIBLE));
        assert!(!is_company_admin(ROLE_OSH_RESPONSIBLE));
    }

    #[test]
    fn worker_has_no_elevated_access() {
        assert!(!is_osh_staff(ROLE_WORKER));
        assert!(!is_company_admin(ROLE_WORKER));
    }

    #[test]
    fn unknown_role_has_no_access() {
        assert!(!is_osh_staff("auditor"));
        assert!(!is_company_admin(""));
    }
}
