//! Subscription plan constants, validation, and per-plan limits.
//!
//! Plan names must match the seed data in
//! `20260410000001_create_companies_table.sql`.

use crate::error::CoreError;

/// Basic plan identifier.
pub const PLAN_BASIC: &str = "basic";

/// Standard plan identifier.
pub const PLAN_STANDARD: &str = "standard";

/// Premium plan identifier.
pub const PLAN_PREMIUM: &str = "premium";

/// Valid plan values.
const VALID_PLANS: &[&str] = &[PLAN_BASIC, PLAN_STANDARD, PLAN_PREMIUM];

/// Validate that `plan` is one of the known subscription plans.
pub fn validate_plan(plan: &str) -> Result<(), CoreError> {
    if VALID_PLANS.contains(&plan) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid plan '{plan}'. Must be one of: {}",
            VALID_PLANS.join(", ")
        )))
    }
}

/// Maximum number of active memberships a company may hold on each plan.
///
/// Returns `None` for the premium plan (unlimited).
pub fn max_active_users(plan: &str) -> Option<i64> {
    match plan {
        PLAN_BASIC => Some(10),
        PLAN_STANDARD => Some(50),
        _ => None,
    }
}

/// Check whether a company at `active_count` members may add one more.
pub fn can_add_user(plan: &str, active_count: i64) -> bool {
    match max_active_users(plan) {
        Some(limit) => active_count < limit,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_plans_validate() {
        assert!(validate_plan(PLAN_BASIC).is_ok());
        assert!(validate_plan(PLAN_STANDARD).is_ok());
        assert!(validate_plan(PLAN_PREMIUM).is_ok());
    }

    #[test]
    fn unknown_plan_is_rejected() {
        let err = validate_plan("enterprise").unwrap_err();
        assert!(err.to_string().contains("enterprise"));
    }

    #[test]
    fn basic_plan_caps_at_ten() {
        assert!(can_add_user(PLAN_BASIC, 9));
        assert!(!can_add_user(PLAN_BASIC, 10));
    }

    #[test]
    fn standard_plan_caps_at_fifty() {
        assert!(can_add_user(PLAN_STANDARD, 49));
        assert!(!can_add_user(PLAN_STANDARD, 50));
    }

    #[test]
    fn premium_plan_is_unlimited() {
        assert_eq!(max_active_users(PLAN_PREMIUM), None);
        assert!(can_add_user(PLAN_PREMIUM, 100_000));
    }
}
