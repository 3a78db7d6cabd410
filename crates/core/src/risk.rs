//! Hazard matrix risk scoring.
//!
//! Hazard entries carry a probability and a severity on a 1-5 scale; the
//! risk score is their product and the level is a banded classification of
//! that score. Out-of-range inputs are rejected before scoring.

use crate::error::CoreError;

/// Inclusive scale bounds for probability and severity.
pub const SCALE_MIN: i16 = 1;
pub const SCALE_MAX: i16 = 5;

/// Banded risk classification of a probability x severity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Stable lowercase label stored and serialized with hazard entries.
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

/// Validate that a value sits on the 1-5 scale.
pub fn validate_scale(field: &str, value: i16) -> Result<(), CoreError> {
    if (SCALE_MIN..=SCALE_MAX).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{field} must be between {SCALE_MIN} and {SCALE_MAX}, got {value}"
        )))
    }
}

/// Compute the risk score (probability x severity) after range checks.
pub fn risk_score(probability: i16, severity: i16) -> Result<i16, CoreError> {
    validate_scale("probability", probability)?;
    validate_scale("severity", severity)?;
    Ok(probability * severity)
}

/// Classify a risk score into its band.
///
/// Bands: 1-4 low, 5-9 medium, 10-16 high, 17-25 critical.
pub fn classify(score: i16) -> RiskLevel {
    match score {
        ..=4 => RiskLevel::Low,
        5..=9 => RiskLevel::Medium,
        10..=16 => RiskLevel::High,
        _ => RiskLevel::Critical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn score_is_product_of_inputs() {
        assert_eq!(risk_score(3, 4).unwrap(), 12);
        assert_eq!(risk_score(1, 1).unwrap(), 1);
        assert_eq!(risk_score(5, 5).unwrap(), 25);
    }

    #[test]
    fn out_of_range_inputs_are_rejected() {
        assert_matches!(risk_score(0, 3), Err(CoreError::Validation(_)));
        assert_matches!(risk_score(3, 6), Err(CoreError::Validation(_)));
        assert_matches!(risk_score(-1, 2), Err(CoreError::Validation(_)));
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(classify(4), RiskLevel::Low);
        assert_eq!(classify(5), RiskLevel::Medium);
        assert_eq!(classify(9), RiskLevel::Medium);
        assert_eq!(classify(10), RiskLevel::High);
        assert_eq!(classify(16), RiskLevel::High);
        assert_eq!(classify(17), RiskLevel::Critical);
        assert_eq!(classify(25), RiskLevel::Critical);
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(RiskLevel::Low.label(), "low");
        assert_eq!(RiskLevel::Critical.label(), "critical");
    }
}
