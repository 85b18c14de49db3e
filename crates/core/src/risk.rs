//! Risk assessment from age and systolic blood pressure.
//!
//! ```text
//! raw   = age * 0.3 + systolic * 0.5 + 10
//! score = round(raw * 10) / 10
//! level = score < 50 → Low, score < 70 → Moderate, otherwise High
//! ```
//!
//! The calculator is a pure function: it holds no state, performs no I/O and does not log.
//! It does not read from the patient store; callers pass the two numbers in.

use crate::constants::{
    AGE_RANGE, LOW_RISK_CEILING, MODERATE_RISK_CEILING, RISK_AGE_WEIGHT, RISK_BASELINE,
    RISK_SYSTOLIC_RANGE, RISK_SYSTOLIC_WEIGHT,
};
use crate::error::{PatientError, PatientResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskLevel {
    /// Classifies an already-rounded score.
    pub fn from_score(score: f64) -> Self {
        if score < LOW_RISK_CEILING {
            RiskLevel::Low
        } else if score < MODERATE_RISK_CEILING {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }

    /// Display label, identical to the serialised form.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Rounded to one decimal place.
    pub risk_score: f64,
    pub risk_level: RiskLevel,
}

/// Scores an age/systolic pair.
///
/// # Arguments
///
/// * `age` - Years, 0–120 inclusive.
/// * `systolic` - mmHg, 70–250 inclusive.
///
/// # Returns
///
/// The score rounded to one decimal place and its level. Identical inputs always give
/// bit-identical results.
///
/// Out-of-range inputs are rejected, never clamped. NaN fails the range checks.
///
/// # Errors
///
/// - [`PatientError::AgeOutOfRange`] if `age` is outside 0–120.
/// - [`PatientError::SystolicOutOfRange`] if `systolic` is outside 70–250 mmHg.
pub fn calculate_risk(age: f64, systolic: f64) -> PatientResult<RiskAssessment> {
    if !AGE_RANGE.contains(&age) {
        return Err(PatientError::AgeOutOfRange(age));
    }
    if !RISK_SYSTOLIC_RANGE.contains(&systolic) {
        return Err(PatientError::SystolicOutOfRange(systolic));
    }

    let raw = age * RISK_AGE_WEIGHT + systolic * RISK_SYSTOLIC_WEIGHT + RISK_BASELINE;
    // raw >= 45 here, so half-away-from-zero matches half-up.
    let risk_score = (raw * 10.0).round() / 10.0;

    Ok(RiskAssessment {
        risk_score,
        risk_level: RiskLevel::from_score(risk_score),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_examples() {
        let r = calculate_risk(30.0, 120.0).unwrap();
        assert_eq!(r.risk_score, 79.0);
        assert_eq!(r.risk_level, RiskLevel::High);

        let r = calculate_risk(20.0, 90.0).unwrap();
        assert_eq!(r.risk_score, 61.0);
        assert_eq!(r.risk_level, RiskLevel::Moderate);

        let r = calculate_risk(10.0, 80.0).unwrap();
        assert_eq!(r.risk_score, 53.0);
        assert_eq!(r.risk_level, RiskLevel::Moderate);
    }

    #[test]
    fn lowest_possible_score_is_low_risk() {
        let r = calculate_risk(0.0, 70.0).unwrap();
        assert_eq!(r.risk_score, 45.0);
        assert_eq!(r.risk_level, RiskLevel::Low);
    }

    #[test]
    fn score_is_rounded_to_one_decimal() {
        // 33 * 0.3 + 101 * 0.5 + 10 = 70.4
        let r = calculate_risk(33.0, 101.0).unwrap();
        assert!((r.risk_score - 70.4).abs() < 1e-9);

        // 1 * 0.3 + 71 * 0.5 + 10 = 45.8
        let r = calculate_risk(1.0, 71.0).unwrap();
        assert!((r.risk_score - 45.8).abs() < 1e-9);

        // 0.7 * 0.3 + 70 * 0.5 + 10 = 45.21
        let r = calculate_risk(0.7, 70.0).unwrap();
        assert!((r.risk_score - 45.2).abs() < 1e-9);
    }

    #[test]
    fn classification_uses_rounded_score_boundaries() {
        assert_eq!(RiskLevel::from_score(49.9), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(50.0), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(69.9), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(70.0), RiskLevel::High);
    }

    #[test]
    fn score_of_exactly_fifty_is_moderate() {
        // 0 * 0.3 + 80 * 0.5 + 10 = 50
        let r = calculate_risk(0.0, 80.0).unwrap();
        assert_eq!(r.risk_score, 50.0);
        assert_eq!(r.risk_level, RiskLevel::Moderate);
    }

    #[test]
    fn out_of_range_age_is_rejected() {
        let err = calculate_risk(-1.0, 100.0).unwrap_err();
        assert!(matches!(err, PatientError::AgeOutOfRange(_)));
        assert!(err.to_string().starts_with("age out of range"));

        assert!(calculate_risk(120.5, 100.0).is_err());
        assert!(calculate_risk(f64::NAN, 100.0).is_err());
    }

    #[test]
    fn out_of_range_systolic_is_rejected() {
        let err = calculate_risk(50.0, 300.0).unwrap_err();
        assert!(matches!(err, PatientError::SystolicOutOfRange(_)));
        assert!(err.to_string().starts_with("systolic out of range"));

        assert!(calculate_risk(50.0, 69.9).is_err());
    }

    #[test]
    fn age_is_checked_before_systolic() {
        let err = calculate_risk(200.0, 10.0).unwrap_err();
        assert!(matches!(err, PatientError::AgeOutOfRange(_)));
    }

    #[test]
    fn range_ends_are_inclusive() {
        assert!(calculate_risk(0.0, 70.0).is_ok());
        assert!(calculate_risk(120.0, 250.0).is_ok());
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let a = calculate_risk(47.0, 133.0).unwrap();
        let b = calculate_risk(47.0, 133.0).unwrap();
        assert_eq!(a.risk_score.to_bits(), b.risk_score.to_bits());
        assert_eq!(a.risk_level, b.risk_level);
    }

    #[test]
    fn serialises_with_display_labels() {
        let r = calculate_risk(30.0, 120.0).unwrap();
        let json = serde_json::to_value(r).unwrap();
        assert_eq!(json["riskScore"], 79.0);
        assert_eq!(json["riskLevel"], "High Risk");
    }
}
