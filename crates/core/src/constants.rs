//! Constants used throughout the vitals core crate.
//!
//! Clinical ranges and risk-formula coefficients live here so that validation, the calculator
//! and their tests agree on a single set of numbers.

/// Inclusive age range accepted by the risk calculator, in years.
pub const AGE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=120.0;

/// Inclusive systolic range accepted by the risk calculator, in mmHg.
pub const RISK_SYSTOLIC_RANGE: std::ops::RangeInclusive<f64> = 70.0..=250.0;

/// Weight applied to age in the risk formula.
pub const RISK_AGE_WEIGHT: f64 = 0.3;

/// Weight applied to systolic pressure in the risk formula.
pub const RISK_SYSTOLIC_WEIGHT: f64 = 0.5;

/// Constant offset added to every raw risk score.
pub const RISK_BASELINE: f64 = 10.0;

/// Rounded scores strictly below this are "Low Risk".
pub const LOW_RISK_CEILING: f64 = 50.0;

/// Rounded scores strictly below this (and not low) are "Moderate Risk".
pub const MODERATE_RISK_CEILING: f64 = 70.0;

/// Maximum length of a first or last name, in characters.
pub const MAX_NAME_LEN: usize = 50;
