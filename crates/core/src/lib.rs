//! # Vitals Core
//!
//! Domain logic for the vitals tracker:
//! - Patient and visit records ([`patient`])
//! - The in-memory patient store ([`repositories::patients::PatientRepository`])
//! - Risk scoring from age and systolic pressure ([`risk`])
//! - Boundary validation of caller input ([`validation`])
//!
//! **No API concerns**: HTTP routing, status codes and OpenAPI wiring belong in `api-rest`.

pub mod constants;
pub mod error;
pub mod patient;
pub mod repositories;
pub mod risk;
pub mod validation;

pub use error::{PatientError, PatientResult};
pub use patient::{bmi, Gender, NewPatient, Patient, PatientStatus, Visit, VisitInput};
pub use repositories::patients::{PatientFilter, PatientRepository};
pub use risk::{calculate_risk, RiskAssessment, RiskLevel};
pub use vitals_types::{NonEmptyText, TextError};
