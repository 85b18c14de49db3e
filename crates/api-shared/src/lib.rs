//! # API Shared
//!
//! Transport-level payloads and services shared by the vitals tracker APIs.
//!
//! Contains:
//! - Request/response bodies that are not domain records (`HealthRes`, `ErrorRes`, ...)
//! - `HealthService`
//!
//! Domain records (`Patient`, `Visit`, `RiskAssessment`) are serialised directly from
//! `vitals-core`.

pub mod health;
pub mod types;

pub use health::HealthService;
pub use types::*;
