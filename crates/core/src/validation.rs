//! Request validation.
//!
//! These checks run at the API boundary before anything reaches the [`PatientRepository`]
//! or the risk calculator; the repository itself trusts its inputs. The field rules are declared
//! with `validator` attributes on [`NewPatient`] and [`VisitInput`]; this module supplies the
//! custom rules they reference and reports the first failing field, in declaration order, as
//! [`PatientError::InvalidInput`] with a message fit to show a user.
//!
//! [`PatientRepository`]: crate::repositories::patients::PatientRepository

use crate::constants::MAX_NAME_LEN;
use crate::patient::{NewPatient, VisitInput};
use crate::{PatientError, PatientResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::{Validate, ValidationError, ValidationErrors};
use vitals_types::NonEmptyText;

/// An optional leading `+` followed by 7 to 15 ASCII digits.
pub(crate) static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone pattern compiles"));

// Every message starts with the wire name of its field; these fix the reporting order.
const NEW_PATIENT_FIELDS: &[&str] = &["firstName", "lastName", "age", "phone", "lastDateVisit"];

const VISIT_FIELDS: &[&str] = &[
    "heartRate",
    "systolic",
    "diastolic",
    "temperature",
    "weight",
    "notes",
];

/// Validates a new patient.
///
/// # Errors
///
/// Returns [`PatientError::InvalidInput`] naming the first field that breaks its rule.
pub fn validate_new_patient(patient: &NewPatient) -> PatientResult<()> {
    patient
        .validate()
        .map_err(|errors| first_failure(&errors, NEW_PATIENT_FIELDS))
}

/// Validates measured vitals.
///
/// Height must be finite and strictly positive so that the derived BMI is finite. It is checked
/// after the declared ranges.
///
/// # Errors
///
/// Returns [`PatientError::InvalidInput`] naming the first field that breaks its rule.
pub fn validate_visit(visit: &VisitInput) -> PatientResult<()> {
    visit
        .validate()
        .map_err(|errors| first_failure(&errors, VISIT_FIELDS))?;

    if !(visit.height.is_finite() && visit.height > 0.0) {
        return Err(PatientError::InvalidInput(format!(
            "height must be greater than 0, got {}",
            visit.height
        )));
    }
    Ok(())
}

/// Picks the message of the first failing field in `order`.
///
/// `ValidationErrors` is keyed by a hash map, so its own iteration order is not stable.
fn first_failure(errors: &ValidationErrors, order: &[&str]) -> PatientError {
    let messages: Vec<String> = errors
        .field_errors()
        .into_values()
        .flatten()
        .filter_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .collect();

    let message = order
        .iter()
        .find_map(|field| messages.iter().find(|m| m.starts_with(field)).cloned())
        .or_else(|| messages.first().cloned())
        .unwrap_or_else(|| errors.to_string());
    PatientError::InvalidInput(message)
}

fn invalid(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    err
}

fn name_length(field: &str, name: &NonEmptyText) -> Result<(), ValidationError> {
    NonEmptyText::with_max_len(name.as_str(), MAX_NAME_LEN)
        .map(drop)
        .map_err(|e| invalid("length", format!("{field}: {e}")))
}

pub(crate) fn first_name_length(name: &NonEmptyText) -> Result<(), ValidationError> {
    name_length("firstName", name)
}

pub(crate) fn last_name_length(name: &NonEmptyText) -> Result<(), ValidationError> {
    name_length("lastName", name)
}

/// Accepts RFC 3339 date-times, date-times without an offset, and plain `YYYY-MM-DD` dates.
pub(crate) fn iso_date(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let ok = DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok();

    if !ok {
        return Err(invalid(
            "iso_date",
            format!("lastDateVisit must be an ISO-8601 date, got '{value}'"),
        ));
    }
    Ok(())
}
