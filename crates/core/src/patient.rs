//! Patient and visit records.
//!
//! A [`Patient`] is created once from a [`NewPatient`] and afterwards only grows: visits are
//! appended in call order and never reordered, edited or removed. A [`Visit`] always carries a
//! repository-assigned timestamp and a BMI derived from its own weight and height.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;
use vitals_types::NonEmptyText;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// The wire name, as it appears in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum PatientStatus {
    #[default]
    Active,
    Inactive,
}

impl PatientStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PatientStatus::Active => "Active",
            PatientStatus::Inactive => "Inactive",
        }
    }
}

/// Caller-supplied fields for a new patient.
///
/// Default rules applied on creation:
/// - `status` absent → [`PatientStatus::Active`]
/// - `last_date_visit` absent or blank → the creation instant, RFC 3339 with milliseconds
///   (`2026-10-19T08:30:00.000Z`)
///
/// Field rules are checked by [`crate::validation::validate_new_patient`].
#[derive(Clone, Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    #[schema(value_type = String)]
    #[validate(custom = "crate::validation::first_name_length")]
    pub first_name: NonEmptyText,
    #[schema(value_type = String)]
    #[validate(custom = "crate::validation::last_name_length")]
    pub last_name: NonEmptyText,
    /// Whole years. `36.0` is accepted as `36`; `36.5` is rejected.
    #[serde(default, deserialize_with = "whole_number::option")]
    #[validate(range(min = 0, max = 120, message = "age must be between 0 and 120"))]
    pub age: Option<i64>,
    pub gender: Option<Gender>,
    pub status: Option<PatientStatus>,
    #[validate(regex(
        path = "crate::validation::PHONE_RE",
        message = "phone must be 7 to 15 digits with an optional leading '+'"
    ))]
    pub phone: Option<String>,
    #[validate(custom = "crate::validation::iso_date")]
    pub last_date_visit: Option<String>,
}

impl NewPatient {
    pub fn new(first_name: NonEmptyText, last_name: NonEmptyText) -> Self {
        Self {
            first_name,
            last_name,
            age: None,
            gender: None,
            status: None,
            phone: None,
            last_date_visit: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    patient_id: String,
    #[schema(value_type = String)]
    first_name: NonEmptyText,
    #[schema(value_type = String)]
    last_name: NonEmptyText,
    age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gender: Option<Gender>,
    status: PatientStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    last_date_visit: String,
    visits: Vec<Visit>,
}

impl Patient {
    /// Builds a patient record from caller input, applying the creation defaults.
    ///
    /// # Arguments
    ///
    /// * `new` - Caller-supplied fields, assumed already validated.
    /// * `patient_id` - Id assigned by the repository.
    /// * `created_at` - Creation instant, used when `last_date_visit` is absent or blank.
    ///
    /// # Returns
    ///
    /// A patient with the given id and an empty visit history.
    pub fn from_new(new: NewPatient, patient_id: String, created_at: DateTime<Utc>) -> Self {
        let last_date_visit = new
            .last_date_visit
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| created_at.to_rfc3339_opts(SecondsFormat::Millis, true));

        Self {
            patient_id,
            first_name: new.first_name,
            last_name: new.last_name,
            age: new.age,
            gender: new.gender,
            status: new.status.unwrap_or_default(),
            phone: new.phone,
            last_date_visit,
            visits: Vec::new(),
        }
    }

    /// Opaque id assigned by the repository.
    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn first_name(&self) -> &NonEmptyText {
        &self.first_name
    }

    pub fn last_name(&self) -> &NonEmptyText {
        &self.last_name
    }

    /// Age in whole years, if one was recorded.
    pub fn age(&self) -> Option<i64> {
        self.age
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    /// Stored status; [`PatientStatus::Active`] unless the caller supplied another.
    pub fn status(&self) -> PatientStatus {
        self.status
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Caller-supplied date of the last visit, or the creation instant when none was given.
    ///
    /// This is a display field only. It is not updated when visits are recorded.
    pub fn last_date_visit(&self) -> &str {
        &self.last_date_visit
    }

    /// Visits in append order.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Records a visit stamped with the current time.
    pub fn add_visit(&mut self, input: VisitInput) -> Visit {
        self.add_visit_at(input, Utc::now().timestamp_millis())
    }

    /// Records a visit with an explicit timestamp (milliseconds since the Unix epoch).
    ///
    /// The visit is appended regardless of how its timestamp compares to earlier visits.
    ///
    /// # Returns
    ///
    /// A copy of the stored visit, including its derived BMI.
    pub fn add_visit_at(&mut self, input: VisitInput, timestamp: i64) -> Visit {
        let visit = Visit::record(input, timestamp);
        self.visits.push(visit.clone());
        visit
    }

    /// The visit shown first by [`Patient::visits_newest_first`].
    ///
    /// That is the visit with the greatest timestamp; among equal timestamps, the one appended
    /// first.
    ///
    /// # Returns
    ///
    /// `None` when no visit has been recorded.
    pub fn latest_visit(&self) -> Option<&Visit> {
        // `max_by_key` keeps the last maximum, so walk backwards to keep the earliest append.
        self.visits.iter().rev().max_by_key(|v| v.timestamp)
    }

    /// Copy of the visit history ordered newest first. Equal timestamps keep append order.
    pub fn visits_newest_first(&self) -> Vec<Visit> {
        let mut visits = self.visits.clone();
        visits.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        visits
    }

    /// Consumes the snapshot and returns it with visits ordered newest first.
    pub fn with_visits_newest_first(mut self) -> Self {
        self.visits = self.visits_newest_first();
        self
    }
}

/// Vitals measured at a visit, as supplied by the caller.
///
/// There is no `timestamp` or `bmi` here: both are always derived when the visit is recorded,
/// and any such keys in an incoming JSON body are ignored. Integer vitals accept whole-valued
/// JSON floats such as `72.0`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitInput {
    #[serde(deserialize_with = "whole_number::required")]
    #[validate(range(min = 20, max = 250, message = "heartRate must be between 20 and 250"))]
    pub heart_rate: i64,
    #[serde(deserialize_with = "whole_number::required")]
    #[validate(range(min = 50, max = 300, message = "systolic must be between 50 and 300"))]
    pub systolic: i64,
    #[serde(deserialize_with = "whole_number::required")]
    #[validate(range(min = 30, max = 200, message = "diastolic must be between 30 and 200"))]
    pub diastolic: i64,
    #[validate(range(min = 30.0, max = 45.0, message = "temperature must be between 30 and 45"))]
    pub temperature: f64,
    /// Kilograms.
    #[validate(range(min = 1.0, max = 500.0, message = "weight must be between 1 and 500"))]
    pub weight: f64,
    /// Metres. Must be greater than zero; checked in [`crate::validation::validate_visit`].
    pub height: f64,
    #[serde(default)]
    #[validate(length(max = 500, message = "notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// Integer fields that also accept whole-valued floats (`72.0`), as JSON clients often send.
mod whole_number {
    use serde::{de, Deserialize, Deserializer};

    /// Largest magnitude an `f64` holds without losing integer precision.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(i64),
        Float(f64),
    }

    fn to_i64<E: de::Error>(number: Number) -> Result<i64, E> {
        match number {
            Number::Int(n) => Ok(n),
            Number::Float(f) if f.fract() == 0.0 && f.abs() <= MAX_EXACT => Ok(f as i64),
            Number::Float(f) => Err(E::custom(format!("expected a whole number, got {f}"))),
        }
    }

    pub fn required<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        to_i64(Number::deserialize(deserializer)?)
    }

    pub fn option<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Number>::deserialize(deserializer)?
            .map(to_i64)
            .transpose()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    /// Milliseconds since the Unix epoch, assigned when the visit was recorded.
    pub timestamp: i64,
    pub heart_rate: i64,
    pub systolic: i64,
    pub diastolic: i64,
    pub temperature: f64,
    pub weight: f64,
    pub height: f64,
    /// Unrounded `weight / height²`. Serialised as `null` when not finite.
    pub bmi: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Visit {
    /// Builds a stored visit from caller input, deriving the BMI.
    pub fn record(input: VisitInput, timestamp: i64) -> Self {
        Self {
            timestamp,
            bmi: bmi(input.weight, input.height),
            heart_rate: input.heart_rate,
            systolic: input.systolic,
            diastolic: input.diastolic,
            temperature: input.temperature,
            weight: input.weight,
            height: input.height,
            notes: input.notes,
        }
    }
}

/// Body mass index, `weight_kg / height_m²`.
///
/// No guard and no rounding: a zero height yields an infinite (or NaN, for zero weight) value.
pub fn bmi(weight_kg: f64, height_m: f64) -> f64 {
    weight_kg / (height_m * height_m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn vitals(weight: f64, height: f64) -> VisitInput {
        VisitInput {
            heart_rate: 72,
            systolic: 120,
            diastolic: 80,
            temperature: 36.6,
            weight,
            height,
            notes: None,
        }
    }

    fn new_patient() -> NewPatient {
        NewPatient::new(
            NonEmptyText::new("Ada").unwrap(),
            NonEmptyText::new("Lovelace").unwrap(),
        )
    }

    #[test]
    fn bmi_is_weight_over_height_squared() {
        let value = bmi(70.0, 1.75);
        assert!((value - 22.857142857142858).abs() < 1e-9);
    }

    #[test]
    fn bmi_with_zero_height_is_not_finite_and_does_not_panic() {
        assert!(bmi(70.0, 0.0).is_infinite());
        assert!(bmi(0.0, 0.0).is_nan());
    }

    #[test]
    fn from_new_applies_defaults() {
        let created_at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
        let patient = Patient::from_new(new_patient(), "abc".into(), created_at);

        assert_eq!(patient.status(), PatientStatus::Active);
        assert_eq!(patient.last_date_visit(), "2026-10-19T08:30:00.000Z");
        assert!(patient.visits().is_empty());
        assert_eq!(patient.age(), None);
    }

    #[test]
    fn from_new_keeps_supplied_values() {
        let mut new = new_patient();
        new.status = Some(PatientStatus::Inactive);
        new.last_date_visit = Some("2025-01-02".into());
        new.gender = Some(Gender::Female);
        new.age = Some(36);

        let patient = Patient::from_new(new, "abc".into(), Utc::now());
        assert_eq!(patient.status(), PatientStatus::Inactive);
        assert_eq!(patient.last_date_visit(), "2025-01-02");
        assert_eq!(patient.gender(), Some(Gender::Female));
        assert_eq!(patient.age(), Some(36));
    }

    #[test]
    fn blank_last_date_visit_falls_back_to_creation_time() {
        let mut new = new_patient();
        new.last_date_visit = Some("  ".into());
        let created_at = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();

        let patient = Patient::from_new(new, "abc".into(), created_at);
        assert_eq!(patient.last_date_visit(), "2024-02-29T12:00:00.000Z");
    }

    #[test]
    fn visits_keep_append_order_regardless_of_timestamp() {
        let mut patient = Patient::from_new(new_patient(), "abc".into(), Utc::now());
        patient.add_visit_at(vitals(70.0, 1.75), 2_000);
        patient.add_visit_at(vitals(71.0, 1.75), 1_000);

        let stamps: Vec<i64> = patient.visits().iter().map(|v| v.timestamp).collect();
        assert_eq!(stamps, vec![2_000, 1_000]);
    }

    #[test]
    fn newest_first_sorts_a_copy_and_keeps_ties_in_append_order() {
        let mut patient = Patient::from_new(new_patient(), "abc".into(), Utc::now());
        patient.add_visit_at(vitals(60.0, 1.70), 1_000);
        patient.add_visit_at(vitals(61.0, 1.70), 3_000);
        patient.add_visit_at(vitals(62.0, 1.70), 3_000);

        let weights: Vec<f64> = patient
            .visits_newest_first()
            .iter()
            .map(|v| v.weight)
            .collect();
        assert_eq!(weights, vec![61.0, 62.0, 60.0]);
        assert_eq!(patient.visits()[0].weight, 60.0);

        assert_eq!(patient.latest_visit().map(|v| v.weight), Some(61.0));
    }

    #[test]
    fn latest_visit_agrees_with_newest_first_on_equal_timestamps() {
        let mut patient = Patient::from_new(new_patient(), "abc".into(), Utc::now());
        let mut high = vitals(70.0, 1.75);
        high.systolic = 200;
        let mut low = vitals(70.0, 1.75);
        low.systolic = 90;
        patient.add_visit_at(high, 1_000);
        patient.add_visit_at(low, 1_000);

        let shown_first = patient.visits_newest_first()[0].clone();
        assert_eq!(shown_first.systolic, 200);
        assert_eq!(patient.latest_visit(), Some(&shown_first));
    }

    #[test]
    fn latest_visit_of_empty_history_is_none() {
        let patient = Patient::from_new(new_patient(), "abc".into(), Utc::now());
        assert!(patient.latest_visit().is_none());
    }

    #[test]
    fn whole_valued_floats_are_accepted_for_integer_vitals() {
        let input: VisitInput = serde_json::from_str(
            r#"{"heartRate":72.0,"systolic":120,"diastolic":80.0,"temperature":36.5,
                "weight":70,"height":1.75}"#,
        )
        .unwrap();
        assert_eq!(input.heart_rate, 72);
        assert_eq!(input.systolic, 120);
        assert_eq!(input.diastolic, 80);
    }

    #[test]
    fn fractional_integer_vitals_are_rejected() {
        let err = serde_json::from_str::<VisitInput>(
            r#"{"heartRate":72.5,"systolic":120,"diastolic":80,"temperature":36.5,
                "weight":70,"height":1.75}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("whole number"), "{err}");

        assert!(serde_json::from_str::<VisitInput>(
            r#"{"heartRate":"72","systolic":120,"diastolic":80,"temperature":36.5,
                "weight":70,"height":1.75}"#,
        )
        .is_err());
    }

    #[test]
    fn age_accepts_whole_floats_null_or_absence() {
        let parse = |json: &str| serde_json::from_str::<NewPatient>(json).map(|p| p.age);

        assert_eq!(parse(r#"{"firstName":"Ada","lastName":"L","age":36.0}"#).unwrap(), Some(36));
        assert_eq!(parse(r#"{"firstName":"Ada","lastName":"L","age":36}"#).unwrap(), Some(36));
        assert_eq!(parse(r#"{"firstName":"Ada","lastName":"L","age":null}"#).unwrap(), None);
        assert_eq!(parse(r#"{"firstName":"Ada","lastName":"L"}"#).unwrap(), None);
        assert!(parse(r#"{"firstName":"Ada","lastName":"L","age":36.5}"#).is_err());
    }

    #[test]
    fn recorded_visit_derives_bmi_and_keeps_notes() {
        let mut input = vitals(80.0, 2.0);
        input.notes = Some("follow up in 2 weeks".into());

        let visit = Visit::record(input, 42);
        assert_eq!(visit.timestamp, 42);
        assert_eq!(visit.bmi, 20.0);
        assert_eq!(visit.notes.as_deref(), Some("follow up in 2 weeks"));
    }

    #[test]
    fn supplied_bmi_and_timestamp_are_ignored_on_input() {
        let input: VisitInput = serde_json::from_str(
            r#"{"heartRate":70,"systolic":120,"diastolic":80,"temperature":36.5,
                "weight":70,"height":1.75,"bmi":99,"timestamp":1}"#,
        )
        .unwrap();
        let visit = Visit::record(input, 5);
        assert_eq!(visit.timestamp, 5);
        assert!((visit.bmi - 22.857142857142858).abs() < 1e-9);
    }

    #[test]
    fn patient_serialises_with_camel_case_keys() {
        let patient = Patient::from_new(new_patient(), "abc".into(), Utc::now());
        let json = serde_json::to_value(&patient).unwrap();

        assert_eq!(json["patientId"], "abc");
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["status"], "Active");
        assert!(json["age"].is_null());
        assert!(json.get("gender").is_none());
        assert_eq!(json["visits"], serde_json::json!([]));
    }
}
