//! In-memory patient store.
//!
//! [`PatientRepository`] is the authoritative collection of patients for the lifetime of the
//! process. Nothing is persisted. The handle is cheap to clone and every clone shares the same
//! underlying store.
//!
//! ## Locking
//!
//! - Creating a patient generates its id and appends it under one write lock, so ids are unique
//!   even with concurrent callers.
//! - Adding a visit looks up the patient and appends under one write lock, so two concurrent
//!   appends to the same patient are both kept.
//! - Reads take a read lock and return owned snapshots; mutating a snapshot never changes the
//!   store.
//!
//! A poisoned lock is recovered rather than propagated: every mutation is a single `push`, so a
//! panic elsewhere cannot leave the vector half-updated.

use crate::error::{PatientError, PatientResult};
use crate::patient::{Gender, NewPatient, Patient, PatientStatus, Visit, VisitInput};
use chrono::Utc;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use vitals_uuid::UuidService;

/// Optional criteria for [`PatientRepository::list_patients`]. All set criteria must match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatientFilter {
    pub status: Option<PatientStatus>,
    pub gender: Option<Gender>,
    /// Case-insensitive substring of any displayed field: first name, last name, full name,
    /// age, gender, status, phone, last visit date or id.
    pub search: Option<String>,
}

impl PatientFilter {
    /// Whether `patient` satisfies every criterion that is set.
    ///
    /// A blank `search` matches everything.
    pub fn matches(&self, patient: &Patient) -> bool {
        if self.status.is_some_and(|s| s != patient.status()) {
            return false;
        }
        if self.gender.is_some() && self.gender != patient.gender() {
            return false;
        }

        let needle = match self.search.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => n.to_lowercase(),
            _ => return true,
        };

        let full_name = format!("{} {}", patient.first_name(), patient.last_name());
        let age = patient.age().map(|a| a.to_string()).unwrap_or_default();
        [
            full_name.as_str(),
            age.as_str(),
            patient.gender().map(Gender::as_str).unwrap_or_default(),
            patient.status().as_str(),
            patient.phone().unwrap_or_default(),
            patient.last_date_visit(),
            patient.patient_id(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[derive(Clone, Debug, Default)]
pub struct PatientRepository {
    patients: Arc<RwLock<Vec<Patient>>>,
}

impl PatientRepository {
    /// Creates an empty store.
    ///
    /// # Returns
    ///
    /// A handle whose clones all share the same patients.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Patient>> {
        self.patients.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Patient>> {
        self.patients.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates and stores a new patient.
    ///
    /// Assigns a fresh opaque id and applies the creation defaults (see [`NewPatient`]). The
    /// input is not validated here; see [`crate::validation::validate_new_patient`].
    ///
    /// # Returns
    ///
    /// A snapshot of the stored patient, with an empty visit history.
    pub fn create_patient(&self, new: NewPatient) -> Patient {
        let mut patients = self.write();

        let patient_id = loop {
            let candidate = UuidService::new().to_string();
            if !patients.iter().any(|p| p.patient_id() == candidate) {
                break candidate;
            }
        };

        let patient = Patient::from_new(new, patient_id, Utc::now());
        patients.push(patient.clone());

        tracing::info!(patient_id = %patient.patient_id(), total = patients.len(), "patient created");
        patient
    }

    /// All patients in creation order.
    ///
    /// # Returns
    ///
    /// Owned snapshots; later writes to the store are not reflected in them.
    pub fn get_all_patients(&self) -> Vec<Patient> {
        self.read().clone()
    }

    /// Patients matching `filter`, in creation order.
    pub fn list_patients(&self, filter: &PatientFilter) -> Vec<Patient> {
        self.read()
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    /// Looks a patient up by exact id.
    ///
    /// # Arguments
    ///
    /// * `patient_id` - Opaque id as returned by [`PatientRepository::create_patient`].
    ///
    /// # Returns
    ///
    /// A snapshot of the patient, or `None` if no patient has that id. Malformed ids are not an
    /// error; they simply match nothing.
    pub fn get_patient_by_id(&self, patient_id: &str) -> Option<Patient> {
        self.read()
            .iter()
            .find(|p| p.patient_id() == patient_id)
            .cloned()
    }

    /// Records a visit for the patient with `patient_id`.
    ///
    /// The BMI is derived from the supplied weight and height and the timestamp is the current
    /// time in milliseconds. A zero height is not rejected here: the resulting non-finite BMI is
    /// stored as computed.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::NotFound`] if no patient has that id.
    pub fn add_visit_to_patient(&self, patient_id: &str, input: VisitInput) -> PatientResult<Visit> {
        let mut patients = self.write();
        let patient = patients
            .iter_mut()
            .find(|p| p.patient_id() == patient_id)
            .ok_or_else(|| PatientError::NotFound(patient_id.to_string()))?;

        let visit = patient.add_visit(input);

        if !visit.bmi.is_finite() {
            tracing::warn!(patient_id, height = visit.height, "visit recorded with non-finite BMI");
        }
        tracing::info!(patient_id, visits = patient.visits().len(), "visit recorded");
        Ok(visit)
    }

    /// Number of stored patients.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// `true` when no patient has been created yet.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
