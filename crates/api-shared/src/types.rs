use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use vitals_core::{Gender, PatientFilter, PatientStatus};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
    /// Number of patients currently held in memory.
    pub patients: usize,
}

/// Body of every non-2xx response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub message: String,
}

impl ErrorRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Input for an ad-hoc risk assessment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RiskAssessmentReq {
    /// Years, 0–120.
    pub age: f64,
    /// mmHg, 70–250.
    pub systolic: f64,
}

/// Query parameters accepted when listing patients. Omitted parameters do not filter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPatientsQuery {
    pub status: Option<PatientStatus>,
    pub gender: Option<Gender>,
    /// Case-insensitive substring of name, age, gender, status, phone, last visit date or id.
    pub search: Option<String>,
}

impl From<ListPatientsQuery> for PatientFilter {
    fn from(q: ListPatientsQuery) -> Self {
        PatientFilter {
            status: q.status,
            gender: q.gender,
            search: q.search,
        }
    }
}
