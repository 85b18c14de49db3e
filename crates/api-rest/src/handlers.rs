use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};

use api_shared::{ErrorRes, HealthRes, HealthService, ListPatientsQuery, RiskAssessmentReq};
use vitals_core::{
    calculate_risk,
    validation::{validate_new_patient, validate_visit},
    NewPatient, Patient, RiskAssessment, Visit, VisitInput,
};

use crate::{error::ApiError, AppState};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(state.patients.len()))
}

#[utoipa::path(
    post,
    path = "/api/v1/patients",
    request_body = NewPatient,
    responses(
        (status = 201, description = "Patient created", body = Patient),
        (status = 400, description = "Invalid patient data", body = ErrorRes)
    )
)]
/// Create a new patient
///
/// Validates the body, then stores the patient with a freshly generated id. `status` defaults
/// to `Active` and `lastDateVisit` to the current time.
///
/// # Errors
/// Returns `400 Bad Request` if the body is malformed or fails validation.
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<NewPatient>, JsonRejection>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let Json(new_patient) = payload?;
    validate_new_patient(&new_patient)?;

    let patient = state.patients.create_patient(new_patient);
    Ok((StatusCode::CREATED, Json(patient)))
}

#[utoipa::path(
    get,
    path = "/api/v1/patients",
    params(ListPatientsQuery),
    responses(
        (status = 200, description = "Patients in creation order", body = [Patient]),
        (status = 400, description = "Invalid query parameters", body = ErrorRes)
    )
)]
/// List patients
///
/// Without query parameters this returns every patient. `status`, `gender` and `search`
/// narrow the result.
#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<AppState>,
    query: Result<Query<ListPatientsQuery>, QueryRejection>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.patients.list_patients(&query.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient with visits newest first", body = Patient),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
/// Fetch one patient
///
/// The returned visit list is sorted newest first by timestamp; the stored history is left in
/// insertion order.
#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    let patient = state
        .patients
        .get_patient_by_id(&id)
        .ok_or_else(ApiError::patient_not_found)?;
    Ok(Json(patient.with_visits_newest_first()))
}

#[utoipa::path(
    post,
    path = "/api/v1/patients/{id}/visits",
    params(("id" = String, Path, description = "Patient id")),
    request_body = VisitInput,
    responses(
        (status = 201, description = "Visit recorded", body = Visit),
        (status = 400, description = "Invalid vitals", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
/// Record a visit
///
/// Vitals are validated before the patient is looked up, so an invalid body is reported as
/// `400` even for an unknown id.
#[axum::debug_handler]
pub async fn add_visit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<VisitInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Visit>), ApiError> {
    let Json(input) = payload?;
    validate_visit(&input)?;

    let visit = state.patients.add_visit_to_patient(&id, input)?;
    Ok((StatusCode::CREATED, Json(visit)))
}

#[utoipa::path(
    post,
    path = "/api/v1/risk-assessment",
    request_body = RiskAssessmentReq,
    responses(
        (status = 200, description = "Risk score and level", body = RiskAssessment),
        (status = 400, description = "Age or systolic out of range", body = ErrorRes)
    )
)]
/// Score an age/systolic pair
#[axum::debug_handler(state = AppState)]
pub async fn risk_assessment(
    payload: Result<Json<RiskAssessmentReq>, JsonRejection>,
) -> Result<Json<RiskAssessment>, ApiError> {
    let Json(req) = payload?;
    Ok(Json(calculate_risk(req.age, req.systolic)?))
}

#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}/risk-assessment",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Risk from the patient's age and latest systolic reading", body = RiskAssessment),
        (status = 400, description = "No age or no visits recorded, or values out of range", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
/// Score a stored patient
///
/// Uses the patient's age and the systolic pressure of their most recent visit.
#[axum::debug_handler]
pub async fn patient_risk_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RiskAssessment>, ApiError> {
    let patient = state
        .patients
        .get_patient_by_id(&id)
        .ok_or_else(ApiError::patient_not_found)?;

    let age = patient
        .age()
        .ok_or_else(|| ApiError::BadRequest("patient has no recorded age".into()))?;
    let latest = patient
        .latest_visit()
        .ok_or_else(|| ApiError::BadRequest("patient has no recorded visits".into()))?;

    Ok(Json(calculate_risk(age as f64, latest.systolic as f64)?))
}
