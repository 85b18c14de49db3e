use crate::types::HealthRes;

/// Health check shared by every transport.
#[derive(Clone, Debug, Default)]
pub struct HealthService;

impl HealthService {
    /// Reports liveness together with the number of stored patients.
    pub fn check_health(patient_count: usize) -> HealthRes {
        HealthRes {
            ok: true,
            message: "Vitals tracker is alive".into(),
            patients: patient_count,
        }
    }
}
