#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("patient not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("age out of range: must be between 0 and 120, got {0}")]
    AgeOutOfRange(f64),
    #[error("systolic out of range: must be between 70 and 250 mmHg, got {0}")]
    SystolicOutOfRange(f64),
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
