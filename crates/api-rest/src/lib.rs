//! # API REST
//!
//! REST API for the vitals tracker.
//!
//! Handles:
//! - HTTP endpoints with axum, mounted under `/api/v1`
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS, request tracing)
//!
//! Domain behaviour lives in `vitals-core`; this crate only validates, dispatches and maps
//! errors to responses.

#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use vitals_core::PatientRepository;

pub use config::RestConfig;
pub use error::ApiError;

/// Application state shared across REST API handlers.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub patients: PatientRepository,
}

impl AppState {
    pub fn new(patients: PatientRepository) -> Self {
        Self { patients }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::create_patient,
        handlers::list_patients,
        handlers::get_patient,
        handlers::add_visit,
        handlers::risk_assessment,
        handlers::patient_risk_assessment,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::ErrorRes,
        api_shared::RiskAssessmentReq,
        vitals_core::NewPatient,
        vitals_core::Patient,
        vitals_core::Gender,
        vitals_core::PatientStatus,
        vitals_core::VisitInput,
        vitals_core::Visit,
        vitals_core::RiskAssessment,
        vitals_core::RiskLevel,
    ))
)]
pub struct ApiDoc;

/// Builds the full application router.
///
/// Swagger UI is mounted at `/swagger-ui` (document at `/api-docs/openapi.json`) when enabled in
/// `cfg`.
pub fn router(state: AppState, cfg: &RestConfig) -> Router {
    let api = Router::new()
        .route(
            "/patients",
            get(handlers::list_patients).post(handlers::create_patient),
        )
        .route("/patients/:id", get(handlers::get_patient))
        .route("/patients/:id/visits", post(handlers::add_visit))
        .route(
            "/patients/:id/risk-assessment",
            get(handlers::patient_risk_assessment),
        )
        .route("/risk-assessment", post(handlers::risk_assessment));

    let mut app = Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", api);

    if cfg.swagger_ui() {
        app = app.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `cfg.addr()` and serves until the process is stopped.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(cfg: RestConfig, state: AppState) -> anyhow::Result<()> {
    let app = router(state, &cfg);

    let listener = tokio::net::TcpListener::bind(cfg.addr()).await?;
    tracing::info!("-- Starting vitals REST API on {}", cfg.addr());
    axum::serve(listener, app).await?;

    Ok(())
}
