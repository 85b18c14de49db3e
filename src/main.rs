use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, RestConfig};
use vitals_core::PatientRepository;

/// Main entry point for the vitals tracker
///
/// Starts the REST server on `VITALS_REST_ADDR` (default: "0.0.0.0:5000"). Patient records are
/// held in memory for the lifetime of the process.
///
/// # Environment Variables
/// - `VITALS_REST_ADDR`: REST server address (default: "0.0.0.0:5000")
/// - `VITALS_SWAGGER_UI`: serve Swagger UI and the OpenAPI document (default: "true")
/// - `RUST_LOG`: extra tracing directives
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vitals_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("vitals_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = RestConfig::from_env()?;
    if cfg.swagger_ui() {
        tracing::info!("++ Swagger UI at http://{}/swagger-ui", cfg.addr());
    }

    let state = AppState::new(PatientRepository::new());
    api_rest::serve(cfg, state).await
}
