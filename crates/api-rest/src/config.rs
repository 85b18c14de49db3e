//! REST runtime configuration.
//!
//! Resolved once at process startup and passed into [`crate::serve`]; handlers never read the
//! environment.

use anyhow::Context;
use std::net::SocketAddr;

/// Listen address used when `VITALS_REST_ADDR` is unset.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:5000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestConfig {
    addr: SocketAddr,
    swagger_ui: bool,
}

impl RestConfig {
    pub fn new(addr: SocketAddr, swagger_ui: bool) -> Self {
        Self { addr, swagger_ui }
    }

    /// Reads `VITALS_REST_ADDR` and `VITALS_SWAGGER_UI` from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_env_values(
            std::env::var("VITALS_REST_ADDR").ok(),
            std::env::var("VITALS_SWAGGER_UI").ok(),
        )
    }

    /// Builds a config from raw environment values without touching the environment.
    ///
    /// Missing or blank values fall back to the defaults (`0.0.0.0:5000`, Swagger UI on).
    ///
    /// # Errors
    ///
    /// Returns an error if the address does not parse as `host:port` or the Swagger flag is
    /// not one of `true`/`false`/`1`/`0`.
    pub fn from_env_values(addr: Option<String>, swagger_ui: Option<String>) -> anyhow::Result<Self> {
        let addr = non_blank(addr).unwrap_or_else(|| DEFAULT_REST_ADDR.to_string());
        let addr: SocketAddr = addr
            .parse()
            .with_context(|| format!("VITALS_REST_ADDR is not a valid socket address: '{addr}'"))?;

        let swagger_ui = match non_blank(swagger_ui)
            .map(|v| v.to_ascii_lowercase())
            .as_deref()
        {
            None => true,
            Some("true" | "1") => true,
            Some("false" | "0") => false,
            Some(other) => anyhow::bail!("VITALS_SWAGGER_UI must be true or false, got '{other}'"),
        };

        Ok(Self::new(addr, swagger_ui))
    }

    /// Socket address the REST server binds.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Whether `/swagger-ui` and `/api-docs/openapi.json` are mounted.
    pub fn swagger_ui(&self) -> bool {
        self.swagger_ui
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
