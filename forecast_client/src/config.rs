//! Connection settings for the forecast service.
//!
//! Usually embedded as the `[service]` table of the dashboard config file;
//! `FORECAST_API_URL` overrides the base URL. The optional bearer token is
//! only ever read from `FORECAST_API_TOKEN` so it never lands in a file.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared_utils::env::optional_env_var;

/// Overrides [`ServiceConfig::base_url`].
pub const BASE_URL_ENV: &str = "FORECAST_API_URL";
/// Optional bearer token sent with every request.
pub const TOKEN_ENV: &str = "FORECAST_API_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Scheme + host (+ optional path) of the service, e.g. `http://localhost:8001`.
    pub base_url: String,
    /// Path prefix every endpoint lives under.
    pub api_prefix: String,
    /// Per-request timeout. Forecasts train a model server-side, so this is generous.
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            api_prefix: "api".to_string(),
            timeout_secs: 300,
        }
    }
}

impl ServiceConfig {
    /// Applies [`BASE_URL_ENV`] on top of the configured values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(url) = optional_env_var(BASE_URL_ENV) {
            self.base_url = url;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_table_keeps_defaults() {
        let cfg: ServiceConfig = toml::from_str(r#"base_url = "https://forecast.example""#).unwrap();
        assert_eq!(cfg.base_url, "https://forecast.example");
        assert_eq!(cfg.api_prefix, "api");
        assert_eq!(cfg.timeout(), Duration::from_secs(300));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = toml::from_str::<ServiceConfig>("base_uri = \"x\"").unwrap_err();
        assert!(err.to_string().contains("base_uri"));
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let cfg = ServiceConfig {
            timeout_secs: 0,
            ..ServiceConfig::default()
        };
        assert_eq!(cfg.timeout(), Duration::from_secs(1));
    }
}
