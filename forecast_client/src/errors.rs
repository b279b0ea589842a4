use thiserror::Error;

use crate::models::prediction::PayloadError;

/// Errors returned by a [`ForecastService`](crate::providers::ForecastService)
/// or [`CatalogService`](crate::providers::CatalogService) call.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request did not produce a response (connection refused, timeout, ...).
    #[error("Request to forecast service failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Forecast service returned {status}: {detail}")]
    Api { status: u16, detail: String },

    /// The body was not the JSON shape the endpoint promises.
    #[error("Could not decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The body decoded but breaks a payload invariant.
    #[error("Malformed {endpoint} payload: {source}")]
    Malformed {
        endpoint: &'static str,
        #[source]
        source: PayloadError,
    },

    /// The request was rejected before being sent.
    #[error("Invalid request: {0}")]
    Validation(String),
}

impl ServiceError {
    /// True when the payload arrived but violated its schema or invariants.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::Malformed { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Request(err) if err.is_timeout())
    }
}
