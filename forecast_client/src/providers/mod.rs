//! Service abstraction for the remote forecast backend.
//!
//! [`ForecastService`] covers the forecasting side (predict, analyze,
//! history, health) and [`CatalogService`] lists selectable instruments.
//! The HTTP implementation in [`http`] implements both; tests and offline
//! tooling can plug in their own.
//!
//! Both traits are async and object safe, so callers can hold them as
//! `Arc<dyn ForecastService>` and pick the implementation at runtime.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use forecast_client::models::catalog::{Catalog, Instrument};
//! use forecast_client::providers::CatalogService;
//! use forecast_client::ServiceError;
//!
//! struct FixedCatalog;
//!
//! #[async_trait]
//! impl CatalogService for FixedCatalog {
//!     async fn fetch_catalog(&self) -> Result<Catalog, ServiceError> {
//!         Ok(Catalog::from_instruments([Instrument {
//!             symbol: "AAPL".into(),
//!             name: "Apple Inc.".into(),
//!         }]))
//!     }
//! }
//! ```

pub mod http;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::{
    errors::ServiceError,
    models::{
        analysis::AnalysisSnapshot,
        catalog::Catalog,
        prediction::{PredictionRequest, PredictionResult},
    },
};

/// Forecast and analysis operations.
#[async_trait]
pub trait ForecastService: Send + Sync {
    /// Requests a fresh forecast. Slow: the service trains a model per call.
    async fn fetch_prediction(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, ServiceError>;

    /// Current technical-analysis snapshot for `symbol`.
    async fn fetch_analysis(&self, symbol: &str) -> Result<AnalysisSnapshot, ServiceError>;

    /// Most recent forecasts the service has produced, newest first.
    async fn fetch_history(&self, limit: u32) -> Result<Vec<PredictionResult>, ServiceError>;

    /// Liveness probe; returns the service banner.
    async fn ping(&self) -> Result<String, ServiceError>;
}

/// Lists the instruments a user may pick from.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Catalog, ServiceError>;
}

/// Errors that can occur while constructing a service client.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ClientInitError {
    /// The configured base URL does not parse.
    #[snafu(display("Invalid base URL {url:?}: {source}"))]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
        backtrace: Backtrace,
    },

    /// The base URL parses but cannot carry endpoint paths (e.g. `mailto:`).
    #[snafu(display("Unsupported base URL {url:?}: expected an http(s) URL"))]
    UnsupportedBaseUrl { url: String, backtrace: Backtrace },

    /// The token contains characters not allowed in a header.
    #[snafu(display("Invalid API token format: {source}"))]
    InvalidToken {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}
