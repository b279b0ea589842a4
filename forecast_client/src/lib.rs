//! Typed access to the remote forecast service.
//!
//! The service trains a model per request and answers with a forecast, a
//! technical-analysis snapshot, or the list of selectable instruments. This
//! crate owns the wire schemas for those payloads, validates them at the
//! boundary, and exposes the service behind the [`ForecastService`] and
//! [`CatalogService`] traits so callers can swap in fakes.

pub mod config;
pub mod errors;
pub mod models;
pub mod providers;

pub use errors::ServiceError;
pub use providers::{CatalogService, ForecastService, http::HttpForecastService};
