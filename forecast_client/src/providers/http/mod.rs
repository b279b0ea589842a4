//! JSON-over-HTTP implementation of the service traits.

pub mod params;
pub mod provider;
pub mod response;

pub use provider::HttpForecastService;
