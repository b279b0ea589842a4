//! Small helpers shared by the forecast client and the dashboard.

pub mod env;
pub mod logging;
