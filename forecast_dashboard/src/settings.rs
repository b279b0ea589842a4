//! Dashboard configuration: an optional TOML file plus environment overrides.
//!
//! ```toml
//! [service]
//! base_url = "http://localhost:8001"
//! timeout_secs = 300
//!
//! [defaults]
//! symbol = "AAPL"
//! period = "5y"
//! prediction_days = 30
//!
//! [chart.palette]
//! actual = "#3b82f6"
//! prediction = "#ef4444"
//! ```
//!
//! Every table and key is optional; unknown keys are rejected.

use std::path::Path;

use anyhow::{Context, bail};
use forecast_client::{
    config::ServiceConfig,
    models::{
        catalog::normalize_symbol,
        horizon::{HistoryPeriod, PredictionDays},
        prediction::PredictionRequest,
    },
};
use serde::{Deserialize, Serialize};

use crate::chart::ChartStyle;

/// Top-level config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Where the forecast service lives.
    pub service: ServiceConfig,
    /// Selection used when the CLI is not told otherwise.
    pub defaults: FetchDefaults,
    /// Chart canvas and colours.
    pub chart: ChartStyle,
}

impl DashboardConfig {
    /// Applies `FORECAST_API_URL` on top of the file values.
    pub fn with_env_overrides(mut self) -> Self {
        self.service = self.service.with_env_overrides();
        self
    }
}

/// Initial instrument and horizon selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchDefaults {
    /// Instrument symbol.
    pub symbol: String,
    /// History window the model trains on.
    pub period: HistoryPeriod,
    /// Forecast horizon in days.
    pub prediction_days: PredictionDays,
}

impl Default for FetchDefaults {
    fn default() -> Self {
        Self {
            symbol: "AAPL".to_string(),
            period: HistoryPeriod::default(),
            prediction_days: PredictionDays::default(),
        }
    }
}

impl FetchDefaults {
    /// A request built from these defaults, with any supplied field taking precedence.
    pub fn request(
        &self,
        symbol: Option<&str>,
        period: Option<HistoryPeriod>,
        prediction_days: Option<PredictionDays>,
    ) -> PredictionRequest {
        PredictionRequest::new(
            symbol.unwrap_or(&self.symbol),
            period.unwrap_or(self.period),
            prediction_days.unwrap_or(self.prediction_days),
        )
    }
}

/// Parse a config from a TOML string.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<DashboardConfig> {
    let mut cfg: DashboardConfig = toml::from_str(toml_str).context("failed to parse dashboard config TOML")?;
    cfg.defaults.symbol = normalize_symbol(&cfg.defaults.symbol);
    if cfg.defaults.symbol.is_empty() {
        bail!("defaults.symbol must not be blank");
    }
    if cfg.chart.layout.width <= 0.0 || cfg.chart.layout.height <= 0.0 {
        bail!("chart.layout width and height must be positive");
    }
    if cfg.chart.layout.plot_height > cfg.chart.layout.height {
        bail!(
            "chart.layout.plot_height ({}) exceeds height ({})",
            cfg.chart.layout.plot_height,
            cfg.chart.layout.height
        );
    }
    Ok(cfg)
}

/// Read a config file from disk and parse it. See [`load_config_str`].
pub fn load_config_path(path: impl AsRef<Path>) -> anyhow::Result<DashboardConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read config file {}", path.as_ref().display()))?;
    load_config_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = load_config_str("").unwrap();
        assert_eq!(cfg, DashboardConfig::default());
        assert_eq!(cfg.service.base_url, "http://localhost:8001");
        let req = cfg.defaults.request(None, None, None);
        assert_eq!(req.symbol, "AAPL");
        assert_eq!(req.period, HistoryPeriod::FiveYears);
        assert_eq!(req.prediction_days.get(), 30);
        assert_eq!(cfg.chart.layout.width, 800.0);
    }

    #[test]
    fn supplied_fields_override_defaults() {
        let defaults = FetchDefaults::default();
        let req = defaults.request(Some(" msft "), None, PredictionDays::new(60));
        assert_eq!(req.symbol, "MSFT");
        assert_eq!(req.period, HistoryPeriod::FiveYears);
        assert_eq!(req.prediction_days.get(), 60);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let cfg = load_config_str(
            r##"
            [service]
            base_url = "https://forecast.example"

            [defaults]
            symbol = " msft "
            prediction_days = 7

            [chart.palette]
            prediction = "#000000"
            "##,
        )
        .unwrap();

        assert_eq!(cfg.service.base_url, "https://forecast.example");
        assert_eq!(cfg.service.api_prefix, "api");
        assert_eq!(cfg.defaults.symbol, "MSFT");
        assert_eq!(cfg.defaults.period, HistoryPeriod::FiveYears);
        assert_eq!(cfg.defaults.prediction_days.get(), 7);
        assert_eq!(cfg.chart.palette.prediction, "#000000");
        assert_eq!(cfg.chart.palette.actual, "#3b82f6");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = load_config_str("[defaults]\nsymbl = \"AAPL\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("symbl"));
    }

    #[test]
    fn zero_horizon_is_rejected() {
        assert!(load_config_str("[defaults]\nprediction_days = 0\n").is_err());
    }

    #[test]
    fn blank_symbol_is_rejected() {
        let err = load_config_str("[defaults]\nsymbol = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("blank"));
    }

    #[test]
    fn oversized_plot_band_is_rejected() {
        assert!(load_config_str("[chart.layout]\nheight = 100.0\nplot_height = 180.0\n").is_err());
    }

    #[test]
    fn loads_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[defaults]\nsymbol = \"tsla\"\nperiod = \"1y\"").unwrap();

        let cfg = load_config_path(file.path()).unwrap();
        assert_eq!(cfg.defaults.symbol, "TSLA");
        assert_eq!(cfg.defaults.period, HistoryPeriod::OneYear);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_config_path("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
