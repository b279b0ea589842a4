//! Forecast request and response payloads.
//!
//! A [`PredictionResult`] carries two parallel-array series: the recent
//! observed closes (`actual_prices` / `dates`) and the model output
//! (`predictions` / `prediction_dates`). [`PredictionResult::validate`]
//! checks the pairing before anything downstream trusts it.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    catalog::normalize_symbol,
    horizon::{HistoryPeriod, PredictionDays},
};

/// A payload decoded fine but is not usable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("`{values_field}` has {values} entries but `{dates_field}` has {dates}")]
    LengthMismatch {
        values_field: &'static str,
        dates_field: &'static str,
        values: usize,
        dates: usize,
    },

    #[error("payload has a blank `symbol`")]
    BlankSymbol,
}

/// Body of the predict call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub symbol: String,
    pub period: HistoryPeriod,
    pub prediction_days: PredictionDays,
}

impl PredictionRequest {
    pub fn new(symbol: &str, period: HistoryPeriod, prediction_days: PredictionDays) -> Self {
        Self {
            symbol: normalize_symbol(symbol),
            period,
            prediction_days,
        }
    }
}

/// Latest indicator values computed by the service while preparing the forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    pub current_price: f64,
    #[serde(default)]
    pub ma_10: Option<f64>,
    #[serde(default)]
    pub ma_50: Option<f64>,
    #[serde(default)]
    pub ma_200: Option<f64>,
    #[serde(default)]
    pub rsi: Option<f64>,
    #[serde(default)]
    pub macd: Option<f64>,
    #[serde(default)]
    pub bb_upper: Option<f64>,
    #[serde(default)]
    pub bb_lower: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
}

/// Back-test quality of the model on its held-out split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    /// Percentage, already clamped at zero by the service.
    pub accuracy: f64,
    pub mae: f64,
    pub rmse: f64,
    pub mse: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub pe_ratio: Option<f64>,
    #[serde(default)]
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(default)]
    pub id: Option<String>,
    pub symbol: String,
    pub dates: Vec<String>,
    pub actual_prices: Vec<f64>,
    pub prediction_dates: Vec<String>,
    pub predictions: Vec<f64>,
    pub indicators: Indicators,
    pub metrics: ModelMetrics,
    #[serde(default)]
    pub info: Option<CompanyInfo>,
    /// Server-side creation time (naive UTC).
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

impl PredictionResult {
    /// Checks that each value array is paired with a date array of the same length.
    pub fn validate(&self) -> Result<(), PayloadError> {
        if self.symbol.trim().is_empty() {
            return Err(PayloadError::BlankSymbol);
        }
        check_pair("actual_prices", &self.actual_prices, "dates", &self.dates)?;
        check_pair(
            "predictions",
            &self.predictions,
            "prediction_dates",
            &self.prediction_dates,
        )
    }

    /// Number of forecast points.
    pub fn horizon(&self) -> usize {
        self.predictions.len()
    }

    pub fn last_prediction(&self) -> Option<f64> {
        self.predictions.last().copied()
    }

    pub fn first_actual(&self) -> Option<f64> {
        self.actual_prices.first().copied()
    }

    pub fn last_actual(&self) -> Option<f64> {
        self.actual_prices.last().copied()
    }

    pub fn company_name(&self) -> Option<&str> {
        self.info.as_ref()?.company_name.as_deref()
    }
}

fn check_pair(
    values_field: &'static str,
    values: &[f64],
    dates_field: &'static str,
    dates: &[String],
) -> Result<(), PayloadError> {
    if values.len() != dates.len() {
        return Err(PayloadError::LengthMismatch {
            values_field,
            dates_field,
            values: values.len(),
            dates: dates.len(),
        });
    }
    Ok(())
}
