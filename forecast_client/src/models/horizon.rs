//! Request knobs for a forecast: how much history the model trains on and
//! how many days ahead it predicts.

use std::{fmt, num::NonZeroU32, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HorizonError {
    #[error("Invalid history period: {0} (expected one of 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, max)")]
    InvalidPeriod(String),

    #[error("Invalid prediction days: {0} (expected a positive integer)")]
    InvalidDays(String),
}

/// Window of historical prices the service trains on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HistoryPeriod {
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[default]
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "10y")]
    TenYears,
    #[serde(rename = "max")]
    Max,
}

impl HistoryPeriod {
    pub const ALL: [HistoryPeriod; 8] = [
        HistoryPeriod::OneMonth,
        HistoryPeriod::ThreeMonths,
        HistoryPeriod::SixMonths,
        HistoryPeriod::OneYear,
        HistoryPeriod::TwoYears,
        HistoryPeriod::FiveYears,
        HistoryPeriod::TenYears,
        HistoryPeriod::Max,
    ];

    /// Wire spelling, identical to the serde representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            HistoryPeriod::OneMonth => "1mo",
            HistoryPeriod::ThreeMonths => "3mo",
            HistoryPeriod::SixMonths => "6mo",
            HistoryPeriod::OneYear => "1y",
            HistoryPeriod::TwoYears => "2y",
            HistoryPeriod::FiveYears => "5y",
            HistoryPeriod::TenYears => "10y",
            HistoryPeriod::Max => "max",
        }
    }
}

impl fmt::Display for HistoryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryPeriod {
    type Err = HorizonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        HistoryPeriod::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| HorizonError::InvalidPeriod(s.to_string()))
    }
}

/// Number of future trading days to forecast.
///
/// Any positive count is valid on the wire; the dashboard offers
/// [`PredictionDays::PRESETS`] as the usual choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionDays(NonZeroU32);

impl PredictionDays {
    pub const PRESETS: [u32; 4] = [7, 15, 30, 60];
    pub const DEFAULT: PredictionDays = PredictionDays(NonZeroU32::new(30).unwrap());

    /// `None` for zero.
    pub fn new(days: u32) -> Option<Self> {
        NonZeroU32::new(days).map(Self)
    }

    pub const fn get(self) -> u32 {
        self.0.get()
    }

    pub fn is_preset(self) -> bool {
        Self::PRESETS.contains(&self.get())
    }
}

impl Default for PredictionDays {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PredictionDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl FromStr for PredictionDays {
    type Err = HorizonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(PredictionDays::new)
            .ok_or_else(|| HorizonError::InvalidDays(s.to_string()))
    }
}
