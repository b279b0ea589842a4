//! Technical-analysis snapshot returned by the analyze endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::prediction::PayloadError;

/// Trading signal shown on recommendation badges and indicator cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

impl Recommendation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Buy => "BUY",
            Recommendation::Sell => "SELL",
            Recommendation::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverages {
    pub ma_10: f64,
    pub ma_50: f64,
    #[serde(default)]
    pub ma_200: Option<f64>,
}

/// Current-state snapshot for one instrument.
///
/// Replaces any previous snapshot wholesale; nothing is merged across requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    pub symbol: String,
    pub current_price: f64,
    /// Last close minus the close before it.
    pub change: f64,
    pub change_percent: f64,
    pub volume: f64,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub pe_ratio: Option<f64>,
    pub moving_averages: MovingAverages,
    pub rsi: f64,
    pub recommendation: Recommendation,
}

impl AnalysisSnapshot {
    pub fn validate(&self) -> Result<(), PayloadError> {
        if self.symbol.trim().is_empty() {
            return Err(PayloadError::BlankSymbol);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "symbol": "AAPL",
        "current_price": 189.84,
        "change": -1.2,
        "change_percent": -0.628,
        "volume": 51234500,
        "market_cap": 2950000000000.0,
        "pe_ratio": null,
        "moving_averages": {"ma_10": 187.5, "ma_50": 181.2, "ma_200": 176.9},
        "rsi": 61.3,
        "recommendation": "HOLD"
    }"#;

    #[test]
    fn decodes_service_payload() {
        let snap: AnalysisSnapshot = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(snap.symbol, "AAPL");
        assert_eq!(snap.volume, 51_234_500.0);
        assert_eq!(snap.recommendation, Recommendation::Hold);
        assert_eq!(snap.moving_averages.ma_200, Some(176.9));
        assert_eq!(snap.pe_ratio, None);
        assert!(snap.validate().is_ok());
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let json = r#"{"symbol":"TSLA","current_price":1.0,"change":0.0,"change_percent":0.0,
            "volume":0,"moving_averages":{"ma_10":1.0,"ma_50":1.0},"rsi":50.0,"recommendation":"BUY"}"#;
        let snap: AnalysisSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.market_cap, None);
        assert_eq!(snap.moving_averages.ma_200, None);
    }

    #[test]
    fn unknown_recommendation_is_a_decode_error() {
        let json = SAMPLE.replace("\"HOLD\"", "\"STRONG_BUY\"");
        assert!(serde_json::from_str::<AnalysisSnapshot>(&json).is_err());
    }

    #[test]
    fn recommendation_wire_names() {
        assert_eq!(serde_json::to_string(&Recommendation::Sell).unwrap(), "\"SELL\"");
        assert_eq!(Recommendation::Buy.to_string(), "BUY");
    }
}
