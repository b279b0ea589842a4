//! Card and insight figures derived from one analysis + forecast pair.
//!
//! Built only from the functions in [`crate::metrics`]. A figure whose ratio
//! is undefined, or whose input is missing, is `None` and renders as `N/A`;
//! the rest of the figures are unaffected.

use forecast_client::models::{
    analysis::{AnalysisSnapshot, Recommendation},
    prediction::PredictionResult,
};
use serde::Serialize;
use tracing::debug;

use crate::metrics::{
    DivisionUndefined, ExpectedChange, expected_change, percent_change, price_delta,
    recommendation_from_moving_average, recommendation_from_rsi, volume_in_millions,
};

/// Placeholder for a figure that could not be computed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Colour class of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Rising, or a buy.
    Favorable,
    /// Falling, or a sell.
    Unfavorable,
    /// A hold.
    Neutral,
}

impl Tone {
    /// Non-negative deltas are favorable.
    pub fn from_delta(delta: f64) -> Self {
        if delta >= 0.0 {
            Tone::Favorable
        } else {
            Tone::Unfavorable
        }
    }

    /// BUY favorable, SELL unfavorable, HOLD neutral.
    pub fn from_recommendation(recommendation: Recommendation) -> Self {
        match recommendation {
            Recommendation::Buy => Tone::Favorable,
            Recommendation::Sell => Tone::Unfavorable,
            Recommendation::Hold => Tone::Neutral,
        }
    }

    /// Hex colour used when drawing the figure.
    pub const fn color(self) -> &'static str {
        match self {
            Tone::Favorable => "#16a34a",
            Tone::Unfavorable => "#dc2626",
            Tone::Neutral => "#ca8a04",
        }
    }
}

/// A value with its signed day-over-day change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceCard {
    /// Headline value.
    pub value: f64,
    /// Signed change.
    pub change: f64,
    /// Tone of `change`.
    pub tone: Tone,
}

/// A technical indicator and the signal it implies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorCard {
    /// Display name, e.g. `RSI (14)`.
    pub name: &'static str,
    /// Indicator value.
    pub value: f64,
    /// Signal derived from the value.
    pub signal: Recommendation,
    /// Tone of `signal`.
    pub tone: Tone,
}

impl IndicatorCard {
    fn new(name: &'static str, value: f64, signal: Recommendation) -> Self {
        Self {
            name,
            value,
            signal,
            tone: Tone::from_recommendation(signal),
        }
    }
}

/// The "Current Analysis" row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisCards {
    /// Instrument the snapshot describes.
    pub symbol: String,
    /// Current price and its change.
    pub current_price: PriceCard,
    /// Change percent and its tone.
    pub change_percent: PriceCard,
    /// Traded volume in millions.
    pub volume_millions: f64,
    /// The service's overall call.
    pub recommendation: Recommendation,
    /// Tone of `recommendation`.
    pub recommendation_tone: Tone,
    /// RSI (14), MA (10), MA (50), in that order.
    pub indicators: Vec<IndicatorCard>,
}

/// The "Model Performance" row, as reported by the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelPerformance {
    /// Percent, shown with one decimal.
    pub accuracy: f64,
    /// Mean absolute error.
    pub mae: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// Mean squared error.
    pub mse: f64,
}

/// The "Key Insights" block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyInsights {
    /// Number of forecast points.
    pub horizon: usize,
    /// Last forecast value.
    pub final_predicted_price: Option<f64>,
    /// Current price as seen by the model.
    pub current_price: f64,
    /// Final predicted price minus current price.
    pub predicted_delta: Option<f64>,
    /// Percent move from the current price to the final predicted price.
    pub expected_change: Option<ExpectedChange>,
    /// Last observed close minus first observed close.
    pub observed_delta: Option<f64>,
    /// Percent move across the observed window.
    pub observed_change_percent: Option<f64>,
}

/// Everything the cards and insights display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayMetrics {
    /// Current analysis cards.
    pub analysis: AnalysisCards,
    /// Back-test quality.
    pub performance: ModelPerformance,
    /// Forecast summary.
    pub insights: KeyInsights,
}

impl DisplayMetrics {
    /// Derives every display figure from one fetch.
    pub fn derive(analysis: &AnalysisSnapshot, prediction: &PredictionResult) -> Self {
        Self {
            analysis: analysis_cards(analysis),
            performance: ModelPerformance {
                accuracy: prediction.metrics.accuracy,
                mae: prediction.metrics.mae,
                rmse: prediction.metrics.rmse,
                mse: prediction.metrics.mse,
            },
            insights: key_insights(prediction),
        }
    }
}

fn analysis_cards(a: &AnalysisSnapshot) -> AnalysisCards {
    let ma = &a.moving_averages;
    AnalysisCards {
        symbol: a.symbol.clone(),
        current_price: PriceCard {
            value: a.current_price,
            change: a.change,
            tone: Tone::from_delta(a.change),
        },
        change_percent: PriceCard {
            value: a.change_percent,
            change: a.change_percent,
            tone: Tone::from_delta(a.change_percent),
        },
        volume_millions: volume_in_millions(a.volume),
        recommendation: a.recommendation,
        recommendation_tone: Tone::from_recommendation(a.recommendation),
        indicators: vec![
            IndicatorCard::new("RSI (14)", a.rsi, recommendation_from_rsi(a.rsi)),
            IndicatorCard::new(
                "MA (10)",
                ma.ma_10,
                recommendation_from_moving_average(a.current_price, ma.ma_10),
            ),
            IndicatorCard::new(
                "MA (50)",
                ma.ma_50,
                recommendation_from_moving_average(a.current_price, ma.ma_50),
            ),
        ],
    }
}

fn key_insights(p: &PredictionResult) -> KeyInsights {
    let current = p.indicators.current_price;
    let last_prediction = p.last_prediction();

    let expected = last_prediction.and_then(|last| degrade("expected_change", expected_change(last, current)));
    let observed = p.first_actual().zip(p.last_actual());

    KeyInsights {
        horizon: p.horizon(),
        final_predicted_price: last_prediction,
        current_price: current,
        predicted_delta: last_prediction.map(|last| price_delta(last, current)),
        expected_change: expected,
        observed_delta: observed.map(|(first, last)| price_delta(last, first)),
        observed_change_percent: observed
            .and_then(|(first, last)| degrade("observed_change_percent", percent_change(last, first))),
    }
}

fn degrade<T>(metric: &'static str, result: Result<T, DivisionUndefined>) -> Option<T> {
    result
        .inspect_err(|err| debug!(metric, error = %err, "metric shown as {NOT_AVAILABLE}"))
        .ok()
}
