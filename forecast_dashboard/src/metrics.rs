//! Comparison figures shown next to the chart.
//!
//! Every function here is pure and can be called on its own. Ratios fail with
//! [`DivisionUndefined`] instead of producing `inf`/`NaN`; callers decide
//! how to display the gap.

use forecast_client::models::analysis::Recommendation;
use serde::Serialize;
use thiserror::Error;

/// RSI below this is oversold.
pub const RSI_OVERSOLD: f64 = 30.0;
/// RSI above this is overbought.
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// A ratio was requested against a zero reference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("division undefined: reference value is zero")]
pub struct DivisionUndefined;

/// Signed move from the current price to the last forecast point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpectedChange {
    /// Percent move relative to the current price; negative when falling.
    pub magnitude_percent: f64,
    /// `true` when the forecast ends above the current price.
    pub favorable: bool,
}

/// `current - previous`. Non-negative is favorable.
pub fn price_delta(current: f64, previous: f64) -> f64 {
    current - previous
}

/// `(current - previous) / previous * 100`.
pub fn percent_change(current: f64, previous: f64) -> Result<f64, DivisionUndefined> {
    if previous == 0.0 {
        return Err(DivisionUndefined);
    }
    Ok((current - previous) / previous * 100.0)
}

/// Display scaling only; no rounding.
pub fn volume_in_millions(volume: f64) -> f64 {
    volume / 1_000_000.0
}

/// Oversold is a buy, overbought a sell, anything between a hold.
pub fn recommendation_from_rsi(rsi: f64) -> Recommendation {
    if rsi < RSI_OVERSOLD {
        Recommendation::Buy
    } else if rsi > RSI_OVERBOUGHT {
        Recommendation::Sell
    } else {
        Recommendation::Hold
    }
}

/// Price above the average is a buy, anything else a sell. There is no hold.
pub fn recommendation_from_moving_average(current_price: f64, ma: f64) -> Recommendation {
    if current_price > ma {
        Recommendation::Buy
    } else {
        Recommendation::Sell
    }
}

/// Percent move from `current_price` to `last_prediction`.
pub fn expected_change(
    last_prediction: f64,
    current_price: f64,
) -> Result<ExpectedChange, DivisionUndefined> {
    if current_price == 0.0 {
        return Err(DivisionUndefined);
    }
    Ok(ExpectedChange {
        magnitude_percent: (last_prediction - current_price) / current_price * 100.0,
        favorable: last_prediction > current_price,
    })
}
