//! Merging of the observed and forecast series into one drawable sequence.
//!
//! The merge only tags and concatenates. It never sorts: the forecast
//! service already returns both groups in date order and the actual group
//! always precedes the prediction group.

use std::fmt;

use forecast_client::models::prediction::PredictionResult;
use serde::Serialize;
use thiserror::Error;

use crate::range::ValueRange;

/// One value on the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    /// Closing (or predicted) price.
    pub value: f64,
    /// ISO date as sent by the service.
    pub date: String,
    /// `true` for model output, `false` for an observed close.
    pub is_prediction: bool,
}

/// Which half of the payload a series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesGroup {
    /// `actual_prices` / `dates`.
    Actual,
    /// `predictions` / `prediction_dates`.
    Prediction,
}

impl fmt::Display for SeriesGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SeriesGroup::Actual => "actual",
            SeriesGroup::Prediction => "prediction",
        })
    }
}

/// A value array and its date array differ in length.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed {group} series: {values} values but {dates} dates")]
pub struct MalformedSeries {
    /// The offending pair.
    pub group: SeriesGroup,
    /// Length of the value array.
    pub values: usize,
    /// Length of the date array.
    pub dates: usize,
}

/// Tagged, ordered points ready for range computation and rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrawableSequence {
    points: Vec<PricePoint>,
}

impl DrawableSequence {
    /// Merges the two series carried by a forecast payload.
    pub fn from_prediction(result: &PredictionResult) -> Result<Self, MalformedSeries> {
        merge_series(
            &result.actual_prices,
            &result.dates,
            &result.predictions,
            &result.prediction_dates,
        )
    }

    /// All points, actual group first.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Number of points in both groups.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when neither group had any points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of observed points at the front of the sequence.
    pub fn actual_len(&self) -> usize {
        self.points.iter().take_while(|p| !p.is_prediction).count()
    }

    /// Shared min/max over both groups.
    pub fn range(&self) -> Option<ValueRange> {
        ValueRange::of(self.points.iter().map(|p| p.value))
    }

    /// Index of the last observed point when a prediction follows it.
    ///
    /// The segment starting here is the one joining the two groups.
    pub fn transition_index(&self) -> Option<usize> {
        self.points
            .windows(2)
            .position(|w| !w[0].is_prediction && w[1].is_prediction)
    }
}

/// Tags `(actual_prices[i], dates[i])` as observed and
/// `(predictions[j], prediction_dates[j])` as predicted, then concatenates
/// them in input order.
pub fn merge_series<D: AsRef<str>>(
    actual_prices: &[f64],
    dates: &[D],
    predictions: &[f64],
    prediction_dates: &[D],
) -> Result<DrawableSequence, MalformedSeries> {
    check_pair(SeriesGroup::Actual, actual_prices, dates)?;
    check_pair(SeriesGroup::Prediction, predictions, prediction_dates)?;

    let mut points: Vec<PricePoint> = tag(actual_prices, dates, false).collect();
    points.extend(tag(predictions, prediction_dates, true));
    Ok(DrawableSequence { points })
}

fn tag<'a, D: AsRef<str>>(
    values: &'a [f64],
    dates: &'a [D],
    is_prediction: bool,
) -> impl Iterator<Item = PricePoint> + 'a {
    values.iter().zip(dates).map(move |(&value, date)| PricePoint {
        value,
        date: date.as_ref().to_string(),
        is_prediction,
    })
}

fn check_pair<D>(group: SeriesGroup, values: &[f64], dates: &[D]) -> Result<(), MalformedSeries> {
    if values.len() != dates.len() {
        return Err(MalformedSeries {
            group,
            values: values.len(),
            dates: dates.len(),
        });
    }
    Ok(())
}
