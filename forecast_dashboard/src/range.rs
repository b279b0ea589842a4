//! Linear mapping of series values into screen coordinates.
//!
//! A flat range (`max == min`, which includes every single-point series)
//! has no slope to interpolate along, so every value lands on the centre of
//! the output interval instead of dividing by zero.

use serde::{Deserialize, Serialize};

/// Fraction of the output interval used when the input range is flat.
pub const FLAT_RANGE_POSITION: f64 = 0.5;

/// Observed bounds of a set of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Smallest observed value.
    pub min: f64,
    /// Largest observed value.
    pub max: f64,
}

impl ValueRange {
    /// Min and max over `values`, or `None` when there are none.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| {
            Some(match acc {
                None => Self { min: v, max: v },
                Some(r) => Self {
                    min: r.min.min(v),
                    max: r.max.max(v),
                },
            })
        })
    }

    /// `true` when every value was the same.
    pub fn is_flat(&self) -> bool {
        self.max == self.min
    }

    /// Maps `value` into `[out_min, out_max]` against this range. See [`map`].
    pub fn map(&self, value: f64, out_min: f64, out_max: f64) -> f64 {
        map(value, self.min, self.max, out_min, out_max)
    }
}

/// Linearly interpolates `value` from `[min, max]` onto `[out_min, out_max]`.
///
/// `out_min` may be greater than `out_max`; that is how screen space with a
/// downward y axis is expressed. Values outside `[min, max]` extrapolate.
pub fn map(value: f64, min: f64, max: f64, out_min: f64, out_max: f64) -> f64 {
    if max == min {
        return out_min + FLAT_RANGE_POSITION * (out_max - out_min);
    }
    out_min + (value - min) / (max - min) * (out_max - out_min)
}
