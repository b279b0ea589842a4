//! Line-chart geometry for a [`DrawableSequence`].
//!
//! Points are spaced evenly by index, not by calendar date, and both groups
//! share one vertical scale. The output is plain data ([`ChartGeometry`]) so it
//! can be serialised as JSON or handed to [`crate::svg`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{range::ValueRange, series::DrawableSequence};

/// Rendering was asked for a sequence with no points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChartError {
    /// Neither series had any points.
    #[error("cannot chart an empty sequence")]
    EmptySequence,
}

/// Canvas dimensions in screen units (y grows downward).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartLayout {
    /// Horizontal extent; the last point sits at `x == width`.
    pub width: f64,
    /// Vertical extent; the minimum value sits at `y == height`.
    pub height: f64,
    /// Vertical span used by the data; the maximum sits at `height - plot_height`.
    pub plot_height: f64,
    /// Line width of segments.
    pub stroke_width: f64,
    /// Radius of point markers.
    pub marker_radius: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 200.0,
            plot_height: 180.0,
            stroke_width: 2.0,
            marker_radius: 3.0,
        }
    }
}

impl ChartLayout {
    /// Screen y of the smallest value.
    pub fn baseline(&self) -> f64 {
        self.height
    }

    /// Screen y of the largest value.
    pub fn ceiling(&self) -> f64 {
        self.height - self.plot_height
    }

    /// Screen x of point `index` out of `len`. A lone point sits at 0.
    pub fn x_at(&self, index: usize, len: usize) -> f64 {
        if len <= 1 {
            return 0.0;
        }
        index as f64 / (len - 1) as f64 * self.width
    }
}

/// Colours for the two point groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    /// Observed points and segments leaving them.
    pub actual: String,
    /// Forecast points and segments leaving them.
    pub prediction: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            actual: "#3b82f6".to_string(),
            prediction: "#ef4444".to_string(),
        }
    }
}

impl Palette {
    /// Colour for a point (or a segment leaving that point).
    pub fn color_for(&self, is_prediction: bool) -> &str {
        if is_prediction {
            &self.prediction
        } else {
            &self.actual
        }
    }
}

/// The `[chart]` table of the dashboard config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartStyle {
    /// Canvas dimensions.
    pub layout: ChartLayout,
    /// Group colours.
    pub palette: Palette,
}

/// A position on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenPoint {
    /// Horizontal position, `0..=width`.
    pub x: f64,
    /// Vertical position, `height - plot_height..=height`.
    pub y: f64,
}

/// Line between two consecutive points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    /// Index of the origin point.
    pub index: usize,
    /// Origin point.
    pub from: ScreenPoint,
    /// Next point.
    pub to: ScreenPoint,
    /// Tag of the origin point; decides the colour.
    pub is_prediction: bool,
    /// Stroke colour.
    pub color: String,
}

/// Dot drawn at each point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Where the dot is drawn.
    pub at: ScreenPoint,
    /// Underlying price.
    pub value: f64,
    /// Date of the price.
    pub date: String,
    /// Tag of this point.
    pub is_prediction: bool,
    /// Fill colour.
    pub color: String,
}

/// Axis annotation for one end of the value range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabel {
    /// Annotated value.
    pub value: f64,
    /// Screen y of that value.
    pub y: f64,
    /// `$0.00`-style text.
    pub text: String,
}

impl AxisLabel {
    fn new(value: f64, y: f64) -> Self {
        Self {
            value,
            y,
            text: format_price(value),
        }
    }
}

/// Everything needed to draw the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartGeometry {
    /// Heading shown above the chart.
    pub title: String,
    /// Canvas used for the coordinates below.
    pub layout: ChartLayout,
    /// Colours used for the segments and markers below.
    pub palette: Palette,
    /// Shared range of both groups.
    pub range: ValueRange,
    /// `len - 1` segments, in point order.
    pub segments: Vec<Segment>,
    /// One marker per point, in point order.
    pub markers: Vec<Marker>,
    /// Index of the segment joining the last observed point to the first forecast point.
    pub transition: Option<usize>,
    /// Label for the smallest value.
    pub min_label: AxisLabel,
    /// Label for the largest value.
    pub max_label: AxisLabel,
}

impl ChartGeometry {
    /// Segments that start on an observed point and end on a forecast point.
    pub fn transition_segments(&self) -> impl Iterator<Item = &Segment> {
        self.transition.and_then(|i| self.segments.get(i)).into_iter()
    }
}

/// Lays out `sequence` on the canvas described by `style`.
pub fn render_chart(
    sequence: &DrawableSequence,
    title: &str,
    style: &ChartStyle,
) -> Result<ChartGeometry, ChartError> {
    let range = sequence.range().ok_or(ChartError::EmptySequence)?;
    let layout = &style.layout;
    let palette = &style.palette;
    let len = sequence.len();

    let markers: Vec<Marker> = sequence
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| Marker {
            at: ScreenPoint {
                x: layout.x_at(i, len),
                y: range.map(p.value, layout.baseline(), layout.ceiling()),
            },
            value: p.value,
            date: p.date.clone(),
            is_prediction: p.is_prediction,
            color: palette.color_for(p.is_prediction).to_string(),
        })
        .collect();

    let segments = markers
        .windows(2)
        .enumerate()
        .map(|(index, pair)| Segment {
            index,
            from: pair[0].at,
            to: pair[1].at,
            is_prediction: pair[0].is_prediction,
            color: palette.color_for(pair[0].is_prediction).to_string(),
        })
        .collect();

    Ok(ChartGeometry {
        title: title.to_string(),
        layout: layout.clone(),
        palette: palette.clone(),
        min_label: AxisLabel::new(range.min, range.map(range.min, layout.baseline(), layout.ceiling())),
        max_label: AxisLabel::new(range.max, range.map(range.max, layout.baseline(), layout.ceiling())),
        range,
        segments,
        markers,
        transition: sequence.transition_index(),
    })
}

/// `$1234.50`
pub fn format_price(value: f64) -> String {
    format!("${value:.2}")
}
