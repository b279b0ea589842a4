//! Plain-text rendering of a view for the terminal.

use std::fmt::Write;

use forecast_client::models::{catalog::Instrument, prediction::PredictionResult};

use crate::{
    chart::{ChartGeometry, format_price},
    display::NOT_AVAILABLE,
    view_state::ViewState,
};

const CARD_WIDTH: usize = 14;
const INSIGHT_WIDTH: usize = 30;

/// Cards, chart summary, model performance and key insights, one section each.
pub fn render_report(state: &ViewState, chart: &ChartGeometry) -> String {
    let mut out = String::new();
    let m = &state.metrics;
    let a = &m.analysis;

    let heading = match state.prediction.company_name() {
        Some(name) => format!("Current Analysis - {} ({name})", a.symbol),
        None => format!("Current Analysis - {}", a.symbol),
    };
    section(&mut out, &heading);
    row(
        &mut out,
        CARD_WIDTH,
        "Current Price",
        format!("{} ({})", format_price(a.current_price.value), signed(a.current_price.change)),
    );
    row(&mut out, CARD_WIDTH, "Change %", format!("{:.2}%", a.change_percent.value));
    row(&mut out, CARD_WIDTH, "Volume", format!("{:.2}M", a.volume_millions));
    row(&mut out, CARD_WIDTH, "Recommendation", a.recommendation.to_string());
    for card in &a.indicators {
        row(&mut out, CARD_WIDTH, card.name, format!("{:.2} {}", card.value, card.signal));
    }

    section(&mut out, &chart.title);
    let actual = state.sequence.actual_len();
    row(
        &mut out,
        CARD_WIDTH,
        "Points",
        format!(
            "{} ({actual} actual, {} predicted)",
            state.sequence.len(),
            state.sequence.len() - actual
        ),
    );
    row(
        &mut out,
        CARD_WIDTH,
        "Range",
        format!("{} - {}", chart.min_label.text, chart.max_label.text),
    );

    let p = &m.performance;
    section(&mut out, "Model Performance");
    row(&mut out, CARD_WIDTH, "Accuracy", format!("{:.1}%", p.accuracy));
    row(&mut out, CARD_WIDTH, "MAE", format!("{:.2}", p.mae));
    row(&mut out, CARD_WIDTH, "RMSE", format!("{:.2}", p.rmse));
    row(&mut out, CARD_WIDTH, "MSE", format!("{:.2}", p.mse));

    let i = &m.insights;
    section(&mut out, "Key Insights");
    row(
        &mut out,
        INSIGHT_WIDTH,
        &format!("Predicted Price (Next {} days)", i.horizon),
        or_na(i.final_predicted_price, format_price),
    );
    row(&mut out, INSIGHT_WIDTH, "Current Price", format_price(i.current_price));
    row(&mut out, INSIGHT_WIDTH, "Predicted Delta", or_na(i.predicted_delta, signed));
    row(
        &mut out,
        INSIGHT_WIDTH,
        "Expected Change",
        or_na(i.expected_change.map(|c| c.magnitude_percent), percent),
    );
    row(
        &mut out,
        INSIGHT_WIDTH,
        "Observed Change",
        match i.observed_delta {
            Some(delta) => format!("{} ({})", signed(delta), or_na(i.observed_change_percent, percent)),
            None => NOT_AVAILABLE.to_string(),
        },
    );

    out
}

/// One line per past forecast: time, symbol, horizon, final value, accuracy.
pub fn history_line(p: &PredictionResult) -> String {
    let when = p
        .timestamp
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{when}  {:<6} {:>3} days -> {}  accuracy {:.1}%",
        p.symbol,
        p.horizon(),
        or_na(p.last_prediction(), format_price),
        p.metrics.accuracy
    )
}

/// `AAPL   Apple Inc.`
pub fn catalog_line(instrument: &Instrument) -> String {
    format!("{:<6} {}", instrument.symbol, instrument.name)
}

fn section(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(title);
    out.push('\n');
}

fn row(out: &mut String, width: usize, label: &str, value: String) {
    let _ = writeln!(out, "  {label:<width$}  {value}");
}

fn signed(v: f64) -> String {
    format!("{v:+.2}")
}

fn percent(v: f64) -> String {
    format!("{v:+.2}%")
}

fn or_na(value: Option<f64>, fmt: fn(f64) -> String) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), fmt)
}
