//! Standalone SVG rendering of [`ChartGeometry`].

use std::fmt::{self, Write};

use crate::chart::ChartGeometry;

/// Extra vertical space under the plot for the axis labels and the legend.
const FOOTER_HEIGHT: f64 = 30.0;
const FONT: &str = "font-family=\"sans-serif\" font-size=\"12\"";

/// Serialises the chart as an SVG document.
pub fn render_svg(geometry: &ChartGeometry) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_svg(&mut out, geometry);
    out
}

fn write_svg(out: &mut String, geo: &ChartGeometry) -> fmt::Result {
    let width = geo.layout.width;
    let total_height = geo.layout.height + FOOTER_HEIGHT;
    let label_y = geo.layout.height + 18.0;

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{total_height}" viewBox="0 0 {width} {total_height}">"#
    )?;
    writeln!(out, "  <title>{}</title>", escape(&geo.title))?;

    for s in &geo.segments {
        writeln!(
            out,
            r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            s.from.x,
            s.from.y,
            s.to.x,
            s.to.y,
            escape(&s.color),
            geo.layout.stroke_width
        )?;
    }
    for m in &geo.markers {
        writeln!(
            out,
            r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            m.at.x,
            m.at.y,
            geo.layout.marker_radius,
            escape(&m.color)
        )?;
    }

    writeln!(
        out,
        r#"  <text x="0" y="{label_y}" {FONT}>{}</text>"#,
        escape(&geo.min_label.text)
    )?;
    writeln!(
        out,
        r#"  <text x="{width}" y="{label_y}" text-anchor="end" {FONT}>{}</text>"#,
        escape(&geo.max_label.text)
    )?;

    let legend_x = width / 2.0 - 80.0;
    for (offset, color, label) in [
        (0.0, &geo.palette.actual, "Actual"),
        (90.0, &geo.palette.prediction, "Predicted"),
    ] {
        let x = legend_x + offset;
        writeln!(
            out,
            r#"  <line x1="{x}" y1="{y}" x2="{x2}" y2="{y}" stroke="{c}" stroke-width="{w}"/>"#,
            y = label_y - 4.0,
            x2 = x + 16.0,
            c = escape(color),
            w = geo.layout.stroke_width
        )?;
        writeln!(
            out,
            r#"  <text x="{}" y="{label_y}" {FONT}>{label}</text>"#,
            x + 22.0
        )?;
    }

    writeln!(out, "</svg>")
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        chart::{ChartStyle, render_chart},
        series::merge_series,
    };

    #[test]
    fn document_contains_every_shape_and_the_legend() {
        let seq = merge_series(&[100.0, 102.0, 101.0], &["d1", "d2", "d3"], &[103.0, 105.0], &["d4", "d5"])
            .unwrap();
        let geo = render_chart(&seq, "AAPL Price Prediction", &ChartStyle::default()).unwrap();
        let svg = render_svg(&geo);

        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"800\" height=\"230\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(
            r##"<line x1="400" y1="164" x2="600" y2="92" stroke="#3b82f6" stroke-width="2"/>"##
        ));
        assert!(svg.contains(r##"<circle cx="800" cy="20" r="3" fill="#ef4444"/>"##));
        // 4 data segments + 2 legend swatches
        assert_eq!(svg.matches("<line ").count(), 6);
        assert_eq!(svg.matches("<circle ").count(), 5);
        assert!(svg.contains(">$100.00</text>"));
        assert!(svg.contains(">$105.00</text>"));
        assert!(svg.contains(">Actual</text>"));
        assert!(svg.contains(">Predicted</text>"));
    }

    #[test]
    fn title_is_escaped() {
        let seq = merge_series(&[1.0], &["d1"], &[], &[]).unwrap();
        let geo = render_chart(&seq, "S&P <500>", &ChartStyle::default()).unwrap();
        assert!(render_svg(&geo).contains("<title>S&amp;P &lt;500&gt;</title>"));
    }
}
