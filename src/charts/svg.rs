//! SVG chart primitives
//!
//! Builds the two chart views as SVG fragments: a category proportion pie
//! and a monthly line chart. Both the static image and the dashboard are
//! assembled from these fragments.

use std::f64::consts::PI;
use std::fmt::Write;

use crate::display::report::format_amount;
use crate::services::{CategoryTotals, MonthlyTotals};

/// Slice colours, reused in order when there are more categories
pub const PALETTE: [&str; 5] = ["#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7"];

/// Line and area colour of the monthly chart
pub const LINE_COLOR: &str = "#4ECDC4";

/// Rendering options shared by both views
#[derive(Debug, Clone)]
pub struct ChartStyle {
    /// Currency symbol for labels
    pub currency: String,
    /// Draw a donut instead of a full pie
    pub donut: bool,
    /// Attach `data-tip` attributes for the dashboard script
    pub interactive: bool,
}

impl ChartStyle {
    pub fn static_image(currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
            donut: false,
            interactive: false,
        }
    }

    pub fn dashboard(currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
            donut: true,
            interactive: true,
        }
    }

    /// Hover text: a native `<title>` always, plus `data-tip` when interactive
    fn tooltip(&self, text: &str) -> (String, String) {
        let attr = if self.interactive {
            format!(r#" data-tip="{}""#, escape(text))
        } else {
            String::new()
        };
        (attr, format!("<title>{}</title>", escape(text)))
    }
}

/// A rectangle in SVG user units
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Escape text for use in XML content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Point on a circle, angle measured clockwise from 12 o'clock
fn polar(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.sin(), cy - r * angle.cos())
}

fn title(frame: Frame, text: &str) -> String {
    format!(
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="18" font-weight="bold">{}</text>"#,
        frame.x + frame.width / 2.0,
        frame.y + 22.0,
        escape(text)
    )
}

fn empty_message(frame: Frame) -> String {
    format!(
        r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="14" fill="#888">No data to display</text>"##,
        frame.x + frame.width / 2.0,
        frame.y + frame.height / 2.0
    )
}

/// Category proportion chart
///
/// Only categories with a positive total can be drawn as slices; others are
/// left out of the pie.
pub fn pie_chart(categories: &CategoryTotals, frame: Frame, style: &ChartStyle) -> String {
    let mut svg = String::new();
    svg.push_str(&title(frame, "Spending by Category"));

    let slices: Vec<_> = categories
        .iter()
        .filter(|e| e.total.is_positive())
        .collect();
    let sum: f64 = slices.iter().map(|e| e.total.as_f64()).sum();
    if slices.is_empty() || sum <= 0.0 {
        svg.push_str(&empty_message(frame));
        return svg;
    }

    let cx = frame.x + frame.width / 2.0;
    let cy = frame.y + 40.0 + (frame.height - 40.0) / 2.0;
    let r = (frame.width.min(frame.height - 40.0) / 2.0) * 0.62;

    let mut angle = 0.0;
    for (idx, entry) in slices.iter().enumerate() {
        let share = entry.total.as_f64() / sum;
        let sweep = share * 2.0 * PI;
        let color = PALETTE[idx % PALETTE.len()];
        let tip = format!(
            "{}: {} ({:.1}%)",
            entry.category,
            format_amount(entry.total.as_f64(), &style.currency),
            share * 100.0
        );
        let (tip_attr, tip_title) = style.tooltip(&tip);

        if slices.len() == 1 {
            let _ = write!(
                svg,
                r#"<circle class="slice" cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fill="{color}" stroke="white" stroke-width="2"{tip_attr}>{tip_title}</circle>"#
            );
        } else {
            let (x0, y0) = polar(cx, cy, r, angle);
            let (x1, y1) = polar(cx, cy, r, angle + sweep);
            let large_arc = u8::from(sweep > PI);
            let _ = write!(
                svg,
                r#"<path class="slice" d="M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {r:.2} {r:.2} 0 {large_arc} 1 {x1:.2} {y1:.2} Z" fill="{color}" stroke="white" stroke-width="2"{tip_attr}>{tip_title}</path>"#
            );
        }

        // Percentage inside the slice, category name outside
        let mid = angle + sweep / 2.0;
        let inner_r = if style.donut { r * 0.8 } else { r * 0.65 };
        let (px, py) = polar(cx, cy, inner_r, mid);
        let _ = write!(
            svg,
            r#"<text x="{px:.2}" y="{py:.2}" text-anchor="middle" dominant-baseline="middle" font-size="12">{:.1}%</text>"#,
            share * 100.0
        );
        let (lx, ly) = polar(cx, cy, r * 1.15, mid);
        let anchor = if mid.sin() >= 0.0 { "start" } else { "end" };
        let _ = write!(
            svg,
            r#"<text x="{lx:.2}" y="{ly:.2}" text-anchor="{anchor}" dominant-baseline="middle" font-size="13">{}</text>"#,
            escape(&entry.category)
        );

        angle += sweep;
    }

    if style.donut {
        let _ = write!(
            svg,
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{:.2}" fill="white"/>"#,
            r * 0.3
        );
    }

    svg
}

/// Round a span up to a 1/2/5 × 10ⁿ step for axis ticks
fn nice_step(span: f64, ticks: usize) -> f64 {
    let raw = span / ticks as f64;
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Monthly time-series chart with markers, filled area and value labels
pub fn line_chart(monthly: &MonthlyTotals, frame: Frame, style: &ChartStyle) -> String {
    let mut svg = String::new();
    svg.push_str(&title(frame, "Monthly Spending Trend"));

    if monthly.is_empty() {
        svg.push_str(&empty_message(frame));
        return svg;
    }

    let plot = Frame::new(
        frame.x + 70.0,
        frame.y + 50.0,
        frame.width - 90.0,
        frame.height - 130.0,
    );
    let points: Vec<(String, f64)> = monthly
        .iter()
        .map(|(month, total)| (month.to_string(), total.as_f64()))
        .collect();

    let max = points.iter().map(|p| p.1).fold(0.0_f64, f64::max);
    let min = points.iter().map(|p| p.1).fold(0.0_f64, f64::min);
    let step = nice_step((max - min).max(1.0), 5);
    let y_min = (min / step).floor() * step;
    let y_max = ((max / step).ceil() * step).max(y_min + step);

    let x_at = |idx: usize| {
        if points.len() == 1 {
            plot.x + plot.width / 2.0
        } else {
            plot.x + plot.width * idx as f64 / (points.len() - 1) as f64
        }
    };
    let y_at = |value: f64| plot.y + plot.height * (1.0 - (value - y_min) / (y_max - y_min));

    // Grid and y-axis labels
    let mut tick = y_min;
    while tick <= y_max + step / 2.0 {
        let y = y_at(tick);
        let _ = write!(
            svg,
            r##"<line x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="#ddd" stroke-width="1"/><text x="{:.2}" y="{y:.2}" text-anchor="end" dominant-baseline="middle" font-size="11">{}</text>"##,
            plot.x,
            plot.x + plot.width,
            plot.x - 8.0,
            escape(&format!("{}{:.0}", style.currency, tick))
        );
        tick += step;
    }

    // Axes
    let _ = write!(
        svg,
        r##"<line x1="{x:.2}" y1="{top:.2}" x2="{x:.2}" y2="{bottom:.2}" stroke="#333"/><line x1="{x:.2}" y1="{bottom:.2}" x2="{right:.2}" y2="{bottom:.2}" stroke="#333"/>"##,
        x = plot.x,
        top = plot.y,
        bottom = plot.y + plot.height,
        right = plot.x + plot.width
    );

    // Filled area down to zero (or the axis floor when everything is negative)
    let baseline = y_at(0.0_f64.clamp(y_min, y_max));
    let coords: Vec<String> = points
        .iter()
        .enumerate()
        .map(|(idx, (_, value))| format!("{:.2},{:.2}", x_at(idx), y_at(*value)))
        .collect();
    let _ = write!(
        svg,
        r#"<polygon points="{:.2},{baseline:.2} {} {:.2},{baseline:.2}" fill="{LINE_COLOR}" fill-opacity="0.3" stroke="none"/>"#,
        x_at(0),
        coords.join(" "),
        x_at(points.len() - 1)
    );
    let _ = write!(
        svg,
        r#"<polyline points="{}" fill="none" stroke="{LINE_COLOR}" stroke-width="3"/>"#,
        coords.join(" ")
    );

    // Markers, value labels, month labels
    for (idx, (month, value)) in points.iter().enumerate() {
        let (x, y) = (x_at(idx), y_at(*value));
        let amount = format_amount(*value, &style.currency);
        let (tip_attr, tip_title) = style.tooltip(&format!("{}: {}", month, amount));
        let _ = write!(
            svg,
            r#"<circle class="point" cx="{x:.2}" cy="{y:.2}" r="6" fill="{LINE_COLOR}" stroke="white" stroke-width="1.5"{tip_attr}>{tip_title}</circle>"#
        );
        let _ = write!(
            svg,
            r#"<text x="{x:.2}" y="{:.2}" text-anchor="middle" font-size="11">{}</text>"#,
            y - 12.0,
            escape(&format!("{}{:.0}", style.currency, value))
        );
        let label_y = plot.y + plot.height + 16.0;
        let _ = write!(
            svg,
            r#"<text x="{x:.2}" y="{label_y:.2}" text-anchor="end" font-size="11" transform="rotate(-45 {x:.2} {label_y:.2})">{}</text>"#,
            escape(month)
        );
    }

    // Axis titles
    let _ = write!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="13">Month</text>"#,
        plot.x + plot.width / 2.0,
        frame.y + frame.height - 8.0
    );
    let ay = plot.y + plot.height / 2.0;
    let ax = frame.x + 16.0;
    let _ = write!(
        svg,
        r#"<text x="{ax:.2}" y="{ay:.2}" text-anchor="middle" font-size="13" transform="rotate(-90 {ax:.2} {ay:.2})">{}</text>"#,
        escape(&format!("Amount ({})", style.currency))
    );

    svg
}

/// Standalone SVG document holding both views side by side
pub fn static_document(
    categories: &CategoryTotals,
    monthly: &MonthlyTotals,
    style: &ChartStyle,
) -> String {
    let (width, height) = (1500.0, 600.0);
    let half = width / 2.0;

    let mut svg = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="Arial, sans-serif">
<rect width="100%" height="100%" fill="white"/>
"#
    );
    svg.push_str(&pie_chart(
        categories,
        Frame::new(20.0, 20.0, half - 40.0, height - 40.0),
        style,
    ));
    svg.push('\n');
    svg.push_str(&line_chart(
        monthly,
        Frame::new(half + 20.0, 20.0, half - 40.0, height - 40.0),
        style,
    ));
    svg.push_str("\n</svg>\n");
    svg
}
