//! Chart geometry: the SVG layout of the site bar chart, the status pie and
//! the daily trend line.
//!
//! Each builder turns reducer output into plain geometry (rects, slice paths,
//! points) and can render itself as a standalone SVG document. The terminal
//! dashboard draws its own widgets; these layouts feed the export.

use crate::metrics::{Count, StatusCount};
use std::f64::consts::PI;
use std::fmt::Write as _;

const BAR_CHART_HEIGHT: f64 = 180.0;
const BAR_FILL: &str = "#7d2cff";
const BAR_LABEL_CHARS: usize = 5;

const PIE_CENTER: f64 = 60.0;
const PIE_RADIUS: f64 = 50.0;
const PIE_SIZE: f64 = 140.0;

const LINE_WIDTH: f64 = 320.0;
const LINE_HEIGHT: f64 = 180.0;
const LINE_PADDING: f64 = 25.0;
const GRID_RATIOS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub bars: Vec<Bar>,
    pub width: f64,
    pub height: f64,
}

impl BarChart {
    pub fn layout(data: &[Count]) -> Self {
        let n = data.len() as f64;
        if data.is_empty() {
            return Self { bars: Vec::new(), width: 0.0, height: BAR_CHART_HEIGHT };
        }

        let max = data.iter().map(|c| c.value).max().unwrap_or(0).max(1) as f64;
        let bar_width = (250.0 / n).floor().max(20.0);
        let spacing = ((280.0 - bar_width * n) / (n + 1.0)).floor().max(4.0);

        let bars = data
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let height = c.value as f64 / max * (BAR_CHART_HEIGHT - 30.0);
                Bar {
                    label: c.label.chars().take(BAR_LABEL_CHARS).collect(),
                    value: c.value,
                    x: spacing + i as f64 * (bar_width + spacing),
                    y: BAR_CHART_HEIGHT - height - 20.0,
                    width: bar_width,
                    height,
                }
            })
            .collect();

        Self {
            bars,
            width: spacing + n * (bar_width + spacing),
            height: BAR_CHART_HEIGHT,
        }
    }

    pub fn to_svg(&self) -> String {
        if self.bars.is_empty() {
            return no_data_svg(LINE_WIDTH, BAR_CHART_HEIGHT);
        }
        let mut body = String::new();
        for bar in &self.bars {
            let _ = write!(
                body,
                r#"<g><rect x="{}" y="{}" width="{}" height="{}" fill="{BAR_FILL}" rx="2"/><text x="{}" y="{}" text-anchor="middle" font-size="10">{}</text></g>"#,
                fmt_num(bar.x),
                fmt_num(bar.y),
                fmt_num(bar.width),
                fmt_num(bar.height),
                fmt_num(bar.x + bar.width / 2.0),
                fmt_num(self.height - 5.0),
                escape(&bar.label),
            );
        }
        svg_document(self.width, self.height, &body)
    }
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: usize,
    pub color: &'static str,
    pub start_angle: f64,
    pub end_angle: f64,
    /// `M cx cy L x1 y1 A r r 0 large 1 x2 y2 Z`.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub slices: Vec<Slice>,
}

impl PieChart {
    pub fn layout(data: &[StatusCount]) -> Self {
        let total: usize = data.iter().map(|s| s.value).sum();
        if total == 0 {
            return Self { slices: Vec::new() };
        }

        let mut angle = -PI / 2.0;
        let slices = data
            .iter()
            .map(|s| {
                let sweep = s.value as f64 / total as f64 * 2.0 * PI;
                let start = angle;
                let end = angle + sweep;
                angle = end;

                let (x1, y1) = point_on_circle(start);
                let (x2, y2) = point_on_circle(end);
                let large_arc = u8::from(sweep > PI);
                let path = format!(
                    "M {c} {c} L {} {} A {r} {r} 0 {large_arc} 1 {} {} Z",
                    fmt_num(x1),
                    fmt_num(y1),
                    fmt_num(x2),
                    fmt_num(y2),
                    c = fmt_num(PIE_CENTER),
                    r = fmt_num(PIE_RADIUS),
                );

                Slice {
                    label: s.label.clone(),
                    value: s.value,
                    color: s.color,
                    start_angle: start,
                    end_angle: end,
                    path,
                }
            })
            .collect();

        Self { slices }
    }

    pub fn to_svg(&self) -> String {
        if self.slices.is_empty() {
            return no_data_svg(PIE_SIZE, PIE_SIZE);
        }
        let mut body = String::new();
        // An arc whose endpoints coincide draws nothing; a lone status is a full disc.
        if let [slice] = self.slices.as_slice() {
            let _ = write!(
                body,
                r#"<circle cx="{c}" cy="{c}" r="{r}" fill="{}" stroke="white" stroke-width="2"><title>{}: {}</title></circle>"#,
                slice.color,
                escape(&slice.label),
                slice.value,
                c = fmt_num(PIE_CENTER),
                r = fmt_num(PIE_RADIUS),
            );
            return svg_document(PIE_SIZE, PIE_SIZE, &body);
        }
        for slice in &self.slices {
            let _ = write!(
                body,
                r#"<path d="{}" fill="{}" stroke="white" stroke-width="2"><title>{}: {}</title></path>"#,
                slice.path,
                slice.color,
                escape(&slice.label),
                slice.value,
            );
        }
        svg_document(PIE_SIZE, PIE_SIZE, &body)
    }
}

fn point_on_circle(angle: f64) -> (f64, f64) {
    (
        PIE_CENTER + PIE_RADIUS * angle.cos(),
        PIE_CENTER + PIE_RADIUS * angle.sin(),
    )
}

// ---------------------------------------------------------------------------
// Line chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LinePoint {
    pub label: String,
    pub value: usize,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub points: Vec<LinePoint>,
    /// `M x y L x y …`; empty when there are no points.
    pub path: String,
    /// Y coordinates of the horizontal grid lines.
    pub grid: Vec<f64>,
}

impl LineChart {
    pub fn layout(data: &[Count]) -> Self {
        let inner_w = LINE_WIDTH - LINE_PADDING * 2.0;
        let inner_h = LINE_HEIGHT - LINE_PADDING * 2.0;
        let grid = GRID_RATIOS
            .iter()
            .map(|r| LINE_PADDING + r * inner_h)
            .collect();

        let max = data.iter().map(|c| c.value).max().unwrap_or(0).max(1) as f64;
        let steps = data.len().saturating_sub(1).max(1) as f64;

        let points: Vec<LinePoint> = data
            .iter()
            .enumerate()
            .map(|(i, c)| LinePoint {
                label: c.label.clone(),
                value: c.value,
                x: LINE_PADDING + i as f64 / steps * inner_w,
                y: LINE_HEIGHT - LINE_PADDING - c.value as f64 / max * inner_h,
            })
            .collect();

        let path = points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let cmd = if i == 0 { 'M' } else { 'L' };
                format!("{cmd} {} {}", fmt_num(p.x), fmt_num(p.y))
            })
            .collect::<Vec<_>>()
            .join(" ");

        Self { points, path, grid }
    }

    pub fn to_svg(&self) -> String {
        if self.points.is_empty() {
            return no_data_svg(LINE_WIDTH, LINE_HEIGHT);
        }
        let left = fmt_num(LINE_PADDING);
        let right = fmt_num(LINE_WIDTH - LINE_PADDING);
        let bottom = fmt_num(LINE_HEIGHT - LINE_PADDING);

        let mut body = String::new();
        for y in &self.grid {
            let y = fmt_num(*y);
            let _ = write!(
                body,
                r##"<line x1="{left}" y1="{y}" x2="{right}" y2="{y}" stroke="#94a3b8" stroke-width="1"/>"##
            );
        }
        let _ = write!(
            body,
            r##"<path d="{}" stroke="{BAR_FILL}" stroke-width="2" fill="none"/>"##,
            self.path
        );
        for p in &self.points {
            let _ = write!(
                body,
                r#"<circle cx="{}" cy="{}" r="2.5" fill="{BAR_FILL}" stroke="white" stroke-width="1.5"><title>{}: {}</title></circle>"#,
                fmt_num(p.x),
                fmt_num(p.y),
                escape(&p.label),
                p.value,
            );
        }
        let _ = write!(
            body,
            r##"<line x1="{left}" y1="{left}" x2="{left}" y2="{bottom}" stroke="#333" stroke-width="1.5"/><line x1="{left}" y1="{bottom}" x2="{right}" y2="{bottom}" stroke="#333" stroke-width="1.5"/>"##
        );
        svg_document(LINE_WIDTH, LINE_HEIGHT, &body)
    }
}

// ---------------------------------------------------------------------------
// SVG helpers
// ---------------------------------------------------------------------------

/// Format a coordinate with at most three decimals and no trailing zeros.
fn fmt_num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn svg_document(width: f64, height: f64, body: &str) -> String {
    let (w, h) = (fmt_num(width), fmt_num(height));
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{body}</svg>"#
    )
}

fn no_data_svg(width: f64, height: f64) -> String {
    let body = format!(
        r#"<text x="{}" y="{}" text-anchor="middle" font-size="12">No data</text>"#,
        fmt_num(width / 2.0),
        fmt_num(height / 2.0)
    );
    svg_document(width, height, &body)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
