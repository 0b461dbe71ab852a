//! "Daily Trend" line chart: tickets opened per day.

use crate::theme::Theme;
use cowdash_core::metrics::Count;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols,
    widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph, Widget},
};

pub struct TrendLine<'a> {
    counts: &'a [Count],
    theme: &'a Theme,
}

impl<'a> TrendLine<'a> {
    pub fn new(counts: &'a [Count], theme: &'a Theme) -> Self {
        Self { counts, theme }
    }
}

/// `(x, y)` points with x = day index and y = tickets opened that day.
pub fn points(counts: &[Count]) -> Vec<(f64, f64)> {
    counts
        .iter()
        .enumerate()
        .map(|(i, c)| (i as f64, c.value as f64))
        .collect()
}

impl Widget for TrendLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Daily Trend")
            .border_style(self.theme.border_unfocused);

        if self.counts.is_empty() {
            Paragraph::new("No data")
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::DIM))
                .block(block)
                .render(area, buf);
            return;
        }

        let data = points(self.counts);
        let x_max = (self.counts.len().saturating_sub(1)).max(1) as f64;
        let y_max = self.counts.iter().map(|c| c.value).max().unwrap_or(0).max(1) as f64;

        let first = self.counts.first().map(|c| c.label.clone()).unwrap_or_default();
        let last = self.counts.last().map(|c| c.label.clone()).unwrap_or_default();

        let dataset = Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(self.theme.chart_trend)
            .data(&data);

        Chart::new(vec![dataset])
            .block(block)
            .x_axis(
                Axis::default()
                    .style(self.theme.chart_axis)
                    .bounds([0.0, x_max])
                    .labels(vec![first, last]),
            )
            .y_axis(
                Axis::default()
                    .style(self.theme.chart_axis)
                    .bounds([0.0, y_max])
                    .labels(vec!["0".to_string(), format!("{y_max}")]),
            )
            .render(area, buf);
    }
}
