//! Metric cards: the four headline numbers in a 2×2 grid.

use crate::theme::Theme;
use cowdash_core::metrics::Summary;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Paragraph, Widget},
};

/// Rows needed to draw the grid: two cards of three rows each.
pub const HEIGHT: u16 = 6;

pub struct MetricCards<'a> {
    summary: &'a Summary,
    theme: &'a Theme,
}

impl<'a> MetricCards<'a> {
    pub fn new(summary: &'a Summary, theme: &'a Theme) -> Self {
        Self { summary, theme }
    }

    fn cards(&self) -> [(&'static str, String, Style); 4] {
        let s = self.summary;
        [
            ("Total Tickets", s.total.to_string(), self.theme.card_total),
            ("Open", s.open.to_string(), self.theme.card_open),
            ("Resolved", s.resolved.to_string(), self.theme.card_resolved),
            ("SLA %", format!("{}%", s.sla_percent), self.theme.card_sla),
        ]
    }
}

impl Widget for MetricCards<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::vertical([Constraint::Length(3), Constraint::Length(3)]).split(area);
        let cells: Vec<Rect> = rows
            .iter()
            .flat_map(|row| {
                Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
                    .split(*row)
                    .to_vec()
            })
            .collect();

        for ((title, value, style), cell) in self.cards().into_iter().zip(cells) {
            let block = Block::bordered()
                .title(title)
                .border_style(self.theme.border_unfocused);
            Paragraph::new(Line::styled(value, style).centered())
                .block(block)
                .render(cell, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sla_card_carries_a_percent_sign() {
        let summary = Summary { total: 4, open: 1, resolved: 3, sla_percent: 75 };
        let theme = Theme::load_default();
        let cards = MetricCards::new(&summary, &theme).cards();
        let values: Vec<&str> = cards.iter().map(|(_, v, _)| v.as_str()).collect();
        assert_eq!(values, ["4", "1", "3", "75%"]);
    }
}
