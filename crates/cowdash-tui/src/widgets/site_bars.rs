//! "Tickets Per Site" bar chart.

use crate::theme::Theme;
use cowdash_core::metrics::Count;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Paragraph, Widget},
};

/// Site labels are cut to this many characters under each bar.
const LABEL_CHARS: usize = 5;
const BAR_GAP: u16 = 1;
const MAX_BAR_WIDTH: u16 = 9;

pub struct SiteBars<'a> {
    counts: &'a [Count],
    theme: &'a Theme,
}

impl<'a> SiteBars<'a> {
    pub fn new(counts: &'a [Count], theme: &'a Theme) -> Self {
        Self { counts, theme }
    }
}

/// Widest bar that fits `n` bars into `width` columns, at least 1.
pub fn bar_width(width: u16, n: usize) -> u16 {
    if n == 0 {
        return MAX_BAR_WIDTH;
    }
    let n = n as u16;
    let gaps = BAR_GAP * n.saturating_sub(1);
    (width.saturating_sub(gaps) / n).clamp(1, MAX_BAR_WIDTH)
}

impl Widget for SiteBars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Tickets Per Site")
            .border_style(self.theme.border_unfocused);

        if self.counts.is_empty() {
            Paragraph::new("No data")
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::DIM))
                .block(block)
                .render(area, buf);
            return;
        }

        let width = bar_width(block.inner(area).width, self.counts.len());
        let bars: Vec<Bar> = self
            .counts
            .iter()
            .map(|c| {
                let label: String = c.label.chars().take(LABEL_CHARS).collect();
                let style = self.theme.site_style(&c.label);
                Bar::default()
                    .value(c.value as u64)
                    .label(Line::from(label))
                    .style(style)
                    .value_style(style.add_modifier(Modifier::REVERSED))
            })
            .collect();

        BarChart::default()
            .block(block)
            .bar_width(width)
            .bar_gap(BAR_GAP)
            .data(BarGroup::default().bars(&bars))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_share_the_width() {
        assert_eq!(bar_width(30, 3), 9);
        assert_eq!(bar_width(20, 4), 4);
        assert_eq!(bar_width(5, 10), 1);
        assert_eq!(bar_width(40, 0), MAX_BAR_WIDTH);
    }
}
