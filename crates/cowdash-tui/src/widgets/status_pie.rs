//! "Status Distribution" panel.
//!
//! A terminal cell grid cannot draw a convincing pie, so the slices are laid
//! out as one stacked bar whose segment widths are proportional to the slice
//! angles, followed by a legend with counts and shares.

use crate::theme::Theme;
use cowdash_core::metrics::StatusCount;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

pub struct StatusPie<'a> {
    counts: &'a [StatusCount],
    theme: &'a Theme,
}

impl<'a> StatusPie<'a> {
    pub fn new(counts: &'a [StatusCount], theme: &'a Theme) -> Self {
        Self { counts, theme }
    }
}

/// Split `width` cells between `values` by largest remainder.
///
/// The widths always sum to `width` when any value is non-zero; ties go to
/// the earlier slice.
pub fn segment_widths(values: &[usize], width: u16) -> Vec<u16> {
    let total: usize = values.iter().sum();
    if total == 0 {
        return vec![0; values.len()];
    }
    let width = width as usize;
    let mut widths: Vec<usize> = values.iter().map(|v| v * width / total).collect();
    let mut order: Vec<usize> = (0..values.len()).collect();
    // Descending remainder, stable so earlier slices win ties.
    order.sort_by_key(|&i| std::cmp::Reverse(values[i] * width % total));

    let assigned: usize = widths.iter().sum();
    for &i in order.iter().take(width - assigned) {
        widths[i] += 1;
    }
    widths.into_iter().map(|w| w as u16).collect()
}

impl Widget for StatusPie<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Status Distribution")
            .border_style(self.theme.border_unfocused);

        if self.counts.is_empty() {
            Paragraph::new("No data")
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::DIM))
                .block(block)
                .render(area, buf);
            return;
        }

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let values: Vec<usize> = self.counts.iter().map(|c| c.value).collect();
        let total: usize = values.iter().sum();
        let widths = segment_widths(&values, inner.width);

        let bar: Vec<Span> = self
            .counts
            .iter()
            .zip(&widths)
            .map(|(c, &w)| Span::styled("█".repeat(w as usize), self.theme.status_style(c.class)))
            .collect();

        let mut lines = vec![Line::from(bar), Line::default()];
        lines.extend(self.counts.iter().map(|c| {
            let share = (c.value as f64 / total as f64 * 100.0).round() as u32;
            Line::from(vec![
                Span::styled("● ", self.theme.status_style(c.class)),
                Span::raw(format!("{:<10} {:>4}  {:>3}%", c.label, c.value, share)),
            ])
        }));

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_fill_the_bar() {
        assert_eq!(segment_widths(&[1, 1], 10), vec![5, 5]);
        assert_eq!(segment_widths(&[1, 1, 1], 10), vec![4, 3, 3]);
        assert_eq!(segment_widths(&[3, 1], 8), vec![6, 2]);
    }

    #[test]
    fn widths_sum_to_the_bar_width() {
        let widths = segment_widths(&[7, 2, 5, 1], 33);
        assert_eq!(widths.iter().sum::<u16>(), 33);
    }

    #[test]
    fn all_zero_values_draw_nothing() {
        assert_eq!(segment_widths(&[0, 0], 10), vec![0, 0]);
        assert!(segment_widths(&[], 10).is_empty());
    }
}
