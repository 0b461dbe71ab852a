//! Ticket table: one page of the filtered ticket list.
//!
//! Cells are cut to fixed widths (site and type 8 characters, date and
//! status 5) so the table fits the footer strip. The block title carries the
//! `page/total` indicator.

use crate::theme::Theme;
use cowdash_core::search::{truncate, Page, NO_TICKETS_FOUND};
use cowdash_core::Ticket;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Cell, Paragraph, Row, Table, Widget},
};

const SITE_CHARS: usize = 8;
const TYPE_CHARS: usize = 8;
const DATE_CHARS: usize = 5;
const STATUS_CHARS: usize = 5;

const HEADERS: [&str; 6] = ["ID", "Site", "Type", "Date", "Status", "Aging"];

/// Rows the table needs for `page_size` tickets: borders plus the header row.
/// Saturates at `u16::MAX` for oversized configured page sizes.
pub fn height(page_size: usize) -> u16 {
    u16::try_from(page_size).unwrap_or(u16::MAX).saturating_add(3)
}

/// Display text of each cell of `ticket`, in [`HEADERS`] order.
pub fn cells(ticket: &Ticket) -> [String; 6] {
    [
        ticket.id.clone(),
        truncate(&ticket.site, SITE_CHARS),
        truncate(&ticket.issue_type, TYPE_CHARS),
        truncate(&ticket.open_date, DATE_CHARS),
        truncate(&ticket.status, STATUS_CHARS),
        format!("{}d", ticket.aging_days),
    ]
}

pub struct TicketTable<'a> {
    page: &'a Page<'a>,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> TicketTable<'a> {
    pub fn new(page: &'a Page<'a>, focused: bool, theme: &'a Theme) -> Self {
        Self { page, focused, theme }
    }

    fn title(&self) -> Line<'static> {
        let prev = if self.page.has_prev() { "◀ " } else { "  " };
        let next = if self.page.has_next() { " ▶" } else { "  " };
        Line::from(format!(" Tickets  {prev}{}{next} ", self.page.indicator()))
    }
}

impl Widget for TicketTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        let block = Block::bordered().title(self.title()).border_style(border_style);

        if self.page.is_empty() {
            Paragraph::new(NO_TICKETS_FOUND)
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::DIM))
                .block(block)
                .render(area, buf);
            return;
        }

        let rows: Vec<Row> = self
            .page
            .rows
            .iter()
            .map(|ticket| {
                let status_style = self.theme.status_style(ticket.status_class());
                let [id, site, kind, date, status, aging] = cells(ticket);
                Row::new(vec![
                    Cell::from(id),
                    Cell::from(site),
                    Cell::from(kind),
                    Cell::from(date),
                    Cell::from(status).style(status_style),
                    Cell::from(aging),
                ])
            })
            .collect();

        let widths = [
            Constraint::Min(8),
            Constraint::Length(SITE_CHARS as u16),
            Constraint::Length(TYPE_CHARS as u16),
            Constraint::Length(DATE_CHARS as u16),
            Constraint::Length(STATUS_CHARS as u16),
            Constraint::Length(6),
        ];

        Table::new(rows, widths)
            .header(Row::new(HEADERS).style(self.theme.table_header))
            .column_spacing(2)
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_cut_to_column_widths() {
        let ticket = Ticket {
            id: "TKT-1".into(),
            site: "COW Site 12".into(),
            issue_type: "Power Outage".into(),
            open_date: "2024-03-01".into(),
            status: "Pending".into(),
            aging_days: 9,
        };
        assert_eq!(
            cells(&ticket),
            ["TKT-1", "COW Site", "Power Ou", "2024-", "Pendi", "9d"].map(String::from)
        );
    }

    #[test]
    fn height_covers_borders_and_header() {
        assert_eq!(height(5), 8);
    }

    #[test]
    fn height_saturates_for_huge_page_sizes() {
        assert_eq!(height(u16::MAX as usize - 1), u16::MAX);
        assert_eq!(height(70_000), u16::MAX);
        assert_eq!(height(usize::MAX), u16::MAX);
    }
}
