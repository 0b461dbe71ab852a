//! Header widget: the title strip at the top of the screen.

use crate::theme::Theme;
use chrono::{DateTime, Local, Utc};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Widget,
};

pub const TITLE: &str = "Camel Festival • COW Tickets Dashboard • Sites • Outages • SLA";

/// Renders the 1-line title strip.
///
/// The right edge shows the last status message when there is one, and
/// otherwise the time of the last refresh plus keybinding hints.
pub struct Header<'a> {
    source: &'a str,
    fetched_at: Option<DateTime<Utc>>,
    message: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(
        source: &'a str,
        fetched_at: Option<DateTime<Utc>>,
        message: Option<&'a str>,
        theme: &'a Theme,
    ) -> Self {
        Self { source, fetched_at, message, theme }
    }

    fn status_text(&self) -> String {
        if let Some(message) = self.message {
            return format!(" {message} ");
        }
        let updated = match self.fetched_at {
            Some(at) => at.with_timezone(&Local).format("%H:%M:%S").to_string(),
            None => "loading…".to_string(),
        };
        format!(
            " {}  updated {updated}  r:refresh  ?:help  q:quit ",
            shorten(self.source, SOURCE_WIDTH)
        )
    }
}

const SOURCE_WIDTH: usize = 32;

/// `text` cut to `max` characters, ending in `…` when cut.
fn shorten(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.header);

        let title = Line::from(Span::styled(
            format!(" {TITLE} "),
            self.theme.header.add_modifier(Modifier::BOLD),
        ));
        buf.set_line(area.x, area.y, &title, area.width);

        let status = self.status_text();
        let width = status.chars().count() as u16;
        let x = area.right().saturating_sub(width).max(area.x);
        buf.set_string(x, area.y, &status, self.theme.header);
    }
}
