//! Site map: ticket markers plotted on a lat/lon canvas.
//!
//! Only the configured sites are labelled; there is no base map.

use crate::theme::Theme;
use cowdash_core::map::{Marker, SiteMap};
use cowdash_core::StatusClass;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, Widget,
    },
};

/// Status classes drawn on the map, in paint order (resolved underneath).
const LAYERS: [StatusClass; 3] = [StatusClass::Resolved, StatusClass::Pending, StatusClass::Open];

pub struct SiteMapView<'a> {
    map: &'a SiteMap,
    markers: &'a [Marker],
    theme: &'a Theme,
}

impl<'a> SiteMapView<'a> {
    pub fn new(map: &'a SiteMap, markers: &'a [Marker], theme: &'a Theme) -> Self {
        Self { map, markers, theme }
    }
}

/// `(lon, lat)` canvas coordinates of the markers of one status class.
pub fn layer(markers: &[Marker], class: StatusClass) -> Vec<(f64, f64)> {
    markers
        .iter()
        .filter(|m| m.class == class)
        .map(|m| (m.lon, m.lat))
        .collect()
}

impl Widget for SiteMapView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (min_lat, max_lat, min_lon, max_lon) = self.map.bounds();
        // Keep markers off the border.
        let pad_lat = (max_lat - min_lat) * 0.1;
        let pad_lon = (max_lon - min_lon) * 0.1;

        let layers: Vec<(Vec<(f64, f64)>, Color)> = LAYERS
            .iter()
            .map(|&class| (layer(self.markers, class), self.theme.status_color(class)))
            .collect();
        let labels: Vec<(f64, f64, String)> = self
            .map
            .sites()
            .map(|(name, lat, lon)| (lon, lat, name.to_string()))
            .collect();
        let label_style: Style = self.theme.chart_axis;

        Canvas::default()
            .block(
                Block::bordered()
                    .title(format!("Site Map ({} tickets)", self.markers.len()))
                    .border_style(self.theme.border_unfocused),
            )
            .marker(symbols::Marker::Braille)
            .x_bounds([min_lon - pad_lon, max_lon + pad_lon])
            .y_bounds([min_lat - pad_lat, max_lat + pad_lat])
            .paint(move |ctx| {
                for (x, y, name) in &labels {
                    ctx.print(*x, *y, Line::styled(name.clone(), label_style));
                }
                ctx.layer();
                for (coords, color) in &layers {
                    ctx.draw(&Points { coords, color: *color });
                }
            })
            .render(area, buf);
    }
}
