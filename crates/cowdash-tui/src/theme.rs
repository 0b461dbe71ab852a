//! Colour theme for the cowdash TUI.
//!
//! Themes are defined as TOML files. Both built-in themes are embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk. Call [`Theme::by_name`] at startup with `ui.theme` from the config
//! and pass the result through the application as a shared reference.
//!
//! # Colour assignment for sites
//!
//! Site names are hashed to a stable index into the palette so the same site
//! always gets the same bar colour, regardless of the order in which sites
//! appear in the sheet.

use config::{Config, File, FileFormat};
use cowdash_core::StatusClass;
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underlined {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    open: RawStyle,
    pending: RawStyle,
    resolved: RawStyle,
    other: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    command_bar: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawCards {
    total: RawStyle,
    open: RawStyle,
    resolved: RawStyle,
    sla: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawCharts {
    trend: RawStyle,
    axis: RawStyle,
    site_palette: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    header: RawStyle,
    status: RawStatus,
    borders: RawBorders,
    cards: RawCards,
    charts: RawCharts,
    table_header: RawStyle,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme.
///
/// All styles are pre-resolved ratatui [`Style`] values: no allocation at
/// render time.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Title row at the top of the screen.
    pub header: Style,

    pub status_open: Style,
    pub status_pending: Style,
    pub status_resolved: Style,
    pub status_other: Style,

    pub border_focused: Style,
    pub border_command_bar: Style,
    pub border_unfocused: Style,

    pub card_total: Style,
    pub card_open: Style,
    pub card_resolved: Style,
    pub card_sla: Style,

    /// Line colour of the daily trend chart.
    pub chart_trend: Style,
    pub chart_axis: Style,
    pub table_header: Style,

    site_palette: Vec<Color>,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Built-in theme by name; unknown names get the default theme.
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Self::load_gruvbox_dark(),
            "default" => Self::load_default(),
            other => {
                tracing::warn!(theme = other, "unknown theme, using default");
                Self::load_default()
            }
        }
    }

    /// Parse a theme from a TOML string.
    ///
    /// Unknown keys are ignored so user themes stay forward-compatible.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            header: raw.header.into_style(),
            status_open: raw.status.open.into_style(),
            status_pending: raw.status.pending.into_style(),
            status_resolved: raw.status.resolved.into_style(),
            status_other: raw.status.other.into_style(),
            border_focused: raw.borders.focused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            card_total: raw.cards.total.into_style(),
            card_open: raw.cards.open.into_style(),
            card_resolved: raw.cards.resolved.into_style(),
            card_sla: raw.cards.sla.into_style(),
            chart_trend: raw.charts.trend.into_style(),
            chart_axis: raw.charts.axis.into_style(),
            table_header: raw.table_header.into_style(),
            site_palette: raw
                .charts
                .site_palette
                .iter()
                .filter_map(|s| parse_color(s))
                .collect(),
        })
    }

    pub fn status_style(&self, class: StatusClass) -> Style {
        match class {
            StatusClass::Open => self.status_open,
            StatusClass::Pending => self.status_pending,
            StatusClass::Resolved => self.status_resolved,
            StatusClass::Other => self.status_other,
        }
    }

    /// Foreground colour for `class`, for widgets that take a bare [`Color`].
    pub fn status_color(&self, class: StatusClass) -> Color {
        self.status_style(class).fg.unwrap_or(Color::Reset)
    }

    /// Return a stable [`Style`] for a site name.
    pub fn site_style(&self, site: &str) -> Style {
        if self.site_palette.is_empty() {
            return Style::default();
        }
        let idx = stable_hash(site) % self.site_palette.len();
        Style::default().fg(self.site_palette[idx])
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Simple djb2-style hash that is stable across Rust versions and process
/// restarts, making site colour assignment deterministic.
fn stable_hash(s: &str) -> usize {
    s.bytes().fold(5381usize, |acc, b| {
        acc.wrapping_mul(31).wrapping_add(b as usize)
    })
}

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_gray`, etc.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
pub fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
