//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Snapshots from the refresh
//! task are drained once per loop iteration without blocking.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        header::Header,
        help::HelpPopup,
        metric_cards::{self, MetricCards},
        query_bar::{QueryBar, QueryBarState},
        site_bars::SiteBars,
        site_map::SiteMapView,
        status_pie::StatusPie,
        ticket_table::{self, TicketTable},
        trend_line::TrendLine,
    },
};
use cowdash_core::{
    config::Config,
    export,
    map::{Marker, SiteMap},
    metrics::Metrics,
    search::TableQuery,
    Snapshot,
};
use cowdash_feeds::RefreshHandle;
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, path::Path, time::Duration};
use tokio::sync::mpsc::{self, error::TryRecvError};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    QueryBar,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    /// Latest snapshot; empty until the first cycle completes.
    pub snapshot: Snapshot,
    pub loaded: bool,
    pub metrics: Metrics,
    pub site_map: SiteMap,
    pub markers: Vec<Marker>,
    pub table: TableQuery,
    pub query: QueryBarState,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    /// Where tickets come from, shown in the header.
    pub source: String,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    /// One-shot status line, cleared by the next key press.
    pub message: Option<String>,
    /// Set by `r` / `:refresh`; the loop forwards it to the refresh task.
    pub refresh_requested: bool,
    awaiting_refresh: bool,
    pub quit: bool,
}

impl AppState {
    pub fn new(config: Config, theme: Theme, source: impl Into<String>) -> Self {
        let snapshot = Snapshot::empty(chrono::Utc::now());
        Self {
            metrics: Metrics::compute(&snapshot.tickets),
            snapshot,
            loaded: false,
            site_map: SiteMap::from_config(&config.map),
            markers: Vec::new(),
            table: TableQuery::new(config.ui.page_size),
            query: QueryBarState::default(),
            focus: Focus::Table,
            prev_focus: Focus::Table,
            theme,
            config,
            source: source.into(),
            show_help: false,
            command_bar: CommandBarState::default(),
            message: None,
            refresh_requested: false,
            awaiting_refresh: false,
            quit: false,
        }
    }

    /// Replace the displayed data with a fresh snapshot.
    ///
    /// Every derived view is recomputed from scratch. The search text and
    /// page survive; the page is clamped when the result set shrank.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        tracing::debug!(tickets = snapshot.tickets.len(), "applying snapshot");
        self.metrics = Metrics::compute(&snapshot.tickets);
        self.markers = self.site_map.markers(&snapshot.tickets);
        let page = self.table.page();
        self.table.go_to(page, &snapshot.tickets);
        self.snapshot = snapshot;
        self.loaded = true;

        if self.awaiting_refresh {
            self.awaiting_refresh = false;
            self.message = Some(format!("refreshed: {} tickets", self.snapshot.tickets.len()));
        }
    }

    pub fn request_refresh(&mut self) {
        self.refresh_requested = true;
        self.awaiting_refresh = true;
        self.message = Some("refreshing…".to_string());
    }

    /// Write the current snapshot and charts into `dir`.
    pub fn export_to(&mut self, dir: &Path) {
        match export::write_snapshot(dir, &self.snapshot) {
            Ok(paths) => {
                tracing::debug!(files = paths.len(), "export finished");
                self.message = Some(format!("exported {} files to {}", paths.len(), dir.display()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                self.message = Some(format!("export failed: {e}"));
            }
        }
    }

    /// Apply one input event.
    pub fn handle(&mut self, event: AppEvent) {
        if !matches!(event, AppEvent::Resize(..)) {
            self.message = None;
        }

        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if self.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                }
                AppEvent::Quit => self.quit = true,
                AppEvent::Enter => {
                    let input = self.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            self.command_bar.clear();
                            self.focus = self.prev_focus;
                            execute_command(self, cmd);
                        }
                        Err(msg) if msg.is_empty() => {
                            self.command_bar.clear();
                            self.focus = self.prev_focus;
                        }
                        Err(msg) => {
                            // Show the error; bar stays open
                            self.command_bar.error = Some(msg);
                        }
                    }
                }
                other => self.command_bar.handle(&other),
            }
            return;
        }

        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }

            AppEvent::Char('?') if self.focus != Focus::QueryBar => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }

            AppEvent::Char(':') if self.focus != Focus::QueryBar => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }

            AppEvent::Escape | AppEvent::Enter if self.focus == Focus::QueryBar => {
                self.focus = Focus::Table;
            }

            AppEvent::FocusNext => {
                self.focus = match self.focus {
                    Focus::Table => Focus::QueryBar,
                    Focus::QueryBar | Focus::Command => Focus::Table,
                };
                tracing::debug!(to = ?self.focus, "focus cycle");
            }

            AppEvent::QueryFocus => self.focus = Focus::QueryBar,

            AppEvent::PrevPage => self.table.prev_page(),
            AppEvent::NextPage => self.table.next_page(&self.snapshot.tickets),
            AppEvent::FirstPage => self.table.go_to(1, &self.snapshot.tickets),

            AppEvent::Refresh => self.request_refresh(),
            AppEvent::Export => {
                let dir = self.config.export.dir.clone();
                self.export_to(&dir);
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other if self.focus == Focus::QueryBar => {
                if self.query.handle(&other) {
                    self.table.set_query(self.query.query.clone());
                }
            }

            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    refresh: RefreshHandle,
    snapshots: Option<mpsc::Receiver<Snapshot>>,
}

impl App {
    pub fn new(state: AppState, refresh: RefreshHandle, snapshots: mpsc::Receiver<Snapshot>) -> Self {
        Self {
            state,
            refresh,
            snapshots: Some(snapshots),
        }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        self.refresh.cancel();
        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.drain_snapshots();

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(POLL_INTERVAL)? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.state.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev);
                        }
                    }
                }
            }

            if std::mem::take(&mut self.state.refresh_requested) {
                self.refresh.refresh_now();
            }
        }
        Ok(())
    }

    fn drain_snapshots(&mut self) {
        let Some(rx) = self.snapshots.as_mut() else {
            return;
        };
        loop {
            match rx.try_recv() {
                Ok(snapshot) => self.state.apply_snapshot(snapshot),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("refresh task stopped; showing last snapshot");
                    self.snapshots = None;
                    break;
                }
            }
        }
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::QueryBar | Focus::Command)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the whole dashboard.
///
/// Layout: title row, three columns (cards + site bars | map | status +
/// trend), ticket table, search bar.
pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let theme = &state.theme;
    let page = state.table.apply(&state.snapshot.tickets);

    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(ticket_table::height(state.table.page_size())),
            Constraint::Length(3),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(vert[1]);

    let left = Layout::vertical([Constraint::Length(metric_cards::HEIGHT), Constraint::Fill(1)])
        .split(columns[0]);
    let right = Layout::vertical([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(columns[2]);

    let fetched_at = state.loaded.then_some(state.snapshot.fetched_at);
    frame.render_widget(
        Header::new(&state.source, fetched_at, state.message.as_deref(), theme),
        vert[0],
    );
    frame.render_widget(MetricCards::new(&state.metrics.summary, theme), left[0]);
    frame.render_widget(SiteBars::new(&state.metrics.by_site, theme), left[1]);
    frame.render_widget(SiteMapView::new(&state.site_map, &state.markers, theme), columns[1]);
    frame.render_widget(StatusPie::new(&state.metrics.by_status, theme), right[0]);
    frame.render_widget(TrendLine::new(&state.metrics.by_date, theme), right[1]);
    frame.render_widget(
        TicketTable::new(&page, state.focus == Focus::Table, theme),
        vert[2],
    );
    frame.render_widget(
        QueryBar::new(&state.query, page.matched, state.focus == Focus::QueryBar, theme),
        vert[3],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::QueryBar {
        let qb = QueryBar::new(&state.query, page.matched, true, theme);
        frame.set_cursor_position(qb.cursor_position(vert[3]));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
