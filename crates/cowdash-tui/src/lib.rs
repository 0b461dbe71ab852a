//! cowdash TUI: ratatui application shell.
//!
//! [`run`] spawns the refresh task for a ticket source and hands its
//! snapshot channel to the [`App`] event loop.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use cowdash_core::{config::Config, normalizer::Normalizer};
use cowdash_feeds::{RefreshTask, TicketSource};
use std::time::Duration;

/// Start the dashboard, refreshing from `source` every `interval`.
///
/// Must be called from within a tokio runtime context; the refresh task runs
/// on the runtime while the event loop blocks the calling thread.
pub fn run<S: TicketSource>(config: Config, source: S, interval: Duration) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme);
    let label = source.describe();
    let normalizer = Normalizer::from_config(&config);

    tracing::info!(source = %label, interval_secs = interval.as_secs(), "starting dashboard");
    let (handle, snapshots) = RefreshTask::new(source, normalizer, interval).spawn();

    let state = app::AppState::new(config, theme, label);
    App::new(state, handle, snapshots).run()
}
