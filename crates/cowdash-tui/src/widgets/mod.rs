//! Ratatui widgets for the cowdash TUI.

pub mod command_bar;
pub mod header;
pub mod help;
pub mod metric_cards;
pub mod query_bar;
pub mod site_bars;
pub mod site_map;
pub mod status_pie;
pub mod ticket_table;
pub mod trend_line;
