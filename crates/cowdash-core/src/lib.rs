//! cowdash-core: COW ticket dashboard core library.
//!
//! This crate exposes the pipeline layers as public modules, plus the shared
//! types used across all layers.
//!
//! # Architecture
//!
//! ```text
//! CSV text ──► Normalizer ──► Metrics ──► Chart / Map / Search ──► UI
//!                                │
//!                                └──────► Export
//! ```
//!
//! Nothing here performs I/O except [`config::Config::load`] and
//! [`export::write_snapshot`]; fetching lives in `cowdash-feeds`.

pub mod chart;
pub mod config;
pub mod export;
pub mod map;
pub mod metrics;
pub mod normalizer;
pub mod search;
pub mod types;

pub use types::{Snapshot, StatusClass, Ticket};
