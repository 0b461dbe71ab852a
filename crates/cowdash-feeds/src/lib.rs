//! cowdash-feeds: ticket source adapters for cowdash.
//!
//! Each source fetches the raw CSV text of the ticket sheet. [`load_snapshot`]
//! runs one fetch-parse cycle, and [`refresh::RefreshTask`] repeats it on a
//! timer, pushing [`Snapshot`]s onto an async channel for the UI.

pub mod file;
pub mod refresh;
pub mod sheet;

use cowdash_core::normalizer::Normalizer;
use cowdash_core::Snapshot;
use std::future::Future;

pub use file::FileSource;
pub use refresh::{RefreshHandle, RefreshTask};
pub use sheet::SheetSource;

/// Why a fetch produced no CSV text.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("cannot read {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Trait implemented by each ticket source.
pub trait TicketSource: Send + Sync + 'static {
    /// Short human-readable origin, shown in the header and in logs.
    fn describe(&self) -> String;

    /// Fetch the whole CSV document as text.
    fn fetch_csv(&self) -> impl Future<Output = Result<String, FeedError>> + Send;
}

/// Run one fetch-parse cycle.
///
/// A failed fetch is logged and yields an empty snapshot; it is never
/// retried here. The next scheduled cycle simply tries again.
pub async fn load_snapshot<S: TicketSource>(source: &S, normalizer: &Normalizer) -> Snapshot {
    let now = chrono::Utc::now();
    match source.fetch_csv().await {
        Ok(csv) => {
            let tickets = normalizer.normalize(&csv, now);
            tracing::info!(source = %source.describe(), tickets = tickets.len(), "fetched tickets");
            Snapshot::new(tickets, now)
        }
        Err(e) => {
            tracing::warn!(source = %source.describe(), error = %e, "error fetching tickets");
            Snapshot::empty(now)
        }
    }
}
