//! Local CSV file source, for offline use and demos.

use crate::{FeedError, TicketSource};
use std::path::PathBuf;

/// Reads the whole file on every fetch, so edits show up on the next refresh.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TicketSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_csv(&self) -> Result<String, FeedError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FeedError::Io { path: self.path.clone(), source })
    }
}
