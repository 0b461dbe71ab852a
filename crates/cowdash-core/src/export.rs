//! Export layer: writes a snapshot and its charts to a directory.
//!
//! Produces four files: `snapshot.json` (tickets, metrics, fetch time) and
//! one SVG per chart (`bar.svg`, `pie.svg`, `line.svg`).

use crate::chart::{BarChart, LineChart, PieChart};
use crate::metrics::Metrics;
use crate::{Snapshot, Ticket};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const SNAPSHOT_FILE: &str = "snapshot.json";
pub const BAR_FILE: &str = "bar.svg";
pub const PIE_FILE: &str = "pie.svg";
pub const LINE_FILE: &str = "line.svg";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("cannot create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot serialise snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct SnapshotDocument<'a> {
    fetched_at: chrono::DateTime<chrono::Utc>,
    metrics: &'a Metrics,
    tickets: &'a [Ticket],
}

/// Write `snapshot` into `dir`, creating the directory when missing.
///
/// Returns the paths written, snapshot first.
pub fn write_snapshot(dir: &Path, snapshot: &Snapshot) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let metrics = Metrics::compute(&snapshot.tickets);
    let document = SnapshotDocument {
        fetched_at: snapshot.fetched_at,
        metrics: &metrics,
        tickets: &snapshot.tickets,
    };

    let files = [
        (SNAPSHOT_FILE, serde_json::to_string_pretty(&document)?),
        (BAR_FILE, BarChart::layout(&metrics.by_site).to_svg()),
        (PIE_FILE, PieChart::layout(&metrics.by_status).to_svg()),
        (LINE_FILE, LineChart::layout(&metrics.by_date).to_svg()),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (name, contents) in files {
        let path = dir.join(name);
        std::fs::write(&path, contents).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }

    tracing::info!(dir = %dir.display(), tickets = snapshot.tickets.len(), "exported snapshot");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn empty_snapshot_still_writes_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        let snapshot = Snapshot::empty(chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

        let written = write_snapshot(&out, &snapshot).unwrap();
        assert_eq!(written.len(), 4);
        for path in &written {
            assert!(path.exists(), "{} missing", path.display());
        }
        let bar = std::fs::read_to_string(out.join(BAR_FILE)).unwrap();
        assert!(bar.contains("No data"));
    }

    #[test]
    fn unwritable_directory_is_a_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();

        let snapshot = Snapshot::empty(chrono::Utc::now());
        let err = write_snapshot(&blocker.join("sub"), &snapshot).unwrap_err();
        assert!(matches!(err, ExportError::CreateDir { .. }), "{err}");
    }
}
