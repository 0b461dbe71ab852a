//! Export integration harness.
//!
//! # What this covers
//!
//! - **File set**: an export writes `snapshot.json`, `bar.svg`, `pie.svg`
//!   and `line.svg`, creating the directory when missing.
//! - **Snapshot document**: fetch time, metrics and the full ticket list,
//!   with camelCase ticket keys.
//! - **Charts**: one bar per site, one slice per status, one point per day,
//!   and a "No data" placeholder for an empty snapshot.
//! - **Re-export**: exporting again into the same directory replaces the
//!   previous files.
//!
//! # What this does NOT cover
//!
//! - Pixel-level chart geometry (see the unit tests in `cowdash-core::chart`)
//!
//! # Running
//!
//! ```sh
//! cargo test --test export_harness
//! ```

mod common;
use common::*;

use cowdash_core::export::{write_snapshot, BAR_FILE, LINE_FILE, PIE_FILE, SNAPSHOT_FILE};
use cowdash_core::normalizer::Normalizer;
use cowdash_core::Snapshot;
use pretty_assertions::assert_eq;
use std::path::Path;

fn festival_snapshot() -> Snapshot {
    Snapshot::new(Normalizer::default().normalize(SHEET_FESTIVAL, now()), now())
}

fn read(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name)).unwrap()
}

#[test]
fn export_writes_four_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("export");

    let written = write_snapshot(&out, &festival_snapshot()).unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, [SNAPSHOT_FILE, BAR_FILE, PIE_FILE, LINE_FILE]);
    for path in &written {
        assert!(path.starts_with(&out));
    }
}

#[test]
fn snapshot_document_holds_tickets_and_metrics() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path(), &festival_snapshot()).unwrap();

    let doc: serde_json::Value = serde_json::from_str(&read(dir.path(), SNAPSHOT_FILE)).unwrap();
    assert_eq!(doc["fetched_at"], "2024-03-10T12:00:00Z");
    assert_eq!(doc["tickets"].as_array().unwrap().len(), 5);
    assert_eq!(doc["tickets"][0]["id"], "TKT-001");
    assert_eq!(doc["tickets"][0]["issueType"], "Power");
    assert_eq!(doc["tickets"][0]["openDate"], "2024-03-01");
    assert_eq!(doc["tickets"][0]["agingDays"], 9);
    assert_eq!(doc["metrics"]["summary"]["sla_percent"], 40);
    assert_eq!(doc["metrics"]["by_site"][0]["label"], "COW Site 1");
    assert_eq!(doc["metrics"]["by_status"][3]["label"], "closed");
    assert_eq!(doc["metrics"]["by_status"][3]["color"], "#22c55e");
}

#[test]
fn charts_have_one_mark_per_group() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path(), &festival_snapshot()).unwrap();

    let bar = read(dir.path(), BAR_FILE);
    assert_eq!(bar.matches("<rect").count(), 3);
    assert!(bar.contains(">COW S</text>"));

    let pie = read(dir.path(), PIE_FILE);
    assert_eq!(pie.matches("<path").count(), 4);
    assert!(pie.contains(r#"d="M 60 60 L 60 10 A 50 50 0 0 1 "#));
    assert!(pie.contains("<title>open: 2</title>"));

    let line = read(dir.path(), LINE_FILE);
    assert_eq!(line.matches("<circle").count(), 4);
    assert!(line.contains("<title>2024-03-02: 2</title>"));
}

#[test]
fn empty_snapshot_exports_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path(), &Snapshot::empty(now())).unwrap();

    for name in [BAR_FILE, PIE_FILE, LINE_FILE] {
        let svg = read(dir.path(), name);
        assert!(svg.starts_with("<svg"), "{name} is not an SVG document");
        assert!(svg.contains("No data"), "{name} has no placeholder");
    }
    let doc: serde_json::Value = serde_json::from_str(&read(dir.path(), SNAPSHOT_FILE)).unwrap();
    assert_eq!(doc["metrics"]["summary"]["total"], 0);
}

#[test]
fn re_export_replaces_previous_files() {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path(), &festival_snapshot()).unwrap();
    write_snapshot(dir.path(), &Snapshot::empty(now())).unwrap();

    let doc: serde_json::Value = serde_json::from_str(&read(dir.path(), SNAPSHOT_FILE)).unwrap();
    assert!(doc["tickets"].as_array().unwrap().is_empty());
    assert!(read(dir.path(), BAR_FILE).contains("No data"));
}
