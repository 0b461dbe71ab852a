//! Headless summary: the dashboard's numbers as plain text or JSON.

use chrono::{DateTime, Utc};
use cowdash_core::metrics::Metrics;
use cowdash_core::Snapshot;
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub source: &'a str,
    pub fetched_at: DateTime<Utc>,
    #[serde(flatten)]
    pub metrics: Metrics,
}

impl<'a> Report<'a> {
    pub fn new(source: &'a str, snapshot: &Snapshot) -> Self {
        Self {
            source,
            fetched_at: snapshot.fetched_at,
            metrics: Metrics::compute(&snapshot.tickets),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let s = &self.metrics.summary;
        let mut out = String::new();
        let _ = writeln!(out, "COW Tickets Dashboard  {}", self.source);
        let _ = writeln!(out, "fetched at {}", self.fetched_at.to_rfc3339());
        let _ = writeln!(out);
        let _ = writeln!(out, "Total Tickets  {}", s.total);
        let _ = writeln!(out, "Open           {}", s.open);
        let _ = writeln!(out, "Resolved       {}", s.resolved);
        let _ = writeln!(out, "SLA %          {}%", s.sla_percent);

        section(&mut out, "Tickets Per Site", self.metrics.by_site.iter().map(|c| (&c.label, c.value)));
        section(&mut out, "Status Distribution", self.metrics.by_status.iter().map(|c| (&c.label, c.value)));
        section(&mut out, "Daily Trend", self.metrics.by_date.iter().map(|c| (&c.label, c.value)));
        out
    }
}

fn section<'a>(out: &mut String, title: &str, rows: impl Iterator<Item = (&'a String, usize)>) {
    let rows: Vec<_> = rows.collect();
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
    if rows.is_empty() {
        let _ = writeln!(out, "  No data");
        return;
    }
    let width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    for (label, value) in rows {
        let label = if label.is_empty() { "(none)" } else { label.as_str() };
        let _ = writeln!(out, "  {label:<width$}  {value}");
    }
}
