//! Normalizer: turns raw sheet CSV into [`Ticket`](crate::Ticket) values.
//!
//! Parsing is deliberately naive: comma is the only delimiter and quoting is
//! not understood, matching how the published sheet is consumed. Nothing in
//! this module returns an error; irregular rows degrade to the configured
//! [`FieldDefaults`].
//!
//! Column resolution prefers a header that equals an alias exactly, then
//! falls back to the first header (left to right) that contains it.

use crate::config::{ColumnAliases, FieldDefaults};
use crate::Ticket;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Formats tried, in order, for values that carry a time component.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Formats tried, in order, for date-only values.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d %b %Y", "%b %d, %Y"];

// ---------------------------------------------------------------------------
// CSV splitting
// ---------------------------------------------------------------------------

/// Header names plus the data rows of a CSV document, all fields trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    /// Trimmed, lower-cased header names.
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Split `text` into headers and rows.
    ///
    /// Surrounding whitespace is trimmed first, so blank trailing lines never
    /// become rows. Text with fewer than two lines yields an empty table.
    pub fn parse(text: &str) -> Self {
        let lines: Vec<&str> = text.trim().split('\n').collect();
        if lines.len() < 2 {
            return Self::default();
        }

        let headers = split_fields(lines[0])
            .into_iter()
            .map(|h| h.to_lowercase())
            .collect();
        let rows = lines[1..].iter().map(|line| split_fields(line)).collect();

        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(|v| v.trim().to_string()).collect()
}

// ---------------------------------------------------------------------------
// Column resolution
// ---------------------------------------------------------------------------

/// Index of the column `target` resolves to, if any.
///
/// An exact (normalised) header match wins; otherwise the first header
/// containing `target` as a substring.
pub fn resolve_column(headers: &[String], target: &str) -> Option<usize> {
    let target = target.trim().to_lowercase();
    headers
        .iter()
        .position(|h| *h == target)
        .or_else(|| headers.iter().position(|h| h.contains(&target)))
}

/// Resolved column indices for every alias of every ticket field.
///
/// Resolution happens once per document; each row then reads its values
/// through the resolved indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    id: Vec<usize>,
    site: Vec<usize>,
    issue_type: Vec<usize>,
    status: Vec<usize>,
    open_date: Vec<usize>,
}

impl ColumnMap {
    pub fn resolve(headers: &[String], aliases: &ColumnAliases) -> Self {
        let resolve_all = |names: &[String]| -> Vec<usize> {
            names
                .iter()
                .filter_map(|name| resolve_column(headers, name))
                .collect()
        };
        let map = Self {
            id: resolve_all(&aliases.id),
            site: resolve_all(&aliases.site),
            issue_type: resolve_all(&aliases.issue_type),
            status: resolve_all(&aliases.status),
            open_date: resolve_all(&aliases.open_date),
        };
        tracing::debug!(?headers, columns = ?map, "resolved sheet columns");
        map
    }
}

/// First non-empty value among `columns` in `row`.
fn first_value<'a>(row: &'a [String], columns: &[usize]) -> Option<&'a str> {
    columns
        .iter()
        .filter_map(|&i| row.get(i))
        .map(String::as_str)
        .find(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Builds tickets from CSV text using a fixed set of aliases and defaults.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    aliases: ColumnAliases,
    defaults: FieldDefaults,
}

impl Normalizer {
    pub fn new(aliases: ColumnAliases, defaults: FieldDefaults) -> Self {
        Self { aliases, defaults }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(config.columns.clone(), config.defaults.clone())
    }

    /// Parse `csv` and build one ticket per data row, aging against `now`.
    pub fn normalize(&self, csv: &str, now: DateTime<Utc>) -> Vec<Ticket> {
        let table = CsvTable::parse(csv);
        if table.is_empty() {
            tracing::debug!("sheet has no data rows");
            return Vec::new();
        }

        let columns = ColumnMap::resolve(&table.headers, &self.aliases);
        let tickets: Vec<Ticket> = table
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| self.build_ticket(row, index, &columns, now))
            .collect();

        tracing::debug!(count = tickets.len(), "normalised tickets");
        tickets
    }

    fn build_ticket(
        &self,
        row: &[String],
        index: usize,
        columns: &ColumnMap,
        now: DateTime<Utc>,
    ) -> Ticket {
        let d = &self.defaults;
        let value_or = |cols: &[usize], default: &str| {
            first_value(row, cols).unwrap_or(default).to_string()
        };

        let open_date = value_or(&columns.open_date, &d.open_date);
        let aging_days = aging_days(&open_date, now);

        Ticket {
            id: first_value(row, &columns.id)
                .map(str::to_string)
                .unwrap_or_else(|| d.synthesize_id(index)),
            site: value_or(&columns.site, &d.site),
            issue_type: value_or(&columns.issue_type, &d.issue_type),
            status: value_or(&columns.status, &d.status),
            open_date,
            aging_days,
        }
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Parse a sheet date into a UTC instant.
///
/// Date-only values are taken as midnight UTC. Returns `None` for anything
/// not in one of the accepted forms.
pub fn parse_open_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Calendar date of a sheet value, if it parses.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    parse_open_date(value).map(|dt| dt.date_naive())
}

/// Whole days from `open_date` to `now`, floored and clamped at zero.
/// Unparseable dates age zero days.
pub fn aging_days(open_date: &str, now: DateTime<Utc>) -> u32 {
    match parse_open_date(open_date) {
        Some(opened) => {
            let days = (now - opened).num_days().max(0);
            u32::try_from(days).unwrap_or(u32::MAX)
        }
        None => 0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
