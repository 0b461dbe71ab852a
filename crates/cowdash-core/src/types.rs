//! Core types for cowdash-core.
//!
//! This module defines the fundamental data structures shared across all
//! layers: the normalised [`Ticket`], its [`StatusClass`], and the
//! [`Snapshot`] produced by one refresh cycle.

use serde::Serialize;

/// A normalised ticket produced by the normalizer from one CSV data row.
///
/// Every field is always populated: values missing from the sheet are
/// replaced by the configured defaults, never left empty (except
/// `open_date`, whose default is the empty string).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Ticket identifier, or a synthesized `TKT-<n>` placeholder.
    pub id: String,
    /// COW site label the ticket was raised against.
    pub site: String,
    /// Free-text issue category.
    pub issue_type: String,
    /// Opening date exactly as the sheet wrote it.
    pub open_date: String,
    /// Free-text lifecycle state, passed through verbatim.
    pub status: String,
    /// Whole days between `open_date` and the evaluation instant, clamped at zero.
    pub aging_days: u32,
}

impl Ticket {
    /// Case-folded classification of [`Ticket::status`].
    pub fn status_class(&self) -> StatusClass {
        StatusClass::from_status(&self.status)
    }

    /// Case-insensitive substring match across id, site, issue type and status.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        [&self.id, &self.site, &self.issue_type, &self.status]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Ticket lifecycle state, normalised across spellings and letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Open,
    Pending,
    /// `resolved` or `closed`.
    Resolved,
    /// Anything else; counted in totals only.
    Other,
}

impl StatusClass {
    pub fn from_status(status: &str) -> Self {
        match status.to_lowercase().as_str() {
            "open" => StatusClass::Open,
            "pending" => StatusClass::Pending,
            "resolved" | "closed" => StatusClass::Resolved,
            _ => StatusClass::Other,
        }
    }

    /// Fixed hex colour used by the status chart and map markers.
    ///
    /// Only `open` and `pending` get their own colour; every other status,
    /// including unknown ones, is drawn green.
    pub fn color(self) -> &'static str {
        match self {
            StatusClass::Open => "#ef4444",
            StatusClass::Pending => "#facc15",
            StatusClass::Resolved | StatusClass::Other => "#22c55e",
        }
    }
}

impl std::fmt::Display for StatusClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusClass::Open => write!(f, "open"),
            StatusClass::Pending => write!(f, "pending"),
            StatusClass::Resolved => write!(f, "resolved"),
            StatusClass::Other => write!(f, "other"),
        }
    }
}

/// The output of one fetch-parse cycle.
///
/// An empty `tickets` list means "no data", whether the sheet was empty or
/// the fetch failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tickets: Vec<Ticket>,
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}

impl Snapshot {
    pub fn new(tickets: Vec<Ticket>, fetched_at: chrono::DateTime<chrono::Utc>) -> Self {
        Self { tickets, fetched_at }
    }

    /// A snapshot with no tickets, stamped with `fetched_at`.
    pub fn empty(fetched_at: chrono::DateTime<chrono::Utc>) -> Self {
        Self::new(Vec::new(), fetched_at)
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}
