//! Metrics: aggregate reducers over a full ticket list.
//!
//! Every reducer is a single linear pass and recomputed from scratch on each
//! refresh; nothing is updated incrementally.

use crate::normalizer::parse_calendar_date;
use crate::{StatusClass, Ticket};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// One labelled count, in the order the reducer produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Count {
    pub label: String,
    pub value: usize,
}

/// One status segment of the status-distribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    /// Case-folded status text.
    pub label: String,
    pub value: usize,
    pub class: StatusClass,
    pub color: &'static str,
}

/// Headline numbers shown on the metric cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub open: usize,
    pub resolved: usize,
    /// `round(resolved / total * 100)`, or 0 for an empty list.
    pub sla_percent: u32,
}

impl Summary {
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        let total = tickets.len();
        let (open, resolved) = tickets.iter().fold((0, 0), |(open, resolved), t| {
            match t.status_class() {
                StatusClass::Open => (open + 1, resolved),
                StatusClass::Resolved => (open, resolved + 1),
                StatusClass::Pending | StatusClass::Other => (open, resolved),
            }
        });
        Self {
            total,
            open,
            resolved,
            sla_percent: sla_percent(resolved, total),
        }
    }
}

/// Percentage of resolved tickets, rounded half away from zero.
pub fn sla_percent(resolved: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (resolved as f64 / total as f64 * 100.0).round() as u32
}

/// Everything the dashboard derives from one ticket list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub summary: Summary,
    pub by_site: Vec<Count>,
    pub by_status: Vec<StatusCount>,
    pub by_date: Vec<Count>,
}

impl Metrics {
    pub fn compute(tickets: &[Ticket]) -> Self {
        Self {
            summary: Summary::from_tickets(tickets),
            by_site: by_site(tickets),
            by_status: by_status(tickets),
            by_date: by_date(tickets),
        }
    }
}

/// Tickets per site, in first-seen site order.
pub fn by_site(tickets: &[Ticket]) -> Vec<Count> {
    count_in_first_seen_order(tickets.iter().map(|t| t.site.clone()))
}

/// Tickets per case-folded status, in first-seen order, with chart colours.
pub fn by_status(tickets: &[Ticket]) -> Vec<StatusCount> {
    count_in_first_seen_order(tickets.iter().map(|t| t.status.to_lowercase()))
        .into_iter()
        .map(|Count { label, value }| {
            let class = StatusClass::from_status(&label);
            StatusCount {
                label,
                value,
                class,
                color: class.color(),
            }
        })
        .collect()
}

/// Tickets per opening day (first 10 characters of `open_date`), ascending.
///
/// Each bucket is ordered by the calendar date of the full `open_date` of
/// the first ticket that landed in it, so `M/D/YYYY H:MM:SS` values sort
/// correctly even though their label is cut mid-time. Buckets with no
/// parseable date follow in lexicographic order.
pub fn by_date(tickets: &[Ticket]) -> Vec<Count> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(Option<NaiveDate>, Count)> = Vec::new();
    for t in tickets {
        let label: String = t.open_date.chars().take(10).collect();
        match index.get(&label) {
            Some(&i) => buckets[i].1.value += 1,
            None => {
                index.insert(label.clone(), buckets.len());
                buckets.push((parse_calendar_date(&t.open_date), Count { label, value: 1 }));
            }
        }
    }
    buckets.sort_by(|(a_date, a), (b_date, b)| {
        (a_date.is_none(), a_date, &a.label).cmp(&(b_date.is_none(), b_date, &b.label))
    });
    buckets.into_iter().map(|(_, count)| count).collect()
}

fn count_in_first_seen_order(keys: impl Iterator<Item = String>) -> Vec<Count> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<Count> = Vec::new();
    for key in keys {
        match index.get(&key) {
            Some(&i) => counts[i].value += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push(Count { label: key, value: 1 });
            }
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
