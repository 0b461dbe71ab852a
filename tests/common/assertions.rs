//! Domain-specific assertion macros for cowdash harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! ticket or count went wrong.

// ---------------------------------------------------------------------------
// Ticket assertions
// ---------------------------------------------------------------------------

/// Assert the displayed fields of a ticket.
///
/// ```rust,ignore
/// assert_ticket!(tickets[0], id: "TKT-001", site: "COW Site 1", status: "Open");
/// ```
#[macro_export]
macro_rules! assert_ticket {
    ($ticket:expr, $($field:ident : $value:expr),+ $(,)?) => {{
        let ticket: &cowdash_core::Ticket = &$ticket;
        $(
            pretty_assertions::assert_eq!(
                ticket.$field, $value,
                "assert_ticket! failed on field `{}` of {:?}", stringify!($field), ticket
            );
        )+
    }};
}

/// Assert that no ticket in a slice has an empty id, site, issue type or
/// status.
#[macro_export]
macro_rules! assert_fields_populated {
    ($tickets:expr) => {{
        let tickets: &[cowdash_core::Ticket] = &$tickets;
        for (i, t) in tickets.iter().enumerate() {
            if t.id.is_empty() || t.site.is_empty() || t.issue_type.is_empty() || t.status.is_empty() {
                panic!("assert_fields_populated! failed: ticket {i} has an empty field: {t:?}");
            }
        }
    }};
}

// ---------------------------------------------------------------------------
// Count assertions
// ---------------------------------------------------------------------------

/// Assert a reducer's output as `(label, value)` pairs, in order.
///
/// ```rust,ignore
/// assert_counts!(metrics.by_site, [("Site A", 2), ("Site B", 1)]);
/// ```
#[macro_export]
macro_rules! assert_counts {
    ($counts:expr, [$(($label:expr, $value:expr)),* $(,)?]) => {{
        let actual: Vec<(String, usize)> = $counts
            .iter()
            .map(|c| (c.label.to_string(), c.value))
            .collect();
        let expected: Vec<(String, usize)> = vec![$(($label.to_string(), $value)),*];
        pretty_assertions::assert_eq!(actual, expected, "assert_counts! failed");
    }};
}

/// Assert the ticket ids of a slice (or page rows), in order.
#[macro_export]
macro_rules! assert_ids {
    ($tickets:expr, [$($id:expr),* $(,)?]) => {{
        let actual: Vec<&str> = $tickets.iter().map(|t| t.id.as_str()).collect();
        let expected: Vec<&str> = vec![$($id),*];
        pretty_assertions::assert_eq!(actual, expected, "assert_ids! failed");
    }};
}
