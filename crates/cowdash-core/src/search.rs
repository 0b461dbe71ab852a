//! Search layer: the ticket table's filter and pagination.
//!
//! A query is a case-insensitive substring matched against id, site, issue
//! type and status, taken exactly as typed (surrounding spaces are part of
//! the needle). The empty query matches everything. Pages are 1-based.

use crate::Ticket;

/// Shown in place of the table body when a page has no rows.
pub const NO_TICKETS_FOUND: &str = "No tickets found";

/// Tickets matching `query`, in their original order.
pub fn filter<'a>(tickets: &'a [Ticket], query: &str) -> Vec<&'a Ticket> {
    let needle = query.to_lowercase();
    tickets.iter().filter(|t| t.matches(&needle)).collect()
}

/// One rendered page of the filtered table.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub rows: Vec<&'a Ticket>,
    /// 1-based page number.
    pub number: usize,
    /// `ceil(matched / page_size)`; zero when nothing matched.
    pub total_pages: usize,
    pub matched: usize,
}

impl Page<'_> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `page/total` indicator; an empty result still shows `1/1`.
    pub fn indicator(&self) -> String {
        format!("{}/{}", self.number, self.total_pages.max(1))
    }

    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Search text plus current page for the ticket table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    query: String,
    page: usize,
    page_size: usize,
}

impl TableQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the search text; always returns to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Advance one page, never past the last page of `tickets`.
    pub fn next_page(&mut self, tickets: &[Ticket]) {
        let total = total_pages(filter(tickets, &self.query).len(), self.page_size);
        self.page = (self.page + 1).min(total.max(1));
    }

    /// Jump to `page`, clamped into `1..=total_pages`.
    pub fn go_to(&mut self, page: usize, tickets: &[Ticket]) {
        let total = total_pages(filter(tickets, &self.query).len(), self.page_size);
        self.page = page.clamp(1, total.max(1));
    }

    /// The rows of the current page.
    ///
    /// The page number is clamped when a refresh shrank the result set.
    pub fn apply<'a>(&self, tickets: &'a [Ticket]) -> Page<'a> {
        let matched = filter(tickets, &self.query);
        let total_pages = total_pages(matched.len(), self.page_size);
        let number = self.page.clamp(1, total_pages.max(1));
        let start = (number - 1) * self.page_size;
        let rows = matched
            .iter()
            .skip(start)
            .take(self.page_size)
            .copied()
            .collect();
        Page {
            rows,
            number,
            total_pages,
            matched: matched.len(),
        }
    }
}

fn total_pages(matched: usize, page_size: usize) -> usize {
    matched.div_ceil(page_size)
}

/// First `max` characters of `value`, for fixed-width table cells.
pub fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tickets(n: usize) -> Vec<Ticket> {
        (0..n)
            .map(|i| Ticket {
                id: format!("T{i}"),
                site: if i % 2 == 0 { "Alpha" } else { "Beta" }.to_string(),
                issue_type: "Power".to_string(),
                open_date: String::new(),
                status: "Open".to_string(),
                aging_days: 0,
            })
            .collect()
    }

    #[test]
    fn empty_query_matches_everything() {
        let t = tickets(7);
        assert_eq!(filter(&t, "").len(), 7);
    }

    #[test]
    fn spaces_in_the_query_are_significant() {
        let t = tickets(4);
        assert!(filter(&t, "   ").is_empty());
        assert!(filter(&t, "alpha ").is_empty());
        assert_eq!(filter(&t, "alpha").len(), 2);
    }

    #[test]
    fn filter_is_case_insensitive() {
        let t = tickets(4);
        assert_eq!(filter(&t, "ALPHA").len(), 2);
        assert_eq!(filter(&t, "power").len(), 4);
    }

    #[test]
    fn no_match_yields_empty_page() {
        let t = tickets(4);
        let mut q = TableQuery::new(5);
        q.set_query("zzz");
        let page = q.apply(&t);
        assert!(page.is_empty());
        assert_eq!(page.matched, 0);
        assert_eq!(page.indicator(), "1/1");
        assert!(!page.has_next());
    }

    #[test]
    fn pagination_splits_into_fixed_pages() {
        let t = tickets(12);
        let mut q = TableQuery::new(5);
        let first = q.apply(&t);
        assert_eq!(first.rows.len(), 5);
        assert_eq!(first.indicator(), "1/3");

        q.next_page(&t);
        q.next_page(&t);
        let last = q.apply(&t);
        assert_eq!(last.rows.len(), 2);
        assert_eq!(last.rows[0].id, "T10");

        // Clamped at the last page.
        q.next_page(&t);
        assert_eq!(q.page(), 3);

        q.prev_page();
        q.prev_page();
        q.prev_page();
        assert_eq!(q.page(), 1);
    }

    #[test]
    fn changing_query_resets_page() {
        let t = tickets(12);
        let mut q = TableQuery::new(5);
        q.next_page(&t);
        assert_eq!(q.page(), 2);
        q.set_query("beta");
        assert_eq!(q.page(), 1);
    }

    #[test]
    fn page_is_clamped_when_results_shrink() {
        let t = tickets(12);
        let mut q = TableQuery::new(5);
        q.go_to(3, &t);
        let page = q.apply(&t[..4]);
        assert_eq!(page.number, 1);
        assert_eq!(page.rows.len(), 4);
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("COW Site 1", 8), "COW Site");
        assert_eq!(truncate("Ünïcødé", 3), "Ünï");
        assert_eq!(truncate("ab", 5), "ab");
    }
}
