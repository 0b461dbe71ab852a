//! Test builders: ergonomic constructors for `Ticket` values.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use cowdash_core::Ticket;

// ---------------------------------------------------------------------------
// TicketBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Ticket`] test fixtures.
///
/// # Example
///
/// ```rust,ignore
/// let ticket = TicketBuilder::new("TKT-1")
///     .site("COW Site 1")
///     .status("Pending")
///     .opened("2024-03-01")
///     .build();
/// ```
pub struct TicketBuilder {
    ticket: Ticket,
}

impl TicketBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            ticket: Ticket {
                id: id.into(),
                site: "Site A".to_string(),
                issue_type: "Power".to_string(),
                open_date: "2024-03-01".to_string(),
                status: "Open".to_string(),
                aging_days: 0,
            },
        }
    }

    pub fn site(mut self, site: impl Into<String>) -> Self {
        self.ticket.site = site.into();
        self
    }

    pub fn issue(mut self, issue_type: impl Into<String>) -> Self {
        self.ticket.issue_type = issue_type.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.ticket.status = status.into();
        self
    }

    pub fn opened(mut self, open_date: impl Into<String>) -> Self {
        self.ticket.open_date = open_date.into();
        self
    }

    pub fn aging(mut self, days: u32) -> Self {
        self.ticket.aging_days = days;
        self
    }

    pub fn build(self) -> Ticket {
        self.ticket
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// A ticket at `site` with `status`, everything else defaulted.
pub fn ticket(id: &str, site: &str, status: &str) -> Ticket {
    TicketBuilder::new(id).site(site).status(status).build()
}

/// `n` tickets cycling through four sites and the known statuses.
pub fn build_tickets(n: usize) -> Vec<Ticket> {
    const STATUSES: [&str; 4] = ["Open", "Pending", "Resolved", "Closed"];
    (0..n)
        .map(|i| {
            TicketBuilder::new(format!("TKT-{i}"))
                .site(format!("Site {}", (b'A' + (i % 4) as u8) as char))
                .status(STATUSES[i % STATUSES.len()])
                .opened(format!("2024-03-{:02}", i % 28 + 1))
                .build()
        })
        .collect()
}
