//! Static sheet corpora used across harnesses.
//!
//! Each corpus is a complete CSV document as the published sheet would serve
//! it. Harnesses evaluate aging against [`now`] so day counts are fixed.

use chrono::{DateTime, TimeZone, Utc};

/// The instant every harness ages tickets against.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
}

/// Headers as the festival sheet names them.
pub const SHEET_FESTIVAL: &str = "\
Ticket ID,COW Site,Issue Type,Open Date,Status
TKT-001,COW Site 1,Power,2024-03-01,Open
TKT-002,COW Site 2,Backhaul,2024-03-02,Pending
TKT-003,COW Site 1,Antenna,2024-03-02,Resolved
TKT-004,COW Site 3,Power,2024-03-05,Closed
TKT-005,COW Site 2,Cooling,2024-03-08,open
";

/// Short header names, different column order, CRLF line endings.
pub const SHEET_SHORT_HEADERS: &str = "status,id,site,type,date\r\nOPEN,A1,Site A,Power,2024-02-10\r\nclosed,A2,Site B,Fiber,2024-01-15\r\n";

/// Only two of the five fields have a column.
pub const SHEET_MISSING_COLUMNS: &str = "\
Site,Status
Site A,Open
Site B,
";

/// Rows shorter and longer than the header row.
pub const SHEET_RAGGED: &str = "\
id,site,issue,date,status
R1,Site A
R2,Site B,Power,2024-03-01,Open,extra,values
";

/// Header row and nothing else.
pub const SHEET_HEADER_ONLY: &str = "id,site,issue,date,status\n";

/// The three-row example used throughout the docs.
pub const SHEET_MINIMAL: &str = "id,site,status\nT1,Alpha,Open\nT2,Beta,Closed";

/// Dates in every accepted unquoted form, all on 2024-03-01.
pub const SHEET_DATE_FORMS: &str = "\
id,date
D1,2024-03-01
D2,2024-03-01 08:30
D3,2024-03-01T08:30:00
D4,2024-03-01T08:30:00Z
D5,2024/03/01
D6,3/1/2024
D7,3/1/2024 8:30:00
D8,1 Mar 2024
";

/// All corpora with at least one data row, named for rstest cases.
pub const DATA_CORPORA: &[(&str, &str)] = &[
    ("festival", SHEET_FESTIVAL),
    ("short_headers", SHEET_SHORT_HEADERS),
    ("missing_columns", SHEET_MISSING_COLUMNS),
    ("ragged", SHEET_RAGGED),
    ("minimal", SHEET_MINIMAL),
];

/// Generate a sheet with `n` data rows spread across four sites and the
/// known statuses.
pub fn sheet_with_rows(n: usize) -> String {
    const SITES: [&str; 4] = ["COW Site 1", "COW Site 2", "Site A", "Site B"];
    const STATUSES: [&str; 4] = ["Open", "Pending", "Resolved", "Closed"];
    let mut csv = String::from("Ticket ID,COW Site,Issue Type,Open Date,Status\n");
    for i in 0..n {
        csv.push_str(&format!(
            "TKT-{i:05},{},Power,2024-{:02}-{:02},{}\n",
            SITES[i % SITES.len()],
            i % 12 + 1,
            i % 28 + 1,
            STATUSES[i % STATUSES.len()],
        ));
    }
    csv
}
