//! Shared constants for digidash.

/// Industry code written for firm-years with no classification match.
pub const UNCLASSIFIED_CODE: &str = "—";

/// Industry name written for firm-years with no classification match.
pub const UNCLASSIFIED_NAME: &str = "Not yet classified";

/// First year of the firm-year panel.
pub const PANEL_FIRST_YEAR: i32 = 1999;

/// Last year of the firm-year panel; classifications are carried forward up to it.
pub const PANEL_LAST_YEAR: i32 = 2023;

/// Number of firms drawn on industry ranking charts.
pub const RANKING_CHART_LIMIT: usize = 20;

/// Default number of rows returned by the JSON records endpoint.
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// Maximum number of rows returned by the JSON records endpoint (DoS protection).
pub const MAX_QUERY_LIMIT: usize = 5000;
