//! Optional equality/substring filters over the firm-year table.

use serde::{Deserialize, Serialize};

/// Filter set for a firm-year query. Every field is optional; absent and
/// blank fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Exact firm code match.
    pub firm_code: Option<String>,
    /// Substring match on the firm name.
    pub firm_name: Option<String>,
    /// Exact year match.
    pub year: Option<i32>,
    /// Case-insensitive exact industry code match.
    pub industry_code: Option<String>,
    /// Substring match on the industry name.
    pub industry_name: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_owned)
}

impl RecordFilter {
    #[must_use]
    pub fn by_firm_code(code: &str) -> Self {
        Self { firm_code: non_blank(Some(code)), ..Self::default() }
    }

    #[must_use]
    pub fn firm_code(mut self, code: Option<&str>) -> Self {
        self.firm_code = non_blank(code);
        self
    }

    #[must_use]
    pub fn firm_name(mut self, name: Option<&str>) -> Self {
        self.firm_name = non_blank(name);
        self
    }

    #[must_use]
    pub fn year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    #[must_use]
    pub fn industry_code(mut self, code: Option<&str>) -> Self {
        self.industry_code = non_blank(code);
        self
    }

    #[must_use]
    pub fn industry_name(mut self, name: Option<&str>) -> Self {
        self.industry_name = non_blank(name);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_dropped() {
        let filter = RecordFilter::default().firm_code(Some("  ")).firm_name(Some(""));
        assert_eq!(filter, RecordFilter::default());
    }

    #[test]
    fn values_are_trimmed() {
        let filter = RecordFilter::default().industry_code(Some(" c27 "));
        assert_eq!(filter.industry_code.as_deref(), Some("c27"));
    }
}
