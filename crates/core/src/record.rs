//! Row types for the firm-year table and its two source inputs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of the merged firm-year table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirmYearRecord {
    pub firm_code: String,
    pub firm_name: String,
    pub year: i32,
    pub industry_code: String,
    pub industry_name: String,
    /// Composite digital transformation index.
    pub composite_index: Option<f64>,
    /// Normalized digital transformation index (0-100).
    pub normalized_index: Option<f64>,
    /// Uncurated source columns, keyed by their trimmed header.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

/// One row of the firm-year panel before classification is joined in.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub firm_code: String,
    pub firm_name: String,
    pub year: i32,
    pub composite_index: Option<f64>,
    pub normalized_index: Option<f64>,
    pub extra: Map<String, Value>,
}

impl PanelRow {
    #[must_use]
    pub fn new(firm_code: impl Into<String>, firm_name: impl Into<String>, year: i32) -> Self {
        Self {
            firm_code: firm_code.into(),
            firm_name: firm_name.into(),
            year,
            composite_index: None,
            normalized_index: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_indices(mut self, composite: Option<f64>, normalized: Option<f64>) -> Self {
        self.composite_index = composite;
        self.normalized_index = normalized;
        self
    }
}

/// Industry classification of one firm in one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub firm_code: String,
    pub year: i32,
    pub industry_code: String,
    pub industry_name: String,
}

impl Classification {
    #[must_use]
    pub fn new(
        firm_code: impl Into<String>,
        year: i32,
        industry_code: impl Into<String>,
        industry_name: impl Into<String>,
    ) -> Self {
        Self {
            firm_code: firm_code.into(),
            year,
            industry_code: industry_code.into(),
            industry_name: industry_name.into(),
        }
    }
}
