//! Query-string types (Deserialize)
//!
//! Every field is an optional string so that blank or malformed values reach
//! the service layer, which owns validation and its messages.

use digidash_core::{parse_year, RecordFilter, DEFAULT_QUERY_LIMIT, MAX_QUERY_LIMIT};
use serde::Deserialize;

use crate::api_error::ApiError;

const fn default_limit() -> usize {
    DEFAULT_QUERY_LIMIT
}

/// `/query`
#[derive(Debug, Default, Deserialize)]
pub struct FirmQuery {
    pub code: Option<String>,
    pub name: Option<String>,
    pub year: Option<String>,
}

/// `/compare`
#[derive(Debug, Default, Deserialize)]
pub struct CompareQuery {
    pub code1: Option<String>,
    pub code2: Option<String>,
}

/// `/industry` and `/industry_full`
#[derive(Debug, Default, Clone, Deserialize)]
pub struct IndustryQuery {
    pub ind_code: Option<String>,
    pub ind_name: Option<String>,
    pub year: Option<String>,
}

/// `/industry_bar`
#[derive(Debug, Default, Deserialize)]
pub struct IndustryBarQuery {
    pub code: Option<String>,
    pub year: Option<String>,
}

/// `/api/records`
#[derive(Debug, Deserialize)]
pub struct RecordsQuery {
    pub code: Option<String>,
    pub name: Option<String>,
    pub year: Option<String>,
    pub ind_code: Option<String>,
    pub ind_name: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl RecordsQuery {
    /// Cap limit to prevent unbounded responses.
    pub fn capped_limit(&self) -> usize {
        self.limit.clamp(1, MAX_QUERY_LIMIT)
    }

    pub fn to_filter(&self) -> Result<RecordFilter, ApiError> {
        let year = match self.year.as_deref().map(str::trim).filter(|y| !y.is_empty()) {
            Some(raw) => Some(parse_year(raw).map_err(|e| ApiError::BadRequest(e.to_string()))?),
            None => None,
        };
        Ok(RecordFilter::default()
            .firm_code(self.code.as_deref())
            .firm_name(self.name.as_deref())
            .year(year)
            .industry_code(self.ind_code.as_deref())
            .industry_name(self.ind_name.as_deref()))
    }
}
