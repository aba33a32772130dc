//! Results of dashboard lookups, ready for page rendering.

use digidash_chart::InlineImage;
use digidash_core::{FirmYearRecord, TrendPoint};

/// Yearly trend of one firm lookup.
#[derive(Debug, Clone)]
pub struct FirmView {
    pub firm_code: String,
    pub firm_name: String,
    pub industry_name: String,
    pub trend: Vec<TrendPoint>,
    /// Requested year, when present in the trend.
    pub highlight_year: Option<i32>,
    pub chart: InlineImage,
}

/// Yearly mean trend of an industry.
#[derive(Debug, Clone)]
pub struct TrendView {
    pub label: String,
    pub trend: Vec<TrendPoint>,
    pub chart: InlineImage,
}

/// Top firms of an industry in one year.
#[derive(Debug, Clone)]
pub struct RankingView {
    pub label: String,
    pub year: i32,
    pub top: Vec<FirmYearRecord>,
    /// Number of firms in the industry that year, before truncation.
    pub total: usize,
    pub chart: InlineImage,
}

/// Industry lookup result: a ranking when a year was given, a trend otherwise.
#[derive(Debug, Clone)]
pub enum IndustryView {
    Trend(TrendView),
    Ranking(RankingView),
}

/// Every firm of an industry in one year, ranked.
#[derive(Debug, Clone)]
pub struct IndustryMembersView {
    pub label: String,
    pub year: i32,
    pub members: Vec<FirmYearRecord>,
}

/// Two firms over the full panel year range.
#[derive(Debug, Clone)]
pub struct ComparisonView {
    pub first_code: String,
    pub second_code: String,
    pub first: Vec<TrendPoint>,
    pub second: Vec<TrendPoint>,
    pub chart: InlineImage,
}
