use std::sync::Arc;

use digidash_chart::{comparison_chart, firm_trend_chart, industry_trend_chart, ranking_chart};
use digidash_core::{
    parse_year, rank_by_composite, reindex_years, yearly_trend, FirmYearRecord, RecordFilter,
    PANEL_FIRST_YEAR, PANEL_LAST_YEAR, RANKING_CHART_LIMIT,
};
use digidash_storage::{Storage, TableStats};

use crate::error::ServiceError;
use crate::views::{
    ComparisonView, FirmView, IndustryMembersView, IndustryView, RankingView, TrendView,
};

const FIRM_INPUT_REQUIRED: &str = "Please enter a stock code or firm name keyword.";
const FIRM_NOT_FOUND: &str = "No data found; the firm may not be listed yet.";
const COMPARE_INPUT_REQUIRED: &str = "Please fill in both firms' stock codes.";
const COMPARE_NOT_FOUND: &str = "Comparison firm data does not exist.";
const INDUSTRY_INPUT_REQUIRED: &str = "Please enter at least an industry code or industry name keyword.";
const INDUSTRY_YEAR_NOT_FOUND: &str = "No firms in this industry for that year.";
const INDUSTRY_NOT_FOUND: &str = "No data for this industry.";
const INDUSTRY_CHART_INPUT_REQUIRED: &str = "Please fill in the firm's stock code and year.";
const FIRM_MISSING: &str = "This firm does not exist.";

type Result<T> = std::result::Result<T, ServiceError>;

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn optional_year(raw: Option<&str>) -> Result<Option<i32>> {
    present(raw).map(parse_year).transpose().map_err(ServiceError::from)
}

/// Industry label used in titles: the code when given, the name keyword otherwise.
fn industry_label(code: Option<&str>, name: Option<&str>) -> String {
    code.or(name).unwrap_or_default().to_owned()
}

/// Lookups behind every dashboard page.
///
/// Methods are synchronous: storage access and chart drawing block, so async
/// callers should run them on a blocking thread.
pub struct DashboardService {
    storage: Arc<Storage>,
}

impl DashboardService {
    #[must_use]
    pub const fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Yearly trend of the firm(s) matching `code` and/or a name keyword.
    ///
    /// `year` only selects the highlighted point; it never narrows the query.
    pub fn firm_lookup(
        &self,
        code: Option<&str>,
        name: Option<&str>,
        year: Option<&str>,
    ) -> Result<FirmView> {
        let (code, name) = (present(code), present(name));
        if code.is_none() && name.is_none() {
            return Err(ServiceError::MissingInput(FIRM_INPUT_REQUIRED));
        }
        let year = optional_year(year)?;

        let filter = RecordFilter::default().firm_code(code).firm_name(name);
        let records = self.storage.query_records(&filter)?;
        let Some(first) = records.first() else {
            return Err(ServiceError::NotFound(FIRM_NOT_FOUND));
        };

        let trend = yearly_trend(&records);
        let highlight_year = year.filter(|y| trend.iter().any(|p| p.year == *y));
        let mut title = format!(
            "{} ({}) yearly digital transformation indices",
            first.firm_name, first.industry_name
        );
        if let Some(y) = year {
            title.push_str(&format!(" - {y} marked"));
        }
        let chart = firm_trend_chart(&title, &trend, highlight_year)?;

        tracing::debug!(rows = records.len(), years = trend.len(), "Firm lookup");
        Ok(FirmView {
            firm_code: first.firm_code.clone(),
            firm_name: first.firm_name.clone(),
            industry_name: first.industry_name.clone(),
            trend,
            highlight_year,
            chart,
        })
    }

    /// Industry ranking for a given year, or the yearly mean trend without one.
    pub fn industry_lookup(
        &self,
        code: Option<&str>,
        name: Option<&str>,
        year: Option<&str>,
    ) -> Result<IndustryView> {
        let (code, name) = (present(code), present(name));
        if code.is_none() && name.is_none() {
            return Err(ServiceError::MissingInput(INDUSTRY_INPUT_REQUIRED));
        }
        let label = industry_label(code, name);

        match optional_year(year)? {
            Some(year) => {
                let filter =
                    RecordFilter::default().industry_code(code).industry_name(name).year(Some(year));
                let ranking = self.ranking(&filter, label, year)?;
                Ok(IndustryView::Ranking(ranking))
            },
            None => {
                let filter = RecordFilter::default().industry_code(code).industry_name(name);
                let records = self.storage.query_records(&filter)?;
                if records.is_empty() {
                    return Err(ServiceError::NotFound(INDUSTRY_NOT_FOUND));
                }
                let trend = yearly_trend(&records);
                let title = format!("{label} industry: yearly digital transformation indices");
                let chart = industry_trend_chart(&title, &trend)?;
                Ok(IndustryView::Trend(TrendView { label, trend, chart }))
            },
        }
    }

    /// Every firm of an industry in one year, ranked by composite index.
    pub fn industry_members(
        &self,
        code: Option<&str>,
        name: Option<&str>,
        year: Option<&str>,
    ) -> Result<IndustryMembersView> {
        let (code, name) = (present(code), present(name));
        if code.is_none() && name.is_none() {
            return Err(ServiceError::MissingInput(INDUSTRY_INPUT_REQUIRED));
        }
        let Some(year) = optional_year(year)? else {
            return Err(ServiceError::MissingInput("Please enter a year."));
        };

        let filter = RecordFilter::default().industry_code(code).industry_name(name).year(Some(year));
        let records = self.storage.query_records(&filter)?;
        if records.is_empty() {
            return Err(ServiceError::NotFound(INDUSTRY_YEAR_NOT_FOUND));
        }
        Ok(IndustryMembersView {
            label: industry_label(code, name),
            year,
            members: rank_by_composite(records, None),
        })
    }

    /// Two firms side by side over the full panel year range.
    ///
    /// Years a firm has no data for are drawn at zero.
    pub fn compare_firms(&self, code1: Option<&str>, code2: Option<&str>) -> Result<ComparisonView> {
        let (Some(code1), Some(code2)) = (present(code1), present(code2)) else {
            return Err(ServiceError::MissingInput(COMPARE_INPUT_REQUIRED));
        };

        let first = self.storage.query_records(&RecordFilter::by_firm_code(code1))?;
        let second = self.storage.query_records(&RecordFilter::by_firm_code(code2))?;
        if first.is_empty() || second.is_empty() {
            return Err(ServiceError::NotFound(COMPARE_NOT_FOUND));
        }

        let first = reindex_years(&yearly_trend(&first), PANEL_FIRST_YEAR, PANEL_LAST_YEAR);
        let second = reindex_years(&yearly_trend(&second), PANEL_FIRST_YEAR, PANEL_LAST_YEAR);
        let chart = comparison_chart(code1, &first, code2, &second)?;

        Ok(ComparisonView {
            first_code: code1.to_owned(),
            second_code: code2.to_owned(),
            first,
            second,
            chart,
        })
    }

    /// Ranks the industry a firm belongs to in `year`.
    ///
    /// The industry is taken from the firm's earliest row and matched as a
    /// name keyword, so related industries sharing the name are included.
    pub fn industry_chart_for_firm(
        &self,
        code: Option<&str>,
        year: Option<&str>,
    ) -> Result<RankingView> {
        let (Some(code), Some(raw_year)) = (present(code), present(year)) else {
            return Err(ServiceError::MissingInput(INDUSTRY_CHART_INPUT_REQUIRED));
        };
        let year = parse_year(raw_year)?;

        let firm = self.storage.query_records(&RecordFilter::by_firm_code(code))?;
        let Some(first) = firm.first() else {
            return Err(ServiceError::NotFound(FIRM_MISSING));
        };
        let industry_name = first.industry_name.clone();

        let filter =
            RecordFilter::default().industry_name(Some(industry_name.as_str())).year(Some(year));
        self.ranking(&filter, industry_name, year)
    }

    /// Whole-table statistics.
    pub fn stats(&self) -> Result<TableStats> {
        Ok(self.storage.stats()?)
    }

    /// Raw rows for `filter`, capped at `limit`.
    pub fn records(&self, filter: &RecordFilter, limit: usize) -> Result<Vec<FirmYearRecord>> {
        Ok(self.storage.query_records_limited(filter, Some(limit))?)
    }

    fn ranking(&self, filter: &RecordFilter, label: String, year: i32) -> Result<RankingView> {
        let records = self.storage.query_records(filter)?;
        if records.is_empty() {
            return Err(ServiceError::NotFound(INDUSTRY_YEAR_NOT_FOUND));
        }
        let total = records.len();
        let top = rank_by_composite(records, Some(RANKING_CHART_LIMIT));
        let title = format!("{year} {label} industry: both indices of top {RANKING_CHART_LIMIT} firms");
        let chart = ranking_chart(&title, &top)?;

        tracing::debug!(total, shown = top.len(), "Industry ranking");
        Ok(RankingView { label, year, top, total, chart })
    }
}
