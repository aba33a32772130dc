//! Per-year aggregation and ranking over query results.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::FirmYearRecord;

/// Mean of both indices for one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub composite_index: Option<f64>,
    pub normalized_index: Option<f64>,
}

#[derive(Default)]
struct Accumulator {
    composite_sum: f64,
    composite_count: u32,
    normalized_sum: f64,
    normalized_count: u32,
}

impl Accumulator {
    fn add(&mut self, record: &FirmYearRecord) {
        if let Some(v) = record.composite_index {
            self.composite_sum += v;
            self.composite_count = self.composite_count.saturating_add(1);
        }
        if let Some(v) = record.normalized_index {
            self.normalized_sum += v;
            self.normalized_count = self.normalized_count.saturating_add(1);
        }
    }

    fn mean(sum: f64, count: u32) -> Option<f64> {
        (count > 0).then(|| sum / f64::from(count))
    }
}

/// Groups records by year and averages each index over its non-null values.
///
/// Output is sorted by year. A year whose values are all null yields `None`
/// for that index rather than being dropped.
#[must_use]
pub fn yearly_trend(records: &[FirmYearRecord]) -> Vec<TrendPoint> {
    let mut by_year: BTreeMap<i32, Accumulator> = BTreeMap::new();
    for record in records {
        by_year.entry(record.year).or_default().add(record);
    }
    by_year
        .into_iter()
        .map(|(year, acc)| TrendPoint {
            year,
            composite_index: Accumulator::mean(acc.composite_sum, acc.composite_count),
            normalized_index: Accumulator::mean(acc.normalized_sum, acc.normalized_count),
        })
        .collect()
}

/// Expands a trend to one point per year in `first..=last`.
///
/// Absent years become zero points. Known years keep their values, so a null
/// mean stays null and charts as a gap. Points outside the range are discarded.
#[must_use]
pub fn reindex_years(trend: &[TrendPoint], first: i32, last: i32) -> Vec<TrendPoint> {
    let known: BTreeMap<i32, &TrendPoint> = trend.iter().map(|p| (p.year, p)).collect();
    (first..=last)
        .map(|year| {
            known.get(&year).map_or(
                TrendPoint { year, composite_index: Some(0.0), normalized_index: Some(0.0) },
                |p| **p,
            )
        })
        .collect()
}

fn compare_composite_desc(a: &FirmYearRecord, b: &FirmYearRecord) -> Ordering {
    match (a.composite_index, b.composite_index) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sorts records by composite index, highest first, with nulls last.
///
/// The sort is stable, so ties keep query order. `limit` truncates the result.
#[must_use]
pub fn rank_by_composite(mut records: Vec<FirmYearRecord>, limit: Option<usize>) -> Vec<FirmYearRecord> {
    records.sort_by(compare_composite_desc);
    if let Some(limit) = limit {
        records.truncate(limit);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn record(code: &str, year: i32, composite: Option<f64>, normalized: Option<f64>) -> FirmYearRecord {
        FirmYearRecord {
            firm_code: code.to_owned(),
            firm_name: format!("firm {code}"),
            year,
            industry_code: "C27".to_owned(),
            industry_name: "Pharmaceuticals".to_owned(),
            composite_index: composite,
            normalized_index: normalized,
            extra: Map::new(),
        }
    }

    #[test]
    fn trend_averages_per_year_and_sorts() {
        let records = vec![
            record("a", 2021, Some(2.0), Some(20.0)),
            record("b", 2020, Some(1.0), None),
            record("c", 2021, Some(4.0), Some(40.0)),
        ];

        let trend = yearly_trend(&records);

        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].year, 2020);
        assert_eq!(trend[0].composite_index, Some(1.0));
        assert_eq!(trend[0].normalized_index, None);
        assert_eq!(trend[1].composite_index, Some(3.0));
        assert_eq!(trend[1].normalized_index, Some(30.0));
    }

    #[test]
    fn trend_of_nothing_is_empty() {
        assert!(yearly_trend(&[]).is_empty());
    }

    #[test]
    fn reindex_fills_missing_years_with_zero() {
        let trend = vec![TrendPoint { year: 2001, composite_index: Some(5.0), normalized_index: None }];

        let full = reindex_years(&trend, 1999, 2002);

        assert_eq!(full.len(), 4);
        assert_eq!(full[0].composite_index, Some(0.0));
        assert_eq!(full[2].composite_index, Some(5.0));
        assert_eq!(full[2].normalized_index, None);
        assert_eq!(full[3].year, 2002);
        assert_eq!(full[3].normalized_index, Some(0.0));
    }

    #[test]
    fn reindex_keeps_null_means_of_known_years() {
        let trend = vec![TrendPoint { year: 2001, composite_index: None, normalized_index: None }];

        let full = reindex_years(&trend, 2000, 2001);

        assert_eq!(full[0].composite_index, Some(0.0));
        assert_eq!(full[1].composite_index, None);
        assert_eq!(full[1].normalized_index, None);
    }

    #[test]
    fn ranking_puts_nulls_last_and_truncates() {
        let records = vec![
            record("low", 2021, Some(1.0), None),
            record("none", 2021, None, None),
            record("high", 2021, Some(9.0), None),
            record("mid", 2021, Some(5.0), None),
        ];

        let ranked = rank_by_composite(records.clone(), None);
        let codes: Vec<_> = ranked.iter().map(|r| r.firm_code.as_str()).collect();
        assert_eq!(codes, ["high", "mid", "low", "none"]);

        let top = rank_by_composite(records, Some(2));
        assert_eq!(top.len(), 2);
        assert_eq!(top[1].firm_code, "mid");
    }
}
