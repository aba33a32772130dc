//! The dashboard's four chart shapes, built from query results.

use digidash_core::{FirmYearRecord, TrendPoint};
use plotters::style::RGBColor;

use crate::error::ChartError;
use crate::inline::InlineImage;
use crate::line_chart::{LineChart, Marker, Series, XAxis};

const COMPOSITE_LABEL: &str = "Composite index";
const NORMALIZED_LABEL: &str = "Normalized index (0-100)";

const STEEL_BLUE: RGBColor = RGBColor(70, 130, 180);
const ORANGE: RGBColor = RGBColor(255, 165, 0);
const GREEN: RGBColor = RGBColor(44, 160, 44);
const BRICK: RGBColor = RGBColor(214, 39, 40);

fn composite_points(trend: &[TrendPoint]) -> Vec<(i32, Option<f64>)> {
    trend.iter().map(|p| (p.year, p.composite_index)).collect()
}

fn normalized_points(trend: &[TrendPoint]) -> Vec<(i32, Option<f64>)> {
    trend.iter().map(|p| (p.year, p.normalized_index)).collect()
}

fn trend_chart(title: &str, trend: &[TrendPoint]) -> LineChart {
    LineChart::new(title, XAxis::Years)
        .x_desc("Year")
        .series(Series::new(COMPOSITE_LABEL, composite_points(trend), STEEL_BLUE))
        .series(
            Series::new(NORMALIZED_LABEL, normalized_points(trend), ORANGE).marker(Marker::Square),
        )
}

/// Yearly trend of one firm (or of every firm matching a name), with an
/// optional highlighted year.
///
/// The highlight is drawn only when the year is present in the trend.
///
/// # Errors
/// Returns [`ChartError`] if drawing fails.
pub fn firm_trend_chart(
    title: &str,
    trend: &[TrendPoint],
    highlight_year: Option<i32>,
) -> Result<InlineImage, ChartError> {
    let mut chart = trend_chart(title, trend).size(1000, 380);
    if let Some(point) = highlight_year.and_then(|y| trend.iter().find(|p| p.year == y)) {
        for value in [point.composite_index, point.normalized_index].into_iter().flatten() {
            chart = chart.highlight(point.year, value);
        }
    }
    chart.render()
}

/// Yearly mean of both indices across an industry.
///
/// # Errors
/// Returns [`ChartError`] if drawing fails.
pub fn industry_trend_chart(title: &str, trend: &[TrendPoint]) -> Result<InlineImage, ChartError> {
    trend_chart(title, trend).size(1000, 420).render()
}

/// Both firms' indices on one chart; the second firm is dashed.
///
/// # Errors
/// Returns [`ChartError`] if drawing fails.
pub fn comparison_chart(
    first_code: &str,
    first: &[TrendPoint],
    second_code: &str,
    second: &[TrendPoint],
) -> Result<InlineImage, ChartError> {
    LineChart::new(format!("{first_code} vs {second_code}: both indices"), XAxis::Years)
        .x_desc("Year")
        .size(1000, 420)
        .series(Series::new(
            format!("{first_code} {COMPOSITE_LABEL}"),
            composite_points(first),
            STEEL_BLUE,
        ))
        .series(
            Series::new(format!("{first_code} {NORMALIZED_LABEL}"), normalized_points(first), ORANGE)
                .marker(Marker::Square),
        )
        .series(
            Series::new(format!("{second_code} {COMPOSITE_LABEL}"), composite_points(second), GREEN)
                .dashed(true),
        )
        .series(
            Series::new(
                format!("{second_code} {NORMALIZED_LABEL}"),
                normalized_points(second),
                BRICK,
            )
            .marker(Marker::Square)
            .dashed(true),
        )
        .render()
}

/// Both indices across firms already sorted by rank; x labels are firm names.
///
/// # Errors
/// Returns [`ChartError`] if drawing fails.
pub fn ranking_chart(title: &str, ranked: &[FirmYearRecord]) -> Result<InlineImage, ChartError> {
    let positions = (0i32..).zip(ranked);
    let composite = positions.clone().map(|(i, r)| (i, r.composite_index)).collect();
    let normalized = positions.map(|(i, r)| (i, r.normalized_index)).collect();
    let labels = ranked.iter().map(|r| r.firm_name.clone()).collect();
    let step = (ranked.len() / 10).max(1);
    let width = u32::try_from(ranked.len().saturating_mul(50)).unwrap_or(u32::MAX).max(600);

    LineChart::new(title, XAxis::Categories { labels, step })
        .x_desc("Firm")
        .size(width, 420)
        .series(Series::new(COMPOSITE_LABEL, composite, STEEL_BLUE))
        .series(Series::new(NORMALIZED_LABEL, normalized, ORANGE).marker(Marker::Square))
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(year: i32, composite: f64) -> TrendPoint {
        TrendPoint { year, composite_index: Some(composite), normalized_index: Some(composite * 10.0) }
    }

    fn record(name: &str, composite: Option<f64>) -> FirmYearRecord {
        FirmYearRecord {
            firm_code: "600000".to_owned(),
            firm_name: name.to_owned(),
            year: 2021,
            industry_code: "J66".to_owned(),
            industry_name: "Banking".to_owned(),
            composite_index: composite,
            normalized_index: composite,
            extra: serde_json::Map::new(),
        }
    }

    fn count_circles(svg: &str) -> usize {
        svg.matches("<circle").count()
    }

    #[test]
    fn highlight_adds_markers_only_for_known_year() {
        let trend = vec![point(2020, 1.0), point(2021, 2.0)];

        let plain = firm_trend_chart("Firm", &trend, None).unwrap();
        let marked = firm_trend_chart("Firm", &trend, Some(2021)).unwrap();
        let unknown = firm_trend_chart("Firm", &trend, Some(1990)).unwrap();

        assert_eq!(count_circles(marked.svg()), count_circles(plain.svg()) + 2);
        assert_eq!(count_circles(unknown.svg()), count_circles(plain.svg()));
    }

    #[test]
    fn comparison_labels_both_firms() {
        let a = vec![point(1999, 0.0), point(2000, 1.0)];
        let b = vec![point(1999, 2.0), point(2000, 0.0)];

        let image = comparison_chart("600000", &a, "000002", &b).unwrap();

        assert!(image.svg().contains("600000 vs 000002"));
        assert!(image.svg().contains("000002 Composite index"));
    }

    #[test]
    fn ranking_chart_labels_firms() {
        let ranked: Vec<_> =
            ["Alpha", "Beta", "Gamma"].iter().map(|n| record(n, Some(1.0))).collect();

        let image = ranking_chart("Top firms", &ranked).unwrap();

        assert!(image.svg().contains("Alpha"));
        assert!(image.svg().contains("Gamma"));
    }

    #[test]
    fn empty_inputs_still_render() {
        assert!(industry_trend_chart("Nothing", &[]).is_ok());
        assert!(ranking_chart("Nothing", &[]).is_ok());
    }
}
