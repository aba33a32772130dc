//! Generic multi-series line chart drawn to an SVG string.

use plotters::coord::types::{RangedCoordf64, RangedCoordi32};
use plotters::prelude::*;

use crate::error::{draw_err, ChartError};
use crate::inline::InlineImage;

const CAPTION_FONT: (&str, u32) = ("sans-serif", 18);
const LABEL_FONT: (&str, u32) = ("sans-serif", 12);

type IndexCoord = Cartesian2d<RangedCoordi32, RangedCoordf64>;

/// Point marker drawn on every non-null value of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
}

/// One line on the chart. `None` values break the line.
#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub points: Vec<(i32, Option<f64>)>,
    pub color: RGBColor,
    pub marker: Marker,
    pub dashed: bool,
}

impl Series {
    #[must_use]
    pub fn new(label: impl Into<String>, points: Vec<(i32, Option<f64>)>, color: RGBColor) -> Self {
        Self { label: label.into(), points, color, marker: Marker::Circle, dashed: false }
    }

    #[must_use]
    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    #[must_use]
    pub fn dashed(mut self, dashed: bool) -> Self {
        self.dashed = dashed;
        self
    }

    fn values(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.points.iter().filter_map(|&(x, y)| y.map(|y| (x, y)))
    }

    /// Contiguous runs of non-null points.
    fn segments(&self) -> Vec<Vec<(i32, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for &(x, y) in &self.points {
            match y {
                Some(y) => current.push((x, y)),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {},
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

/// How x coordinates are labelled.
#[derive(Debug, Clone)]
pub enum XAxis {
    /// x values are calendar years.
    Years,
    /// x values are positions into `labels`; every `step`-th one is labelled.
    Categories { labels: Vec<String>, step: usize },
}

/// A line chart description, rendered with [`LineChart::render`].
#[derive(Debug, Clone)]
pub struct LineChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub x_axis: XAxis,
    pub series: Vec<Series>,
    /// Points emphasized with a large red marker.
    pub highlights: Vec<(i32, f64)>,
    pub size: (u32, u32),
}

impl LineChart {
    #[must_use]
    pub fn new(title: impl Into<String>, x_axis: XAxis) -> Self {
        Self {
            title: title.into(),
            x_desc: String::new(),
            y_desc: "Index".to_owned(),
            x_axis,
            series: Vec::new(),
            highlights: Vec::new(),
            size: (1000, 400),
        }
    }

    #[must_use]
    pub fn x_desc(mut self, desc: impl Into<String>) -> Self {
        self.x_desc = desc.into();
        self
    }

    #[must_use]
    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    #[must_use]
    pub fn highlight(mut self, x: i32, y: f64) -> Self {
        self.highlights.push((x, y));
        self
    }

    #[must_use]
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    fn x_range(&self) -> (i32, i32) {
        let xs = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0));
        let (min, max) = xs.fold((i32::MAX, i32::MIN), |(lo, hi), x| (lo.min(x), hi.max(x)));
        if min > max {
            return (0, 1);
        }
        (min.saturating_sub(1), max.saturating_add(1))
    }

    fn y_range(&self) -> (f64, f64) {
        let ys = self
            .series
            .iter()
            .flat_map(Series::values)
            .map(|p| p.1)
            .chain(self.highlights.iter().map(|p| p.1));
        let (min, max) =
            ys.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)));
        if !min.is_finite() || !max.is_finite() {
            return (0.0, 1.0);
        }
        let pad = if (max - min).abs() < f64::EPSILON { 1.0 } else { (max - min) * 0.08 };
        (min - pad, max + pad)
    }

    fn format_x(&self, x: i32) -> String {
        match &self.x_axis {
            XAxis::Years => x.to_string(),
            XAxis::Categories { labels, step } => usize::try_from(x)
                .ok()
                .filter(|i| i % (*step).max(1) == 0)
                .and_then(|i| labels.get(i))
                .cloned()
                .unwrap_or_default(),
        }
    }

    /// Draws the chart to an SVG document.
    ///
    /// # Errors
    /// Returns [`ChartError::Draw`] if plotters fails to lay out or draw an element.
    pub fn render(&self) -> Result<InlineImage, ChartError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let (x0, x1) = self.x_range();
            let (y0, y1) = self.y_range();
            let rotated = matches!(self.x_axis, XAxis::Categories { .. });

            let mut chart = ChartBuilder::on(&root)
                .caption(&self.title, CAPTION_FONT)
                .margin(12)
                .x_label_area_size(if rotated { 110 } else { 45 })
                .y_label_area_size(60)
                .build_cartesian_2d(x0..x1, y0..y1)
                .map_err(draw_err)?;

            let x_label_count = usize::try_from(x1.saturating_sub(x0)).unwrap_or(1).saturating_add(1);
            let formatter = |x: &i32| self.format_x(*x);
            let x_label_style = if rotated {
                LABEL_FONT.into_font().transform(FontTransform::Rotate90)
            } else {
                LABEL_FONT.into_font()
            };
            chart
                .configure_mesh()
                .x_desc(self.x_desc.as_str())
                .y_desc(self.y_desc.as_str())
                .x_labels(x_label_count)
                .x_label_formatter(&formatter)
                .x_label_style(x_label_style)
                .light_line_style(BLACK.mix(0.05))
                .draw()
                .map_err(draw_err)?;

            for series in &self.series {
                Self::draw_line_series(&mut chart, series)?;
            }

            if !self.highlights.is_empty() {
                chart
                    .draw_series(self.highlights.iter().map(|&p| Circle::new(p, 8, RED.filled())))
                    .map_err(draw_err)?;
            }

            if !self.series.is_empty() {
                chart
                    .configure_series_labels()
                    .background_style(WHITE.mix(0.8))
                    .border_style(BLACK)
                    .label_font(LABEL_FONT)
                    .draw()
                    .map_err(draw_err)?;
            }

            root.present().map_err(draw_err)?;
        }
        tracing::debug!(title = %self.title, bytes = svg.len(), "Rendered chart");
        Ok(InlineImage::from_svg(svg))
    }

    fn draw_line_series<DB: DrawingBackend>(
        chart: &mut ChartContext<'_, DB, IndexCoord>,
        series: &Series,
    ) -> Result<(), ChartError> {
        let color = series.color;
        let style = color.stroke_width(2);

        for (i, segment) in series.segments().into_iter().enumerate() {
            let annotation = if series.dashed {
                chart.draw_series(DashedLineSeries::new(segment, 6, 4, style)).map_err(draw_err)?
            } else {
                chart.draw_series(LineSeries::new(segment, style)).map_err(draw_err)?
            };
            if i == 0 {
                annotation.label(series.label.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
            }
        }

        match series.marker {
            Marker::Circle => {
                chart
                    .draw_series(series.values().map(|p| Circle::new(p, 4, color.filled())))
                    .map_err(draw_err)?;
            },
            Marker::Square => {
                chart
                    .draw_series(series.values().map(|p| {
                        EmptyElement::at(p) + Rectangle::new([(-4, -4), (4, 4)], color.filled())
                    }))
                    .map_err(draw_err)?;
            },
        }
        Ok(())
    }
}
