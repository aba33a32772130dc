//! Chart rendering for digidash
//!
//! Draws index series as SVG line charts with plotters and wraps them as
//! inline images for embedding in HTML.

mod error;
mod inline;
mod line_chart;
mod views;

pub use error::ChartError;
pub use inline::InlineImage;
pub use line_chart::{LineChart, Marker, Series, XAxis};
pub use views::{comparison_chart, firm_trend_chart, industry_trend_chart, ranking_chart};
