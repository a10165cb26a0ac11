use crate::entities::performance::{PerfConfig, PerformanceReport};
use crate::services::display::DisplaySummary;
use crate::value_objects::series_point::{zip_series, SeriesPoint};
use serde::Serialize;

/// Everything a display sink needs for one refresh: the computed report, the
/// formatted summary table and the two chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRecordView {
    pub source: String,
    pub annualization_factor: f64,
    pub display: DisplaySummary,
    pub nav_series: Vec<SeriesPoint>,
    pub drawdown_series: Vec<SeriesPoint>,
    #[serde(skip)]
    pub report: PerformanceReport,
}

impl TrackRecordView {
    pub fn new(source: impl Into<String>, config: &PerfConfig, report: PerformanceReport) -> Self {
        Self {
            source: source.into(),
            annualization_factor: config.annualization_factor,
            display: DisplaySummary::from_summary(&report.summary),
            nav_series: zip_series(&report.dates, &report.nav),
            drawdown_series: zip_series(&report.dates, &report.drawdown),
            report,
        }
    }
}
