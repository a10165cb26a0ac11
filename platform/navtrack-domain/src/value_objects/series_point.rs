use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

pub fn zip_series(dates: &[NaiveDate], values: &[f64]) -> Vec<SeriesPoint> {
    dates
        .iter()
        .zip(values.iter())
        .map(|(date, value)| SeriesPoint {
            date: *date,
            value: *value,
        })
        .collect()
}
