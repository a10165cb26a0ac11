use chrono::{DateTime, NaiveDate, NaiveDateTime};
use navtrack_domain::repositories::record_source::LoadError;
use navtrack_domain::value_objects::daily_record::DailyRecord;
use serde::Deserialize;
use std::io::Read;

pub const REQUIRED_COLUMNS: [&str; 4] = ["date", "equity", "deposit", "withdrawal"];

#[derive(Debug, Deserialize)]
struct TrackRecordRow {
    date: String,
    equity: f64,
    deposit: f64,
    withdrawal: f64,
}

/// Parses a `date,equity,deposit,withdrawal` table into records sorted by date.
///
/// Header names are matched case-sensitively; extra columns are ignored. Any
/// bad row rejects the whole table.
pub fn parse_records<R: Read>(input: R) -> Result<Vec<DailyRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|err| LoadError::Parse(format!("failed to read CSV header: {err}")))?
        .clone();
    verify_required_columns(&headers)?;

    let mut records = Vec::new();
    for (idx, result) in reader.deserialize::<TrackRecordRow>().enumerate() {
        // Row 1 is the header.
        let line = idx + 2;
        let row = result
            .map_err(|err| LoadError::Parse(format!("failed to parse CSV row {line}: {err}")))?;
        let date = parse_date(&row.date)
            .map_err(|err| LoadError::Parse(format!("row {line}: {err}")))?;
        records.push(DailyRecord::new(date, row.equity, row.deposit, row.withdrawal));
    }

    if records.is_empty() {
        return Err(LoadError::Parse("no records in CSV".to_string()));
    }

    records.sort_by_key(|record| record.date);
    if let Some(pair) = records.windows(2).find(|pair| pair[0].date == pair[1].date) {
        return Err(LoadError::Parse(format!("duplicate date: {}", pair[0].date)));
    }

    Ok(records)
}

fn verify_required_columns(headers: &csv::StringRecord) -> Result<(), LoadError> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(LoadError::Parse(format!(
                "missing required column: {column}"
            )));
        }
    }
    Ok(())
}

pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.date_naive());
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.date());
        }
    }
    for format in ["%Y/%m/%d", "%Y%m%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date);
        }
    }

    Err(format!("unsupported date format: {value}"))
}
