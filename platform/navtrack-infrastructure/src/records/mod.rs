pub mod file;
pub mod http;
pub mod table;

pub use file::FileRecordSource;
pub use http::{HttpRecordSource, DEFAULT_TIMEOUT_MS};
pub use table::{parse_date, parse_records, REQUIRED_COLUMNS};

use navtrack_domain::repositories::record_source::{LoadError, RecordSource};
use navtrack_domain::value_objects::daily_record::DailyRecord;

/// Routes `http://` and `https://` locations to the HTTP source and everything
/// else to the filesystem.
pub struct LocationRecordSource {
    http: HttpRecordSource,
    file: FileRecordSource,
}

impl LocationRecordSource {
    pub fn new(timeout_ms: u64) -> Result<Self, String> {
        Ok(Self {
            http: HttpRecordSource::new(timeout_ms)?,
            file: FileRecordSource,
        })
    }
}

pub fn is_remote(location: &str) -> bool {
    let lower = location.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

impl RecordSource for LocationRecordSource {
    fn load_records(&self, location: &str) -> Result<Vec<DailyRecord>, LoadError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(LoadError::Fetch("empty source location".to_string()));
        }
        if is_remote(location) {
            self.http.load_records(location)
        } else {
            self.file.load_records(location)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{is_remote, LocationRecordSource};
    use navtrack_domain::repositories::record_source::{LoadError, RecordSource};

    #[test]
    fn detects_remote_locations() {
        assert!(is_remote("https://example.com/a.csv"));
        assert!(is_remote("HTTP://example.com/a.csv"));
        assert!(!is_remote("data/track_record.csv"));
        assert!(!is_remote("file:///tmp/a.csv"));
    }

    #[test]
    fn empty_location_is_fetch_error() {
        let source = LocationRecordSource::new(1_000).expect("source");
        let err = source.load_records("  ").expect_err("expected failure");
        assert_eq!(err, LoadError::Fetch("empty source location".to_string()));
    }
}
