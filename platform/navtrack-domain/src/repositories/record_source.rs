use crate::value_objects::daily_record::DailyRecord;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The source could not be retrieved (unreachable, timeout, non-success status).
    #[error("fetch error: {0}")]
    Fetch(String),
    /// The content is not a valid track record table.
    #[error("parse error: {0}")]
    Parse(String),
}

impl LoadError {
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::Fetch(_) => "fetch",
            LoadError::Parse(_) => "parse",
        }
    }
}

/// Supplies the daily records behind a location (path or URL).
///
/// Implementations return records sorted by ascending date and fail as a whole:
/// a partially parsed table is never returned.
pub trait RecordSource {
    fn load_records(&self, location: &str) -> Result<Vec<DailyRecord>, LoadError>;
}

impl<T: RecordSource + ?Sized> RecordSource for &T {
    fn load_records(&self, location: &str) -> Result<Vec<DailyRecord>, LoadError> {
        (**self).load_records(location)
    }
}

impl<T: RecordSource + ?Sized> RecordSource for Box<T> {
    fn load_records(&self, location: &str) -> Result<Vec<DailyRecord>, LoadError> {
        (**self).load_records(location)
    }
}
