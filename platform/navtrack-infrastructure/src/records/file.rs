use super::table::parse_records;
use navtrack_domain::repositories::record_source::{LoadError, RecordSource};
use navtrack_domain::value_objects::daily_record::DailyRecord;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads the track record from a local CSV file. Accepts plain paths and
/// `file://` locations.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileRecordSource;

impl FileRecordSource {
    pub fn load_path(&self, path: &Path) -> Result<Vec<DailyRecord>, LoadError> {
        let _span = tracing::info_span!("infra.source.file", path = %path.display()).entered();
        metrics::counter!("navtrack.source.fetch_total", "kind" => "file").increment(1);

        let file = File::open(path).map_err(|err| {
            metrics::counter!("navtrack.source.errors_total", "kind" => "file", "error" => "fetch")
                .increment(1);
            LoadError::Fetch(format!("failed to open {}: {err}", path.display()))
        })?;
        let records = parse_records(BufReader::new(file))?;
        tracing::debug!(records = records.len(), "loaded track record file");
        Ok(records)
    }
}

impl RecordSource for FileRecordSource {
    fn load_records(&self, location: &str) -> Result<Vec<DailyRecord>, LoadError> {
        let path = location.strip_prefix("file://").unwrap_or(location);
        self.load_path(Path::new(path))
    }
}

#[cfg(test)]
mod tests {
    use super::FileRecordSource;
    use navtrack_domain::repositories::record_source::{LoadError, RecordSource};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_tmp_path(name: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir().join(format!("navtrack_{name}_{}_{}", std::process::id(), now))
    }

    #[test]
    fn loads_plain_path_and_file_url() {
        let path = unique_tmp_path("file_source.csv");
        fs::write(
            &path,
            "date,equity,deposit,withdrawal\n2024-01-03,101,0,0\n2024-01-02,100,0,0\n",
        )
        .expect("write csv");

        let source = FileRecordSource;
        let records = source
            .load_records(path.to_str().expect("utf8 path"))
            .expect("load");
        assert_eq!(records.len(), 2);
        assert!(records[0].date < records[1].date);

        let url = format!("file://{}", path.display());
        let again = source.load_records(&url).expect("load via url");
        assert_eq!(records, again);
    }

    #[test]
    fn missing_file_is_fetch_error() {
        let path = unique_tmp_path("does_not_exist.csv");
        let err = FileRecordSource
            .load_records(path.to_str().expect("utf8 path"))
            .expect_err("expected failure");
        assert!(matches!(err, LoadError::Fetch(msg) if msg.contains("failed to open")));
    }
}
