use super::table::parse_records;
use navtrack_domain::repositories::record_source::{LoadError, RecordSource};
use navtrack_domain::value_objects::daily_record::DailyRecord;
use reqwest::blocking::Client;
use std::time::{Duration, Instant};

pub const DEFAULT_TIMEOUT_MS: u64 = 20_000;

/// Fetches the track record CSV over HTTP(S). One attempt per call; a timeout
/// or non-success status is reported as [`LoadError::Fetch`].
pub struct HttpRecordSource {
    pub timeout_ms: u64,
    client: Client,
}

impl HttpRecordSource {
    pub fn new(timeout_ms: u64) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|err| format!("failed to build http client: {err}"))?;
        Ok(Self { timeout_ms, client })
    }

    pub fn with_client(client: Client, timeout_ms: u64) -> Self {
        Self { timeout_ms, client }
    }

    fn fetch_body(&self, url: &str) -> Result<String, LoadError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| LoadError::Fetch(format!("request to {url} failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Fetch(format!("{url} returned HTTP {status}")));
        }

        response
            .text()
            .map_err(|err| LoadError::Fetch(format!("failed to read body from {url}: {err}")))
    }
}

impl RecordSource for HttpRecordSource {
    fn load_records(&self, location: &str) -> Result<Vec<DailyRecord>, LoadError> {
        let span = tracing::info_span!(
            "infra.source.http",
            url = %location,
            timeout_ms = self.timeout_ms
        );
        let _enter = span.enter();

        let start = Instant::now();
        metrics::counter!("navtrack.source.fetch_total", "kind" => "http").increment(1);
        let result = self
            .fetch_body(location)
            .and_then(|body| parse_records(body.as_bytes()));
        metrics::histogram!("navtrack.source.fetch_ms", "kind" => "http")
            .record(start.elapsed().as_millis() as f64);

        match &result {
            Ok(records) => tracing::debug!(records = records.len(), "fetched track record"),
            Err(err) => {
                metrics::counter!(
                    "navtrack.source.errors_total",
                    "kind" => "http",
                    "error" => err.kind()
                )
                .increment(1);
                tracing::warn!(error = %err, "track record fetch failed");
            }
        }
        result
    }
}
