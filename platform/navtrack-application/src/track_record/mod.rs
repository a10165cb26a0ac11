use navtrack_domain::entities::performance::{compute_perf, PerfConfig};
use navtrack_domain::entities::track_record::TrackRecordView;
use navtrack_domain::repositories::record_source::{LoadError, RecordSource};
use navtrack_domain::repositories::sink::PerformanceSink;
use std::time::Instant;
use tracing::info_span;

/// Loads the records behind `location` and computes the full track record
/// view. A load failure short-circuits: nothing is computed.
pub fn refresh(
    source: &dyn RecordSource,
    location: &str,
    config: &PerfConfig,
) -> Result<TrackRecordView, LoadError> {
    let _span = info_span!("refresh", location = %location).entered();
    let start = Instant::now();

    let records = match source.load_records(location) {
        Ok(records) => records,
        Err(err) => {
            metrics::counter!("navtrack.refresh_total", "result" => err.kind()).increment(1);
            tracing::warn!(error = %err, "refresh failed");
            return Err(err);
        }
    };

    let report = compute_perf(&records, config);
    let view = TrackRecordView::new(location, config, report);

    metrics::counter!("navtrack.refresh_total", "result" => "ok").increment(1);
    metrics::histogram!("navtrack.refresh_ms").record(start.elapsed().as_millis() as f64);
    metrics::gauge!("navtrack.records").set(records.len() as f64);
    tracing::info!(
        records = records.len(),
        period = %view.display.period,
        total_return = %view.display.total_return,
        sharpe = %view.display.sharpe,
        "track record refreshed"
    );
    Ok(view)
}

pub fn publish(view: &TrackRecordView, sink: &dyn PerformanceSink) -> Result<(), String> {
    sink.render(view)
}

/// Single user-facing message for a failed refresh.
pub fn failure_message(err: &LoadError) -> String {
    format!("Failed to load or parse CSV: {err}")
}
