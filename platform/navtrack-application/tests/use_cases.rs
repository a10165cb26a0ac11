use chrono::NaiveDate;
use navtrack_application::config::parse_config;
use navtrack_application::track_record::{failure_message, publish, refresh};
use navtrack_domain::entities::performance::PerfConfig;
use navtrack_domain::entities::track_record::TrackRecordView;
use navtrack_domain::repositories::record_source::{LoadError, RecordSource};
use navtrack_domain::repositories::sink::PerformanceSink;
use navtrack_domain::value_objects::daily_record::DailyRecord;
use navtrack_infrastructure::cache::CachedRecordSource;
use navtrack_infrastructure::records::FileRecordSource;
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).expect("valid date")
}

struct FakeSource {
    result: Result<Vec<DailyRecord>, LoadError>,
    calls: Cell<usize>,
}

impl FakeSource {
    fn ok(records: Vec<DailyRecord>) -> Self {
        Self {
            result: Ok(records),
            calls: Cell::new(0),
        }
    }

    fn failing(err: LoadError) -> Self {
        Self {
            result: Err(err),
            calls: Cell::new(0),
        }
    }
}

impl RecordSource for FakeSource {
    fn load_records(&self, _location: &str) -> Result<Vec<DailyRecord>, LoadError> {
        self.calls.set(self.calls.get() + 1);
        self.result.clone()
    }
}

#[derive(Default)]
struct RecordingSink {
    rendered: RefCell<Vec<serde_json::Value>>,
}

impl PerformanceSink for RecordingSink {
    fn render(&self, view: &TrackRecordView) -> Result<(), String> {
        self.rendered.borrow_mut().push(serde_json::json!({
            "source": view.source,
            "period": view.display.period,
            "nav_points": view.nav_series.len(),
            "drawdown_points": view.drawdown_series.len(),
        }));
        Ok(())
    }
}

fn unique_tmp_path(name: &str) -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir().join(format!("navtrack_{name}_{}_{}", std::process::id(), now))
}

#[test]
fn refresh_computes_view_for_worked_example() {
    let source = FakeSource::ok(vec![
        DailyRecord::new(date(2), 100.0, 0.0, 0.0),
        DailyRecord::new(date(3), 110.0, 0.0, 0.0),
        DailyRecord::new(date(4), 99.0, 0.0, 0.0),
    ]);

    let view = refresh(&source, "memory://worked", &PerfConfig::default()).expect("refresh");

    assert_eq!(view.source, "memory://worked");
    assert_eq!(view.display.period, "2024-01-02 → 2024-01-04");
    assert_eq!(view.display.total_return, "-1.00%");
    assert_eq!(view.display.max_drawdown, "-10.00%");
    assert_eq!(view.nav_series.len(), 3);
    assert!((view.nav_series[2].value - 0.99).abs() < 1e-12);
    assert!((view.report.summary.max_drawdown - (0.99 / 1.10 - 1.0)).abs() < 1e-12);
}

#[test]
fn refresh_failure_short_circuits_publish() {
    let source = FakeSource::failing(LoadError::Fetch("HTTP 503".to_string()));
    let sink = RecordingSink::default();

    let result = refresh(&source, "https://example.invalid/x.csv", &PerfConfig::default())
        .and_then(|view| {
            publish(&view, &sink).expect("publish");
            Ok(view)
        });

    let err = result.expect_err("expected failure");
    assert_eq!(err.kind(), "fetch");
    assert_eq!(
        failure_message(&err),
        "Failed to load or parse CSV: fetch error: HTTP 503"
    );
    assert!(sink.rendered.borrow().is_empty());
}

#[test]
fn publish_hands_view_to_sink() {
    let source = FakeSource::ok(vec![
        DailyRecord::new(date(2), 100.0, 0.0, 0.0),
        DailyRecord::new(date(3), 100.0, 0.0, 0.0),
    ]);
    let sink = RecordingSink::default();

    let view = refresh(&source, "memory://flat", &PerfConfig::default()).expect("refresh");
    assert_eq!(view.display.sharpe, "nan");
    publish(&view, &sink).expect("publish");

    let rendered = sink.rendered.borrow();
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0]["nav_points"], 2);
    assert_eq!(rendered[0]["drawdown_points"], 2);
}

#[test]
fn refresh_reads_csv_file_with_cashflows() {
    let path = unique_tmp_path("use_case.csv");
    fs::write(
        &path,
        "date,equity,deposit,withdrawal\n\
2024-01-04,99800.00,5000,0\n\
2024-01-02,100000.00,0,0\n\
2024-01-03,100500.00,0,0\n",
    )
    .expect("write csv");

    let view = refresh(
        &FileRecordSource,
        path.to_str().expect("utf8 path"),
        &PerfConfig::default(),
    )
    .expect("refresh");

    let returns = &view.report.returns;
    assert_eq!(returns[0], 0.0);
    assert!((returns[1] - 0.005).abs() < 1e-12);
    // 99800 - 100500 - 5000 = -5700 of real loss.
    assert!((returns[2] - (-5700.0 / 100500.0)).abs() < 1e-12);
    assert!(view.report.summary.max_drawdown < 0.0);
}

#[test]
fn refresh_rejects_table_missing_withdrawal() {
    let path = unique_tmp_path("use_case_missing.csv");
    fs::write(&path, "date,equity,deposit\n2024-01-02,100,0\n").expect("write csv");

    let err = refresh(
        &FileRecordSource,
        path.to_str().expect("utf8 path"),
        &PerfConfig::default(),
    )
    .expect_err("expected failure");
    assert_eq!(
        err,
        LoadError::Parse("missing required column: withdrawal".to_string())
    );
}

#[test]
fn cached_source_serves_repeated_refreshes() {
    let inner = FakeSource::ok(vec![DailyRecord::new(date(2), 100.0, 0.0, 0.0)]);
    let cache = CachedRecordSource::new(&inner, Duration::from_secs(600));

    for _ in 0..3 {
        refresh(&cache, "memory://cached", &PerfConfig::default()).expect("refresh");
    }
    assert_eq!(inner.calls.get(), 1);
}

#[test]
fn configured_annualization_factor_reaches_view() {
    let config = parse_config("[perf]\nannualization_factor = 52.0\n").expect("config");
    let perf = config.perf.to_perf_config().expect("perf");
    let source = FakeSource::ok(vec![
        DailyRecord::new(date(2), 100.0, 0.0, 0.0),
        DailyRecord::new(date(9), 101.0, 0.0, 0.0),
    ]);

    let view = refresh(&source, "memory://weekly", &perf).expect("refresh");
    assert_eq!(view.annualization_factor, 52.0);
    let expected = 1.01f64.powf(52.0 / 2.0) - 1.0;
    assert!((view.report.summary.annualized_return - expected).abs() < 1e-9);
}

#[test]
fn sample_config_and_data_produce_a_view() {
    let ops_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../ops");
    let config = navtrack_application::config::load_config(&ops_dir.join("configs/sample.toml"))
        .expect("sample config");
    let perf = config.perf.to_perf_config().expect("perf");

    let data = ops_dir.join("data/track_record.csv");
    let view = refresh(&FileRecordSource, data.to_str().expect("utf8 path"), &perf)
        .expect("refresh");

    assert_eq!(view.report.len(), 10);
    assert_eq!(view.display.period, "2024-01-02 → 2024-01-16");
    assert!(view.drawdown_series.iter().all(|p| p.value <= 0.0));
}
