use super::{render_once, resolve};
use navtrack_application::config::Config;
use navtrack_domain::entities::performance::PerfConfig;
use navtrack_domain::repositories::record_source::RecordSource;
use navtrack_domain::repositories::sink::PerformanceSink;
use navtrack_infrastructure::cache::CachedRecordSource;
use navtrack_infrastructure::reporting::ConsoleSink;
use std::thread;
use std::time::Duration;

pub(super) fn run_watch(
    config: &Config,
    source: Option<&str>,
    interval_secs: u64,
    iterations: Option<usize>,
) -> Result<(), String> {
    let resolved = resolve(config, source)?;
    let ttl = Duration::from_secs(config.source.cache_ttl_secs);
    tracing::info!(
        location = %resolved.location,
        interval_secs,
        cache_ttl_secs = ttl.as_secs(),
        "watching track record"
    );

    let cached = CachedRecordSource::new(resolved.source, ttl);
    let sink = ConsoleSink::stdout();
    watch_loop(
        &cached,
        &resolved.location,
        &resolved.perf,
        &sink,
        Duration::from_secs(interval_secs),
        iterations,
        |err| eprintln!("error: {err}"),
    );
    Ok(())
}

/// Refreshes until `iterations` is exhausted (forever when `None`). A failed
/// refresh is reported and the loop keeps going; returns the number of
/// successful refreshes.
fn watch_loop(
    source: &dyn RecordSource,
    location: &str,
    perf: &PerfConfig,
    sink: &dyn PerformanceSink,
    interval: Duration,
    iterations: Option<usize>,
    mut on_error: impl FnMut(&str),
) -> usize {
    let mut done = 0usize;
    let mut succeeded = 0usize;
    loop {
        if iterations.is_some_and(|limit| done >= limit) {
            break;
        }
        if done > 0 && !interval.is_zero() {
            thread::sleep(interval);
        }
        match render_once(source, location, perf, sink) {
            Ok(()) => succeeded += 1,
            Err(err) => {
                metrics::counter!("navtrack.watch.failures_total").increment(1);
                on_error(&err);
            }
        }
        metrics::counter!("navtrack.watch.iterations_total").increment(1);
        done += 1;
    }
    succeeded
}
