mod export;
mod show;
mod watch;

use navtrack_application::config::{resolve_location, Config};
use navtrack_application::track_record::{failure_message, publish, refresh};
use navtrack_domain::entities::performance::PerfConfig;
use navtrack_domain::repositories::record_source::RecordSource;
use navtrack_domain::repositories::sink::PerformanceSink;
use navtrack_infrastructure::records::LocationRecordSource;
use std::path::PathBuf;

pub enum Command {
    Show {
        source: Option<String>,
        json: bool,
    },
    Export {
        source: Option<String>,
        out: PathBuf,
    },
    Watch {
        source: Option<String>,
        interval_secs: u64,
        iterations: Option<usize>,
    },
}

pub fn run(command: Command, config: &Config) -> Result<(), String> {
    match command {
        Command::Show { source, json } => show::run_show(config, source.as_deref(), json),
        Command::Export { source, out } => export::run_export(config, source.as_deref(), out),
        Command::Watch {
            source,
            interval_secs,
            iterations,
        } => watch::run_watch(config, source.as_deref(), interval_secs, iterations),
    }
}

struct Resolved {
    location: String,
    perf: PerfConfig,
    source: LocationRecordSource,
}

fn resolve(config: &Config, source_override: Option<&str>) -> Result<Resolved, String> {
    let perf = config.perf.to_perf_config()?;
    let location = resolve_location(source_override, config);
    let source = LocationRecordSource::new(config.source.timeout_ms)?;
    tracing::debug!(
        location = %location,
        timeout_ms = config.source.timeout_ms,
        annualization_factor = perf.annualization_factor,
        "resolved track record source"
    );
    Ok(Resolved {
        location,
        perf,
        source,
    })
}

/// One refresh pushed to a sink. Load failures become the single
/// user-facing message; nothing is rendered in that case.
fn render_once(
    source: &dyn RecordSource,
    location: &str,
    perf: &PerfConfig,
    sink: &dyn PerformanceSink,
) -> Result<(), String> {
    let view = refresh(source, location, perf).map_err(|err| failure_message(&err))?;
    publish(&view, sink)
}
