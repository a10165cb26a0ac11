use super::{render_once, resolve};
use navtrack_application::config::Config;
use navtrack_infrastructure::reporting::{ConsoleSink, JsonSink};

pub(super) fn run_show(config: &Config, source: Option<&str>, json: bool) -> Result<(), String> {
    let resolved = resolve(config, source)?;
    if json {
        render_once(
            &resolved.source,
            &resolved.location,
            &resolved.perf,
            &JsonSink::stdout(),
        )
    } else {
        render_once(
            &resolved.source,
            &resolved.location,
            &resolved.perf,
            &ConsoleSink::stdout(),
        )
    }
}
