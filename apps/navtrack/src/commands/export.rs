use super::{render_once, resolve};
use navtrack_application::config::Config;
use navtrack_application::meta::engine_name;
use navtrack_infrastructure::reporting::FilesystemSink;
use std::path::PathBuf;

pub(super) fn run_export(config: &Config, source: Option<&str>, out: PathBuf) -> Result<(), String> {
    let resolved = resolve(config, source)?;
    let sink = FilesystemSink::new(out);
    render_once(&resolved.source, &resolved.location, &resolved.perf, &sink)?;
    println!(
        "{} cli: exported track record (source={}, out={})",
        engine_name(),
        resolved.location,
        sink.out_dir().display()
    );
    Ok(())
}
