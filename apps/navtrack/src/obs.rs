use navtrack_application::config::{LogConfig, LogFormat};
use std::net::SocketAddr;

pub const LOG_ENV: &str = "NAVTRACK_LOG";
pub const METRICS_ADDR_ENV: &str = "NAVTRACK_METRICS_ADDR";

/// Logs go to stderr so report output on stdout stays machine-readable.
pub fn init_tracing(log: &LogConfig) -> Result<(), String> {
    let filter = std::env::var(LOG_ENV).unwrap_or_else(|_| log.level.clone());
    let env_filter = tracing_subscriber::EnvFilter::try_new(filter)
        .map_err(|err| format!("invalid log filter: {err}"))?;

    match log.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init(),
    }
    Ok(())
}

#[cfg(feature = "prometheus")]
pub fn init_metrics() -> Result<Option<SocketAddr>, String> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let Some(raw) = std::env::var(METRICS_ADDR_ENV).ok() else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let addr: SocketAddr = raw
        .parse()
        .map_err(|err| format!("invalid {METRICS_ADDR_ENV} (expected host:port): {err}"))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|err| format!("failed to install prometheus exporter: {err}"))?;

    tracing::info!(metrics_addr = %addr, "prometheus metrics exporter enabled");
    Ok(Some(addr))
}

#[cfg(not(feature = "prometheus"))]
pub fn init_metrics() -> Result<Option<SocketAddr>, String> {
    if std::env::var(METRICS_ADDR_ENV).is_ok_and(|v| !v.trim().is_empty()) {
        return Err("metrics exporter requires navtrack feature `prometheus`".to_string());
    }
    Ok(None)
}
