use navtrack_domain::entities::performance::{PerfConfig, DEFAULT_ANNUALIZATION_FACTOR};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/Zequn-Li/SisypheanStrategyTrackRecord/main/track_record.csv";
pub const SOURCE_ENV: &str = "NAVTRACK_SOURCE";
pub const CONFIG_ENV: &str = "NAVTRACK_CONFIG";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub perf: PerfSection,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// CSV path or URL. Falls back to env `NAVTRACK_SOURCE`, then the public default.
    pub location: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: None,
            timeout_ms: default_timeout_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct PerfSection {
    #[serde(default = "default_annualization_factor")]
    pub annualization_factor: f64,
}

impl Default for PerfSection {
    fn default() -> Self {
        Self {
            annualization_factor: default_annualization_factor(),
        }
    }
}

impl PerfSection {
    pub fn to_perf_config(&self) -> Result<PerfConfig, String> {
        let factor = self.annualization_factor;
        if !factor.is_finite() || factor <= 0.0 {
            return Err(format!(
                "perf.annualization_factor must be a positive number (got {factor})"
            ));
        }
        Ok(PerfConfig {
            annualization_factor: factor,
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_cache_ttl_secs() -> u64 {
    600
}

fn default_annualization_factor() -> f64 {
    DEFAULT_ANNUALIZATION_FACTOR
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn load_config(path: &Path) -> Result<Config, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {}", path.display(), err))?;
    parse_config(&contents)
        .map_err(|err| format!("failed to parse TOML {}: {}", path.display(), err))
}

pub fn parse_config(raw: &str) -> Result<Config, String> {
    toml::from_str(raw).map_err(|err| err.to_string())
}

/// Picks the CSV location: explicit override, then config, then env, then the
/// public default.
pub fn resolve_location(cli_override: Option<&str>, config: &Config) -> String {
    let env_value = std::env::var(SOURCE_ENV).ok();
    resolve_location_with_env(cli_override, config, env_value.as_deref())
}

fn resolve_location_with_env(
    cli_override: Option<&str>,
    config: &Config,
    env_value: Option<&str>,
) -> String {
    [cli_override, config.source.location.as_deref(), env_value]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(DEFAULT_SOURCE_URL)
        .to_string()
}
