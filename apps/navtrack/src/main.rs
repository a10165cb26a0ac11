mod commands;
mod obs;

use clap::{Parser, Subcommand};
use commands::Command;
use navtrack_application::config::{self, Config, CONFIG_ENV};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "navtrack")]
#[command(
    about = "Strategy track record: NAV, drawdown and risk/return summary from a daily equity CSV",
    version,
    arg_required_else_help = true
)]
#[command(
    after_help = "Examples:\n  navtrack show\n  navtrack show --source data/track_record.csv --json\n  navtrack export --source data/track_record.csv --out out/\n  navtrack watch --interval-secs 60 --iterations 10\n"
)]
struct Cli {
    /// Config file path (TOML). If omitted, uses env NAVTRACK_CONFIG; otherwise defaults apply.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Fetch the CSV once and print the summary.
    Show {
        /// CSV path or http(s) URL. Overrides config and env NAVTRACK_SOURCE.
        #[arg(long)]
        source: Option<String>,
        /// Print the full view (summary + series) as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Fetch the CSV once and write series.csv + summary.json.
    Export {
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Refresh periodically through the TTL cache.
    Watch {
        #[arg(long)]
        source: Option<String>,
        #[arg(long, default_value_t = 60)]
        interval_secs: u64,
        /// Stop after this many refreshes (runs until interrupted when omitted).
        #[arg(long)]
        iterations: Option<usize>,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = obs::init_tracing(&config.log) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
    if let Err(err) = obs::init_metrics() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    let command = match cli.command {
        CliCommand::Show { source, json } => Command::Show { source, json },
        CliCommand::Export { source, out } => Command::Export { source, out },
        CliCommand::Watch {
            source,
            interval_secs,
            iterations,
        } => Command::Watch {
            source,
            interval_secs,
            iterations,
        },
    };

    if let Err(err) = commands::run(command, &config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config, String> {
    let path = path.or_else(|| {
        std::env::var(CONFIG_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    });
    match path {
        Some(path) => config::load_config(&path),
        None => Ok(Config::default()),
    }
}
