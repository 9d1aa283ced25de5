//! calgrid: Calendar date-grid terminal host
//!
//! Main entry point for the calgrid application.
//!
//! Usage:
//!   calgrid                    - Start interactive CLI mode
//!   calgrid --print [--json]   - Render the current month once and exit
//!   calgrid --config <path>    - Load a specific TOML config file
//!   calgrid --help             - Show help

mod cli;
mod command;
mod error;
mod render;

use calgrid_core::{Calendar, CalendarConfig};
use tracing_subscriber::EnvFilter;

/// Run mode
#[derive(Debug, PartialEq, Eq)]
enum RunMode {
    /// Interactive CLI mode
    Cli,
    /// One-shot render
    Print { json: bool },
    /// Show help
    Help,
    /// Show version
    Version,
}

/// Parsed command line
#[derive(Debug)]
struct Args {
    mode: RunMode,
    config_path: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1))?;

    match args.mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("calgrid {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    // Initialize logging (warn 以上のみ、RUST_LOG で上書き可能)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    let config = match &args.config_path {
        Some(path) => CalendarConfig::from_toml_file(path),
        None => CalendarConfig::load(),
    }
    .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!(mode = ?config.mode, start_of_week = config.start_of_week, "Starting calgrid...");

    let calendar = Calendar::with_local_today(config);

    match args.mode {
        RunMode::Print { json } => cli::run_print(&calendar, json),
        RunMode::Cli => cli::run_cli(calendar),
        _ => Ok(()),
    }
}

/// Parse command line arguments
fn parse_args<I>(args: I) -> anyhow::Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut mode = RunMode::Cli;
    let mut json = false;
    let mut config_path = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--print" | "-p" => mode = RunMode::Print { json: false },
            "--json" => json = true,
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a path"))?;
                config_path = Some(path);
            }
            "--help" | "-h" => return Ok(Args { mode: RunMode::Help, config_path }),
            "--version" | "-v" => return Ok(Args { mode: RunMode::Version, config_path }),
            other => anyhow::bail!("Unknown argument: {}", other),
        }
    }

    if json {
        mode = RunMode::Print { json: true };
    }

    Ok(Args { mode, config_path })
}

/// Print help message
fn print_help() {
    println!("calgrid - Calendar date-grid");
    println!();
    println!("Usage:");
    println!("  calgrid                   Start interactive CLI mode");
    println!("  calgrid --print           Render the current month once and exit");
    println!("  calgrid --print --json    Render as JSON");
    println!("  calgrid --config <path>   Load a specific TOML config file");
    println!("  calgrid --help            Show this help message");
    println!("  calgrid --version         Show version");
    println!();
    println!("Config files (first found): calgrid.toml, config/calgrid.toml");
    println!();
    println!("Environment Variables:");
    println!("  CALGRID_MODE             single, multi or range (default: single)");
    println!("  CALGRID_START_OF_WEEK    0=Sun..6=Sat (default: 1)");
    println!("  CALGRID_WIDTH            Widget width in px (default: 430)");
    println!("  CALGRID_HEIGHT           Widget height in px (default: 430)");
    println!("  CALGRID_MIN_DAY          Earliest selectable day (YYYY-MM-DD)");
    println!("  CALGRID_MAX_DAY          Latest selectable day (YYYY-MM-DD)");
    println!("  CALGRID_WEEKEND_DAYS     Comma separated weekday indices (default: 0,6)");
    println!("  CALGRID_DISABLED_DATES   Comma separated dates");
    println!("  RUST_LOG                 Log filter (default: warn)");
}
