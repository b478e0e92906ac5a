use crate::command::CommandReader;
use crate::config::Config;
use crate::error::ConfigError;
use crate::input::{EditorSource, LineSource, ReaderSource};
use crate::schedule::Directory;
use crate::shell::{Appearance, Shell};
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

mod command;
mod config;
mod error;
mod flight;
mod input;
mod schedule;
mod shell;
mod time;

#[derive(Parser)]
#[command(about = "Flight schedule manager driven by one-letter commands")]
struct Args {
    /// Number of schedule records in the pool
    #[arg(value_name = "POOL_SIZE")]
    pool_size: Option<String>,

    /// Path to a JSON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Render listings as tables
    #[arg(long)]
    table: bool,

    /// Disable coloured messages
    #[arg(long)]
    no_color: bool,
}

fn load_config(args: &Args) -> Result<Config, ConfigError> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(raw) = &args.pool_size {
        config = config.with_pool_size(raw)?;
    }
    if args.table {
        config.table = Some(true);
    }
    if args.no_color {
        config.color = Some(false);
    }
    config.validate()
}

fn run<S: LineSource>(source: S, config: &Config) -> io::Result<()> {
    let directory = Directory::new(config.pool_size(), config.max_flights_per_city());
    let reader = CommandReader::new(source, config.max_city_name_len());
    let appearance = Appearance {
        color: config.color(),
        table: config.table(),
    };
    Shell::new(directory, reader, io::stdout().lock(), appearance).run()
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            println!("{err}");
            return Ok(ExitCode::FAILURE);
        }
    };
    info!(
        pool_size = config.pool_size(),
        max_city_name_len = config.max_city_name_len(),
        max_flights_per_city = config.max_flights_per_city(),
        "schedule pool ready"
    );

    if io::stdin().is_terminal() {
        run(EditorSource::new()?, &config)?;
    } else {
        run(ReaderSource::new(io::stdin().lock()), &config)?;
    }
    Ok(ExitCode::SUCCESS)
}
