#![doc = include_str!("../README.md")]

mod commands;
mod config;
mod telemetry;

use clap::Parser;
use config::{CliArgs, Config};

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = Config::try_from(args)?;

    telemetry::init_logging(&config.log)?;
    tracing::debug!(?config, "starting");

    let stdout = std::io::stdout();
    commands::run(&config, &mut stdout.lock())
}
