//! Validate the process environment before a service starts.

use anyhow::Context;
use appenv::config::{self, ConfigError, ConfigSchema};
use appenv::report::{self, OutputFormat};
use clap::{Parser, Subcommand};
use log::{debug, error};
use std::process::ExitCode;

/// Command-line options for the environment validator.
#[derive(Parser)]
#[command(name = "appenv", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the current environment and print the resolved config
    Check {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the recognised variables with their types and defaults
    Schema,
}

fn main() -> anyhow::Result<ExitCode> {
    appenv::init_logging();

    let cli = Cli::parse();
    match cli.command {
        Command::Check { format } => check(format),
        Command::Schema => {
            print!("{}", report::render_schema(&ConfigSchema::application()));
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Load and publish the config; environment errors end the process with status 1.
fn check(format: OutputFormat) -> anyhow::Result<ExitCode> {
    let config = match config::init() {
        Ok(config) => config,
        Err(ConfigError::Environment(err)) => {
            error!("environment validation failed ({} violations)", err.violations.len());
            eprint!("{}", report::render_violations(&err, format)?);
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err).context("failed to load configuration"),
    };
    debug!("config loaded (environment={})", config.environment);

    let rendered = report::render_summary(config, format)?;
    println!("{rendered}");
    Ok(ExitCode::SUCCESS)
}
