//! Calculator Console
//!
//! Interactive calculator: reads an operation and two numbers from stdin,
//! evaluates them on a background dispatcher and prints the result.
//!
//! # Usage
//!
//! ```bash
//! calculator-console
//! calculator-console --config calculator.yaml -vv
//! CALCULATOR__CONSOLE__PRECISION=4 calculator-console
//! ```

// CLI tools are expected to print to stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod config;
mod console;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use calculator::{Service, spawn_dispatcher};
use clap::Parser;
use tokio::io::BufReader;

use crate::config::AppConfig;
use crate::console::Console;

/// Calculator Console - add, subtract, multiply and divide interactively
#[derive(Parser)]
#[command(name = "calculator-console")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.verbose);

    logging::init_logging(&config.logging);
    tracing::debug!(
        level = %config.logging.level,
        precision = config.console.precision,
        "configuration loaded"
    );

    if cli.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    tracing::info!("calculator console starting");

    let dispatcher = spawn_dispatcher(Arc::new(Service::new()));

    let mut console = Console::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        config.console.precision,
    );
    let session = console.run(&dispatcher).await;

    // Close the queue before surfacing any console error so the dispatcher
    // always gets joined.
    dispatcher
        .shutdown()
        .await
        .context("dispatcher task failed")?;
    session?;

    tracing::info!("calculator console stopped");
    Ok(())
}
