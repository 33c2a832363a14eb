//! # pumpscript: run one TBR command against a pump
//!
//! Composition root that wires the adapters together and runs a single
//! command from the command line.
//!
//! ## Responsibilities
//! - Parse the command line and load configuration (file, env vars)
//! - Initialise `tracing` logging
//! - Construct the pump adapter and the in-process clock and observer
//! - Construct the command service, injecting them via port traits
//! - Print the command result as JSON; exit non-zero on failure
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::process::ExitCode;

use clap::Parser;
use pumpscript_adapter_virtual::VirtualPump;
use pumpscript_app::clock::TokioClock;
use pumpscript_app::observer::TracingObserver;
use pumpscript_app::services::SetTbrService;
use pumpscript_domain::tbr::SetTbr;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Set or cancel a temporary basal rate by driving the pump's menus.
#[derive(Debug, Parser)]
#[command(name = "pumpscript", version, allow_negative_numbers = true)]
struct Cli {
    /// TBR percentage, in steps of 10 (100 cancels the running TBR).
    percentage: i64,

    /// TBR duration in minutes, in steps of 15.
    #[arg(default_value_t = 0)]
    duration: i64,

    /// Configuration file.
    #[arg(short, long, default_value = config::DEFAULT_PATH)]
    config: String,

    /// Only check the command, without touching the pump.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .with_writer(std::io::stderr)
        .init();

    let command = SetTbr::new(cli.percentage, cli.duration);

    // Adapters
    let pump = VirtualPump::new(&config.pump);

    // Services
    let service = SetTbrService::new(pump, TokioClock, TracingObserver, config.engine);

    if cli.dry_run {
        let violations: Vec<String> = service
            .validate(&command)
            .iter()
            .map(ToString::to_string)
            .collect();
        let valid = violations.is_empty();
        let report = serde_json::json!({ "valid": valid, "violations": violations });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(if valid {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    tracing::info!(%command, "dispatching command");
    let result = service.execute(command).await;
    println!("{}", serde_json::to_string_pretty(&result.summary())?);

    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
