//! CLI entry point for the escsim UDP simulator
//!
//! Emits synthetic ESC telemetry as UDP datagrams until the timeout elapses
//! or Ctrl-C is pressed.
//!
//! # Usage
//!
//! ```bash
//! udpsim --address 127.0.0.1 --port 41234 --timeout 10 --power 40
//! udpsim --steps 10 30 50 --config 2 --delay 0.1
//! ```

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use escsim_core::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        println!("{cli:?}");
    }

    let config = cli.into_run_config();
    println!("{config}");

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    run_cli(config, cancel).await?;
    Ok(())
}

/// Validate, open the socket and drive one run until timeout or `cancel`.
///
/// Interrupted runs are a clean exit; only configuration and socket errors
/// come back as `Err`.
async fn run_cli(config: RunConfig, cancel: CancellationToken) -> Result<RunSummary> {
    config.validate().context("invalid arguments")?;

    let sink = UdpSink::open(&config.address, config.port)
        .await
        .with_context(|| format!("opening UDP socket for {}:{}", config.address, config.port))?;
    if config.verbose {
        println!(
            "UDP socket: local {:?} -> {}",
            sink.local_addr(),
            sink.destination()
        );
    }

    let mut controller = RunController::new(config, sink, MeasurementSynthesizer::new())?;

    println!("Starting simulator...");
    let summary = controller.run(cancel).await?;

    match summary.stop_reason {
        StopReason::Cancelled => println!("Closing socket and exiting..."),
        StopReason::Deadline => info!("Timeout reached after {} records", summary.emitted),
    }

    Ok(summary)
}

/// Log to stderr; RUST_LOG overrides the default level
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Cancel the run on Ctrl-C
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupt received");
                cancel.cancel();
            }
            Err(e) => warn!("Unable to listen for Ctrl-C: {}", e),
        }
    });
}
