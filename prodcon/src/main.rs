//! # prodcon
//!
//! CLI front-end for the bounded producer/consumer checksum exchange.
//!
//! Validates the buffer size and round count, then hands off to
//! [`prodcon_core::Supervisor`]. Configuration errors are rejected before
//! any thread starts; runtime failures (signal loss, checksum mismatch)
//! are logged with their block/round context and mapped to a non-zero
//! exit code.

use clap::Parser;
use prodcon_core::{RunConfig, Supervisor};
use std::process;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

/// Round-based producer/consumer checksum exchange over a shared buffer
#[derive(Parser, Debug)]
#[command(name = "prodcon")]
#[command(version)]
#[command(about = "One producer fills checksummed blocks, one consumer verifies them")]
struct Args {
    /// Shared buffer size in bytes (positive multiple of 32, at most 64000).
    memsize: usize,

    /// Number of producer/consumer rounds.
    ntimes: u32,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    setup_tracing(&args);

    if let Err(e) = run(&args) {
        error!("FATAL: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = RunConfig::new(args.memsize, args.ntimes)?;
    info!(
        memsize = args.memsize,
        blocks = config.blocks(),
        rounds = args.ntimes,
        "config OK"
    );

    let report = Supervisor::new(config).run()?;
    info!(
        rounds = report.rounds,
        blocks = report.blocks,
        "run complete, all checksums verified"
    );
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
