//! # tsl CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tsl_cli::codec::{run_decode, run_encode, DecodeArgs, EncodeArgs};
use tsl_cli::remote::{run_aggregation, run_fetch, AggregationArgs, FetchArgs};

/// Token status list toolkit.
///
/// Decodes and encodes status lists offline, and fetches published lists
/// and pool aggregation documents.
#[derive(Parser, Debug)]
#[command(name = "tsl", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode an encoded status list.
    Decode(DecodeArgs),

    /// Encode a flat list of values as a status list claim.
    Encode(EncodeArgs),

    /// Fetch and decode a published status list.
    Fetch(FetchArgs),

    /// Fetch the status lists of an issuance pool.
    Aggregation(AggregationArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Decode(args) => run_decode(args),
        Commands::Encode(args) => run_encode(args),
        Commands::Fetch(args) => run_fetch(args),
        Commands::Aggregation(args) => run_aggregation(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
