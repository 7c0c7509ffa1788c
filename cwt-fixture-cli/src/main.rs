//! # cwt-fixture CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::io::{self, Write as _};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cwt_fixture_cli::keygen::{KeygenArgs, run_keygen};
use cwt_fixture_cli::token::{TokenArgs, run_token};

/// Sample CWT/COSE_Sign1 tokens and test keys for debugging token tooling.
#[derive(Parser, Debug)]
#[command(name = "cwt-fixture", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the sample token and print its encodings.
    Token(TokenArgs),

    /// Generate key material matching the token's algorithms.
    Keygen(KeygenArgs),
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
        .with_writer(io::stderr)
        .init();

    tracing::debug!(command = ?cli.command, "cwt-fixture starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match &cli.command {
        Commands::Token(args) => run_token(args, &mut out),
        Commands::Keygen(args) => run_keygen(args, &mut out),
    };
    let result = result.and_then(|code| {
        out.flush()?;
        Ok(code)
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
