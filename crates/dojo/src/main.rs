//! dojo CLI - Mojo Dojo site tooling.
//!
//! Provides commands for:
//! - `serve`: Serve the generated site with redirects and the navigation API
//! - `check`: Validate redirects and navigation, report dead links
//! - `resolve`: Show where a path redirects to
//! - `nav`: Print the navigation of a locale as JSON

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, NavArgs, ResolveArgs, ServeArgs};
use output::Output;

/// dojo - Mojo Dojo site tooling.
#[derive(Parser)]
#[command(name = "dojo", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the generated site.
    Serve(ServeArgs),
    /// Validate configuration and report dead links.
    Check(CheckArgs),
    /// Resolve a path through the redirect table.
    Resolve(ResolveArgs),
    /// Print navigation as JSON.
    Nav(NavArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Resolve(args) => args.execute(),
        Commands::Nav(args) => args.execute(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}
