//! # lacquer
//!
//! Lacquer - Static analysis for JSX in Rust.
//!
//! ## Name Origin
//!
//! **Lacquer** (/ˈlækər/) is the hard protective finish brushed over wood,
//! one thin coat at a time. This crate is the command-line entry point that
//! puts the coats on: it finds JSX sources, lints them with
//! `lacquer_patina` and reports or fixes what it finds.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lacquer")]
#[command(about = "Static analysis for JSX in Rust", long_about = None)]
#[command(version, disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'v', short_alias = 'V', long, action = clap::ArgAction::Version)]
    version: (),
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint JSX files (default command)
    #[command(visible_alias = "patina")]
    Lint(commands::lint::LintArgs),

    /// List available rules or print the configuration schema
    Rules(commands::rules::RulesArgs),
}

/// Log to stderr, filtered by `LACQUER_LOG` (e.g. `LACQUER_LOG=lacquer_patina=debug`)
fn init_tracing() {
    let filter = EnvFilter::try_from_env("LACQUER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Lint(args)) => commands::lint::run(args),
        Some(Commands::Rules(args)) => commands::rules::run(args),
        None => commands::lint::run(commands::lint::LintArgs::default()),
    }
}
