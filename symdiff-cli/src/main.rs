//! SymDiff CLI - semantic diff for compiled symbol databases.
//!
//! Compares two build snapshots and reports what changed at the declaration
//! level: renames, moves, type and value changes, metadata and import
//! changes - not text.

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use config::SymdiffConfig;
use output::OutputFormat;

/// Semantic diff for compiled symbol databases.
///
/// SymDiff loads two snapshot artifacts and correlates removed and added
/// declarations into single semantic changes, so a rename shows up as a
/// rename instead of an unrelated remove plus add.
#[derive(Parser)]
#[command(name = "symdiff")]
#[command(author, version)]
#[command(about = "Semantic diff for compiled symbol databases")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  symdiff diff old.json new.json         Diff two snapshot artifacts
  symdiff diff old.json new.json --format json
  symdiff show new.json                  Summarize one snapshot")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Semantic diff between two snapshot artifacts
    #[command(visible_alias = "d")]
    Diff {
        /// Old snapshot artifact path
        old: String,

        /// New snapshot artifact path
        new: String,

        /// Include auto-generated declarations in the diff
        #[arg(long)]
        include_internal: bool,
    },

    /// Summarize a single snapshot artifact
    Show {
        /// Snapshot artifact path
        snapshot: String,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration from .symdiff.toml
    let config = SymdiffConfig::load(std::path::Path::new("."));

    // Resolve output format: CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    // Apply color override from config if set
    if let Some(use_color) = config.use_color() {
        colored::control::set_override(use_color);
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    match command {
        Commands::Diff {
            old,
            new,
            include_internal,
        } => commands::diff::run(&old, &new, include_internal, &config, format),
        Commands::Show { snapshot } => commands::show::run(&snapshot, format),
    }
}
