//! Proofpairs CLI
//!
//! Command-line interface for:
//! - Extracting train/val/test translation pairs from proof logs
//! - Inspecting the deterministic split of problem names

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use proofpairs_core::SplitAssigner;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod extract;

#[derive(Parser)]
#[command(name = "proofpairs")]
#[command(
    author,
    version,
    about = "Proofpairs: proof-assistant logs → seq2seq translation pairs"
)]
struct Cli {
    /// Debug-level logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build `<split>.src` / `<split>.tgt` pair files and the split manifest.
    Extract(extract::ExtractArgs),

    /// Print the split assigned to each problem name.
    Split {
        /// Problem names (lemma/theorem statements).
        #[arg(required = true)]
        names: Vec<String>,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn cmd_split(names: &[String]) {
    let assigner = SplitAssigner::default();
    for name in names {
        println!(
            "{}\t{:.6}\t{}",
            assigner.assign(name).to_string().bold(),
            assigner.fraction(name),
            name
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Extract(args) => extract::cmd_extract(&args)?,
        Commands::Split { names } => cmd_split(&names),
    }
    Ok(())
}
