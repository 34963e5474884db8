//! `proofpairs extract`: proof logs → train/val/test pair files.
//!
//! Pipeline:
//! 1. Validate the strategy and its parameters (no side effects yet)
//! 2. Discover `<input>/*/<pattern>` proof logs
//! 3. Reset `<output>_with_<strategy>/`
//! 4. Append pairs per input file, then write the split manifest

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use proofpairs_core::{ExtractorConfig, GroupingConfig, Strategy, SplitThresholds};
use proofpairs_corpus::{
    layout, output_dir_for, prepare_output_dir, CorpusConfig, CorpusWriter, DirectorySink,
};
use proofpairs_ingest::{discover_inputs, load_record, DEFAULT_INPUT_PATTERN};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Directory holding one sub-directory of parsed proof-log JSON per project.
    #[arg(long, alias = "extraction-file-directory")]
    pub input_dir: PathBuf,

    /// Output base path; pairs go to `<output-dir>_with_<strategy>/`.
    #[arg(long, alias = "saving-directory")]
    pub output_dir: PathBuf,

    /// Context strategy: needed, last_k, proof_only, state_only,
    /// proof_and_state, trimmed_proof_and_state.
    #[arg(long, alias = "processing-method-config")]
    pub strategy: String,

    /// Trailing proof lines used by `last_k`.
    #[arg(long, default_value_t = 1)]
    pub last_k: usize,

    /// Character budget of `trimmed_proof_and_state`.
    #[arg(long, default_value_t = 3000)]
    pub max_length: usize,

    /// Substring of the prover state that marks proof-body transitions.
    #[arg(long, default_value = proofpairs_core::DEFAULT_PROOF_MARKER)]
    pub proof_marker: String,

    /// File-name pattern (`*` wildcards) of proof logs.
    #[arg(long, default_value = DEFAULT_INPUT_PATTERN)]
    pub pattern: String,

    /// Skip unreadable or malformed input files instead of aborting.
    #[arg(long)]
    pub skip_invalid: bool,

    /// Append to an existing output directory instead of clearing it.
    #[arg(long)]
    pub keep_output: bool,
}

impl ExtractArgs {
    fn corpus_config(&self) -> Result<CorpusConfig> {
        let strategy: Strategy = self.strategy.parse()?;
        if self.proof_marker.is_empty() {
            bail!("--proof-marker must not be empty");
        }
        Ok(CorpusConfig {
            strategy,
            extractor: ExtractorConfig {
                last_k: self.last_k,
                max_length: self.max_length,
            },
            grouping: GroupingConfig {
                proof_marker: self.proof_marker.clone(),
            },
            thresholds: SplitThresholds::default(),
        })
    }
}

pub fn cmd_extract(args: &ExtractArgs) -> Result<()> {
    let config = args.corpus_config()?;
    let out_dir = output_dir_for(&args.output_dir, config.strategy);
    let mut writer = CorpusWriter::new(config, DirectorySink::new(&out_dir))?;

    let inputs = discover_inputs(&args.input_dir, &args.pattern)?;
    if inputs.is_empty() {
        tracing::warn!(dir = %args.input_dir.display(), pattern = %args.pattern, "no proof logs found");
    }
    prepare_output_dir(&out_dir, args.keep_output)?;

    let total = inputs.len();
    let mut skipped = 0usize;
    for (i, path) in inputs.iter().enumerate() {
        println!(
            "{} [{}/{}] {}",
            "Processing".green().bold(),
            i + 1,
            total,
            path.display()
        );
        let outcome = load_record(path).and_then(|record| {
            writer
                .process_record(&record)
                .with_context(|| format!("processing {}", path.display()))
        });
        match outcome {
            Ok(()) => {}
            Err(err) if args.skip_invalid => {
                skipped += 1;
                let reason = format!("{err:#}");
                tracing::warn!(path = %path.display(), error = %reason, "skipping input");
                println!("  {} {}", "skipped:".yellow(), reason);
            }
            Err(err) => return Err(err),
        }
    }

    let (sink, stats) = writer.finish()?;
    println!(
        "{} {} ({} skipped)",
        "Done".green().bold(),
        stats,
        skipped
    );
    println!("  {} {}", "→".cyan(), sink.dir().display());
    println!(
        "  {} {}",
        "→".cyan(),
        layout::manifest_file(sink.dir()).display()
    );
    Ok(())
}
