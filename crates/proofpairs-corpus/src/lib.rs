//! Corpus writer
//!
//! Drives the core pipeline over proof-log records and appends the resulting
//! pairs to per-split sinks:
//!
//! ```text
//!   record ─► group_transitions ─► for each problem (sorted by name):
//!                                    split  = SplitAssigner::assign(name)
//!                                    pairs  = build_pairs(steps, strategy)
//!                                    batch[split] += normalize(pairs)
//!            ─► sink.append(split, batch) for train / val / test
//!   ...
//!   finish  ─► sink.write_manifest(manifest)
//! ```
//!
//! Batches are flushed per record, so a crash between input files keeps the
//! pairs of every completed file.

use anyhow::{Context, Result};
use proofpairs_core::{
    build_pairs, group_transitions, normalize, ConfigError, ExtractorConfig, GroupingConfig,
    ProofLogRecord, Split, SplitAssigner, SplitThresholds, Strategy,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub mod layout;
pub mod manifest;
pub mod sink;

pub use layout::{output_dir_for, prepare_output_dir, Side, MANIFEST_FILE};
pub use manifest::{ProblemRef, SplitManifest};
pub use sink::{DirectorySink, MemorySink, PairSink};

/// Everything that shapes the emitted corpus.
#[derive(Debug, Clone)]
pub struct CorpusConfig {
    pub strategy: Strategy,
    pub extractor: ExtractorConfig,
    pub grouping: GroupingConfig,
    pub thresholds: SplitThresholds,
}

impl CorpusConfig {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            extractor: ExtractorConfig::default(),
            grouping: GroupingConfig::default(),
            thresholds: SplitThresholds::default(),
        }
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub files: usize,
    pub problems: usize,
    /// Problems listed in a record but absent from its transitions.
    pub empty_problems: usize,
    pub pairs: BTreeMap<Split, usize>,
}

impl RunStats {
    pub fn total_pairs(&self) -> usize {
        self.pairs.values().sum()
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "files={} problems={} pairs={}",
            self.files,
            self.problems,
            self.total_pairs()
        )?;
        for split in Split::ALL {
            write!(f, " {split}={}", self.pairs.get(&split).copied().unwrap_or(0))?;
        }
        Ok(())
    }
}

#[derive(Default)]
struct Batch {
    sources: Vec<String>,
    targets: Vec<String>,
}

/// Turns records into corpus lines, one record at a time.
pub struct CorpusWriter<S: PairSink> {
    config: CorpusConfig,
    assigner: SplitAssigner,
    sink: S,
    manifest: SplitManifest,
    stats: RunStats,
}

impl<S: PairSink> CorpusWriter<S> {
    /// Fails on invalid extractor parameters, before anything is written.
    pub fn new(config: CorpusConfig, sink: S) -> Result<Self, ConfigError> {
        config.extractor.validate()?;
        Ok(Self {
            assigner: SplitAssigner::new(config.thresholds),
            config,
            sink,
            manifest: SplitManifest::new(),
            stats: RunStats::default(),
        })
    }

    pub fn manifest(&self) -> &SplitManifest {
        &self.manifest
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Build, normalize, and append the pairs of every problem in `record`.
    ///
    /// The record is staged in full before anything is committed: on error
    /// the sink, manifest, and stats are left untouched. All three splits are
    /// appended to (possibly with empty batches) so the output files exist
    /// even when a split receives nothing.
    pub fn process_record(&mut self, record: &ProofLogRecord) -> Result<()> {
        let grouped = group_transitions(
            &record.problem_names,
            &record.translations,
            &self.config.grouping,
        );

        let mut batches: BTreeMap<Split, Batch> =
            Split::ALL.iter().map(|s| (*s, Batch::default())).collect();
        let mut entries: Vec<(Split, &str)> = Vec::with_capacity(record.problem_names.len());
        let mut empty = 0usize;

        for problem in &record.problem_names {
            let split = self.assigner.assign(problem);
            entries.push((split, problem));

            let steps = grouped.get(problem).map(Vec::as_slice).unwrap_or(&[]);
            if steps.is_empty() {
                empty += 1;
                tracing::warn!(file = %record.file_name, problem = %problem, "no transitions for problem");
                continue;
            }

            let pairs = build_pairs(steps, self.config.strategy, &self.config.extractor)
                .with_context(|| {
                    format!("building pairs for `{problem}` in {}", record.file_name)
                })?;

            let batch = batches.entry(split).or_default();
            for pair in &pairs {
                batch.sources.push(normalize(&pair.source));
                batch.targets.push(normalize(&pair.target));
            }
            tracing::debug!(
                file = %record.file_name,
                problem = %problem,
                %split,
                pairs = pairs.len(),
                "built pairs"
            );
        }

        for (split, batch) in &batches {
            self.sink
                .append(*split, &batch.sources, &batch.targets)
                .with_context(|| format!("appending {split} pairs for {}", record.file_name))?;
        }

        for (split, problem) in entries {
            self.manifest.record(split, &record.file_name, problem);
        }
        for (split, batch) in &batches {
            *self.stats.pairs.entry(*split).or_default() += batch.sources.len();
        }
        self.stats.problems += record.problem_names.len();
        self.stats.empty_problems += empty;
        self.stats.files += 1;
        Ok(())
    }

    /// Persist the manifest and hand back the sink.
    pub fn finish(mut self) -> Result<(S, RunStats)> {
        self.sink
            .write_manifest(&self.manifest)
            .context("writing split manifest")?;
        tracing::info!(stats = %self.stats, "corpus complete");
        Ok((self.sink, self.stats))
    }
}
