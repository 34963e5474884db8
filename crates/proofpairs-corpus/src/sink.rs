//! Output sinks for normalized pairs.

use crate::layout::{manifest_file, split_file, Side};
use crate::manifest::SplitManifest;
use anyhow::{ensure, Context, Result};
use proofpairs_core::Split;
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Destination of a corpus run.
///
/// `append` is called once per split after every input file; `sources` and
/// `targets` always have the same length.
pub trait PairSink {
    fn append(&mut self, split: Split, sources: &[String], targets: &[String]) -> Result<()>;

    fn write_manifest(&mut self, manifest: &SplitManifest) -> Result<()>;
}

/// Line-oriented `<split>.src` / `<split>.tgt` files in one directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn append_lines(path: &Path, lines: &[String]) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        let mut out = BufWriter::new(file);
        for line in lines {
            writeln!(out, "{line}").with_context(|| format!("writing {}", path.display()))?;
        }
        out.flush()
            .with_context(|| format!("flushing {}", path.display()))?;
        Ok(())
    }
}

impl PairSink for DirectorySink {
    fn append(&mut self, split: Split, sources: &[String], targets: &[String]) -> Result<()> {
        ensure!(
            sources.len() == targets.len(),
            "misaligned {split} batch: {} sources, {} targets",
            sources.len(),
            targets.len()
        );
        Self::append_lines(&split_file(&self.dir, split, Side::Source), sources)?;
        Self::append_lines(&split_file(&self.dir, split, Side::Target), targets)?;
        Ok(())
    }

    fn write_manifest(&mut self, manifest: &SplitManifest) -> Result<()> {
        let path = manifest_file(&self.dir);
        let json = serde_json::to_string_pretty(manifest)?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

/// In-memory sink, for tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub sources: BTreeMap<Split, Vec<String>>,
    pub targets: BTreeMap<Split, Vec<String>>,
    pub manifest: Option<SplitManifest>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aligned `(source, target)` lines of one split.
    pub fn pairs(&self, split: Split) -> Vec<(&str, &str)> {
        let sources = self.sources.get(&split).map(Vec::as_slice).unwrap_or(&[]);
        let targets = self.targets.get(&split).map(Vec::as_slice).unwrap_or(&[]);
        sources
            .iter()
            .zip(targets)
            .map(|(s, t)| (s.as_str(), t.as_str()))
            .collect()
    }
}

impl PairSink for MemorySink {
    fn append(&mut self, split: Split, sources: &[String], targets: &[String]) -> Result<()> {
        ensure!(
            sources.len() == targets.len(),
            "misaligned {split} batch: {} sources, {} targets",
            sources.len(),
            targets.len()
        );
        self.sources
            .entry(split)
            .or_default()
            .extend_from_slice(sources);
        self.targets
            .entry(split)
            .or_default()
            .extend_from_slice(targets);
        Ok(())
    }

    fn write_manifest(&mut self, manifest: &SplitManifest) -> Result<()> {
        self.manifest = Some(manifest.clone());
        Ok(())
    }
}
