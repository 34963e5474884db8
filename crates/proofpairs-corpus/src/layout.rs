//! On-disk layout of a corpus run.
//!
//! ```text
//! <output>_with_<strategy>/
//!   train.src  train.tgt
//!   val.src    val.tgt
//!   test.src   test.tgt
//!   problem_names_split.json
//! ```

use anyhow::{Context, Result};
use proofpairs_core::{Split, Strategy};
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "problem_names_split.json";

/// Which half of a pair a corpus file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub fn extension(&self) -> &'static str {
        match self {
            Side::Source => "src",
            Side::Target => "tgt",
        }
    }
}

/// `<base>_with_<strategy>`: runs with different strategies never share a
/// directory.
pub fn output_dir_for(base: &Path, strategy: Strategy) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(format!("_with_{strategy}"));
    PathBuf::from(name)
}

pub fn split_file(dir: &Path, split: Split, side: Side) -> PathBuf {
    dir.join(format!("{}.{}", split.as_str(), side.extension()))
}

pub fn manifest_file(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILE)
}

/// Create `dir`, first removing any previous contents unless
/// `keep_existing` is set. Output is append-only, so reusing a directory
/// without clearing it duplicates pairs.
pub fn prepare_output_dir(dir: &Path, keep_existing: bool) -> Result<()> {
    if dir.exists() && !keep_existing {
        tracing::info!(dir = %dir.display(), "clearing previous output");
        fs::remove_dir_all(dir)
            .with_context(|| format!("removing previous output {}", dir.display()))?;
    }
    fs::create_dir_all(dir).with_context(|| format!("creating output {}", dir.display()))?;
    Ok(())
}
