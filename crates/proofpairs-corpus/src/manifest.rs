//! Problem → split provenance.

use proofpairs_core::Split;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `(file_name, problem_name)` as stored in the manifest.
pub type ProblemRef = (String, String);

/// Every problem seen during a run, grouped by split in processing order.
///
/// Serializes as `{"train": [[file, problem], ...], "val": [...], "test": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SplitManifest {
    entries: BTreeMap<Split, Vec<ProblemRef>>,
}

impl Default for SplitManifest {
    fn default() -> Self {
        Self {
            entries: Split::ALL.iter().map(|s| (*s, Vec::new())).collect(),
        }
    }
}

impl SplitManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, split: Split, file_name: &str, problem_name: &str) {
        self.entries
            .entry(split)
            .or_default()
            .push((file_name.to_string(), problem_name.to_string()));
    }

    pub fn problems(&self, split: Split) -> &[ProblemRef] {
        self.entries.get(&split).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
