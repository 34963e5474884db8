//! Proof-log ingestion
//!
//! Finds proof-log JSON files on disk and parses them into
//! [`ProofLogRecord`]s:
//!
//! ```text
//! <input_dir>/
//!   <project>/
//!     Foo_ground_truth.json   ◄─ matched by the default pattern
//!     Foo_other.json
//! ```
//!
//! Each file holds `file_name`, `problem_names`, and `translations`; anything
//! else in the document is ignored.

use anyhow::{Context, Result};
use proofpairs_core::ProofLogRecord;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File-name pattern of proof logs, one directory below the input root.
pub const DEFAULT_INPUT_PATTERN: &str = "*_ground_truth.json";

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("input directory {0} does not exist")]
    MissingInputDir(PathBuf),

    #[error("invalid file pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Compile a `*`-wildcard file-name pattern.
fn compile_pattern(pattern: &str) -> Result<Regex, IngestError> {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("^{body}$")).map_err(|source| IngestError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Proof-log files at `<root>/*/<pattern>`, sorted by path.
pub fn discover_inputs(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(IngestError::MissingInputDir(root.to_path_buf()).into());
    }
    let matcher = compile_pattern(pattern)?;

    let mut found = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if matcher.is_match(&entry.file_name().to_string_lossy()) {
            found.push(entry.into_path());
        }
    }

    found.sort();
    tracing::debug!(root = %root.display(), count = found.len(), "discovered proof logs");
    Ok(found)
}

/// Parse one proof-log document.
pub fn parse_record(text: &str) -> serde_json::Result<ProofLogRecord> {
    serde_json::from_str(text)
}

/// Read and parse one proof-log file.
pub fn load_record(path: &Path) -> Result<ProofLogRecord> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading proof log {}", path.display()))?;
    parse_record(&text).with_context(|| format!("parsing proof log {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_wildcards() {
        let re = compile_pattern(DEFAULT_INPUT_PATTERN).unwrap();
        assert!(re.is_match("Foo_ground_truth.json"));
        assert!(re.is_match("_ground_truth.json"));
        assert!(!re.is_match("Foo_ground_truth.json.bak"));
        assert!(!re.is_match("Foo_ground_truthXjson"));
    }

    #[test]
    fn parse_ignores_extra_fields() {
        let record = parse_record(
            r#"{"file_name": "A.thy", "problem_names": ["lemma a"], "translations": [], "extra": 1}"#,
        )
        .unwrap();
        assert_eq!(record.file_name, "A.thy");
    }

    #[test]
    fn parse_rejects_bad_translation_shape() {
        assert!(parse_record(
            r#"{"file_name": "A.thy", "problem_names": [], "translations": [["only state"]]}"#
        )
        .is_err());
    }
}
