//! Transition grouping: flat per-file transitions → per-problem lists.

use crate::transition::Transition;
use std::collections::{BTreeMap, BTreeSet};

/// Substring of `state` that marks a transition as proof-body content.
pub const DEFAULT_PROOF_MARKER: &str = "proof";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingConfig {
    pub proof_marker: String,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            proof_marker: DEFAULT_PROOF_MARKER.to_string(),
        }
    }
}

/// Partition `transitions` by problem.
///
/// A transition whose proof text equals a known problem name starts that
/// problem and becomes entry 0 (the header) of its list. Transitions whose
/// state contains the proof marker are appended to the current problem; all
/// others are skipped. Body transitions seen before any boundary are dropped.
///
/// Every name in `problem_names` gets an entry, empty if it never occurs.
pub fn group_transitions<'a>(
    problem_names: &BTreeSet<String>,
    transitions: &'a [Transition],
    config: &GroupingConfig,
) -> BTreeMap<String, Vec<&'a Transition>> {
    let mut grouped: BTreeMap<String, Vec<&'a Transition>> = problem_names
        .iter()
        .map(|name| (name.clone(), Vec::new()))
        .collect();

    let mut current: Option<&str> = None;
    for transition in transitions {
        if problem_names.contains(&transition.proof) {
            current = Some(transition.proof.as_str());
        } else if !transition.state.contains(config.proof_marker.as_str()) {
            continue;
        }

        if let Some(list) = current.and_then(|name| grouped.get_mut(name)) {
            list.push(transition);
        }
    }
    grouped
}
