//! Proof-log data model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One recorded step of proof-assistant interaction.
///
/// Serialized as a JSON array: `[state, proof]` or `[state, proof, depth]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTransition", into = "RawTransition")]
pub struct Transition {
    /// Observable prover state after the step.
    pub state: String,
    /// Literal proof-script text of the step (the statement, for headers).
    pub proof: String,
    /// Nesting depth; `0` marks problem headers, `>= 1` proof-body steps.
    pub depth: Option<u32>,
}

impl Transition {
    pub fn new(state: impl Into<String>, proof: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            proof: proof.into(),
            depth: None,
        }
    }

    pub fn with_depth(state: impl Into<String>, proof: impl Into<String>, depth: u32) -> Self {
        Self {
            state: state.into(),
            proof: proof.into(),
            depth: Some(depth),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawTransition {
    WithDepth(String, String, u32),
    Plain(String, String),
}

impl From<RawTransition> for Transition {
    fn from(raw: RawTransition) -> Self {
        match raw {
            RawTransition::WithDepth(state, proof, depth) => Transition::with_depth(state, proof, depth),
            RawTransition::Plain(state, proof) => Transition::new(state, proof),
        }
    }
}

impl From<Transition> for RawTransition {
    fn from(t: Transition) -> Self {
        match t.depth {
            Some(depth) => RawTransition::WithDepth(t.state, t.proof, depth),
            None => RawTransition::Plain(t.state, t.proof),
        }
    }
}

/// Parsed proof log of a single source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofLogRecord {
    pub file_name: String,
    /// Problem (lemma/theorem) names; duplicates collapse.
    pub problem_names: BTreeSet<String>,
    pub translations: Vec<Transition>,
}
