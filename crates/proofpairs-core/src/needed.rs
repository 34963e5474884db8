//! Needed-context resolution.
//!
//! A proof body is a flat list of steps annotated with nesting depth. For a
//! step `i`, the "needed" context is what a reader must see to understand it:
//!
//! - the earlier siblings of `i` at the same depth, up to its enclosing step,
//! - the enclosing step itself,
//! - and, recursively, the needed context of that enclosing step.
//!
//! Nested sub-proofs of earlier siblings are skipped.
//!
//! ```text
//!   idx  depth  proof
//!    0     0    lemma foo          ◄─ header (terminal)
//!    1     1    proof -
//!    2     1      have A
//!    3     2        by simp        ◄─ skipped for step 5 (nested)
//!    4     1      show B
//!    5     1    qed                needed(5) = [0, 1, 2, 4]
//! ```

use crate::transition::Transition;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The resolver was asked about the header or a step past the end.
    #[error("needed-context index {index} outside proof body 1..{len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("proof step {index} has no nesting depth")]
    MissingDepth { index: usize },
}

/// Outcome of the backward sibling scan from one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiblingScan {
    /// A shallower step was found at `enclosing`.
    Enclosed {
        siblings: Vec<usize>,
        enclosing: usize,
    },
    /// The scan reached the start without finding a shallower step.
    Exhausted { siblings: Vec<usize> },
}

/// Memoized needed-context results for a single problem.
///
/// Create one per problem; results are only valid for the step list they were
/// computed against.
#[derive(Debug, Default, Clone)]
pub struct NeededCache {
    found: HashMap<usize, Vec<usize>>,
}

impl NeededCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&[usize]> {
        self.found.get(&index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }
}

fn depth_at(steps: &[&Transition], index: usize) -> Result<u32, ResolveError> {
    match steps[index].depth {
        Some(depth) => Ok(depth),
        // Headers are often recorded without a depth.
        None if index == 0 => Ok(0),
        None => Err(ResolveError::MissingDepth { index }),
    }
}

fn check_index(steps: &[&Transition], index: usize) -> Result<(), ResolveError> {
    if index == 0 || index >= steps.len() {
        return Err(ResolveError::IndexOutOfRange {
            index,
            len: steps.len(),
        });
    }
    Ok(())
}

/// Scan backward from `index - 1` collecting same-depth siblings until a
/// shallower (enclosing) step is hit.
pub fn siblings(steps: &[&Transition], index: usize) -> Result<SiblingScan, ResolveError> {
    check_index(steps, index)?;
    let level = depth_at(steps, index)?;

    let mut found = Vec::new();
    for search in (0..index).rev() {
        let depth = depth_at(steps, search)?;
        if depth == level {
            found.push(search);
        } else if depth < level {
            found.reverse();
            return Ok(SiblingScan::Enclosed {
                siblings: found,
                enclosing: search,
            });
        }
    }
    found.reverse();
    Ok(SiblingScan::Exhausted { siblings: found })
}

/// Needed-context indices of step `index`, strictly increasing and all
/// `< index`.
pub fn needed(
    steps: &[&Transition],
    index: usize,
    cache: &mut NeededCache,
) -> Result<Vec<usize>, ResolveError> {
    if let Some(hit) = cache.get(index) {
        return Ok(hit.to_vec());
    }

    let result = match siblings(steps, index)? {
        SiblingScan::Exhausted { siblings } => siblings,
        SiblingScan::Enclosed {
            siblings,
            enclosing: 0,
        } => {
            let mut out = Vec::with_capacity(siblings.len() + 1);
            out.push(0);
            out.extend(siblings);
            out
        }
        SiblingScan::Enclosed {
            siblings,
            enclosing,
        } => {
            let mut out = needed(steps, enclosing, cache)?;
            out.push(enclosing);
            out.extend(siblings);
            out
        }
    };

    cache.found.insert(index, result.clone());
    Ok(result)
}
