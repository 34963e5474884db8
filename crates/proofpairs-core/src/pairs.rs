//! Pair building for one problem.

use crate::extract::{ExtractorConfig, StepContext, Strategy};
use crate::needed::{NeededCache, ResolveError};
use crate::transition::Transition;
use crate::LINE_SEPARATOR;
use serde::{Deserialize, Serialize};

/// One training example: model input and the proof text to predict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationPair {
    pub source: String,
    pub target: String,
}

/// Build translation pairs for one problem.
///
/// `steps[0]` is the header; every later step yields exactly one pair whose
/// target is that step's proof text. Empty and header-only lists yield no
/// pairs.
pub fn build_pairs(
    steps: &[&Transition],
    strategy: Strategy,
    config: &ExtractorConfig,
) -> Result<Vec<TranslationPair>, ResolveError> {
    let Some(header) = steps.first() else {
        return Ok(Vec::new());
    };

    let mut accumulated = header.proof.clone();
    let mut cache = NeededCache::new();
    let mut pairs = Vec::with_capacity(steps.len().saturating_sub(1));

    for index in 1..steps.len() {
        let mut ctx = StepContext {
            steps,
            index,
            accumulated: &accumulated,
            cache: &mut cache,
        };
        let source = strategy.render(&mut ctx, config)?;
        let target = steps[index].proof.clone();

        accumulated.push_str(LINE_SEPARATOR);
        accumulated.push_str(&target);
        pairs.push(TranslationPair { source, target });
    }
    Ok(pairs)
}
