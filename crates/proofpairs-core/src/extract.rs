//! Context extractors.
//!
//! Each strategy renders the current step plus some slice of prior context
//! into the model-input (source) string. Strategies are selected by name at
//! startup; see [`Strategy::from_str`].

use crate::needed::{needed, NeededCache, ResolveError};
use crate::transition::Transition;
use crate::LINE_SEPARATOR;
use std::fmt;
use std::str::FromStr;

/// Default window of `last_k`.
pub const DEFAULT_LAST_K: usize = 1;

/// Default character budget of `trimmed_proof_and_state`.
pub const DEFAULT_MAX_LENGTH: usize = 3000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown extraction strategy `{name}` (expected one of: {known})")]
    UnknownStrategy { name: String, known: String },

    #[error("last_k must be at least 1")]
    ZeroLastK,
}

/// Strategy-specific parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Number of trailing proof lines used by `last_k`.
    pub last_k: usize,
    /// Character budget (proof lines + state) for `trimmed_proof_and_state`.
    pub max_length: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            last_k: DEFAULT_LAST_K,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl ExtractorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.last_k == 0 {
            return Err(ConfigError::ZeroLastK);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Needed-context proof lines plus state.
    Needed,
    /// Last `k` accumulated proof lines plus state.
    LastK,
    /// Full accumulated proof text, no state.
    ProofOnly,
    /// State only.
    StateOnly,
    /// Full accumulated proof text plus state.
    ProofAndState,
    /// Most recent proof lines within a character budget, plus state.
    TrimmedProofAndState,
}

impl Strategy {
    pub const ALL: [Strategy; 6] = [
        Strategy::Needed,
        Strategy::LastK,
        Strategy::ProofOnly,
        Strategy::StateOnly,
        Strategy::ProofAndState,
        Strategy::TrimmedProofAndState,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Needed => "needed",
            Strategy::LastK => "last_k",
            Strategy::ProofOnly => "proof_only",
            Strategy::StateOnly => "state_only",
            Strategy::ProofAndState => "proof_and_state",
            Strategy::TrimmedProofAndState => "trimmed_proof_and_state",
        }
    }

    /// Render the source string for one step.
    pub fn render(
        &self,
        ctx: &mut StepContext<'_, '_>,
        config: &ExtractorConfig,
    ) -> Result<String, ResolveError> {
        let state = ctx.transition().state.as_str();
        let rendered = match self {
            Strategy::Needed => {
                let indices = needed(ctx.steps, ctx.index, ctx.cache)?;
                let segment = indices
                    .iter()
                    .map(|&i| ctx.steps[i].proof.as_str())
                    .collect::<Vec<_>>()
                    .join(LINE_SEPARATOR);
                format!("<ISA_NDS> {segment} <ISA_OBS> {state}")
            }
            Strategy::LastK => {
                let k = config.last_k;
                let lines = proof_lines(ctx.accumulated);
                let tail = &lines[lines.len().saturating_sub(k)..];
                format!(
                    "<ISA_LAST_{k}> {} <ISA_OBS> {state}",
                    tail.join(LINE_SEPARATOR)
                )
            }
            Strategy::ProofOnly => format!("<ISA_PRF> {}", ctx.accumulated),
            Strategy::StateOnly => format!("<ISA_OBS> {state}"),
            Strategy::ProofAndState => {
                format!("<ISA_PRF> {} <ISA_OBS> {state}", ctx.accumulated)
            }
            Strategy::TrimmedProofAndState => {
                let trimmed = trim_to_budget(ctx.accumulated, state, config.max_length);
                format!("<ISA_TRIM_PRF> {trimmed} <ISA_OBS> {state}")
            }
        };
        Ok(rendered)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownStrategy {
                name: s.to_string(),
                known: Strategy::ALL
                    .iter()
                    .map(Strategy::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Inputs shared by every strategy for one step.
pub struct StepContext<'a, 'c> {
    /// The problem's transitions; entry 0 is the header.
    pub steps: &'a [&'a Transition],
    /// Index of the step being rendered (`>= 1`).
    pub index: usize,
    /// Proof texts of steps `0..index` joined by [`LINE_SEPARATOR`].
    pub accumulated: &'a str,
    pub cache: &'c mut NeededCache,
}

impl<'a, 'c> StepContext<'a, 'c> {
    pub fn transition(&self) -> &'a Transition {
        self.steps[self.index]
    }
}

fn proof_lines(accumulated: &str) -> Vec<&str> {
    accumulated.trim().split(LINE_SEPARATOR).collect()
}

/// Most recent proof lines whose length, together with the state, stays
/// within `max_length` characters. Each kept line is followed by the
/// separator.
fn trim_to_budget(accumulated: &str, state: &str, max_length: usize) -> String {
    let state_len = state.chars().count();
    let separator_len = LINE_SEPARATOR.chars().count();

    let mut kept: Vec<&str> = Vec::new();
    let mut used = 0usize;
    for line in proof_lines(accumulated).into_iter().rev() {
        let line = line.trim();
        let line_len = line.chars().count();
        if used + state_len + line_len > max_length {
            break;
        }
        kept.push(line);
        used += line_len + separator_len;
    }

    kept.iter()
        .rev()
        .map(|line| format!("{line}{LINE_SEPARATOR}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(strategy: Strategy, steps: &[Transition], index: usize, config: &ExtractorConfig) -> String {
        let refs: Vec<&Transition> = steps.iter().collect();
        let accumulated = steps[..index]
            .iter()
            .map(|t| t.proof.as_str())
            .collect::<Vec<_>>()
            .join(LINE_SEPARATOR);
        let mut cache = NeededCache::new();
        let mut ctx = StepContext {
            steps: &refs,
            index,
            accumulated: &accumulated,
            cache: &mut cache,
        };
        strategy.render(&mut ctx, config).unwrap()
    }

    fn sample() -> Vec<Transition> {
        vec![
            Transition::with_depth("", "lemma foo", 0),
            Transition::with_depth("proof (prove)", "proof -", 1),
            Transition::with_depth("proof (state)", "have A", 1),
            Transition::with_depth("proof (prove)", "by simp", 2),
            Transition::with_depth("proof (chain)", "show B", 1),
        ]
    }

    #[test]
    fn parses_every_known_name() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.as_str().parse::<Strategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn unknown_name_is_config_error() {
        let err = "everything".parse::<Strategy>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownStrategy { ref name, .. } if name == "everything"));
        assert!(err.to_string().contains("trimmed_proof_and_state"));
    }

    #[test]
    fn zero_last_k_is_rejected() {
        let config = ExtractorConfig {
            last_k: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLastK));
        assert!(ExtractorConfig::default().validate().is_ok());
    }

    #[test]
    fn needed_skips_nested_subproof() {
        let out = render(Strategy::Needed, &sample(), 4, &ExtractorConfig::default());
        assert_eq!(
            out,
            "<ISA_NDS> lemma foo \\n proof - \\n have A <ISA_OBS> proof (chain)"
        );
    }

    #[test]
    fn last_k_takes_trailing_lines() {
        let config = ExtractorConfig {
            last_k: 2,
            ..Default::default()
        };
        let out = render(Strategy::LastK, &sample(), 4, &config);
        assert_eq!(out, "<ISA_LAST_2> have A \\n by simp <ISA_OBS> proof (chain)");

        let config = ExtractorConfig {
            last_k: 10,
            ..Default::default()
        };
        let out = render(Strategy::LastK, &sample(), 2, &config);
        assert_eq!(out, "<ISA_LAST_10> lemma foo \\n proof - <ISA_OBS> proof (state)");
    }

    #[test]
    fn proof_and_state_variants() {
        let config = ExtractorConfig::default();
        assert_eq!(
            render(Strategy::ProofOnly, &sample(), 2, &config),
            "<ISA_PRF> lemma foo \\n proof -"
        );
        assert_eq!(
            render(Strategy::StateOnly, &sample(), 2, &config),
            "<ISA_OBS> proof (state)"
        );
        assert_eq!(
            render(Strategy::ProofAndState, &sample(), 2, &config),
            "<ISA_PRF> lemma foo \\n proof - <ISA_OBS> proof (state)"
        );
    }

    #[test]
    fn trimmed_keeps_recent_lines_within_budget() {
        // state "proof (chain)" is 13 chars; "by simp" (7) and "have A" (6) fit
        // into 30, "proof -" would not.
        let config = ExtractorConfig {
            max_length: 30,
            ..Default::default()
        };
        let out = render(Strategy::TrimmedProofAndState, &sample(), 4, &config);
        assert_eq!(
            out,
            "<ISA_TRIM_PRF> have A \\n by simp \\n  <ISA_OBS> proof (chain)"
        );
    }

    #[test]
    fn trimmed_with_state_over_budget_keeps_nothing() {
        let config = ExtractorConfig {
            max_length: 5,
            ..Default::default()
        };
        let out = render(Strategy::TrimmedProofAndState, &sample(), 4, &config);
        assert_eq!(out, "<ISA_TRIM_PRF>  <ISA_OBS> proof (chain)");
    }
}
