//! Proof-log → translation pair core
//!
//! Turns the transitions recorded while replaying formal proof files into
//! `(source, target)` pairs for sequence-to-sequence training:
//!
//! ```text
//!   ProofLogRecord ──► group_transitions ──► per-problem transitions
//!                                                  │
//!                         split_for(name) ◄────────┤
//!                                                  ▼
//!                           build_pairs(Strategy, ExtractorConfig)
//!                                                  │   (needed-context resolver
//!                                                  │    for the `needed` strategy)
//!                                                  ▼
//!                                       Vec<TranslationPair>
//! ```
//!
//! Everything in this crate is pure: no file or network IO. Reading records and
//! writing the corpus live in `proofpairs-ingest` and `proofpairs-corpus`.

pub mod extract;
pub mod grouping;
pub mod needed;
pub mod normalize;
pub mod pairs;
pub mod split;
pub mod transition;

pub use extract::{ConfigError, ExtractorConfig, Strategy, StepContext};
pub use grouping::{group_transitions, GroupingConfig, DEFAULT_PROOF_MARKER};
pub use needed::{needed, siblings, NeededCache, ResolveError, SiblingScan};
pub use normalize::normalize;
pub use pairs::{build_pairs, TranslationPair};
pub use split::{hash_fraction, split_for, Split, SplitAssigner, SplitThresholds};
pub use transition::{ProofLogRecord, Transition};

/// Token joining consecutive proof lines in accumulated proof text.
///
/// This is a literal backslash followed by `n`, padded with spaces, so that it
/// survives whitespace normalization of the emitted corpus.
pub const LINE_SEPARATOR: &str = " \\n ";
