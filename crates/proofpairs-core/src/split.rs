//! Deterministic train/val/test assignment.
//!
//! The split of a problem is a pure function of its name:
//!
//! - `h = SHA-256(utf8(name)) mod 10^30`
//! - `u = frac(h · π)`
//! - `u < 0.95 → train`, `u < 0.96 → val`, otherwise `test`
//!
//! `h` has 30 decimal digits, so `h · π` must be carried well past double
//! precision for the fractional part to mean anything. We use fixed-point
//! big-integer arithmetic: π is truncated to [`PI_FRACTION_DIGITS`] decimals,
//! which bounds the error of `u` by `10^30 · 10^-75 = 10^-45`.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// π scaled by `10^PI_FRACTION_DIGITS`.
const PI_DIGITS: &[u8] =
    b"3141592653589793238462643383279502884197169399375105820974944592307816406286";

pub const PI_FRACTION_DIGITS: u32 = 75;

const fn all_decimal(bytes: &[u8]) -> bool {
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    PI_DIGITS.len() == PI_FRACTION_DIGITS as usize + 1 && all_decimal(PI_DIGITS),
    "PI_DIGITS must hold 3 followed by PI_FRACTION_DIGITS decimals"
);

/// Decimal digits kept from the digest.
pub const HASH_MODULUS_DIGITS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Val,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Val, Split::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper bounds of the train and val bands, in basis points of `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitThresholds {
    pub train_below_bp: u32,
    pub val_below_bp: u32,
}

impl Default for SplitThresholds {
    fn default() -> Self {
        Self {
            train_below_bp: 9_500,
            val_below_bp: 9_600,
        }
    }
}

/// Precomputed constants for split assignment.
#[derive(Debug, Clone)]
pub struct SplitAssigner {
    thresholds: SplitThresholds,
    pi_scaled: BigUint,
    hash_modulus: BigUint,
    scale: BigUint,
}

impl Default for SplitAssigner {
    fn default() -> Self {
        Self::new(SplitThresholds::default())
    }
}

impl SplitAssigner {
    pub fn new(thresholds: SplitThresholds) -> Self {
        let ten = BigUint::from(10u32);
        Self {
            thresholds,
            pi_scaled: PI_DIGITS
                .iter()
                .fold(BigUint::default(), |acc, d| acc * 10u32 + u32::from(d - b'0')),
            hash_modulus: ten.pow(HASH_MODULUS_DIGITS),
            scale: ten.pow(PI_FRACTION_DIGITS),
        }
    }

    /// `frac(h · π)` scaled by `10^PI_FRACTION_DIGITS`.
    fn scaled_fraction(&self, name: &str) -> BigUint {
        let digest = Sha256::digest(name.as_bytes());
        let h = BigUint::from_bytes_be(&digest).mod_floor(&self.hash_modulus);
        (h * &self.pi_scaled).mod_floor(&self.scale)
    }

    /// The pseudo-random value in `[0, 1)` derived from `name`.
    pub fn fraction(&self, name: &str) -> f64 {
        // 17 significant digits are all an f64 can hold.
        let divisor = BigUint::from(10u32).pow(PI_FRACTION_DIGITS - 17);
        let top = self.scaled_fraction(name) / divisor;
        top.to_f64().unwrap_or(0.0) / 1e17
    }

    pub fn assign(&self, name: &str) -> Split {
        let basis = self.scaled_fraction(name) * 10_000u32;
        let below = |bp: u32| basis < &self.scale * bp;
        if below(self.thresholds.train_below_bp) {
            Split::Train
        } else if below(self.thresholds.val_below_bp) {
            Split::Val
        } else {
            Split::Test
        }
    }
}

/// Split of `name` under the default thresholds.
pub fn split_for(name: &str) -> Split {
    SplitAssigner::default().assign(name)
}

/// Hash-derived value in `[0, 1)` for `name`.
pub fn hash_fraction(name: &str) -> f64 {
    SplitAssigner::default().fraction(name)
}
