//! Recitation scoring
//!
//! Combines normalization, alignment and the tajweed heuristics into one result.
//! Every call is a pure function of its inputs, so scoring many pairs in
//! parallel needs no coordination.

use crate::arabic::normalize_arabic;
use crate::config::ScoringConfig;
use crate::similarity::{align, EditOp};
use crate::tajweed::basic_tajweed_flags;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Outcome of scoring one recitation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// 0.0 to 100.0
    pub score: f64,
    pub diffs: Vec<EditOp>,
    pub tajweed_flags: Vec<String>,
}

/// Scores recitations with a fixed configuration
#[derive(Clone, Debug, Default)]
pub struct Scorer {
    config: ScoringConfig,
}

impl Scorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score `actual` (recognized text) against `expected` (reference text)
    pub fn score_recitation(&self, expected: &str, actual: &str) -> ScoreResult {
        let expected_norm = normalize_arabic(expected);
        let actual_norm = normalize_arabic(actual);
        let (ratio, diffs) = align(
            &expected_norm,
            &actual_norm,
            self.config.autojunk_threshold(),
        );

        let score = self.score_from_ratio(&expected_norm, ratio);
        let tajweed_flags = basic_tajweed_flags(expected, actual);

        tracing::debug!(
            expected_len = expected_norm.chars().count(),
            actual_len = actual_norm.chars().count(),
            score,
            ops = diffs.len(),
            flags = tajweed_flags.len(),
            "scored recitation"
        );

        ScoreResult {
            score,
            diffs,
            tajweed_flags,
        }
    }

    pub fn compute_score(&self, expected: &str, actual: &str) -> f64 {
        let expected_norm = normalize_arabic(expected);
        if expected_norm.is_empty() {
            return 0.0;
        }
        let actual_norm = normalize_arabic(actual);
        let (ratio, _) = align(
            &expected_norm,
            &actual_norm,
            self.config.autojunk_threshold(),
        );
        self.score_from_ratio(&expected_norm, ratio)
    }

    pub fn diff_text(&self, expected: &str, actual: &str) -> Vec<EditOp> {
        let (_, diffs) = align(
            &normalize_arabic(expected),
            &normalize_arabic(actual),
            self.config.autojunk_threshold(),
        );
        diffs
    }

    /// Score many `(expected, actual)` pairs in parallel, preserving input order
    pub fn batch_score_recitations(&self, pairs: &[(String, String)]) -> Vec<ScoreResult> {
        pairs
            .par_iter()
            .map(|(expected, actual)| self.score_recitation(expected, actual))
            .collect()
    }

    // An empty reference scores 0.0 even though two empty texts have ratio 1.0
    fn score_from_ratio(&self, expected_norm: &str, ratio: f64) -> f64 {
        if expected_norm.is_empty() {
            return 0.0;
        }
        round_to(ratio * 100.0, self.config.score_decimals)
    }
}

/// Round the exact binary value of `value` to `decimals` places, ties to even.
///
/// `value * 10^d` is evaluated in integers so a product that only looks like a
/// tie after float rounding is not treated as one.
fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }

    let bits = value.abs().to_bits();
    let exp_bits = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    // value = mantissa * 2^exponent
    let (mantissa, exponent) = if exp_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exp_bits - 1075)
    };

    let factor = 10u128.pow(decimals);
    let scaled = mantissa as u128 * factor;
    if exponent >= 0 {
        return value;
    }

    let shift = (-exponent) as u32;
    // scaled < 2^73, so anything shifted this far is below one half
    let rounded = if shift >= 127 {
        0
    } else {
        let whole = scaled >> shift;
        let rem = scaled & ((1u128 << shift) - 1);
        let half = 1u128 << (shift - 1);
        if rem > half || (rem == half && whole % 2 == 1) {
            whole + 1
        } else {
            whole
        }
    };

    (rounded as f64 / factor as f64).copysign(value)
}

/// Score a recitation with the default configuration
pub fn score_recitation(expected: &str, actual: &str) -> ScoreResult {
    Scorer::default().score_recitation(expected, actual)
}

/// `round(100 * ratio, 2)` on normalized texts; 0.0 when the reference normalizes to nothing
pub fn compute_score(expected: &str, actual: &str) -> f64 {
    Scorer::default().compute_score(expected, actual)
}

/// Edit operations between the normalized texts
pub fn diff_text(expected: &str, actual: &str) -> Vec<EditOp> {
    Scorer::default().diff_text(expected, actual)
}

pub fn batch_score_recitations(pairs: &[(String, String)]) -> Vec<ScoreResult> {
    Scorer::default().batch_score_recitations(pairs)
}
