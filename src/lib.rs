//! Iqra recitation scoring core
//!
//! Implementations of:
//! - Arabic text normalization
//! - String similarity and alignment (SequenceMatcher-like)
//! - Coarse tajweed feedback flags
//!
//! The web layer, authentication, persistence and speech-to-text live outside
//! this crate and call in with two strings: the reference text and the
//! recognized text.

pub mod arabic;
pub mod config;
pub mod error;
pub mod logging;
pub mod scoring;
pub mod similarity;
pub mod tajweed;

#[cfg(feature = "python")]
mod python;

pub use arabic::{normalize_arabic, strip_diacritics};
pub use config::ScoringConfig;
pub use error::RecitationError;
pub use scoring::{
    batch_score_recitations, compute_score, diff_text, score_recitation, ScoreResult, Scorer,
};
pub use similarity::{align, similarity, EditOp, OpTag, SequenceMatcher};
pub use tajweed::{basic_tajweed_flags, TajweedFlag};
