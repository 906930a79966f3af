//! Coarse tajweed feedback
//!
//! These are presence/absence checks on base letters, used as placeholders for
//! articulation feedback. They are not authoritative; real tajweed assessment
//! needs phonological analysis of the recitation.

use crate::arabic::strip_diacritics;
use serde::{Deserialize, Serialize};

/// Qalqalah letters: ق ط ب ج د
const QALQALAH_LETTERS: &[char] = &['\u{0642}', '\u{0637}', '\u{0628}', '\u{062C}', '\u{062F}'];

/// A heuristic flag, in the order the checks run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TajweedFlag {
    MaddAlef,
    MaddWaw,
    MaddYa,
    WeakQalqalah,
    NoonSakinah,
}

impl TajweedFlag {
    /// Every flag, in check order
    pub const ALL: [TajweedFlag; 5] = [
        Self::MaddAlef,
        Self::MaddWaw,
        Self::MaddYa,
        Self::WeakQalqalah,
        Self::NoonSakinah,
    ];

    pub fn message(&self) -> &'static str {
        match self {
            Self::MaddAlef => "Possible missing madd on 'ا' (elongation)",
            Self::MaddWaw => "Possible missing madd on 'و' (elongation)",
            Self::MaddYa => "Possible missing madd on 'ي' (elongation)",
            Self::WeakQalqalah => "Possible weak qalqalah articulation",
            Self::NoonSakinah => "Check noon sakinah/ikhfa' application",
        }
    }

    /// Whether the flag fires for diacritic-stripped expected/actual text
    fn fires(&self, expected: &str, actual: &str) -> bool {
        match self {
            Self::MaddAlef => letter_missing(expected, actual, '\u{0627}'),
            Self::MaddWaw => letter_missing(expected, actual, '\u{0648}'),
            Self::MaddYa => letter_missing(expected, actual, '\u{064A}'),
            Self::WeakQalqalah => {
                expected.contains(QALQALAH_LETTERS) && !actual.contains(QALQALAH_LETTERS)
            }
            Self::NoonSakinah => letter_missing(expected, actual, '\u{0646}'),
        }
    }
}

impl std::fmt::Display for TajweedFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[inline]
fn letter_missing(expected: &str, actual: &str, letter: char) -> bool {
    expected.contains(letter) && !actual.contains(letter)
}

/// Flags that fire for this pair, in check order
///
/// Only diacritics are removed beforehand; letter variants and punctuation are
/// kept, so e.g. ة and ه count as different letters here.
pub fn detect_flags(expected: &str, actual: &str) -> Vec<TajweedFlag> {
    let en = strip_diacritics(expected);
    let an = strip_diacritics(actual);

    TajweedFlag::ALL
        .into_iter()
        .filter(|flag| flag.fires(&en, &an))
        .collect()
}

/// Advisory messages for this pair, in check order
pub fn basic_tajweed_flags(expected: &str, actual: &str) -> Vec<String> {
    detect_flags(expected, actual)
        .into_iter()
        .map(|flag| flag.message().to_string())
        .collect()
}
