//! Arabic text normalization utilities
//!
//! Provides normalization of Arabic text for comparison:
//! - Remove diacritics (tashkeel)
//! - Fold alef/ya/waw/ta marbuta variants
//! - Replace punctuation with spaces
//! - Collapse whitespace

use std::ops::RangeInclusive;

/// Arabic combining-mark ranges removed before any comparison
const DIACRITIC_RANGES: &[RangeInclusive<char>] = &[
    '\u{0610}'..='\u{061A}', // Honorifics and Quranic small marks
    '\u{064B}'..='\u{065F}', // Harakat, tanween, shadda, sukun, hamza marks
    '\u{0670}'..='\u{0670}', // Superscript alef
    '\u{06D6}'..='\u{06ED}', // Quranic annotation signs
];

/// Letter variants folded to a single base letter
const LETTER_FOLDS: &[(char, char)] = &[
    ('\u{0623}', '\u{0627}'), // أ -> ا
    ('\u{0625}', '\u{0627}'), // إ -> ا
    ('\u{0622}', '\u{0627}'), // آ -> ا
    ('\u{0671}', '\u{0627}'), // ٱ -> ا
    ('\u{0649}', '\u{064A}'), // ى -> ي
    ('\u{0624}', '\u{0648}'), // ؤ -> و
    ('\u{0626}', '\u{064A}'), // ئ -> ي
    ('\u{0629}', '\u{0647}'), // ة -> ه
];

/// Characters replaced by a single space
const PUNCTUATION: &[char] = &[
    '\u{060C}', // Arabic comma
    '\u{061B}', // Arabic semicolon
    '\u{061F}', // Arabic question mark
    ',', ';', '?', '!', '.', '-',
    '\u{2014}', // Em dash
    '(', ')', '[', ']', '{', '}', '"', '\'',
];

/// Check if a character is an Arabic diacritic
#[inline]
pub fn is_diacritic(c: char) -> bool {
    DIACRITIC_RANGES.iter().any(|range| range.contains(&c))
}

#[inline]
fn fold_letter(c: char) -> char {
    LETTER_FOLDS
        .iter()
        .find(|(src, _)| *src == c)
        .map(|&(_, dst)| dst)
        .unwrap_or(c)
}

/// Unicode White_Space plus the information separators U+001C..U+001F
#[inline]
fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{001C}'..='\u{001F}').contains(&c)
}

#[inline]
fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

/// Remove diacritics only, leaving letters and punctuation untouched.
///
/// The tajweed heuristics rely on this form since they test for the literal
/// presence of base letters.
pub fn strip_diacritics(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    text.chars().filter(|&c| !is_diacritic(c)).collect()
}

/// Normalize Arabic text for comparison
///
/// Performs the following, in order:
/// - Remove diacritics
/// - Fold أ إ آ ٱ to ا, ى and ئ to ي, ؤ to و, ة to ه
/// - Replace punctuation with a space
/// - Collapse whitespace runs to a single space and trim both ends
///
/// Every step maps one character at a time, so they are applied in a single pass.
pub fn normalize_arabic(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut result = String::with_capacity(text.len());
    let mut last_was_space = true; // Start true to skip leading spaces

    for c in text.chars() {
        if is_diacritic(c) {
            continue;
        }

        let c = fold_letter(c);

        if is_space(c) || is_punctuation(c) {
            if !last_was_space {
                result.push(' ');
                last_was_space = true;
            }
            continue;
        }

        result.push(c);
        last_was_space = false;
    }

    // Remove trailing space
    if result.ends_with(' ') {
        result.pop();
    }

    result
}
