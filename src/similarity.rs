//! String similarity and alignment
//!
//! Implements the SequenceMatcher algorithm over code points: matching blocks are
//! found by taking the longest common substring of a region and recursing on what
//! lies left and right of it. The blocks yield both a similarity ratio and an
//! opcode sequence covering both strings.

use crate::arabic::normalize_arabic;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Kind of an alignment segment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpTag {
    Equal,
    Replace,
    Delete,
    Insert,
}

impl OpTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Replace => "replace",
            Self::Delete => "delete",
            Self::Insert => "insert",
        }
    }
}

impl std::fmt::Display for OpTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One labeled segment of an alignment between expected and actual text.
///
/// `i1..i2` indexes the expected text and `j1..j2` the actual text, both in
/// code points. The slices are copies of those ranges.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOp {
    pub op: OpTag,
    pub expected: String,
    pub actual: String,
    pub i1: usize,
    pub i2: usize,
    pub j1: usize,
    pub j2: usize,
}

/// A run of `size` equal elements at `a[a_start..]` and `b[b_start..]`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchingBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// SequenceMatcher over two character sequences
///
/// Positions of every element of `b` are indexed once up front. When `autojunk`
/// is enabled and `b` has at least `autojunk_min_len` elements, elements that
/// occur more than `len / 100 + 1` times are left out of the index, so they can
/// never seed a match.
pub struct SequenceMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    b_positions: HashMap<char, Vec<usize>>,
}

impl<'a> SequenceMatcher<'a> {
    /// Matcher with every element of `b` eligible for matching
    pub fn new(a: &'a [char], b: &'a [char]) -> Self {
        Self::with_autojunk(a, b, None)
    }

    /// Matcher applying the popular-element heuristic once `b` reaches `min_len`
    pub fn with_autojunk(a: &'a [char], b: &'a [char], min_len: Option<usize>) -> Self {
        let mut b_positions: HashMap<char, Vec<usize>> = HashMap::new();
        for (i, &c) in b.iter().enumerate() {
            b_positions.entry(c).or_default().push(i);
        }

        if let Some(min_len) = min_len {
            if b.len() >= min_len {
                let ntest = b.len() / 100 + 1;
                let popular: HashSet<char> = b_positions
                    .iter()
                    .filter(|(_, positions)| positions.len() > ntest)
                    .map(|(&c, _)| c)
                    .collect();
                if !popular.is_empty() {
                    tracing::trace!(popular = popular.len(), "autojunk dropped popular elements");
                }
                b_positions.retain(|c, _| !popular.contains(c));
            }
        }

        Self { a, b, b_positions }
    }

    /// Find the longest matching block in `a[a_lo..a_hi]` and `b[b_lo..b_hi]`
    ///
    /// Among blocks of maximal size, returns the one starting earliest in `a`,
    /// then earliest in `b`. Size 0 when nothing matches.
    pub fn find_longest_match(
        &self,
        a_lo: usize,
        a_hi: usize,
        b_lo: usize,
        b_hi: usize,
    ) -> MatchingBlock {
        let mut best_i = a_lo;
        let mut best_j = b_lo;
        let mut best_size = 0;

        // j2len[j] = length of longest match ending with a[i-1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in a_lo..a_hi {
            let mut new_j2len: HashMap<usize, usize> = HashMap::new();

            if let Some(positions) = self.b_positions.get(&self.a[i]) {
                for &j in positions {
                    if j < b_lo {
                        continue;
                    }
                    if j >= b_hi {
                        break;
                    }

                    let k = match j.checked_sub(1) {
                        Some(prev) => j2len.get(&prev).copied().unwrap_or(0) + 1,
                        None => 1,
                    };
                    new_j2len.insert(j, k);

                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }

            j2len = new_j2len;
        }

        MatchingBlock {
            a_start: best_i,
            b_start: best_j,
            size: best_size,
        }
    }

    /// All matching blocks in increasing order, adjacent blocks merged.
    ///
    /// Ends with the sentinel block `(a.len(), b.len(), 0)`.
    pub fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let mut blocks = Vec::new();
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((a_lo, a_hi, b_lo, b_hi)) = queue.pop() {
            let block = self.find_longest_match(a_lo, a_hi, b_lo, b_hi);
            if block.size == 0 {
                continue;
            }

            let a_end = block.a_start + block.size;
            let b_end = block.b_start + block.size;
            if a_lo < block.a_start && b_lo < block.b_start {
                queue.push((a_lo, block.a_start, b_lo, block.b_start));
            }
            if a_end < a_hi && b_end < b_hi {
                queue.push((a_end, a_hi, b_end, b_hi));
            }
            blocks.push(block);
        }

        blocks.sort_by_key(|block| (block.a_start, block.b_start));

        let mut merged: Vec<MatchingBlock> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            match merged.last_mut() {
                Some(last)
                    if last.a_start + last.size == block.a_start
                        && last.b_start + last.size == block.b_start =>
                {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }

        merged.push(MatchingBlock {
            a_start: self.a.len(),
            b_start: self.b.len(),
            size: 0,
        });
        merged
    }

    /// Number of matched elements over all matching blocks
    pub fn matched_len(&self) -> usize {
        self.matching_blocks().iter().map(|block| block.size).sum()
    }

    /// `2 * M / T`; 1.0 when both sequences are empty
    pub fn ratio(&self) -> f64 {
        ratio_from(self.matched_len(), self.a.len() + self.b.len())
    }

    /// Opcodes covering both sequences end to end, as `(tag, i1, i2, j1, j2)`
    pub fn opcodes(&self) -> Vec<(OpTag, usize, usize, usize, usize)> {
        opcodes_from(&self.matching_blocks())
    }
}

fn ratio_from(matches: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    2.0 * matches as f64 / total as f64
}

fn opcodes_from(blocks: &[MatchingBlock]) -> Vec<(OpTag, usize, usize, usize, usize)> {
    let mut i = 0;
    let mut j = 0;
    let mut answer = Vec::new();

    for block in blocks {
        let tag = if i < block.a_start && j < block.b_start {
            Some(OpTag::Replace)
        } else if i < block.a_start {
            Some(OpTag::Delete)
        } else if j < block.b_start {
            Some(OpTag::Insert)
        } else {
            None
        };
        if let Some(tag) = tag {
            answer.push((tag, i, block.a_start, j, block.b_start));
        }

        i = block.a_start + block.size;
        j = block.b_start + block.size;
        if block.size > 0 {
            answer.push((OpTag::Equal, block.a_start, i, block.b_start, j));
        }
    }

    answer
}

/// Align two canonical strings, returning the similarity ratio and edit operations.
///
/// `autojunk_min_len` enables the popular-element heuristic, see [`SequenceMatcher`].
pub fn align(
    expected_norm: &str,
    actual_norm: &str,
    autojunk_min_len: Option<usize>,
) -> (f64, Vec<EditOp>) {
    let a: Vec<char> = expected_norm.chars().collect();
    let b: Vec<char> = actual_norm.chars().collect();
    let matcher = SequenceMatcher::with_autojunk(&a, &b, autojunk_min_len);

    let blocks = matcher.matching_blocks();
    let matches: usize = blocks.iter().map(|block| block.size).sum();
    let ratio = ratio_from(matches, a.len() + b.len());

    let diffs = opcodes_from(&blocks)
        .into_iter()
        .map(|(op, i1, i2, j1, j2)| EditOp {
            op,
            expected: a[i1..i2].iter().collect(),
            actual: b[j1..j2].iter().collect(),
            i1,
            i2,
            j1,
            j2,
        })
        .collect();

    (ratio, diffs)
}

/// Compute similarity ratio between two strings
///
/// Returns a ratio between 0.0 (no similarity) and 1.0 (identical strings).
///
/// # Arguments
/// * `text1` - First string to compare
/// * `text2` - Second string to compare
/// * `normalize` - Whether to normalize Arabic text before comparison
pub fn similarity(text1: &str, text2: &str, normalize: bool) -> f64 {
    let (s1, s2) = if normalize {
        (normalize_arabic(text1), normalize_arabic(text2))
    } else {
        (text1.to_string(), text2.to_string())
    };

    if s1.is_empty() && s2.is_empty() {
        return 1.0;
    }
    if s1.is_empty() || s2.is_empty() {
        return 0.0;
    }

    let chars1: Vec<char> = s1.chars().collect();
    let chars2: Vec<char> = s2.chars().collect();

    SequenceMatcher::new(&chars1, &chars2).ratio()
}
