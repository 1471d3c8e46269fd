//! String and set similarity metrics
//!
//! Every metric returns a value in [0.0, 1.0] where 1.0 means identical.
//! Lengths are counted in characters, never bytes.

use crate::normalize::{char_ngrams, tokenize, word_ngrams};
use std::collections::HashSet;
use std::hash::Hash;

/// Unit-cost edit distance (insert, delete, substitute) over characters
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// `1 - distance / max_len`
///
/// Both empty → 1.0, exactly one empty → 0.0.
pub fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 && len_b == 0 {
        return 1.0;
    }
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }
    let distance = levenshtein_distance(a, b);
    1.0 - distance as f64 / len_a.max(len_b) as f64
}

/// `|A ∩ B| / |A ∪ B|`
///
/// Both empty → 1.0, exactly one empty → 0.0.
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// Jaccard over normalized token sets
pub fn word_jaccard(a: &str, b: &str) -> f64 {
    let words_a: HashSet<String> = tokenize(a).into_iter().collect();
    let words_b: HashSet<String> = tokenize(b).into_iter().collect();
    jaccard(&words_a, &words_b)
}

/// Jaccard over character n-gram sets (the combiner uses n = 3)
pub fn char_ngram_jaccard(a: &str, b: &str, n: usize) -> f64 {
    jaccard(&char_ngrams(a, n), &char_ngrams(b, n))
}

/// Jaccard over word n-gram sets (the combiner uses n = 2)
pub fn word_ngram_jaccard(a: &str, b: &str, n: usize) -> f64 {
    jaccard(&word_ngrams(a, n), &word_ngrams(b, n))
}

/// `2·M / T` where M is the size of all matching blocks
///
/// Blocks come from recursively taking the longest common contiguous run and
/// repeating on the unmatched left and right remainders. Both empty → 1.0.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched: usize = matching_blocks(&a, &b).iter().map(|block| block.size).sum();
    2.0 * matched as f64 / total as f64
}

/// A run of equal characters: `a[a_start..a_start+size] == b[b_start..b_start+size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// Non-overlapping matching blocks in increasing order
pub fn matching_blocks(a: &[char], b: &[char]) -> Vec<MatchingBlock> {
    let mut blocks = Vec::new();
    // Explicit stack instead of recursion; ranges are pushed right-first so
    // blocks come out left to right.
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let Some(block) = longest_match(a, b, a_lo, a_hi, b_lo, b_hi) else {
            continue;
        };
        let a_end = block.a_start + block.size;
        let b_end = block.b_start + block.size;
        if a_end < a_hi && b_end < b_hi {
            pending.push((a_end, a_hi, b_end, b_hi));
        }
        if a_lo < block.a_start && b_lo < block.b_start {
            pending.push((a_lo, block.a_start, b_lo, block.b_start));
        }
        blocks.push(block);
    }
    blocks.sort_by_key(|block| (block.a_start, block.b_start));
    blocks
}

/// Longest common run within `a[a_lo..a_hi]` and `b[b_lo..b_hi]`
///
/// Ties go to the earliest start in `a`, then the earliest start in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> Option<MatchingBlock> {
    let mut best = MatchingBlock {
        a_start: a_lo,
        b_start: b_lo,
        size: 0,
    };
    // run[j + 1] = length of the common run ending at a[i] and b[j]
    let width = b_hi - b_lo;
    let mut prev = vec![0usize; width + 1];
    let mut curr = vec![0usize; width + 1];

    for i in a_lo..a_hi {
        for j in b_lo..b_hi {
            let col = j - b_lo + 1;
            curr[col] = if a[i] == b[j] { prev[col - 1] + 1 } else { 0 };
            if curr[col] > best.size {
                best = MatchingBlock {
                    a_start: i + 1 - curr[col],
                    b_start: j + 1 - curr[col],
                    size: curr[col],
                };
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    (best.size > 0).then_some(best)
}
