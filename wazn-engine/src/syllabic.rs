//! Approximate syllabic similarity
//!
//! Not a scansion. Each vowel-marker letter (ا و ي) closes a segment; the
//! segment lengths (characters since the previous marker, inclusive, spaces
//! counted) form an integer pattern. Patterns are aligned with dynamic time
//! warping. The combiner leaves this metric off unless configured.

use crate::normalize::normalize;

const VOWEL_MARKERS: [char; 3] = ['ا', 'و', 'ي'];

/// Segment-length pattern of the light-normalized text
pub fn syllabic_pattern(text: &str) -> Vec<u32> {
    let mut pattern = Vec::new();
    let mut count = 0u32;
    for c in normalize(text, false).chars() {
        count += 1;
        if VOWEL_MARKERS.contains(&c) {
            pattern.push(count);
            count = 0;
        }
    }
    if count > 0 {
        pattern.push(count);
    }
    pattern
}

/// DTW path cost divided by the longer sequence length
///
/// Cost of aligning two values is their absolute difference. Either sequence
/// empty → infinity.
pub fn dtw_distance(a: &[u32], b: &[u32]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return f64::INFINITY;
    }
    let (m, n) = (a.len(), b.len());
    let mut table = vec![vec![f64::INFINITY; n + 1]; m + 1];
    table[0][0] = 0.0;

    for i in 1..=m {
        for j in 1..=n {
            let cost = (a[i - 1] as f64 - b[j - 1] as f64).abs();
            let step = table[i - 1][j].min(table[i][j - 1]).min(table[i - 1][j - 1]);
            table[i][j] = cost + step;
        }
    }

    table[m][n] / m.max(n) as f64
}

/// `1 / (1 + dtw)`; both empty → 1.0, one empty → 0.0
pub fn syllabic_similarity(a: &str, b: &str) -> f64 {
    let pattern_a = syllabic_pattern(a);
    let pattern_b = syllabic_pattern(b);
    match (pattern_a.is_empty(), pattern_b.is_empty()) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.0,
        (false, false) => 1.0 / (1.0 + dtw_distance(&pattern_a, &pattern_b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_closes_on_vowel_markers() {
        // ي | ا | space ل ي | ل
        assert_eq!(syllabic_pattern("يا ليل"), vec![1, 1, 3, 1]);
        assert!(syllabic_pattern("").is_empty());
        assert_eq!(syllabic_pattern("قلب"), vec![3]);
    }

    #[test]
    fn dtw_basics() {
        assert_eq!(dtw_distance(&[1, 2, 3], &[1, 2, 3]), 0.0);
        assert!(dtw_distance(&[], &[1]).is_infinite());
        // [1,2] vs [1,2,2]: the repeated 2 aligns for free
        assert_eq!(dtw_distance(&[1, 2], &[1, 2, 2]), 0.0);
        // [1] vs [3]: cost 2 over length 1
        assert_eq!(dtw_distance(&[1], &[3]), 2.0);
    }

    #[test]
    fn similarity_edges() {
        assert_eq!(syllabic_similarity("", ""), 1.0);
        assert_eq!(syllabic_similarity("قلب", ""), 0.0);
        assert_eq!(syllabic_similarity("يا ليل", "يا ليل"), 1.0);
        let s = syllabic_similarity("يا ليل", "قلبي حزين");
        assert!(s > 0.0 && s < 1.0);
    }
}
