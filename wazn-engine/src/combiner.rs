//! Weighted combination of similarity metrics
//!
//! Score = Σ(value × weight) / Σ(weight of enabled metrics). Disabled metrics
//! are neither computed nor counted in the denominator.

use crate::similarity::{
    char_ngram_jaccard, levenshtein_ratio, sequence_ratio, word_jaccard, word_ngram_jaccard,
};
use crate::syllabic::syllabic_similarity;
use wazn_common::config::{EnabledMetrics, MatchingConfig, MetricWeights};

/// Character n-gram size used by the combiner
pub const CHAR_NGRAM_SIZE: usize = 3;

/// Word n-gram size used by the combiner
pub const WORD_NGRAM_SIZE: usize = 2;

/// Individual metric values for one pair (None = disabled)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricScores {
    pub levenshtein: Option<f64>,
    pub word_jaccard: Option<f64>,
    pub char_trigram_jaccard: Option<f64>,
    pub word_bigram_jaccard: Option<f64>,
    pub sequence: Option<f64>,
    pub syllabic: Option<f64>,
}

/// Weighted average of the enabled metrics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Combiner {
    weights: MetricWeights,
    enabled: EnabledMetrics,
}

impl Default for Combiner {
    fn default() -> Self {
        Self::new(MetricWeights::default(), EnabledMetrics::default())
    }
}

impl Combiner {
    pub fn new(weights: MetricWeights, enabled: EnabledMetrics) -> Self {
        Self { weights, enabled }
    }

    pub fn from_config(config: &MatchingConfig) -> Self {
        Self::new(config.weights, config.enabled)
    }

    /// Compute every enabled metric
    ///
    /// Edit distance and sequence ratio see the raw texts; the set and
    /// syllabic metrics normalize internally.
    pub fn metrics(&self, a: &str, b: &str) -> MetricScores {
        let on = self.enabled;
        MetricScores {
            levenshtein: on.levenshtein.then(|| levenshtein_ratio(a, b)),
            word_jaccard: on.word_jaccard.then(|| word_jaccard(a, b)),
            char_trigram_jaccard: on
                .char_trigram_jaccard
                .then(|| char_ngram_jaccard(a, b, CHAR_NGRAM_SIZE)),
            word_bigram_jaccard: on
                .word_bigram_jaccard
                .then(|| word_ngram_jaccard(a, b, WORD_NGRAM_SIZE)),
            sequence: on.sequence.then(|| sequence_ratio(a, b)),
            syllabic: on.syllabic.then(|| syllabic_similarity(a, b)),
        }
    }

    /// Combine already computed metrics
    pub fn combine(&self, scores: &MetricScores) -> f64 {
        let w = &self.weights;
        let weighted = [
            (scores.levenshtein, w.levenshtein),
            (scores.word_jaccard, w.word_jaccard),
            (scores.char_trigram_jaccard, w.char_trigram_jaccard),
            (scores.word_bigram_jaccard, w.word_bigram_jaccard),
            (scores.sequence, w.sequence),
            (scores.syllabic, w.syllabic),
        ];

        let (total, weight_sum) = weighted
            .iter()
            .filter_map(|(value, weight)| value.map(|v| (v * weight, *weight)))
            .fold((0.0, 0.0), |(total, sum), (v, w)| (total + v, sum + w));

        if weight_sum > 0.0 {
            total / weight_sum
        } else {
            0.0
        }
    }

    /// Combined similarity of two texts
    pub fn score(&self, a: &str, b: &str) -> f64 {
        self.combine(&self.metrics(a, b))
    }
}
