//! Meter matching pipeline
//!
//! Stages, in order:
//! 1. Availability: a corpus without usable examples is reported unavailable.
//! 2. Exact match: compact light-normalized forms compared against every
//!    candidate (equality, or a near-duplicate edit ratio when the lengths are
//!    close); repeated with deep normalization if nothing matched. The first
//!    candidate in corpus order wins.
//! 3. Fuzzy match: combined metric score against every candidate, then TF-IDF
//!    cosine (boosted) against every weight profile while the best score is
//!    still below the profile gate.
//! 4. Confidence gate: scores below the minimum are reported as no match.
//!
//! Nothing here mutates the corpus; every derived structure lives for one call.

use crate::combiner::Combiner;
use crate::normalize::{compact, normalize};
use crate::similarity::levenshtein_ratio;
use crate::tfidf::TfidfModel;
use std::fmt;
use tracing::debug;
use wazn_common::config::MatchingConfig;
use wazn_common::{Candidate, Corpus, WeightProfile};

/// How a fuzzy match was established
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuzzyMethod {
    /// Best combined score against a single example
    ExampleSimilarity,
    /// Boosted TF-IDF cosine against a weight's profile
    WeightTfidf,
}

impl FuzzyMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            FuzzyMethod::ExampleSimilarity => "example_similarity",
            FuzzyMethod::WeightTfidf => "weight_tfidf",
        }
    }
}

impl fmt::Display for FuzzyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Method tag reported for exact matches
pub const EXACT_MATCH_METHOD: &str = "exact_match";

/// Which normalization pass produced an exact match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExactPass {
    Light,
    Deep,
}

/// Result of one analysis call
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    /// The corpus has no usable examples
    Unavailable,

    /// Input equals (or nearly equals) a stored example; confidence is 1.0
    ExactMatch {
        normalized: String,
        weight: String,
        taf3eelat: String,
        example: String,
    },

    /// Best fuzzy score cleared the confidence gate
    FuzzyMatch {
        normalized: String,
        weight: String,
        taf3eelat: String,
        /// Rounded to 3 decimals
        confidence: f64,
        example: String,
        method: FuzzyMethod,
    },

    /// Best fuzzy score fell below the confidence gate
    NoMatch {
        normalized: String,
        /// Rounded to 3 decimals
        confidence: f64,
    },
}

impl Analysis {
    pub fn is_matched(&self) -> bool {
        matches!(self, Analysis::ExactMatch { .. } | Analysis::FuzzyMatch { .. })
    }

    /// Reported confidence (None when unavailable)
    pub fn confidence(&self) -> Option<f64> {
        match self {
            Analysis::Unavailable => None,
            Analysis::ExactMatch { .. } => Some(1.0),
            Analysis::FuzzyMatch { confidence, .. } | Analysis::NoMatch { confidence, .. } => {
                Some(*confidence)
            }
        }
    }

    /// Matched weight key
    pub fn weight(&self) -> Option<&str> {
        match self {
            Analysis::ExactMatch { weight, .. } | Analysis::FuzzyMatch { weight, .. } => {
                Some(weight)
            }
            _ => None,
        }
    }

    /// Method tag of a match
    pub fn method(&self) -> Option<&'static str> {
        match self {
            Analysis::ExactMatch { .. } => Some(EXACT_MATCH_METHOD),
            Analysis::FuzzyMatch { method, .. } => Some(method.as_str()),
            _ => None,
        }
    }
}

/// Best fuzzy candidate before gating (score may exceed 1.0)
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub score: f64,
    pub weight: String,
    pub example: String,
    pub method: FuzzyMethod,
}

/// Round to 3 decimals for reporting
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Matching engine bound to one read-only corpus
pub struct Matcher<'a> {
    corpus: &'a Corpus,
    config: MatchingConfig,
    combiner: Combiner,
}

impl<'a> Matcher<'a> {
    /// Matcher with the default thresholds and metric weights
    pub fn new(corpus: &'a Corpus) -> Self {
        Self::with_config(corpus, MatchingConfig::default())
    }

    pub fn with_config(corpus: &'a Corpus, config: MatchingConfig) -> Self {
        let combiner = Combiner::from_config(&config);
        Self {
            corpus,
            config,
            combiner,
        }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Weight keys sorted ascending
    pub fn list_weights(&self) -> Vec<String> {
        self.corpus.weight_keys()
    }

    /// Run the full pipeline on one line of input
    ///
    /// Blank input is not special-cased; callers reject it beforehand.
    pub fn analyze(&self, text: &str) -> Analysis {
        let candidates = self.corpus.candidates();
        if candidates.is_empty() {
            debug!("Corpus has no usable examples");
            return Analysis::Unavailable;
        }

        let normalized = normalize(text, false);

        if let Some((candidate, pass)) = self.exact_match(text, &candidates) {
            debug!(
                weight = candidate.weight,
                pass = ?pass,
                "Exact match"
            );
            return Analysis::ExactMatch {
                normalized,
                weight: candidate.weight.to_string(),
                taf3eelat: self.taf3eelat(candidate.weight),
                example: candidate.example.to_string(),
            };
        }

        let model = TfidfModel::fit(candidates.iter().map(|c| c.example));
        let profiles = self.corpus.weight_profiles();

        let Some(best) = self.best_match(text, &candidates, &profiles, &model) else {
            debug!("No candidate scored above zero");
            return Analysis::NoMatch {
                normalized,
                confidence: 0.0,
            };
        };

        debug!(
            weight = %best.weight,
            score = best.score,
            method = %best.method,
            "Best fuzzy match"
        );

        let reported = if self.config.clamp_confidence {
            best.score.min(1.0)
        } else {
            best.score
        };

        if best.score < self.config.min_confidence {
            return Analysis::NoMatch {
                normalized,
                confidence: round3(reported),
            };
        }

        Analysis::FuzzyMatch {
            normalized,
            taf3eelat: self.taf3eelat(&best.weight),
            weight: best.weight,
            confidence: round3(reported),
            example: best.example,
            method: best.method,
        }
    }

    /// Exact-match stage: light pass, then deep pass
    pub fn exact_match<'c>(
        &self,
        text: &str,
        candidates: &[Candidate<'c>],
    ) -> Option<(Candidate<'c>, ExactPass)> {
        [(false, ExactPass::Light), (true, ExactPass::Deep)]
            .into_iter()
            .find_map(|(deep, pass)| {
                self.exact_pass(text, candidates, deep)
                    .map(|candidate| (candidate, pass))
            })
    }

    /// First candidate whose compact form equals, or nearly equals, the input's
    fn exact_pass<'c>(
        &self,
        text: &str,
        candidates: &[Candidate<'c>],
        deep: bool,
    ) -> Option<Candidate<'c>> {
        let input = compact(text, deep);
        let input_len = input.chars().count();

        candidates.iter().copied().find(|candidate| {
            let example = compact(candidate.example, deep);
            if input == example {
                return true;
            }
            let example_len = example.chars().count();
            input_len.abs_diff(example_len) <= self.config.exact_length_slack
                && levenshtein_ratio(&input, &example) > self.config.exact_ratio_threshold
        })
    }

    /// Fuzzy stage: full scan over examples, then boosted weight profiles
    ///
    /// Returns `None` only if nothing scored above zero.
    pub fn best_match(
        &self,
        text: &str,
        candidates: &[Candidate<'_>],
        profiles: &[WeightProfile<'_>],
        model: &TfidfModel,
    ) -> Option<MatchOutcome> {
        let mut best: Option<MatchOutcome> = None;
        let mut best_score = 0.0;

        for candidate in candidates {
            let score = self.combiner.score(text, candidate.example);
            if score > best_score {
                best_score = score;
                best = Some(MatchOutcome {
                    score,
                    weight: candidate.weight.to_string(),
                    example: candidate.example.to_string(),
                    method: FuzzyMethod::ExampleSimilarity,
                });
            }
        }

        if best_score < self.config.profile_gate {
            for profile in profiles {
                let score = model.similarity(text, &profile.text) * self.config.profile_boost;
                if score > best_score {
                    best_score = score;
                    let example = candidates
                        .iter()
                        .find(|c| c.weight == profile.weight)
                        .map(|c| c.example.to_string())
                        .unwrap_or_default();
                    best = Some(MatchOutcome {
                        score,
                        weight: profile.weight.to_string(),
                        example,
                        method: FuzzyMethod::WeightTfidf,
                    });
                }
            }
        }

        best
    }

    fn taf3eelat(&self, weight: &str) -> String {
        self.corpus
            .get(weight)
            .map(|w| w.taf3eelat.clone())
            .unwrap_or_default()
    }
}

/// Analyze with default settings
pub fn analyze(corpus: &Corpus, text: &str) -> Analysis {
    Matcher::new(corpus).analyze(text)
}

/// Weight keys sorted ascending
pub fn list_weights(corpus: &Corpus) -> Vec<String> {
    corpus.weight_keys()
}
