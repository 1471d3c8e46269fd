//! # Wazn Engine
//!
//! Meter matching for colloquial Arabic verse lines against a corpus of
//! labeled examples.
//!
//! **Modules:**
//! - `normalize`: light and dialect-folding normalization, tokens, n-grams
//! - `similarity`: edit distance, set overlap and sequence ratio metrics
//! - `syllabic`: vowel-marker segment patterns aligned with DTW
//! - `tfidf`: TF-IDF model over corpus examples
//! - `combiner`: weighted average of the enabled metrics
//! - `matcher`: exact → fuzzy → gate pipeline
//! - `heuristic`: shape-only rule classifier

pub mod combiner;
pub mod heuristic;
pub mod matcher;
pub mod normalize;
pub mod similarity;
pub mod syllabic;
pub mod tfidf;

pub use combiner::{Combiner, MetricScores};
pub use heuristic::{classify, RuleCandidate, RuleVerdict};
pub use matcher::{analyze, list_weights, Analysis, FuzzyMethod, Matcher, EXACT_MATCH_METHOD};
pub use normalize::normalize;
