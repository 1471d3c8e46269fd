//! Corpus of known weights and their example lines
//!
//! The dataset is a JSON object keyed by weight:
//!
//! ```json
//! { "tawil": { "taf3eelat": "...", "examples": ["...", "..."] } }
//! ```
//!
//! Malformed entries are defaulted rather than rejected: a missing or
//! non-string `taf3eelat` becomes empty, a missing or non-array `examples`
//! becomes empty, and non-string or blank example entries are dropped.
//! Weight order is the dataset's key order; it is the tie-break order for the
//! exact-match stage and must not be disturbed.

use crate::{Error, Result};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// A named metrical class with its example lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weight {
    /// Unique key (e.g. "tawil")
    pub key: String,
    /// Foot pattern description (may be empty)
    pub taf3eelat: String,
    /// Trimmed, non-blank example lines in dataset order
    pub examples: Vec<String>,
}

impl Weight {
    /// Build a weight, trimming examples and dropping blank ones
    pub fn new<I, S>(key: impl Into<String>, taf3eelat: impl Into<String>, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            key: key.into(),
            taf3eelat: taf3eelat.into(),
            examples: examples
                .into_iter()
                .map(|ex| ex.as_ref().trim().to_string())
                .filter(|ex| !ex.is_empty())
                .collect(),
        }
    }

    /// All examples joined by a single space, or `None` if there are none
    pub fn profile_text(&self) -> Option<String> {
        if self.examples.is_empty() {
            None
        } else {
            Some(self.examples.join(" "))
        }
    }
}

/// One (weight, example) comparison unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub weight: &'a str,
    pub example: &'a str,
}

/// Concatenated example text of one weight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightProfile<'a> {
    pub weight: &'a str,
    pub text: String,
}

/// Immutable set of weights, in dataset order
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    weights: Vec<Weight>,
    index: HashMap<String, usize>,
}

impl Corpus {
    /// Corpus with no weights
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from weights in the given order
    ///
    /// A repeated key replaces the earlier weight in place.
    pub fn from_weights<I>(weights: I) -> Self
    where
        I: IntoIterator<Item = Weight>,
    {
        let mut corpus = Self::default();
        for weight in weights {
            match corpus.index.get(&weight.key) {
                Some(&slot) => corpus.weights[slot] = weight,
                None => {
                    corpus.index.insert(weight.key.clone(), corpus.weights.len());
                    corpus.weights.push(weight);
                }
            }
        }
        corpus
    }

    /// Parse a JSON dataset
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Build from an already-parsed JSON dataset
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(entries) = value else {
            return Err(Error::InvalidCorpus(
                "top level must be an object keyed by weight".to_string(),
            ));
        };

        let mut dropped = 0usize;
        let weights: Vec<Weight> = entries
            .into_iter()
            .map(|(key, info)| {
                let (weight, skipped) = weight_from_value(key, &info);
                dropped += skipped;
                weight
            })
            .collect();

        if dropped > 0 {
            warn!(dropped, "Dropped invalid or blank corpus examples");
        }

        Ok(Self::from_weights(weights))
    }

    /// Load the dataset from disk
    ///
    /// A missing or unreadable file is an error; the service treats it as fatal.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::CorpusNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let corpus = Self::from_json_str(&content)?;
        info!(
            path = %path.display(),
            weights = corpus.len(),
            examples = corpus.example_count(),
            "Corpus loaded"
        );
        Ok(corpus)
    }

    /// Look up a weight by key
    pub fn get(&self, key: &str) -> Option<&Weight> {
        self.index.get(key).map(|&slot| &self.weights[slot])
    }

    /// Weights in dataset order
    pub fn weights(&self) -> impl Iterator<Item = &Weight> {
        self.weights.iter()
    }

    /// Weight keys sorted ascending
    pub fn weight_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.weights.iter().map(|w| w.key.clone()).collect();
        keys.sort();
        keys
    }

    /// Flattened (weight, example) pairs: weights in dataset order, then examples
    pub fn candidates(&self) -> Vec<Candidate<'_>> {
        self.weights
            .iter()
            .flat_map(|w| {
                w.examples.iter().map(move |ex| Candidate {
                    weight: &w.key,
                    example: ex,
                })
            })
            .collect()
    }

    /// One profile per weight that has at least one example
    pub fn weight_profiles(&self) -> Vec<WeightProfile<'_>> {
        self.weights
            .iter()
            .filter_map(|w| {
                w.profile_text().map(|text| WeightProfile {
                    weight: &w.key,
                    text,
                })
            })
            .collect()
    }

    /// Number of weights (including weights with no examples)
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Total number of usable examples
    pub fn example_count(&self) -> usize {
        self.weights.iter().map(|w| w.examples.len()).sum()
    }
}

/// Returns the weight and how many example entries were skipped
fn weight_from_value(key: String, info: &Value) -> (Weight, usize) {
    let taf3eelat = info
        .get("taf3eelat")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let raw: &[Value] = info
        .get("examples")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let usable: Vec<&str> = raw
        .iter()
        .filter_map(Value::as_str)
        .filter(|ex| !ex.trim().is_empty())
        .collect();
    let skipped = raw.len() - usable.len();

    (Weight::new(key, taf3eelat, usable), skipped)
}

/// Once-initialized shared corpus
///
/// Concurrent first callers race on a single initialization; exactly one load
/// runs and every caller receives the same `Arc`. A failed load leaves the
/// cache empty so a later call can retry.
#[derive(Debug, Default)]
pub struct CorpusCache {
    cell: OnceCell<Arc<Corpus>>,
}

impl CorpusCache {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Return the cached corpus, loading it from `path` on first use
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Corpus>> {
        self.cell
            .get_or_try_init(|| Corpus::load(path).map(Arc::new))
            .cloned()
    }

    /// Install an already-built corpus; returns false if one was already set
    pub fn set(&self, corpus: Corpus) -> bool {
        self.cell.set(Arc::new(corpus)).is_ok()
    }

    /// The cached corpus, if initialized
    pub fn get(&self) -> Option<Arc<Corpus>> {
        self.cell.get().cloned()
    }
}

/// Process-wide corpus cache used by the service binary
pub static CORPUS: CorpusCache = CorpusCache::new();
