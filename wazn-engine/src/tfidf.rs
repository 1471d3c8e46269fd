//! TF-IDF model trained over corpus examples
//!
//! One document per example line. `idf = ln(N / (1 + df)) + 1`. Vectors are
//! sparse maps restricted to the trained vocabulary; tokens never seen during
//! training are omitted rather than zero-filled.

use crate::normalize::tokenize;
use std::collections::{HashMap, HashSet};

/// Sparse term → weight vector
pub type TermVector = HashMap<String, f64>;

/// Inverse document frequencies learned from a fixed document list
#[derive(Debug, Clone, Default)]
pub struct TfidfModel {
    idf: HashMap<String, f64>,
    document_count: usize,
}

impl TfidfModel {
    /// Train on the given documents
    pub fn fit<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        let mut document_count = 0usize;

        for doc in documents {
            document_count += 1;
            let unique: HashSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for token in unique {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        let n = document_count as f64;
        let idf = document_frequency
            .into_iter()
            .map(|(token, df)| {
                let value = (n / (1.0 + df as f64)).ln() + 1.0;
                (token, value)
            })
            .collect();

        Self {
            idf,
            document_count,
        }
    }

    /// Number of training documents
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Number of distinct trained tokens
    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }

    /// IDF of a (normalized) token, if it was seen in training
    pub fn idf(&self, token: &str) -> Option<f64> {
        self.idf.get(token).copied()
    }

    /// Token count / total tokens
    pub fn term_frequencies(text: &str) -> TermVector {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return TermVector::new();
        }
        let total = tokens.len() as f64;
        let mut counts: HashMap<String, usize> = HashMap::new();
        for token in tokens {
            *counts.entry(token).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .map(|(token, count)| (token, count as f64 / total))
            .collect()
    }

    /// tf·idf vector over trained tokens only
    pub fn vector(&self, text: &str) -> TermVector {
        Self::term_frequencies(text)
            .into_iter()
            .filter_map(|(token, tf)| self.idf(&token).map(|idf| (token, tf * idf)))
            .collect()
    }

    /// Cosine similarity of the two texts' vectors
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        cosine_similarity(&self.vector(a), &self.vector(b))
    }
}

/// Cosine over the shared keys
///
/// No shared keys, or a zero magnitude on either side → 0.0.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(token, x)| b.get(token).map(|y| x * y))
        .sum();
    let shared = a.keys().any(|token| b.contains_key(token));
    if !shared {
        return 0.0;
    }

    let magnitude_a = a.values().map(|v| v * v).sum::<f64>().sqrt();
    let magnitude_b = b.values().map(|v| v * v).sum::<f64>().sqrt();
    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }
    dot / (magnitude_a * magnitude_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn model() -> TfidfModel {
        TfidfModel::fit(["يا ليل الصب", "يا عين القلب", "يا نجم السما"])
    }

    #[test]
    fn idf_of_ubiquitous_and_rare_tokens() {
        let m = model();
        assert_eq!(m.document_count(), 3);

        // "يا" is in all three documents
        let common = m.idf("يا").unwrap();
        assert!(approx(common, (3.0f64 / 4.0).ln() + 1.0));
        assert!(common < 1.0);

        let rare = m.idf("ليل").unwrap();
        assert!(approx(rare, (3.0f64 / 2.0).ln() + 1.0));
        assert!(rare > common);

        assert!(m.idf("غريب").is_none());
    }

    #[test]
    fn term_frequencies_use_normalized_tokens() {
        let tf = TfidfModel::term_frequencies("ليلُ ليل يا");
        assert!(approx(tf["ليل"], 2.0 / 3.0));
        assert!(approx(tf["يا"], 1.0 / 3.0));
        assert!(TfidfModel::term_frequencies("").is_empty());
    }

    #[test]
    fn vector_omits_unseen_tokens() {
        let v = model().vector("يا ليل غريب");
        assert_eq!(v.len(), 2);
        assert!(!v.contains_key("غريب"));
    }

    #[test]
    fn disjoint_texts_have_zero_similarity() {
        let m = model();
        assert_eq!(m.similarity("ليل الصب", "عين القلب"), 0.0);
        assert_eq!(m.similarity("غريب", "غريب"), 0.0);
    }

    #[test]
    fn identical_texts_have_unit_similarity() {
        let m = model();
        assert!(approx(m.similarity("يا ليل الصب", "يا ليل الصب"), 1.0));
        let partial = m.similarity("يا ليل", "يا ليل الصب");
        assert!(partial > 0.0 && partial < 1.0);
    }

    #[test]
    fn cosine_edges() {
        let empty = TermVector::new();
        let v: TermVector = [("a".to_string(), 1.0)].into_iter().collect();
        let zero: TermVector = [("a".to_string(), 0.0)].into_iter().collect();
        assert_eq!(cosine_similarity(&empty, &v), 0.0);
        assert_eq!(cosine_similarity(&v, &zero), 0.0);
        assert!(approx(cosine_similarity(&v, &v), 1.0));
    }
}
