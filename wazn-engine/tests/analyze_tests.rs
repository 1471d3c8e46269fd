//! End-to-end tests for the matching pipeline
//!
//! Tests cover:
//! - Unavailable outcome for corpora without usable examples
//! - Exact-match precedence (modulo diacritics and spacing)
//! - Fuzzy matching against a weight's examples
//! - Confidence gate for unrelated input
//! - Corpus key order as the exact-match tie-break
//! - The bundled sample dataset

use std::path::PathBuf;
use wazn_common::config::MatchingConfig;
use wazn_common::{Corpus, Weight};
use wazn_engine::{analyze, list_weights, Analysis, FuzzyMethod, Matcher, EXACT_MATCH_METHOD};

/// Test helper: small corpus with two weights
fn sample_corpus() -> Corpus {
    Corpus::from_weights([
        Weight::new(
            "tawil",
            "فعولن مفاعيلن فعولن مفاعلن",
            ["قفا نبك من ذكرى حبيب ومنزل", "بسقط اللوى بين الدخول فحومل"],
        ),
        Weight::new(
            "muwashah",
            "فاعلاتن فاعلاتن فاعلن",
            ["جادك الغيث اذا الغيث همى", "يا زمان الوصل بالاندلس"],
        ),
    ])
}

#[test]
fn empty_corpus_reports_unavailable() {
    let result = analyze(&Corpus::empty(), "قفا نبك");
    assert_eq!(result, Analysis::Unavailable);
    assert!(!result.is_matched());
    assert_eq!(result.confidence(), None);

    let json = r#"{"tawil": {"taf3eelat": "فعولن", "examples": ["", "   ", 7]}}"#;
    let blank_only = Corpus::from_json_str(json).unwrap();
    assert_eq!(analyze(&blank_only, "قفا نبك"), Analysis::Unavailable);
}

#[test]
fn diacritized_example_is_exact_match() {
    let corpus = sample_corpus();
    let result = analyze(&corpus, "قِفا نَبْكِ مِنْ ذِكْرى حَبيبٍ وَمَنْزِلِ");

    assert!(result.is_matched());
    assert_eq!(result.weight(), Some("tawil"));
    assert_eq!(result.confidence(), Some(1.0));
    assert_eq!(result.method(), Some(EXACT_MATCH_METHOD));
    match result {
        Analysis::ExactMatch {
            normalized,
            taf3eelat,
            example,
            ..
        } => {
            assert_eq!(normalized, "قفا نبك من ذكري حبيب ومنزل");
            assert_eq!(taf3eelat, "فعولن مفاعيلن فعولن مفاعلن");
            assert_eq!(example, "قفا نبك من ذكرى حبيب ومنزل");
        }
        other => panic!("expected exact match, got {:?}", other),
    }
}

#[test]
fn exact_match_takes_precedence_over_fuzzy_scores() {
    // Same line stored under both weights; extra spacing in the input
    let corpus = Corpus::from_weights([
        Weight::new("first", "", ["يا زمان الوصل بالاندلس"]),
        Weight::new("second", "", ["يا زمان الوصل بالاندلس", "يا زمان"]),
    ]);
    let result = analyze(&corpus, "  يا   زمان الوصل   بالاندلس ");
    assert_eq!(result.weight(), Some("first"));
    assert_eq!(result.method(), Some("exact_match"));
}

#[test]
fn overlapping_line_fuzzy_matches_muwashah() {
    let corpus = sample_corpus();
    let result = analyze(&corpus, "جادك الغيث اذا الغيث هطل");

    assert!(result.is_matched());
    assert_eq!(result.weight(), Some("muwashah"));
    let confidence = result.confidence().unwrap();
    assert!(
        (0.3..=1.0).contains(&confidence),
        "confidence out of range: {}",
        confidence
    );
    match result {
        Analysis::FuzzyMatch { method, .. } => assert!(matches!(
            method,
            FuzzyMethod::ExampleSimilarity | FuzzyMethod::WeightTfidf
        )),
        other => panic!("expected fuzzy match, got {:?}", other),
    }
}

#[test]
fn unrelated_line_falls_below_gate() {
    let corpus = sample_corpus();
    let result = analyze(&corpus, "شمس");

    assert!(!result.is_matched());
    match result {
        Analysis::NoMatch {
            normalized,
            confidence,
        } => {
            assert_eq!(normalized, "شمس");
            assert!(confidence < 0.3, "confidence too high: {}", confidence);
        }
        other => panic!("expected no match, got {:?}", other),
    }
}

#[test]
fn raised_gate_rejects_fuzzy_match() {
    let corpus = sample_corpus();
    let config = MatchingConfig {
        min_confidence: 0.99,
        ..MatchingConfig::default()
    };
    let result = Matcher::with_config(&corpus, config).analyze("جادك الغيث اذا الغيث هطل");
    assert!(!result.is_matched());
    assert!(result.confidence().unwrap() < 0.99);
}

#[test]
fn json_key_order_breaks_exact_ties() {
    let json = r#"{
        "zajal": {"taf3eelat": "", "examples": ["نفس البيت"]},
        "abuthiya": {"taf3eelat": "", "examples": ["نفس البيت"]}
    }"#;
    let corpus = Corpus::from_json_str(json).unwrap();

    assert_eq!(analyze(&corpus, "نفس البيت").weight(), Some("zajal"));
    assert_eq!(list_weights(&corpus), vec!["abuthiya", "zajal"]);
}

#[test]
fn bundled_dataset_loads_and_matches() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data/examples.json");
    let corpus = Corpus::load(&path).expect("bundled dataset should load");

    assert_eq!(
        list_weights(&corpus),
        vec!["abuthiya", "hijri", "majrasha", "muwashah", "tajleeba", "tawil"]
    );

    let result = analyze(&corpus, "يا زَمانَ الوَصْلِ بالأندلسِ");
    assert_eq!(result.weight(), Some("muwashah"));
    assert_eq!(result.method(), Some(EXACT_MATCH_METHOD));
}
