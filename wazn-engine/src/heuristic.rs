//! Rule-based meter heuristic
//!
//! A coarse classifier that looks only at the shape of a line: character
//! count, word count and caesura marks (`.` or `..` between hemistichs). It
//! does not consult the example corpus except to look up foot descriptions,
//! and it refuses to answer below a fixed confidence.

use wazn_common::Corpus;

/// Scores below this are reported as inconclusive
pub const RULE_ACCEPT_THRESHOLD: f64 = 0.60;

/// Number of candidates listed in an inconclusive verdict
const INCONCLUSIVE_LIMIT: usize = 3;

/// Weights the rules can name
pub const SUPPORTED_WEIGHTS: [&str; 6] =
    ["majrasha", "tajleeba", "tawil", "muwashah", "hijri", "abuthiya"];

/// Shape features of one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Normalized text
    pub text: String,
    /// Non-space characters
    pub chars: usize,
    /// Whitespace-separated words
    pub words: usize,
    /// Hemistich segments split on caesura marks
    pub parts: usize,
    /// Word count of each segment
    pub part_words: Vec<usize>,
}

/// A weight proposed by a rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleCandidate {
    pub weight: &'static str,
    pub score: f64,
}

/// Outcome of the heuristic
#[derive(Debug, Clone, PartialEq)]
pub enum RuleVerdict {
    /// Blank input
    Empty,
    /// No rule fired
    Unsupported { supported: Vec<String> },
    /// Best rule score is below the acceptance threshold
    Inconclusive { candidates: Vec<RuleCandidate> },
    /// Best rule score cleared the threshold
    Matched {
        weight: String,
        taf3eelat: String,
        confidence: f64,
    },
}

/// Normalization used by the rules
///
/// Lighter than the matcher's: diacritics stay, dots survive as caesura
/// marks, and only the basic alef/ta-marbuta/hamza letters are unified.
pub fn normalize_for_rules(text: &str) -> String {
    let mapped: String = text
        .trim()
        .chars()
        .map(|c| match c {
            'أ' | 'إ' | 'آ' => 'ا',
            'ة' => 'ه',
            'ى' => 'ي',
            'ؤ' => 'و',
            'ئ' => 'ي',
            '\u{0640}' => ' ',
            c if c.is_whitespace() || c == '.' || ('\u{0600}'..='\u{06FF}').contains(&c) => c,
            _ => ' ',
        })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compute the shape features of a line
pub fn signature(text: &str) -> Signature {
    let t = normalize_for_rules(text);
    let joined = t.replace("..", ".");
    let parts: Vec<&str> = joined
        .split('.')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    Signature {
        chars: t.chars().filter(|&c| c != ' ').count(),
        words: t.split_whitespace().count(),
        parts: parts.len(),
        part_words: parts.iter().map(|p| p.split_whitespace().count()).collect(),
        text: t,
    }
}

/// Every rule that fires, in rule order
pub fn rule_candidates(sig: &Signature) -> Vec<RuleCandidate> {
    let mut out = Vec::new();
    let mut push = |weight: &'static str, score: f64| out.push(RuleCandidate { weight, score });

    if (sig.parts == 1 || sig.parts == 2) && (6..=16).contains(&sig.words) {
        push("majrasha", 0.55);
    }

    if sig.chars >= 24 && sig.words >= 6 {
        push("tajleeba", 0.50);
        push("tawil", 0.45);
    }

    if sig.parts == 2 && !sig.part_words.is_empty() && sig.part_words.iter().all(|&w| w <= 8) {
        push("muwashah", 0.45);
        push("hijri", 0.40);
    }

    if sig.words <= 10 {
        push("abuthiya", 0.35);
    }

    out
}

/// Classify a line by shape with the default acceptance threshold
///
/// No single rule scores above 0.55, so with the default threshold every line
/// is at best inconclusive; the rules only narrow the field.
pub fn classify(text: &str, corpus: Option<&Corpus>) -> RuleVerdict {
    classify_with_threshold(text, corpus, RULE_ACCEPT_THRESHOLD)
}

/// Classify a line by shape
///
/// `corpus` supplies foot descriptions for the matched weight when available.
pub fn classify_with_threshold(text: &str, corpus: Option<&Corpus>, threshold: f64) -> RuleVerdict {
    if text.trim().is_empty() {
        return RuleVerdict::Empty;
    }

    let sig = signature(text);
    let mut candidates = rule_candidates(&sig);
    if candidates.is_empty() {
        return RuleVerdict::Unsupported {
            supported: SUPPORTED_WEIGHTS.iter().map(|w| w.to_string()).collect(),
        };
    }

    // Stable: equal scores keep rule order
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    let best = candidates[0];

    if best.score < threshold {
        candidates.truncate(INCONCLUSIVE_LIMIT);
        return RuleVerdict::Inconclusive { candidates };
    }

    let taf3eelat = corpus
        .and_then(|c| c.get(best.weight))
        .map(|w| w.taf3eelat.clone())
        .unwrap_or_default();

    RuleVerdict::Matched {
        weight: best.weight.to_string(),
        taf3eelat,
        confidence: best.score,
    }
}
