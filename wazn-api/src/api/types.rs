//! Request and response bodies

use serde::{Deserialize, Serialize};
use wazn_engine::{Analysis, RuleCandidate, RuleVerdict};

pub const NO_EXAMPLES_ERROR: &str = "no_examples";
pub const NO_EXAMPLES_MESSAGE: &str = "لا توجد أمثلة في قاعدة البيانات.";
pub const LOW_CONFIDENCE_MESSAGE: &str =
    "البيت بعيد عن جميع الأوزان المدعومة حالياً. يرجى إضافة أمثلة أقرب.";
pub const RULES_UNSUPPORTED_MESSAGE: &str = "غير مطابق للأوزان المدعومة حالياً";
pub const RULES_INCONCLUSIVE_MESSAGE: &str = "تعذّر تحديد الوزن بثقة كافية ضمن القواعد الحالية";

/// POST body for both analysis routes
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: String,
}

/// Wire form of an analysis
///
/// Only the fields relevant to the outcome are serialized.
#[derive(Debug, Default, Serialize)]
pub struct AnalyzeResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taf3eelat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closest_example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AnalyzeResponse {
    pub fn from_analysis(input: &str, analysis: Analysis) -> Self {
        let method = analysis.method().map(str::to_string);
        match analysis {
            Analysis::Unavailable => Self {
                ok: false,
                error: Some(NO_EXAMPLES_ERROR.to_string()),
                message: Some(NO_EXAMPLES_MESSAGE.to_string()),
                ..Self::default()
            },
            Analysis::ExactMatch {
                normalized,
                weight,
                taf3eelat,
                example,
            } => Self {
                ok: true,
                matched: Some(true),
                input: Some(input.to_string()),
                normalized: Some(normalized),
                weight: Some(weight),
                taf3eelat: Some(taf3eelat),
                confidence: Some(1.0),
                closest_example: Some(example),
                method,
                ..Self::default()
            },
            Analysis::FuzzyMatch {
                normalized,
                weight,
                taf3eelat,
                confidence,
                example,
                ..
            } => Self {
                ok: true,
                matched: Some(true),
                input: Some(input.to_string()),
                normalized: Some(normalized),
                weight: Some(weight),
                taf3eelat: Some(taf3eelat),
                confidence: Some(confidence),
                closest_example: Some(example),
                method,
                ..Self::default()
            },
            Analysis::NoMatch {
                normalized,
                confidence,
            } => Self {
                ok: true,
                matched: Some(false),
                input: Some(input.to_string()),
                normalized: Some(normalized),
                confidence: Some(confidence),
                message: Some(LOW_CONFIDENCE_MESSAGE.to_string()),
                ..Self::default()
            },
        }
    }
}

/// One heuristic candidate on the wire
#[derive(Debug, Serialize)]
pub struct RuleCandidateBody {
    pub weight: String,
    pub confidence: f64,
}

impl From<RuleCandidate> for RuleCandidateBody {
    fn from(candidate: RuleCandidate) -> Self {
        Self {
            weight: candidate.weight.to_string(),
            confidence: candidate.score,
        }
    }
}

/// Wire form of a heuristic verdict
#[derive(Debug, Default, Serialize)]
pub struct RulesResponse {
    pub ok: bool,
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taf3eelat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<RuleCandidateBody>>,
}

impl From<RuleVerdict> for RulesResponse {
    fn from(verdict: RuleVerdict) -> Self {
        match verdict {
            RuleVerdict::Empty => Self {
                ok: true,
                matched: false,
                message: Some(RULES_UNSUPPORTED_MESSAGE.to_string()),
                ..Self::default()
            },
            RuleVerdict::Unsupported { supported } => Self {
                ok: true,
                matched: false,
                message: Some(RULES_UNSUPPORTED_MESSAGE.to_string()),
                supported: Some(supported),
                ..Self::default()
            },
            RuleVerdict::Inconclusive { candidates } => Self {
                ok: true,
                matched: false,
                message: Some(RULES_INCONCLUSIVE_MESSAGE.to_string()),
                candidates: Some(candidates.into_iter().map(Into::into).collect()),
                ..Self::default()
            },
            RuleVerdict::Matched {
                weight,
                taf3eelat,
                confidence,
            } => Self {
                ok: true,
                matched: true,
                weight: Some(weight),
                taf3eelat: Some(taf3eelat),
                confidence: Some(confidence),
                ..Self::default()
            },
        }
    }
}

/// GET /api/weights body
#[derive(Debug, Serialize)]
pub struct WeightsResponse {
    pub weights: Vec<String>,
}
