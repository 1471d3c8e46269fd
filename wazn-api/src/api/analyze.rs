//! Line analysis endpoints

use axum::{extract::State, Json};
use tracing::debug;
use wazn_engine::{heuristic, Matcher};

use super::types::{AnalyzeRequest, AnalyzeResponse, RulesResponse};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

fn require_text(req: &AnalyzeRequest) -> ApiResult<()> {
    if req.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text must not be empty".to_string()));
    }
    Ok(())
}

/// POST /api/analyze
///
/// Matches one verse line against the corpus. Scoring is CPU-bound and runs
/// on the blocking pool.
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse>> {
    require_text(&req)?;

    let AnalyzeRequest { text } = req;
    let corpus = state.corpus.clone();
    let matching = state.matching.clone();

    let response = tokio::task::spawn_blocking(move || {
        let analysis = Matcher::with_config(&corpus, (*matching).clone()).analyze(&text);
        debug!(
            matched = analysis.is_matched(),
            weight = analysis.weight(),
            "Analysis complete"
        );
        AnalyzeResponse::from_analysis(&text, analysis)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Analysis task failed: {}", e)))?;

    Ok(Json(response))
}

/// POST /api/analyze/rules
///
/// Shape-only heuristic; cheap enough to run inline.
pub async fn analyze_rules(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> ApiResult<Json<RulesResponse>> {
    require_text(&req)?;

    let verdict = heuristic::classify(&req.text, Some(state.corpus.as_ref()));
    Ok(Json(verdict.into()))
}
