//! Weight listing endpoint

use axum::{extract::State, Json};

use super::types::WeightsResponse;
use crate::AppState;

/// GET /api/weights
///
/// Weight keys sorted ascending
pub async fn list_weights(State(state): State<AppState>) -> Json<WeightsResponse> {
    Json(WeightsResponse {
        weights: wazn_engine::list_weights(&state.corpus),
    })
}
