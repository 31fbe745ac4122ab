//! Language prediction endpoint.

use axum::{Json, extract::State};
use langlens_core::{CodeSnippet, Prediction};

use crate::error::ApiError;
use crate::state::AppState;

/// `POST /predict`: run the detection pipeline on one snippet.
///
/// Inference is CPU-bound, so it runs on the blocking pool rather than a
/// runtime worker. Each request is handled independently; nothing is
/// retained between calls.
pub async fn predict(
    State(state): State<AppState>,
    Json(snippet): Json<CodeSnippet>,
) -> Result<Json<Prediction>, ApiError> {
    let detector = state.detector.clone();
    let prediction = tokio::task::spawn_blocking(move || detector.detect(&snippet.code))
        .await
        .map_err(|err| ApiError::internal(format!("Error processing request: {err}")))??;

    Ok(Json(prediction))
}
