use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use rivalscan_core::{AnalysisData, ApiResponse};
use std::sync::Arc;
use tracing::error;

/// Runs one full analysis snapshot and returns it in the success envelope.
/// A pipeline-level failure becomes the failure envelope with a 500; there
/// are no partial results.
pub async fn analyze(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.analyzer.run().await {
        Ok(data) => (StatusCode::OK, Json(ApiResponse::ok(data))).into_response(),
        Err(e) => {
            error!(error = %e, "Analysis pipeline failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AnalysisData>::err(e.to_string())),
            )
                .into_response()
        }
    }
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": Utc::now(),
    }))
}
