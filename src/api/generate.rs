//! Text-generation endpoint.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::llm::GenerationParams;

use super::routes::AppState;
use super::types::{GenerateRequest, GenerateResponse};

/// POST /api/generate - Generate text via the external model.
///
/// Backend failures surface as 500 with the underlying message.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, (StatusCode, String)> {
    let params = GenerationParams {
        max_length: req.max_length,
        temperature: req.temperature,
    };

    let generated_text = state
        .llm
        .generate(&req.prompt, params)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(GenerateResponse { generated_text }))
}
