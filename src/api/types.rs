//! API request and response types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn default_max_length() -> u32 {
    100
}

fn default_temperature() -> f64 {
    0.7
}

/// Request to generate text via the external model.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    /// The input prompt for text generation
    pub prompt: String,

    /// Maximum length of generated text
    #[serde(default = "default_max_length")]
    pub max_length: u32,

    /// Temperature for sampling
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

/// Response carrying the generated text.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub generated_text: String,
}

/// Request to update a task's status and, optionally, its result.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskRequest {
    pub status: String,
    #[serde(default)]
    pub result: Option<Map<String, Value>>,
}

/// Confirmation returned by delete endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct DeletedResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}
