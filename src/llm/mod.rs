//! Text-generation client module.
//!
//! Provides a trait-based abstraction over text-generation backends, with
//! OpenRouter as the only implementation. Failures bubble up unmodified;
//! there is no retry or fallback anywhere in this system.

mod openrouter;

pub use openrouter::OpenRouterClient;

use async_trait::async_trait;

/// Parameters for a text-generation call.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    /// Maximum number of tokens to generate
    pub max_length: u32,
    /// Sampling temperature
    pub temperature: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_length: 100,
            temperature: 0.7,
        }
    }
}

/// Trait for text-generation backends.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for the given prompt.
    async fn generate(&self, prompt: &str, params: GenerationParams) -> anyhow::Result<String>;
}
