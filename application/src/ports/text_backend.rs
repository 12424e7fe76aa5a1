//! Text backend port
//!
//! Defines the interface to a generative text service.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while talking to a text backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Empty response from backend")]
    EmptyResponse,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// One single-turn completion
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub prompt: String,
}

/// Generative text backend
///
/// Adapters live in the infrastructure layer.
#[async_trait]
pub trait TextBackend: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Send one user message and return the response text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError>;
}
