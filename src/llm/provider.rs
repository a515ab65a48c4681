use async_trait::async_trait;
use thiserror::Error;

use crate::llm::response::Extracted;

/// Failures crossing the network boundary. Every variant renders as the
/// text handed back to the caller in place of a model answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// A single 429 from upstream; retried by the client
    #[error("429 Too Many Requests")]
    RateLimited,

    #[error("Error: Gemini API rate limit exceeded. Please wait and try again.")]
    RateLimitExceeded { attempts: u32 },

    #[error("Error calling AI API: {0}")]
    Upstream(String),

    #[error("Error parsing AI response: {0}")]
    MalformedResponse(String),
}

impl GatewayError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GatewayError::RateLimited)
    }
}

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    /// Send one prompt and unwrap the generated text
    async fn generate(&self, prompt: &str) -> Result<Extracted, GatewayError>;
}
