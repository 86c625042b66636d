// src/companion/generator.rs
use async_trait::async_trait;
use thiserror::Error;

/// Everything that can keep a reply from being generated. The composer
/// absorbs all of these into the fallback exchange.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("no text generation provider is configured")]
    NotConfigured,
    #[error("text generation timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("provider response contained no text")]
    EmptyResponse,
}

/// A text generation backend: one system persona, one user turn, one reply.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, system_prompt: &str, user_turn: &str) -> Result<String, GenerationError>;

    fn name(&self) -> &str;
}
