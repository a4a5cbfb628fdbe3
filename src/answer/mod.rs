mod gemini;
mod prompt;
pub(crate) mod service;

pub use gemini::GeminiClient;
pub use prompt::{build_context, build_prompt};
pub use service::AnsweringService;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation request rejected (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("generation failed after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    #[error("model returned no text")]
    EmptyResponse,

    #[error("could not decode model response: {0}")]
    InvalidResponse(String),
}

/// A hosted text-generation model.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
    fn model(&self) -> &str;
}
