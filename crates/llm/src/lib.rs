//! Generative language model client.
//!
//! [`GenerativeModel`] is the seam the API layer depends on; [`GeminiClient`]
//! implements it against the Google Generative Language REST API.

pub mod error;
pub mod gemini;

pub use error::LlmError;
pub use gemini::{GeminiClient, GeminiConfig};

/// A model that turns a prompt into a JSON-formatted text reply.
#[async_trait::async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Send `prompt` and return the model's raw text output.
    ///
    /// Implementations request JSON output from the provider but do not
    /// parse it; callers decide how to interpret the text.
    async fn generate_json(&self, prompt: &str) -> Result<String, LlmError>;
}
