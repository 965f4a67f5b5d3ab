/// Errors from the generative model layer.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Model API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The provider answered but produced no text candidate.
    #[error("Model returned no text output")]
    EmptyResponse,

    /// The provider's response envelope could not be decoded.
    #[error("Failed to decode model response: {0}")]
    Decode(#[from] serde_json::Error),
}
