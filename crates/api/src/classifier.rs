//! Classification adapter.
//!
//! Wraps a [`GenerativeModel`] behind the ticket classification contract:
//! reject empty input, refuse to run without credentials, and never let a
//! model failure escape as an error. Failures come back as
//! [`Classification::Unavailable`] so the HTTP boundary can decide how to
//! present them.

use std::sync::Arc;
use std::time::Duration;

use helpdesk_core::classify::{build_prompt, Classification};
use helpdesk_llm::{GeminiClient, GeminiConfig, GenerativeModel, LlmError};

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Default Gemini model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default Gemini REST base URL.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default timeout for one model call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Language model settings for ticket classification.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Provider API key. `None` disables classification (requests get a 500).
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
    /// Timeout for a single model call in seconds.
    pub timeout_secs: u64,
}

impl ClassifierConfig {
    /// Load classifier settings from environment variables.
    ///
    /// | Env Var               | Default                                              |
    /// |-----------------------|------------------------------------------------------|
    /// | `GEMINI_API_KEY`      | unset                                                |
    /// | `GEMINI_MODEL`        | `gemini-1.5-flash`                                   |
    /// | `GEMINI_API_URL`      | `https://generativelanguage.googleapis.com/v1beta`   |
    /// | `GEMINI_TIMEOUT_SECS` | `30`                                                 |
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let api_url = std::env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

        let timeout_secs: u64 = std::env::var("GEMINI_TIMEOUT_SECS")
            .map(|v| v.parse().expect("GEMINI_TIMEOUT_SECS must be a valid u64"))
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_key,
            model,
            api_url,
            timeout_secs,
        }
    }
}

/// Suggests a category and priority for a ticket description.
pub struct TicketClassifier {
    model: Option<Arc<dyn GenerativeModel>>,
    /// A model call still running after this long counts as unavailable.
    deadline: Duration,
}

impl TicketClassifier {
    /// Build the adapter from server configuration.
    ///
    /// Without an API key the adapter is created in an unconfigured state
    /// and every classification request fails with a configuration error.
    /// The model call deadline comes from
    /// [`ServerConfig::classification_deadline`].
    pub fn from_config(config: &ServerConfig) -> Result<Self, LlmError> {
        let settings = &config.classifier;
        let Some(api_key) = settings.api_key.clone() else {
            return Ok(Self::unconfigured());
        };

        let deadline = config.classification_deadline();
        let client = GeminiClient::new(GeminiConfig {
            api_key,
            model: settings.model.clone(),
            api_url: settings.api_url.clone(),
            timeout: deadline,
        })?;

        Ok(Self::with_model(Arc::new(client)).with_deadline(deadline))
    }

    /// Use an explicit model implementation.
    pub fn with_model(model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            model: Some(model),
            deadline: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// An adapter with no credentials.
    pub fn unconfigured() -> Self {
        Self {
            model: None,
            deadline: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Replace the model call deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Whether a model is available to call.
    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    /// Classify a ticket description.
    ///
    /// Returns `BadRequest` for a missing or blank description and
    /// `Configuration` when no model is configured; in both cases the model
    /// is not called. Every other failure, including a model call that
    /// outlives the deadline, is folded into [`Classification::Unavailable`].
    pub async fn classify(&self, description: Option<&str>) -> AppResult<Classification> {
        let description = description
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("description required".into()))?;

        let model = self
            .model
            .as_ref()
            .ok_or_else(|| AppError::Configuration("GEMINI_API_KEY is not configured".into()))?;

        let prompt = build_prompt(description);

        let classification =
            match tokio::time::timeout(self.deadline, model.generate_json(&prompt)).await {
                Ok(Ok(text)) => Classification::from_model_output(&text),
                Ok(Err(e)) => Classification::Unavailable {
                    reason: e.to_string(),
                },
                Err(_) => Classification::Unavailable {
                    reason: format!("model call exceeded {}ms", self.deadline.as_millis()),
                },
            };

        Ok(classification)
    }
}
