use std::time::Duration;

use crate::classifier::ClassifierConfig;

/// Time kept free between the classification deadline and the request timeout.
const CLASSIFY_HEADROOM: Duration = Duration::from_secs(1);

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Language model settings for ticket classification.
    pub classifier: ClassifierConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// Classifier variables are documented on [`ClassifierConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let classifier = ClassifierConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            classifier,
        }
    }

    /// Upper bound on a single classification model call.
    ///
    /// Always shorter than the request timeout, so a slow provider ends in an
    /// empty suggestion rather than a 408 from the timeout layer. Short
    /// request timeouts give the model half of the request budget.
    pub fn classification_deadline(&self) -> Duration {
        let request = Duration::from_secs(self.request_timeout_secs);
        let budget = request.saturating_sub(CLASSIFY_HEADROOM).max(request / 2);
        Duration::from_secs(self.classifier.timeout_secs).min(budget)
    }
}
