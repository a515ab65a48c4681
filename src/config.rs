use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub processing: ProcessingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

#[derive(Clone, Deserialize)]
pub struct GeminiConfig {
    pub api_url: String,
    pub api_key: String,
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub timeout_secs: u64,
}

// The API key must never reach the logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("max_attempts", &self.max_attempts)
            .field("initial_backoff_ms", &self.initial_backoff_ms)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GeminiConfig {
    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessingConfig {
    /// Reject unknown operation tags instead of falling back to the generic prompt
    pub strict_operations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "5053".to_string())
                    .parse()
                    .context("PORT must be a valid port number")?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                cors_allowed_origins: env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                    .unwrap_or_else(|_| (20 * 1024 * 1024).to_string())
                    .parse()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
            },
            gemini: GeminiConfig {
                api_url: env::var("GEMINI_API_URL")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string()),
                api_key: env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?,
                max_attempts: env::var("GEMINI_MAX_ATTEMPTS")
                    .unwrap_or_else(|_| "3".to_string())
                    .parse()
                    .context("GEMINI_MAX_ATTEMPTS must be an integer")?,
                initial_backoff_ms: env::var("GEMINI_INITIAL_BACKOFF_MS")
                    .unwrap_or_else(|_| "2000".to_string())
                    .parse()
                    .context("GEMINI_INITIAL_BACKOFF_MS must be an integer")?,
                timeout_secs: env::var("GEMINI_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()
                    .context("GEMINI_TIMEOUT_SECS must be an integer")?,
            },
            processing: ProcessingConfig {
                strict_operations: env::var("STRICT_OPERATIONS")
                    .unwrap_or_else(|_| "false".to_string())
                    .parse()
                    .context("STRICT_OPERATIONS must be true or false")?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_debug_redacts_key() {
        let gemini = GeminiConfig {
            api_url: DEFAULT_GEMINI_API_URL.to_string(),
            api_key: "super-secret-key".to_string(),
            max_attempts: 3,
            initial_backoff_ms: 2000,
            timeout_secs: 60,
        };

        let rendered = format!("{:?}", gemini);
        assert!(!rendered.contains("super-secret-key"));
        assert!(rendered.contains("<redacted>"));
        assert_eq!(gemini.initial_backoff(), Duration::from_millis(2000));
        assert_eq!(gemini.timeout(), Duration::from_secs(60));
    }
}
