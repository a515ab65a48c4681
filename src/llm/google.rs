// Google Gemini adapter
// Endpoint: POST {api_url}?key={api_key} with a generateContent body.
// Only HTTP 429 is retried; every other failure is terminal.

use crate::config::GeminiConfig;
use crate::llm::provider::{GatewayError, LLMAdapter};
use crate::llm::response::{extract, Extracted, GenerateContentRequest};
use crate::utils::retry::{with_retry, RetryError, RetryPolicy};
use async_trait::async_trait;
use futures::FutureExt;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info};

pub struct GeminiAdapter {
    client: Client,
    api_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl GeminiAdapter {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
            retry,
        }
    }

    pub fn from_config(config: &GeminiConfig) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            retry: RetryPolicy::new(config.max_attempts, config.initial_backoff()),
        })
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    async fn send_once(&self, prompt: &str) -> Result<Extracted, GatewayError> {
        debug!(prompt_len = prompt.len(), "Sending Gemini request");

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            // The URL carries the API key; keep it out of error text
            .map_err(|e| GatewayError::Upstream(e.without_url().to_string()))?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GatewayError::Upstream(
                format!("{} {}", status, error_text.trim()).trim_end().to_string(),
            ));
        }

        let body = response.text().await.map_err(|e| {
            GatewayError::Upstream(format!("failed to read response body: {}", e.without_url()))
        })?;

        extract(&body).map_err(|e| GatewayError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl LLMAdapter for GeminiAdapter {
    async fn generate(&self, prompt: &str) -> Result<Extracted, GatewayError> {
        let outcome = with_retry(
            &self.retry,
            move || self.send_once(prompt).boxed(),
            GatewayError::is_rate_limited,
        )
        .await;

        match outcome {
            Ok(extracted) => {
                info!(empty = matches!(extracted, Extracted::NoCandidate), "Gemini call completed");
                Ok(extracted)
            }
            Err(RetryError::Exhausted { attempts, .. }) => {
                error!(attempts, "Gemini rate limit persisted across all attempts");
                Err(GatewayError::RateLimitExceeded { attempts })
            }
            Err(RetryError::Aborted(err)) => {
                error!(error = %err, "Gemini call failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_from_config_builds_retry_policy() {
        let config = GeminiConfig {
            api_url: "http://localhost/v1beta/models/test:generateContent".to_string(),
            api_key: "test-key".to_string(),
            max_attempts: 5,
            initial_backoff_ms: 250,
            timeout_secs: 10,
        };

        let client = GeminiAdapter::from_config(&config).unwrap();
        assert_eq!(client.retry_policy().max_attempts, 5);
        assert_eq!(client.retry_policy().initial_backoff, Duration::from_millis(250));
    }

    #[test]
    fn test_error_text() {
        assert_eq!(
            GatewayError::RateLimitExceeded { attempts: 3 }.to_string(),
            "Error: Gemini API rate limit exceeded. Please wait and try again."
        );
        assert_eq!(
            GatewayError::Upstream("500 Internal Server Error".into()).to_string(),
            "Error calling AI API: 500 Internal Server Error"
        );
        assert!(GatewayError::RateLimited.is_rate_limited());
        assert!(!GatewayError::Upstream(String::new()).is_rate_limited());
    }
}
