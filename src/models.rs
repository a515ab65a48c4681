use std::sync::Arc;

use crate::config::Config;
use crate::research::language::DEFAULT_LANGUAGE_CODE;
use crate::research::operation::Operation;
use crate::research::ResearchService;
use crate::types::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub research: Arc<ResearchService>,
}

// API Request/Response types

/// Body of `POST /api/research/process`. `text` and `task` are accepted as
/// aliases for `content` and `operation`.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingRequest {
    #[serde(default, alias = "text")]
    pub content: Option<String>,
    #[serde(default, alias = "task")]
    pub operation: Option<String>,
    #[serde(default, alias = "target_language")]
    pub target_language: Option<String>,
    #[serde(default, alias = "summary_style")]
    pub summary_style: Option<String>,
}

impl ProcessingRequest {
    pub fn new(content: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn with_target_language(mut self, code: impl Into<String>) -> Self {
        self.target_language = Some(code.into());
        self
    }

    /// Operation tag, if present and not blank
    pub fn operation_tag(&self) -> Option<&str> {
        self.operation.as_deref().map(str::trim).filter(|op| !op.is_empty())
    }

    pub fn target_language(&self) -> &str {
        self.target_language
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE_CODE)
    }

    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    /// Check the request before anything is sent upstream
    pub fn validate(&self, strict_operations: bool) -> AppResult<Operation> {
        let tag = self
            .operation_tag()
            .ok_or_else(|| AppError::Validation("Operation is required".to_string()))?;

        let operation = Operation::parse(tag);

        if strict_operations && !operation.is_known() {
            return Err(AppError::Validation(format!("Unsupported operation: {}", tag)));
        }

        if operation.requires_content() && self.content().trim().is_empty() {
            return Err(AppError::Validation(format!(
                "Content is required for operation '{}'",
                operation
            )));
        }

        Ok(operation)
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ProcessResponse {
    pub result: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub extracted_text: String,
    pub result: String,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}
