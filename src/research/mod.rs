//! Research Service
//!
//! Turns a [`ProcessingRequest`] into one or two model calls:
//!
//! ```text
//! operation ──► primary prompt ──► LLM ──► (target != en) ──► translation prompt ──► LLM
//! ```
//!
//! `translate` and `meaning` already answer in the target language and never
//! get the second step. `multilang_summary` is a summary followed by the same
//! single translation step.

pub mod language;
pub mod operation;
pub mod prompt;

use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::llm::{Extracted, GatewayError, LLMAdapter, NO_VALID_RESPONSE};
use crate::models::ProcessingRequest;

pub use language::Language;
pub use operation::Operation;

pub const NO_OPERATION_SPECIFIED: &str = "No operation specified.";

/// The calls one request expands into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub prompt: String,
    /// Language code for the follow-up translation, if any
    pub translate_to: Option<String>,
}

impl Pipeline {
    pub fn plan(operation: &Operation, content: &str, target_language: &str) -> Self {
        let translate_to = match operation {
            Operation::Translate | Operation::Meaning => None,
            _ if language::needs_translation(target_language) => Some(target_language.to_string()),
            _ => None,
        };

        Self {
            prompt: prompt::build(operation, content, target_language),
            translate_to,
        }
    }
}

pub struct ResearchService {
    llm: Arc<dyn LLMAdapter>,
    strict_operations: bool,
}

impl ResearchService {
    pub fn new(llm: Arc<dyn LLMAdapter>, strict_operations: bool) -> Self {
        Self {
            llm,
            strict_operations,
        }
    }

    pub fn strict_operations(&self) -> bool {
        self.strict_operations
    }

    /// Run a request to completion. Upstream failures come back as the
    /// result text; this never fails.
    pub async fn process(&self, request: &ProcessingRequest) -> String {
        let Some(tag) = request.operation_tag() else {
            return NO_OPERATION_SPECIFIED.to_string();
        };

        let operation = Operation::parse(tag);
        if self.strict_operations && !operation.is_known() {
            return format!("Unsupported operation: {}", tag);
        }

        let target_language = request.target_language();
        let span = info_span!(
            "process",
            request_id = %Uuid::new_v4(),
            operation = %operation,
            target_language = %target_language,
        );

        async move {
            info!(
                content_len = request.content().len(),
                summary_style = request.summary_style.as_deref().unwrap_or("default"),
                "Processing research request"
            );

            let pipeline = Pipeline::plan(&operation, request.content(), target_language);
            match self.run(&pipeline).await {
                Ok(result) => result,
                Err(err) => {
                    warn!(error = %err, "Request finished with an upstream error");
                    err.to_string()
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(&self, pipeline: &Pipeline) -> Result<String, GatewayError> {
        let text = match self.llm.generate(&pipeline.prompt).await? {
            Extracted::Text(text) => text,
            Extracted::NoCandidate => return Ok(NO_VALID_RESPONSE.to_string()),
        };

        match &pipeline.translate_to {
            None => Ok(text),
            Some(code) => {
                info!(target_language = %code, "Translating result");
                let translated = self.llm.generate(&prompt::translation(&text, code)).await?;
                Ok(translated.into_text())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    type Responder = Box<dyn Fn(&str) -> Result<Extracted, GatewayError> + Send + Sync>;

    struct StubLLM {
        prompts: Mutex<Vec<String>>,
        respond: Responder,
    }

    impl StubLLM {
        fn new(respond: impl Fn(&str) -> Result<Extracted, GatewayError> + Send + Sync + 'static) -> Arc<Self> {
            Arc::new(Self {
                prompts: Mutex::new(Vec::new()),
                respond: Box::new(respond),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LLMAdapter for StubLLM {
        async fn generate(&self, prompt: &str) -> Result<Extracted, GatewayError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            (self.respond)(prompt)
        }
    }

    /// Summaries become "Resume: Le chat..."; translations echo "<text> (fr)"
    fn echo_stub() -> Arc<StubLLM> {
        StubLLM::new(|prompt| {
            let (instruction, body) = prompt.split_once("\n\n").unwrap();
            if instruction.starts_with("Translate") {
                Ok(Extracted::Text(format!("{} (fr)", body)))
            } else {
                Ok(Extracted::Text("Resume: Le chat...".to_string()))
            }
        })
    }

    #[tokio::test]
    async fn test_missing_operation_skips_gateway() {
        let stub = echo_stub();
        let service = ResearchService::new(stub.clone(), false);

        let request = ProcessingRequest {
            content: Some("The cat sat.".into()),
            ..Default::default()
        };
        assert_eq!(service.process(&request).await, "No operation specified.");

        let blank = ProcessingRequest::new("The cat sat.", "");
        assert_eq!(service.process(&blank).await, "No operation specified.");
        assert!(stub.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_summarize_then_translate() {
        let stub = echo_stub();
        let service = ResearchService::new(stub.clone(), false);

        let request = ProcessingRequest::new("The cat sat.", "summarize").with_target_language("fr");
        let result = service.process(&request).await;

        assert_eq!(result, "Resume: Le chat... (fr)");
        assert_eq!(
            stub.prompts(),
            vec![
                "Write a concise summary:\n\nThe cat sat.".to_string(),
                "Translate the following text into French. Output only the translated text:\n\nResume: Le chat..."
                    .to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_english_target_single_call() {
        let stub = echo_stub();
        let service = ResearchService::new(stub.clone(), false);

        let result = service.process(&ProcessingRequest::new("The cat sat.", "KEYWORDS")).await;

        assert_eq!(result, "Resume: Le chat...");
        assert_eq!(
            stub.prompts(),
            vec!["Extract the top 10 most relevant keywords from the following text:\n\nThe cat sat.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_translate_and_meaning_not_post_translated() {
        let stub = echo_stub();
        let service = ResearchService::new(stub.clone(), false);

        let translated = service
            .process(&ProcessingRequest::new("The cat sat.", "translate").with_target_language("fr"))
            .await;
        assert_eq!(translated, "The cat sat. (fr)");

        service
            .process(&ProcessingRequest::new("ennui", "meaning").with_target_language("fr"))
            .await;

        let prompts = stub.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].starts_with(
            "Provide the meaning of the following word or phrase in French. Output only the meaning:"
        ));
    }

    #[tokio::test]
    async fn test_multilang_summary_translates_once() {
        let stub = echo_stub();
        let service = ResearchService::new(stub.clone(), false);

        let request = ProcessingRequest::new("The cat sat.", "multilang_summary").with_target_language("fr");
        let result = service.process(&request).await;

        assert_eq!(result, "Resume: Le chat... (fr)");
        let prompts = stub.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].starts_with("Write a concise summary:"));
        assert!(prompts[1].starts_with("Translate the following text into French."));
    }

    #[tokio::test]
    async fn test_multilang_summary_english_is_plain_summary() {
        let stub = echo_stub();
        let service = ResearchService::new(stub.clone(), false);

        let result = service
            .process(&ProcessingRequest::new("The cat sat.", "multilang_summary"))
            .await;

        assert_eq!(result, "Resume: Le chat...");
        assert_eq!(stub.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_upstream_error_becomes_result_text() {
        let stub = StubLLM::new(|_| Err(GatewayError::Upstream("500 Internal Server Error".into())));
        let service = ResearchService::new(stub.clone(), false);

        let request = ProcessingRequest::new("The cat sat.", "summarize").with_target_language("fr");
        let result = service.process(&request).await;

        assert_eq!(result, "Error calling AI API: 500 Internal Server Error");
        // The failed summary is not sent on for translation
        assert_eq!(stub.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_exhaustion_becomes_result_text() {
        let stub = StubLLM::new(|_| Err(GatewayError::RateLimitExceeded { attempts: 3 }));
        let service = ResearchService::new(stub, false);

        let result = service.process(&ProcessingRequest::new("x", "paraphrase")).await;
        assert_eq!(result, "Error: Gemini API rate limit exceeded. Please wait and try again.");
    }

    #[tokio::test]
    async fn test_no_candidate_stops_pipeline() {
        let stub = StubLLM::new(|_| Ok(Extracted::NoCandidate));
        let service = ResearchService::new(stub.clone(), false);

        let request = ProcessingRequest::new("The cat sat.", "abstract").with_target_language("de");
        assert_eq!(service.process(&request).await, "No valid response from AI.");
        assert_eq!(stub.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_operation_fallback_and_strict() {
        let stub = echo_stub();
        let lenient = ResearchService::new(stub.clone(), false);
        lenient.process(&ProcessingRequest::new("The cat sat.", "compare")).await;
        assert_eq!(
            stub.prompts(),
            vec!["Process the following text as per context:\n\nThe cat sat.".to_string()]
        );

        let strict_stub = echo_stub();
        let strict = ResearchService::new(strict_stub.clone(), true);
        let result = strict.process(&ProcessingRequest::new("The cat sat.", "compare")).await;
        assert_eq!(result, "Unsupported operation: compare");
        assert!(strict_stub.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_originality_without_content() {
        let stub = echo_stub();
        let service = ResearchService::new(stub.clone(), false);

        let request = ProcessingRequest {
            operation: Some("originality".into()),
            ..Default::default()
        };
        service.process(&request).await;

        assert_eq!(
            stub.prompts(),
            vec!["Estimate the originality or uniqueness of the following text (percentage and explanation):\n\n"
                .to_string()]
        );
    }

    #[test]
    fn test_plan() {
        let plan = Pipeline::plan(&Operation::Topics, "text", "es");
        assert_eq!(plan.translate_to.as_deref(), Some("es"));

        let plan = Pipeline::plan(&Operation::Topics, "text", "EN");
        assert_eq!(plan.translate_to, None);

        let plan = Pipeline::plan(&Operation::Translate, "text", "es");
        assert_eq!(plan.translate_to, None);

        // Unknown codes still get a pass, into English
        let plan = Pipeline::plan(&Operation::Summarize, "text", "ja");
        assert_eq!(plan.translate_to.as_deref(), Some("ja"));
    }
}
