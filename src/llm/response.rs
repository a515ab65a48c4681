//! Gemini `generateContent` wire types and response extraction.

use serde::{Deserialize, Serialize};

pub const NO_VALID_RESPONSE: &str = "No valid response from AI.";

// Request types
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart {
    pub text: String,
}

impl GenerateContentRequest {
    /// One content block holding one text part
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt.to_string() }],
            }],
        }
    }
}

// Response types; every level is optional so a thin envelope still parses
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

/// Outcome of unwrapping a well-formed envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Text(String),
    /// No candidate, content or part carried any text
    NoCandidate,
}

impl Extracted {
    pub fn into_text(self) -> String {
        match self {
            Extracted::Text(text) => text,
            Extracted::NoCandidate => NO_VALID_RESPONSE.to_string(),
        }
    }
}

/// Pull the first part of the first candidate out of a raw response body.
/// The text is returned verbatim.
pub fn extract(body: &str) -> Result<Extracted, serde_json::Error> {
    let response: GenerateContentResponse = serde_json::from_str(body)?;

    let text = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts)
        .and_then(|parts| parts.into_iter().next())
        .and_then(|part| part.text);

    Ok(match text {
        Some(text) => Extracted::Text(text),
        None => Extracted::NoCandidate,
    })
}
