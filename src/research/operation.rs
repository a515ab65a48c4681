use std::fmt;

pub const GENERIC_INSTRUCTION: &str = "Process the following text as per context:";

/// Operation tag from a request. Parsing ignores case and surrounding
/// whitespace; unknown tags are kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Summarize,
    BulletSummary,
    DetailedSummary,
    Abstract,
    Paraphrase,
    KeyPoints,
    Sentiment,
    Keywords,
    Topics,
    Originality,
    Translate,
    Meaning,
    MultilangSummary,
    Suggest,
    Default,
    Other(String),
}

impl Operation {
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim().to_lowercase();
        match tag.as_str() {
            "summarize" => Operation::Summarize,
            "bullet_summary" => Operation::BulletSummary,
            "detailed_summary" => Operation::DetailedSummary,
            "abstract" => Operation::Abstract,
            "paraphrase" => Operation::Paraphrase,
            "keypoints" => Operation::KeyPoints,
            "sentiment" => Operation::Sentiment,
            "keywords" => Operation::Keywords,
            "topics" => Operation::Topics,
            "originality" => Operation::Originality,
            "translate" => Operation::Translate,
            "meaning" => Operation::Meaning,
            "multilang_summary" => Operation::MultilangSummary,
            "suggest" => Operation::Suggest,
            "default" => Operation::Default,
            _ => Operation::Other(tag),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Operation::Other(_))
    }

    /// Only `originality` may run without content
    pub fn requires_content(&self) -> bool {
        !matches!(self, Operation::Originality)
    }

    /// Fixed instruction for content-transforming operations. `translate`
    /// and `meaning` build language-specific prompts instead.
    pub fn instruction(&self) -> Option<&'static str> {
        let instruction = match self {
            Operation::Summarize | Operation::MultilangSummary => "Write a concise summary:",
            Operation::BulletSummary => "Summarize the following text into bullet points:",
            Operation::DetailedSummary => "Write a detailed, structured summary of the text:",
            Operation::Abstract => "Write a research-paper style abstract for the text:",
            Operation::Paraphrase => "Paraphrase the following text:",
            Operation::KeyPoints => "List the key points of the following text:",
            Operation::Sentiment => {
                "Analyze the sentiment (positive, negative, or neutral) of this text and explain briefly:"
            }
            Operation::Keywords => "Extract the top 10 most relevant keywords from the following text:",
            Operation::Topics => {
                "Suggest a few potential research or discussion topics related to the following text:"
            }
            Operation::Originality => {
                "Estimate the originality or uniqueness of the following text (percentage and explanation):"
            }
            Operation::Suggest | Operation::Default | Operation::Other(_) => GENERIC_INSTRUCTION,
            Operation::Translate | Operation::Meaning => return None,
        };
        Some(instruction)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Operation::Summarize => "summarize",
            Operation::BulletSummary => "bullet_summary",
            Operation::DetailedSummary => "detailed_summary",
            Operation::Abstract => "abstract",
            Operation::Paraphrase => "paraphrase",
            Operation::KeyPoints => "keypoints",
            Operation::Sentiment => "sentiment",
            Operation::Keywords => "keywords",
            Operation::Topics => "topics",
            Operation::Originality => "originality",
            Operation::Translate => "translate",
            Operation::Meaning => "meaning",
            Operation::MultilangSummary => "multilang_summary",
            Operation::Suggest => "suggest",
            Operation::Default => "default",
            Operation::Other(tag) => tag,
        };
        write!(f, "{}", tag)
    }
}
