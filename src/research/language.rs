/// Languages the prompts can name. Anything unrecognized is treated as English.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Hindi,
    French,
    Spanish,
    German,
    Chinese,
}

pub const DEFAULT_LANGUAGE_CODE: &str = "en";

impl Language {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "hi" => Language::Hindi,
            "fr" => Language::French,
            "es" => Language::Spanish,
            "de" => Language::German,
            "zh" => Language::Chinese,
            _ => Language::English,
        }
    }

    /// Name used inside the prompt text
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::French => "French",
            Language::Spanish => "Spanish",
            Language::German => "German",
            Language::Chinese => "Chinese (Simplified)",
        }
    }
}

/// Whether a result in `code` needs a translation pass. Only a literal `en`
/// skips it, so an unknown code still triggers a pass into English.
pub fn needs_translation(code: &str) -> bool {
    !code.trim().eq_ignore_ascii_case(DEFAULT_LANGUAGE_CODE)
}
