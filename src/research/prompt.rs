use super::language::Language;
use super::operation::Operation;

/// Build the literal prompt for one gateway call.
pub fn build(operation: &Operation, content: &str, target_language: &str) -> String {
    match operation {
        Operation::Translate => translation(content, target_language),
        Operation::Meaning => format!(
            "Provide the meaning of the following word or phrase in {}. Output only the meaning:\n\n{}",
            Language::from_code(target_language).name(),
            content
        ),
        other => format!(
            "{}\n\n{}",
            other.instruction().unwrap_or(super::operation::GENERIC_INSTRUCTION),
            content
        ),
    }
}

pub fn translation(content: &str, target_language: &str) -> String {
    format!(
        "Translate the following text into {}. Output only the translated text:\n\n{}",
        Language::from_code(target_language).name(),
        content
    )
}
