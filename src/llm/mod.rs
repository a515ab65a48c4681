// LLM abstraction layer

pub mod provider;
pub mod google;
pub mod response;

pub use provider::*;
pub use google::GeminiAdapter;
pub use response::{extract, Extracted, NO_VALID_RESPONSE};
