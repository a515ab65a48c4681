// Plain-text extraction from uploaded documents

pub mod processor;

pub use processor::*;
