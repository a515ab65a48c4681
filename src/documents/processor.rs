//! Document processor
//!
//! Turns an uploaded file into plain text, keyed on its extension:
//! - `.txt`  - decoded as UTF-8 (invalid sequences are replaced)
//! - `.pdf`  - page text via `lopdf`, in page order
//! - `.docx` - paragraph text via `docx-rust`, one paragraph per line

use std::io::Cursor;

use docx_rust::document::BodyContent;
use docx_rust::DocxFile;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("{0}")]
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Resolve the kind from a file name; the extension match ignores case
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".txt") {
            Some(DocumentKind::Text)
        } else if lower.ends_with(".pdf") {
            Some(DocumentKind::Pdf)
        } else if lower.ends_with(".docx") {
            Some(DocumentKind::Docx)
        } else {
            None
        }
    }
}

pub struct DocumentProcessor;

impl DocumentProcessor {
    pub async fn extract_text(file_name: &str, data: Vec<u8>) -> Result<String, ExtractionError> {
        let kind = DocumentKind::from_file_name(file_name)
            .ok_or_else(|| ExtractionError::UnsupportedFileType(file_name.to_string()))?;

        info!(file_name = %file_name, kind = ?kind, size = data.len(), "Extracting document text");

        let text = match kind {
            DocumentKind::Text => String::from_utf8_lossy(&data).into_owned(),
            DocumentKind::Pdf => tokio::task::spawn_blocking(move || Self::extract_pdf(&data))
                .await
                .map_err(|e| ExtractionError::Failed(format!("task join error: {}", e)))??,
            DocumentKind::Docx => tokio::task::spawn_blocking(move || Self::extract_docx(data))
                .await
                .map_err(|e| ExtractionError::Failed(format!("task join error: {}", e)))??,
        };

        debug!(chars = text.chars().count(), "Document text extracted");
        Ok(text)
    }

    fn extract_pdf(data: &[u8]) -> Result<String, ExtractionError> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| ExtractionError::Failed(format!("failed to parse PDF: {}", e)))?;

        let mut pages = Vec::new();
        for page_number in doc.get_pages().keys() {
            let text = doc.extract_text(&[*page_number]).map_err(|e| {
                ExtractionError::Failed(format!("failed to read page {}: {}", page_number, e))
            })?;
            pages.push(text);
        }

        Ok(pages.join("\n"))
    }

    fn extract_docx(data: Vec<u8>) -> Result<String, ExtractionError> {
        let file = DocxFile::from_reader(Cursor::new(data))
            .map_err(|e| ExtractionError::Failed(format!("failed to open DOCX: {:?}", e)))?;
        let docx = file
            .parse()
            .map_err(|e| ExtractionError::Failed(format!("failed to parse DOCX: {:?}", e)))?;

        let mut text = String::new();
        for content in &docx.document.body.content {
            if let BodyContent::Paragraph(paragraph) = content {
                text.push_str(&paragraph.text());
                text.push('\n');
            }
        }

        Ok(text)
    }
}
