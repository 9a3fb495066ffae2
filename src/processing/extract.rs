//! Text extraction for uploaded documents.
//!
//! Each declared kind has a dedicated reader. Parse failures surface as
//! [`ExtractionError`] values instead of being folded into the returned text, so a malformed
//! upload can never be summarized or queried as if it were content.

mod docx;
mod pdf;

use super::types::{DocumentKind, ExtractedDocument, ExtractionError};

/// Convert raw document bytes into plain text according to the declared kind.
pub fn extract(bytes: &[u8], kind: DocumentKind) -> Result<ExtractedDocument, ExtractionError> {
    let text = match kind {
        DocumentKind::Pdf => pdf::extract_pdf_text(bytes)?,
        DocumentKind::Docx => docx::extract_docx_text(bytes)?,
        DocumentKind::PlainText => decode_plain_text(bytes)?,
        DocumentKind::Image => {
            return Err(ExtractionError::UnsupportedKind(kind.label().to_string()));
        }
    };
    tracing::debug!(kind = %kind, bytes = bytes.len(), "Extracted document text");
    Ok(ExtractedDocument::new(kind, text))
}

fn decode_plain_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|err| ExtractionError::InvalidUtf8(err.to_string()))
}
