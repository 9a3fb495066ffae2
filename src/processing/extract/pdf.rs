use lopdf::Document;

use crate::processing::types::ExtractionError;

/// Extract text page by page, in page order, joined with newlines.
pub(super) fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let document =
        Document::load_mem(bytes).map_err(|err| ExtractionError::Pdf(err.to_string()))?;

    let mut pages = Vec::new();
    for page_number in document.get_pages().into_keys() {
        let text = document
            .extract_text(&[page_number])
            .map_err(|err| ExtractionError::Pdf(format!("page {page_number}: {err}")))?;
        pages.push(text);
    }
    tracing::trace!(pages = pages.len(), "Read PDF pages");

    Ok(pages.join("\n").trim().to_string())
}
