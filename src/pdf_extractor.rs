use log::debug;

use crate::errors::ExtractionError;

// @module: PDF text extraction

// @struct: Text extractor for PDF documents
pub struct PdfExtractor;

impl PdfExtractor {
    /// Extract the concatenated per-page text of a PDF, in page order.
    ///
    /// The input is the raw PDF bytes; parsing is delegated to the
    /// pdf-extract crate. Malformed input yields
    /// [`ExtractionError::UnreadableDocument`].
    pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractionError::UnreadableDocument(e.to_string()))?;

        if text.trim().is_empty() {
            return Err(ExtractionError::NoText);
        }

        debug!("Extracted {} characters of text from document", text.len());
        Ok(text)
    }
}
