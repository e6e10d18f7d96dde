//! Text layer extraction.

use house_reg_extract::normalize_lines;

use crate::PdfError;

/// Extracts the full text layer of a PDF, pages in order.
///
/// # Errors
///
/// Returns [`PdfError::Extraction`] if the bytes are not a readable PDF.
/// A panic inside `pdf-extract` (it panics on some malformed fonts) is
/// caught and reported the same way.
pub fn extract_text(pdf: &[u8]) -> Result<String, PdfError> {
    let text = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(pdf))
        .map_err(|payload| {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_owned())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_owned());
            PdfError::Extraction(format!("pdf-extract panicked: {reason}"))
        })?
        .map_err(|e| PdfError::Extraction(format!("failed to extract text from PDF: {e}")))?;

    log::debug!("Extracted {} characters of text", text.len());

    Ok(text)
}

/// Extracts the text layer as trimmed, non-blank lines.
///
/// # Errors
///
/// Returns [`PdfError::Extraction`] if the bytes are not a readable PDF.
pub fn extract_lines(pdf: &[u8]) -> Result<Vec<String>, PdfError> {
    extract_text(pdf).map(|text| normalize_lines(&text))
}
