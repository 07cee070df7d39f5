//! DOCX to PDF projection: paragraphs of plain text re-laid onto A4 pages.

pub mod docx;
pub mod pdf;

use crate::error::{ConvertError, Result};

pub const DOCX_EXTENSION: &str = ".docx";

/// Convert an uploaded DOCX document into a text-only PDF.
pub fn docx_to_pdf(filename: &str, data: &[u8]) -> Result<Vec<u8>> {
    if !filename.to_ascii_lowercase().ends_with(DOCX_EXTENSION) {
        return Err(ConvertError::InvalidExtension {
            filename: filename.to_owned(),
            expected: DOCX_EXTENSION,
        });
    }
    let paragraphs = docx::extract_paragraphs(data)?;
    Ok(pdf::render(&pdf::layout(&paragraphs)))
}
