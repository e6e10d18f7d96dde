#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! PDF collaborators for household registration documents.
//!
//! Registration printouts arrive as PDFs with a text layer. This crate
//! reads that layer with pure-Rust text extraction ([`pdf_extract`]) and
//! rasterizes the first page with `pdftoppm` so it can be embedded in
//! the filled document.
//!
//! [`PdfDocument`] implements [`house_reg_context::SourceDocument`], so a
//! list of them can be handed straight to the batch aggregator.

pub mod render;
pub mod text;

use std::path::Path;

use house_reg_context::{CollaboratorError, PageImage, SourceDocument};

/// Resolution used to rasterize the first page.
pub const DEFAULT_RENDER_DPI: u32 = 160;

/// Display width of the embedded page image.
pub const DEFAULT_IMAGE_WIDTH_MM: u32 = 150;

/// Errors specific to PDF handling.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// Reading or writing a file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path involved in the failed operation.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// PDF text extraction failed.
    #[error("PDF extraction error: {0}")]
    Extraction(String),

    /// The page rasterizer is unavailable or failed.
    #[error("PDF render error: {0}")]
    Renderer(String),

    /// The rasterizer ran but produced no image.
    #[error("PDF renderer produced no output")]
    EmptyOutput,
}

/// A registration PDF loaded into memory.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    label: String,
    bytes: Vec<u8>,
    render_dpi: u32,
    image_width_mm: u32,
}

impl PdfDocument {
    /// Wraps PDF bytes under a display `label`.
    #[must_use]
    pub fn from_bytes(label: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            bytes,
            render_dpi: DEFAULT_RENDER_DPI,
            image_width_mm: DEFAULT_IMAGE_WIDTH_MM,
        }
    }

    /// Reads a PDF from disk. The file name becomes the label.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::Io`] if the file cannot be read.
    pub fn open(path: &Path) -> Result<Self, PdfError> {
        let bytes = std::fs::read(path).map_err(|e| PdfError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let label = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        log::debug!("Loaded {label} ({} bytes)", bytes.len());

        Ok(Self::from_bytes(label, bytes))
    }

    /// Sets the rasterization resolution and embedded image width.
    #[must_use]
    pub const fn with_render(mut self, dpi: u32, width_mm: u32) -> Self {
        self.render_dpi = dpi;
        self.image_width_mm = width_mm;
        self
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl SourceDocument for PdfDocument {
    fn label(&self) -> &str {
        &self.label
    }

    fn text_lines(&self) -> Result<Vec<String>, CollaboratorError> {
        Ok(text::extract_lines(&self.bytes)?)
    }

    fn render_first_page(&self) -> Result<PageImage, CollaboratorError> {
        let png = render::render_first_page(&self.bytes, self.render_dpi)?;
        Ok(PageImage::new(png, self.image_width_mm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("house_reg_pdf_missing").join("nope.pdf");
        assert!(matches!(PdfDocument::open(&path), Err(PdfError::Io { .. })));
    }

    #[test]
    fn open_uses_file_name_as_label() {
        let dir = std::env::temp_dir().join("house_reg_pdf_open_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("person_a.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let doc = PdfDocument::open(&path).unwrap();
        assert_eq!(doc.label(), "person_a.pdf");
        assert_eq!(doc.bytes(), b"%PDF-1.4");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unreadable_text_surfaces_as_collaborator_error() {
        let doc = PdfDocument::from_bytes("junk", b"garbage".to_vec());
        let err = doc.text_lines().unwrap_err();
        assert!(err.to_string().contains("PDF extraction error"));
    }

    #[test]
    fn with_render_overrides_defaults() {
        let doc = PdfDocument::from_bytes("x", Vec::new()).with_render(300, 120);
        assert_eq!(doc.render_dpi, 300);
        assert_eq!(doc.image_width_mm, 120);
    }
}
