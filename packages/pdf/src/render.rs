//! First-page rasterization via Poppler's `pdftoppm`.
//!
//! The PDF is written to a scratch directory, rendered to a single PNG,
//! and read back. The scratch directory is removed afterwards whether or
//! not rendering succeeded.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::PdfError;

/// Rasterizer binary looked up on `PATH`.
pub const PDFTOPPM: &str = "pdftoppm";

static SCRATCH_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Temporary directory removed on drop.
struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    fn new() -> Result<Self, PdfError> {
        let n = SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!("house_reg_render_{}_{n}", std::process::id()));
        std::fs::create_dir_all(&path).map_err(|e| PdfError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Renders page 1 of `pdf` to PNG bytes at `dpi`.
///
/// # Errors
///
/// * [`PdfError::Io`] if the scratch files cannot be written or read.
/// * [`PdfError::Renderer`] if `pdftoppm` is missing or fails.
/// * [`PdfError::EmptyOutput`] if no image was produced.
pub fn render_first_page(pdf: &[u8], dpi: u32) -> Result<Vec<u8>, PdfError> {
    render_with(PDFTOPPM, pdf, dpi)
}

fn render_with(program: &str, pdf: &[u8], dpi: u32) -> Result<Vec<u8>, PdfError> {
    let scratch = ScratchDir::new()?;
    let input = scratch.path().join("input.pdf");
    let prefix = scratch.path().join("page");

    std::fs::write(&input, pdf).map_err(|e| PdfError::Io {
        path: input.display().to_string(),
        source: e,
    })?;

    let status = Command::new(program)
        .args(["-q", "-png", "-singlefile", "-f", "1", "-l", "1", "-r"])
        .arg(dpi.to_string())
        .arg(&input)
        .arg(&prefix)
        .status()
        .map_err(|e| PdfError::Renderer(format!("failed to run {program}: {e}")))?;

    if !status.success() {
        return Err(PdfError::Renderer(format!("{program} exited with {status}")));
    }

    let output = prefix.with_extension("png");
    let png = std::fs::read(&output).map_err(|e| PdfError::Io {
        path: output.display().to_string(),
        source: e,
    })?;

    if png.is_empty() {
        return Err(PdfError::EmptyOutput);
    }

    log::debug!("Rendered first page at {dpi} dpi ({} bytes)", png.len());

    Ok(png)
}
