//! Best-effort DOCX to PDF conversion through an office suite.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Converts `docx` to PDF in `out_dir` using `converter` (normally
/// `soffice`).
///
/// Returns the PDF path on success. Any failure is logged and yields
/// `None`; the DOCX is left in place either way. An empty `converter`
/// disables conversion.
#[must_use]
pub fn convert_to_pdf(converter: &str, docx: &Path, out_dir: &Path) -> Option<PathBuf> {
    if converter.is_empty() {
        log::debug!("PDF conversion disabled");
        return None;
    }

    log::info!("Converting {} to PDF with {converter}", docx.display());

    let output = match Command::new(converter)
        .args(["--headless", "--convert-to", "pdf", "--outdir"])
        .arg(out_dir)
        .arg(docx)
        .output()
    {
        Ok(output) => output,
        Err(e) => {
            log::warn!("Could not run {converter}: {e}");
            return None;
        }
    };

    if !output.status.success() {
        log::warn!(
            "{converter} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return None;
    }

    let pdf = out_dir.join(docx.with_extension("pdf").file_name()?);
    if pdf.is_file() {
        log::info!("Wrote {}", pdf.display());
        Some(pdf)
    } else {
        log::warn!("{converter} finished but {} was not created", pdf.display());
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docx() -> PathBuf {
        std::env::temp_dir().join("house_reg_convert_test.docx")
    }

    #[test]
    fn empty_converter_disables_conversion() {
        assert_eq!(convert_to_pdf("", &docx(), &std::env::temp_dir()), None);
    }

    #[test]
    fn missing_converter_yields_none() {
        assert_eq!(
            convert_to_pdf("house-reg-no-such-converter", &docx(), &std::env::temp_dir()),
            None
        );
    }

    #[cfg(unix)]
    #[test]
    fn converter_without_output_yields_none() {
        let out_dir = std::env::temp_dir().join("house_reg_convert_no_output");
        let _ = std::fs::remove_dir_all(&out_dir);
        std::fs::create_dir_all(&out_dir).unwrap();

        assert_eq!(convert_to_pdf("true", &docx(), &out_dir), None);

        let _ = std::fs::remove_dir_all(&out_dir);
    }
}
