#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Template filling for merged registration contexts.
//!
//! One Word template exists per person count (1 to 6). [`fill_document`]
//! picks the template matching a [`DocumentContext`], fills its
//! placeholders, writes a timestamped `.docx` into the output directory,
//! and then tries to convert it to PDF.

pub mod config;
pub mod convert;
pub mod docx;
pub mod select;

use std::path::PathBuf;

use chrono::NaiveDateTime;
use house_reg_context::DocumentContext;

pub use config::FillConfig;
pub use convert::convert_to_pdf;
pub use docx::{fill_placeholders, render_docx};
pub use select::{TemplateVariant, list_templates, output_filename, template_for_count};

/// Errors from template loading, filling, and configuration.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Reading or writing a file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path involved in the failed operation.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The DOCX package could not be read or written.
    #[error("Zip error at {path}: {source}")]
    Zip {
        /// Path of the package.
        path: String,
        /// Underlying error.
        source: zip::result::ZipError,
    },

    /// The config file did not parse.
    #[error("Config error: {0}")]
    Config(String),

    /// The selected template file does not exist.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// The template is not a usable DOCX package.
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// The context holds no people.
    #[error("Nothing to fill: the context has no people")]
    EmptyContext,
}

/// Files produced by [`fill_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilledDocument {
    /// The filled Word document.
    pub docx: PathBuf,
    /// The converted PDF, when conversion succeeded.
    pub pdf: Option<PathBuf>,
}

/// Fills the template for `ctx.person_count()` people and writes the
/// result to `config.output_dir`, named from `config.output_prefix` and
/// `now`.
///
/// # Errors
///
/// * [`TemplateError::EmptyContext`] if `ctx` has no people.
/// * Any error from [`render_docx`].
pub fn fill_document(
    config: &FillConfig,
    ctx: &DocumentContext,
    now: NaiveDateTime,
) -> Result<FilledDocument, TemplateError> {
    let people = ctx.person_count();
    if people == 0 {
        return Err(TemplateError::EmptyContext);
    }

    let template = template_for_count(config, people);
    log::info!("Using template {} for {people} people", template.display());

    let docx = config
        .output_dir
        .join(output_filename(&config.output_prefix, "docx", now));
    render_docx(&template, ctx, &docx)?;

    let pdf = convert_to_pdf(&config.converter, &docx, &config.output_dir);

    Ok(FilledDocument { docx, pdf })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use chrono::NaiveDate;
    use house_reg_context::build_person_context;
    use house_reg_person_models::{PersonRecord, SuffixLetter};

    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 16)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn empty_context_is_rejected() {
        let result = fill_document(&FillConfig::default(), &DocumentContext::new(), now());
        assert!(matches!(result, Err(TemplateError::EmptyContext)));
    }

    #[test]
    fn missing_template_is_reported() {
        let config = FillConfig {
            template_dir: std::env::temp_dir().join("house_reg_fill_no_templates"),
            ..FillConfig::default()
        };
        let mut ctx = DocumentContext::new();
        ctx.merge_person(build_person_context(&PersonRecord::default(), SuffixLetter::A));

        let result = fill_document(&config, &ctx, now());
        assert!(matches!(result, Err(TemplateError::TemplateNotFound(_))));
    }

    #[test]
    fn fills_template_matching_person_count() {
        let dir = std::env::temp_dir().join("house_reg_fill_document_test");
        let _ = std::fs::remove_dir_all(&dir);
        let templates = dir.join("templates");
        std::fs::create_dir_all(&templates).unwrap();

        let mut writer = zip::ZipWriter::new(
            std::fs::File::create(templates.join("main_template_urinetest2.docx")).unwrap(),
        );
        writer
            .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer
            .write_all(b"<w:t>{{CID_A}}/{{CID_B}}</w:t>")
            .unwrap();
        writer.finish().unwrap();

        let config = FillConfig {
            template_dir: templates,
            output_dir: dir.join("output"),
            converter: String::new(),
            ..FillConfig::default()
        };

        let mut ctx = DocumentContext::new();
        for (letter, cid) in [(SuffixLetter::A, "1111"), (SuffixLetter::B, "2222")] {
            let record = PersonRecord {
                cid: cid.to_owned(),
                ..PersonRecord::default()
            };
            ctx.merge_person(build_person_context(&record, letter));
        }

        let filled = fill_document(&config, &ctx, now()).unwrap();
        assert_eq!(
            filled.docx,
            dir.join("output").join("urinetest_20251216_100000.docx")
        );
        assert_eq!(filled.pdf, None);

        let mut archive = zip::ZipArchive::new(std::fs::File::open(&filled.docx).unwrap()).unwrap();
        let mut document = String::new();
        std::io::Read::read_to_string(
            &mut archive.by_name("word/document.xml").unwrap(),
            &mut document,
        )
        .unwrap();
        assert_eq!(document, "<w:t>1111/2222</w:t>");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
