//! Batch aggregation of up to six registration documents.
//!
//! Documents are processed strictly in input order, one at a time. The
//! aggregator is the isolation boundary for collaborator failures: a
//! document whose text cannot be read yields an all-empty record, and a
//! page that cannot be rendered yields an empty image value. Neither
//! stops the batch.

use house_reg_extract::{format_thai_date, parse_person};
use house_reg_person_models::{MAX_PEOPLE, SuffixLetter};

use crate::document::{DOC_DATE, DocumentContext, DocumentMeta, PageImage, TIME_START, image_key};
use crate::person::build_person_context;
use crate::progress::ProgressCallback;

/// Error type returned by document collaborators.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// A source document as seen by the aggregator.
///
/// Implemented by the PDF layer; the aggregator never touches file
/// formats directly.
pub trait SourceDocument {
    /// Human-readable name used in log messages.
    fn label(&self) -> &str;

    /// The document's text as trimmed, non-blank lines in page order.
    ///
    /// # Errors
    ///
    /// Returns an error if the text layer cannot be read.
    fn text_lines(&self) -> Result<Vec<String>, CollaboratorError>;

    /// Renders the first page as an image.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be rendered.
    fn render_first_page(&self) -> Result<PageImage, CollaboratorError>;
}

/// Clamps a person count to the supported range `1..=6`.
///
/// Out-of-range counts are corrected rather than rejected.
#[must_use]
pub const fn clamp_person_count(count: usize) -> usize {
    if count < 1 {
        1
    } else if count > MAX_PEOPLE {
        MAX_PEOPLE
    } else {
        count
    }
}

/// Builds the merged context for `documents`.
///
/// The document at position `i` is namespaced with the `i`-th
/// [`SuffixLetter`]. An empty slice produces an empty context. Documents
/// beyond the sixth are ignored.
pub fn build_document_context<D: SourceDocument>(
    documents: &[D],
    meta: &DocumentMeta,
    progress: &dyn ProgressCallback,
) -> DocumentContext {
    let mut ctx = DocumentContext::new();

    if documents.is_empty() {
        log::info!("No documents supplied, nothing to merge");
        return ctx;
    }

    if documents.len() > MAX_PEOPLE {
        log::warn!(
            "{} documents supplied, only the first {MAX_PEOPLE} will be used",
            documents.len()
        );
    }

    ctx.insert_text(DOC_DATE, format_thai_date(meta.date));
    ctx.insert_text(TIME_START, meta.time_start.clone());

    let batch: Vec<(SuffixLetter, &D)> = SuffixLetter::ALL.into_iter().zip(documents).collect();
    progress.set_total(batch.len() as u64);

    for (letter, document) in batch {
        let label = document.label();
        progress.set_message(format!("[{letter}] {label}"));

        let lines = document.text_lines().unwrap_or_else(|e| {
            log::warn!("[{letter}] could not read text from {label}: {e}");
            Vec::new()
        });
        let record = parse_person(&lines);
        log::info!(
            "[{letter}] {label}: {}/12 fields found",
            record.filled_count()
        );
        ctx.merge_person(build_person_context(&record, letter));

        let key = image_key(letter);
        match document.render_first_page() {
            Ok(image) => {
                ctx.insert_image(key, image);
            }
            Err(e) => {
                log::warn!("[{letter}] could not render first page of {label}: {e}");
                ctx.insert_text(key, "");
            }
        }

        progress.inc(1);
    }

    progress.finish(format!("Merged {} document(s)", ctx.person_count()));
    ctx
}
