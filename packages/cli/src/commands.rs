//! Subcommand implementations shared by the flag-driven and interactive
//! front ends.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use house_reg_cli_utils::{IndicatifProgress, MultiProgress};
use house_reg_context::{DocumentMeta, SourceDocument, build_document_context};
use house_reg_pdf::PdfDocument;
use house_reg_person_models::MAX_PEOPLE;
use house_reg_template::config::DEFAULT_CONFIG_TOML;
use house_reg_template::{FillConfig, fill_document, list_templates};

/// Date format accepted on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` document date.
///
/// # Errors
///
/// Returns an error if `value` is not a valid calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
}

/// Opens the PDFs that will fill a slot. Paths past the last slot are
/// never read.
fn open_documents(paths: &[PathBuf], config: &FillConfig) -> Result<Vec<PdfDocument>, house_reg_pdf::PdfError> {
    if paths.len() > MAX_PEOPLE {
        for path in &paths[MAX_PEOPLE..] {
            log::warn!("Only {MAX_PEOPLE} people fit one document, ignoring {}", path.display());
        }
    }

    paths
        .iter()
        .take(MAX_PEOPLE)
        .map(|path| {
            PdfDocument::open(path)
                .map(|doc| doc.with_render(config.render_dpi, config.image_width_mm))
        })
        .collect()
}

/// Prints the fields found in each PDF as a JSON array.
///
/// # Errors
///
/// Returns an error if a file cannot be read.
pub fn parse(paths: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    let mut records = Vec::with_capacity(paths.len());

    for path in paths {
        let doc = PdfDocument::open(path)?;
        let lines = doc.text_lines().unwrap_or_else(|e| {
            log::warn!("Could not read text from {}: {e}", doc.label());
            Vec::new()
        });
        let record = house_reg_extract::parse_person(&lines);
        records.push(serde_json::json!({
            "file": doc.label(),
            "record": record,
        }));
    }

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

/// Options for [`fill`].
pub struct FillOptions<'a> {
    pub pdfs: &'a [PathBuf],
    pub date: NaiveDate,
    pub time_start: &'a str,
    pub config: Option<&'a Path>,
    pub context_only: bool,
}

/// Merges the PDFs into one context and fills the matching template.
///
/// # Errors
///
/// Returns an error if no PDFs are given, a PDF or the config cannot be
/// read, or the template cannot be filled.
pub fn fill(options: &FillOptions<'_>, multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    if options.pdfs.is_empty() {
        return Err("no PDF files given".into());
    }

    let config = FillConfig::load(options.config)?;
    let documents = open_documents(options.pdfs, &config)?;
    let meta = DocumentMeta::new(options.date, options.time_start);

    let progress = IndicatifProgress::documents_bar(multi, "Reading documents");
    let ctx = build_document_context(&documents, &meta, progress.as_ref());

    if options.context_only {
        println!("{}", serde_json::to_string_pretty(&ctx.to_json())?);
        return Ok(());
    }

    let filled = fill_document(&config, &ctx, chrono::Local::now().naive_local())?;

    println!("DOCX: {}", filled.docx.display());
    match filled.pdf {
        Some(pdf) => println!("PDF:  {}", pdf.display()),
        None => println!("PDF:  not created (DOCX only)"),
    }

    Ok(())
}

/// Lists the template for each person count and whether it exists.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded.
pub fn templates(config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = FillConfig::load(config)?;

    for variant in list_templates(&config) {
        println!(
            "{} {}: {}",
            if variant.exists { "ok     " } else { "missing" },
            variant.people,
            variant.path.display()
        );
    }

    Ok(())
}

/// Prints the built-in default config.
pub fn print_default_config() {
    print!("{DEFAULT_CONFIG_TOML}");
}
