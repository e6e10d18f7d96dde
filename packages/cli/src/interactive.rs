//! Prompt-driven fill for users who do not want to remember flags.
//!
//! Asks for the document date, the start time, and one PDF per person
//! slot. Blank slots are skipped; the remaining files keep slot order.

use std::path::PathBuf;

use dialoguer::{Confirm, Input};
use house_reg_cli_utils::MultiProgress;
use house_reg_context::DocumentMeta;
use house_reg_person_models::SuffixLetter;

use crate::commands::{self, DATE_FORMAT, FillOptions};

/// Runs the interactive prompts and fills the template.
///
/// # Errors
///
/// Returns an error if a prompt fails or filling fails.
pub fn run(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    println!("Household registration document filler");
    println!();

    let today = chrono::Local::now().date_naive().format(DATE_FORMAT).to_string();
    let date_str: String = Input::new()
        .with_prompt("Document date (YYYY-MM-DD)")
        .default(today)
        .validate_with(|input: &String| {
            commands::parse_date(input)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;
    let date = commands::parse_date(&date_str)?;

    let time_start: String = Input::new()
        .with_prompt("Start time (e.g. 08:30, blank for none)")
        .allow_empty(true)
        .interact_text()?;

    let mut pdfs = Vec::new();
    for letter in SuffixLetter::ALL {
        let path: String = Input::new()
            .with_prompt(format!("PDF for person {letter} (blank to skip)"))
            .allow_empty(true)
            .interact_text()?;
        if let Some(path) = slot_path(&path) {
            log::debug!("Slot {letter}: {}", path.display());
            pdfs.push(path);
        }
    }

    if pdfs.is_empty() {
        println!("No PDFs selected, nothing to do.");
        return Ok(());
    }

    let meta = DocumentMeta::new(date, &time_start);
    let proceed = Confirm::new()
        .with_prompt(format!(
            "Fill the {}-person template for {}?",
            pdfs.len(),
            meta.date.format(DATE_FORMAT)
        ))
        .default(true)
        .interact()?;
    if !proceed {
        return Ok(());
    }

    commands::fill(
        &FillOptions {
            pdfs: &pdfs,
            date: meta.date,
            time_start: &meta.time_start,
            config: None,
            context_only: false,
        },
        multi,
    )
}

/// Turns a slot answer into a path. Blank answers and surrounding quotes
/// (as pasted from a file manager) are stripped.
fn slot_path(answer: &str) -> Option<PathBuf> {
    let trimmed = answer.trim().trim_matches(|c| c == '"' || c == '\'');
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_slots_are_skipped() {
        assert_eq!(slot_path(""), None);
        assert_eq!(slot_path("   "), None);
        assert_eq!(slot_path("''"), None);
    }

    #[test]
    fn quoted_paths_are_unwrapped() {
        assert_eq!(
            slot_path("  \"/tmp/person a.pdf\" "),
            Some(PathBuf::from("/tmp/person a.pdf"))
        );
    }
}
