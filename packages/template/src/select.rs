//! Template variant selection and output naming.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use house_reg_context::clamp_person_count;
use house_reg_person_models::MAX_PEOPLE;

use crate::config::FillConfig;

/// A template file for a given person count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVariant {
    /// Number of people the template has slots for.
    pub people: usize,
    /// Path to the template file.
    pub path: PathBuf,
    /// Whether the file currently exists.
    pub exists: bool,
}

/// Returns the template path for `people`, clamped to `1..=6`.
#[must_use]
pub fn template_for_count(config: &FillConfig, people: usize) -> PathBuf {
    let n = clamp_person_count(people);
    config
        .template_dir
        .join(config.template_pattern.replace("{n}", &n.to_string()))
}

/// Lists the template variants for every supported person count.
#[must_use]
pub fn list_templates(config: &FillConfig) -> Vec<TemplateVariant> {
    (1..=MAX_PEOPLE)
        .map(|people| {
            let path = template_for_count(config, people);
            let exists = path.is_file();
            TemplateVariant {
                people,
                path,
                exists,
            }
        })
        .collect()
}

/// Builds a timestamped output file name: `<prefix>_<YYYYmmdd_HHMMSS>.<ext>`.
#[must_use]
pub fn output_filename(prefix: &str, ext: &str, now: NaiveDateTime) -> String {
    format!("{prefix}_{}.{ext}", now.format("%Y%m%d_%H%M%S"))
}
