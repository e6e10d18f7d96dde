//! Fill configuration loaded from TOML.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::TemplateError;

/// Environment variable naming a config file to use when none is given
/// explicitly.
pub const CONFIG_ENV: &str = "HOUSE_REG_CONFIG";

/// The default configuration, shipped as a commented TOML file.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Where templates live, where outputs go, and how pages are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    /// Directory holding one template per person count.
    pub template_dir: PathBuf,
    /// Template file name with `{n}` standing for the person count.
    pub template_pattern: String,
    /// Directory filled documents are written to.
    pub output_dir: PathBuf,
    /// Output file name prefix.
    pub output_prefix: String,
    /// Display width of embedded page images, in millimetres.
    pub image_width_mm: u32,
    /// Rasterization resolution for page images.
    pub render_dpi: u32,
    /// DOCX to PDF conversion command. Empty disables conversion.
    pub converter: String,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from("word_templates"),
            template_pattern: "main_template_urinetest{n}.docx".to_owned(),
            output_dir: PathBuf::from("output"),
            output_prefix: "urinetest".to_owned(),
            image_width_mm: 150,
            render_dpi: 160,
            converter: "soffice".to_owned(),
        }
    }
}

impl FillConfig {
    /// Parses a config from TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Config`] if the TOML is malformed or a
    /// value has the wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self, TemplateError> {
        toml::from_str(content).map_err(|e| TemplateError::Config(e.to_string()))
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Io`] if the file cannot be read or
    /// [`TemplateError::Config`] if it does not parse.
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let content = std::fs::read_to_string(path).map_err(|e| TemplateError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Loads the config from `path`, else from [`CONFIG_ENV`], else the
    /// built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a named config file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, TemplateError> {
        if let Some(path) = path {
            log::info!("Loading config from {}", path.display());
            return Self::from_file(path);
        }
        if let Ok(env_path) = std::env::var(CONFIG_ENV)
            && !env_path.is_empty()
        {
            log::info!("Loading config from {CONFIG_ENV}={env_path}");
            return Self::from_file(Path::new(&env_path));
        }
        log::debug!("Using built-in config");
        Ok(Self::default())
    }
}
