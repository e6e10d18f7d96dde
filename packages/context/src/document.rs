//! The merged template context handed to the document renderer.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use house_reg_person_models::SuffixLetter;

/// Context key for the long-form document date.
pub const DOC_DATE: &str = "DOC_DATE";

/// Context key for the start time entered by the operator.
pub const TIME_START: &str = "TIME_START";

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Returns the context key for a person's rendered registration page,
/// e.g. `HOUSE_REG_IMAGE_A`.
#[must_use]
pub fn image_key(letter: SuffixLetter) -> String {
    format!("HOUSE_REG_IMAGE_{letter}")
}

/// Document-level values shared by every person in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMeta {
    /// Date printed on the document.
    pub date: NaiveDate,
    /// Start time as entered, e.g. `09:30`.
    pub time_start: String,
}

impl DocumentMeta {
    /// Creates metadata, trimming `time_start`.
    #[must_use]
    pub fn new(date: NaiveDate, time_start: &str) -> Self {
        Self {
            date,
            time_start: time_start.trim().to_owned(),
        }
    }
}

/// A rendered page image ready to embed in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    /// PNG-encoded image bytes.
    pub png: Vec<u8>,
    /// Width to display the image at, in millimetres.
    pub width_mm: u32,
}

impl PageImage {
    #[must_use]
    pub const fn new(png: Vec<u8>, width_mm: u32) -> Self {
        Self { png, width_mm }
    }

    /// Pixel dimensions read from the PNG `IHDR` chunk, or `None` if the
    /// bytes are not a PNG.
    #[must_use]
    pub fn pixel_size(&self) -> Option<(u32, u32)> {
        if !self.png.starts_with(PNG_SIGNATURE) || self.png.get(12..16)? != b"IHDR" {
            return None;
        }
        let width = u32::from_be_bytes(self.png.get(16..20)?.try_into().ok()?);
        let height = u32::from_be_bytes(self.png.get(20..24)?.try_into().ok()?);
        (width > 0 && height > 0).then_some((width, height))
    }
}

/// A single context value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextValue {
    Text(String),
    Image(PageImage),
}

/// Flat mapping from template placeholder names to values.
///
/// Person keys are namespaced by [`SuffixLetter`], so contributions from
/// different people never overwrite each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentContext {
    values: BTreeMap<String, ContextValue>,
    people: usize,
}

impl DocumentContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a text value, returning the previous value for `key`.
    pub fn insert_text(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<ContextValue> {
        self.values.insert(key.into(), ContextValue::Text(value.into()))
    }

    /// Sets an image value, returning the previous value for `key`.
    pub fn insert_image(&mut self, key: impl Into<String>, image: PageImage) -> Option<ContextValue> {
        self.values.insert(key.into(), ContextValue::Image(image))
    }

    /// Merges one person's suffixed text values and counts the person.
    pub fn merge_person(&mut self, person: BTreeMap<String, String>) {
        for (key, value) in person {
            if self.insert_text(key.clone(), value).is_some() {
                log::warn!("Context key {key} was already set and has been replaced");
            }
        }
        self.people += 1;
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.values.get(key)
    }

    /// Returns the text value for `key`, or `None` if absent or an image.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key)? {
            ContextValue::Text(text) => Some(text),
            ContextValue::Image(_) => None,
        }
    }

    /// Returns the image value for `key`, or `None` if absent or text.
    #[must_use]
    pub fn image(&self, key: &str) -> Option<&PageImage> {
        match self.values.get(key)? {
            ContextValue::Image(image) => Some(image),
            ContextValue::Text(_) => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of people merged into this context.
    #[must_use]
    pub const fn person_count(&self) -> usize {
        self.people
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// JSON view of the context. Images are summarized by size.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .values
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    ContextValue::Text(text) => text.clone(),
                    ContextValue::Image(image) => format!("<image: {} bytes>", image.png.len()),
                };
                (key.clone(), serde_json::Value::String(value))
            })
            .collect();
        serde_json::Value::Object(map)
    }
}
