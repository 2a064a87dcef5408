//! Table-wide options, loadable from JSON.

use crate::error::TableError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tablekit_format::Locale;
use tablekit_types::Color;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    /// Locale applied to number and currency formatters that choose none.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub locale: Option<String>,
    /// Text shown for missing values not covered by a `sub_missing` directive.
    #[serde(default)]
    pub missing_text: String,
    /// Default fallback color for `data_color` scales.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub color_na: Option<Color>,
    /// Right-align numeric and temporal columns, left-align the rest.
    #[serde(default = "default_true")]
    pub auto_align: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            locale: None,
            missing_text: String::new(),
            color_na: None,
            auto_align: true,
        }
    }
}

impl TableOptions {
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn missing_text(mut self, text: impl Into<String>) -> Self {
        self.missing_text = text.into();
        self
    }

    pub fn color_na(mut self, color: Color) -> Self {
        self.color_na = Some(color);
        self
    }

    pub fn auto_align(mut self, enabled: bool) -> Self {
        self.auto_align = enabled;
        self
    }

    /// Resolves the configured locale, failing on unknown identifiers.
    pub fn resolved_locale(&self) -> Result<Option<Locale>, TableError> {
        Ok(self.locale.as_deref().map(Locale::parse).transpose()?)
    }
}
