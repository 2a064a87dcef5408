//! The set of visual properties that can be attached to a table location.

use crate::border::{Border, BorderSides, Side};
use crate::font::{FontStyle, FontWeight};
use crate::parsers::{apply_style_property, StyleParseError};
use crate::text::{TextAlign, TextDecoration, TextTransform, WhiteSpace};
use serde::{Deserialize, Serialize};
use tablekit_types::Color;

/// Style directives for a cell. Every property is optional: an unset property
/// leaves whatever an earlier directive (or the renderer default) provided.
#[derive(Deserialize, Serialize, Default, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CellStyle {
    // Fill
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fill: Option<Color>,

    // Font & Text
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub font_style: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub decoration: Option<TextDecoration>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub transform: Option<TextTransform>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub whitespace: Option<WhiteSpace>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub indent: Option<f32>,

    // Borders
    #[serde(skip_serializing_if = "BorderSides::is_empty", default)]
    pub borders: BorderSides,
}

impl CellStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// A style that only sets the background fill.
    pub fn fill(color: Color) -> Self {
        Self { fill: Some(color), ..Default::default() }
    }

    /// A style that only sets the text color.
    pub fn text_color(color: Color) -> Self {
        Self { color: Some(color), ..Default::default() }
    }

    /// A style that only sets borders on the given sides.
    pub fn borders(sides: &[Side], border: Border) -> Self {
        Self { borders: BorderSides::new(sides, border), ..Default::default() }
    }

    /// Builds a style from CSS-like declarations, e.g.
    /// `"background-color: cyan; font-weight: bold"`.
    pub fn from_css(css: &str) -> Result<Self, StyleParseError> {
        let mut style = Self::default();
        for declaration in css.split(';') {
            if declaration.trim().is_empty() {
                continue;
            }
            let (key, value) = declaration.split_once(':').ok_or_else(|| {
                StyleParseError::Parse(format!("Expected 'property: value', got '{}'", declaration.trim()))
            })?;
            apply_style_property(&mut style, key.trim(), value.trim())?;
        }
        Ok(style)
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = Some(weight);
        self
    }

    pub fn with_font_style(mut self, style: FontStyle) -> Self {
        self.font_style = Some(style);
        self
    }

    pub fn with_decoration(mut self, decoration: TextDecoration) -> Self {
        self.decoration = Some(decoration);
        self
    }

    pub fn with_transform(mut self, transform: TextTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = Some(align);
        self
    }

    pub fn with_whitespace(mut self, whitespace: WhiteSpace) -> Self {
        self.whitespace = Some(whitespace);
        self
    }

    pub fn with_indent(mut self, indent: f32) -> Self {
        self.indent = Some(indent);
        self
    }

    pub fn with_border(mut self, side: Side, border: Border) -> Self {
        self.borders.set(side, border);
        self
    }

    /// True when no property is set.
    pub fn is_empty(&self) -> bool {
        *self == CellStyle::default()
    }

    /// Layers `later` on top of `self`: a property set in `later` wins,
    /// anything `later` leaves unset keeps the value from `self`.
    pub fn merge(&self, later: &CellStyle) -> CellStyle {
        CellStyle {
            fill: later.fill.or(self.fill),
            color: later.color.or(self.color),
            font_family: later.font_family.clone().or_else(|| self.font_family.clone()),
            font_size: later.font_size.or(self.font_size),
            font_weight: later.font_weight.or(self.font_weight),
            font_style: later.font_style.or(self.font_style),
            decoration: later.decoration.or(self.decoration),
            transform: later.transform.or(self.transform),
            align: later.align.or(self.align),
            whitespace: later.whitespace.or(self.whitespace),
            indent: later.indent.or(self.indent),
            borders: self.borders.merge(&later.borders),
        }
    }
}
