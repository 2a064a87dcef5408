//! `data_color`: maps cell values onto a color palette.
//!
//! A [`ColorScale`] describes the mapping; [`ColorScale::prepare`] fixes the
//! domain against the selected cells once, when the directive is registered.
//! Per-cell lookups then happen during resolution.

use crate::data::TableData;
use crate::error::TableError;
use crate::selection::Selection;
use itertools::Itertools;
use tablekit_style::CellStyle;
use tablekit_types::{Color, Value};

/// Fallback for missing values and values outside a categorical domain.
pub const DEFAULT_NA_COLOR: Color = Color::rgb(128, 128, 128);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMethod {
    /// Numeric when every present value is a number, categorical otherwise.
    #[default]
    Auto,
    Numeric,
    /// Fixed numeric bins; see [`ColorScale::bins`].
    Bin,
    Factor,
}

/// Which property receives the computed color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyTo {
    #[default]
    Fill,
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    palette: Vec<Color>,
    method: ColorMethod,
    domain: Option<(f64, f64)>,
    levels: Option<Vec<String>>,
    bins: Option<Vec<f64>>,
    na_color: Option<Color>,
    alpha: Option<f32>,
    reverse: bool,
    apply_to: ApplyTo,
    autocolor_text: bool,
}

impl ColorScale {
    pub fn new(palette: Vec<Color>) -> Self {
        Self {
            palette,
            method: ColorMethod::Auto,
            domain: None,
            levels: None,
            bins: None,
            na_color: None,
            alpha: None,
            reverse: false,
            apply_to: ApplyTo::Fill,
            autocolor_text: true,
        }
    }

    /// Palette from color names or hex strings.
    pub fn from_names(names: &[&str]) -> Result<Self, TableError> {
        let palette = names
            .iter()
            .map(|name| name.parse::<Color>().map_err(TableError::Configuration))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(palette))
    }

    pub fn method(mut self, method: ColorMethod) -> Self {
        self.method = method;
        self
    }

    /// Explicit numeric domain; values outside it are clamped to the ends.
    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = Some((min, max));
        self.method = ColorMethod::Numeric;
        self
    }

    /// Explicit categorical levels, in palette order.
    pub fn levels<I, S>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.levels = Some(levels.into_iter().map(Into::into).collect());
        self.method = ColorMethod::Factor;
        self
    }

    /// Ascending bin boundaries. Bins are half-open except the last one,
    /// which includes its upper boundary.
    pub fn bins(mut self, boundaries: Vec<f64>) -> Self {
        self.bins = Some(boundaries);
        self.method = ColorMethod::Bin;
        self
    }

    pub fn na_color(mut self, color: Color) -> Self {
        self.na_color = Some(color);
        self
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha.clamp(0.0, 1.0));
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn apply_to(mut self, apply_to: ApplyTo) -> Self {
        self.apply_to = apply_to;
        self
    }

    /// Whether a filled cell also gets a black or white text color, whichever
    /// contrasts more with the fill.
    pub fn autocolor_text(mut self, enabled: bool) -> Self {
        self.autocolor_text = enabled;
        self
    }

    pub(crate) fn has_na_color(&self) -> bool {
        self.na_color.is_some()
    }

    /// Fixes the domain against the selected cells. Fails when the palette
    /// is empty or a numeric domain cannot be established.
    pub fn prepare(&self, data: &TableData, selection: &Selection) -> Result<PreparedScale, TableError> {
        if self.palette.is_empty() {
            return Err(TableError::Domain("Color palette is empty".to_string()));
        }
        let present: Vec<&Value> = selection
            .cells()
            .map(|(r, c)| data.value(r, c))
            .filter(|v| !v.is_missing())
            .collect();

        let method = match self.method {
            ColorMethod::Auto if !present.is_empty() && present.iter().all(|v| v.is_numeric()) => {
                ColorMethod::Numeric
            }
            ColorMethod::Auto => ColorMethod::Factor,
            other => other,
        };

        let domain = match method {
            ColorMethod::Numeric => {
                let (min, max) = match self.domain {
                    Some(domain) => domain,
                    None => present
                        .iter()
                        .filter_map(|v| v.as_f64())
                        .minmax_by(f64::total_cmp)
                        .into_option()
                        .ok_or_else(|| {
                            TableError::Domain("No numeric values to derive a color domain from".to_string())
                        })?,
                };
                if !min.is_finite() || !max.is_finite() || min > max {
                    return Err(TableError::Domain(format!("Invalid numeric domain [{}, {}]", min, max)));
                }
                log::debug!("Numeric color domain [{}, {}] over {} value(s)", min, max, present.len());
                ScaleDomain::Numeric { min, max }
            }
            ColorMethod::Bin => {
                let bins = self.bins.clone().unwrap_or_default();
                if bins.len() < 2 || !bins.iter().tuple_windows().all(|(a, b)| a < b) {
                    return Err(TableError::Domain(
                        "Bins need at least two strictly ascending boundaries".to_string(),
                    ));
                }
                ScaleDomain::Bins(bins)
            }
            _ => {
                let levels = match &self.levels {
                    Some(levels) => levels.clone(),
                    None if present.iter().all(|v| v.is_numeric()) => present
                        .iter()
                        .sorted_by(|a, b| a.as_f64().unwrap_or(f64::NAN).total_cmp(&b.as_f64().unwrap_or(f64::NAN)))
                        .map(|v| v.to_string())
                        .dedup()
                        .collect(),
                    None => present.iter().map(|v| v.to_string()).sorted().dedup().collect(),
                };
                log::debug!("Categorical color domain with {} level(s)", levels.len());
                ScaleDomain::Levels(levels)
            }
        };

        let mut palette = self.palette.clone();
        if self.reverse {
            palette.reverse();
        }
        if let Some(alpha) = self.alpha {
            palette.iter_mut().for_each(|c| c.a = alpha);
        }

        Ok(PreparedScale {
            domain,
            palette,
            na_color: self.na_color.unwrap_or(DEFAULT_NA_COLOR),
            apply_to: self.apply_to,
            autocolor_text: self.autocolor_text,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScaleDomain {
    Numeric { min: f64, max: f64 },
    Bins(Vec<f64>),
    Levels(Vec<String>),
}

/// A color scale with its domain fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedScale {
    pub domain: ScaleDomain,
    pub palette: Vec<Color>,
    pub na_color: Color,
    pub apply_to: ApplyTo,
    pub autocolor_text: bool,
}

impl PreparedScale {
    /// Color at position `t` in `[0, 1]` along the palette.
    pub fn sample(&self, t: f64) -> Color {
        let n = self.palette.len();
        if n == 1 {
            return self.palette[0];
        }
        let pos = t.clamp(0.0, 1.0) * (n - 1) as f64;
        let i = pos.floor() as usize;
        if i >= n - 1 {
            return self.palette[n - 1];
        }
        self.palette[i].lerp(&self.palette[i + 1], pos - i as f64)
    }

    pub fn color_for(&self, value: &Value) -> Result<Color, TableError> {
        if value.is_missing() {
            return Ok(self.na_color);
        }
        let fraction = |i: usize, n: usize| if n <= 1 { 0.0 } else { i as f64 / (n - 1) as f64 };
        match &self.domain {
            ScaleDomain::Numeric { min, max } => {
                let x = value.as_f64().ok_or_else(|| {
                    TableError::Domain(format!("Value '{}' is not numeric", value))
                })?;
                let t = if max > min { (x - min) / (max - min) } else { 0.0 };
                Ok(self.sample(t))
            }
            ScaleDomain::Bins(bins) => {
                let x = value.as_f64().ok_or_else(|| {
                    TableError::Domain(format!("Value '{}' is not numeric", value))
                })?;
                let n_bins = bins.len() - 1;
                let last = bins[n_bins];
                let bin = bins.iter().tuple_windows().position(|(lo, hi)| x >= *lo && x < *hi);
                Ok(match bin {
                    Some(i) => self.sample(fraction(i, n_bins)),
                    None if x == last => self.sample(1.0),
                    None => self.na_color,
                })
            }
            ScaleDomain::Levels(levels) => {
                let key = value.to_string();
                Ok(match levels.iter().position(|l| *l == key) {
                    Some(i) => self.sample(fraction(i, levels.len())),
                    None => self.na_color,
                })
            }
        }
    }

    pub fn style_for(&self, value: &Value) -> Result<CellStyle, TableError> {
        let color = self.color_for(value)?;
        Ok(match self.apply_to {
            ApplyTo::Text => CellStyle::text_color(color),
            ApplyTo::Fill if self.autocolor_text => CellStyle::fill(color).with_color(readable_text(&color)),
            ApplyTo::Fill => CellStyle::fill(color),
        })
    }
}

/// Black or white, whichever contrasts more with `background`.
pub fn readable_text(background: &Color) -> Color {
    if background.contrast_ratio(&Color::BLACK) >= background.contrast_ratio(&Color::WHITE) {
        Color::BLACK
    } else {
        Color::WHITE
    }
}
