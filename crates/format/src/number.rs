//! Numeric formatters: plain numbers, integers, percentages and scientific notation.
//!
//! All of them share the same digit pipeline: scale, optionally compact
//! (K/M/B/T), round to fixed decimals or significant figures, trim trailing
//! zeros, group the integer part and finally apply locale marks, sign and
//! pattern.

use crate::error::FormatError;
use crate::formatter::ValueFormatter;
use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use tablekit_types::Value;

const COMPACT_SUFFIXES: [&str; 5] = ["", "K", "M", "B", "T"];

/// Where a symbol (currency, percent sign) sits relative to the digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Left,
    #[default]
    Right,
}

/// Digit-level options shared by every numeric formatter.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DigitOptions {
    pub(crate) decimals: usize,
    pub(crate) n_sigfig: Option<usize>,
    pub(crate) drop_trailing_zeros: bool,
    pub(crate) drop_trailing_dec_mark: bool,
    pub(crate) use_seps: bool,
    pub(crate) compact: bool,
    pub(crate) sep_mark: Option<String>,
    pub(crate) dec_mark: Option<String>,
    pub(crate) locale: Option<Locale>,
}

impl Default for DigitOptions {
    fn default() -> Self {
        Self {
            decimals: 2,
            n_sigfig: None,
            drop_trailing_zeros: false,
            drop_trailing_dec_mark: true,
            use_seps: true,
            compact: false,
            sep_mark: None,
            dec_mark: None,
            locale: None,
        }
    }
}

/// Magnitude rendered with marks and compact suffix, without sign.
pub(crate) struct RenderedMagnitude {
    pub(crate) text: String,
    pub(crate) is_zero: bool,
}

impl DigitOptions {
    fn marks(&self) -> (&str, &str) {
        let locale_sep = self.locale.as_ref().map(|l| l.group_separator.as_str());
        let locale_dec = self.locale.as_ref().map(|l| l.decimal_mark.as_str());
        let sep = self.sep_mark.as_deref().or(locale_sep).unwrap_or(",");
        let dec = self.dec_mark.as_deref().or(locale_dec).unwrap_or(".");
        (sep, dec)
    }

    fn round(&self, abs: f64) -> String {
        match self.n_sigfig {
            Some(n) => significant_figures(abs, n),
            None => format!("{:.*}", self.decimals, abs),
        }
    }

    /// True when rounding `abs` reaches at least `bound`.
    fn rounds_to_at_least(&self, abs: f64, bound: f64) -> bool {
        self.round(abs).parse::<f64>().map(|v| v >= bound).unwrap_or(false)
    }

    pub(crate) fn render(&self, abs: f64) -> RenderedMagnitude {
        let (digits, suffix) = if self.compact {
            self.compact_digits(abs)
        } else {
            (self.round(abs), "")
        };
        self.finish(digits, suffix)
    }

    /// Renders an integer magnitude digit for digit. `None` when compact
    /// or significant-figure rounding is in effect.
    pub(crate) fn render_exact(&self, abs: u64) -> Option<RenderedMagnitude> {
        if self.compact || self.n_sigfig.is_some() {
            return None;
        }
        let digits = match self.decimals {
            0 => abs.to_string(),
            n => format!("{}.{}", abs, "0".repeat(n)),
        };
        Some(self.finish(digits, ""))
    }

    fn finish(&self, digits: String, suffix: &str) -> RenderedMagnitude {
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i.to_string(), f.to_string()),
            None => (digits.clone(), String::new()),
        };
        let frac_part = if self.drop_trailing_zeros {
            frac_part.trim_end_matches('0').to_string()
        } else {
            frac_part
        };
        let is_zero = int_part.chars().chain(frac_part.chars()).all(|c| c == '0');

        let (sep, dec) = self.marks();
        let mut text = if self.use_seps { group_integer(&int_part, sep) } else { int_part };
        if !frac_part.is_empty() {
            text.push_str(dec);
            text.push_str(&frac_part);
        } else if !self.drop_trailing_dec_mark {
            text.push_str(dec);
        }
        text.push_str(suffix);
        RenderedMagnitude { text, is_zero }
    }

    fn compact_digits(&self, abs: f64) -> (String, &'static str) {
        let mut index = if abs < 1000.0 {
            0
        } else {
            ((abs.log10() / 3.0).floor() as usize).min(COMPACT_SUFFIXES.len() - 1)
        };
        loop {
            let scaled = abs / 10f64.powi(3 * index as i32);
            if self.rounds_to_at_least(scaled, 1000.0) && index + 1 < COMPACT_SUFFIXES.len() {
                index += 1;
                continue;
            }
            return (self.round(scaled), COMPACT_SUFFIXES[index]);
        }
    }
}

/// Rounds `abs` to `n` significant figures and renders it in positional notation.
fn significant_figures(abs: f64, n: usize) -> String {
    let n = n.max(1) as i32;
    if abs == 0.0 {
        return format!("{:.*}", (n - 1) as usize, 0.0);
    }
    let mut magnitude = abs.log10().floor() as i32;
    loop {
        let decimals = n - 1 - magnitude;
        // Rounding can carry into a new leading digit (9.996 -> 10.00).
        let (rendered, carried) = if decimals >= 0 {
            let rendered = format!("{:.*}", decimals as usize, abs);
            let carried = rendered
                .parse::<f64>()
                .map(|v| v >= 10f64.powi(magnitude + 1))
                .unwrap_or(false);
            (rendered, carried)
        } else {
            // Whole digits come from the rounded mantissa; the float itself
            // would print its binary expansion past 2^53.
            let mantissa = (abs / 10f64.powi(-decimals)).round();
            let rendered = format!("{:.0}{}", mantissa, "0".repeat(-decimals as usize));
            (rendered, mantissa >= 10f64.powi(n))
        };
        if carried {
            magnitude += 1;
            continue;
        }
        return rendered;
    }
}

fn group_integer(int_part: &str, sep: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + (len / 3) * sep.len());
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(sep);
        }
        out.push(ch);
    }
    out
}

/// Wraps an unsigned body with the sign convention in effect.
pub(crate) fn apply_sign(body: String, negative: bool, force_sign: bool, accounting: bool) -> String {
    if negative {
        if accounting {
            format!("({})", body)
        } else {
            format!("-{}", body)
        }
    } else if force_sign {
        format!("+{}", body)
    } else {
        body
    }
}

pub(crate) fn apply_pattern(pattern: &str, body: &str) -> String {
    if pattern == "{x}" {
        body.to_string()
    } else {
        pattern.replace("{x}", body)
    }
}

pub(crate) fn non_finite(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x > 0.0 {
        "Inf".to_string()
    } else {
        "-Inf".to_string()
    }
}

/// Rejects a scaling factor or pattern that cannot produce a number.
pub(crate) fn check_scale_and_pattern(scale_by: f64, pattern: &str) -> Result<(), FormatError> {
    if !scale_by.is_finite() {
        return Err(FormatError::InvalidOption {
            option: "scale_by",
            message: format!("expected a finite factor, got {}", scale_by),
        });
    }
    if !pattern.contains("{x}") {
        return Err(FormatError::InvalidOption {
            option: "pattern",
            message: format!("'{}' has no {{x}} placeholder", pattern),
        });
    }
    Ok(())
}

pub(crate) fn numeric_input(formatter: &'static str, value: &Value) -> Result<f64, FormatError> {
    value.as_f64().ok_or_else(|| FormatError::IncompatibleValue {
        formatter,
        value_type: value.type_name(),
        value: value.to_string(),
    })
}

macro_rules! digit_setters {
    ($target:ident) => {
        /// Number of decimal places.
        pub fn decimals(mut self, decimals: usize) -> Self {
            self.$target.decimals = decimals;
            self
        }

        /// Removes zeros at the end of the fractional part.
        pub fn drop_trailing_zeros(mut self, drop: bool) -> Self {
            self.$target.drop_trailing_zeros = drop;
            self
        }

        /// When false, a decimal mark is kept even with no fractional digits.
        pub fn drop_trailing_dec_mark(mut self, drop: bool) -> Self {
            self.$target.drop_trailing_dec_mark = drop;
            self
        }

        /// Toggles digit grouping separators.
        pub fn use_seps(mut self, use_seps: bool) -> Self {
            self.$target.use_seps = use_seps;
            self
        }

        pub fn sep_mark(mut self, mark: impl Into<String>) -> Self {
            self.$target.sep_mark = Some(mark.into());
            self
        }

        pub fn dec_mark(mut self, mark: impl Into<String>) -> Self {
            self.$target.dec_mark = Some(mark.into());
            self
        }

        /// Uses the separator conventions of `locale`. Fails on unknown identifiers.
        pub fn locale(mut self, locale: &str) -> Result<Self, FormatError> {
            self.$target.locale = Some(Locale::parse(locale)?);
            Ok(self)
        }

        /// Applies `locale` only when no locale was chosen explicitly.
        pub fn fallback_locale(mut self, locale: &Locale) -> Self {
            self.$target.locale.get_or_insert_with(|| locale.clone());
            self
        }
    };
}

/// `fmt_number`: general purpose numeric formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberFormat {
    pub(crate) digits: DigitOptions,
    pub(crate) scale_by: f64,
    pub(crate) pattern: String,
    pub(crate) force_sign: bool,
    pub(crate) accounting: bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            digits: DigitOptions::default(),
            scale_by: 1.0,
            pattern: "{x}".to_string(),
            force_sign: false,
            accounting: false,
        }
    }
}

impl NumberFormat {
    pub fn new() -> Self {
        Self::default()
    }

    digit_setters!(digits);

    /// Rounds to `n` significant figures instead of fixed decimals.
    pub fn n_sigfig(mut self, n: usize) -> Self {
        self.digits.n_sigfig = Some(n);
        self
    }

    /// Suffixes large magnitudes with K, M, B or T.
    pub fn compact(mut self, compact: bool) -> Self {
        self.digits.compact = compact;
        self
    }

    pub fn scale_by(mut self, factor: f64) -> Self {
        self.scale_by = factor;
        self
    }

    /// A template where `{x}` is replaced by the formatted number.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Prefixes positive values with `+`.
    pub fn force_sign(mut self, force: bool) -> Self {
        self.force_sign = force;
        self
    }

    /// Shows negative values in parentheses instead of with a minus sign.
    pub fn accounting(mut self, accounting: bool) -> Self {
        self.accounting = accounting;
        self
    }

    pub fn format_f64(&self, x: f64) -> String {
        let x = x * self.scale_by;
        if !x.is_finite() {
            return apply_pattern(&self.pattern, &non_finite(x));
        }
        self.signed(self.digits.render(x.abs()), x < 0.0)
    }

    /// Formats an integer without passing it through `f64` when no scaling,
    /// compacting or significant-figure rounding applies.
    pub fn format_i64(&self, n: i64) -> String {
        match self.digits.render_exact(n.unsigned_abs()) {
            Some(magnitude) if self.scale_by == 1.0 => self.signed(magnitude, n < 0),
            _ => self.format_f64(n as f64),
        }
    }

    fn signed(&self, magnitude: RenderedMagnitude, negative: bool) -> String {
        let negative = negative && !magnitude.is_zero;
        let body = apply_sign(magnitude.text, negative, self.force_sign && !magnitude.is_zero, self.accounting);
        apply_pattern(&self.pattern, &body)
    }
}

impl ValueFormatter for NumberFormat {
    fn name(&self) -> &'static str {
        "number"
    }

    fn validate(&self) -> Result<(), FormatError> {
        check_scale_and_pattern(self.scale_by, &self.pattern)
    }

    fn format(&self, value: &Value) -> Result<String, FormatError> {
        match value {
            Value::Int(n) => Ok(self.format_i64(*n)),
            other => numeric_input(self.name(), other).map(|x| self.format_f64(x)),
        }
    }
}

/// `fmt_integer`: numbers rounded to whole values.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerFormat {
    inner: NumberFormat,
}

impl Default for IntegerFormat {
    fn default() -> Self {
        Self { inner: NumberFormat::new().decimals(0) }
    }
}

impl IntegerFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn use_seps(mut self, use_seps: bool) -> Self {
        self.inner = self.inner.use_seps(use_seps);
        self
    }

    pub fn sep_mark(mut self, mark: impl Into<String>) -> Self {
        self.inner = self.inner.sep_mark(mark);
        self
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.inner = self.inner.compact(compact);
        self
    }

    pub fn scale_by(mut self, factor: f64) -> Self {
        self.inner = self.inner.scale_by(factor);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.inner = self.inner.pattern(pattern);
        self
    }

    pub fn force_sign(mut self, force: bool) -> Self {
        self.inner = self.inner.force_sign(force);
        self
    }

    pub fn locale(mut self, locale: &str) -> Result<Self, FormatError> {
        self.inner = self.inner.locale(locale)?;
        Ok(self)
    }

    pub fn fallback_locale(mut self, locale: &Locale) -> Self {
        self.inner = self.inner.fallback_locale(locale);
        self
    }

    pub fn format_f64(&self, x: f64) -> String {
        self.inner.format_f64(x)
    }
}

impl ValueFormatter for IntegerFormat {
    fn name(&self) -> &'static str {
        "integer"
    }

    fn validate(&self) -> Result<(), FormatError> {
        self.inner.validate()
    }

    fn format(&self, value: &Value) -> Result<String, FormatError> {
        match value {
            Value::Int(n) => Ok(self.inner.format_i64(*n)),
            other => numeric_input(self.name(), other).map(|x| self.format_f64(x)),
        }
    }
}

/// `fmt_percent`: fractions or percentages with a `%` sign.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentFormat {
    pub(crate) digits: DigitOptions,
    pub(crate) scale_values: bool,
    pub(crate) placement: Placement,
    pub(crate) incl_space: bool,
    pub(crate) pattern: String,
    pub(crate) force_sign: bool,
}

impl Default for PercentFormat {
    fn default() -> Self {
        Self {
            digits: DigitOptions::default(),
            scale_values: true,
            placement: Placement::Right,
            incl_space: false,
            pattern: "{x}".to_string(),
            force_sign: false,
        }
    }
}

impl PercentFormat {
    pub fn new() -> Self {
        Self::default()
    }

    digit_setters!(digits);

    /// When true (the default) values are multiplied by 100 first.
    pub fn scale_values(mut self, scale: bool) -> Self {
        self.scale_values = scale;
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Puts a space between the number and the `%` sign.
    pub fn incl_space(mut self, incl_space: bool) -> Self {
        self.incl_space = incl_space;
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn force_sign(mut self, force: bool) -> Self {
        self.force_sign = force;
        self
    }

    pub fn format_f64(&self, x: f64) -> String {
        let x = if self.scale_values { x * 100.0 } else { x };
        if !x.is_finite() {
            return apply_pattern(&self.pattern, &non_finite(x));
        }
        let magnitude = self.digits.render(x.abs());
        let space = if self.incl_space { " " } else { "" };
        let with_symbol = match self.placement {
            Placement::Right => format!("{}{}%", magnitude.text, space),
            Placement::Left => format!("%{}{}", space, magnitude.text),
        };
        let negative = x < 0.0 && !magnitude.is_zero;
        let body = apply_sign(with_symbol, negative, self.force_sign && !magnitude.is_zero, false);
        apply_pattern(&self.pattern, &body)
    }
}

impl ValueFormatter for PercentFormat {
    fn name(&self) -> &'static str {
        "percent"
    }

    fn validate(&self) -> Result<(), FormatError> {
        check_scale_and_pattern(1.0, &self.pattern)
    }

    fn format(&self, value: &Value) -> Result<String, FormatError> {
        numeric_input(self.name(), value).map(|x| self.format_f64(x))
    }
}

/// Exponent notation used by [`ScientificFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExpStyle {
    /// `1.23 × 10^4`
    #[default]
    TimesTen,
    /// `1.23e4`
    LowerE,
    /// `1.23E4`
    UpperE,
}

/// `fmt_scientific`: mantissa and power-of-ten exponent.
#[derive(Debug, Clone, PartialEq)]
pub struct ScientificFormat {
    pub(crate) digits: DigitOptions,
    pub(crate) exp_style: ExpStyle,
    pub(crate) scale_by: f64,
    pub(crate) pattern: String,
    pub(crate) force_sign: bool,
}

impl Default for ScientificFormat {
    fn default() -> Self {
        Self {
            digits: DigitOptions { use_seps: false, ..DigitOptions::default() },
            exp_style: ExpStyle::default(),
            scale_by: 1.0,
            pattern: "{x}".to_string(),
            force_sign: false,
        }
    }
}

impl ScientificFormat {
    pub fn new() -> Self {
        Self::default()
    }

    digit_setters!(digits);

    /// Rounds the mantissa to `n` significant figures instead of fixed decimals.
    pub fn n_sigfig(mut self, n: usize) -> Self {
        self.digits.n_sigfig = Some(n);
        self
    }

    pub fn exp_style(mut self, style: ExpStyle) -> Self {
        self.exp_style = style;
        self
    }

    pub fn scale_by(mut self, factor: f64) -> Self {
        self.scale_by = factor;
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn force_sign(mut self, force: bool) -> Self {
        self.force_sign = force;
        self
    }

    pub fn format_f64(&self, x: f64) -> String {
        let x = x * self.scale_by;
        if !x.is_finite() {
            return apply_pattern(&self.pattern, &non_finite(x));
        }
        let abs = x.abs();
        let mut exponent = if abs == 0.0 { 0 } else { abs.log10().floor() as i32 };
        // Mantissa rounding may reach 10 (9.999 -> 10.00): renormalise once.
        if abs != 0.0 && self.digits.rounds_to_at_least(abs / 10f64.powi(exponent), 10.0) {
            exponent += 1;
        }
        let magnitude = self.digits.render(abs / 10f64.powi(exponent));
        let body = if exponent == 0 {
            magnitude.text
        } else {
            match self.exp_style {
                ExpStyle::TimesTen => format!("{} \u{d7} 10^{}", magnitude.text, exponent),
                ExpStyle::LowerE => format!("{}e{}", magnitude.text, exponent),
                ExpStyle::UpperE => format!("{}E{}", magnitude.text, exponent),
            }
        };
        let negative = x < 0.0 && !magnitude.is_zero;
        let body = apply_sign(body, negative, self.force_sign && !magnitude.is_zero, false);
        apply_pattern(&self.pattern, &body)
    }
}

impl ValueFormatter for ScientificFormat {
    fn name(&self) -> &'static str {
        "scientific"
    }

    fn validate(&self) -> Result<(), FormatError> {
        check_scale_and_pattern(self.scale_by, &self.pattern)
    }

    fn format(&self, value: &Value) -> Result<String, FormatError> {
        numeric_input(self.name(), value).map(|x| self.format_f64(x))
    }
}
