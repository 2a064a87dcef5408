//! `fmt_currency`: monetary values with a currency symbol.
use crate::error::FormatError;
use crate::formatter::ValueFormatter;
use crate::locale::Locale;
use crate::number::{
    apply_pattern, apply_sign, check_scale_and_pattern, non_finite, numeric_input, DigitOptions, Placement,
};
use tablekit_types::Value;

/// (code, symbol, subunit decimals)
const CURRENCIES: &[(&str, &str, usize)] = &[
    ("USD", "$", 2),
    ("EUR", "\u{20ac}", 2),
    ("GBP", "\u{a3}", 2),
    ("JPY", "\u{a5}", 0),
    ("CNY", "\u{a5}", 2),
    ("INR", "\u{20b9}", 2),
    ("KRW", "\u{20a9}", 0),
    ("CHF", "CHF", 2),
    ("CAD", "CA$", 2),
    ("AUD", "A$", 2),
    ("MXN", "MX$", 2),
    ("BRL", "R$", 2),
    ("SEK", "kr", 2),
    ("NOK", "kr", 2),
    ("DKK", "kr", 2),
    ("PLN", "z\u{142}", 2),
    ("RUB", "\u{20bd}", 2),
    ("BTC", "\u{20bf}", 8),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
    pub decimals: usize,
}

impl Currency {
    /// Looks up an ISO 4217 code (case-insensitive).
    pub fn from_code(code: &str) -> Result<Self, FormatError> {
        CURRENCIES
            .iter()
            .find(|(c, ..)| c.eq_ignore_ascii_case(code.trim()))
            .map(|(c, symbol, decimals)| Currency {
                code: c.to_string(),
                symbol: symbol.to_string(),
                decimals: *decimals,
            })
            .ok_or_else(|| FormatError::UnknownCurrency(code.to_string()))
    }

    /// A currency not in the built-in table.
    pub fn custom(symbol: impl Into<String>, decimals: usize) -> Self {
        let symbol = symbol.into();
        Currency { code: symbol.clone(), symbol, decimals }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyFormat {
    currency: Currency,
    digits: DigitOptions,
    explicit_decimals: bool,
    use_subunits: bool,
    scale_by: f64,
    placement: Placement,
    incl_space: bool,
    pattern: String,
    force_sign: bool,
    accounting: bool,
}

impl CurrencyFormat {
    /// Formatter for the given ISO currency code, e.g. `"USD"`.
    pub fn new(code: &str) -> Result<Self, FormatError> {
        Ok(Self::with_currency(Currency::from_code(code)?))
    }

    pub fn with_currency(currency: Currency) -> Self {
        Self {
            digits: DigitOptions { decimals: currency.decimals, ..DigitOptions::default() },
            currency,
            explicit_decimals: false,
            use_subunits: true,
            scale_by: 1.0,
            placement: Placement::Left,
            incl_space: false,
            pattern: "{x}".to_string(),
            force_sign: false,
            accounting: false,
        }
    }

    /// Uses the locale's default currency and separators. The symbol goes on
    /// the right, space separated, when the locale uses `,` as decimal mark.
    pub fn for_locale(locale: &str) -> Result<Self, FormatError> {
        let locale = Locale::parse(locale)?;
        let mut fmt = Self::new(&locale.currency)?;
        if locale.decimal_mark == "," {
            fmt.placement = Placement::Right;
            fmt.incl_space = true;
        }
        fmt.digits.locale = Some(locale);
        Ok(fmt)
    }

    pub fn decimals(mut self, decimals: usize) -> Self {
        self.digits.decimals = decimals;
        self.explicit_decimals = true;
        self
    }

    /// When false, values are rounded to whole currency units.
    pub fn use_subunits(mut self, use_subunits: bool) -> Self {
        self.use_subunits = use_subunits;
        self
    }

    pub fn drop_trailing_zeros(mut self, drop: bool) -> Self {
        self.digits.drop_trailing_zeros = drop;
        self
    }

    pub fn use_seps(mut self, use_seps: bool) -> Self {
        self.digits.use_seps = use_seps;
        self
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.digits.compact = compact;
        self
    }

    pub fn scale_by(mut self, factor: f64) -> Self {
        self.scale_by = factor;
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

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

    pub fn accounting(mut self, accounting: bool) -> Self {
        self.accounting = accounting;
        self
    }

    pub fn sep_mark(mut self, mark: impl Into<String>) -> Self {
        self.digits.sep_mark = Some(mark.into());
        self
    }

    pub fn dec_mark(mut self, mark: impl Into<String>) -> Self {
        self.digits.dec_mark = Some(mark.into());
        self
    }

    /// Separator conventions of `locale`; the currency itself is unchanged.
    pub fn locale(mut self, locale: &str) -> Result<Self, FormatError> {
        self.digits.locale = Some(Locale::parse(locale)?);
        Ok(self)
    }

    /// Separator conventions of `locale` when none were set. The currency
    /// itself is left alone.
    pub fn fallback_locale(mut self, locale: &Locale) -> Self {
        self.digits.locale.get_or_insert_with(|| locale.clone());
        self
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn format_f64(&self, x: f64) -> String {
        let x = x * self.scale_by;
        if !x.is_finite() {
            return apply_pattern(&self.pattern, &non_finite(x));
        }
        let digits = if !self.use_subunits && !self.explicit_decimals {
            DigitOptions { decimals: 0, ..self.digits.clone() }
        } else {
            self.digits.clone()
        };
        let magnitude = digits.render(x.abs());
        let space = if self.incl_space { " " } else { "" };
        let with_symbol = match self.placement {
            Placement::Left => format!("{}{}{}", self.currency.symbol, space, magnitude.text),
            Placement::Right => format!("{}{}{}", magnitude.text, space, self.currency.symbol),
        };
        let negative = x < 0.0 && !magnitude.is_zero;
        let body = apply_sign(with_symbol, negative, self.force_sign && !magnitude.is_zero, self.accounting);
        apply_pattern(&self.pattern, &body)
    }
}

impl ValueFormatter for CurrencyFormat {
    fn name(&self) -> &'static str {
        "currency"
    }

    fn validate(&self) -> Result<(), FormatError> {
        check_scale_and_pattern(self.scale_by, &self.pattern)
    }

    fn format(&self, value: &Value) -> Result<String, FormatError> {
        numeric_input(self.name(), value).map(|x| self.format_f64(x))
    }
}
