//! Locale conventions for number rendering.
use crate::error::FormatError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Separator and currency conventions for a language/region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub id: String,
    pub decimal_mark: String,
    pub group_separator: String,
    pub currency: String,
}

/// (id, decimal mark, grouping separator, default currency)
const LOCALES: &[(&str, &str, &str, &str)] = &[
    ("en", ".", ",", "USD"),
    ("en-US", ".", ",", "USD"),
    ("en-GB", ".", ",", "GBP"),
    ("en-CA", ".", ",", "CAD"),
    ("en-AU", ".", ",", "AUD"),
    ("en-IN", ".", ",", "INR"),
    ("de", ",", ".", "EUR"),
    ("de-DE", ",", ".", "EUR"),
    ("de-AT", ",", "\u{a0}", "EUR"),
    ("de-CH", ".", "\u{2019}", "CHF"),
    ("fr", ",", "\u{202f}", "EUR"),
    ("fr-FR", ",", "\u{202f}", "EUR"),
    ("fr-CA", ",", "\u{a0}", "CAD"),
    ("fr-CH", ",", "\u{202f}", "CHF"),
    ("es", ",", ".", "EUR"),
    ("es-ES", ",", ".", "EUR"),
    ("es-MX", ".", ",", "MXN"),
    ("it", ",", ".", "EUR"),
    ("nl", ",", ".", "EUR"),
    ("pt", ",", "\u{a0}", "EUR"),
    ("pt-BR", ",", ".", "BRL"),
    ("sv", ",", "\u{a0}", "SEK"),
    ("nb", ",", "\u{a0}", "NOK"),
    ("da", ",", ".", "DKK"),
    ("fi", ",", "\u{a0}", "EUR"),
    ("pl", ",", "\u{a0}", "PLN"),
    ("ru", ",", "\u{a0}", "RUB"),
    ("ja", ".", ",", "JPY"),
    ("zh", ".", ",", "CNY"),
    ("ko", ".", ",", "KRW"),
    ("hi", ".", ",", "INR"),
];

impl Locale {
    /// Resolves a locale identifier. Exact matches win; otherwise the
    /// language part (`"de"` for `"de-LU"`) is tried.
    pub fn parse(id: &str) -> Result<Self, FormatError> {
        let normalized = id.trim().replace('_', "-");
        let found = LOCALES
            .iter()
            .find(|(code, ..)| code.eq_ignore_ascii_case(&normalized))
            .or_else(|| {
                let language = normalized.split('-').next().unwrap_or_default();
                let fallback = LOCALES.iter().find(|(code, ..)| code.eq_ignore_ascii_case(language));
                if let Some((code, ..)) = fallback {
                    log::debug!("Locale '{}' resolved through language fallback '{}'", id, code);
                }
                fallback
            });
        match found {
            Some((code, dec, sep, currency)) => Ok(Locale {
                id: code.to_string(),
                decimal_mark: dec.to_string(),
                group_separator: sep.to_string(),
                currency: currency.to_string(),
            }),
            None => Err(FormatError::UnknownLocale(id.to_string())),
        }
    }

    pub fn known_ids() -> impl Iterator<Item = &'static str> {
        LOCALES.iter().map(|(code, ..)| *code)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale {
            id: "en".to_string(),
            decimal_mark: ".".to_string(),
            group_separator: ",".to_string(),
            currency: "USD".to_string(),
        }
    }
}

impl FromStr for Locale {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_and_language_fallback() {
        let de = Locale::parse("de").unwrap();
        assert_eq!(de.decimal_mark, ",");
        assert_eq!(de.group_separator, ".");

        let lu = Locale::parse("de_LU").unwrap();
        assert_eq!(lu.id, "de");

        let br = Locale::parse("pt-br").unwrap();
        assert_eq!(br.currency, "BRL");
    }

    #[test]
    fn test_unknown_locale() {
        assert_eq!(
            Locale::parse("xx-YY"),
            Err(FormatError::UnknownLocale("xx-YY".to_string()))
        );
    }
}
