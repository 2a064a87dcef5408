use thiserror::Error;

/// Errors raised while configuring or applying a formatter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Unknown {kind} style '{name}'")]
    UnknownStyle { kind: &'static str, name: String },

    #[error("Unknown locale '{0}'")]
    UnknownLocale(String),

    #[error("Unknown currency code '{0}'")]
    UnknownCurrency(String),

    #[error("Formatter '{formatter}' cannot format {value_type} value '{value}'")]
    IncompatibleValue {
        formatter: &'static str,
        value_type: &'static str,
        value: String,
    },

    #[error("Invalid option '{option}': {message}")]
    InvalidOption { option: &'static str, message: String },

    #[error("{0}")]
    Custom(String),
}
