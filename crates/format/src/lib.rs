//! # tablekit-format
//!
//! Pure value formatters. Each formatter turns a raw [`Value`] into a display
//! string without touching the table it came from:
//! - **number**: fixed/significant precision, grouping, scaling, compact suffixes
//! - **currency**: symbol placement and per-currency subunit precision
//! - **datetime**: named date and time presets
//! - **locale**: decimal mark, grouping separator and default currency per locale

pub mod currency;
pub mod datetime;
pub mod error;
pub mod formatter;
pub mod locale;
pub mod number;

pub use tablekit_types::Value;

pub use currency::{Currency, CurrencyFormat};
pub use datetime::{DateFormat, DateStyle, DateTimeFormat, TimeFormat, TimeStyle};
pub use error::FormatError;
pub use formatter::{FnFormatter, Formatter, ValueFormatter};
pub use locale::Locale;
pub use number::{
    ExpStyle, IntegerFormat, NumberFormat, PercentFormat, Placement, ScientificFormat,
};
