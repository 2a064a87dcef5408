//! The formatter abstraction shared by built-in and user-supplied formatters.
use crate::error::FormatError;
use std::fmt;
use std::sync::Arc;
use tablekit_types::Value;

/// Turns a raw cell value into display text.
///
/// Implementations must be pure: the same value always yields the same
/// output and nothing outside the return value is touched.
pub trait ValueFormatter: Send + Sync + fmt::Debug {
    /// Short identifier used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Checks options that can be rejected before any value is seen.
    fn validate(&self) -> Result<(), FormatError> {
        Ok(())
    }

    fn format(&self, value: &Value) -> Result<String, FormatError>;
}

/// Shared, type-erased formatter as stored in formatting directives.
pub type Formatter = Arc<dyn ValueFormatter>;

type FormatFn = dyn Fn(&Value) -> Result<String, FormatError> + Send + Sync;

/// Adapts a closure into a [`ValueFormatter`].
#[derive(Clone)]
pub struct FnFormatter {
    f: Arc<FormatFn>,
}

impl FnFormatter {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<String, FormatError> + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// A closure that cannot fail.
    pub fn infallible<F>(f: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Self::new(move |v| Ok(f(v)))
    }
}

impl fmt::Debug for FnFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnFormatter")
    }
}

impl ValueFormatter for FnFormatter {
    fn name(&self) -> &'static str {
        "custom"
    }

    fn format(&self, value: &Value) -> Result<String, FormatError> {
        (self.f)(value)
    }
}
