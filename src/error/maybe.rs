//! Nil-safe access to possibly absent error values.

use std::borrow::Cow;

use crate::context::Context;
use crate::error::options::ErrorOption;
use crate::error::value::ErrorValue;
use crate::kind::ErrorKind;
use crate::severity::Severity;

/// Getters and derivation on an error value that may be absent.
///
/// Every method on `None` returns a zero value instead of failing, so
/// callers can chain on optional errors without checking first.
///
/// # Example
///
/// ```rust
/// use faultline::{set_msg, ErrorValue, MaybeError};
///
/// let none: Option<ErrorValue> = None;
/// assert_eq!(none.id(), "");
/// assert!(none.with_options([set_msg("ignored")]).is_none());
///
/// let some = Some(ErrorValue::new("boom"));
/// assert_eq!(some.with_options([set_msg("bang")]).msg(), "bang");
/// ```
pub trait MaybeError {
    /// Returns the error value, if present.
    fn as_error_value(&self) -> Option<&ErrorValue>;

    /// Returns the id, or `""`.
    fn id(&self) -> &str {
        self.as_error_value().map_or("", ErrorValue::id)
    }

    /// Returns the raw message, or `""`.
    fn msg(&self) -> &str {
        self.as_error_value().map_or("", ErrorValue::msg)
    }

    /// Returns the operations, or an empty slice.
    fn operations(&self) -> &[crate::Attribute] {
        self.as_error_value()
            .map(ErrorValue::operations)
            .unwrap_or(&[])
    }

    /// Returns the kind, or [`ErrorKind::Unknown`].
    fn kind(&self) -> ErrorKind {
        self.as_error_value()
            .map(|e| e.kind().clone())
            .unwrap_or_default()
    }

    /// Returns the severity, or [`Severity::Unknown`].
    fn severity(&self) -> Severity {
        self.as_error_value()
            .map(ErrorValue::severity)
            .unwrap_or_default()
    }

    /// Returns the context, or an empty one.
    fn context(&self) -> Context {
        self.as_error_value()
            .map(|e| e.context().clone())
            .unwrap_or_default()
    }

    /// Returns the translated message, or `""`.
    fn translate_msg(&self) -> Cow<'_, str> {
        self.as_error_value()
            .map_or(Cow::Borrowed(""), ErrorValue::translate_msg)
    }

    /// Returns a derived copy with `options` applied, or `None`.
    fn with_options(&self, options: impl IntoIterator<Item = ErrorOption>) -> Option<ErrorValue> {
        self.as_error_value().map(|e| e.with_options(options))
    }

    /// Returns the value unless it is absent or a warning.
    fn error_or_nil(&self) -> Option<&ErrorValue> {
        self.as_error_value().and_then(ErrorValue::error_or_nil)
    }
}

impl MaybeError for Option<ErrorValue> {
    fn as_error_value(&self) -> Option<&ErrorValue> {
        self.as_ref()
    }
}

impl MaybeError for Option<&ErrorValue> {
    fn as_error_value(&self) -> Option<&ErrorValue> {
        *self
    }
}
