//! Option functions for building and deriving error values.
//!
//! Each function returns an [`ErrorOption`], a deferred mutation applied to
//! a draft value by [`ErrorValue::new_with`] or
//! [`ErrorValue::with_options`]. Options never fail.

use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use serde_json::Value;

use crate::attribute::Attribute;
use crate::context::Context;
use crate::error::value::ErrorValue;
use crate::kind::ErrorKind;
use crate::marshal::Marshaller;
use crate::severity::Severity;
use crate::translate::{Localizer, TranslateContext};

/// A deferred mutation of an [`ErrorValue`] draft.
///
/// # Example
///
/// ```rust
/// use faultline::{ErrorOption, ErrorValue};
///
/// let shout = ErrorOption::new(|e| {
///     let loud = e.msg().to_uppercase();
///     *e = e.clone().with_msg(loud);
/// });
///
/// let err = ErrorValue::new("quiet").with_options([shout]);
/// assert_eq!(err.msg(), "QUIET");
/// ```
pub struct ErrorOption(Box<dyn FnOnce(&mut ErrorValue) + Send>);

impl ErrorOption {
    /// Wraps a closure as an option.
    pub fn new(f: impl FnOnce(&mut ErrorValue) + Send + 'static) -> Self {
        Self(Box::new(f))
    }

    /// Applies the option to `err`.
    pub fn apply(self, err: &mut ErrorValue) {
        (self.0)(err)
    }
}

impl fmt::Debug for ErrorOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorOption")
    }
}

/// Sets the id.
pub fn set_id(id: impl Into<Attribute>) -> ErrorOption {
    let id = id.into();
    ErrorOption::new(move |e| e.id = id)
}

/// Sets the message.
pub fn set_msg(msg: impl Into<Attribute>) -> ErrorOption {
    let msg = msg.into();
    ErrorOption::new(move |e| e.msg = msg)
}

/// Replaces the operations with a single operation.
pub fn set_operation(operation: impl Into<Attribute>) -> ErrorOption {
    let operation = operation.into();
    ErrorOption::new(move |e| e.operations = Arc::new(vec![operation]))
}

/// Replaces the operations.
pub fn set_operations<I, A>(operations: I) -> ErrorOption
where
    I: IntoIterator<Item = A>,
    A: Into<Attribute>,
{
    let operations: Vec<Attribute> = operations.into_iter().map(Into::into).collect();
    ErrorOption::new(move |e| e.operations = Arc::new(operations))
}

/// Appends operations to the existing ones.
pub fn append_operations<I, A>(operations: I) -> ErrorOption
where
    I: IntoIterator<Item = A>,
    A: Into<Attribute>,
{
    let operations: Vec<Attribute> = operations.into_iter().map(Into::into).collect();
    ErrorOption::new(move |e| {
        if !operations.is_empty() {
            Arc::make_mut(&mut e.operations).extend(operations);
        }
    })
}

/// Sets the kind.
pub fn set_kind(kind: impl Into<ErrorKind>) -> ErrorOption {
    let kind = kind.into();
    ErrorOption::new(move |e| e.kind = kind)
}

/// Sets the severity.
pub fn set_severity(severity: Severity) -> ErrorOption {
    ErrorOption::new(move |e| e.severity = severity)
}

/// Replaces the whole context.
pub fn set_context(context: impl Into<Context>) -> ErrorOption {
    let context = context.into();
    ErrorOption::new(move |e| e.context = context)
}

/// Inserts one context entry, creating the context on first use.
pub fn append_context(key: impl Into<String>, value: impl Into<Value>) -> ErrorOption {
    let key = key.into();
    let value = value.into();
    ErrorOption::new(move |e| e.context.insert(key, value))
}

/// Records the source location of the `set_caller()` call.
#[track_caller]
pub fn set_caller() -> ErrorOption {
    let caller = Location::caller();
    ErrorOption::new(move |e| e.caller = Some(caller))
}

/// Binds a localizer used instead of the configured fallback.
pub fn set_localizer(localizer: Arc<dyn Localizer>) -> ErrorOption {
    ErrorOption::new(move |e| e.localizer = Some(localizer))
}

/// Sets the translation context.
pub fn set_translate_context(tctx: TranslateContext) -> ErrorOption {
    let tctx = Arc::new(tctx);
    ErrorOption::new(move |e| e.translate_context = Some(tctx))
}

/// Sets a marshaller used instead of the configured default.
pub fn set_marshaller(marshaller: Arc<dyn Marshaller>) -> ErrorOption {
    ErrorOption::new(move |e| e.marshaller = Some(marshaller))
}
