//! # Faultline
//!
//! Structured error values that carry an id, operations, a kind, a severity
//! and diagnostic context, plus a flattening multi-error and pluggable
//! rendering.
//!
//! ## Overview
//!
//! An [`ErrorValue`] is an immutable record built from option functions or
//! builder methods. Several errors combine into an [`Aggregate`], which is
//! always flat: combining aggregates splices their children together.
//! Rendering goes through a [`Marshaller`] ([`StringMarshaller`] or
//! [`JsonMarshaller`]), messages can be translated through a [`Localizer`],
//! and [`log`] dispatches to a [`Logger`] by severity.
//!
//! ## Core Types
//!
//! - [`ErrorValue`]: a single structured error
//! - [`Aggregate`]: an ordered, flattened collection of error values
//! - [`ErrorNode`]: either of the two, for code that accepts both
//! - [`Config`]: the marshaller, translator and logger used at call sites
//!
//! ## Example
//!
//! ```rust
//! use faultline::{combine, find_by_id, set_context, set_id, set_msg, set_operation, ErrorValue};
//!
//! let err = ErrorValue::new_with([
//!     set_operation("write"),
//!     set_context([("hello", "world")]),
//!     set_msg("connection error"),
//! ]);
//! assert_eq!(err.to_string(), "[write] <hello:world> -- connection error");
//!
//! let agg = combine([
//!     Some(ErrorValue::new("one")),
//!     None,
//!     Some(ErrorValue::new_with([set_id("two"), set_msg("two")])),
//! ]);
//! assert_eq!(agg.to_string(), "the following errors occurred:\n\t#1 one\n\t#2 two\n");
//! assert_eq!(find_by_id(&agg, "two").map(|e| e.msg()), Some("two"));
//! ```

pub mod attribute;
pub mod config;
pub mod context;
pub mod error;
pub mod kind;
pub mod log;
pub mod lookup;
pub mod marshal;
pub mod severity;
pub mod translate;
pub mod validation;

pub use attribute::Attribute;
pub use config::{Config, ConfigError};
pub use context::Context;
pub use error::{
    append_context, append_operations, combine, combine_with_log, set_caller, set_context, set_id,
    set_kind, set_localizer, set_marshaller, set_msg, set_operation, set_operations, set_severity,
    set_translate_context, wrap, wrap_with_log, Aggregate, ErrorNode, ErrorOption, ErrorValue,
    IntoNode, MaybeError, NodeRef,
};
pub use kind::ErrorKind;
pub use log::{log, severity_of, ChainLogger, LogRecord, Logger, RecordingLogger, TracingLogger};
pub use lookup::{cast, contains_by_id, error_or_nil, find_by_id, get_id, get_kind};
pub use marshal::{JsonMarshaller, MarshalError, Marshaller, StringMarshaller};
pub use severity::{Severity, SeverityParseError};
pub use translate::{LocalizeConfig, LocalizeError, Localizer, TranslateContext, Translator};
pub use validation::{accumulate, Outcome};
