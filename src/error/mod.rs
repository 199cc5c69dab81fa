//! Error value types.
//!
//! This module provides the structured leaf [`ErrorValue`], the option
//! functions used to build and derive it, the flattening [`Aggregate`], and
//! [`ErrorNode`] for code that handles either.

mod aggregate;
mod maybe;
mod node;
mod options;
mod value;

pub use aggregate::{combine, combine_with_log, wrap, wrap_with_log, Aggregate};
pub use maybe::MaybeError;
pub use node::{ErrorNode, IntoNode, NodeRef};
pub(crate) use node::write_raw;
pub use options::{
    append_context, append_operations, set_caller, set_context, set_id, set_kind, set_localizer,
    set_marshaller, set_msg, set_operation, set_operations, set_severity, set_translate_context,
    ErrorOption,
};
pub use value::ErrorValue;
