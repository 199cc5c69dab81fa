//! Lookup helpers over arbitrary errors.
//!
//! These functions accept any `&(dyn Error + 'static)` and look inside
//! [`ErrorValue`]s, [`Aggregate`](crate::Aggregate)s and
//! [`ErrorNode`](crate::ErrorNode)s. Other error types never match.

use std::error::Error;

use crate::error::{ErrorValue, NodeRef};
use crate::kind::ErrorKind;
use crate::log::node_of;

/// Returns the leaf behind `err` when it is a single error value.
fn leaf_of<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a ErrorValue> {
    match node_of(err)? {
        NodeRef::Leaf(value) => Some(value),
        NodeRef::Group(_) => None,
    }
}

/// Returns the first error value with exactly this id.
///
/// A single value matches if its own id is `id`; an aggregate is scanned in
/// order and the first match wins.
///
/// # Example
///
/// ```rust
/// use faultline::{combine, find_by_id, ErrorValue};
///
/// let agg = combine([
///     ErrorValue::new("first").with_id("a"),
///     ErrorValue::new("second").with_id("b"),
/// ]);
///
/// assert_eq!(find_by_id(&agg, "b").map(|e| e.msg()), Some("second"));
/// assert!(find_by_id(&agg, "c").is_none());
/// ```
pub fn find_by_id<'a>(err: &'a (dyn Error + 'static), id: &str) -> Option<&'a ErrorValue> {
    node_of(err)?.find_by_id(id)
}

/// Returns true if `err` is or contains an error value with this id.
pub fn contains_by_id(err: &(dyn Error + 'static), id: &str) -> bool {
    find_by_id(err, id).is_some()
}

/// Filters out warnings.
///
/// Returns `None` for a warning and for an aggregate holding only warnings.
/// An aggregate with a real failure yields its first non-warning child.
/// Every other error, including foreign ones, is returned unchanged.
///
/// # Example
///
/// ```rust
/// use faultline::{combine, error_or_nil, ErrorValue, Severity};
///
/// let warn = ErrorValue::new("careful").with_severity(Severity::Warn);
/// let fail = ErrorValue::new("broken");
///
/// assert!(error_or_nil(&warn).is_none());
/// assert!(error_or_nil(&combine([warn.clone(), warn.clone()])).is_none());
///
/// let agg = combine([warn, fail]);
/// assert_eq!(error_or_nil(&agg).map(|e| e.to_string()), Some("broken".to_string()));
/// ```
pub fn error_or_nil<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a (dyn Error + 'static)> {
    match node_of(err) {
        None => Some(err),
        Some(node) => node.error_or_nil().map(|v| v as &(dyn Error + 'static)),
    }
}

/// Converts any error into an error value.
///
/// Error values are cloned and aggregates yield their first child. Any other
/// error, or an empty aggregate, becomes a value carrying its rendered text.
pub fn cast(err: &(dyn Error + 'static)) -> ErrorValue {
    match node_of(err).and_then(|node| node.leaves().first()) {
        Some(value) => value.clone(),
        None => ErrorValue::from_error(err),
    }
}

/// Returns the id of a single error value, or `""`.
pub fn get_id<'a>(err: &'a (dyn Error + 'static)) -> &'a str {
    leaf_of(err).map_or("", ErrorValue::id)
}

/// Returns the kind of a single error value, or [`ErrorKind::Unknown`].
pub fn get_kind(err: &(dyn Error + 'static)) -> ErrorKind {
    leaf_of(err).map(|e| e.kind().clone()).unwrap_or_default()
}
