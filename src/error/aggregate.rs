//! Flattened multi-error aggregation.
//!
//! This module provides [`Aggregate`], an ordered, immutable collection of
//! error values, and the [`combine`] and [`wrap`] constructors. Flattening
//! happens once at construction, so an aggregate never contains another
//! aggregate.

use std::error::Error;
use std::fmt::{self, Display};
use std::sync::Arc;

use stillwater::prelude::*;

use crate::config::{self, Config};
use crate::error::node::{fmt_json, fmt_with, ErrorNode, IntoNode, NodeRef};
use crate::error::value::ErrorValue;

/// An ordered, flattened collection of error values.
///
/// `Aggregate` is cheap to clone and never changes after construction;
/// [`append`](Self::append) returns a new aggregate.
///
/// # Combining Errors
///
/// ```rust
/// use faultline::{combine, ErrorValue};
///
/// let inner = combine([ErrorValue::new("a"), ErrorValue::new("b")]);
/// let outer = faultline::combine!(inner, None::<ErrorValue>, ErrorValue::new("c"));
///
/// let msgs: Vec<_> = outer.iter().map(|e| e.msg()).collect();
/// assert_eq!(msgs, vec!["a", "b", "c"]);
/// ```
///
/// `Aggregate` also implements stillwater's `Semigroup`:
///
/// ```rust
/// use faultline::{combine, ErrorValue};
/// use stillwater::prelude::*;
///
/// let left = combine([ErrorValue::new("one")]);
/// let right = combine([ErrorValue::new("two")]);
/// assert_eq!(left.combine(right).len(), 2);
/// ```
#[derive(Clone, PartialEq)]
pub struct Aggregate {
    errors: Arc<[ErrorValue]>,
}

impl Aggregate {
    /// Creates an empty aggregate.
    pub fn new() -> Self {
        Self {
            errors: Arc::from(Vec::new()),
        }
    }

    /// Builds an aggregate from error inputs, dropping `None` entries and
    /// splicing in the children of nested aggregates.
    pub fn from_nodes<I>(errors: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoNode,
    {
        let mut flat = Vec::new();
        for node in errors.into_iter().filter_map(IntoNode::into_node) {
            match node {
                ErrorNode::Leaf(err) => flat.push(err),
                ErrorNode::Group(agg) => flat.extend(agg.iter().cloned()),
            }
        }
        Self {
            errors: Arc::from(flat),
        }
    }

    /// Returns a new aggregate with `err` flattened onto the end.
    pub fn append(&self, err: impl IntoNode) -> Self {
        match err.into_node() {
            None => self.clone(),
            Some(node) => Self::from_nodes([ErrorNode::Group(self.clone()), node]),
        }
    }

    /// Returns the number of contained errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if the aggregate holds no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns an iterator over the contained errors in order.
    pub fn iter(&self) -> impl Iterator<Item = &ErrorValue> {
        self.errors.iter()
    }

    /// Returns the contained errors as a slice.
    pub fn as_slice(&self) -> &[ErrorValue] {
        &self.errors
    }

    /// Returns an owned copy of the contained errors.
    pub fn errors(&self) -> Vec<ErrorValue> {
        self.errors.to_vec()
    }

    /// Returns the oldest error.
    pub fn first(&self) -> Option<&ErrorValue> {
        self.errors.first()
    }

    /// Returns the newest error.
    pub fn last(&self) -> Option<&ErrorValue> {
        self.errors.last()
    }

    /// Returns the first error with exactly this id.
    pub fn find_by_id(&self, id: &str) -> Option<&ErrorValue> {
        NodeRef::Group(self).find_by_id(id)
    }

    /// Returns true if any error has exactly this id.
    pub fn contains_by_id(&self, id: &str) -> bool {
        NodeRef::Group(self).contains_by_id(id)
    }

    /// Returns the first error that is not a warning, or `None` when every
    /// error is a warning.
    pub fn error_or_nil(&self) -> Option<&ErrorValue> {
        NodeRef::Group(self).error_or_nil()
    }

    /// Returns true if `target` is one of the contained errors.
    ///
    /// To compare against a whole aggregate use `==`.
    pub fn is(&self, target: &ErrorValue) -> bool {
        NodeRef::Group(self).is(target)
    }

    /// Renders this aggregate with `config`.
    pub fn render(&self, config: &Config) -> String {
        config.render(self)
    }

    /// Logs this aggregate through `config`'s logger.
    pub fn log(&self, config: &Config) {
        config.log(self);
    }
}

impl Default for Aggregate {
    fn default() -> Self {
        Self::new()
    }
}

/// Combines errors into one flattened aggregate.
///
/// `None` inputs are dropped and nested aggregates are spliced in, so
/// `combine([combine([a, b]), combine([c, d])])` holds exactly `a, b, c, d`.
///
/// # Example
///
/// ```rust
/// use faultline::{combine, ErrorValue};
///
/// let agg = combine([Some(ErrorValue::new("one")), None, Some(ErrorValue::new("two"))]);
/// assert_eq!(agg.len(), 2);
/// assert_eq!(
///     agg.to_string(),
///     "the following errors occurred:\n\t#1 one\n\t#2 two\n"
/// );
/// ```
pub fn combine<I>(errors: I) -> Aggregate
where
    I: IntoIterator,
    I::Item: IntoNode,
{
    Aggregate::from_nodes(errors)
}

/// Combines two errors.
///
/// If either side is `None` the other side is returned unchanged, never
/// wrapped in an aggregate of one. Two `None`s yield `None`.
///
/// # Example
///
/// ```rust
/// use faultline::{wrap, ErrorNode, ErrorValue};
///
/// let err = ErrorValue::new("x");
/// assert_eq!(wrap(None::<ErrorValue>, err.clone()), Some(ErrorNode::Leaf(err.clone())));
/// assert_eq!(wrap(err.clone(), None::<ErrorValue>), Some(ErrorNode::Leaf(err.clone())));
/// assert_eq!(wrap(None::<ErrorValue>, None::<ErrorValue>), None);
/// ```
pub fn wrap(older: impl IntoNode, newer: impl IntoNode) -> Option<ErrorNode> {
    match (older.into_node(), newer.into_node()) {
        (None, newer) => newer,
        (older, None) => older,
        (Some(older), Some(newer)) => Some(ErrorNode::Group(Aggregate::from_nodes([older, newer]))),
    }
}

/// Combines errors and logs the result through `config`.
pub fn combine_with_log<I>(errors: I, config: &Config) -> Aggregate
where
    I: IntoIterator,
    I::Item: IntoNode,
{
    let agg = combine(errors);
    agg.log(config);
    agg
}

/// Wraps two errors and logs the result through `config`.
pub fn wrap_with_log(older: impl IntoNode, newer: impl IntoNode, config: &Config) -> Option<ErrorNode> {
    let node = wrap(older, newer);
    if let Some(node) = &node {
        node.log(config);
    }
    node
}

/// Combines heterogeneous error inputs into one [`Aggregate`].
///
/// Every argument must implement [`IntoNode`]; a bare `None` needs a type,
/// e.g. `None::<ErrorValue>`.
#[macro_export]
macro_rules! combine {
    ($($err:expr),+ $(,)?) => {
        $crate::Aggregate::from_nodes([$($crate::IntoNode::into_node($err)),+])
    };
}

impl Semigroup for Aggregate {
    fn combine(self, other: Self) -> Self {
        Aggregate::from_nodes([self, other])
    }
}

impl Display for Aggregate {
    /// `{}` uses the configured marshaller, `{:#}` always renders JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = NodeRef::Group(self);
        if f.alternate() {
            return fmt_json(node, f);
        }
        fmt_with(config::global().marshaller(), node, f)
    }
}

impl fmt::Debug for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.errors.iter()).finish()
    }
}

impl Error for Aggregate {
    /// The newest error.
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.last().map(|err| err as &(dyn Error + 'static))
    }
}

impl FromIterator<ErrorValue> for Aggregate {
    fn from_iter<I: IntoIterator<Item = ErrorValue>>(iter: I) -> Self {
        Self::from_nodes(iter)
    }
}

impl<'a> IntoIterator for &'a Aggregate {
    type Item = &'a ErrorValue;
    type IntoIter = std::slice::Iter<'a, ErrorValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl IntoIterator for Aggregate {
    type Item = ErrorValue;
    type IntoIter = std::vec::IntoIter<ErrorValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.to_vec().into_iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Aggregate>();
    assert_sync::<Aggregate>();
};
