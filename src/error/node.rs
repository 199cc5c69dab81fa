//! Leaf-or-group dispatch.
//!
//! Everything that can be rendered, searched or logged is either a single
//! [`ErrorValue`] or an [`Aggregate`]. [`ErrorNode`] owns one of the two,
//! [`NodeRef`] borrows one, and [`IntoNode`] converts the accepted inputs.

use std::error::Error;
use std::fmt::{self, Display, Write as _};
use std::slice;

use crate::config::{self, Config};
use crate::error::aggregate::Aggregate;
use crate::error::value::ErrorValue;
use crate::marshal::{JsonMarshaller, Marshaller};
use crate::severity::Severity;

/// An owned error: a single value or a flattened group.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorNode {
    /// A single error value.
    Leaf(ErrorValue),
    /// A flattened group of error values.
    Group(Aggregate),
}

/// A borrowed [`ErrorNode`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    /// A single error value.
    Leaf(&'a ErrorValue),
    /// A flattened group of error values.
    Group(&'a Aggregate),
}

impl<'a> NodeRef<'a> {
    /// Returns the leaf values: one for a leaf, every child for a group.
    pub fn leaves(self) -> &'a [ErrorValue] {
        match self {
            NodeRef::Leaf(err) => slice::from_ref(err),
            NodeRef::Group(agg) => agg.as_slice(),
        }
    }

    /// Returns the first leaf with exactly this id.
    pub fn find_by_id(self, id: &str) -> Option<&'a ErrorValue> {
        self.leaves().iter().find(|err| err.id() == id)
    }

    /// Returns true if any leaf has exactly this id.
    pub fn contains_by_id(self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Returns the first leaf that is not a warning.
    pub fn error_or_nil(self) -> Option<&'a ErrorValue> {
        self.leaves().iter().find(|err| !err.is_warn())
    }

    /// Returns the severity used for logging.
    ///
    /// A leaf without severity counts as an error. A group counts as a
    /// warning only when every child is a warning.
    pub fn severity(self) -> Severity {
        match self {
            NodeRef::Leaf(err) if err.severity().is_valid() => err.severity(),
            NodeRef::Leaf(_) => Severity::Error,
            NodeRef::Group(agg) => {
                if !agg.is_empty() && self.error_or_nil().is_none() {
                    Severity::Warn
                } else {
                    Severity::Error
                }
            }
        }
    }

    /// Returns true if `target` is this leaf or one of the group's children.
    ///
    /// A group equals another aggregate through `==`.
    pub fn is(self, target: &ErrorValue) -> bool {
        self.leaves().iter().any(|err| err == target)
    }

    /// Returns true if the node renders to nothing.
    pub fn is_empty(self) -> bool {
        self.leaves().is_empty()
    }

    /// Returns the node as a `std::error::Error` trait object.
    pub fn as_error(self) -> &'a (dyn Error + 'static) {
        match self {
            NodeRef::Leaf(err) => err,
            NodeRef::Group(agg) => agg,
        }
    }

    /// Copies the borrowed node into an owned one.
    pub fn to_owned_node(self) -> ErrorNode {
        match self {
            NodeRef::Leaf(err) => ErrorNode::Leaf(err.clone()),
            NodeRef::Group(agg) => ErrorNode::Group(agg.clone()),
        }
    }
}

impl<'a> From<&'a ErrorValue> for NodeRef<'a> {
    fn from(err: &'a ErrorValue) -> Self {
        NodeRef::Leaf(err)
    }
}

impl<'a> From<&'a Aggregate> for NodeRef<'a> {
    fn from(agg: &'a Aggregate) -> Self {
        NodeRef::Group(agg)
    }
}

impl<'a> From<&'a ErrorNode> for NodeRef<'a> {
    fn from(node: &'a ErrorNode) -> Self {
        node.as_node_ref()
    }
}

impl ErrorNode {
    /// Borrows this node.
    pub fn as_node_ref(&self) -> NodeRef<'_> {
        match self {
            ErrorNode::Leaf(err) => NodeRef::Leaf(err),
            ErrorNode::Group(agg) => NodeRef::Group(agg),
        }
    }

    /// Converts any error into a node.
    ///
    /// Error values, aggregates and nodes are cloned; any other error becomes
    /// a leaf carrying its rendered text.
    pub fn from_error(err: &(dyn Error + 'static)) -> Self {
        if let Some(value) = err.downcast_ref::<ErrorValue>() {
            ErrorNode::Leaf(value.clone())
        } else if let Some(agg) = err.downcast_ref::<Aggregate>() {
            ErrorNode::Group(agg.clone())
        } else if let Some(node) = err.downcast_ref::<ErrorNode>() {
            node.clone()
        } else {
            ErrorNode::Leaf(ErrorValue::from_error(err))
        }
    }

    /// Returns the leaf value, or for a group its newest child.
    pub fn as_leaf(&self) -> Option<&ErrorValue> {
        match self {
            ErrorNode::Leaf(err) => Some(err),
            ErrorNode::Group(agg) => agg.last(),
        }
    }

    /// Returns the aggregate if this node is a group.
    pub fn as_aggregate(&self) -> Option<&Aggregate> {
        match self {
            ErrorNode::Leaf(_) => None,
            ErrorNode::Group(agg) => Some(agg),
        }
    }

    /// Returns the leaf values of this node.
    pub fn leaves(&self) -> &[ErrorValue] {
        self.as_node_ref().leaves()
    }

    /// Returns the first leaf with exactly this id.
    pub fn find_by_id(&self, id: &str) -> Option<&ErrorValue> {
        self.as_node_ref().find_by_id(id)
    }

    /// Returns true if any leaf has exactly this id.
    pub fn contains_by_id(&self, id: &str) -> bool {
        self.as_node_ref().contains_by_id(id)
    }

    /// Returns the first leaf that is not a warning.
    pub fn error_or_nil(&self) -> Option<&ErrorValue> {
        self.as_node_ref().error_or_nil()
    }

    /// Returns true if `target` is this leaf or one of the group's children.
    ///
    /// A group equals another aggregate through `==`.
    pub fn is(&self, target: &ErrorValue) -> bool {
        self.as_node_ref().is(target)
    }

    /// Renders this node with `config`.
    pub fn render(&self, config: &Config) -> String {
        config.render(self)
    }

    /// Logs this node through `config`'s logger.
    pub fn log(&self, config: &Config) {
        config.log(self.as_node_ref().as_error());
    }
}

impl Display for ErrorNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorNode::Leaf(err) => Display::fmt(err, f),
            ErrorNode::Group(agg) => Display::fmt(agg, f),
        }
    }
}

impl Error for ErrorNode {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ErrorNode::Leaf(_) => None,
            ErrorNode::Group(agg) => agg.source(),
        }
    }
}

impl PartialEq<Aggregate> for ErrorNode {
    fn eq(&self, other: &Aggregate) -> bool {
        matches!(self, ErrorNode::Group(agg) if agg == other)
    }
}

impl From<ErrorValue> for ErrorNode {
    fn from(err: ErrorValue) -> Self {
        ErrorNode::Leaf(err)
    }
}

impl From<Aggregate> for ErrorNode {
    fn from(agg: Aggregate) -> Self {
        ErrorNode::Group(agg)
    }
}

/// Writes the raw messages of `node`, one per line.
pub(crate) fn write_raw(node: NodeRef<'_>, f: &mut dyn fmt::Write) -> fmt::Result {
    for (i, err) in node.leaves().iter().enumerate() {
        if i > 0 {
            f.write_char('\n')?;
        }
        f.write_str(err.msg())?;
    }
    Ok(())
}

/// Writes the output of `marshaller`, or the raw messages if it fails.
pub(crate) fn fmt_with(
    marshaller: &dyn Marshaller,
    node: NodeRef<'_>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    match marshaller.marshal(Some(node), config::global().translator()) {
        Ok(bytes) => f.write_str(&String::from_utf8_lossy(&bytes)),
        Err(e) => {
            tracing::debug!(error = %e, "marshaller failed, rendering raw messages");
            write_raw(node, f)
        }
    }
}

/// Renders a borrowed node as JSON with the process-wide translator.
pub(crate) fn fmt_json(node: NodeRef<'_>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt_with(&JsonMarshaller, node, f)
}

/// Conversion into an optional [`ErrorNode`].
///
/// `None` stands for "no error" and is dropped by
/// [`combine`](crate::combine) and [`wrap`](crate::wrap).
pub trait IntoNode {
    /// Converts `self` into a node, or `None` for "no error".
    fn into_node(self) -> Option<ErrorNode>;
}

impl IntoNode for ErrorNode {
    fn into_node(self) -> Option<ErrorNode> {
        Some(self)
    }
}

impl IntoNode for ErrorValue {
    fn into_node(self) -> Option<ErrorNode> {
        Some(ErrorNode::Leaf(self))
    }
}

impl IntoNode for &ErrorValue {
    fn into_node(self) -> Option<ErrorNode> {
        Some(ErrorNode::Leaf(self.clone()))
    }
}

impl IntoNode for Aggregate {
    fn into_node(self) -> Option<ErrorNode> {
        Some(ErrorNode::Group(self))
    }
}

impl IntoNode for &Aggregate {
    fn into_node(self) -> Option<ErrorNode> {
        Some(ErrorNode::Group(self.clone()))
    }
}

impl<T: IntoNode> IntoNode for Option<T> {
    fn into_node(self) -> Option<ErrorNode> {
        self.and_then(IntoNode::into_node)
    }
}

impl IntoNode for &(dyn Error + 'static) {
    fn into_node(self) -> Option<ErrorNode> {
        Some(ErrorNode::from_error(self))
    }
}

impl IntoNode for Box<dyn Error + Send + Sync> {
    fn into_node(self) -> Option<ErrorNode> {
        let err = match self.downcast::<ErrorValue>() {
            Ok(value) => return Some(ErrorNode::Leaf(*value)),
            Err(err) => err,
        };
        let err = match err.downcast::<Aggregate>() {
            Ok(agg) => return Some(ErrorNode::Group(*agg)),
            Err(err) => err,
        };
        match err.downcast::<ErrorNode>() {
            Ok(node) => Some(*node),
            Err(err) => Some(ErrorNode::Leaf(ErrorValue::from_error(&*err))),
        }
    }
}
