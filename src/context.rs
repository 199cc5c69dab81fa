//! Diagnostic key-value context attached to error values.
//!
//! [`Context`] keeps insertion order for inspection and exposes a sorted view
//! for rendering, so output is deterministic regardless of how entries were
//! added.

use std::fmt::{self, Display};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

/// An ordered map of diagnostic values, shared copy-on-write.
///
/// Cloning a `Context` is cheap; the first mutation of a shared context
/// copies the underlying map.
///
/// # Example
///
/// ```rust
/// use faultline::Context;
/// use serde_json::json;
///
/// let ctx = Context::new().with("b", json!(1)).with("a", "x");
///
/// let keys: Vec<_> = ctx.sorted().map(|(k, _)| k).collect();
/// assert_eq!(keys, vec!["a", "b"]);
/// assert_eq!(ctx.to_string(), "a:x,b:1");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context(Arc<IndexMap<String, Value>>);

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new context with `key` set to `value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts or replaces a value, copying the map first if it is shared.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        Arc::make_mut(&mut self.0).insert(key.into(), value.into());
    }

    /// Inserts every entry of `other`, replacing existing keys.
    pub fn merge(&mut self, other: &Context) {
        if other.is_empty() {
            return;
        }
        let map = Arc::make_mut(&mut self.0);
        for (key, value) in other.iter() {
            map.insert(key.to_string(), value.clone());
        }
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates entries in lexicographic key order.
    pub fn sorted(&self) -> impl Iterator<Item = (&str, &Value)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    /// Converts the context into a JSON object with sorted keys.
    pub fn to_json(&self) -> Value {
        let map: serde_json::Map<String, Value> = self
            .sorted()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Value::Object(map)
    }
}

/// Renders a context value the way it appears in text output.
///
/// Strings are written bare; every other value is written as JSON.
pub(crate) fn write_value(f: &mut dyn fmt::Write, value: &Value) -> fmt::Result {
    match value {
        Value::String(s) => f.write_str(s),
        other => write!(f, "{}", other),
    }
}

impl Display for Context {
    /// Formats as `k:v,k:v` in sorted key order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.sorted().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(key)?;
            f.write_str(":")?;
            write_value(f, value)?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self(Arc::new(map))
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Context {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}
