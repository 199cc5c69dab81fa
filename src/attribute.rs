//! Normalized string attributes.
//!
//! This module provides [`Attribute`], the small value type used for an
//! error's id, message and operations. An unset attribute behaves exactly
//! like an empty one, so callers never have to special-case absence.

use std::fmt::{self, Display};
use std::io;
use std::sync::Arc;

/// A cheaply clonable, possibly unset piece of text.
///
/// `Attribute` accepts strings as well as raw bytes (decoded lossily as
/// UTF-8) and always answers with a usable value: an unset attribute reads
/// as `""`.
///
/// # Example
///
/// ```rust
/// use faultline::Attribute;
///
/// let unset = Attribute::empty();
/// assert_eq!(unset.as_str(), "");
/// assert!(unset.is_empty());
///
/// let op = Attribute::from("write");
/// assert_eq!(op.to_string(), "write");
///
/// let raw = Attribute::from(&b"read"[..]);
/// assert_eq!(raw.as_bytes(), b"read");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Attribute(Option<Arc<str>>);

impl Attribute {
    /// Creates an unset attribute.
    pub const fn empty() -> Self {
        Self(None)
    }

    /// Creates an attribute from text. Empty text yields an unset attribute.
    pub fn new(text: impl AsRef<str>) -> Self {
        let text = text.as_ref();
        if text.is_empty() {
            Self(None)
        } else {
            Self(Some(Arc::from(text)))
        }
    }

    /// Creates an attribute from raw bytes, replacing invalid UTF-8 sequences.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(String::from_utf8_lossy(bytes))
    }

    /// Returns the text, or `""` when unset.
    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or("")
    }

    /// Returns the text as bytes, or an empty slice when unset.
    pub fn as_bytes(&self) -> &[u8] {
        self.as_str().as_bytes()
    }

    /// Returns true if the attribute is unset or empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the length of the text in bytes.
    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    /// Writes the text to `w`, returning the number of bytes written.
    ///
    /// Nothing is written for an unset attribute.
    pub fn write_to(&self, w: &mut dyn io::Write) -> io::Result<usize> {
        let bytes = self.as_bytes();
        if bytes.is_empty() {
            return Ok(0);
        }
        w.write_all(bytes)?;
        Ok(bytes.len())
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Attribute {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for Attribute {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Attribute {
    fn from(text: String) -> Self {
        if text.is_empty() {
            Self(None)
        } else {
            Self(Some(Arc::from(text)))
        }
    }
}

impl From<&String> for Attribute {
    fn from(text: &String) -> Self {
        Self::new(text)
    }
}

impl From<&[u8]> for Attribute {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for Attribute {
    fn from(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self::from(text),
            Err(err) => Self::from_bytes(err.as_bytes()),
        }
    }
}

impl PartialEq<str> for Attribute {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Attribute {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
