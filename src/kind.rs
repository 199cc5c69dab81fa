//! Error classification.

use std::fmt::{self, Display};

use crate::attribute::Attribute;

/// What kind of failure an error value describes.
///
/// The well-known kinds cover the common cases; anything else can be
/// expressed with [`ErrorKind::Custom`].
///
/// # Example
///
/// ```rust
/// use faultline::ErrorKind;
///
/// assert_eq!(ErrorKind::NotFound.to_string(), "NOT_FOUND");
/// assert_eq!(ErrorKind::custom("QUOTA").to_string(), "QUOTA");
/// assert_eq!(ErrorKind::custom(""), ErrorKind::Unknown);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Not classified.
    #[default]
    Unknown,
    /// A requested entity does not exist.
    NotFound,
    /// Input failed validation.
    Validation,
    /// An internal failure.
    Internal,
    /// A caller-defined classification.
    Custom(Attribute),
}

impl ErrorKind {
    /// Creates a custom kind. Empty names map to [`ErrorKind::Unknown`].
    pub fn custom(name: impl Into<Attribute>) -> Self {
        let name = name.into();
        if name.is_empty() {
            ErrorKind::Unknown
        } else {
            ErrorKind::Custom(name)
        }
    }

    /// Returns true if the kind is [`ErrorKind::Unknown`].
    pub fn is_unknown(&self) -> bool {
        matches!(self, ErrorKind::Unknown)
    }

    /// Returns the name of the kind.
    pub fn as_str(&self) -> &str {
        match self {
            ErrorKind::Unknown => "UNKNOWN",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Validation => "VALIDATION",
            ErrorKind::Internal => "INTERNAL",
            ErrorKind::Custom(name) => name.as_str(),
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ErrorKind {
    fn from(name: &str) -> Self {
        ErrorKind::custom(name)
    }
}

impl From<String> for ErrorKind {
    fn from(name: String) -> Self {
        ErrorKind::custom(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(ErrorKind::Unknown.as_str(), "UNKNOWN");
        assert_eq!(ErrorKind::Validation.as_str(), "VALIDATION");
        assert_eq!(ErrorKind::Internal.as_str(), "INTERNAL");
    }

    #[test]
    fn test_custom_empty_is_unknown() {
        assert!(ErrorKind::from("").is_unknown());
        assert!(!ErrorKind::from("storage").is_unknown());
    }
}
