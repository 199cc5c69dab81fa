//! Error severity.
//!
//! Severity decides whether an error value is an actual failure. A
//! [`Severity::Warn`] value is informational and is filtered out by
//! [`error_or_nil`](crate::error_or_nil).

use std::fmt::{self, Display};
use std::str::FromStr;

/// How serious an error value is.
///
/// The default is [`Severity::Unknown`], which is treated like
/// [`Severity::Error`] wherever a decision has to be made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Not set.
    #[default]
    Unknown,
    /// A warning. Not an error in fact.
    Warn,
    /// An error.
    Error,
}

impl Severity {
    /// Returns true for [`Severity::Warn`] and [`Severity::Error`].
    pub fn is_valid(self) -> bool {
        !matches!(self, Severity::Unknown)
    }

    /// Returns the numeric code (0 unknown, 1 warn, 2 error).
    pub fn as_u32(self) -> u32 {
        match self {
            Severity::Unknown => 0,
            Severity::Warn => 1,
            Severity::Error => 2,
        }
    }

    /// Returns the canonical upper-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Unknown => "UNKNOWN",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = SeverityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "warn" | "warning" => Ok(Severity::Warn),
            "e" | "err" | "error" => Ok(Severity::Error),
            _ => Err(SeverityParseError::Name(s.to_string())),
        }
    }
}

impl TryFrom<u32> for Severity {
    type Error = SeverityParseError;

    fn try_from(code: u32) -> Result<Self, SeverityParseError> {
        match code {
            1 => Ok(Severity::Warn),
            2 => Ok(Severity::Error),
            other => Err(SeverityParseError::Code(other)),
        }
    }
}

/// Errors produced when parsing a [`Severity`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeverityParseError {
    /// The name is not a known severity.
    #[error("'{0}' is not a valid severity")]
    Name(String),

    /// The numeric code is not a known severity.
    #[error("{0} is not a valid severity code")]
    Code(u32),
}
