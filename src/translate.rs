//! Message translation.
//!
//! Error values may carry a [`Localizer`] and a [`TranslateContext`]. When a
//! value is rendered, the [`Translator`] resolves its message through the
//! value's own localizer, or the configured fallback, keyed by the value's
//! id. Every failure along the way degrades to the raw message.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::ErrorValue;

/// A localization backend.
///
/// Implementations resolve a message id plus template data into a localized
/// string. They may block; the crate never propagates their failures.
pub trait Localizer: Send + Sync {
    /// Resolves the message described by `config`.
    fn localize(&self, config: &LocalizeConfig<'_>) -> Result<String, LocalizeError>;
}

impl<L: Localizer + ?Sized> Localizer for Arc<L> {
    fn localize(&self, config: &LocalizeConfig<'_>) -> Result<String, LocalizeError> {
        (**self).localize(config)
    }
}

/// Everything a [`Localizer`] needs to resolve one message.
#[derive(Debug, Clone, Copy)]
pub struct LocalizeConfig<'a> {
    /// The message id, taken from the error value's id.
    pub message_id: &'a str,
    /// Template substitutions.
    pub template_data: Option<&'a IndexMap<String, Value>>,
    /// Count used to choose a plural form.
    pub plural_count: Option<&'a Value>,
    /// Message to use when the backend has no entry for `message_id`.
    pub default_message: Option<&'a str>,
}

/// Errors a [`Localizer`] may report.
#[derive(Debug, thiserror::Error)]
pub enum LocalizeError {
    /// The backend has no message with this id.
    #[error("message '{0}' not found")]
    MessageNotFound(String),

    /// The message template could not be executed.
    #[error("template error in message '{id}': {reason}")]
    Template {
        /// The message id.
        id: String,
        /// Why the template failed.
        reason: String,
    },

    /// Any other backend failure.
    #[error("localizer backend error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

/// Per-value translation data. Not required for a translation to succeed.
///
/// # Example
///
/// ```rust
/// use faultline::TranslateContext;
/// use serde_json::json;
///
/// let tctx = TranslateContext::new()
///     .with_data("Name", "report.pdf")
///     .with_plural_count(3);
///
/// assert_eq!(tctx.template_data.get("Name"), Some(&json!("report.pdf")));
/// assert_eq!(tctx.plural_count, Some(json!(3)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslateContext {
    /// Template substitutions.
    pub template_data: IndexMap<String, Value>,
    /// Plural count, any JSON number or numeric string.
    pub plural_count: Option<Value>,
    /// Message used by the backend when it has no entry for the id.
    pub default_message: Option<String>,
}

impl TranslateContext {
    /// Creates an empty translation context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template substitution.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.template_data.insert(key.into(), value.into());
        self
    }

    /// Sets the plural count.
    pub fn with_plural_count(mut self, count: impl Into<Value>) -> Self {
        self.plural_count = Some(count.into());
        self
    }

    /// Sets the default message.
    pub fn with_default_message(mut self, message: impl Into<String>) -> Self {
        self.default_message = Some(message.into());
        self
    }
}

/// Resolves the display message of error values.
///
/// A `Translator` holds an optional fallback localizer, used for values that
/// do not carry their own.
#[derive(Clone, Default)]
pub struct Translator {
    fallback: Option<Arc<dyn Localizer>>,
}

impl Translator {
    /// A translator without a fallback localizer.
    pub fn none() -> Self {
        Self::default()
    }

    /// A translator falling back to `localizer`.
    pub fn new(localizer: Arc<dyn Localizer>) -> Self {
        Self {
            fallback: Some(localizer),
        }
    }

    /// Returns the fallback localizer, if any.
    pub fn fallback(&self) -> Option<&Arc<dyn Localizer>> {
        self.fallback.as_ref()
    }

    /// Returns the translated message of `err`, or its raw message.
    ///
    /// The raw message is returned when the message is empty, when no
    /// localizer is available, when the value has no id, or when the
    /// localizer fails.
    pub fn translate<'a>(&self, err: &'a ErrorValue) -> Cow<'a, str> {
        let raw = err.msg();
        if raw.is_empty() || err.id().is_empty() {
            return Cow::Borrowed(raw);
        }

        let Some(localizer) = err.localizer().or(self.fallback.as_ref()) else {
            return Cow::Borrowed(raw);
        };

        let tctx = err.translate_context();
        let config = LocalizeConfig {
            message_id: err.id(),
            template_data: tctx.map(|t| &t.template_data),
            plural_count: tctx.and_then(|t| t.plural_count.as_ref()),
            default_message: tctx.and_then(|t| t.default_message.as_deref()),
        };

        match localizer.localize(&config) {
            Ok(msg) if !msg.is_empty() => Cow::Owned(msg),
            Ok(_) => Cow::Borrowed(raw),
            Err(e) => {
                tracing::debug!(id = err.id(), error = %e, "translation failed, using raw message");
                Cow::Borrowed(raw)
            }
        }
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl Localizer for Upper {
        fn localize(&self, config: &LocalizeConfig<'_>) -> Result<String, LocalizeError> {
            match config.message_id {
                "missing" => Err(LocalizeError::MessageNotFound("missing".to_string())),
                "blank" => Ok(String::new()),
                id => Ok(id.to_uppercase()),
            }
        }
    }

    #[test]
    fn test_no_localizer_uses_raw_message() {
        let err = ErrorValue::new("raw").with_id("greeting");
        assert_eq!(Translator::none().translate(&err), "raw");
    }

    #[test]
    fn test_fallback_localizer() {
        let err = ErrorValue::new("raw").with_id("greeting");
        let translator = Translator::new(Arc::new(Upper));
        assert_eq!(translator.translate(&err), "GREETING");
    }

    #[test]
    fn test_missing_id_uses_raw_message() {
        let err = ErrorValue::new("raw");
        let translator = Translator::new(Arc::new(Upper));
        assert_eq!(translator.translate(&err), "raw");
    }

    #[test]
    fn test_failures_degrade_to_raw_message() {
        let translator = Translator::new(Arc::new(Upper));
        let missing = ErrorValue::new("raw").with_id("missing");
        let blank = ErrorValue::new("raw").with_id("blank");
        assert_eq!(translator.translate(&missing), "raw");
        assert_eq!(translator.translate(&blank), "raw");
    }

    #[test]
    fn test_empty_message_is_not_translated() {
        let err = ErrorValue::default().with_id("greeting");
        let translator = Translator::new(Arc::new(Upper));
        assert_eq!(translator.translate(&err), "");
    }
}
