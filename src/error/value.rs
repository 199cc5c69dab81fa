//! The structured leaf error value.

use std::borrow::Cow;
use std::error::Error;
use std::fmt::{self, Display};
use std::io;
use std::panic::Location;
use std::sync::Arc;

use serde_json::Value;

use crate::attribute::Attribute;
use crate::config::{self, Config};
use crate::context::Context;
use crate::error::node::{fmt_json, fmt_with, NodeRef};
use crate::error::options::ErrorOption;
use crate::kind::ErrorKind;
use crate::marshal::Marshaller;
use crate::severity::Severity;
use crate::translate::{Localizer, TranslateContext, Translator};

/// A structured error record.
///
/// `ErrorValue` carries everything needed to identify, classify and render
/// a failure:
/// - **id**: stable identifier used for lookup and translation
/// - **msg**: human-readable fallback text
/// - **operations**: ordered location/cause tags
/// - **kind**: classification
/// - **severity**: whether the value is an actual failure
/// - **context**: diagnostic key-value pairs
/// - **caller**: where the value was created, when recorded
/// - an optional localizer, translation context and marshaller
///
/// Values are immutable once built; [`with_options`](Self::with_options)
/// derives a modified copy and leaves the receiver untouched.
///
/// # Example
///
/// ```rust
/// use faultline::{set_context, set_msg, set_operation, ErrorValue};
///
/// let err = ErrorValue::new_with([
///     set_operation("write"),
///     set_context([("hello", "world")]),
///     set_msg("connection error"),
/// ]);
///
/// assert_eq!(err.to_string(), "[write] <hello:world> -- connection error");
/// ```
#[derive(Clone, Default)]
pub struct ErrorValue {
    pub(crate) id: Attribute,
    pub(crate) msg: Attribute,
    pub(crate) operations: Arc<Vec<Attribute>>,
    pub(crate) kind: ErrorKind,
    pub(crate) severity: Severity,
    pub(crate) context: Context,
    pub(crate) caller: Option<&'static Location<'static>>,
    pub(crate) translate_context: Option<Arc<TranslateContext>>,
    pub(crate) localizer: Option<Arc<dyn Localizer>>,
    pub(crate) marshaller: Option<Arc<dyn Marshaller>>,
}

impl ErrorValue {
    /// Creates an error value with the given message.
    pub fn new(msg: impl Into<Attribute>) -> Self {
        Self {
            msg: msg.into(),
            ..Self::default()
        }
    }

    /// Creates an error value from an ordered list of options.
    ///
    /// Later options override earlier ones for scalar fields and merge into
    /// the context map.
    pub fn new_with(options: impl IntoIterator<Item = ErrorOption>) -> Self {
        let mut err = Self::default();
        for option in options {
            option.apply(&mut err);
        }
        err
    }

    /// Creates an error value whose message is the rendered text of `err`.
    pub fn from_error(err: &dyn Error) -> Self {
        Self::new(err.to_string())
    }

    /// Creates an error value whose message is the `Display` output of `source`.
    pub fn from_display(source: impl Display) -> Self {
        Self::new(source.to_string())
    }

    /// Creates an error value whose message is produced by `f`.
    pub fn from_fn<S: Into<Attribute>>(f: impl FnOnce() -> S) -> Self {
        Self::new(f())
    }

    /// Creates an error value and logs it through `config`.
    pub fn new_with_log(msg: impl Into<Attribute>, config: &Config) -> Self {
        let err = Self::new(msg);
        config.log(&err);
        err
    }

    /// Returns a copy of this value with `options` applied.
    ///
    /// The receiver is never modified. Use
    /// [`MaybeError::with_options`](crate::MaybeError::with_options) on an
    /// `Option<ErrorValue>` to chain on a possibly absent error.
    pub fn with_options(&self, options: impl IntoIterator<Item = ErrorOption>) -> Self {
        let mut err = self.clone();
        for option in options {
            option.apply(&mut err);
        }
        err
    }

    // builder

    /// Sets the id and returns self for chaining.
    pub fn with_id(mut self, id: impl Into<Attribute>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the message and returns self for chaining.
    pub fn with_msg(mut self, msg: impl Into<Attribute>) -> Self {
        self.msg = msg.into();
        self
    }

    /// Replaces the operations with a single operation.
    pub fn with_operation(mut self, operation: impl Into<Attribute>) -> Self {
        self.operations = Arc::new(vec![operation.into()]);
        self
    }

    /// Appends operations to the existing ones.
    pub fn with_appended_operations<I, A>(mut self, operations: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Attribute>,
    {
        Arc::make_mut(&mut self.operations).extend(operations.into_iter().map(Into::into));
        self
    }

    /// Sets the kind and returns self for chaining.
    pub fn with_kind(mut self, kind: impl Into<ErrorKind>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Sets the severity and returns self for chaining.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Replaces the context.
    pub fn with_context(mut self, context: impl Into<Context>) -> Self {
        self.context = context.into();
        self
    }

    /// Adds one context entry, keeping the others.
    pub fn with_context_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key, value);
        self
    }

    /// Records the caller's source location.
    ///
    /// # Example
    ///
    /// ```rust
    /// use faultline::ErrorValue;
    ///
    /// let err = ErrorValue::new("boom").with_caller();
    /// let caller = err.caller().unwrap();
    /// assert!(err.to_string().starts_with(&format!("{}:{} ", caller.file(), caller.line())));
    /// ```
    #[track_caller]
    pub fn with_caller(mut self) -> Self {
        self.caller = Some(Location::caller());
        self
    }

    /// Binds a localizer to this value.
    pub fn with_localizer(mut self, localizer: Arc<dyn Localizer>) -> Self {
        self.localizer = Some(localizer);
        self
    }

    /// Sets the translation context.
    pub fn with_translate_context(mut self, tctx: TranslateContext) -> Self {
        self.translate_context = Some(Arc::new(tctx));
        self
    }

    /// Sets a marshaller used instead of the configured default.
    pub fn with_marshaller(mut self, marshaller: Arc<dyn Marshaller>) -> Self {
        self.marshaller = Some(marshaller);
        self
    }

    // getters

    /// Returns the id, or `""` when unset.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the raw, untranslated message.
    pub fn msg(&self) -> &str {
        self.msg.as_str()
    }

    /// Returns the operations in order.
    pub fn operations(&self) -> &[Attribute] {
        &self.operations
    }

    /// Returns the kind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the severity.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the context.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Returns the recorded source location, if any.
    pub fn caller(&self) -> Option<&'static Location<'static>> {
        self.caller
    }

    /// Returns the translation context, if any.
    pub fn translate_context(&self) -> Option<&TranslateContext> {
        self.translate_context.as_deref()
    }

    /// Returns the bound localizer, if any.
    pub fn localizer(&self) -> Option<&Arc<dyn Localizer>> {
        self.localizer.as_ref()
    }

    /// Returns the per-value marshaller, if any.
    pub fn marshaller(&self) -> Option<&Arc<dyn Marshaller>> {
        self.marshaller.as_ref()
    }

    // severity

    /// Returns true if this value is only a warning.
    pub fn is_warn(&self) -> bool {
        self.severity == Severity::Warn
    }

    /// Returns `None` for warnings and the value itself otherwise.
    pub fn error_or_nil(&self) -> Option<&Self> {
        if self.is_warn() {
            None
        } else {
            Some(self)
        }
    }

    // translation

    /// Returns the translated message using the process-wide configuration.
    pub fn translate_msg(&self) -> Cow<'_, str> {
        config::global().translator().translate(self)
    }

    /// Writes the translated message to `w`, returning the bytes written.
    pub fn write_translate_msg(
        &self,
        w: &mut dyn io::Write,
        translator: &Translator,
    ) -> io::Result<usize> {
        let msg = translator.translate(self);
        w.write_all(msg.as_bytes())?;
        Ok(msg.len())
    }

    // rendering

    /// Renders this value with `config`, honoring a per-value marshaller.
    pub fn render(&self, config: &Config) -> String {
        config.render(self)
    }

    /// Logs this value through `config`'s logger.
    pub fn log(&self, config: &Config) {
        config.log(self);
    }
}

impl Display for ErrorValue {
    /// `{}` uses the configured marshaller, `{:#}` always renders JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = NodeRef::Leaf(self);
        if f.alternate() {
            return fmt_json(node, f);
        }
        fmt_with(config::global().marshaller_for(node), node, f)
    }
}

impl fmt::Debug for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorValue")
            .field("id", &self.id)
            .field("msg", &self.msg)
            .field("operations", &self.operations)
            .field("kind", &self.kind)
            .field("severity", &self.severity)
            .field("context", &self.context)
            .field("caller", &self.caller)
            .field("translate_context", &self.translate_context)
            .field("localizer", &self.localizer.is_some())
            .field("marshaller", &self.marshaller)
            .finish()
    }
}

impl PartialEq for ErrorValue {
    fn eq(&self, other: &Self) -> bool {
        fn same<T: ?Sized>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
            match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                _ => false,
            }
        }

        self.id == other.id
            && self.msg == other.msg
            && self.operations == other.operations
            && self.kind == other.kind
            && self.severity == other.severity
            && self.context == other.context
            && self.caller == other.caller
            && self.translate_context == other.translate_context
            && same(&self.localizer, &other.localizer)
            && same(&self.marshaller, &other.marshaller)
    }
}

impl Error for ErrorValue {}

impl From<&str> for ErrorValue {
    fn from(msg: &str) -> Self {
        Self::new(msg)
    }
}

impl From<String> for ErrorValue {
    fn from(msg: String) -> Self {
        Self::new(msg)
    }
}

// ErrorValue only holds Arc-shared data behind Send + Sync trait objects.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ErrorValue>();
    assert_sync::<ErrorValue>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::options::{append_context, set_id, set_msg, set_severity};
    use serde_json::json;

    #[test]
    fn test_new_sets_only_message() {
        let err = ErrorValue::new("hello");
        assert_eq!(err.msg(), "hello");
        assert_eq!(err.id(), "");
        assert!(err.operations().is_empty());
        assert!(err.kind().is_unknown());
        assert_eq!(err.severity(), Severity::Unknown);
        assert!(err.context().is_empty());
        assert_eq!(err.to_string(), "hello");
    }

    #[test]
    fn test_from_sources() {
        let io_err = io::Error::new(io::ErrorKind::Other, "disk full");
        assert_eq!(ErrorValue::from_error(&io_err).msg(), "disk full");
        assert_eq!(ErrorValue::from_display(42).msg(), "42");
        assert_eq!(ErrorValue::from_fn(|| "lazy").msg(), "lazy");
        assert_eq!(ErrorValue::from_fn(String::new).msg(), "");
    }

    #[test]
    fn test_with_options_copies() {
        let base = ErrorValue::new("base").with_context_value("a", 1);
        let derived = base.with_options([set_id("x"), append_context("b", 2)]);

        assert_eq!(base.id(), "");
        assert_eq!(base.context().len(), 1);
        assert_eq!(derived.id(), "x");
        assert_eq!(derived.context().len(), 2);
        assert_eq!(derived.msg(), "base");
    }

    #[test]
    fn test_later_options_override() {
        let err = ErrorValue::new_with([set_msg("first"), set_msg("second")]);
        assert_eq!(err.msg(), "second");
    }

    #[test]
    fn test_error_or_nil() {
        let warn = ErrorValue::new_with([set_severity(Severity::Warn)]);
        let error = ErrorValue::new_with([set_severity(Severity::Error)]);
        let unset = ErrorValue::new("x");

        assert!(warn.error_or_nil().is_none());
        assert_eq!(error.error_or_nil(), Some(&error));
        assert_eq!(unset.error_or_nil(), Some(&unset));
    }

    #[test]
    fn test_appended_operations() {
        let err = ErrorValue::new("x")
            .with_operation("read")
            .with_appended_operations(["parse", "store"]);
        let ops: Vec<_> = err.operations().iter().map(|o| o.as_str()).collect();
        assert_eq!(ops, vec!["read", "parse", "store"]);
    }

    #[test]
    fn test_equality_ignores_sharing() {
        let a = ErrorValue::new("x").with_context_value("k", json!("v"));
        let b = ErrorValue::new("x").with_context_value("k", json!("v"));
        assert_eq!(a, b);
        assert_ne!(a, b.clone().with_id("other"));
    }

    #[test]
    fn test_with_caller_records_this_file() {
        let line = line!() + 1;
        let err = ErrorValue::new("x").with_caller();
        let caller = err.caller().unwrap();
        assert!(caller.file().ends_with("value.rs"));
        assert_eq!(caller.line(), line);
        assert!(ErrorValue::new("x").caller().is_none());
    }

    #[test]
    fn test_write_translate_msg() {
        let mut buf = Vec::new();
        let n = ErrorValue::new("raw")
            .write_translate_msg(&mut buf, &Translator::none())
            .unwrap();
        assert_eq!(n, 3);
        assert_eq!(buf, b"raw");
    }
}
