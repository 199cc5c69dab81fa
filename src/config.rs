//! Rendering and logging configuration.
//!
//! A [`Config`] bundles the marshaller, translator and logger used at
//! rendering and logging call sites. Pass one explicitly where it matters;
//! `Display` implementations and other call sites without a config use the
//! process-wide default, which can be installed once at start-up with
//! [`install`].

use std::error::Error;
use std::fmt;
use std::io;
use std::sync::{Arc, OnceLock};

use crate::error::{write_raw, NodeRef};
use crate::log::{self, Logger, TracingLogger};
use crate::marshal::{MarshalError, Marshaller, StringMarshaller};
use crate::translate::{Localizer, Translator};

static GLOBAL: OnceLock<Config> = OnceLock::new();

/// Marshaller, translator and logger used to render and log errors.
///
/// The default renders with [`StringMarshaller`], has no fallback
/// localizer, and logs through [`TracingLogger`].
///
/// # Example
///
/// ```rust
/// use faultline::{Config, ErrorValue, JsonMarshaller};
///
/// let config = Config::new().with_marshaller(JsonMarshaller);
/// let err = ErrorValue::new("boom");
///
/// assert!(config.render(&err).starts_with('{'));
/// assert_eq!(Config::new().render(&err), "boom");
/// ```
#[derive(Clone)]
pub struct Config {
    marshaller: Arc<dyn Marshaller>,
    translator: Translator,
    logger: Arc<dyn Logger>,
}

impl Config {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            marshaller: Arc::new(StringMarshaller),
            translator: Translator::none(),
            logger: Arc::new(TracingLogger),
        }
    }

    /// Sets the default marshaller.
    pub fn with_marshaller<M: Marshaller + 'static>(mut self, marshaller: M) -> Self {
        self.marshaller = Arc::new(marshaller);
        self
    }

    /// Sets the fallback localizer for values without their own.
    pub fn with_localizer<L: Localizer + 'static>(mut self, localizer: L) -> Self {
        self.translator = Translator::new(Arc::new(localizer));
        self
    }

    /// Sets the logger.
    pub fn with_logger<L: Logger + 'static>(mut self, logger: L) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    /// Returns the default marshaller.
    pub fn marshaller(&self) -> &dyn Marshaller {
        self.marshaller.as_ref()
    }

    /// Returns the translator.
    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Returns the logger.
    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    /// Picks the marshaller for `node`: a leaf's own marshaller wins.
    pub(crate) fn marshaller_for<'s>(&'s self, node: NodeRef<'s>) -> &'s dyn Marshaller {
        match node {
            NodeRef::Leaf(err) => match err.marshaller() {
                Some(own) => own.as_ref(),
                None => self.marshaller(),
            },
            NodeRef::Group(_) => self.marshaller(),
        }
    }

    /// Renders `node` to bytes.
    pub fn marshal<'a>(&self, node: impl Into<NodeRef<'a>>) -> Result<Vec<u8>, MarshalError> {
        let node = node.into();
        self.marshaller_for(node).marshal(Some(node), &self.translator)
    }

    /// Renders `node` into `w`.
    pub fn marshal_to<'a>(
        &self,
        node: impl Into<NodeRef<'a>>,
        w: &mut dyn io::Write,
    ) -> Result<(), MarshalError> {
        let node = node.into();
        self.marshaller_for(node).marshal_to(Some(node), &self.translator, w)
    }

    /// Renders `node` to a string.
    ///
    /// Never fails: if the marshaller reports an error, the raw messages are
    /// used instead.
    pub fn render<'a>(&self, node: impl Into<NodeRef<'a>>) -> String {
        let node = node.into();
        match self.marshal(node) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                tracing::debug!(error = %e, "marshaller failed, rendering raw messages");
                let mut raw = String::new();
                // Writing into a String cannot fail.
                let _ = write_raw(node, &mut raw);
                raw
            }
        }
    }

    /// Logs `err` through the configured logger, dispatching on severity.
    pub fn log(&self, err: &(dyn Error + 'static)) {
        log::log(Some(err), self.logger());
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("marshaller", &self.marshaller)
            .field("translator", &self.translator)
            .finish_non_exhaustive()
    }
}

/// Returns the process-wide configuration, initializing it with the
/// default if none was installed.
pub fn global() -> &'static Config {
    GLOBAL.get_or_init(Config::new)
}

/// Installs the process-wide configuration.
///
/// # Errors
///
/// Returns `ConfigError::AlreadyInstalled` if a configuration was already
/// installed or the default was already used.
pub fn install(config: Config) -> Result<(), ConfigError> {
    GLOBAL.set(config).map_err(|_| ConfigError::AlreadyInstalled)
}

/// Errors that can occur while configuring the crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The process-wide configuration is already fixed.
    #[error("a process-wide configuration is already installed")]
    AlreadyInstalled,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{combine, ErrorValue};
    use crate::log::RecordingLogger;
    use crate::marshal::JsonMarshaller;
    use crate::severity::Severity;

    #[test]
    fn test_default_renders_string() {
        let err = ErrorValue::new("plain").with_operation("op");
        assert_eq!(Config::new().render(&err), "[op] -- plain");
    }

    #[test]
    fn test_leaf_marshaller_overrides_default() {
        let err = ErrorValue::new("x").with_marshaller(Arc::new(JsonMarshaller));
        assert!(Config::new().render(&err).starts_with('{'));
    }

    #[test]
    fn test_group_uses_default_marshaller() {
        let agg = combine([ErrorValue::new("x").with_marshaller(Arc::new(JsonMarshaller))]);
        assert!(Config::new()
            .render(&agg)
            .starts_with("the following errors occurred:"));
    }

    #[test]
    fn test_log_uses_configured_logger() {
        let logger = Arc::new(RecordingLogger::new());
        let config = Config::new().with_logger(Arc::clone(&logger));

        config.log(&ErrorValue::new("w").with_severity(Severity::Warn));
        config.log(&ErrorValue::new("e"));

        let records = logger.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].severity, Severity::Warn);
        assert_eq!(records[1].severity, Severity::Error);
    }

    #[test]
    fn test_global_is_stable() {
        let first = global() as *const Config;
        let second = global() as *const Config;
        assert_eq!(first, second);
    }
}
