//! Severity-driven logging dispatch.
//!
//! The crate does not log on its own; it hands errors to a [`Logger`] and
//! picks `warn` or `error` from the error's severity. Three loggers ship
//! with the crate:
//! - [`TracingLogger`]: forwards to the `tracing` macros
//! - [`ChainLogger`]: fans out to several loggers
//! - [`RecordingLogger`]: keeps records in memory

use std::error::Error;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Aggregate, ErrorNode, ErrorValue, NodeRef};
use crate::severity::Severity;

/// A logging backend.
pub trait Logger: Send + Sync {
    /// Logs a warning.
    fn warn(&self, err: &dyn Error);

    /// Logs an error.
    fn error(&self, err: &dyn Error);
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn warn(&self, err: &dyn Error) {
        (**self).warn(err)
    }

    fn error(&self, err: &dyn Error) {
        (**self).error(err)
    }
}

/// Returns the node behind `err` if it is one of this crate's error types.
pub(crate) fn node_of<'a>(err: &'a (dyn Error + 'static)) -> Option<NodeRef<'a>> {
    if let Some(value) = err.downcast_ref::<ErrorValue>() {
        Some(NodeRef::Leaf(value))
    } else if let Some(agg) = err.downcast_ref::<Aggregate>() {
        Some(NodeRef::Group(agg))
    } else {
        err.downcast_ref::<ErrorNode>().map(ErrorNode::as_node_ref)
    }
}

/// Returns the severity `err` is logged with.
///
/// Error values without a severity and foreign errors count as
/// [`Severity::Error`]; an aggregate counts as [`Severity::Warn`] only when
/// all of its errors are warnings.
pub fn severity_of(err: &(dyn Error + 'static)) -> Severity {
    node_of(err).map_or(Severity::Error, NodeRef::severity)
}

/// Logs `err` through `logger`, choosing `warn` or `error` by severity.
///
/// `None` and empty aggregates are not logged.
///
/// # Example
///
/// ```rust
/// use faultline::{log, ErrorValue, RecordingLogger, Severity};
///
/// let logger = RecordingLogger::new();
/// let warning = ErrorValue::new("disk almost full").with_severity(Severity::Warn);
///
/// log(Some(&warning), &logger);
/// log(None, &logger);
///
/// let records = logger.records();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].severity, Severity::Warn);
/// ```
pub fn log(err: Option<&(dyn Error + 'static)>, logger: &dyn Logger) {
    let Some(err) = err else {
        return;
    };
    if node_of(err).is_some_and(NodeRef::is_empty) {
        return;
    }
    match severity_of(err) {
        Severity::Warn => logger.warn(err),
        _ => logger.error(err),
    }
}

/// Forwards errors to `tracing::warn!` and `tracing::error!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, err: &dyn Error) {
        tracing::warn!(target: "faultline", "{}", err);
    }

    fn error(&self, err: &dyn Error) {
        tracing::error!(target: "faultline", "{}", err);
    }
}

/// Sends every record to each of its loggers in order.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use faultline::{log, ChainLogger, ErrorValue, RecordingLogger};
///
/// let first = Arc::new(RecordingLogger::new());
/// let second = Arc::new(RecordingLogger::new());
/// let chain = ChainLogger::new()
///     .with(Arc::clone(&first))
///     .with(Arc::clone(&second));
///
/// log(Some(&ErrorValue::new("boom")), &chain);
/// assert_eq!(first.len(), 1);
/// assert_eq!(second.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct ChainLogger {
    loggers: Vec<Arc<dyn Logger>>,
}

impl ChainLogger {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a logger to the end of the chain.
    pub fn with<L: Logger + 'static>(mut self, logger: L) -> Self {
        self.loggers.push(Arc::new(logger));
        self
    }

    /// Returns the number of loggers in the chain.
    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    /// Returns true if the chain has no loggers.
    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }
}

impl Logger for ChainLogger {
    fn warn(&self, err: &dyn Error) {
        for logger in &self.loggers {
            logger.warn(err);
        }
    }

    fn error(&self, err: &dyn Error) {
        for logger in &self.loggers {
            logger.error(err);
        }
    }
}

/// One captured log call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// `Warn` or `Error`, depending on which method was called.
    pub severity: Severity,
    /// The rendered error.
    pub message: String,
}

/// Keeps every log call in memory.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingLogger {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the captured records.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Returns the number of captured records.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Returns true if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Discards all captured records.
    pub fn clear(&self) {
        self.records.lock().clear();
    }

    fn push(&self, severity: Severity, err: &dyn Error) {
        // Rendering may run user localizers that log here too.
        let message = err.to_string();
        self.records.lock().push(LogRecord { severity, message });
    }
}

impl Logger for RecordingLogger {
    fn warn(&self, err: &dyn Error) {
        self.push(Severity::Warn, err);
    }

    fn error(&self, err: &dyn Error) {
        self.push(Severity::Error, err);
    }
}
