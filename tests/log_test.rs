//! Integration tests for severity-driven logging.

use std::io;
use std::sync::Arc;

use faultline::{
    combine, combine_with_log, log, severity_of, wrap_with_log, ChainLogger, Config, ErrorNode,
    ErrorValue, RecordingLogger, Severity,
};

fn recording_config() -> (Arc<RecordingLogger>, Config) {
    let logger = Arc::new(RecordingLogger::new());
    let config = Config::new().with_logger(Arc::clone(&logger));
    (logger, config)
}

#[test]
fn test_dispatch_by_severity() {
    let logger = RecordingLogger::new();

    log(Some(&ErrorValue::new("w").with_severity(Severity::Warn)), &logger);
    log(Some(&ErrorValue::new("e").with_severity(Severity::Error)), &logger);
    log(Some(&ErrorValue::new("u")), &logger);

    let severities: Vec<_> = logger.records().iter().map(|r| r.severity).collect();
    assert_eq!(severities, vec![Severity::Warn, Severity::Error, Severity::Error]);
}

#[test]
fn test_nil_is_noop() {
    let logger = RecordingLogger::new();
    log(None, &logger);
    assert!(logger.is_empty());
}

#[test]
fn test_record_message_is_rendered_error() {
    let logger = RecordingLogger::new();
    let err = ErrorValue::new("boom").with_operation("sync");
    log(Some(&err), &logger);

    assert_eq!(logger.records()[0].message, "[sync] -- boom");
}

#[test]
fn test_severity_of_mixed_aggregate() {
    let warn = ErrorValue::new("w").with_severity(Severity::Warn);
    let all_warn = combine([warn.clone(), warn.clone()]);
    let mixed = combine([warn, ErrorValue::new("e")]);

    assert_eq!(severity_of(&all_warn), Severity::Warn);
    assert_eq!(severity_of(&mixed), Severity::Error);
    assert_eq!(severity_of(&io::Error::new(io::ErrorKind::Other, "x")), Severity::Error);
}

#[test]
fn test_new_with_log() {
    let (logger, config) = recording_config();
    let err = ErrorValue::new_with_log("created", &config);

    assert_eq!(err.msg(), "created");
    assert_eq!(logger.len(), 1);
    assert_eq!(logger.records()[0].message, "created");
}

#[test]
fn test_combine_and_wrap_with_log() {
    let (logger, config) = recording_config();

    let agg = combine_with_log([ErrorValue::new("a"), ErrorValue::new("b")], &config);
    assert_eq!(agg.len(), 2);

    let node = wrap_with_log(None::<ErrorValue>, ErrorValue::new("c"), &config);
    assert_eq!(node, Some(ErrorNode::Leaf(ErrorValue::new("c"))));

    let nothing = wrap_with_log(None::<ErrorValue>, None::<ErrorValue>, &config);
    assert!(nothing.is_none());

    assert_eq!(logger.len(), 2);
}

#[test]
fn test_empty_aggregate_is_not_logged() {
    let (logger, config) = recording_config();
    combine_with_log([None::<ErrorValue>], &config);
    assert!(logger.is_empty());
}

#[test]
fn test_chain_logger_fans_out() {
    let first = Arc::new(RecordingLogger::new());
    let second = Arc::new(RecordingLogger::new());
    let chain = ChainLogger::new()
        .with(Arc::clone(&first))
        .with(Arc::clone(&second));
    let config = Config::new().with_logger(chain);

    ErrorValue::new("w")
        .with_severity(Severity::Warn)
        .log(&config);

    for logger in [&first, &second] {
        let records = logger.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity, Severity::Warn);
    }
}
