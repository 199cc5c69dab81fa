//! Integration tests for id lookup and severity filtering over `dyn Error`.

use std::error::Error;
use std::fmt;

use faultline::{
    cast, combine, contains_by_id, error_or_nil, find_by_id, get_id, get_kind, set_id, wrap,
    ErrorKind, ErrorValue, Severity,
};

#[derive(Debug)]
struct Plain;

impl fmt::Display for Plain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("plain failure")
    }
}

impl Error for Plain {}

#[test]
fn test_find_second_by_id() {
    let agg = combine([ErrorValue::new_with([set_id("a")]), ErrorValue::new_with([set_id("b")])]);

    let found = find_by_id(&agg, "b").unwrap();
    assert_eq!(found, &agg.as_slice()[1]);
}

#[test]
fn test_lookup_through_boxed_error() {
    let node = wrap(
        ErrorValue::new("old").with_id("old"),
        ErrorValue::new("new").with_id("new"),
    )
    .unwrap();
    let boxed: Box<dyn Error + Send + Sync> = Box::new(node);

    assert!(contains_by_id(&*boxed, "old"));
    assert!(contains_by_id(&*boxed, "new"));
    assert!(!contains_by_id(&*boxed, "other"));
}

#[test]
fn test_lookup_on_foreign_error_misses() {
    assert!(find_by_id(&Plain, "").is_none());
    assert!(!contains_by_id(&Plain, "anything"));
    assert_eq!(get_id(&Plain), "");
    assert_eq!(get_kind(&Plain), ErrorKind::Unknown);
}

#[test]
fn test_error_or_nil_filters_warnings() {
    let warn = ErrorValue::new("w").with_severity(Severity::Warn);
    let fail = ErrorValue::new("f");

    assert!(error_or_nil(&warn).is_none());
    assert!(error_or_nil(&combine([warn.clone(), warn.clone()])).is_none());

    let agg = combine([warn, fail]);
    let first = error_or_nil(&agg).unwrap();
    assert_eq!(first.downcast_ref::<ErrorValue>().map(|e| e.msg()), Some("f"));

    assert!(error_or_nil(&Plain).is_some());
}

#[test]
fn test_cast_foreign_error() {
    let err = cast(&Plain);
    assert_eq!(err.msg(), "plain failure");
    assert_eq!(err.id(), "");
}

#[test]
fn test_get_id_and_kind() {
    let err = ErrorValue::new("x").with_id("E7").with_kind("CUSTOM");
    assert_eq!(get_id(&err), "E7");
    assert_eq!(get_kind(&err), ErrorKind::custom("CUSTOM"));
}
