//! Integration tests for building and deriving error values.

use faultline::{
    append_context, append_operations, set_context, set_id, set_kind, set_msg, set_operation,
    set_operations, set_severity, Context, ErrorKind, ErrorValue, MaybeError, Severity,
};
use serde_json::json;

#[test]
fn test_message_only_renders_message() {
    let err = ErrorValue::new("hello");
    assert_eq!(err.to_string(), "hello");
}

#[test]
fn test_new_with_operation_context_and_message() {
    let err = ErrorValue::new_with([
        set_operation("write"),
        set_context([("hello", "world")]),
        set_msg("connection error"),
    ]);

    assert_eq!(err.to_string(), "[write] <hello:world> -- connection error");
}

#[test]
fn test_context_renders_sorted() {
    let err = ErrorValue::new_with([set_context([("b", 1), ("a", 2)])]);
    assert_eq!(err.to_string(), "<a:2,b:1>");

    let reversed = ErrorValue::new_with([append_context("a", 2), append_context("b", 1)]);
    assert_eq!(reversed.to_string(), err.to_string());
}

#[test]
fn test_full_record() {
    let err = ErrorValue::new_with([
        set_id("E42"),
        set_kind(ErrorKind::custom("QUOTA")),
        set_severity(Severity::Warn),
        set_operations(["upload", "store"]),
        append_operations(["flush"]),
        append_context("bytes", 1024),
        set_msg("quota exceeded"),
    ]);

    assert_eq!(err.id(), "E42");
    assert_eq!(err.kind().as_str(), "QUOTA");
    assert!(err.is_warn());
    assert_eq!(
        err.to_string(),
        "(QUOTA) [WARN] [upload,store,flush] <bytes:1024> -- quota exceeded"
    );
}

#[test]
fn test_derivation_leaves_original_untouched() {
    let base = ErrorValue::new("base")
        .with_id("base")
        .with_context(Context::new().with("k", "v"));
    let derived = base.with_options([set_id("derived"), append_context("extra", json!(true))]);

    assert_eq!(base.id(), "base");
    assert_eq!(base.context().len(), 1);
    assert_eq!(derived.id(), "derived");
    assert_eq!(derived.context().len(), 2);
    assert_eq!(derived.context().get("extra"), Some(&json!(true)));
}

#[test]
fn test_absent_error_is_nil_safe() {
    let none: Option<ErrorValue> = None;

    assert_eq!(none.id(), "");
    assert_eq!(none.msg(), "");
    assert!(none.operations().is_empty());
    assert!(none.kind().is_unknown());
    assert_eq!(none.severity(), Severity::Unknown);
    assert!(none.context().is_empty());
    assert_eq!(none.translate_msg(), "");
    assert!(none.with_options([set_msg("x")]).is_none());
    assert!(none.error_or_nil().is_none());
}

#[test]
fn test_severity_gate() {
    let warn = ErrorValue::new("w").with_severity(Severity::Warn);
    let error = ErrorValue::new("e").with_severity(Severity::Error);
    let unset = ErrorValue::new("u");

    assert!(warn.error_or_nil().is_none());
    assert_eq!(error.error_or_nil(), Some(&error));
    assert_eq!(unset.error_or_nil(), Some(&unset));
}

#[test]
fn test_alternate_format_is_json() {
    let err = ErrorValue::new("boom").with_id("E1");
    let value: serde_json::Value = serde_json::from_str(&format!("{err:#}")).unwrap();
    assert_eq!(value["id"], json!("E1"));
    assert_eq!(value["msg"], json!("boom"));
}

#[test]
fn test_from_foreign_error() {
    let parse_err = "x".parse::<i32>().unwrap_err();
    let err = ErrorValue::from_error(&parse_err);
    assert_eq!(err.msg(), parse_err.to_string());
}
