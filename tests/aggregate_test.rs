//! Integration tests for combining and wrapping errors.

use std::error::Error;

use faultline::{combine, wrap, Aggregate, ErrorNode, ErrorValue, Severity};
use stillwater::prelude::*;

fn msgs(agg: &Aggregate) -> Vec<&str> {
    agg.iter().map(|e| e.msg()).collect()
}

#[test]
fn test_combine_drops_nil_and_renders_report() {
    let agg = combine([Some(ErrorValue::new("one")), None, Some(ErrorValue::new("two"))]);

    assert_eq!(agg.len(), 2);
    assert_eq!(
        agg.to_string(),
        "the following errors occurred:\n\t#1 one\n\t#2 two\n"
    );
}

#[test]
fn test_flattening_is_idempotent() {
    let a = ErrorValue::new("a");
    let b = ErrorValue::new("b");
    let c = ErrorValue::new("c");
    let d = ErrorValue::new("d");

    let all = combine([combine([a, b]), combine([c, d])]);
    assert_eq!(msgs(&all), vec!["a", "b", "c", "d"]);

    let again = combine([all.clone()]);
    assert_eq!(again, all);
}

#[test]
fn test_macro_mixes_leaves_groups_and_nil() {
    let group = combine([ErrorValue::new("b"), ErrorValue::new("c")]);
    let agg = faultline::combine!(
        ErrorValue::new("a"),
        None::<ErrorValue>,
        group,
        ErrorNode::Leaf(ErrorValue::new("d")),
    );
    assert_eq!(msgs(&agg), vec!["a", "b", "c", "d"]);
}

#[test]
fn test_wrap_with_nil_is_identity() {
    let x = ErrorValue::new("x");
    assert_eq!(wrap(None::<ErrorValue>, x.clone()), Some(ErrorNode::Leaf(x.clone())));
    assert_eq!(wrap(x.clone(), None::<ErrorValue>), Some(ErrorNode::Leaf(x)));
    assert_eq!(wrap(None::<ErrorValue>, None::<ErrorValue>), None);
}

#[test]
fn test_wrap_flattens_into_existing_group() {
    let first = wrap(ErrorValue::new("1"), ErrorValue::new("2"));
    let second = wrap(first, ErrorValue::new("3")).unwrap();

    let agg = second.as_aggregate().unwrap();
    assert_eq!(msgs(agg), vec!["1", "2", "3"]);
}

#[test]
fn test_empty_aggregate_renders_empty() {
    let agg = combine([None::<ErrorValue>]);
    assert!(agg.is_empty());
    assert_eq!(agg.to_string(), "");
}

#[test]
fn test_is_matches_children() {
    let target = ErrorValue::new("target").with_id("t");
    let agg = combine([ErrorValue::new("other"), target.clone()]);

    assert!(agg.is(&target));
    assert!(!agg.is(&ErrorValue::new("missing")));
    assert!(ErrorNode::Group(agg).is(&target));
}

#[test]
fn test_downcast_from_boxed_error() {
    let boxed: Box<dyn Error + Send + Sync> =
        Box::new(combine([ErrorValue::new("a"), ErrorValue::new("b")]));

    let agg = boxed.downcast_ref::<Aggregate>().unwrap();
    assert_eq!(agg.len(), 2);
    assert_eq!(boxed.source().map(|e| e.to_string()), Some("b".to_string()));
}

#[test]
fn test_errors_returns_copy() {
    let agg = combine([ErrorValue::new("a")]);
    let mut copy = agg.errors();
    copy.push(ErrorValue::new("b"));

    assert_eq!(agg.len(), 1);
    assert_eq!(copy.len(), 2);
}

#[test]
fn test_error_or_nil_on_aggregate() {
    let warn = ErrorValue::new("w").with_severity(Severity::Warn);
    let fail = ErrorValue::new("f").with_severity(Severity::Error);

    assert!(combine([warn.clone()]).error_or_nil().is_none());
    assert_eq!(combine([warn, fail.clone()]).error_or_nil(), Some(&fail));
}

#[test]
fn test_semigroup_combine_flattens() {
    let left = combine([ErrorValue::new("1"), ErrorValue::new("2")]);
    let right = combine([ErrorValue::new("3")]);

    let merged = left.combine(right);
    assert_eq!(msgs(&merged), vec!["1", "2", "3"]);
}
