//! Integration tests for accumulating failures with stillwater.

use faultline::{accumulate, combine, Aggregate, ErrorKind, ErrorValue, Outcome};
use serde_json::json;
use stillwater::Validation;

fn parse_port(raw: &str) -> Result<u16, ErrorValue> {
    raw.parse::<u16>().map_err(|e| {
        ErrorValue::new(e.to_string())
            .with_kind(ErrorKind::Validation)
            .with_context_value("input", raw)
    })
}

#[test]
fn test_accumulate_keeps_every_failure() {
    let outcome = accumulate(["80", "http", "443", "99999"].into_iter().map(parse_port));

    match outcome {
        Validation::Success(ports) => panic!("expected failures, got {ports:?}"),
        Validation::Failure(errors) => {
            assert_eq!(errors.len(), 2);
            let inputs: Vec<_> = errors
                .iter()
                .map(|e| e.context().get("input").cloned())
                .collect();
            assert_eq!(inputs, vec![Some(json!("http")), Some(json!("99999"))]);
        }
    }
}

#[test]
fn test_accumulate_success() {
    let outcome = accumulate(["1", "2"].into_iter().map(parse_port));
    assert_eq!(outcome.into_result().unwrap(), vec![1, 2]);
}

#[test]
fn test_into_result_and_outcome() {
    let empty = Aggregate::new();
    assert!(empty.clone().into_result().is_ok());

    let outcome: Outcome<&str> = empty.into_outcome("done");
    assert!(outcome.is_success());

    let failed = combine([ErrorValue::new("x")]);
    assert_eq!(failed.clone().into_result(), Err(failed));
}

#[test]
fn test_question_mark_with_aggregate() {
    fn check(values: &[i32]) -> Result<(), Aggregate> {
        combine(
            values
                .iter()
                .filter(|v| **v < 0)
                .map(|v| ErrorValue::new(format!("negative: {v}"))),
        )
        .into_result()?;
        Ok(())
    }

    assert!(check(&[1, 2]).is_ok());
    assert_eq!(check(&[-1, 2, -3]).unwrap_err().len(), 2);
}
