//! Error accumulation with stillwater's `Validation`.
//!
//! [`Aggregate`] is a `Semigroup`, so it can be the failure side of a
//! [`stillwater::Validation`]. This module provides the [`Outcome`] alias and
//! [`accumulate`], which runs every fallible step and keeps every failure
//! instead of stopping at the first one.

use stillwater::prelude::*;
use stillwater::Validation;

use crate::error::{Aggregate, ErrorNode};

/// A `Validation` whose failure side is a flattened [`Aggregate`].
pub type Outcome<T> = Validation<T, Aggregate>;

/// Collects all successes, or all failures if there are any.
///
/// Results are consumed in order. Failures that are aggregates are
/// flattened into the collected aggregate.
///
/// # Example
///
/// ```rust
/// use faultline::{accumulate, ErrorValue};
///
/// let parsed = accumulate(["1", "x", "3", "y"].iter().map(|s| {
///     s.parse::<u32>()
///         .map_err(|_| ErrorValue::new(format!("not a number: {s}")))
/// }));
///
/// let errors = parsed.into_result().unwrap_err();
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors.first().map(|e| e.msg()), Some("not a number: x"));
/// ```
pub fn accumulate<T, E, I>(results: I) -> Outcome<Vec<T>>
where
    E: Into<ErrorNode>,
    I: IntoIterator<Item = Result<T, E>>,
{
    let mut values = Vec::new();
    let mut failures: Option<Aggregate> = None;

    for result in results {
        match result {
            Ok(value) => values.push(value),
            Err(err) => {
                let next = Aggregate::from_nodes([err.into()]);
                failures = Some(match failures {
                    Some(acc) => acc.combine(next),
                    None => next,
                });
            }
        }
    }

    match failures {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(values),
    }
}

impl Aggregate {
    /// Returns `Ok(())` when empty and `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), Aggregate> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Returns `value` as a success when empty, or `self` as a failure.
    pub fn into_outcome<T>(self, value: T) -> Outcome<T> {
        if self.is_empty() {
            Validation::Success(value)
        } else {
            Validation::Failure(self)
        }
    }
}
