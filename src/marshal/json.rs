//! The JSON format.
//!
//! A single value renders as an object with the keys `id`, `operation`,
//! `file_line`, `error_type`, `severity`, `context` and `msg`, in that
//! order. `file_line` is `""` when no caller was recorded. `context` is
//! `null` when empty and an object with sorted keys otherwise. An aggregate
//! renders as `{"count":N,"messages":[...]}`; its children are always
//! written as objects, whatever marshaller they carry.

use std::io::Write;

use serde_json::Value;

use crate::error::{ErrorValue, NodeRef};
use crate::marshal::{MarshalError, Marshaller};
use crate::translate::Translator;

/// Renders error values as JSON.
///
/// # Example
///
/// ```rust
/// use faultline::{ErrorValue, JsonMarshaller, Marshaller, Translator};
///
/// let err = ErrorValue::new("not found").with_id("E404").with_operation("get");
/// let bytes = JsonMarshaller
///     .marshal(Some((&err).into()), &Translator::none())
///     .unwrap();
///
/// assert_eq!(
///     String::from_utf8(bytes).unwrap(),
///     r#"{"id":"E404","operation":"get","file_line":"","error_type":"UNKNOWN","severity":"UNKNOWN","context":null,"msg":"not found"}"#
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMarshaller;

impl Marshaller for JsonMarshaller {
    fn marshal_to(
        &self,
        node: Option<NodeRef<'_>>,
        translator: &Translator,
        w: &mut dyn Write,
    ) -> Result<(), MarshalError> {
        match node {
            None => Ok(()),
            Some(NodeRef::Leaf(err)) => write_leaf(w, err, translator),
            Some(NodeRef::Group(agg)) if agg.is_empty() => Ok(()),
            Some(NodeRef::Group(agg)) => {
                write!(w, "{{\"count\":{},\"messages\":[", agg.len())?;
                for (i, err) in agg.iter().enumerate() {
                    if i > 0 {
                        w.write_all(b",")?;
                    }
                    write_leaf(w, err, translator)?;
                }
                w.write_all(b"]}")?;
                Ok(())
            }
        }
    }
}

fn write_leaf(w: &mut dyn Write, err: &ErrorValue, translator: &Translator) -> Result<(), MarshalError> {
    let operation = err
        .operations()
        .iter()
        .map(|op| op.as_str())
        .collect::<Vec<_>>()
        .join(",");

    w.write_all(b"{\"id\":")?;
    serde_json::to_writer(&mut *w, err.id())?;

    w.write_all(b",\"operation\":")?;
    serde_json::to_writer(&mut *w, &operation)?;

    w.write_all(b",\"file_line\":")?;
    let file_line = err
        .caller()
        .map(|caller| format!("{}:{}", caller.file(), caller.line()))
        .unwrap_or_default();
    serde_json::to_writer(&mut *w, &file_line)?;

    w.write_all(b",\"error_type\":")?;
    serde_json::to_writer(&mut *w, err.kind().as_str())?;

    w.write_all(b",\"severity\":")?;
    serde_json::to_writer(&mut *w, err.severity().as_str())?;

    w.write_all(b",\"context\":")?;
    if err.context().is_empty() {
        serde_json::to_writer(&mut *w, &Value::Null)?;
    } else {
        serde_json::to_writer(&mut *w, &err.context().to_json())?;
    }

    w.write_all(b",\"msg\":")?;
    let msg = translator.translate(err);
    serde_json::to_writer(&mut *w, &*msg)?;

    w.write_all(b"}")?;
    Ok(())
}
