//! The line-oriented text format.
//!
//! A single value renders as
//!
//! ```text
//! file.rs:42 (kind) [SEVERITY] [op1,op2] <k1:v1,k2:v2> -- message
//! ```
//!
//! where `file.rs:42` is the recorded caller, with every section omitted when empty and the ` -- ` separator written
//! only if some section was written and the message is non-empty. An
//! aggregate renders as a header line followed by one numbered line per
//! error:
//!
//! ```text
//! the following errors occurred:
//! 	#1 first
//! 	#2 second
//! ```

use std::fmt;
use std::io::{self, Write};

use crate::attribute::Attribute;
use crate::error::{ErrorValue, NodeRef};
use crate::marshal::{MarshalError, Marshaller};
use crate::translate::Translator;

const MULTILINE_PREFIX: &[u8] = b"the following errors occurred:";
const MULTILINE_INDENT: &[u8] = b"\t#";
const MSG_SEPARATOR: &[u8] = b" -- ";

/// Renders error values as human-readable text.
///
/// # Example
///
/// ```rust
/// use faultline::{ErrorKind, ErrorValue, Marshaller, Severity, StringMarshaller, Translator};
///
/// let err = ErrorValue::new("not allowed")
///     .with_kind(ErrorKind::Validation)
///     .with_severity(Severity::Warn)
///     .with_operation("login")
///     .with_context_value("user", "bob");
///
/// let bytes = StringMarshaller
///     .marshal(Some((&err).into()), &Translator::none())
///     .unwrap();
/// assert_eq!(
///     String::from_utf8(bytes).unwrap(),
///     "(VALIDATION) [WARN] [login] <user:bob> -- not allowed"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StringMarshaller;

impl Marshaller for StringMarshaller {
    fn marshal_to(
        &self,
        node: Option<NodeRef<'_>>,
        translator: &Translator,
        w: &mut dyn Write,
    ) -> Result<(), MarshalError> {
        match node {
            None => Ok(()),
            Some(NodeRef::Leaf(err)) => Ok(write_leaf(w, err, translator)?),
            Some(NodeRef::Group(agg)) => write_lines(w, agg.as_slice(), translator),
        }
    }
}

/// Writes space-separated sections, remembering whether any was written.
struct Sections<'w> {
    w: &'w mut dyn Write,
    written: bool,
}

impl Sections<'_> {
    fn write(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        if self.written {
            self.w.write_all(b" ")?;
        }
        self.written = true;
        self.w.write_fmt(args)
    }
}

/// `op1,op2,...`
struct Joined<'a>(&'a [Attribute]);

impl fmt::Display for Joined<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(item.as_str())?;
        }
        Ok(())
    }
}

fn write_leaf(
    w: &mut dyn Write,
    err: &ErrorValue,
    translator: &Translator,
) -> io::Result<()> {
    let mut sections = Sections { w, written: false };

    if let Some(caller) = err.caller() {
        sections.write(format_args!("{}:{}", caller.file(), caller.line()))?;
    }
    if !err.kind().is_unknown() {
        sections.write(format_args!("({})", err.kind()))?;
    }
    if err.severity().is_valid() {
        sections.write(format_args!("[{}]", err.severity()))?;
    }
    if !err.operations().is_empty() {
        sections.write(format_args!("[{}]", Joined(err.operations())))?;
    }
    if !err.context().is_empty() {
        sections.write(format_args!("<{}>", err.context()))?;
    }

    let Sections { w, written } = sections;
    if written && !err.msg().is_empty() {
        w.write_all(MSG_SEPARATOR)?;
    }
    err.write_translate_msg(w, translator)?;
    Ok(())
}

/// Children with their own marshaller are rendered with it.
fn write_lines(
    w: &mut dyn Write,
    errors: &[ErrorValue],
    translator: &Translator,
) -> Result<(), MarshalError> {
    if errors.is_empty() {
        return Ok(());
    }

    w.write_all(MULTILINE_PREFIX)?;
    w.write_all(b"\n")?;
    for (i, err) in errors.iter().enumerate() {
        w.write_all(MULTILINE_INDENT)?;
        write!(w, "{} ", i + 1)?;
        match err.marshaller() {
            Some(own) => own.marshal_to(Some(NodeRef::Leaf(err)), translator, w)?,
            None => write_leaf(w, err, translator)?,
        }
        w.write_all(b"\n")?;
    }
    Ok(())
}
