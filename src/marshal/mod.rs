//! Pluggable rendering of error values.
//!
//! A [`Marshaller`] turns nothing, a single [`ErrorValue`](crate::ErrorValue)
//! or an [`Aggregate`](crate::Aggregate) into bytes. Two strategies ship with
//! the crate:
//! - [`StringMarshaller`]: the human-readable line format (the default)
//! - [`JsonMarshaller`]: a fixed-key JSON object
//!
//! Marshallers are stateless and safe to share across threads. They only
//! fail when the destination writer fails.

mod json;
mod string;

use std::fmt;
use std::io;
use std::sync::Arc;

use crate::error::NodeRef;
use crate::translate::Translator;

pub use json::JsonMarshaller;
pub use string::StringMarshaller;

/// A rendering strategy for error values.
pub trait Marshaller: Send + Sync + fmt::Debug {
    /// Writes the rendering of `node` to `w`.
    ///
    /// `None` renders to nothing. Messages are resolved through `translator`.
    fn marshal_to(
        &self,
        node: Option<NodeRef<'_>>,
        translator: &Translator,
        w: &mut dyn io::Write,
    ) -> Result<(), MarshalError>;

    /// Returns the rendering of `node` as bytes.
    fn marshal(
        &self,
        node: Option<NodeRef<'_>>,
        translator: &Translator,
    ) -> Result<Vec<u8>, MarshalError> {
        let mut buf = Vec::new();
        self.marshal_to(node, translator, &mut buf)?;
        Ok(buf)
    }
}

impl<M: Marshaller + ?Sized> Marshaller for Arc<M> {
    fn marshal_to(
        &self,
        node: Option<NodeRef<'_>>,
        translator: &Translator,
        w: &mut dyn io::Write,
    ) -> Result<(), MarshalError> {
        (**self).marshal_to(node, translator, w)
    }
}

/// Errors that can occur while marshalling.
#[derive(Debug, thiserror::Error)]
pub enum MarshalError {
    /// The destination writer failed.
    #[error("failed to write rendered error: {0}")]
    Io(#[from] io::Error),

    /// A JSON fragment could not be written.
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}
