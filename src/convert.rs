//! # Conversion Engine
//!
//! Turns a live value into a [`Document`] by walking its [`Shape`]:
//!
//! 1. registered wrappers and [`Envelope`](crate::reflect::Envelope)s are
//!    unwrapped first, their payload converted and their metadata merged.
//!    Both are found behind `Option`, `Box` and `Arc` as well;
//! 2. sequences become a collection of their converted items;
//! 3. objects are converted through their [`ResourceDefinition`](crate::ResourceDefinition),
//!    which recurses into relationships for linkage and side-loaded resources.
//!
//! The walk is eager and unbounded in depth. It terminates on finite acyclic
//! relationship graphs; a cycle (A references B references A) never returns.

use crate::error::MappingError;
use crate::fields::FieldSelector;
use crate::model::{Document, Meta};
use crate::reflect::{Reflect, Shape};
use crate::registry::Snapshot;
use tracing::trace;

/// One conversion pass, pinned to a single registry snapshot.
pub(crate) struct Converter<'s> {
    snapshot: &'s Snapshot,
}

impl<'s> Converter<'s> {
    pub(crate) fn new(snapshot: &'s Snapshot) -> Self {
        Self { snapshot }
    }

    pub(crate) fn convert(
        &self,
        value: &dyn Reflect,
        identifier_only: bool,
        fields: Option<&FieldSelector>,
    ) -> Result<Document, MappingError> {
        let key = value.type_key();
        if let Some(wrapper) = self.snapshot.wrapper(key) {
            let payload = wrapper
                .payload(value.as_any())
                .ok_or_else(|| MappingError::TypeMismatch {
                    expected: wrapper.type_key().name().to_owned(),
                    found: key.name().to_owned(),
                })?;
            trace!(wrapper_type = %key, "Unwrap");
            let document = self.convert(payload, identifier_only, fields)?;
            return Ok(merge_meta(document, wrapper.meta(value.as_any())));
        }

        match value.shape() {
            Shape::Envelope(envelope) => {
                trace!(wrapper_type = %key, "Unwrap");
                let document = self.convert(envelope.payload(), identifier_only, fields)?;
                Ok(merge_meta(document, envelope.meta()))
            }
            Shape::Sequence(items) => {
                let mut document = Document::collection();
                for item in items {
                    document.append(self.convert(item, identifier_only, fields)?);
                }
                Ok(document)
            }
            Shape::Object(object) => {
                // Reached through a pointer or `Option`; the wrapper is keyed by the pointee.
                if object.type_key() != key && self.snapshot.wrapper(object.type_key()).is_some() {
                    return self.convert(object, identifier_only, fields);
                }
                let definition = self.snapshot.definition(object.type_key())?;
                trace!(resource_type = definition.type_name(), identifier_only, "Convert");
                definition.to_document(self, object, identifier_only, fields)
            }
            Shape::Document(document) => Ok(document.clone()),
            Shape::Null => Ok(Document::new()),
            Shape::Scalar => Err(MappingError::ConfigNotFound(key.name().to_owned())),
        }
    }
}

fn merge_meta(mut document: Document, meta: Option<Meta>) -> Document {
    for (key, value) in meta.into_iter().flatten() {
        document.add_meta(key, value);
    }
    document
}
