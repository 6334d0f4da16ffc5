//! # Mapping Errors
//!
//! This module defines the error types returned by the conversion engine and the
//! output formatter. Conversion is deterministic, so none of these are retried:
//! they surface to the caller as hard failures.

use thiserror::Error;

/// Errors that can occur while turning a value into a [`Document`](crate::Document).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MappingError {
    /// No resource definition (or wrapper) is registered for the type.
    #[error("No resource definition registered for type: {0}")]
    ConfigNotFound(String),

    /// The definition exists but no identifier accessor was ever resolved,
    /// or the identifier value itself is null.
    #[error("No identifier resolved for type: {0}")]
    MissingIdentifier(String),

    /// A definition was handed a value of another runtime type.
    ///
    /// Definitions and wrappers are looked up by the value's own type, so the
    /// public entry points never produce this; it guards the internal dispatch.
    #[error("Type mismatch: definition for {expected} received {found}")]
    TypeMismatch { expected: String, found: String },
}

/// Errors raised by the [`DocumentFormatter`](crate::format::DocumentFormatter).
#[derive(Debug, Error)]
pub enum FormatError {
    /// The value could not be mapped to a document.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// The produced document could not be serialized.
    #[error("Document serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The formatter configuration could not be parsed.
    #[error("Formatter configuration error: {0}")]
    Config(#[source] serde_json::Error),
}
