//! # Document Model
//!
//! The output data structures produced by the conversion engine:
//!
//! - [`Resource`] - type tag, identifier, optional attributes and relationships
//! - [`ResourceCollection`] - identity-deduplicated set of resources
//! - [`Document`] - primary data, deduplicated `included` set and optional metadata
//!
//! Documents are transient values owned by the caller; they hold no references
//! back into the [`Registry`](crate::Registry). Serializing a document with
//! `serde` yields the wire shape:
//!
//! ```json
//! {
//!   "data": { "type": "Product", "id": "1",
//!             "attributes": { "Name": "Product1" },
//!             "relationships": { "Category": { "data": { "type": "Category", "id": "1" } } } },
//!   "included": [ { "type": "Category", "id": "1", "attributes": { "Name": "Category1" } } ],
//!   "meta": { "TotalCount": 4 }
//! }
//! ```

mod document;
mod resource;

pub use document::Document;
pub use resource::{Data, Resource, ResourceCollection};

/// Top-level document metadata, in insertion order.
pub type Meta = indexmap::IndexMap<String, serde_json::Value>;
