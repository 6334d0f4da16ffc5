#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Flat Results
//!
//! > **Flatten object graphs into resource documents.**
//!
//! This crate turns in-memory object graphs into a flat, JSON:API-like
//! [`Document`]: every object becomes a [`Resource`] identified by
//! `(type, id)`, related objects are replaced by identifier linkages, and the
//! related objects themselves are side-loaded once into `included`.
//!
//! ## 🏗️ Design
//!
//! ### Definitions, not annotations
//! The shape of each resource is described by a [`ResourceDefinition`] held in
//! a [`Registry`]. Definitions are built fluently at startup:
//!
//! ```rust
//! use flat_results::{properties, Registry};
//!
//! pub struct Category { pub id: u32, pub name: String }
//! pub struct Product { pub id: u32, pub name: String, pub category: Option<Category> }
//!
//! properties!(Category { id: u32, name: String });
//! properties!(Product { id: u32, name: String, category: Option<Category> });
//!
//! let registry = Registry::new();
//! registry.register_new::<Category>().with_type_name("category").map_with_defaults();
//! registry.register_new::<Product>().with_type_name("product").map_with_defaults();
//!
//! let product = Product {
//!     id: 7,
//!     name: "Road bike".into(),
//!     category: Some(Category { id: 1, name: "Bikes".into() }),
//! };
//!
//! let document = registry.to_document(&product).unwrap();
//! let resource = document.resource().unwrap();
//! assert_eq!(resource.id(), "7");
//! assert!(resource.relationship("Category").is_some());
//! assert!(document.included_resource("category", "1").is_some());
//! ```
//!
//! ### Order independence
//! A property becomes a relationship when its type (or element type) is
//! registered. Registering a type later promotes matching attributes that
//! were mapped before it, so the final mapping does not depend on the order
//! of registration.
//!
//! ### Reflection without runtime lookups
//! Mapped structs expose typed field accessors through the
//! [`properties!`] macro. The engine walks values through the object-safe
//! [`Reflect`](reflect::Reflect) trait and never looks fields up by name while
//! converting.
//!
//! ## 🗺️ Module Tour
//!
//! - [`registry`] - the [`Registry`] and its [`DefinitionBuilder`]
//! - [`definition`] - the compiled [`ResourceDefinition`] of one type
//! - [`model`] - [`Document`], [`Resource`], [`ResourceCollection`]
//! - [`fields`] - sparse fieldsets ([`FieldSelector`])
//! - [`reflect`] - the reflection surface and the [`properties!`] macro
//! - [`format`] - JSON output adapter with camelCase keys and query parsing
//! - [`tracing`](mod@crate::tracing) - subscriber setup for binaries
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the sample catalog with debug logs
//! RUST_LOG=debug cargo run -p flat-results-sample
//!
//! # Run the tests
//! cargo test --workspace
//! ```

mod convert;
pub mod definition;
pub mod error;
pub mod fields;
pub mod format;
pub mod model;
pub mod reflect;
pub mod registry;
pub mod tracing;

pub use definition::{Member, ResourceDefinition};
pub use error::{FormatError, MappingError};
pub use fields::{FieldSelector, Selection};
pub use model::{Data, Document, Meta, Resource, ResourceCollection};
pub use reflect::{Envelope, Reflect, Typed};
pub use registry::{DefinitionBuilder, Registry, WrapperDefinition};

#[doc(hidden)]
pub mod __private {
    pub use paste::paste;
    pub use serde_json::{Map, Value};
}
