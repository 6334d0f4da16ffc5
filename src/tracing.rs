//! # Observability & Tracing
//!
//! The mapper logs through the `tracing` crate with structured fields. Every
//! event about one mapped type carries `resource_type`; conversions carry
//! `value_type`.
//!
//! ## What Gets Traced
//!
//! - **Configuration** (`debug`): registrations, default mapping, ignored properties
//! - **Registry events** (`info`): promotions, wrapper registrations, resets
//! - **Conversions** (`debug`/`trace`): entry per call, unwrap and per-resource steps
//! - **Failures** (`warn`): conversion errors and edits to unregistered types
//!
//! ## Usage Examples
//!
//! ```bash
//! # Registry events only
//! RUST_LOG=info cargo run -p flat-results-sample
//!
//! # Every mapping edit and conversion
//! RUST_LOG=flat_results=debug cargo run -p flat-results-sample
//!
//! # Per-resource conversion steps
//! RUST_LOG=flat_results=trace cargo run -p flat-results-sample
//! ```
//!
//! With `RUST_LOG=debug` a startup looks like:
//!
//! ```text
//! DEBUG Definition registered resource_type=ProductModel
//! DEBUG Default mapping applied resource_type=ProductModel attributes=5 relationships=0
//! DEBUG Definition registered resource_type=CategoryModel
//!  INFO Attribute promoted to relationship resource_type=ProductModel property=Category related_type=CategoryModel
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Call once at process start; a second call panics inside `tracing-subscriber`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // resource_type already names the subject
        .compact()
        .init();
}
