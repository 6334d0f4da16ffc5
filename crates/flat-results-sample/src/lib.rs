//! # Flat Results Sample Library
//!
//! A small catalog API built on `flat-results`: seeded models, their mapping
//! configuration and request handlers that answer with formatted documents.
//! Exposed as a library for integration testing.

pub mod catalog;
pub mod controllers;
pub mod mapping;
pub mod model;
