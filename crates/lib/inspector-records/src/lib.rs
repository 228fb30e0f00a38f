//! Record types and naming helpers for app-inspector.
//!
//! This crate defines the externally visible data model produced by the
//! introspectors: catalog entries, model schema records, enum records and the
//! values projection, plus the naming rules that tie display names to
//! qualified names.

pub mod models;
pub mod schema;

pub use models::*;
