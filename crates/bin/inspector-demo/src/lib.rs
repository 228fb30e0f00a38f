//! Sample application wired for app-inspector.
//!
//! The models and enums here are registered in [`app::registry`] and laid
//! out on disk the way `inspector.toml` describes, so the extractor binary
//! can catalog and describe them.

pub mod app;
pub mod enums;
pub mod models;

pub use app::DemoApp;
