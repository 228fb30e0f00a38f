//! Introspection core for app-inspector.
//!
//! Application types describe themselves through the [`describe`] traits and
//! are registered in a [`registry::TypeRegistry`]. The catalog scanner maps a
//! source tree onto registered names, the introspectors turn registered types
//! into the records defined in `inspector-records`, and [`control`] dispatches
//! one command against a freshly booted [`runtime::Application`].

pub mod catalog;
pub mod cli;
pub mod config;
pub mod control;
pub mod describe;
pub mod error;
pub mod introspect;
pub mod registry;
pub mod runtime;
pub mod schema;
pub mod search;

pub use config::AppConfig;
pub use control::{Request, dispatch, execute};
pub use error::InspectError;
pub use registry::{Category, TypeRegistry};
pub use runtime::{Application, Bootstrap, BootstrapError};
