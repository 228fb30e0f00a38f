//! Persisted entities.

pub mod accounts;
pub mod concerns;
pub mod post;
pub mod user;

pub use accounts::{Account, IraAccount};
pub use post::Post;
pub use user::User;
