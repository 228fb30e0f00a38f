//! Enumerated domain values.

pub mod account_type;
pub mod post_status;
pub mod visibility;

pub use account_type::AccountType;
pub use post_status::PostStatus;
pub use visibility::Visibility;
