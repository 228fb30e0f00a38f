pub mod accounts;
pub mod audit_log;
pub mod post;
pub mod traits;
pub mod user;
