//! Behavior shared between models.

pub mod has_uuid;
