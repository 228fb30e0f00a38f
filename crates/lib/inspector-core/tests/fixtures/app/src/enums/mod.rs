pub mod color;
pub mod legacy_flag;
pub mod priority;
pub mod status;
