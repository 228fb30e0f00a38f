/// Mixin path reported by models keyed on a generated UUID.
pub const HAS_UUID: &str = "app::models::concerns::HasUuid";

/// Assigns a key when a record is created without one.
pub trait HasUuid {
    fn uuid(&self) -> &str;

    fn has_key(&self) -> bool {
        !self.uuid().is_empty()
    }
}
