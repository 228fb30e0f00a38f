use inspector_core::describe::{Describable, Model};

/// Columns shared by every account kind.
#[derive(Debug, Default)]
pub struct Account {
    pub owner_id: i64,
    pub balance: String,
}

impl Describable for Account {}

impl Model for Account {
    const ABSTRACT: bool = true;

    fn table(&self) -> String {
        "accounts".to_string()
    }
}
