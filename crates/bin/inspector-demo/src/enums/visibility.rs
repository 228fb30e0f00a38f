use inspector_core::describe::{CaseDef, Describable, Enumeration};
use inspector_records::BackingType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Unlisted,
    Private,
}

impl Describable for Visibility {}

impl Enumeration for Visibility {
    fn backing() -> Option<BackingType> {
        None
    }

    fn cases() -> Vec<CaseDef> {
        vec![
            CaseDef::pure("Public"),
            CaseDef::pure("Unlisted"),
            CaseDef::pure("Private"),
        ]
    }
}
