use inspector_core::describe::{CaseDef, Describable, Enumeration, MethodDef, TypeExpr};
use inspector_records::BackingType;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(i64)]
pub enum PostStatus {
    #[default]
    Draft = 0,
    Review = 1,
    Published = 2,
}

impl PostStatus {
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Published)
    }
}

impl Describable for PostStatus {}

impl Enumeration for PostStatus {
    fn backing() -> Option<BackingType> {
        Some(BackingType::Int)
    }

    fn cases() -> Vec<CaseDef> {
        vec![
            CaseDef::backed("Draft", Self::Draft as i64),
            CaseDef::backed("Review", Self::Review as i64),
            CaseDef::backed("Published", Self::Published as i64),
        ]
    }

    fn methods() -> Vec<MethodDef> {
        vec![MethodDef::new("is_visible").returning(TypeExpr::Named("bool"))]
    }
}
