use inspector_core::describe::{
    AnnotationDef,
    CaseDef,
    Describable,
    Enumeration,
    MethodDef,
    Origin,
    ParamDef,
    TypeExpr,
};
use inspector_records::BackingType;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Traditional,
    Roth,
    Sep,
}

/// Human-readable case label.
#[derive(Debug, Serialize)]
pub struct Label {
    pub text: &'static str,
}

/// Annual contribution limit in whole dollars.
#[derive(Debug, Serialize)]
pub struct ContributionLimit {
    pub amount: u32,
    pub catch_up: bool,
}

impl AccountType {
    pub const ALL: [Self; 3] = [Self::Traditional, Self::Roth, Self::Sep];

    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Traditional => "traditional",
            Self::Roth => "roth",
            Self::Sep => "sep",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Traditional => "Traditional IRA",
            Self::Roth => "Roth IRA",
            Self::Sep => "SEP IRA",
        }
    }

    #[must_use]
    pub fn from_label(label: &str, ignore_case: bool) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| {
            if ignore_case {
                kind.label().eq_ignore_ascii_case(label)
            } else {
                kind.label() == label
            }
        })
    }
}

impl Describable for AccountType {
    fn mixins() -> Vec<&'static str> {
        vec!["app::enums::concerns::HasOptions"]
    }
}

impl Enumeration for AccountType {
    fn backing() -> Option<BackingType> {
        Some(BackingType::String)
    }

    fn cases() -> Vec<CaseDef> {
        Self::ALL
            .into_iter()
            .map(|kind| {
                let case = CaseDef::backed(case_name(kind), kind.value())
                    .annotated(AnnotationDef::new("Label", Label { text: kind.label() }));
                match kind {
                    Self::Sep => case,
                    Self::Traditional | Self::Roth => case.annotated(AnnotationDef::new(
                        "ContributionLimit",
                        ContributionLimit {
                            amount: 7_000,
                            catch_up: true,
                        },
                    )),
                }
            })
            .collect()
    }

    fn methods() -> Vec<MethodDef> {
        vec![
            MethodDef::new("label").returning(TypeExpr::Named("string")),
            MethodDef::new("from_label")
                .static_method()
                .param(ParamDef::new("label").typed(TypeExpr::Named("string")))
                .param(
                    ParamDef::new("ignore_case")
                        .typed(TypeExpr::Named("bool"))
                        .with_default(json!(false)),
                )
                .returning(TypeExpr::Union(vec!["AccountType", "null"])),
            MethodDef::new("options")
                .static_method()
                .with_origin(Origin::Mixin("app::enums::concerns::HasOptions"))
                .returning(TypeExpr::Named("array")),
        ]
    }

    fn interfaces() -> Vec<&'static str> {
        vec!["app::contracts::HasLabel"]
    }
}

const fn case_name(kind: AccountType) -> &'static str {
    match kind {
        AccountType::Traditional => "Traditional",
        AccountType::Roth => "Roth",
        AccountType::Sep => "Sep",
    }
}
