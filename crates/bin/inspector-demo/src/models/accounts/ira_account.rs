use indexmap::IndexMap;
use inspector_core::describe::{Describable, Model, ModelMethod, Origin, Relation, RelationError};
use inspector_records::{KeyType, RelationshipKind};

use super::Account;
use crate::models::concerns::has_uuid::{HAS_UUID, HasUuid};

#[derive(Debug, Default)]
pub struct IraAccount {
    pub uuid: String,
    pub account: Account,
    pub contribution_year: u16,
}

impl HasUuid for IraAccount {
    fn uuid(&self) -> &str {
        &self.uuid
    }
}

impl Describable for IraAccount {
    fn mixins() -> Vec<&'static str> {
        vec![HAS_UUID]
    }
}

fn owner(_: &IraAccount) -> Result<Relation, RelationError> {
    Ok(Relation::new(RelationshipKind::BelongsTo, "app::models::User"))
}

impl Model for IraAccount {
    fn table(&self) -> String {
        "ira_accounts".to_string()
    }

    fn key_name(&self) -> String {
        "uuid".to_string()
    }

    fn key_type(&self) -> KeyType {
        KeyType::String
    }

    fn incrementing(&self) -> bool {
        false
    }

    fn casts(&self) -> IndexMap<String, String> {
        IndexMap::from([
            ("balance".to_string(), "decimal:2".to_string()),
            ("account_type".to_string(), "app::enums::AccountType".to_string()),
        ])
    }

    fn fillable(&self) -> Vec<String> {
        vec!["contribution_year".to_string()]
    }

    fn methods() -> Vec<ModelMethod<Self>> {
        vec![
            ModelMethod::relation("owner", RelationshipKind::BelongsTo, owner),
            ModelMethod::relation("ledger", RelationshipKind::HasMany, owner)
                .with_origin(Origin::Inherited),
        ]
    }
}
