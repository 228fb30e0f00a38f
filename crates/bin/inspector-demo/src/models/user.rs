use indexmap::IndexMap;
use inspector_core::describe::{Describable, Model, ModelMethod, Relation, RelationError, TypeExpr};
use inspector_records::RelationshipKind;

#[derive(Debug, Default)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl User {
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }
}

impl Describable for User {
    fn mixins() -> Vec<&'static str> {
        vec!["framework::Notifiable"]
    }
}

fn posts(_: &User) -> Result<Relation, RelationError> {
    Ok(Relation::new(RelationshipKind::HasMany, "app::models::Post"))
}

fn accounts(_: &User) -> Result<Relation, RelationError> {
    Ok(Relation::new(
        RelationshipKind::HasMany,
        "app::models::Accounts::IraAccount",
    ))
}

impl Model for User {
    fn table(&self) -> String {
        "users".to_string()
    }

    fn casts(&self) -> IndexMap<String, String> {
        IndexMap::from([
            ("email_verified_at".to_string(), "datetime".to_string()),
            ("password".to_string(), "hashed".to_string()),
        ])
    }

    fn fillable(&self) -> Vec<String> {
        vec!["name".to_string(), "email".to_string(), "password".to_string()]
    }

    fn guarded(&self) -> Vec<String> {
        Vec::new()
    }

    fn hidden(&self) -> Vec<String> {
        vec!["password".to_string()]
    }

    fn methods() -> Vec<ModelMethod<Self>> {
        vec![
            ModelMethod::relation("posts", RelationshipKind::HasMany, posts),
            ModelMethod::relation("accounts", RelationshipKind::HasMany, accounts),
            ModelMethod::plain("display_name", Some(TypeExpr::Named("string"))),
        ]
    }
}
