use inspector_core::describe::{Describable, Model, ModelMethod, Relation, RelationError};
use inspector_records::RelationshipKind;

use crate::enums::PostStatus;

#[derive(Debug, Default)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
    pub status: PostStatus,
}

impl Describable for Post {
    fn mixins() -> Vec<&'static str> {
        vec!["framework::SoftDeletes"]
    }
}

fn author(_: &Post) -> Result<Relation, RelationError> {
    Ok(Relation::new(RelationshipKind::BelongsTo, "app::models::User"))
}

fn tags(_: &Post) -> Result<Relation, RelationError> {
    Ok(Relation::new(RelationshipKind::MorphToMany, "app::models::Tag"))
}

fn revisions(_: &Post) -> Result<Relation, RelationError> {
    Err(RelationError::new("revision history is not configured"))
}

impl Model for Post {
    fn table(&self) -> String {
        "posts".to_string()
    }

    fn casts(&self) -> indexmap::IndexMap<String, String> {
        indexmap::IndexMap::from([("status".to_string(), "app::enums::PostStatus".to_string())])
    }

    fn fillable(&self) -> Vec<String> {
        vec!["title".to_string(), "body".to_string(), "status".to_string()]
    }

    fn methods() -> Vec<ModelMethod<Self>> {
        vec![
            ModelMethod::relation("author", RelationshipKind::BelongsTo, author),
            ModelMethod::relation("tags", RelationshipKind::MorphToMany, tags),
            ModelMethod::relation("revisions", RelationshipKind::HasMany, revisions),
        ]
    }
}
