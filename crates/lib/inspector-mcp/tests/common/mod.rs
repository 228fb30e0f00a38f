//! Fixture application shared by the integration tests.

use std::path::PathBuf;

use inspector_core::describe::{CaseDef, Describable, Enumeration, Model};
use inspector_core::schema::StaticSchema;
use inspector_core::{AppConfig, Application, Bootstrap, BootstrapError, TypeRegistry};
use inspector_records::BackingType;

#[derive(Default)]
struct User;

impl Describable for User {}

impl Model for User {
    fn table(&self) -> String {
        "users".to_string()
    }
}

struct Color;

impl Describable for Color {}

impl Enumeration for Color {
    fn backing() -> Option<BackingType> {
        None
    }

    fn cases() -> Vec<CaseDef> {
        vec![CaseDef::pure("Red"), CaseDef::pure("Blue")]
    }
}

pub fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("inspector-core")
        .join("tests")
        .join("fixtures")
        .join("app")
}

pub struct FixtureApp {
    pub root: PathBuf,
}

impl Bootstrap for FixtureApp {
    type Schema = StaticSchema;

    async fn boot(&self) -> Result<Application<StaticSchema>, BootstrapError> {
        if !self.root.is_dir() {
            return Err(BootstrapError::ApplicationNotFound(self.root.clone()));
        }
        let registry = TypeRegistry::new()
            .with_model::<User>("app::models::User")
            .with_enum::<Color>("app::enums::Color");
        let schema = StaticSchema::new().with_table("users", [("id", Some("int"))]);
        Ok(Application::new(self.root.clone(), AppConfig::load(&self.root)?, registry)
            .with_schema(schema))
    }
}
