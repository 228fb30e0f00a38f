//! Boots the demo application for one inspection.

use std::path::PathBuf;

use inspector_core::runtime::app_root_from_env;
use inspector_core::schema::SurrealSchema;
use inspector_core::{AppConfig, Application, Bootstrap, BootstrapError, TypeRegistry};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

use crate::enums::{AccountType, PostStatus, Visibility};
use crate::models::{Account, IraAccount, Post, User};

const DB_NAMESPACE: &str = "demo";
const DB_NAME: &str = "app";

/// Table and field definitions the demo models are bound to.
const SCHEMA: &str = "
DEFINE TABLE users SCHEMAFULL;
DEFINE FIELD name ON users TYPE string;
DEFINE FIELD email ON users TYPE string;
DEFINE FIELD password ON users TYPE string;
DEFINE FIELD email_verified_at ON users TYPE option<datetime>;
DEFINE FIELD created_at ON users TYPE datetime DEFAULT time::now();

DEFINE TABLE posts SCHEMAFULL;
DEFINE FIELD user_id ON posts TYPE record<users>;
DEFINE FIELD title ON posts TYPE string;
DEFINE FIELD body ON posts TYPE string;
DEFINE FIELD status ON posts TYPE int DEFAULT 0;
DEFINE FIELD created_at ON posts TYPE datetime DEFAULT time::now();

DEFINE TABLE ira_accounts SCHEMAFULL;
DEFINE FIELD uuid ON ira_accounts TYPE string;
DEFINE FIELD owner_id ON ira_accounts TYPE record<users>;
DEFINE FIELD balance ON ira_accounts TYPE decimal;
DEFINE FIELD account_type ON ira_accounts TYPE string;
DEFINE FIELD contribution_year ON ira_accounts TYPE int;
";

/// Every inspectable type in the demo, under its qualified name.
#[must_use]
pub fn registry() -> TypeRegistry {
    TypeRegistry::new()
        .with_model::<User>("app::models::User")
        .with_model::<Post>("app::models::Post")
        .with_model::<Account>("app::models::Accounts::Account")
        .with_model::<IraAccount>("app::models::Accounts::IraAccount")
        .with_enum::<AccountType>("app::enums::AccountType")
        .with_enum::<PostStatus>("app::enums::PostStatus")
        .with_enum::<Visibility>("app::enums::Visibility")
}

/// The demo application rooted at its crate directory, or at
/// `INSPECTOR_APP_PATH` when set.
#[derive(Debug, Clone)]
pub struct DemoApp {
    root: PathBuf,
}

impl DemoApp {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(app_root_from_env(env!("CARGO_MANIFEST_DIR")))
    }
}

impl Bootstrap for DemoApp {
    type Schema = SurrealSchema<Db>;

    async fn boot(&self) -> Result<Application<Self::Schema>, BootstrapError> {
        if !self.root.is_dir() {
            return Err(BootstrapError::ApplicationNotFound(self.root.clone()));
        }
        let config = AppConfig::load(&self.root)?;
        let app = Application::new(self.root.clone(), config, registry());

        match connect().await {
            Ok(db) => Ok(app.with_schema(SurrealSchema::new(db))),
            Err(err) => {
                tracing::warn!(error = %err, "database unavailable, columns will be empty");
                Ok(app)
            }
        }
    }
}

async fn connect() -> Result<Surreal<Db>, surrealdb::Error> {
    let db = Surreal::new::<Mem>(()).await?;
    db.use_ns(DB_NAMESPACE).use_db(DB_NAME).await?;
    db.query(SCHEMA).await?.check()?;
    Ok(db)
}
