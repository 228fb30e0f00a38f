//! Command dispatch: maps `<category> <command> [argument]` onto introspection calls.
//!
//! Requests are parsed before the application boots, so help output and
//! argument errors never touch the runtime.

use inspector_records::schema::FIELD_ERROR;
use inspector_records::{EnumCatalog, ModelCatalog};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::error::InspectError;
use crate::introspect::{EnumIntrospector, ModelIntrospector};
use crate::registry::Category;
use crate::runtime::{Application, Bootstrap, BootstrapError};
use crate::schema::SchemaBackend;

const MODEL_COMMANDS: [(&str, &str); 3] = [
    ("list", "List all models"),
    ("schema <ModelName>", "Get schema for a specific model"),
    ("search <query>", "Search models by name"),
];

const ENUM_COMMANDS: [(&str, &str); 4] = [
    ("list", "List all enums"),
    ("details <EnumName>", "Get full details for a specific enum"),
    ("values <EnumName>", "Get just the case names and values"),
    ("search <query>", "Search enums by name"),
];

/// One introspection operation with its argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ListModels,
    ModelSchema(String),
    SearchModels(String),
    ListEnums,
    EnumDetails(String),
    EnumValues(String),
    SearchEnums(String),
}

/// Answers produced without booting the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preflight {
    /// Command listing for one category, or for both when the category is unknown.
    Help(Option<Category>),
    MissingArgument(&'static str),
}

impl Request {
    /// Parses a command line triple into a request.
    ///
    /// An empty argument is still a present argument.
    ///
    /// # Errors
    /// Returns `Preflight::Help` for unknown categories or commands and
    /// `Preflight::MissingArgument` when a required argument is absent.
    pub fn parse(
        category: Option<&str>,
        command: Option<&str>,
        argument: Option<&str>,
    ) -> Result<Self, Preflight> {
        let Some(category) = category.and_then(|value| value.parse::<Category>().ok()) else {
            return Err(Preflight::Help(None));
        };
        let name = |message| {
            argument
                .map(ToString::to_string)
                .ok_or(Preflight::MissingArgument(message))
        };

        match (category, command.unwrap_or("help")) {
            (Category::Model, "list") => Ok(Self::ListModels),
            (Category::Model, "schema") => name("Model name required").map(Self::ModelSchema),
            (Category::Model, "search") => name("Search query required").map(Self::SearchModels),
            (Category::Enum, "list") => Ok(Self::ListEnums),
            (Category::Enum, "details") => name("Enum name required").map(Self::EnumDetails),
            (Category::Enum, "values") => name("Enum name required").map(Self::EnumValues),
            (Category::Enum, "search") => name("Search query required").map(Self::SearchEnums),
            (category, _) => Err(Preflight::Help(Some(category))),
        }
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::ListModels | Self::ModelSchema(_) | Self::SearchModels(_) => Category::Model,
            Self::ListEnums
            | Self::EnumDetails(_)
            | Self::EnumValues(_)
            | Self::SearchEnums(_) => Category::Enum,
        }
    }
}

impl Preflight {
    #[must_use]
    pub fn to_payload(&self) -> Value {
        match self {
            Self::Help(Some(category)) => json!({ "commands": commands(*category, None) }),
            Self::Help(None) => {
                let mut all = commands(Category::Model, Some(Category::Model.plural()));
                all.extend(commands(Category::Enum, Some(Category::Enum.plural())));
                json!({ "commands": all })
            }
            Self::MissingArgument(message) => json!({ FIELD_ERROR: message }),
        }
    }
}

fn commands(category: Category, prefix: Option<&str>) -> Map<String, Value> {
    let table: &[(&str, &str)] = match category {
        Category::Model => &MODEL_COMMANDS,
        Category::Enum => &ENUM_COMMANDS,
    };
    table
        .iter()
        .map(|(usage, description)| {
            let usage = prefix.map_or_else(|| (*usage).to_string(), |p| format!("{p} {usage}"));
            (usage, Value::String((*description).to_string()))
        })
        .collect()
}

/// Runs one request against a booted application.
///
/// Failures are folded into error payloads; this never fails.
pub async fn dispatch<S: SchemaBackend>(app: &Application<S>, request: Request) -> Value {
    let models = ModelIntrospector::new(app);
    let enums = EnumIntrospector::new(app);
    match request {
        Request::ListModels => encode(models.list().map(ModelCatalog::new)),
        Request::ModelSchema(name) => encode(models.schema(&name).await),
        Request::SearchModels(query) => encode(models.search(&query).map(ModelCatalog::new)),
        Request::ListEnums => encode(enums.list().map(EnumCatalog::new)),
        Request::EnumDetails(name) => encode(enums.details(&name)),
        Request::EnumValues(name) => encode(enums.values(&name)),
        Request::SearchEnums(query) => encode(enums.search(&query).map(EnumCatalog::new)),
    }
}

/// Parses, boots a fresh application and dispatches.
///
/// # Errors
/// Returns `BootstrapError` only when the request needed the application
/// and it could not be booted.
pub async fn execute<B: Bootstrap>(
    bootstrap: &B,
    category: Option<&str>,
    command: Option<&str>,
    argument: Option<&str>,
) -> Result<Value, BootstrapError> {
    let request = match Request::parse(category, command, argument) {
        Ok(request) => request,
        Err(preflight) => return Ok(preflight.to_payload()),
    };
    tracing::debug!(?request, "booting application");
    let app = bootstrap.boot().await?;
    Ok(dispatch(&app, request).await)
}

fn encode<T: Serialize>(result: Result<T, InspectError>) -> Value {
    result
        .and_then(|record| {
            serde_json::to_value(record).map_err(|err| InspectError::Encode(err.to_string()))
        })
        .unwrap_or_else(|err| err.to_payload())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!(
            Request::parse(Some("models"), Some("schema"), Some("User")),
            Ok(Request::ModelSchema("User".to_string()))
        );
        assert_eq!(
            Request::parse(Some("enums"), Some("values"), Some("Status")),
            Ok(Request::EnumValues("Status".to_string()))
        );
        assert_eq!(Request::parse(Some("enums"), Some("list"), None), Ok(Request::ListEnums));
    }

    #[test]
    fn empty_argument_is_present() {
        assert_eq!(
            Request::parse(Some("models"), Some("search"), Some("")),
            Ok(Request::SearchModels(String::new()))
        );
    }

    #[test]
    fn missing_arguments_are_reported() {
        let err = Request::parse(Some("enums"), Some("details"), None).unwrap_err();
        assert_eq!(err.to_payload(), json!({ "error": "Enum name required" }));

        let err = Request::parse(Some("models"), Some("search"), None).unwrap_err();
        assert_eq!(err.to_payload(), json!({ "error": "Search query required" }));
    }

    #[test]
    fn unknown_command_lists_category_commands() {
        let err = Request::parse(Some("enums"), Some("frobnicate"), None).unwrap_err();
        assert_eq!(err, Preflight::Help(Some(Category::Enum)));
        let payload = err.to_payload();
        assert_eq!(payload["commands"]["values <EnumName>"], "Get just the case names and values");

        let err = Request::parse(Some("models"), None, None).unwrap_err();
        assert_eq!(err, Preflight::Help(Some(Category::Model)));
    }

    #[test]
    fn unknown_category_lists_everything() {
        let payload = Request::parse(Some("widgets"), Some("list"), None)
            .unwrap_err()
            .to_payload();
        let commands = payload["commands"].as_object().expect("commands object");
        assert_eq!(commands.len(), MODEL_COMMANDS.len() + ENUM_COMMANDS.len());
        assert!(commands.contains_key("models schema <ModelName>"));
        assert!(commands.contains_key("enums search <query>"));
    }
}
