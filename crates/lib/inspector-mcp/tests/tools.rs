mod common;

use common::{FixtureApp, fixture_root};
use inspector_mcp::InspectorMcp;
use inspector_mcp::backend::InProcessBackend;
use rmcp::model::{CallToolRequestParams, CallToolResult, Tool};
use rmcp::service::RunningService;
use rmcp::{RoleClient, ServiceExt};
use serde_json::{Value, json};

type Client = RunningService<RoleClient, ()>;

/// Connects a client to a tool server over an in-memory pipe.
async fn connect() -> Client {
    let (server_io, client_io) = tokio::io::duplex(64 * 1024);
    let server = InspectorMcp::new(InProcessBackend::new(FixtureApp {
        root: fixture_root(),
    }));
    tokio::spawn(async move {
        let running = server.serve(server_io).await.expect("server should initialize");
        let _ = running.waiting().await;
    });
    ().serve(client_io).await.expect("client should initialize")
}

async fn call(client: &Client, tool: &'static str, arguments: Value) -> CallToolResult {
    client
        .call_tool(CallToolRequestParams {
            meta: None,
            name: tool.into(),
            arguments: arguments.as_object().cloned(),
            task: None,
        })
        .await
        .unwrap_or_else(|err| panic!("{tool} should answer with a result: {err}"))
}

fn text(result: &CallToolResult) -> &str {
    result.content[0].as_text().expect("text content").text.as_str()
}

async fn call_json(client: &Client, tool: &'static str, arguments: Value) -> Value {
    let result = call(client, tool, arguments).await;
    serde_json::from_str(text(&result)).expect("tool output should be JSON")
}

fn tool<'a>(tools: &'a [Tool], name: &str) -> &'a Tool {
    tools
        .iter()
        .find(|tool| tool.name == name)
        .unwrap_or_else(|| panic!("{name} should be listed"))
}

#[tokio::test]
async fn every_tool_is_listed_with_its_arguments() {
    let client = connect().await;
    let tools = client.list_all_tools().await.expect("tools should list");

    let mut names: Vec<&str> = tools.iter().map(|tool| tool.name.as_ref()).collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec![
            "get_enum_details",
            "get_enum_values",
            "get_model_schema",
            "health",
            "help",
            "list_enums",
            "list_models",
            "search_enums",
            "search_models",
        ]
    );

    for (name, argument) in [
        ("get_model_schema", "model"),
        ("search_models", "query"),
        ("get_enum_details", "enum"),
        ("get_enum_values", "enum"),
        ("search_enums", "query"),
    ] {
        let schema = Value::Object(tool(&tools, name).input_schema.as_ref().clone());
        assert!(schema["properties"].get(argument).is_some(), "{name} takes {argument}");
        assert_eq!(schema["required"], json!([argument]), "{name} requires {argument}");
    }
}

#[tokio::test]
async fn results_are_pretty_printed_json() {
    let client = connect().await;
    let result = call(&client, "list_models", json!({})).await;

    let expected = json!({
        "models": [{ "name": "User", "class": "app::models::User" }],
        "total": 1
    });
    assert_eq!(
        text(&result),
        serde_json::to_string_pretty(&expected).expect("encode expected")
    );
    assert_eq!(result.is_error, Some(false));
}

#[tokio::test]
async fn inspection_tools_reach_the_application() {
    let client = connect().await;

    let schema = call_json(&client, "get_model_schema", json!({ "model": "User" })).await;
    assert_eq!(schema["class"], "app::models::User");
    assert_eq!(schema["columns"], json!({ "id": { "type": "int" } }));

    let models = call_json(&client, "search_models", json!({ "query": "" })).await;
    assert_eq!(models["total"], 1);

    let enums = call_json(&client, "list_enums", json!({})).await;
    assert_eq!(
        enums["enums"],
        json!([{ "name": "Color", "class": "app::enums::Color", "backingType": null, "caseCount": 2 }])
    );

    let details = call_json(&client, "get_enum_details", json!({ "enum": "Color" })).await;
    assert_eq!(details["enum"], "Color");
    assert_eq!(details["cases"], json!([{ "name": "Red" }, { "name": "Blue" }]));

    let values = call_json(&client, "get_enum_values", json!({ "enum": "Color" })).await;
    assert_eq!(values["values"], json!(["Red", "Blue"]));

    let found = call_json(&client, "search_enums", json!({ "query": "COL" })).await;
    assert_eq!(found["total"], 1);

    let missing = call_json(&client, "get_enum_values", json!({ "enum": "Shade" })).await;
    assert_eq!(missing, json!({ "error": "Enum 'Shade' not found", "enum": "Shade" }));
}

#[tokio::test]
async fn missing_arguments_come_back_as_error_payloads() {
    let client = connect().await;

    for (name, message) in [
        ("get_model_schema", "Model name required"),
        ("search_models", "Search query required"),
        ("get_enum_details", "Enum name required"),
        ("get_enum_values", "Enum name required"),
        ("search_enums", "Search query required"),
    ] {
        let payload = call_json(&client, name, json!({})).await;
        assert_eq!(payload, json!({ "error": message }), "{name}");
    }
}

#[tokio::test]
async fn health_and_help_answer_without_the_application() {
    let client = connect().await;

    let health = call(&client, "health", json!({})).await;
    assert_eq!(text(&health), "ok");

    let help = call_json(&client, "help", json!({})).await;
    let commands = help["commands"].as_array().expect("command list");
    assert_eq!(commands.len(), 9);
    assert!(
        commands
            .iter()
            .filter_map(Value::as_str)
            .any(|command| command.starts_with("get_enum_values")),
        "{help}"
    );
}
