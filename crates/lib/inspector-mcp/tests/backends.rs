mod common;

use std::sync::Mutex;

use common::{FixtureApp, fixture_root};
use inspector_core::Category;
use inspector_mcp::InspectorMcp;
use inspector_mcp::backend::{Backend, BackendError, InProcessBackend, Invocation, ProcessBackend};
use serde_json::{Value, json};

/// Records invocations and answers with a canned result.
struct RecordingBackend {
    calls: Mutex<Vec<Invocation>>,
    fail: bool,
}

impl RecordingBackend {
    fn new(fail: bool) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail,
        }
    }
}

impl Backend for RecordingBackend {
    async fn invoke(&self, invocation: Invocation) -> Result<Value, BackendError> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(invocation);
        if self.fail {
            Err(BackendError::OutputTooLarge { limit: 16 })
        } else {
            Ok(json!({ "ok": true }))
        }
    }
}

#[tokio::test]
async fn in_process_backend_boots_per_call() {
    let server = InspectorMcp::new(InProcessBackend::new(FixtureApp {
        root: fixture_root(),
    }));

    let models = server.invoke(Invocation::new(Category::Model, "list")).await;
    assert_eq!(
        models,
        json!({ "models": [{ "name": "User", "class": "app::models::User" }], "total": 1 })
    );

    let schema = server
        .invoke(Invocation::new(Category::Model, "schema").with_argument("User"))
        .await;
    assert_eq!(schema["columns"], json!({ "id": { "type": "int" } }));

    let values = server
        .invoke(Invocation::new(Category::Enum, "values").with_argument("Color"))
        .await;
    assert_eq!(values["values"], json!(["Red", "Blue"]));
}

#[tokio::test]
async fn bootstrap_failure_becomes_error_payload() {
    let server = InspectorMcp::new(InProcessBackend::new(FixtureApp {
        root: fixture_root().join("missing"),
    }));

    let payload = server.invoke(Invocation::new(Category::Enum, "list")).await;
    let message = payload["error"].as_str().expect("error payload");
    assert!(message.starts_with("Application not found at: "), "{message}");
}

#[tokio::test]
async fn backend_errors_are_folded_into_payloads() {
    let server = InspectorMcp::new(RecordingBackend::new(true));
    let payload = server
        .invoke(Invocation::new(Category::Model, "search").with_argument(""))
        .await;
    assert_eq!(payload, json!({ "error": "extractor output exceeded 16 bytes" }));
}

#[tokio::test]
async fn invocations_reach_the_backend_unchanged() {
    let backend = std::sync::Arc::new(RecordingBackend::new(false));
    let server = InspectorMcp::with_backend(std::sync::Arc::clone(&backend));

    server
        .invoke(Invocation::new(Category::Enum, "details").with_argument("Billing/Currency"))
        .await;
    let calls = backend.calls.lock().expect("calls lock poisoned");
    assert_eq!(
        calls.as_slice(),
        &[Invocation::new(Category::Enum, "details").with_argument("Billing/Currency")]
    );
}

#[tokio::test]
async fn missing_entry_point_fails_to_spawn() {
    let backend = ProcessBackend::new(fixture_root(), "target/release/does-not-exist");
    let err = backend
        .invoke(Invocation::new(Category::Model, "list"))
        .await
        .expect_err("spawn should fail");
    assert!(matches!(err, BackendError::Spawn { .. }), "{err}");
}

#[cfg(unix)]
mod process {
    use std::os::unix::fs::PermissionsExt;

    use tempfile::TempDir;

    use super::*;

    /// A scratch application root holding an executable `inspect` script.
    fn script(body: &str) -> TempDir {
        let dir = tempfile::tempdir().expect("create script dir");
        let path = dir.path().join("inspect");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("mark script executable");
        dir
    }

    fn backend(dir: &TempDir) -> ProcessBackend {
        ProcessBackend::new(dir.path(), "inspect")
    }

    #[tokio::test]
    async fn extractor_receives_arguments_and_app_path() {
        let dir = script(
            r#"printf '{"args":"%s|%s|%s","count":%d,"app":"%s"}' "$1" "$2" "$3" "$#" "$INSPECTOR_APP_PATH""#,
        );

        let payload = backend(&dir)
            .invoke(Invocation::new(Category::Model, "schema").with_argument("Accounts/IraAccount"))
            .await
            .expect("extractor should succeed");
        assert_eq!(payload["args"], "models|schema|Accounts/IraAccount");
        assert_eq!(payload["count"], 3);
        assert_eq!(payload["app"], dir.path().display().to_string());
    }

    #[tokio::test]
    async fn absent_argument_is_not_passed() {
        let dir = script(r#"printf '{"count":%d}' "$#""#);

        let payload = backend(&dir)
            .invoke(Invocation::new(Category::Enum, "details").with_optional_argument(None))
            .await
            .expect("extractor should succeed");
        assert_eq!(payload["count"], 2);
    }

    #[tokio::test]
    async fn failing_extractor_payload_is_returned() {
        let dir = script(r#"printf '{"error":"Application not found at: /nowhere"}'; exit 1"#);

        let payload = backend(&dir)
            .invoke(Invocation::new(Category::Enum, "list"))
            .await
            .expect("error payload should still decode");
        assert_eq!(payload, json!({ "error": "Application not found at: /nowhere" }));
    }

    #[tokio::test]
    async fn crash_without_output_is_an_exit_error() {
        let dir = script("exit 3");

        let err = backend(&dir)
            .invoke(Invocation::new(Category::Enum, "list"))
            .await
            .expect_err("crash should fail");
        assert!(matches!(err, BackendError::Exited { .. }), "{err}");
    }

    #[tokio::test]
    async fn oversized_output_is_rejected() {
        let dir = script("head -c 4096 /dev/zero | tr '\\0' 'x'");

        let err = backend(&dir)
            .with_max_output_bytes(1024)
            .invoke(Invocation::new(Category::Model, "list"))
            .await
            .expect_err("output should exceed the cap");
        assert!(matches!(err, BackendError::OutputTooLarge { limit: 1024 }), "{err}");
    }

    #[tokio::test]
    async fn non_json_output_is_a_decode_error() {
        let dir = script("echo not json");

        let err = backend(&dir)
            .invoke(Invocation::new(Category::Model, "list"))
            .await
            .expect_err("output should not decode");
        assert!(matches!(err, BackendError::Decode(_)), "{err}");
    }
}
