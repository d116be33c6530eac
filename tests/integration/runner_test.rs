//! Command runner integration tests.
//!
//! Runs steps through the real shell and checks what was reported.

use super::common::{guide_document, spawn_endpoint, StubResponse};
use linked_steps::consumer::{stream, CommandRunner, ShellExecutor};
use linked_steps::sparql::{BindingRow, EndpointTarget, ResultSet, SparqlClient};
use pretty_assertions::assert_eq;

fn step(key: &str, value: &str, description: &str) -> BindingRow {
    BindingRow::new()
        .with_literal("key", key)
        .with_literal("value", value)
        .with_literal("description", description)
}

fn columns() -> Vec<String> {
    vec!["key".into(), "value".into(), "description".into()]
}

async fn run_rows(rows: Vec<BindingRow>) -> String {
    let mut runner = CommandRunner::with_executor(ShellExecutor::new(), Vec::new());
    stream(&ResultSet::new(columns(), rows), &mut runner).await;
    String::from_utf8(runner.into_output()).unwrap()
}

#[tokio::test]
async fn test_title_row_never_runs() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("title-ran");

    let output = run_rows(vec![step(
        "Title",
        "Demo",
        &format!("touch {}", marker.display()),
    )])
    .await;

    assert_eq!(output, "Running Title : Demo\n");
    assert!(!marker.exists());
}

#[tokio::test]
async fn test_prompt_marker_is_stripped_before_running() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("step-ran");

    let output = run_rows(vec![step(
        "Step 1",
        "touch",
        &format!("$ touch {}", marker.display()),
    )])
    .await;

    assert_eq!(output, "Running Step 1 : touch success\n");
    assert!(marker.exists());
}

#[tokio::test]
async fn test_failure_reports_exit_status_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("after");

    let output = run_rows(vec![
        step("Step 1", "broken", "$ exit 4"),
        step("Step 2", "after", &format!("$ touch {}", marker.display())),
    ])
    .await;

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Running Step 1 : broken failed: 4"));
    assert_eq!(lines[1], "Running Step 2 : after success");
    assert!(marker.exists());
}

#[tokio::test]
async fn test_steps_run_sequentially() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("log");
    let log = log_path.display();

    run_rows(vec![
        step("Step 1", "slow", &format!("$ sleep 0.2 && echo one >> {log}")),
        step("Step 2", "fast", &format!("$ echo two >> {log}")),
        step("Step 3", "fast", &format!("$ echo three >> {log}")),
    ])
    .await;

    let written = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(written, "one\ntwo\nthree\n");
}

#[tokio::test]
async fn test_step_output_is_not_reported() {
    let output = run_rows(vec![step("Step 1", "noisy", "$ echo visible; echo err >&2")]).await;
    assert_eq!(output, "Running Step 1 : noisy success\n");
}

#[tokio::test]
async fn test_end_to_end_guide() {
    let body = guide_document(&[("Title", "Demo", "n/a"), ("Step 1", "echo", "$ echo ok")]);
    let endpoint = spawn_endpoint(move |_| StubResponse::json(body.clone())).await;
    let client = SparqlClient::new(EndpointTarget::parse(&endpoint.url).unwrap()).unwrap();

    let mut runner = CommandRunner::with_executor(ShellExecutor::new(), Vec::new());
    client.execute("SELECT * {}", &mut runner).await.unwrap();

    let summary = runner.summary();
    let output = String::from_utf8(runner.into_output()).unwrap();
    assert_eq!(output, "Running Title : Demo\nRunning Step 1 : echo success\n");
    assert_eq!(summary.executed, 1);
    assert_eq!(summary.succeeded, 1);
}
