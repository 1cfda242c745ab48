use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;

mod support;

use support::{task, todo_cmd, Fixture};

#[test]
fn help_works() {
    todo_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("todo list"));

    for cmd in ["list", "config", "tui"] {
        todo_cmd().arg(cmd).arg("--help").assert().success();
    }
}

#[test]
fn list_prints_seeded_tasks() {
    let fixture = Fixture::new();
    let file = fixture.write_todos(&[task(1, "Buy milk", false), task(2, "Walk dog", true)]);

    todo_cmd()
        .current_dir(fixture.path())
        .arg("list")
        .arg("--file")
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("[ ] 1 Buy milk"))
        .stdout(contains("[x] 2 Walk dog"))
        .stdout(contains("total: 2  completed: 1  shown: 2"));
}

#[test]
fn list_search_filters_case_insensitively() {
    let fixture = Fixture::new();
    let file = fixture.write_todos(&[task(1, "Buy milk", false), task(2, "Walk dog", true)]);

    todo_cmd()
        .current_dir(fixture.path())
        .args(["list", "--search", "MILK", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("Buy milk"))
        .stdout(contains("Walk dog").not());
}

#[test]
fn list_json_envelope() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = Fixture::new();
    let file = fixture.write_todos(&[task(7, "Buy milk", false)]);

    let output = todo_cmd()
        .current_dir(fixture.path())
        .args(["list", "--json", "--file"])
        .arg(&file)
        .output()?;
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["schema_version"], "todo.v1");
    assert_eq!(value["command"], "list");
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["summary"]["total"], 1);
    assert_eq!(value["data"]["tasks"][0]["id"], 7);
    assert_eq!(value["data"]["tasks"][0]["userId"], 1);
    Ok(())
}

#[test]
fn load_failure_exits_with_operation_failed() {
    let fixture = Fixture::new();
    let file = fixture.write_file("todos.json", "not json");

    todo_cmd()
        .current_dir(fixture.path())
        .args(["list", "--file"])
        .arg(&file)
        .assert()
        .code(4)
        .stderr(contains("Failed to load tasks"));
}

#[test]
fn config_reads_todo_toml_from_cwd() {
    let fixture = Fixture::new();
    fixture.write_file(
        ".todo.toml",
        "[search]\ndebounce_ms = 250\n\n[tasks]\ndefault_owner = 4\n",
    );

    todo_cmd()
        .current_dir(fixture.path())
        .arg("config")
        .assert()
        .success()
        .stdout(contains("search.debounce_ms: 250"))
        .stdout(contains("tasks.default_owner: 4"));
}

#[test]
fn config_write_creates_default_file_once() {
    let fixture = Fixture::new();
    let path = fixture.path().join(".todo.toml");

    todo_cmd()
        .current_dir(fixture.path())
        .args(["config", "--write"])
        .assert()
        .success()
        .stdout(contains("wrote:"));
    let written = std::fs::read_to_string(&path).expect("config written");
    assert!(written.contains("debounce_ms = 500"));

    todo_cmd()
        .current_dir(fixture.path())
        .args(["config", "--write"])
        .assert()
        .success()
        .stdout(contains("kept:"));
}

#[test]
fn invalid_config_is_user_error() {
    let fixture = Fixture::new();
    fixture.write_file(".todo.toml", "[search]\ndebounce_ms = 0\n");

    todo_cmd()
        .current_dir(fixture.path())
        .arg("config")
        .assert()
        .code(2)
        .stderr(contains("search.debounce_ms"));
}

#[test]
fn tui_rejects_json() {
    let fixture = Fixture::new();
    let file = fixture.write_todos(&[]);

    todo_cmd()
        .current_dir(fixture.path())
        .args(["tui", "--json", "--file"])
        .arg(&file)
        .assert()
        .code(2);
}
