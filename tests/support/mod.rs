#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;
use todo_sync::task::Task;

pub fn todo_cmd() -> Command {
    let mut cmd = Command::cargo_bin("todo").expect("binary");
    cmd.env_remove("TODO_SOURCE");
    cmd.env_remove("TODO_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd
}

pub fn task(id: i64, title: &str, completed: bool) -> Task {
    Task {
        id,
        title: title.to_string(),
        completed,
        owner_id: 1,
    }
}

/// Scratch directory holding a `todos.json` seed in the remote response shape.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_todos(&self, tasks: &[Task]) -> PathBuf {
        let path = self.dir.path().join("todos.json");
        fs::write(&path, serde_json::to_string(tasks).expect("encode")).expect("write todos");
        path
    }

    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write file");
        path
    }
}
