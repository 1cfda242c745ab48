//! Task records and the collection transforms applied to them.
//!
//! Every transform takes the current collection by reference and returns a
//! fresh one; the input is never touched. Collection order is display order:
//! newly created tasks go to the front, loaded tasks keep their load order.

use serde::{Deserialize, Serialize};
use tracing::debug;

pub type TaskId = i64;

/// A single todo item as held in the in-memory list.
///
/// Field names on the wire follow the remote source (`userId`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    #[serde(rename = "userId")]
    pub owner_id: i64,
}

/// Trimmed title, or `None` when nothing but whitespace remains.
pub fn normalize_title(title: &str) -> Option<&str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Prepend a new task built from `title`.
///
/// Returns `None` for an empty or whitespace-only title. The caller is
/// responsible for `id` being unique against `tasks` (see [`IdGenerator`]).
pub fn create_task(
    tasks: &[Task],
    id: TaskId,
    title: &str,
    owner_id: i64,
) -> Option<(Vec<Task>, Task)> {
    let title = normalize_title(title)?;
    let task = Task {
        id,
        title: title.to_string(),
        completed: false,
        owner_id,
    };
    let mut next = Vec::with_capacity(tasks.len() + 1);
    next.push(task.clone());
    next.extend_from_slice(tasks);
    Some((next, task))
}

pub fn toggle_task(tasks: &[Task], id: TaskId) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            if task.id == id {
                Task {
                    completed: !task.completed,
                    ..task.clone()
                }
            } else {
                task.clone()
            }
        })
        .collect()
}

/// Replace the title of the matching task. Only `title` changes.
///
/// A blank title leaves the collection as it was; any other title is stored
/// as given.
pub fn edit_task(tasks: &[Task], id: TaskId, title: &str) -> Vec<Task> {
    if normalize_title(title).is_none() {
        return tasks.to_vec();
    }
    tasks
        .iter()
        .map(|task| {
            if task.id == id {
                Task {
                    title: title.to_string(),
                    ..task.clone()
                }
            } else {
                task.clone()
            }
        })
        .collect()
}

pub fn delete_task(tasks: &[Task], id: TaskId) -> Vec<Task> {
    tasks.iter().filter(|task| task.id != id).cloned().collect()
}

/// Monotonic id source that never hands out an id present in the collection.
///
/// Ids are not reused within a session even after the task holding them is
/// deleted, so a stale reference can never land on a newer task. Once the
/// upward counter runs off the end of the id space, ids are taken below the
/// lowest id ever seen instead.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    /// `None` once the upward counter is exhausted.
    next: Option<TaskId>,
    floor: TaskId,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            next: Some(1),
            floor: 1,
        }
    }

    /// Raise the high-water mark above every id in `tasks`.
    pub fn observe(&mut self, tasks: &[Task]) {
        let ids = tasks.iter().map(|task| task.id);
        if let Some(min) = ids.clone().min() {
            self.floor = self.floor.min(min);
        }
        if let (Some(max), Some(next)) = (ids.max(), self.next) {
            self.next = max.checked_add(1).map(|above| next.max(above));
        }
    }

    /// Next id not present in `tasks`, or `None` when the id space is used up.
    pub fn issue(&mut self, tasks: &[Task]) -> Option<TaskId> {
        self.observe(tasks);
        let taken = |id: TaskId| tasks.iter().any(|task| task.id == id);

        if let Some(id) = self.next.filter(|id| !taken(*id)) {
            self.next = id.checked_add(1);
            return Some(id);
        }

        let mut candidate = self.floor.checked_sub(1)?;
        while taken(candidate) {
            candidate = candidate.checked_sub(1)?;
        }
        self.floor = candidate;
        Some(candidate)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Owner of the authoritative task collection.
///
/// Each mutation runs the matching pure transform and commits its result.
/// Requests against an absent id, or with a blank title, leave the
/// collection as it was.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    ids: IdGenerator,
    default_owner: i64,
}

impl TaskStore {
    pub fn new(default_owner: i64) -> Self {
        Self {
            tasks: Vec::new(),
            ids: IdGenerator::new(),
            default_owner,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn default_owner(&self) -> i64 {
        self.default_owner
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Replace the whole collection, as on a successful initial load.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.ids.observe(&tasks);
        self.tasks = tasks;
    }

    pub fn create(&mut self, title: &str) -> Option<Task> {
        if normalize_title(title).is_none() {
            debug!("create ignored: blank title");
            return None;
        }
        let Some(id) = self.ids.issue(&self.tasks) else {
            debug!("create ignored: id space exhausted");
            return None;
        };
        let (tasks, task) = create_task(&self.tasks, id, title, self.default_owner)?;
        debug!(id = task.id, "task created");
        self.tasks = tasks;
        Some(task)
    }

    /// Returns whether a task was toggled.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        if !self.contains(id) {
            debug!(id, "toggle ignored: unknown id");
            return false;
        }
        self.tasks = toggle_task(&self.tasks, id);
        debug!(id, "task toggled");
        true
    }

    /// Returns whether the title was replaced.
    pub fn edit(&mut self, id: TaskId, title: &str) -> bool {
        if !self.contains(id) || normalize_title(title).is_none() {
            debug!(id, "edit ignored");
            return false;
        }
        self.tasks = edit_task(&self.tasks, id, title);
        debug!(id, "task edited");
        true
    }

    /// Returns whether a task was removed.
    pub fn delete(&mut self, id: TaskId) -> bool {
        if !self.contains(id) {
            debug!(id, "delete ignored: unknown id");
            return false;
        }
        self.tasks = delete_task(&self.tasks, id);
        debug!(id, "task deleted");
        true
    }
}
