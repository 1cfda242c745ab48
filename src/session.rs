//! Session state for a single user.
//!
//! [`Session`] is the one owner of load status, the task collection, search
//! state and dialog state. Everything changes through its named commands, and
//! the visible list is recomputed from `(tasks, settled term)` after each one
//! that can affect it.
//!
//! Mutations and dialogs are only accepted once the initial load has
//! succeeded. Search input is accepted at any time.

use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use tracing::debug;

use crate::config::Config;
use crate::debounce::Debouncer;
use crate::dialog::{DialogAction, DialogCommand, DialogController, DialogState};
use crate::error::Result;
use crate::filter;
use crate::loader::{LoadStatus, Loader};
use crate::task::{Task, TaskId, TaskStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Summary {
    pub total: usize,
    pub completed: usize,
    pub visible: usize,
}

#[derive(Debug)]
pub struct Session {
    loader: Loader,
    store: TaskStore,
    search: Debouncer,
    dialog: DialogController,
    visible: Vec<usize>,
    selected: Option<usize>,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self::with_settings(config.search.quiescence(), config.tasks.default_owner)
    }

    pub fn with_settings(quiescence: Duration, default_owner: i64) -> Self {
        Self {
            loader: Loader::new(),
            store: TaskStore::new(default_owner),
            search: Debouncer::new(quiescence),
            dialog: DialogController::new(),
            visible: Vec::new(),
            selected: None,
        }
    }

    pub fn load_status(&self) -> &LoadStatus {
        self.loader.status()
    }

    pub fn loading(&self) -> bool {
        self.loader.loading()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.loader.error()
    }

    pub fn is_interactive(&self) -> bool {
        self.loader.is_ready()
    }

    pub fn begin_load(&mut self) -> bool {
        self.loader.begin()
    }

    pub fn finish_load(&mut self, outcome: Result<Vec<Task>>) {
        if let Some(tasks) = self.loader.complete(outcome) {
            self.store.replace_all(tasks);
            self.recompute();
        } else if self.load_error().is_some() {
            self.dialog.cancel();
            self.search.teardown();
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    /// Visible subset, freshly derived from the collection and settled term.
    pub fn visible_tasks(&self) -> Vec<Task> {
        filter::filter_tasks(self.store.tasks(), self.search.settled_term())
    }

    /// Positions of the visible rows in [`Session::tasks`].
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    pub fn raw_term(&self) -> &str {
        self.search.raw_term()
    }

    pub fn settled_term(&self) -> &str {
        self.search.settled_term()
    }

    pub fn search_pending(&self) -> bool {
        self.search.is_pending()
    }

    pub fn search_input(&mut self, now: Instant, term: impl Into<String>) {
        self.search.on_input(now, term);
    }

    /// Clearing goes through the same quiescence window as typing.
    pub fn clear_search(&mut self, now: Instant) {
        self.search.on_input(now, String::new());
    }

    /// Fire due timers. Returns whether the visible list was recomputed.
    pub fn poll_timers(&mut self, now: Instant) -> bool {
        if self.search.poll(now) {
            self.recompute();
            return true;
        }
        false
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.search.next_deadline()
    }

    pub fn create(&mut self, title: &str) -> Option<Task> {
        if !self.accepts_mutation("create") {
            return None;
        }
        let task = self.store.create(title)?;
        self.recompute();
        Some(task)
    }

    pub fn toggle(&mut self, id: TaskId) -> bool {
        if !self.accepts_mutation("toggle") {
            return false;
        }
        let changed = self.store.toggle(id);
        if changed {
            self.recompute();
        }
        changed
    }

    pub fn edit(&mut self, id: TaskId, title: &str) -> bool {
        if !self.accepts_mutation("edit") {
            return false;
        }
        let changed = self.store.edit(id, title);
        if changed {
            self.recompute();
        }
        changed
    }

    pub fn delete(&mut self, id: TaskId) -> bool {
        if !self.accepts_mutation("delete") {
            return false;
        }
        let changed = self.store.delete(id);
        if changed {
            self.recompute();
        }
        changed
    }

    pub fn dialog(&self) -> &DialogController {
        &self.dialog
    }

    pub fn dialog_state(&self) -> DialogState {
        self.dialog.state()
    }

    pub fn open_create(&mut self) -> bool {
        if !self.accepts_mutation("open create") {
            return false;
        }
        self.dialog.open_create()
    }

    pub fn open_edit(&mut self, id: TaskId) -> bool {
        if !self.accepts_mutation("open edit") {
            return false;
        }
        self.dialog.open_edit(self.store.tasks(), id)
    }

    pub fn set_dialog_title(&mut self, title: impl Into<String>) {
        self.dialog.set_title(title);
    }

    pub fn handle_dialog_key(&mut self, key: KeyEvent) -> DialogAction {
        self.dialog.handle_key(key)
    }

    /// Submit the open dialog with its title field and apply the result.
    pub fn submit_dialog(&mut self) -> Option<DialogCommand> {
        let command = self.dialog.submit()?;
        self.apply(&command);
        Some(command)
    }

    pub fn cancel_dialog(&mut self) -> bool {
        self.dialog.cancel()
    }

    pub fn submit_create(&mut self, title: &str) -> Option<Task> {
        match self.dialog.submit_create(title)? {
            DialogCommand::Create { title } => self.create(&title),
            DialogCommand::Edit { .. } => None,
        }
    }

    pub fn submit_edit(&mut self, title: &str) -> bool {
        match self.dialog.submit_edit(title) {
            Some(DialogCommand::Edit { id, title }) => self.edit(id, &title),
            _ => false,
        }
    }

    pub fn apply(&mut self, command: &DialogCommand) {
        match command {
            DialogCommand::Create { title } => {
                self.create(title);
            }
            DialogCommand::Edit { id, title } => {
                self.edit(*id, title);
            }
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected.and_then(|idx| self.store.tasks().get(idx))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.visible.is_empty() {
            self.selected = None;
            return;
        }
        let current_pos = self
            .selected
            .and_then(|idx| self.visible.iter().position(|candidate| *candidate == idx))
            .unwrap_or(0);
        let max = self.visible.len().saturating_sub(1);
        let next = (current_pos as isize + delta).clamp(0, max as isize) as usize;
        self.selected = Some(self.visible[next]);
    }

    pub fn summary(&self) -> Summary {
        let tasks = self.store.tasks();
        Summary {
            total: tasks.len(),
            completed: tasks.iter().filter(|task| task.completed).count(),
            visible: self.visible.len(),
        }
    }

    /// Drop any pending search settle. Call before discarding the session.
    pub fn teardown(&mut self) {
        self.search.teardown();
    }

    fn accepts_mutation(&self, action: &str) -> bool {
        if self.is_interactive() {
            return true;
        }
        debug!(action, status = ?self.loader.status(), "rejected: session not ready");
        false
    }

    fn recompute(&mut self) {
        let previous_id = self.selected_task().map(|task| task.id);
        self.visible =
            filter::filter_task_indices(self.store.tasks(), self.search.settled_term());
        self.selected = filter::select_by_id(self.store.tasks(), &self.visible, previous_id);
        debug!(
            total = self.store.tasks().len(),
            visible = self.visible.len(),
            "visible tasks recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn ready_session() -> Session {
        let mut session = Session::with_settings(Duration::from_millis(500), 1);
        session.begin_load();
        session.finish_load(Ok(vec![
            Task {
                id: 1,
                title: "Buy milk".to_string(),
                completed: false,
                owner_id: 1,
            },
            Task {
                id: 2,
                title: "Walk dog".to_string(),
                completed: false,
                owner_id: 1,
            },
        ]));
        session
    }

    #[test]
    fn selection_follows_task_across_recompute() {
        let mut session = ready_session();
        session.move_selection(1);
        assert_eq!(session.selected_task().map(|task| task.id), Some(2));
        session.create("Read book").expect("created");
        assert_eq!(session.selected_task().map(|task| task.id), Some(2));
    }

    #[test]
    fn mutations_rejected_before_load_and_after_failure() {
        let mut session = Session::with_settings(Duration::from_millis(500), 1);
        assert!(session.create("early").is_none());
        session.begin_load();
        assert!(!session.open_create());
        session.finish_load(Err(Error::Load("offline".to_string())));
        assert_eq!(session.load_error(), Some("offline"));
        assert!(session.create("late").is_none());
        assert!(!session.open_create());
        assert!(session.tasks().is_empty());
    }

    #[test]
    fn summary_counts_completed_and_visible() {
        let mut session = ready_session();
        session.toggle(1);
        let start = Instant::now();
        session.search_input(start, "dog");
        session.poll_timers(start + Duration::from_millis(500));
        assert_eq!(
            session.summary(),
            Summary {
                total: 2,
                completed: 1,
                visible: 1
            }
        );
    }
}
