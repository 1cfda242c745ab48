//! Create/edit dialog workflow.
//!
//! Exactly one dialog can be open at a time. Opening while another is open is
//! rejected. A submit with a blank title field is unavailable: it returns no
//! command and the dialog stays open.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::task::{normalize_title, Task, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    Creating,
    Editing(TaskId),
}

/// Mutation requested by a submitted dialog, to be applied to the task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogCommand {
    Create { title: String },
    Edit { id: TaskId, title: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    None,
    Cancel,
    Submit,
}

#[derive(Debug, Clone)]
pub struct DialogController {
    state: DialogState,
    title: String,
}

impl DialogController {
    pub fn new() -> Self {
        Self {
            state: DialogState::Closed,
            title: String::new(),
        }
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != DialogState::Closed
    }

    /// Current contents of the title field.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if self.is_open() {
            self.title = title.into();
        }
    }

    pub fn can_submit(&self) -> bool {
        self.is_open() && normalize_title(&self.title).is_some()
    }

    pub fn open_create(&mut self) -> bool {
        if self.is_open() {
            debug!(state = ?self.state, "open create rejected");
            return false;
        }
        self.state = DialogState::Creating;
        self.title.clear();
        true
    }

    /// Open the edit form pre-filled with the task's current title.
    pub fn open_edit(&mut self, tasks: &[Task], id: TaskId) -> bool {
        if self.is_open() {
            debug!(state = ?self.state, "open edit rejected");
            return false;
        }
        let Some(task) = tasks.iter().find(|task| task.id == id) else {
            debug!(id, "open edit rejected: unknown id");
            return false;
        };
        self.state = DialogState::Editing(id);
        self.title = task.title.clone();
        true
    }

    pub fn submit_create(&mut self, title: &str) -> Option<DialogCommand> {
        if self.state != DialogState::Creating {
            return None;
        }
        let title = normalize_title(title)?.to_string();
        self.close();
        Some(DialogCommand::Create { title })
    }

    pub fn cancel_create(&mut self) -> bool {
        if self.state != DialogState::Creating {
            return false;
        }
        self.close();
        true
    }

    pub fn submit_edit(&mut self, title: &str) -> Option<DialogCommand> {
        let DialogState::Editing(id) = self.state else {
            return None;
        };
        normalize_title(title)?;
        let title = title.to_string();
        self.close();
        Some(DialogCommand::Edit { id, title })
    }

    pub fn cancel_edit(&mut self) -> bool {
        if !matches!(self.state, DialogState::Editing(_)) {
            return false;
        }
        self.close();
        true
    }

    /// Submit whichever dialog is open using the title field.
    pub fn submit(&mut self) -> Option<DialogCommand> {
        let title = self.title.clone();
        match self.state {
            DialogState::Closed => None,
            DialogState::Creating => self.submit_create(&title),
            DialogState::Editing(_) => self.submit_edit(&title),
        }
    }

    pub fn cancel(&mut self) -> bool {
        match self.state {
            DialogState::Closed => false,
            DialogState::Creating => self.cancel_create(),
            DialogState::Editing(_) => self.cancel_edit(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogAction {
        if !self.is_open() {
            return DialogAction::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('u') {
            self.title.clear();
            return DialogAction::None;
        }

        match key.code {
            KeyCode::Esc => DialogAction::Cancel,
            KeyCode::Enter => {
                if self.can_submit() {
                    DialogAction::Submit
                } else {
                    DialogAction::None
                }
            }
            KeyCode::Backspace => {
                self.title.pop();
                DialogAction::None
            }
            KeyCode::Char(ch) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL) && !ch.is_control() {
                    self.title.push(ch);
                }
                DialogAction::None
            }
            _ => DialogAction::None,
        }
    }

    fn close(&mut self) {
        self.state = DialogState::Closed;
        self.title.clear();
    }
}

impl Default for DialogController {
    fn default() -> Self {
        Self::new()
    }
}
