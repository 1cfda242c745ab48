use std::io;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::debug;

use crate::dialog::DialogAction;
use crate::error::Result;
use crate::loader::{spawn_loader, TaskSource};
use crate::session::Session;
use crate::task::{Task, TaskId};

use super::view;

const EVENT_POLL_MS: u64 = 120;

type LoadOutcome = Result<Vec<Task>>;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    List,
    Search,
}

pub struct AppState {
    pub(crate) session: Session,
    pub(crate) focus: Focus,
    pub(crate) show_help: bool,
    pub(crate) source_label: String,
}

impl AppState {
    pub fn new(session: Session, source_label: String) -> Self {
        Self {
            session,
            focus: Focus::List,
            show_help: false,
            source_label,
        }
    }

    pub(crate) fn footer_hint(&self) -> &'static str {
        if self.session.load_error().is_some() {
            return "q quit";
        }
        if self.session.dialog().is_open() {
            return "type title  enter submit  ctrl-u clear  esc cancel";
        }
        if self.focus == Focus::Search {
            return "type to search  enter done  esc clear";
        }
        "j/k move  / search  a add  enter edit  space toggle  d delete  ? help  q quit"
    }

    /// Apply one key press. Returns `true` when the viewer should exit.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        if self.session.load_error().is_some() {
            return matches!(key.code, KeyCode::Char('q') | KeyCode::Esc);
        }

        if self.session.dialog().is_open() {
            match self.session.handle_dialog_key(key) {
                DialogAction::Cancel => {
                    self.session.cancel_dialog();
                }
                DialogAction::Submit => {
                    self.session.submit_dialog();
                }
                DialogAction::None => {}
            }
            return false;
        }

        if self.focus == Focus::Search {
            self.handle_search_key(key, now);
            return false;
        }

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => {
                if self.session.raw_term().is_empty() {
                    return true;
                }
                self.session.clear_search(now);
            }
            KeyCode::Char('?') => self.show_help = !self.show_help,
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Down | KeyCode::Char('j') => self.session.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.session.move_selection(-1),
            KeyCode::PageDown => self.session.move_selection(10),
            KeyCode::PageUp => self.session.move_selection(-10),
            KeyCode::Char('a') => {
                self.session.open_create();
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(id) = self.selected_id() {
                    self.session.open_edit(id);
                }
            }
            KeyCode::Char(' ') | KeyCode::Char('x') => {
                if let Some(id) = self.selected_id() {
                    self.session.toggle(id);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_id() {
                    self.session.delete(id);
                }
            }
            _ => {}
        }
        false
    }

    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Esc => {
                self.session.clear_search(now);
                self.focus = Focus::List;
            }
            KeyCode::Enter | KeyCode::Down | KeyCode::Tab => self.focus = Focus::List,
            KeyCode::Backspace => {
                let mut term = self.session.raw_term().to_string();
                if term.pop().is_some() {
                    self.session.search_input(now, term);
                }
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) || ch.is_control() {
                    return;
                }
                let mut term = self.session.raw_term().to_string();
                term.push(ch);
                self.session.search_input(now, term);
            }
            _ => {}
        }
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.session.selected_task().map(|task| task.id)
    }
}

pub fn run(session: Session, source: Box<dyn TaskSource>) -> Result<()> {
    let (load_tx, load_rx) = mpsc::channel();
    let mut app = AppState::new(session, source.describe());
    if app.session.begin_load() {
        spawn_loader(source, load_tx);
    }
    let result = run_terminal(&mut app, load_rx);
    app.session.teardown();
    result
}

fn run_terminal(app: &mut AppState, load_rx: Receiver<LoadOutcome>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app, load_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    load_rx: Receiver<LoadOutcome>,
) -> Result<()> {
    let mut dirty = true;
    loop {
        while let Ok(outcome) = load_rx.try_recv() {
            app.session.finish_load(outcome);
            dirty = true;
        }

        if app.session.poll_timers(Instant::now()) {
            dirty = true;
        }

        if dirty {
            terminal.draw(|frame| view::render(frame, app))?;
            dirty = false;
        }

        if event::poll(poll_timeout(app.session.next_deadline(), Instant::now()))? {
            match event::read()? {
                Event::Key(key) => {
                    if app.handle_key(key, Instant::now()) {
                        debug!("viewer exit requested");
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }
    }
    Ok(())
}

/// Wait for input no longer than the next timer deadline.
fn poll_timeout(next_deadline: Option<Instant>, now: Instant) -> Duration {
    let idle = Duration::from_millis(EVENT_POLL_MS);
    match next_deadline {
        Some(deadline) => deadline.saturating_duration_since(now).min(idle),
        None => idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::DialogState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded_app() -> AppState {
        let mut session = Session::with_settings(Duration::from_millis(500), 1);
        session.begin_load();
        session.finish_load(Ok(vec![Task {
            id: 1,
            title: "Buy milk".to_string(),
            completed: false,
            owner_id: 1,
        }]));
        AppState::new(session, "static".to_string())
    }

    #[test]
    fn add_type_submit_creates_task() {
        let mut app = loaded_app();
        let now = Instant::now();
        app.handle_key(key(KeyCode::Char('a')), now);
        assert_eq!(app.session.dialog_state(), DialogState::Creating);
        for ch in "Walk dog".chars() {
            app.handle_key(key(KeyCode::Char(ch)), now);
        }
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.session.dialog_state(), DialogState::Closed);
        assert_eq!(app.session.tasks()[0].title, "Walk dog");
    }

    #[test]
    fn search_typing_settles_after_window() {
        let mut app = loaded_app();
        let now = Instant::now();
        app.handle_key(key(KeyCode::Char('/')), now);
        for ch in "dog".chars() {
            app.handle_key(key(KeyCode::Char(ch)), now);
        }
        assert_eq!(app.session.raw_term(), "dog");
        assert_eq!(app.session.settled_term(), "");
        assert!(app.session.poll_timers(now + Duration::from_millis(500)));
        assert!(app.session.visible_indices().is_empty());
    }

    #[test]
    fn load_error_only_allows_quit() {
        let mut session = Session::with_settings(Duration::from_millis(500), 1);
        session.begin_load();
        session.finish_load(Err(crate::error::Error::Load("offline".to_string())));
        let mut app = AppState::new(session, "static".to_string());
        let now = Instant::now();
        assert!(!app.handle_key(key(KeyCode::Char('a')), now));
        assert_eq!(app.session.dialog_state(), DialogState::Closed);
        assert!(app.handle_key(key(KeyCode::Char('q')), now));
    }

    #[test]
    fn poll_timeout_never_exceeds_idle_or_deadline() {
        let now = Instant::now();
        assert_eq!(poll_timeout(None, now), Duration::from_millis(EVENT_POLL_MS));
        assert_eq!(
            poll_timeout(Some(now + Duration::from_millis(20)), now),
            Duration::from_millis(20)
        );
        assert_eq!(poll_timeout(Some(now), now), Duration::ZERO);
    }
}
