//! todo - Todo List Library
//!
//! This library provides the state engine behind the `todo` viewer: a task
//! list seeded once from a remote source, searched through a debounced filter,
//! and edited through create/edit dialogs.
//!
//! # Core Concepts
//!
//! - **Tasks**: short items with a title and completion flag, held in memory
//! - **Settled term**: the search text once typing has paused for the quiescence window
//! - **Visible list**: the tasks matching the settled term, derived on every change
//! - **Dialogs**: a single create or edit form, never both at once
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.todo.toml`
//! - `error`: Error types and result aliases
//! - `output`: JSON and human output for CLI commands
//! - `task`: Task records, collection transforms and the task store
//! - `filter`: Case-insensitive title filtering
//! - `timer`: Cancellable delayed callbacks
//! - `debounce`: Search term debouncing
//! - `loader`: Initial load from a remote or local source
//! - `dialog`: Create/edit dialog state machine
//! - `session`: Per-session state tying the above together
//! - `ui`: Terminal viewer built on ratatui

pub mod cli;
pub mod config;
pub mod debounce;
pub mod dialog;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod session;
pub mod task;
pub mod timer;
pub mod ui;

pub use error::{Error, Result};
