//! One-shot initial load of the task list.
//!
//! The fetch runs off the event loop on its own thread; its outcome comes back
//! as a message and is applied through [`Loader::complete`]. A failure is final
//! for the session: there is no retry and no partial list.

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::task::Task;

pub const DEFAULT_SOURCE_URL: &str = "https://jsonplaceholder.typicode.com/todos";

/// Anything that can produce the initial task collection.
pub trait TaskSource: Send {
    /// Short human-readable origin, for logs and status lines.
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<Vec<Task>>;
}

/// Remote JSON endpoint returning an array of task records.
pub struct HttpSource {
    http: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("todo/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub async fn fetch_async(&self) -> Result<Vec<Task>> {
        let tasks: Vec<Task> = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(tasks)
    }
}

impl TaskSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<Vec<Task>> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.fetch_async())
    }
}

/// Local JSON file with the same shape as the remote response.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TaskSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<Task>> {
        let content = std::fs::read_to_string(&self.path)?;
        let tasks: Vec<Task> = serde_json::from_str(&content)?;
        Ok(tasks)
    }
}

/// Fixed outcome, for embedding and tests.
pub struct StaticSource {
    outcome: std::result::Result<Vec<Task>, String>,
}

impl StaticSource {
    pub fn ok(tasks: Vec<Task>) -> Self {
        Self { outcome: Ok(tasks) }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
        }
    }
}

impl TaskSource for StaticSource {
    fn describe(&self) -> String {
        "static".to_string()
    }

    fn fetch(&self) -> Result<Vec<Task>> {
        self.outcome.clone().map_err(Error::Load)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Loader {
    status: LoadStatus,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            status: LoadStatus::Idle,
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Loaded
    }

    /// Mark the load as in flight. Only the first call succeeds.
    pub fn begin(&mut self) -> bool {
        if self.status != LoadStatus::Idle {
            warn!("load already started; ignoring");
            return false;
        }
        self.status = LoadStatus::Loading;
        true
    }

    /// Apply the fetch outcome, returning the collection to adopt on success.
    ///
    /// Outcomes arriving when no load is in flight are discarded.
    pub fn complete(&mut self, outcome: Result<Vec<Task>>) -> Option<Vec<Task>> {
        if !self.loading() {
            warn!("load outcome arrived with no load in flight; ignoring");
            return None;
        }
        match outcome {
            Ok(tasks) => {
                info!(count = tasks.len(), "tasks loaded");
                self.status = LoadStatus::Loaded;
                Some(tasks)
            }
            Err(err) => {
                let message = load_error_message(&err);
                warn!(error = %message, "task load failed");
                self.status = LoadStatus::Failed(message);
                None
            }
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn load_error_message(err: &Error) -> String {
    match err {
        Error::Load(message) => message.clone(),
        other => other.to_string(),
    }
}

/// Run `source.fetch()` on a worker thread and deliver the outcome on `tx`.
pub fn spawn_loader(source: Box<dyn TaskSource>, tx: Sender<Result<Vec<Task>>>) -> JoinHandle<()> {
    thread::spawn(move || {
        debug!(source = %source.describe(), "fetching tasks");
        let _ = tx.send(source.fetch());
    })
}
