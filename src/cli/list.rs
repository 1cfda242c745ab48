use std::time::Instant;

use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::session::{Session, Summary};
use crate::task::Task;

use super::SourceSpec;

pub struct ListOptions {
    pub config: Config,
    pub source: SourceSpec,
    pub search: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ListOutput {
    search: String,
    summary: Summary,
    tasks: Vec<Task>,
}

pub fn run(options: ListOptions) -> Result<()> {
    let source = options.source.open()?;
    let mut session = Session::new(&options.config);
    session.begin_load();
    session.finish_load(source.fetch());
    if let Some(message) = session.load_error() {
        return Err(Error::Load(message.to_string()));
    }

    let term = options.search.unwrap_or_default();
    if !term.is_empty() {
        // One-shot: no typing to coalesce, settle immediately.
        let now = Instant::now();
        session.search_input(now, term.clone());
        session.poll_timers(now + options.config.search.quiescence());
    }

    let tasks = session.visible_tasks();
    let mut human = HumanOutput::new();
    for task in &tasks {
        human.push_line(format_row(task));
    }
    let summary = session.summary();
    human.push_summary("total", summary.total);
    human.push_summary("completed", summary.completed);
    human.push_summary("shown", summary.visible);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "list",
        &ListOutput {
            search: term,
            summary,
            tasks,
        },
        &human,
    )
}

fn format_row(task: &Task) -> String {
    let mark = if task.completed { 'x' } else { ' ' };
    format!("[{mark}] {} {}", task.id, task.title)
}
