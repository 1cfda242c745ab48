use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};

use super::SourceSpec;

pub struct ConfigOptions {
    pub path: PathBuf,
    pub config: Config,
    pub source: SourceSpec,
    pub write: bool,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ConfigOutput<'a> {
    path: String,
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    written: Option<bool>,
    config: &'a Config,
}

pub fn run(options: ConfigOptions) -> Result<()> {
    let source = match &options.source {
        SourceSpec::Url(url) => url.clone(),
        SourceSpec::File(path) => path.display().to_string(),
    };

    let written = if options.write {
        Some(ensure_config(&options.path, &options.config)?)
    } else {
        None
    };

    let mut human = HumanOutput::with_header("Effective configuration");
    human.push_line(format!("source: {source}"));
    human.push_line(format!("search.debounce_ms: {}", options.config.search.debounce_ms));
    human.push_line(format!(
        "tasks.default_owner: {}",
        options.config.tasks.default_owner
    ));
    match written {
        Some(true) => human.push_summary("wrote", options.path.display()),
        Some(false) => human.push_summary("kept", options.path.display()),
        None => {}
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "config",
        &ConfigOutput {
            path: options.path.display().to_string(),
            source,
            written,
            config: &options.config,
        },
        &human,
    )
}

/// Write `config` to `path` unless a config file is already there.
fn ensure_config(path: &Path, config: &Config) -> Result<bool> {
    if path.exists() {
        if !path.is_file() {
            return Err(Error::OperationFailed(format!(
                "config path exists but is not a file: {}",
                path.display()
            )));
        }
        return Ok(false);
    }
    config.save(path)?;
    Ok(true)
}
