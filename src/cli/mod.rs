//! Command-line interface for todo
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{Config, CONFIG_FILE_NAME};
use crate::error::Result;
use crate::loader::{FileSource, HttpSource, TaskSource};

mod list;
mod settings;
mod tui;

/// todo - browse, search and edit a todo list seeded from a remote source
#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file (defaults to ./.todo.toml)
    #[arg(long, global = true, env = "TODO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Remote endpoint to load tasks from
    #[arg(long, global = true, env = "TODO_SOURCE", conflicts_with = "file")]
    pub source: Option<String>,

    /// Load tasks from a local JSON file instead of the network
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive viewer (default)
    Tui,

    /// Load the list once and print it
    List {
        /// Only show tasks whose title contains this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show the effective configuration
    Config {
        /// Write the configuration to the config file if it does not exist yet
        #[arg(long)]
        write: bool,
    },
}

/// Where the initial list comes from, after CLI overrides.
#[derive(Debug, Clone)]
pub(crate) enum SourceSpec {
    Url(String),
    File(PathBuf),
}

impl SourceSpec {
    pub(crate) fn resolve(
        config: &Config,
        source: Option<String>,
        file: Option<PathBuf>,
    ) -> SourceSpec {
        if let Some(path) = file {
            return SourceSpec::File(path);
        }
        if let Some(url) = source {
            return SourceSpec::Url(url);
        }
        if let Some(path) = config.source.file.clone() {
            return SourceSpec::File(path);
        }
        SourceSpec::Url(config.source.url.clone())
    }

    pub(crate) fn open(&self) -> Result<Box<dyn TaskSource>> {
        Ok(match self {
            SourceSpec::Url(url) => Box::new(HttpSource::new(url.clone())?),
            SourceSpec::File(path) => Box::new(FileSource::new(path.clone())),
        })
    }
}

pub(crate) fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::load_from_dir(&std::env::current_dir()?),
    }
}

pub(crate) fn config_path(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => Ok(std::env::current_dir()?.join(CONFIG_FILE_NAME)),
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let config = load_config(self.config.as_ref())?;
        let source = SourceSpec::resolve(&config, self.source, self.file);
        match self.command.unwrap_or(Commands::Tui) {
            Commands::Tui => tui::run(tui::TuiOptions {
                config,
                source,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::List { search } => list::run(list::ListOptions {
                config,
                source,
                search,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Config { write } => settings::run(settings::ConfigOptions {
                path: config_path(self.config)?,
                config,
                source,
                write,
                json: self.json,
                quiet: self.quiet,
            }),
        }
    }
}
