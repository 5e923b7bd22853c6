//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::graph::DEFAULT_LOCAL_DEPTH;
use crate::parser::DEFAULT_CONTEXT_LENGTH;
use crate::search::SearchOptions;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default vault directory
    pub dir: Option<PathBuf>,

    /// Characters of surrounding line stored with each backlink
    pub context_length: Option<usize>,

    /// Maximum number of search results
    pub search_limit: Option<usize>,

    /// Default number of hops for local graphs
    pub graph_depth: Option<usize>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/notegraph/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notegraph")
            .join("config.toml")
    }

    /// Resolve the vault directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--dir` argument
    /// 2. Config file `dir` setting
    /// 3. Current working directory
    pub fn notes_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn context_length(&self, cli_value: Option<usize>) -> usize {
        cli_value
            .or(self.context_length)
            .unwrap_or(DEFAULT_CONTEXT_LENGTH)
    }

    pub fn search_limit(&self, cli_value: Option<usize>) -> usize {
        cli_value
            .or(self.search_limit)
            .unwrap_or_else(|| SearchOptions::default().limit)
    }

    pub fn graph_depth(&self, cli_value: Option<usize>) -> usize {
        cli_value.or(self.graph_depth).unwrap_or(DEFAULT_LOCAL_DEPTH)
    }
}
