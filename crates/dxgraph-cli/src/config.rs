//! Configuration management for the dxgraph CLI.

use anyhow::{ensure, Context, Result};
use clap::ValueEnum;
use dxgraph::prelude::Policy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "dxgraph.toml";

/// dxgraph configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub query: QueryConfig,
    /// Directory of the file this config was read from. Relative store
    /// paths resolve against it.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Which adapter serves the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// JSON graph snapshot loaded into memory
    Snapshot,
    /// Read-only SQLite database
    Sqlite,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_backend")]
    pub backend: Backend,
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default)]
    pub policy: Policy,
}

// Default value functions
fn default_log_level() -> String { "warn".to_string() }
fn default_backend() -> Backend { Backend::Snapshot }
fn default_store_path() -> PathBuf { PathBuf::from("graph.json") }
fn default_timeout_ms() -> u64 { 5_000 }

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            store: StoreConfig::default(),
            query: QueryConfig::default(),
            base_dir: None,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_store_path(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct StoreOverrides {
    pub graph: Option<PathBuf>,
    pub backend: Option<Backend>,
}

/// Fully resolved store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub backend: Backend,
    pub path: PathBuf,
    pub timeout: Duration,
}

impl Config {
    /// Load dxgraph.toml from the current or parent directories, then the
    /// user config directory, else defaults.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Reject values no store can work with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.store.timeout_ms > 0,
            "store.timeout_ms must be greater than zero"
        );
        Ok(())
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Merge command-line overrides into the store section.
    ///
    /// A `--graph` given on the command line is taken as-is; a path from the
    /// config file is relative to that file. Without an explicit backend a
    /// `.db`/`.sqlite`/`.sqlite3` graph selects SQLite.
    pub fn store_settings(&self, overrides: &StoreOverrides) -> StoreSettings {
        let path = match &overrides.graph {
            Some(graph) => graph.clone(),
            None => match &self.base_dir {
                Some(base) if self.store.path.is_relative() => base.join(&self.store.path),
                _ => self.store.path.clone(),
            },
        };

        let backend = overrides.backend.unwrap_or_else(|| {
            if overrides.graph.is_some() {
                backend_for(&path).unwrap_or(self.store.backend)
            } else {
                self.store.backend
            }
        });

        StoreSettings {
            backend,
            path,
            timeout: Duration::from_millis(self.store.timeout_ms),
        }
    }
}

fn backend_for(path: &Path) -> Option<Backend> {
    match path.extension()?.to_str()? {
        "db" | "sqlite" | "sqlite3" => Some(Backend::Sqlite),
        "json" => Some(Backend::Snapshot),
        _ => None,
    }
}

/// Find dxgraph.toml in current or parent directories, falling back to
/// `<config dir>/dxgraph/dxgraph.toml`.
fn find_config_file() -> Option<PathBuf> {
    if let Ok(mut dir) = std::env::current_dir() {
        loop {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }
            if !dir.pop() {
                break;
            }
        }
    }
    let user_config = dirs::config_dir()?.join("dxgraph").join(CONFIG_FILE);
    user_config.exists().then_some(user_config)
}
