//! CLI command implementations.

pub mod explain;
pub mod find;
pub mod init;
pub mod stats;
pub mod symptoms;

use anyhow::{Context, Result};
use dxgraph::prelude::*;
use tracing::debug;

use crate::config::{Backend, Config, StoreOverrides, StoreSettings};

/// A matching engine over whichever backend the settings select.
pub type Engine = MatchingEngine<Box<dyn GraphStore>>;

/// Open the configured store and wrap it in an engine using the
/// configured default policy.
pub fn open_engine(config: &Config, overrides: &StoreOverrides) -> Result<Engine> {
    let settings = config.store_settings(overrides);
    let store = open_store(&settings)?;
    Ok(MatchingEngine::new(store).with_policy(config.query.policy))
}

pub fn open_store(settings: &StoreSettings) -> Result<Box<dyn GraphStore>> {
    debug!(backend = ?settings.backend, path = %settings.path.display(), "opening store");
    match settings.backend {
        Backend::Snapshot => {
            let store = MemoryGraphStore::load(&settings.path).with_context(|| {
                format!("Failed to load graph snapshot: {}", settings.path.display())
            })?;
            Ok(Box::new(store))
        }
        Backend::Sqlite => open_sqlite(settings),
    }
}

#[cfg(feature = "sqlite")]
fn open_sqlite(settings: &StoreSettings) -> Result<Box<dyn GraphStore>> {
    let store = SqliteGraphStore::open(&settings.path)
        .with_context(|| format!("Failed to open SQLite graph: {}", settings.path.display()))?
        .with_timeout(settings.timeout);
    Ok(Box::new(store))
}

#[cfg(not(feature = "sqlite"))]
fn open_sqlite(_settings: &StoreSettings) -> Result<Box<dyn GraphStore>> {
    anyhow::bail!("dxgraph was built without SQLite support (enable the `sqlite` feature)")
}
