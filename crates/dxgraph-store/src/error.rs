//! Errors raised while opening or loading a store.
//!
//! Failures during a query are [`QueryFailure`](dxgraph_core::error::QueryFailure)s instead.

use dxgraph_core::types::{NodeLabel, RelationType};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate {label} node: {name}")]
    DuplicateNode { label: NodeLabel, name: String },

    #[error("{relation} relation references unknown {label} node: {name}")]
    UnknownNode {
        relation: RelationType,
        label: NodeLabel,
        name: String,
    },

    #[error("{0} has no symptom graph schema (tables `nodes` and `relations`)")]
    MissingSchema(PathBuf),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
