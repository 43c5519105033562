//! # dxgraph Store
//!
//! Graph store adapters implementing [`dxgraph_core::GraphStore`].
//!
//! | Backend | Feature Flag | Description |
//! |---------|--------------|-------------|
//! | In-Memory | (default) | petgraph graph loaded from a JSON snapshot, good for tests and small graphs |
//! | SQLite | `sqlite` | Read-only database file, one connection per query |
//!
//! ## Quick Start
//!
//! ```rust
//! use dxgraph_core::prelude::*;
//! use dxgraph_store::{GraphSnapshot, MemoryGraphStore};
//!
//! let snapshot = GraphSnapshot::new()
//!     .node(NodeLabel::Symptom, "fever")
//!     .node(NodeLabel::Disease, "Flu")
//!     .node(NodeLabel::Medicine, "Paracetamol")
//!     .relation(RelationType::Indicates, "fever", "Flu")
//!     .relation(RelationType::TreatedBy, "Flu", "Paracetamol");
//!
//! let store = MemoryGraphStore::from_snapshot(&snapshot).unwrap();
//! let engine = MatchingEngine::new(store);
//!
//! let outcome = engine.find_diseases("fever").unwrap();
//! assert_eq!(outcome.matches()[0].medicines, vec!["Paracetamol"]);
//! ```

pub mod error;
pub mod snapshot;
pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use error::StoreError;
pub use memory::MemoryGraphStore;
pub use snapshot::{GraphSnapshot, NodeRecord, RelationRecord};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteGraphStore;
