//! # dxgraph
//!
//! Symptom → disease → medicine lookup over a typed knowledge graph.
//!
//! A user supplies one or more symptom names; dxgraph returns the diseases
//! those symptoms indicate and the medicines that treat them, under an
//! explicit matching policy.
//!
//! ## Quick Start
//!
//! ```rust
//! use dxgraph::prelude::*;
//!
//! let store = MemoryGraphStore::from_snapshot(&GraphSnapshot::sample()).unwrap();
//! let engine = MatchingEngine::new(store).with_policy(Policy::ExactSet);
//!
//! match engine.find_diseases("fever, cough").unwrap() {
//!     LookupOutcome::Matches(matches) => {
//!         for m in matches {
//!             println!("{}: {}", m.disease, m.medicines.join(", "));
//!         }
//!     }
//!     LookupOutcome::NoMatch => println!("no disease found"),
//!     LookupOutcome::NoInput => println!("please enter a symptom"),
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`dxgraph_core`] - Data model, normalizer, policies, pattern queries,
//!   the `GraphStore` trait and the matching engine
//! - [`dxgraph_store`] - Store adapters (in-memory petgraph, SQLite)
//!
//! ## Matching Policies
//!
//! | Policy | A disease qualifies when |
//! |--------|--------------------------|
//! | `Any` | it shares at least one symptom with the query |
//! | `ExactSet` | its full symptom set equals the query set |

pub use dxgraph_core;
pub use dxgraph_store;

pub mod prelude {
    //! Everything needed for a lookup.
    pub use dxgraph_core::prelude::*;
    pub use dxgraph_store::{GraphSnapshot, MemoryGraphStore, StoreError};

    #[cfg(feature = "sqlite")]
    pub use dxgraph_store::SqliteGraphStore;
}
