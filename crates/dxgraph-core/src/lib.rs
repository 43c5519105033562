//! # dxgraph Core
//!
//! Core types and the symptom matching engine for dxgraph.
//!
//! The knowledge graph has three node labels and two relation types:
//!
//! - **Symptom** -`INDICATES`-> **Disease**
//! - **Disease** -`TREATED_BY`-> **Medicine**
//!
//! A user supplies comma-separated symptom names; the [`MatchingEngine`]
//! normalizes them, asks a [`GraphStore`] for candidate diseases, applies a
//! matching [`Policy`] and aggregates the medicines of every qualifying
//! disease.
//!
//! ## Quick Start
//!
//! ```rust
//! use dxgraph_core::prelude::*;
//!
//! // A store that knows nothing: every lookup is a valid empty result.
//! struct EmptyStore;
//!
//! impl GraphStore for EmptyStore {
//!     fn execute(&self, _: &PatternQuery, _: &QueryParams) -> Result<Vec<Binding>, QueryFailure> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! let engine = MatchingEngine::new(EmptyStore).with_policy(Policy::ExactSet);
//! assert_eq!(engine.find_diseases("fever, cough").unwrap(), LookupOutcome::NoMatch);
//! assert_eq!(engine.find_diseases(" , ").unwrap(), LookupOutcome::NoInput);
//! ```

pub mod types;
pub mod error;
pub mod normalize;
pub mod policy;
pub mod query;
pub mod store;
pub mod engine;
pub mod prelude;

pub use engine::MatchingEngine;
pub use policy::Policy;
pub use store::GraphStore;
