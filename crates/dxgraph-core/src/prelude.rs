//! dxgraph Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use dxgraph_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{
    DiseaseMatch, GraphCounts, LookupOutcome,
    NodeLabel, RelationType, SymptomSet,
};

pub use crate::normalize::{normalize, symptom_set};
pub use crate::policy::Policy;
pub use crate::query::{Binding, PatternQuery, QueryParams};

// Re-export the GraphStore trait and the engine
pub use crate::store::GraphStore;
pub use crate::engine::MatchingEngine;

// Re-export error types
pub use crate::error::{LookupError, QueryFailure, Result};
