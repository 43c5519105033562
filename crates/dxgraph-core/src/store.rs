//! The graph store seam.
//!
//! The engine never talks to a database directly. It hands a
//! [`PatternQuery`] and its [`QueryParams`] to a `GraphStore` and shapes the
//! returned bindings. Different backends (in-memory, SQLite, a Cypher
//! server) implement this trait.

use std::sync::Arc;

use crate::error::QueryFailure;
use crate::query::{Binding, PatternQuery, QueryParams};

/// A read-only handle to a typed symptom graph.
///
/// Implementations acquire whatever connection they need inside
/// `execute` and release it before returning, on success and on failure.
/// Request timeouts are enforced here, not by the engine.
pub trait GraphStore: Send + Sync {
    /// Run `query` with `params` and return its rows.
    fn execute(&self, query: &PatternQuery, params: &QueryParams)
        -> Result<Vec<Binding>, QueryFailure>;
}

impl<S: GraphStore + ?Sized> GraphStore for &S {
    fn execute(&self, query: &PatternQuery, params: &QueryParams)
        -> Result<Vec<Binding>, QueryFailure> {
        (**self).execute(query, params)
    }
}

impl<S: GraphStore + ?Sized> GraphStore for Arc<S> {
    fn execute(&self, query: &PatternQuery, params: &QueryParams)
        -> Result<Vec<Binding>, QueryFailure> {
        (**self).execute(query, params)
    }
}

impl<S: GraphStore + ?Sized> GraphStore for Box<S> {
    fn execute(&self, query: &PatternQuery, params: &QueryParams)
        -> Result<Vec<Binding>, QueryFailure> {
        (**self).execute(query, params)
    }
}
