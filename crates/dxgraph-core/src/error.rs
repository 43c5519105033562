//! Error types for dxgraph lookups.
//!
//! "Nothing matched" is not an error: it is [`LookupOutcome::NoMatch`](crate::types::LookupOutcome).
//! A failed query is never downgraded into an empty result.

use std::time::Duration;
use thiserror::Error;

/// Result type for dxgraph operations.
pub type Result<T, E = LookupError> = std::result::Result<T, E>;

/// Errors returned by the matching engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The symptom set was empty. Callers should prompt for input.
    #[error("no symptoms provided")]
    EmptyInput,

    /// The graph store could not execute or complete the query.
    #[error("query failed: {0}")]
    QueryFailure(#[from] QueryFailure),
}

impl LookupError {
    pub fn is_query_failure(&self) -> bool {
        matches!(self, LookupError::QueryFailure(_))
    }
}

/// Failures raised by a [`GraphStore`](crate::store::GraphStore).
///
/// None of these are retried by the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryFailure {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("query timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed query: {0}")]
    Malformed(String),

    /// A returned row lacked a projected field or had the wrong type.
    #[error("unexpected binding: missing or invalid field `{0}`")]
    Binding(String),

    #[error("backend error: {0}")]
    Backend(String),
}

// Convenience constructors
impl QueryFailure {
    pub fn connection(msg: impl Into<String>) -> Self {
        QueryFailure::Connection(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        QueryFailure::Backend(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        QueryFailure::Malformed(msg.into())
    }
}
