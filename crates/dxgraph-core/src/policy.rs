//! Matching policies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::types::SymptomSet;

/// The rule deciding which diseases qualify for a queried symptom set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Policy {
    /// The disease shares at least one symptom with the query.
    #[default]
    #[serde(rename = "any")]
    Any,
    /// The disease's full symptom set equals the query, as unordered sets.
    #[serde(rename = "exact", alias = "exact_set", alias = "exact-set")]
    ExactSet,
}

impl Policy {
    /// Does a disease with `disease_symptoms` qualify for `query`?
    pub fn qualifies(&self, query: &SymptomSet, disease_symptoms: &BTreeSet<String>) -> bool {
        match self {
            Policy::Any => query.intersects(disease_symptoms),
            Policy::ExactSet => query.set_equals(disease_symptoms),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Any => "any",
            Policy::ExactSet => "exact",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown matching policy `{0}` (expected `any` or `exact`)")]
pub struct ParsePolicyError(pub String);

impl FromStr for Policy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(Policy::Any),
            "exact" | "exact_set" | "exact-set" => Ok(Policy::ExactSet),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}
