//! Structured pattern queries and the bindings stores return for them.
//!
//! A [`PatternQuery`] names a read-only pattern over the typed graph and
//! fixes its projection. Stores that speak Cypher can run
//! [`PatternQuery::to_cypher`] directly; other stores answer the same
//! pattern natively and return rows with the same field names.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::QueryFailure;
use crate::policy::Policy;
use crate::types::SymptomSet;

/// Field names shared by queries and bindings.
pub mod fields {
    pub const DISEASE: &str = "disease";
    pub const SYMPTOMS: &str = "symptoms";
    pub const MEDICINES: &str = "medicines";
    pub const SYMPTOM: &str = "symptom";
    pub const LABEL: &str = "label";
    pub const COUNT: &str = "count";
}

/// A read-only pattern query against the symptom graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "pattern", rename_all = "snake_case")]
pub enum PatternQuery {
    /// Diseases indicated by at least one of `$symptoms`.
    ///
    /// Projection: `disease`, `symptoms` (the disease's full symptom set),
    /// `medicines`. Stores may use `policy` to prune rows; the engine
    /// applies it again either way.
    DiseasesBySymptoms { policy: Policy },
    /// Every symptom name. Projection: `symptom`.
    SymptomNames,
    /// One row per node label and per relation type.
    /// Projection: `label`, `count`.
    Counts,
}

impl PatternQuery {
    pub fn diseases(policy: Policy) -> Self {
        PatternQuery::DiseasesBySymptoms { policy }
    }

    /// Render the query as Cypher. Parameters are referenced as `$name`.
    pub fn to_cypher(&self) -> String {
        match self {
            PatternQuery::DiseasesBySymptoms { policy } => {
                let mut cypher = String::from(
                    "MATCH (q:Symptom)-[:INDICATES]->(d:Disease)\n\
                     WHERE q.name IN $symptoms\n\
                     WITH DISTINCT d\n\
                     MATCH (s:Symptom)-[:INDICATES]->(d)\n\
                     WITH d, COLLECT(DISTINCT s.name) AS symptoms\n",
                );
                if *policy == Policy::ExactSet {
                    cypher.push_str(
                        "WHERE size(symptoms) = size($symptoms)\n  \
                         AND ALL(name IN symptoms WHERE name IN $symptoms)\n  \
                         AND ALL(name IN $symptoms WHERE name IN symptoms)\n",
                    );
                }
                cypher.push_str(
                    "OPTIONAL MATCH (d)-[:TREATED_BY]->(m:Medicine)\n\
                     RETURN d.name AS disease, symptoms, COLLECT(DISTINCT m.name) AS medicines\n\
                     ORDER BY disease",
                );
                cypher
            }
            PatternQuery::SymptomNames => {
                "MATCH (s:Symptom)\nRETURN s.name AS symptom\nORDER BY symptom".to_string()
            }
            PatternQuery::Counts => "MATCH (n)\n\
                 WHERE n:Symptom OR n:Disease OR n:Medicine\n\
                 RETURN labels(n)[0] AS label, count(n) AS count\n\
                 UNION ALL\n\
                 MATCH ()-[r:INDICATES|TREATED_BY]->()\n\
                 RETURN type(r) AS label, count(r) AS count"
                .to_string(),
        }
    }
}

/// Parameters bound into a pattern query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    /// Distinct symptom names in lexical order. Bound as `$symptoms`.
    #[serde(default)]
    pub symptoms: Vec<String>,
}

impl QueryParams {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn for_symptoms(symptoms: &SymptomSet) -> Self {
        Self {
            symptoms: symptoms.iter().map(str::to_string).collect(),
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// One result row: named fields matching the query's projection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Binding(Map<String, Value>);

impl Binding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn str_field(&self, field: &str) -> Result<&str, QueryFailure> {
        self.0
            .get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| QueryFailure::Binding(field.to_string()))
    }

    /// A list of strings. Every element must be a string.
    pub fn str_list_field(&self, field: &str) -> Result<Vec<&str>, QueryFailure> {
        let invalid = || QueryFailure::Binding(field.to_string());
        self.0
            .get(field)
            .and_then(Value::as_array)
            .ok_or_else(invalid)?
            .iter()
            .map(|v| v.as_str().ok_or_else(invalid))
            .collect()
    }

    pub fn u64_field(&self, field: &str) -> Result<u64, QueryFailure> {
        self.0
            .get(field)
            .and_then(Value::as_u64)
            .ok_or_else(|| QueryFailure::Binding(field.to_string()))
    }
}

impl From<Map<String, Value>> for Binding {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
