//! Shared types used across the engine, the stores and the CLI.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::LookupError;

/// The label of a node in the knowledge graph.
///
/// Names are unique within a label and are the node's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeLabel {
    Symptom,
    Disease,
    Medicine,
}

impl NodeLabel {
    pub const ALL: [NodeLabel; 3] = [NodeLabel::Symptom, NodeLabel::Disease, NodeLabel::Medicine];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeLabel::Symptom => "Symptom",
            NodeLabel::Disease => "Disease",
            NodeLabel::Medicine => "Medicine",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.as_str() == s)
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed, directed relation between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    /// Symptom → Disease: the symptom is diagnostic for the disease.
    Indicates,
    /// Disease → Medicine: the medicine treats the disease.
    TreatedBy,
}

impl RelationType {
    pub const ALL: [RelationType; 2] = [RelationType::Indicates, RelationType::TreatedBy];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::Indicates => "INDICATES",
            RelationType::TreatedBy => "TREATED_BY",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rel| rel.as_str() == s)
    }

    /// The (source, target) labels this relation connects.
    pub fn endpoints(&self) -> (NodeLabel, NodeLabel) {
        match self {
            RelationType::Indicates => (NodeLabel::Symptom, NodeLabel::Disease),
            RelationType::TreatedBy => (NodeLabel::Disease, NodeLabel::Medicine),
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-empty, unordered set of symptom names.
///
/// Duplicates collapse and order is irrelevant. Names are compared exactly
/// (case-sensitive, no trimming beyond what the normalizer already did).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymptomSet(BTreeSet<String>);

impl SymptomSet {
    /// Build a set from names. Fails with [`LookupError::EmptyInput`] when
    /// no names are given.
    pub fn new<I, S>(names: I) -> Result<Self, LookupError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if set.is_empty() {
            return Err(LookupError::EmptyInput);
        }
        Ok(Self(set))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no symptoms.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Names in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_set(&self) -> &BTreeSet<String> {
        &self.0
    }

    /// True if at least one name is shared with `other`.
    pub fn intersects(&self, other: &BTreeSet<String>) -> bool {
        // Walk the smaller side.
        if self.0.len() <= other.len() {
            self.0.iter().any(|name| other.contains(name))
        } else {
            other.iter().any(|name| self.0.contains(name))
        }
    }

    /// Unordered set equality: same cardinality and mutual containment.
    pub fn set_equals(&self, other: &BTreeSet<String>) -> bool {
        self.0.len() == other.len()
            && self.0.iter().all(|name| other.contains(name))
            && other.iter().all(|name| self.0.contains(name))
    }
}

impl fmt::Display for SymptomSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().collect();
        f.write_str(&names.join(", "))
    }
}

/// One qualifying disease and the distinct medicines that treat it.
///
/// `medicines` is sorted lexically and never contains duplicates. It is
/// empty for a disease without `TREATED_BY` edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseMatch {
    pub disease: String,
    pub medicines: Vec<String>,
}

impl DiseaseMatch {
    pub fn new<I, S>(disease: impl Into<String>, medicines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let medicines: BTreeSet<String> = medicines.into_iter().map(Into::into).collect();
        Self {
            disease: disease.into(),
            medicines: medicines.into_iter().collect(),
        }
    }

    pub fn has_medicines(&self) -> bool {
        !self.medicines.is_empty()
    }
}

/// The result of looking up a raw symptom string.
///
/// Callers render the three cases differently: "please enter a symptom",
/// "nothing matched" and the list of matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "matches", rename_all = "snake_case")]
pub enum LookupOutcome {
    /// The input normalized to nothing; the store was not queried.
    NoInput,
    /// The query ran and no disease qualified.
    NoMatch,
    /// One record per qualifying disease, sorted by disease name.
    Matches(Vec<DiseaseMatch>),
}

impl LookupOutcome {
    pub(crate) fn from_matches(matches: Vec<DiseaseMatch>) -> Self {
        if matches.is_empty() {
            LookupOutcome::NoMatch
        } else {
            LookupOutcome::Matches(matches)
        }
    }

    /// The matches, empty for `NoInput` and `NoMatch`.
    pub fn matches(&self) -> &[DiseaseMatch] {
        match self {
            LookupOutcome::Matches(matches) => matches,
            _ => &[],
        }
    }

    pub fn into_matches(self) -> Vec<DiseaseMatch> {
        match self {
            LookupOutcome::Matches(matches) => matches,
            _ => Vec::new(),
        }
    }

    pub fn is_no_input(&self) -> bool {
        matches!(self, LookupOutcome::NoInput)
    }
}

/// Node and relation counts reported by a store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphCounts {
    pub symptoms: u64,
    pub diseases: u64,
    pub medicines: u64,
    pub indicates: u64,
    pub treated_by: u64,
}

impl GraphCounts {
    pub fn nodes(&self) -> u64 {
        self.symptoms + self.diseases + self.medicines
    }

    pub fn relations(&self) -> u64 {
        self.indicates + self.treated_by
    }

    pub(crate) fn record(&mut self, label: &str, count: u64) -> bool {
        let slot = if let Some(node) = NodeLabel::parse(label) {
            match node {
                NodeLabel::Symptom => &mut self.symptoms,
                NodeLabel::Disease => &mut self.diseases,
                NodeLabel::Medicine => &mut self.medicines,
            }
        } else if let Some(rel) = RelationType::parse(label) {
            match rel {
                RelationType::Indicates => &mut self.indicates,
                RelationType::TreatedBy => &mut self.treated_by,
            }
        } else {
            return false;
        };
        *slot += count;
        true
    }
}
