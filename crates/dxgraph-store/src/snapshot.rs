//! JSON interchange format for symptom graphs.
//!
//! ```json
//! {
//!   "nodes": [ { "label": "Symptom", "name": "fever" } ],
//!   "relations": [ { "type": "INDICATES", "from": "fever", "to": "Flu" } ]
//! }
//! ```

use dxgraph_core::types::{NodeLabel, RelationType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::StoreError;

/// A node entry: label plus unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub label: NodeLabel,
    pub name: String,
}

/// A relation entry. Endpoint labels follow from the relation type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRecord {
    #[serde(rename = "type")]
    pub relation: RelationType,
    pub from: String,
    pub to: String,
}

/// A complete symptom graph in serializable form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub relations: Vec<RelationRecord>,
}

impl GraphSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, label: NodeLabel, name: impl Into<String>) -> Self {
        self.nodes.push(NodeRecord {
            label,
            name: name.into(),
        });
        self
    }

    pub fn relation(
        mut self,
        relation: RelationType,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.relations.push(RelationRecord {
            relation,
            from: from.into(),
            to: to.into(),
        });
        self
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and validate a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&content)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_json_pretty(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check name uniqueness per label and that every relation endpoint
    /// exists with the label its relation type requires.
    pub fn validate(&self) -> Result<(), StoreError> {
        let mut seen: HashSet<(NodeLabel, &str)> = HashSet::new();
        for node in &self.nodes {
            if !seen.insert((node.label, node.name.as_str())) {
                return Err(StoreError::DuplicateNode {
                    label: node.label,
                    name: node.name.clone(),
                });
            }
        }

        for rel in &self.relations {
            let (from_label, to_label) = rel.relation.endpoints();
            for (label, name) in [(from_label, &rel.from), (to_label, &rel.to)] {
                if !seen.contains(&(label, name.as_str())) {
                    return Err(StoreError::UnknownNode {
                        relation: rel.relation,
                        label,
                        name: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// A small example graph, written by `dxgraph init`.
    pub fn sample() -> Self {
        use NodeLabel::*;
        use RelationType::*;

        let mut snapshot = GraphSnapshot::new();
        for symptom in ["fever", "cough", "sneezing", "fatigue", "chills", "sweating", "headache"] {
            snapshot = snapshot.node(Symptom, symptom);
        }
        for disease in ["Flu", "Common Cold", "Anemia", "Malaria", "Migraine"] {
            snapshot = snapshot.node(Disease, disease);
        }
        for medicine in ["Paracetamol", "Ibuprofen", "Vitamin C", "Zinc", "Artemisinin", "Chloroquine", "Sumatriptan"] {
            snapshot = snapshot.node(Medicine, medicine);
        }

        let indicates = [
            ("fever", "Flu"),
            ("cough", "Flu"),
            ("cough", "Common Cold"),
            ("sneezing", "Common Cold"),
            ("fatigue", "Anemia"),
            ("fever", "Malaria"),
            ("chills", "Malaria"),
            ("sweating", "Malaria"),
            ("headache", "Migraine"),
        ];
        for (symptom, disease) in indicates {
            snapshot = snapshot.relation(Indicates, symptom, disease);
        }

        let treated_by = [
            ("Flu", "Paracetamol"),
            ("Flu", "Ibuprofen"),
            ("Common Cold", "Vitamin C"),
            ("Common Cold", "Zinc"),
            ("Malaria", "Artemisinin"),
            ("Malaria", "Chloroquine"),
            ("Migraine", "Ibuprofen"),
            ("Migraine", "Sumatriptan"),
        ];
        for (disease, medicine) in treated_by {
            snapshot = snapshot.relation(TreatedBy, disease, medicine);
        }
        snapshot
    }
}
