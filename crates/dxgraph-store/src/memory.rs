//! In-memory graph store backed by petgraph.
//!
//! The graph is built once from a [`GraphSnapshot`] and never mutated
//! afterwards, so a single store can serve any number of concurrent
//! lookups without locking.

use dxgraph_core::error::QueryFailure;
use dxgraph_core::query::{fields, Binding, PatternQuery, QueryParams};
use dxgraph_core::store::GraphStore;
use dxgraph_core::types::{NodeLabel, RelationType};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::snapshot::GraphSnapshot;

/// A labelled node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub label: NodeLabel,
    pub name: String,
}

/// Petgraph-backed, read-only symptom graph.
#[derive(Debug, Clone)]
pub struct MemoryGraphStore {
    graph: DiGraph<GraphNode, RelationType>,
    /// Map from (label, name) to petgraph's internal index.
    index: HashMap<(NodeLabel, String), NodeIndex>,
}

impl MemoryGraphStore {
    /// Build a store from a snapshot, validating it on the way.
    ///
    /// Repeated relations are kept as parallel edges.
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Result<Self, StoreError> {
        let mut graph = DiGraph::with_capacity(snapshot.nodes.len(), snapshot.relations.len());
        let mut index = HashMap::with_capacity(snapshot.nodes.len());

        for node in &snapshot.nodes {
            let key = (node.label, node.name.clone());
            if index.contains_key(&key) {
                return Err(StoreError::DuplicateNode {
                    label: node.label,
                    name: node.name.clone(),
                });
            }
            let idx = graph.add_node(GraphNode {
                label: node.label,
                name: node.name.clone(),
            });
            index.insert(key, idx);
        }

        for rel in &snapshot.relations {
            let (from_label, to_label) = rel.relation.endpoints();
            let lookup = |label: NodeLabel, name: &String| {
                index
                    .get(&(label, name.clone()))
                    .copied()
                    .ok_or_else(|| StoreError::UnknownNode {
                        relation: rel.relation,
                        label,
                        name: name.clone(),
                    })
            };
            let from = lookup(from_label, &rel.from)?;
            let to = lookup(to_label, &rel.to)?;
            graph.add_edge(from, to, rel.relation);
        }

        Ok(Self { graph, index })
    }

    /// Load a snapshot file and build a store from it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let store = Self::from_snapshot(&GraphSnapshot::load(path)?)?;
        info!(
            path = %path.display(),
            nodes = store.node_count(),
            relations = store.relation_count(),
            "loaded graph snapshot"
        );
        Ok(store)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn relation_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn find(&self, label: NodeLabel, name: &str) -> Option<NodeIndex> {
        self.index.get(&(label, name.to_string())).copied()
    }

    /// Names across `relation` edges in `direction`. Parallel edges yield
    /// repeated names.
    fn related(&self, node: NodeIndex, direction: Direction, relation: RelationType) -> Vec<String> {
        self.graph
            .edges_directed(node, direction)
            .filter(|edge| *edge.weight() == relation)
            .map(|edge| {
                let other = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                self.graph[other].name.clone()
            })
            .collect()
    }

    fn disease_rows(&self, params: &QueryParams) -> Vec<Binding> {
        // Candidates: every disease one hop from a queried symptom, by name.
        let mut candidates: BTreeMap<&str, NodeIndex> = BTreeMap::new();
        for symptom in &params.symptoms {
            let Some(idx) = self.find(NodeLabel::Symptom, symptom) else {
                continue;
            };
            for edge in self.graph.edges_directed(idx, Direction::Outgoing) {
                if *edge.weight() == RelationType::Indicates {
                    let disease = edge.target();
                    candidates.insert(self.graph[disease].name.as_str(), disease);
                }
            }
        }

        candidates
            .into_iter()
            .map(|(name, disease)| {
                Binding::new()
                    .with(fields::DISEASE, name)
                    .with(
                        fields::SYMPTOMS,
                        self.related(disease, Direction::Incoming, RelationType::Indicates),
                    )
                    .with(
                        fields::MEDICINES,
                        self.related(disease, Direction::Outgoing, RelationType::TreatedBy),
                    )
            })
            .collect()
    }

    fn symptom_rows(&self) -> Vec<Binding> {
        let mut names: Vec<&str> = self
            .graph
            .node_weights()
            .filter(|node| node.label == NodeLabel::Symptom)
            .map(|node| node.name.as_str())
            .collect();
        names.sort_unstable();
        names
            .into_iter()
            .map(|name| Binding::new().with(fields::SYMPTOM, name))
            .collect()
    }

    fn count_rows(&self) -> Vec<Binding> {
        let mut rows = Vec::new();
        for label in NodeLabel::ALL {
            let count = self.graph.node_weights().filter(|n| n.label == label).count();
            rows.push(
                Binding::new()
                    .with(fields::LABEL, label.as_str())
                    .with(fields::COUNT, count as u64),
            );
        }
        for relation in RelationType::ALL {
            let count = self.graph.edge_weights().filter(|r| **r == relation).count();
            rows.push(
                Binding::new()
                    .with(fields::LABEL, relation.as_str())
                    .with(fields::COUNT, count as u64),
            );
        }
        rows
    }
}

impl GraphStore for MemoryGraphStore {
    fn execute(&self, query: &PatternQuery, params: &QueryParams)
        -> Result<Vec<Binding>, QueryFailure> {
        let rows = match query {
            // The engine applies the policy; every candidate is returned.
            PatternQuery::DiseasesBySymptoms { .. } => self.disease_rows(params),
            PatternQuery::SymptomNames => self.symptom_rows(),
            PatternQuery::Counts => self.count_rows(),
        };
        debug!(?query, rows = rows.len(), "memory store executed query");
        Ok(rows)
    }
}
