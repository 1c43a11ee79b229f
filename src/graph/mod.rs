//! Relationship graph module: bidirectional adjacency and BFS shortest paths.
//!
//! Every caller link becomes two edges, the forward one and its reverse,
//! so traversal can follow a relation in either direction while keeping
//! the kind expressed from the perspective of the edge origin.

mod builder;
mod traversal;

pub use builder::build_graph;
pub use traversal::shortest_path;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Person, PersonId, RelationKind};

/// A directed edge; `kind` describes `from` relative to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: PersonId,
    pub to: PersonId,
    pub kind: RelationKind,
}

impl GraphEdge {
    pub fn new(from: PersonId, to: PersonId, kind: RelationKind) -> Self {
        Self { from, to, kind }
    }

    /// The same relation traversed from the other end.
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            kind: self.kind.reverse(),
        }
    }
}

/// People arena plus adjacency lists keyed by the same id.
///
/// Outgoing edge lists keep link insertion order, which makes BFS
/// deterministic. That order carries no genealogical meaning.
#[derive(Debug, Clone, Default)]
pub struct FamilyGraph {
    people: HashMap<PersonId, Person>,
    adjacency: HashMap<PersonId, Vec<GraphEdge>>,
}

impl FamilyGraph {
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.get(&id)
    }

    pub fn people(&self) -> &HashMap<PersonId, Person> {
        &self.people
    }

    /// Outgoing edges of `id` (forward and synthesized reverse alike).
    pub fn edges_from(&self, id: PersonId) -> &[GraphEdge] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Known either as a person record or as a link endpoint.
    pub fn contains(&self, id: PersonId) -> bool {
        self.people.contains_key(&id) || self.adjacency.contains_key(&id)
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    fn add_edge(&mut self, edge: GraphEdge) {
        self.adjacency.entry(edge.from).or_default().push(edge);
    }
}

/// Ordered person ids plus the edges joining consecutive ids.
///
/// `edges[i]` always connects `nodes[i]` to `nodes[i + 1]`. An empty path
/// means no relationship was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipPath {
    pub nodes: Vec<PersonId>,
    pub edges: Vec<GraphEdge>,
}

impl RelationshipPath {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(id: PersonId) -> Self {
        Self {
            nodes: vec![id],
            edges: Vec::new(),
        }
    }

    /// No relationship found.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of hops.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn start(&self) -> Option<PersonId> {
        self.nodes.first().copied()
    }

    pub fn end(&self) -> Option<PersonId> {
        self.nodes.last().copied()
    }

    pub fn kinds(&self) -> Vec<RelationKind> {
        self.edges.iter().map(|e| e.kind).collect()
    }
}
