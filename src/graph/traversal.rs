//! BFS shortest-path search over the relationship graph.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::graph::{FamilyGraph, GraphEdge, RelationshipPath};
use crate::model::PersonId;

/// Unweighted shortest path from `start` to `end`.
///
/// Returns a single-node path when `start == end`, and an empty path when
/// `end` is unreachable or either id is unknown. When several shortest
/// paths exist the first one discovered wins; discovery follows the
/// insertion order of each adjacency list, which is deterministic but not
/// a genealogical preference.
pub fn shortest_path(graph: &FamilyGraph, start: PersonId, end: PersonId) -> RelationshipPath {
    if !graph.contains(start) || !graph.contains(end) {
        log::debug!("Shortest path {} -> {}: unknown endpoint", start, end);
        return RelationshipPath::empty();
    }
    if start == end {
        return RelationshipPath::single(start);
    }

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    let mut predecessor: HashMap<PersonId, GraphEdge> = HashMap::new();

    visited.insert(start);
    queue.push_back(start);

    'search: while let Some(current) = queue.pop_front() {
        for edge in graph.edges_from(current) {
            if visited.insert(edge.to) {
                predecessor.insert(edge.to, *edge);
                if edge.to == end {
                    break 'search;
                }
                queue.push_back(edge.to);
            }
        }
    }

    if !predecessor.contains_key(&end) {
        log::debug!("Shortest path {} -> {}: unreachable ({} visited)", start, end, visited.len());
        return RelationshipPath::empty();
    }

    let mut edges = Vec::new();
    let mut cursor = end;
    while cursor != start {
        let edge = predecessor[&cursor];
        edges.push(edge);
        cursor = edge.from;
    }
    edges.reverse();

    let mut nodes = Vec::with_capacity(edges.len() + 1);
    nodes.push(start);
    nodes.extend(edges.iter().map(|e| e.to));

    log::debug!("Shortest path {} -> {}: {} hop(s)", start, end, edges.len());
    RelationshipPath { nodes, edges }
}

impl FamilyGraph {
    pub fn shortest_path(&self, start: PersonId, end: PersonId) -> RelationshipPath {
        shortest_path(self, start, end)
    }
}
