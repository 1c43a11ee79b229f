//! Graph construction from caller-supplied people and links.

use crate::graph::{FamilyGraph, GraphEdge};
use crate::model::{Person, RelationLink};

/// Build the bidirectional adjacency graph.
///
/// Each link contributes its forward edge and the reverse edge. Links whose
/// endpoints are missing from `people` are still added; the graph does not
/// require referential closure.
pub fn build_graph(people: &[Person], links: &[RelationLink]) -> FamilyGraph {
    let mut graph = FamilyGraph::default();

    for person in people {
        graph.people.insert(person.id, person.clone());
    }

    let mut dangling = 0usize;
    for link in links {
        if !graph.people.contains_key(&link.source) || !graph.people.contains_key(&link.target) {
            dangling += 1;
        }
        let forward = GraphEdge::new(link.source, link.target, link.kind);
        graph.add_edge(forward);
        graph.add_edge(forward.reversed());
    }

    if dangling > 0 {
        log::debug!("Graph built with {} link(s) referencing unknown people", dangling);
    }
    log::debug!(
        "Graph built: {} people, {} links, {} directed edges",
        graph.people.len(),
        links.len(),
        graph.edge_count()
    );

    graph
}

impl FamilyGraph {
    pub fn build(people: &[Person], links: &[RelationLink]) -> Self {
        build_graph(people, links)
    }
}
