//! Descendants-only BFS from a root, bounded by generation depth.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::graph::{build_graph, FamilyGraph};
use crate::model::{Person, PersonId, RelationLink};
use crate::tree::{Couple, FamilyTreeNode, TreeEdge};

/// Nodes, parent -> child edges and couples of one descendant extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescendantTree {
    pub nodes: Vec<FamilyTreeNode>,
    pub edges: Vec<TreeEdge>,
    pub couples: Vec<Couple>,
}

impl DescendantTree {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: PersonId) -> Option<&FamilyTreeNode> {
        self.nodes.iter().find(|n| n.person_id == id)
    }

    pub fn max_generation(&self) -> Option<usize> {
        self.nodes.iter().map(|n| n.generation).max()
    }
}

/// Extract the descendants of `root` down to `max_depth` generations.
///
/// Only Father/Mother edges are followed downwards. Spouses of each visited
/// person are added at the same generation and registered as couples, but
/// are not expanded themselves. Expansion stops for any person whose
/// generation has reached `max_depth`. An unknown root yields an empty tree.
pub fn extract_descendants(
    people: &[Person],
    links: &[RelationLink],
    root: PersonId,
    max_depth: usize,
) -> DescendantTree {
    build_graph(people, links).descendants(root, max_depth)
}

impl FamilyGraph {
    pub fn descendants(&self, root: PersonId, max_depth: usize) -> DescendantTree {
        let mut tree = DescendantTree::default();
        let Some(root_person) = self.person(root) else {
            log::debug!("Descendant extraction: root {} not found", root);
            return tree;
        };

        let mut generations: HashMap<PersonId, usize> = HashMap::new();
        let mut expanded: HashSet<PersonId> = HashSet::new();
        let mut couple_keys = HashSet::new();
        let mut queue = VecDeque::new();

        generations.insert(root, 0);
        tree.nodes.push(FamilyTreeNode::from_person(root_person, 0));
        expanded.insert(root);
        queue.push_back((root, 0usize));

        while let Some((current, generation)) = queue.pop_front() {
            for edge in self.edges_from(current).iter().filter(|e| e.kind.is_spouse()) {
                let Some(spouse) = self.person(edge.to) else {
                    continue;
                };
                let couple = Couple::new(current, spouse.id, self.people());
                if couple_keys.insert(couple.key()) {
                    tree.couples.push(couple);
                }
                if !generations.contains_key(&spouse.id) {
                    generations.insert(spouse.id, generation);
                    tree.nodes.push(FamilyTreeNode::from_person(spouse, generation));
                }
            }

            if generation >= max_depth {
                continue;
            }

            let child_generation = generation + 1;
            for edge in self.edges_from(current).iter().filter(|e| e.kind.is_parent()) {
                let Some(child) = self.person(edge.to) else {
                    continue;
                };
                match generations.get(&child.id) {
                    None => {
                        generations.insert(child.id, child_generation);
                        tree.nodes.push(FamilyTreeNode::from_person(child, child_generation));
                    }
                    // Already placed as someone's spouse at the right generation.
                    Some(&g) if g == child_generation => {}
                    Some(_) => continue,
                }
                if expanded.insert(child.id) {
                    queue.push_back((child.id, child_generation));
                }
            }
        }

        let mut seen_edges = HashSet::new();
        for node in &tree.nodes {
            for edge in self.edges_from(node.person_id).iter().filter(|e| e.kind.is_parent()) {
                if generations.get(&edge.to) == Some(&(node.generation + 1)) {
                    let tree_edge = TreeEdge {
                        parent: node.person_id,
                        child: edge.to,
                    };
                    if seen_edges.insert(tree_edge) {
                        tree.edges.push(tree_edge);
                    }
                }
            }
        }

        log::debug!(
            "Descendant extraction from {} (max depth {}): {} nodes, {} edges, {} couples",
            root,
            max_depth,
            tree.nodes.len(),
            tree.edges.len(),
            tree.couples.len()
        );
        tree
    }
}
