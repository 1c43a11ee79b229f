//! Count-bounded neighborhood extraction over every relation kind.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::model::{Person, PersonId, RelationLink};

/// People and links around a focus person, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundedSubgraph {
    pub people: Vec<Person>,
    pub links: Vec<RelationLink>,
}

impl BoundedSubgraph {
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.people.iter().any(|p| p.id == id)
    }
}

/// BFS from `focus` over links of any kind, direction ignored.
///
/// A neighbor is taken only if neither the node budget nor the
/// relationship budget would be exceeded; otherwise it is skipped and the
/// walk continues with the next candidate. Links are counted once per
/// record id. Links with an endpoint missing from `people` are ignored.
/// An unknown focus, or a zero node budget, yields an empty result.
pub fn extract_bounded(
    people: &[Person],
    links: &[RelationLink],
    focus: PersonId,
    max_nodes: usize,
    max_relationships: usize,
) -> BoundedSubgraph {
    let index: HashMap<PersonId, &Person> = people.iter().map(|p| (p.id, p)).collect();
    let Some(&focus_person) = index.get(&focus) else {
        log::debug!("Bounded extraction: focus {} not found", focus);
        return BoundedSubgraph::default();
    };
    if max_nodes == 0 {
        return BoundedSubgraph::default();
    }

    let mut adjacency: HashMap<PersonId, Vec<&RelationLink>> = HashMap::new();
    let mut dangling = 0usize;
    for link in links {
        if !index.contains_key(&link.source) || !index.contains_key(&link.target) {
            dangling += 1;
            continue;
        }
        adjacency.entry(link.source).or_default().push(link);
        if link.target != link.source {
            adjacency.entry(link.target).or_default().push(link);
        }
    }
    if dangling > 0 {
        log::warn!("Bounded extraction ignored {} link(s) with unknown endpoints", dangling);
    }

    let mut result = BoundedSubgraph::default();
    let mut included: HashSet<PersonId> = HashSet::new();
    let mut taken: HashSet<&str> = HashSet::new();
    let mut skipped = 0usize;
    let mut queue = VecDeque::new();

    included.insert(focus);
    result.people.push(focus_person.clone());
    queue.push_back(focus);

    while let Some(current) = queue.pop_front() {
        let Some(candidates) = adjacency.get(&current) else {
            continue;
        };
        for &link in candidates {
            if taken.contains(link.id.as_str()) {
                continue;
            }
            let Some(neighbor) = link.other_end(current) else {
                continue;
            };
            let is_new = !included.contains(&neighbor);
            if (is_new && included.len() >= max_nodes) || taken.len() >= max_relationships {
                skipped += 1;
                continue;
            }

            taken.insert(link.id.as_str());
            result.links.push(link.clone());
            if is_new {
                included.insert(neighbor);
                result.people.push(index[&neighbor].clone());
                queue.push_back(neighbor);
            }
        }
    }

    log::debug!(
        "Bounded extraction around {}: {} people, {} links, {} candidate(s) skipped",
        focus,
        result.people.len(),
        result.links.len(),
        skipped
    );
    result
}
