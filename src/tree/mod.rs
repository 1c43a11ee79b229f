//! Subtree extraction and diagram rendering.
//!
//! Two extractors bound the output around a chosen person: a
//! descendants-only walk capped by generation depth, and an all-relations
//! neighborhood capped by node and relationship counts. The renderer turns
//! a descendant tree into a directed-graph description.

mod bounded;
mod descendants;
mod render;

pub use bounded::{extract_bounded, BoundedSubgraph};
pub use descendants::{extract_descendants, DescendantTree};
pub use render::{
    render_tree, Diagram, DiagramEdge, DiagramNode, RenderOptions, DEFAULT_COLOR, DEFAULT_PALETTE,
};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Gender, Person, PersonId};

/// A person placed in an extracted tree. `generation` is relative to the
/// extraction root and only meaningful within that extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyTreeNode {
    pub person_id: PersonId,
    pub display_name: String,
    pub generation: usize,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
}

impl FamilyTreeNode {
    pub fn from_person(person: &Person, generation: usize) -> Self {
        Self {
            person_id: person.id,
            display_name: person.name.clone(),
            generation,
            birth_year: person.birth_year,
            death_year: person.death_year,
        }
    }

    /// Name plus lifespan, e.g. `"Ada (1815-1852)"`.
    pub fn label(&self) -> String {
        match (self.birth_year, self.death_year) {
            (None, None) => self.display_name.clone(),
            (Some(b), None) => format!("{} (b. {})", self.display_name, b),
            (None, Some(d)) => format!("{} (d. {})", self.display_name, d),
            (Some(b), Some(d)) => format!("{} ({}-{})", self.display_name, b, d),
        }
    }
}

/// Parent -> child edge in an extracted tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeEdge {
    pub parent: PersonId,
    pub child: PersonId,
}

/// Two people tracked as spouses.
///
/// Stored as (husband, wife) when genders say so, otherwise ordered by id.
/// [`Couple::key`] is always id-ordered so ids derived from it do not
/// depend on which partner came first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Couple {
    pub first: PersonId,
    pub second: PersonId,
}

impl Couple {
    pub fn new(a: PersonId, b: PersonId, people: &HashMap<PersonId, Person>) -> Self {
        let gender = |id: PersonId| people.get(&id).map(|p| p.gender).unwrap_or_default();
        match (gender(a), gender(b)) {
            (Gender::Male, Gender::Female) => Self { first: a, second: b },
            (Gender::Female, Gender::Male) => Self { first: b, second: a },
            _ => Self {
                first: a.min(b),
                second: a.max(b),
            },
        }
    }

    /// Id-ordered pair.
    pub fn key(&self) -> (PersonId, PersonId) {
        (self.first.min(self.second), self.first.max(self.second))
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.first == id || self.second == id
    }

    pub fn partner_of(&self, id: PersonId) -> Option<PersonId> {
        if self.first == id {
            Some(self.second)
        } else if self.second == id {
            Some(self.first)
        } else {
            None
        }
    }
}
