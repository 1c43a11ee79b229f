//! Plain value records supplied by callers: people and the typed links between them.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque person identity. Ordering is the canonical order used for couple ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u64);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PersonId {
    fn from(id: u64) -> Self {
        PersonId(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    Unknown,
}

/// Immutable snapshot of a person for the duration of one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    #[serde(default)]
    pub gender: Gender,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_year: Option<i32>,
}

impl Person {
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            gender,
            name: name.into(),
            birth_year: None,
            death_year: None,
        }
    }

    pub fn with_years(mut self, birth_year: Option<i32>, death_year: Option<i32>) -> Self {
        self.birth_year = birth_year;
        self.death_year = death_year;
        self
    }
}

/// Typed relation, always read from the perspective of the edge origin:
/// `Father` on `a -> b` means "a is the father of b", `ChildOfFather` on
/// `b -> a` means "b is a child of a, who is b's father".
///
/// The two child kinds keep [`RelationKind::reverse`] a bijection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    Father,
    Mother,
    Husband,
    Wife,
    ChildOfFather,
    ChildOfMother,
}

impl RelationKind {
    /// Kind of the same link traversed backwards.
    pub fn reverse(self) -> Self {
        match self {
            RelationKind::Father => RelationKind::ChildOfFather,
            RelationKind::Mother => RelationKind::ChildOfMother,
            RelationKind::ChildOfFather => RelationKind::Father,
            RelationKind::ChildOfMother => RelationKind::Mother,
            RelationKind::Husband => RelationKind::Wife,
            RelationKind::Wife => RelationKind::Husband,
        }
    }

    pub fn is_parent(self) -> bool {
        matches!(self, RelationKind::Father | RelationKind::Mother)
    }

    pub fn is_child(self) -> bool {
        matches!(self, RelationKind::ChildOfFather | RelationKind::ChildOfMother)
    }

    pub fn is_spouse(self) -> bool {
        matches!(self, RelationKind::Husband | RelationKind::Wife)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RelationKind::Father => "Father",
            RelationKind::Mother => "Mother",
            RelationKind::Husband => "Husband",
            RelationKind::Wife => "Wife",
            RelationKind::ChildOfFather | RelationKind::ChildOfMother => "Child",
        };
        f.write_str(name)
    }
}

fn new_link_id() -> String {
    Uuid::new_v4().to_string()
}

/// Directed typed link: `kind` is interpreted source -> target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationLink {
    /// Record identity; two links with the same id are the same record.
    #[serde(default = "new_link_id")]
    pub id: String,
    pub source: PersonId,
    pub target: PersonId,
    pub kind: RelationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl RelationLink {
    pub fn new(source: impl Into<PersonId>, target: impl Into<PersonId>, kind: RelationKind) -> Self {
        Self {
            id: new_link_id(),
            source: source.into(),
            target: target.into(),
            kind,
            order: None,
        }
    }

    /// Whether `id` is one of the two endpoints.
    pub fn touches(&self, id: PersonId) -> bool {
        self.source == id || self.target == id
    }

    /// The endpoint opposite to `id`, if `id` is an endpoint.
    pub fn other_end(&self, id: PersonId) -> Option<PersonId> {
        if self.source == id {
            Some(self.target)
        } else if self.target == id {
            Some(self.source)
        } else {
            None
        }
    }
}
