//! Loading people/link snapshots from files.
//!
//! The engine itself only consumes in-memory slices; this module is the
//! file-backed supplier used by the command line tools.

pub mod parsers;

pub use parsers::{DatasetParser, JsonParser, ParserRegistry, YamlParser};

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FamtreeError, Result};
use crate::graph::{build_graph, FamilyGraph};
use crate::model::{Person, PersonId, RelationLink};

/// One family's people and links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FamilyDataset {
    pub people: Vec<Person>,
    pub links: Vec<RelationLink>,
}

impl FamilyDataset {
    pub fn new(people: Vec<Person>, links: Vec<RelationLink>) -> Self {
        Self { people, links }
    }

    /// Load and validate a dataset, choosing the parser by file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        let dataset = ParserRegistry::new().parse(&content, &path.display().to_string(), &extension)?;
        dataset.validate()?;
        log::info!(
            "Loaded {} people and {} links from {}",
            dataset.people.len(),
            dataset.links.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Reject duplicate person ids; warn about links to unknown people.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for person in &self.people {
            if !ids.insert(person.id) {
                return Err(FamtreeError::InvalidInput(format!(
                    "duplicate person id {}",
                    person.id
                )));
            }
        }
        for link in &self.links {
            if !ids.contains(&link.source) || !ids.contains(&link.target) {
                log::warn!(
                    "Link {} ({} -> {}, {}) references an unknown person",
                    link.id,
                    link.source,
                    link.target,
                    link.kind
                );
            }
        }
        Ok(())
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    /// Like [`FamilyDataset::person`] but a missing id is an error.
    pub fn require(&self, id: PersonId) -> Result<&Person> {
        self.person(id).ok_or(FamtreeError::PersonNotFound(id))
    }

    pub fn graph(&self) -> FamilyGraph {
        build_graph(&self.people, &self.links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, RelationKind};
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "people": [
            {"id": 1, "name": "Grandpa", "gender": "male"},
            {"id": 2, "name": "Dad", "gender": "male"},
            {"id": 3, "name": "Kid", "gender": "female"}
        ],
        "links": [
            {"source": 1, "target": 2, "kind": "Father"},
            {"source": 2, "target": 3, "kind": "Father"}
        ]
    }"#;

    #[test]
    fn test_load_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("family.json");
        fs::write(&path, SAMPLE).unwrap();

        let dataset = FamilyDataset::load(&path).unwrap();
        assert_eq!(dataset.people.len(), 3);
        assert_eq!(dataset.links.len(), 2);
        let graph = dataset.graph();
        assert_eq!(graph.shortest_path(PersonId(1), PersonId(3)).len(), 2);
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("FAMILY.JSON");
        fs::write(&path, SAMPLE).unwrap();
        assert!(FamilyDataset::load(&path).is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = FamilyDataset::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, FamtreeError::Io(_)));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let dataset = FamilyDataset::new(
            vec![
                Person::new(1, "A", Gender::Male),
                Person::new(1, "B", Gender::Female),
            ],
            vec![],
        );
        let err = dataset.validate().unwrap_err();
        assert!(matches!(err, FamtreeError::InvalidInput(_)));
    }

    #[test]
    fn test_dangling_links_are_tolerated() {
        let dataset = FamilyDataset::new(
            vec![Person::new(1, "A", Gender::Male)],
            vec![RelationLink::new(1, 2, RelationKind::Father)],
        );
        assert!(dataset.validate().is_ok());
    }

    #[test]
    fn test_require() {
        let dataset = FamilyDataset::new(vec![Person::new(1, "A", Gender::Male)], vec![]);
        assert_eq!(dataset.require(PersonId(1)).unwrap().name, "A");
        assert!(matches!(
            dataset.require(PersonId(2)),
            Err(FamtreeError::PersonNotFound(PersonId(2)))
        ));
    }
}
