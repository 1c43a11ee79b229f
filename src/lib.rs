pub mod config;
pub mod dataset;
pub mod error;
pub mod eval;
pub mod graph;
pub mod kinship;
pub mod model;
pub mod tree;

pub use config::Config;
pub use dataset::FamilyDataset;
pub use error::{FamtreeError, Result};
pub use graph::{build_graph, shortest_path, FamilyGraph, RelationshipPath};
pub use kinship::{infer_kinship, KinshipRuleEngine};
pub use model::{Gender, Person, PersonId, RelationKind, RelationLink};
pub use tree::{extract_bounded, extract_descendants, render_tree};
