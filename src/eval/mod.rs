//! Evaluation framework: expected kinship answers checked against the engine.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dataset::FamilyDataset;
use crate::error::Result;
use crate::kinship::KinshipRuleEngine;
use crate::model::PersonId;

/// One expected answer: `from` is `to`'s `expected`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinshipCase {
    pub from: PersonId,
    pub to: PersonId,
    pub expected: String,
    /// Optional grouping for per-category counts (e.g. cousins, in-laws).
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseMismatch {
    pub from: PersonId,
    pub to: PersonId,
    pub expected: String,
    pub actual: String,
    pub hops: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryStats {
    pub total: usize,
    pub correct: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvalReport {
    pub total: usize,
    pub correct: usize,
    pub mismatches: Vec<CaseMismatch>,
    /// Counts for cases that carry a category, keyed by category name.
    pub by_category: BTreeMap<String, CategoryStats>,
}

impl EvalReport {
    /// Share of cases answered as expected. Zero cases count as 0.0.
    pub fn accuracy(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f32 / self.total as f32
    }
}

/// Load a JSON array of cases.
pub fn load_cases(path: &Path) -> Result<Vec<KinshipCase>> {
    let content = std::fs::read_to_string(path)?;
    let cases = serde_json::from_str(&content)?;
    Ok(cases)
}

/// Run path finding and inference for every case.
pub fn evaluate(dataset: &FamilyDataset, cases: &[KinshipCase], engine: &KinshipRuleEngine) -> EvalReport {
    let graph = dataset.graph();
    let mut report = EvalReport {
        total: cases.len(),
        ..EvalReport::default()
    };

    for case in cases {
        let path = graph.shortest_path(case.from, case.to);
        let actual = engine.infer(&path, graph.people());
        let hit = actual == case.expected;
        if let Some(category) = &case.category {
            let stats = report.by_category.entry(category.clone()).or_default();
            stats.total += 1;
            if hit {
                stats.correct += 1;
            }
        }
        if hit {
            report.correct += 1;
        } else {
            log::debug!(
                "Mismatch {} -> {}: expected {:?}, got {:?} via {:?}",
                case.from,
                case.to,
                case.expected,
                actual,
                path.kinds()
            );
            report.mismatches.push(CaseMismatch {
                from: case.from,
                to: case.to,
                expected: case.expected.clone(),
                actual,
                hops: path.len(),
            });
        }
    }

    report
}
