//! Kinship inference: turn a relationship path into a human-readable term.
//!
//! Rules are an ordered table of explicit step patterns and gender gates.
//! The first matching rule wins; a path nothing recognizes yields
//! [`UNKNOWN_TERM`].

mod rules;

pub use rules::BUILTIN_RULES;

use std::collections::HashMap;

use crate::graph::RelationshipPath;
use crate::model::{Gender, Person, PersonId, RelationKind};

/// Returned when no rule matches, or the path has fewer than two nodes.
pub const UNKNOWN_TERM: &str = "unknown";

/// One position in a rule's edge-kind pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Exactly this kind.
    Is(RelationKind),
    /// Father or Mother.
    Parent,
    /// Either child kind.
    Child,
    /// Husband or Wife.
    Spouse,
}

impl Step {
    pub fn matches(self, kind: RelationKind) -> bool {
        match self {
            Step::Is(expected) => expected == kind,
            Step::Parent => kind.is_parent(),
            Step::Child => kind.is_child(),
            Step::Spouse => kind.is_spouse(),
        }
    }
}

/// Which path node a gate inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    Start,
    End,
    /// Node index along the path, 0 being the start.
    At(usize),
}

/// Requires the referenced node to have a specific gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    pub node: NodeRef,
    pub gender: Gender,
}

impl Gate {
    pub const fn new(node: NodeRef, gender: Gender) -> Self {
        Self { node, gender }
    }

    fn holds(&self, path: &RelationshipPath, people: &HashMap<PersonId, Person>) -> bool {
        let id = match self.node {
            NodeRef::Start => path.start(),
            NodeRef::End => path.end(),
            NodeRef::At(index) => path.nodes.get(index).copied(),
        };
        let gender = id
            .and_then(|id| people.get(&id))
            .map(|p| p.gender)
            .unwrap_or_default();
        gender == self.gender
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KinshipRule {
    pub steps: &'static [Step],
    pub gates: &'static [Gate],
    pub term: &'static str,
}

impl KinshipRule {
    pub fn matches(&self, path: &RelationshipPath, people: &HashMap<PersonId, Person>) -> bool {
        self.steps.len() == path.edges.len()
            && self
                .steps
                .iter()
                .zip(&path.edges)
                .all(|(step, edge)| step.matches(edge.kind))
            && self.gates.iter().all(|gate| gate.holds(path, people))
    }
}

/// Ordered rule table plus optional display overrides for terms.
#[derive(Debug, Clone)]
pub struct KinshipRuleEngine {
    rules: Vec<KinshipRule>,
    term_overrides: HashMap<String, String>,
}

impl Default for KinshipRuleEngine {
    fn default() -> Self {
        Self::new(BUILTIN_RULES.to_vec())
    }
}

impl KinshipRuleEngine {
    pub fn new(rules: Vec<KinshipRule>) -> Self {
        Self {
            rules,
            term_overrides: HashMap::new(),
        }
    }

    /// Replace canonical terms on output, e.g. to relabel "first cousin".
    pub fn with_term_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.term_overrides = overrides;
        self
    }

    pub fn rules(&self) -> &[KinshipRule] {
        &self.rules
    }

    /// First rule matching the path, in table order.
    pub fn matching_rule(
        &self,
        path: &RelationshipPath,
        people: &HashMap<PersonId, Person>,
    ) -> Option<&KinshipRule> {
        if path.nodes.len() < 2 {
            return None;
        }
        self.rules.iter().find(|rule| rule.matches(path, people))
    }

    /// Kinship term describing the start of `path` relative to its end.
    pub fn infer(&self, path: &RelationshipPath, people: &HashMap<PersonId, Person>) -> String {
        let term = match self.matching_rule(path, people) {
            Some(rule) => rule.term,
            None => {
                if path.len() > 0 {
                    log::debug!(
                        "No kinship rule for {}-hop path {:?}",
                        path.len(),
                        path.kinds()
                    );
                }
                UNKNOWN_TERM
            }
        };
        self.term_overrides
            .get(term)
            .cloned()
            .unwrap_or_else(|| term.to_string())
    }
}

/// Infer with the built-in rule table.
pub fn infer_kinship(path: &RelationshipPath, people: &HashMap<PersonId, Person>) -> String {
    KinshipRuleEngine::default().infer(path, people)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_graph, shortest_path, FamilyGraph, GraphEdge};
    use crate::model::RelationLink;

    fn p(id: u64, gender: Gender) -> Person {
        Person::new(id, format!("P{}", id), gender)
    }

    fn path_of(kinds: &[RelationKind]) -> RelationshipPath {
        let nodes: Vec<PersonId> = (0..=kinds.len() as u64).map(PersonId).collect();
        let edges = kinds
            .iter()
            .enumerate()
            .map(|(i, &k)| GraphEdge::new(nodes[i], nodes[i + 1], k))
            .collect();
        RelationshipPath { nodes, edges }
    }

    fn relate(graph: &FamilyGraph, from: u64, to: u64) -> String {
        let path = shortest_path(graph, PersonId(from), PersonId(to));
        infer_kinship(&path, graph.people())
    }

    /// Three generations:
    /// 1 (m) + 2 (f) -> 3 (m), 4 (f)
    /// 3 + 5 (f, wife) -> 6 (m)
    /// 4 + 7 (m, husband) -> 8 (f)
    /// 9 (m) unrelated
    fn family() -> FamilyGraph {
        let people = vec![
            p(1, Gender::Male),
            p(2, Gender::Female),
            p(3, Gender::Male),
            p(4, Gender::Female),
            p(5, Gender::Female),
            p(6, Gender::Male),
            p(7, Gender::Male),
            p(8, Gender::Female),
            p(9, Gender::Male),
        ];
        let links = vec![
            RelationLink::new(1, 2, RelationKind::Husband),
            RelationLink::new(1, 3, RelationKind::Father),
            RelationLink::new(2, 3, RelationKind::Mother),
            RelationLink::new(1, 4, RelationKind::Father),
            RelationLink::new(2, 4, RelationKind::Mother),
            RelationLink::new(5, 3, RelationKind::Wife),
            RelationLink::new(3, 6, RelationKind::Father),
            RelationLink::new(5, 6, RelationKind::Mother),
            RelationLink::new(7, 4, RelationKind::Husband),
            RelationLink::new(7, 8, RelationKind::Father),
            RelationLink::new(4, 8, RelationKind::Mother),
        ];
        build_graph(&people, &links)
    }

    #[test]
    fn test_empty_and_single_node_paths_are_unknown() {
        let people = HashMap::new();
        assert_eq!(infer_kinship(&RelationshipPath::empty(), &people), UNKNOWN_TERM);
        assert_eq!(
            infer_kinship(&RelationshipPath::single(PersonId(1)), &people),
            UNKNOWN_TERM
        );
    }

    #[test]
    fn test_direct_parent_terms() {
        let people = HashMap::new();
        assert_eq!(infer_kinship(&path_of(&[RelationKind::Father]), &people), "father");
        assert_eq!(infer_kinship(&path_of(&[RelationKind::Mother]), &people), "mother");
    }

    #[test]
    fn test_father_and_child_scenario() {
        let people = vec![p(1, Gender::Male), p(2, Gender::Unknown)];
        let graph = build_graph(&people, &[RelationLink::new(1, 2, RelationKind::Father)]);
        assert_eq!(relate(&graph, 1, 2), "father");
        assert_eq!(relate(&graph, 2, 1), "child");
    }

    #[test]
    fn test_child_term_uses_start_gender() {
        let graph = family();
        assert_eq!(relate(&graph, 3, 1), "son");
        assert_eq!(relate(&graph, 4, 2), "daughter");
    }

    #[test]
    fn test_three_generation_grandparents() {
        let people = vec![p(1, Gender::Male), p(2, Gender::Male), p(3, Gender::Male)];
        let links = vec![
            RelationLink::new(1, 2, RelationKind::Father),
            RelationLink::new(2, 3, RelationKind::Father),
        ];
        let graph = build_graph(&people, &links);
        let path = shortest_path(&graph, PersonId(1), PersonId(3));
        assert_eq!(path.len(), 2);
        assert_eq!(infer_kinship(&path, graph.people()), "paternal grandfather");
        assert_eq!(relate(&graph, 3, 1), "paternal grandson");
    }

    #[test]
    fn test_grandparent_sides() {
        let graph = family();
        assert_eq!(relate(&graph, 1, 6), "paternal grandfather");
        assert_eq!(relate(&graph, 1, 8), "maternal grandfather");
        assert_eq!(relate(&graph, 8, 1), "maternal granddaughter");
    }

    #[test]
    fn test_sibling_via_shared_father() {
        let people = HashMap::new();
        let path = path_of(&[RelationKind::ChildOfFather, RelationKind::Father]);
        assert_eq!(infer_kinship(&path, &people), "sibling (shared father)");

        let graph = family();
        assert_eq!(relate(&graph, 3, 4), "sibling (shared father)");
    }

    #[test]
    fn test_unmatched_combination_is_unknown() {
        let people = HashMap::new();
        let path = path_of(&[RelationKind::Father, RelationKind::Wife, RelationKind::Husband]);
        assert_eq!(infer_kinship(&path, &people), UNKNOWN_TERM);
    }

    #[test]
    fn test_unrelated_people_are_unknown() {
        let graph = family();
        let path = shortest_path(&graph, PersonId(6), PersonId(9));
        assert!(path.is_empty());
        assert_eq!(infer_kinship(&path, graph.people()), UNKNOWN_TERM);
    }

    #[test]
    fn test_aunt_uncle_and_niece_nephew() {
        let graph = family();
        // 4 is 6's father's sister
        assert_eq!(relate(&graph, 4, 6), "paternal-side aunt");
        assert_eq!(relate(&graph, 3, 8), "maternal-side uncle");
        assert_eq!(relate(&graph, 6, 4), "nephew");
        assert_eq!(relate(&graph, 8, 3), "niece");
    }

    #[test]
    fn test_first_cousins_sided_by_parent_gender() {
        let graph = family();
        assert_eq!(relate(&graph, 6, 8), "first cousin on father's side");
        assert_eq!(relate(&graph, 8, 6), "first cousin on mother's side");
    }

    #[test]
    fn test_cousin_without_parent_gender_falls_back() {
        let people = HashMap::new();
        let path = path_of(&[
            RelationKind::ChildOfFather,
            RelationKind::ChildOfFather,
            RelationKind::Father,
            RelationKind::Mother,
        ]);
        assert_eq!(infer_kinship(&path, &people), "first cousin");
    }

    #[test]
    fn test_spouse_and_in_laws() {
        let graph = family();
        assert_eq!(relate(&graph, 1, 2), "husband");
        assert_eq!(relate(&graph, 5, 3), "wife");
        assert_eq!(relate(&graph, 5, 1), "daughter-in-law");
        assert_eq!(relate(&graph, 2, 5), "mother-in-law");
        assert_eq!(relate(&graph, 7, 3), "brother-in-law");
        assert_eq!(relate(&graph, 3, 7), "brother-in-law");
    }

    #[test]
    fn test_first_match_wins() {
        let people: HashMap<PersonId, Person> = [(PersonId(0), p(0, Gender::Male))].into_iter().collect();
        let rules = vec![
            KinshipRule {
                steps: &[Step::Child],
                gates: &[],
                term: "offspring",
            },
            KinshipRule {
                steps: &[Step::Child],
                gates: &[Gate {
                    node: NodeRef::Start,
                    gender: Gender::Male,
                }],
                term: "son",
            },
        ];
        let engine = KinshipRuleEngine::new(rules);
        let path = path_of(&[RelationKind::ChildOfMother]);
        assert_eq!(engine.infer(&path, &people), "offspring");
    }

    #[test]
    fn test_intermediate_gate() {
        let people: HashMap<PersonId, Person> = [(PersonId(1), p(1, Gender::Female))].into_iter().collect();
        let rules = vec![KinshipRule {
            steps: &[Step::Child, Step::Child],
            gates: &[Gate {
                node: NodeRef::At(1),
                gender: Gender::Female,
            }],
            term: "via mother",
        }];
        let engine = KinshipRuleEngine::new(rules);
        let path = path_of(&[RelationKind::ChildOfMother, RelationKind::ChildOfFather]);
        assert_eq!(engine.infer(&path, &people), "via mother");
        assert_eq!(engine.infer(&path, &HashMap::new()), UNKNOWN_TERM);
    }

    #[test]
    fn test_term_overrides() {
        let overrides: HashMap<String, String> =
            [("father".to_string(), "père".to_string())].into_iter().collect();
        let engine = KinshipRuleEngine::default().with_term_overrides(overrides);
        let people = HashMap::new();
        assert_eq!(engine.infer(&path_of(&[RelationKind::Father]), &people), "père");
        assert_eq!(engine.infer(&path_of(&[RelationKind::Mother]), &people), "mother");
    }

    #[test]
    fn test_every_builtin_rule_is_reachable() {
        // A gated row must not be shadowed by an earlier ungated row with the same steps.
        for (i, rule) in BUILTIN_RULES.iter().enumerate() {
            for earlier in &BUILTIN_RULES[..i] {
                if earlier.steps == rule.steps {
                    assert!(
                        !earlier.gates.is_empty(),
                        "rule {:?} shadowed by {:?}",
                        rule.term,
                        earlier.term
                    );
                }
            }
        }
    }
}
