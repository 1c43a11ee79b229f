//! Directed-graph diagram generation for descendant trees.
//!
//! Spouse pairs collapse into one visual node, and a child of that couple
//! gets a single edge from it. Siblings under the same visual parent share
//! a rank. Output is DOT text.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::PersonId;
use crate::tree::{Couple, DescendantTree, FamilyTreeNode, TreeEdge};

/// Colors for generation bands 0, 1, 2, ...
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#FFE4B5", "#E0FFFF", "#E6E6FA", "#F0FFF0", "#FFF0F5", "#F5F5DC",
];
pub const DEFAULT_COLOR: &str = "#D3D3D3";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub palette: Vec<String>,
    pub default_color: String,
    pub rankdir: String,
    pub graph_name: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            default_color: DEFAULT_COLOR.to_string(),
            rankdir: "TB".to_string(),
            graph_name: "FamilyTree".to_string(),
        }
    }
}

impl RenderOptions {
    /// Fill color for a generation band; past the palette the default applies.
    pub fn color_for(&self, generation: usize) -> &str {
        self.palette
            .get(generation)
            .map(String::as_str)
            .unwrap_or(&self.default_color)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramNode {
    pub id: String,
    pub label: String,
    pub generation: usize,
    pub color: String,
    /// One person, or both partners of a merged couple.
    pub members: Vec<PersonId>,
    /// Per-member labels, parallel to `members`.
    pub member_labels: Vec<String>,
}

impl DiagramNode {
    pub fn is_couple(&self) -> bool {
        self.members.len() > 1
    }
}

/// Parent -> child edge. `port` names the partner inside a couple node
/// when the edge belongs to that partner alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiagramEdge {
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagram {
    pub name: String,
    pub rankdir: String,
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
    /// Children of one visual parent, laid out on the same rank.
    pub sibling_groups: Vec<Vec<String>>,
}

impl Diagram {
    pub fn node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn to_dot(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph {} {{", quote(&self.name))?;
        writeln!(f, "    rankdir={};", self.rankdir)?;
        writeln!(
            f,
            "    node [shape=box, style=\"rounded,filled\", fontname=\"Helvetica\"];"
        )?;
        for node in &self.nodes {
            if node.is_couple() {
                // Record fields give each partner a port for single-parent edges.
                let fields: Vec<String> = node
                    .members
                    .iter()
                    .zip(&node.member_labels)
                    .map(|(id, label)| format!("<{}> {}", port_name(*id), record_field(label)))
                    .collect();
                writeln!(
                    f,
                    "    {} [shape=record, label=\"{}\", fillcolor={}];",
                    quote(&node.id),
                    fields.join("|"),
                    quote(&node.color)
                )?;
            } else {
                writeln!(
                    f,
                    "    {} [label={}, fillcolor={}];",
                    quote(&node.id),
                    quote(&node.label),
                    quote(&node.color)
                )?;
            }
        }
        for edge in &self.edges {
            match &edge.port {
                Some(port) => writeln!(
                    f,
                    "    {}:{} -> {};",
                    quote(&edge.from),
                    quote(port),
                    quote(&edge.to)
                )?,
                None => writeln!(f, "    {} -> {};", quote(&edge.from), quote(&edge.to))?,
            }
        }
        for group in &self.sibling_groups {
            write!(f, "    {{ rank=same;")?;
            for id in group {
                write!(f, " {};", quote(id))?;
            }
            writeln!(f, " }}")?;
        }
        writeln!(f, "}}")
    }
}

fn quote(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    format!("\"{}\"", escaped)
}

/// Escape one field of a record label. Record labels are written without
/// `quote`, whose backslash doubling would defeat these escapes.
fn record_field(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '{' | '}' | '|' | '<' | '>' | '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

fn couple_node_id(couple: &Couple) -> String {
    let (a, b) = couple.key();
    format!("couple_{}_{}", a, b)
}

fn person_node_id(id: PersonId) -> String {
    format!("person_{}", id)
}

fn port_name(id: PersonId) -> String {
    format!("p{}", id)
}

/// Build the diagram for the given nodes, edges and couples.
///
/// A couple is merged only when both partners are present; a person in
/// several couples is merged into the first one listed. A child whose two
/// parents are exactly a merged couple receives a single edge from the
/// couple node. Any other parent edge starts from that parent alone: its
/// own node, or its port on the couple node it was merged into.
pub fn render_tree(
    nodes: &[FamilyTreeNode],
    edges: &[TreeEdge],
    couples: &[Couple],
    options: &RenderOptions,
) -> Diagram {
    let by_id: HashMap<PersonId, &FamilyTreeNode> = nodes.iter().map(|n| (n.person_id, n)).collect();
    let mut visual_of: HashMap<PersonId, String> = HashMap::new();
    let mut merged: HashSet<String> = HashSet::new();
    let mut visual_nodes: Vec<DiagramNode> = Vec::new();

    for couple in couples {
        let (Some(first), Some(second)) = (by_id.get(&couple.first), by_id.get(&couple.second)) else {
            continue;
        };
        if visual_of.contains_key(&couple.first) || visual_of.contains_key(&couple.second) {
            log::debug!(
                "Couple {}+{} not merged: partner already merged elsewhere",
                couple.first,
                couple.second
            );
            continue;
        }
        let id = couple_node_id(couple);
        let generation = first.generation.min(second.generation);
        visual_of.insert(couple.first, id.clone());
        visual_of.insert(couple.second, id.clone());
        merged.insert(id.clone());
        visual_nodes.push(DiagramNode {
            id,
            label: format!("{}\n{}", first.label(), second.label()),
            generation,
            color: options.color_for(generation).to_string(),
            members: vec![couple.first, couple.second],
            member_labels: vec![first.label(), second.label()],
        });
    }

    for node in nodes {
        if visual_of.contains_key(&node.person_id) {
            continue;
        }
        let id = person_node_id(node.person_id);
        visual_of.insert(node.person_id, id.clone());
        visual_nodes.push(DiagramNode {
            id,
            label: node.label(),
            generation: node.generation,
            color: options.color_for(node.generation).to_string(),
            members: vec![node.person_id],
            member_labels: vec![node.label()],
        });
    }
    // Stable: keeps couple-first order inside a generation band.
    visual_nodes.sort_by_key(|n| n.generation);

    // Child -> its parents present in the diagram, both in first-seen order.
    let mut child_order: Vec<PersonId> = Vec::new();
    let mut parents_of: HashMap<PersonId, Vec<PersonId>> = HashMap::new();
    for edge in edges {
        if !visual_of.contains_key(&edge.parent) || !visual_of.contains_key(&edge.child) {
            continue;
        }
        let parents = parents_of.entry(edge.child).or_insert_with(|| {
            child_order.push(edge.child);
            Vec::new()
        });
        if !parents.contains(&edge.parent) {
            parents.push(edge.parent);
        }
    }

    let mut diagram_edges = Vec::new();
    let mut seen_edges = HashSet::new();
    // Visual parent (node plus port) -> its children, both in first-seen order.
    let mut parent_order: Vec<(String, Option<String>)> = Vec::new();
    let mut children_of: HashMap<(String, Option<String>), Vec<String>> = HashMap::new();

    for child in &child_order {
        let to = &visual_of[child];
        let parents = &parents_of[child];

        let sources: Vec<(String, Option<String>)> = match parents.as_slice() {
            [a, b] if visual_of[a] == visual_of[b] && merged.contains(&visual_of[a]) => {
                vec![(visual_of[a].clone(), None)]
            }
            _ => parents
                .iter()
                .map(|parent| {
                    let from = visual_of[parent].clone();
                    let port = merged.contains(&from).then(|| port_name(*parent));
                    (from, port)
                })
                .collect(),
        };

        for (from, port) in sources {
            if &from == to {
                continue;
            }
            let diagram_edge = DiagramEdge {
                from: from.clone(),
                port: port.clone(),
                to: to.clone(),
            };
            if !seen_edges.insert(diagram_edge.clone()) {
                continue;
            }
            diagram_edges.push(diagram_edge);

            let key = (from, port);
            let siblings = children_of.entry(key.clone()).or_insert_with(|| {
                parent_order.push(key);
                Vec::new()
            });
            siblings.push(to.clone());
        }
    }

    let sibling_groups = parent_order
        .iter()
        .filter_map(|parent| children_of.remove(parent))
        .filter(|children| children.len() > 1)
        .collect();

    let mut bands: BTreeMap<usize, usize> = BTreeMap::new();
    for node in &visual_nodes {
        *bands.entry(node.generation).or_default() += 1;
    }
    log::debug!(
        "Rendered {} visual nodes across {} generation(s), {} edges",
        visual_nodes.len(),
        bands.len(),
        diagram_edges.len()
    );

    Diagram {
        name: options.graph_name.clone(),
        rankdir: options.rankdir.clone(),
        nodes: visual_nodes,
        edges: diagram_edges,
        sibling_groups,
    }
}

impl DescendantTree {
    pub fn render(&self, options: &RenderOptions) -> Diagram {
        render_tree(&self.nodes, &self.edges, &self.couples, options)
    }
}
