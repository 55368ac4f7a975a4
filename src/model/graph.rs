use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use tracing::debug;

use super::payload::GraphPayload;

/// Entity categories recognized by the upstream extraction. Only selects the
/// display color; no effect on layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum Category {
    Judge,
    Lawyer,
    Person,
    Case,
    Court,
    Police,
    Event,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Judge,
        Category::Lawyer,
        Category::Person,
        Category::Case,
        Category::Court,
        Category::Police,
        Category::Event,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Judge => "Judge",
            Self::Lawyer => "Lawyer",
            Self::Person => "Person",
            Self::Case => "Case",
            Self::Court => "Court",
            Self::Police => "Police",
            Self::Event => "Event",
        }
    }
}

#[derive(Clone, Debug)]
pub struct EntityNode {
    pub id: String,
    pub name: String,
    pub category: Category,
}

/// Edge endpoints are indices into `CaseGraph::nodes`; an edge that cannot
/// resolve both endpoints never makes it into the graph.
#[derive(Clone, Debug)]
pub struct EntityEdge {
    pub source: usize,
    pub target: usize,
    pub relation: Option<String>,
}

/// Immutable validated snapshot used to seed the simulation.
#[derive(Clone, Debug)]
pub struct CaseGraph {
    pub nodes: Vec<EntityNode>,
    pub edges: Vec<EntityEdge>,
    pub index_by_id: HashMap<String, usize>,
}

impl CaseGraph {
    /// Builds the validated graph from a decoded payload: duplicate node ids
    /// collapse to their first occurrence, and edges with dangling endpoints,
    /// self-loops, or repeated endpoint pairs are dropped silently.
    pub fn build(payload: GraphPayload) -> Self {
        let mut nodes = Vec::with_capacity(payload.nodes.len());
        let mut index_by_id = HashMap::with_capacity(payload.nodes.len());
        let mut duplicate_nodes = 0usize;

        for raw in payload.nodes {
            if index_by_id.contains_key(&raw.id) {
                duplicate_nodes += 1;
                continue;
            }
            index_by_id.insert(raw.id.clone(), nodes.len());
            nodes.push(EntityNode {
                id: raw.id,
                name: raw.name,
                category: raw.label,
            });
        }

        let mut edges = Vec::with_capacity(payload.edges.len());
        let mut seen_pairs = HashSet::new();
        let mut dropped_edges = 0usize;

        for raw in payload.edges {
            let (Some(&source), Some(&target)) = (
                index_by_id.get(&raw.source),
                index_by_id.get(&raw.target),
            ) else {
                dropped_edges += 1;
                continue;
            };

            if source == target || !seen_pairs.insert((source, target)) {
                dropped_edges += 1;
                continue;
            }

            edges.push(EntityEdge {
                source,
                target,
                relation: raw.relation,
            });
        }

        if duplicate_nodes > 0 || dropped_edges > 0 {
            debug!(duplicate_nodes, dropped_edges, "dropped invalid graph elements");
        }

        Self {
            nodes,
            edges,
            index_by_id,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges touching the given node, for the details panel.
    pub fn relations_of(&self, index: usize) -> impl Iterator<Item = &EntityEdge> {
        self.edges
            .iter()
            .filter(move |edge| edge.source == index || edge.target == index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_graph_payload;

    fn build(raw: &str) -> CaseGraph {
        CaseGraph::build(parse_graph_payload(raw).expect("payload decodes"))
    }

    #[test]
    fn keeps_valid_nodes_and_edges() {
        let graph = build(
            r#"{
                "nodes": [
                    {"id": "A", "name": "Justice Rao", "label": "Judge"},
                    {"id": "B", "name": "State vs. Sharma", "label": "Case"}
                ],
                "edges": [{"source": "A", "target": "B", "relation": "PRESIDED"}]
            }"#,
        );

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges[0].source, 0);
        assert_eq!(graph.edges[0].target, 1);
    }

    #[test]
    fn drops_edges_with_dangling_endpoints() {
        let graph = build(
            r#"{
                "nodes": [
                    {"id": "A", "name": "Justice Rao", "label": "Judge"},
                    {"id": "B", "name": "State vs. Sharma", "label": "Case"}
                ],
                "edges": [
                    {"source": "A", "target": "B"},
                    {"source": "A", "target": "Z"},
                    {"source": "Z", "target": "B"}
                ]
            }"#,
        );

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn drops_self_loops_and_duplicate_pairs() {
        let graph = build(
            r#"{
                "nodes": [
                    {"id": "A", "name": "Ramesh", "label": "Person"},
                    {"id": "B", "name": "Suresh", "label": "Person"}
                ],
                "edges": [
                    {"source": "A", "target": "A"},
                    {"source": "A", "target": "B", "relation": "KNOWS"},
                    {"source": "A", "target": "B", "relation": "REPRESENTS"}
                ]
            }"#,
        );

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges[0].relation.as_deref(), Some("KNOWS"));
    }

    #[test]
    fn duplicate_node_ids_collapse_to_first() {
        let graph = build(
            r#"{
                "nodes": [
                    {"id": "A", "name": "First", "label": "Person"},
                    {"id": "A", "name": "Second", "label": "Court"}
                ],
                "edges": []
            }"#,
        );

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.nodes[0].name, "First");
    }

    #[test]
    fn relations_of_lists_both_directions() {
        let graph = build(
            r#"{
                "nodes": [
                    {"id": "A", "name": "Adv. Mehta", "label": "Lawyer"},
                    {"id": "B", "name": "Ramesh", "label": "Person"},
                    {"id": "C", "name": "High Court", "label": "Court"}
                ],
                "edges": [
                    {"source": "A", "target": "B", "relation": "REPRESENTS"},
                    {"source": "C", "target": "A", "relation": "HEARD"}
                ]
            }"#,
        );

        let touching = graph.relations_of(0).count();
        assert_eq!(touching, 2);
    }
}
