use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use super::payload::GraphPayload;

// Statute and citation references (IPC sections, constitutional articles,
// acts) crowd out the actors and events the graph is meant to show.
const CLUTTER_PATTERN: &str = r"(?i)(IPC|Cr\.?P\.?C|Section|Article|Act|Constitution)";

fn clutter_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(CLUTTER_PATTERN).expect("clutter pattern compiles"))
}

pub fn is_clutter(name: &str) -> bool {
    clutter_regex().is_match(name)
}

/// Removes clutter entities before the payload reaches the graph model.
/// Edges orphaned by a removal are dropped here as well so the model only
/// ever sees endpoints it can resolve.
pub fn strip_clutter(payload: GraphPayload) -> GraphPayload {
    let node_count = payload.nodes.len();
    let edge_count = payload.edges.len();

    let mut nodes = payload.nodes;
    nodes.retain(|node| !is_clutter(&node.name));

    let retained_ids = nodes
        .iter()
        .map(|node| node.id.as_str())
        .collect::<HashSet<_>>();

    let mut edges = payload.edges;
    edges.retain(|edge| {
        retained_ids.contains(edge.source.as_str()) && retained_ids.contains(edge.target.as_str())
    });

    let dropped_nodes = node_count - nodes.len();
    let dropped_edges = edge_count - edges.len();
    if dropped_nodes > 0 || dropped_edges > 0 {
        debug!(dropped_nodes, dropped_edges, "stripped clutter entities");
    }

    GraphPayload { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_graph_payload;

    fn payload(raw: &str) -> GraphPayload {
        parse_graph_payload(raw).expect("payload decodes")
    }

    #[test]
    fn statute_references_are_clutter() {
        assert!(is_clutter("Section 302 IPC"));
        assert!(is_clutter("Article 21"));
        assert!(is_clutter("CrPC"));
        assert!(is_clutter("Cr.P.C."));
        assert!(is_clutter("Prevention of Corruption Act"));
        assert!(is_clutter("Constitution of India"));
    }

    #[test]
    fn actors_are_not_clutter() {
        assert!(!is_clutter("Justice Verma"));
        assert!(!is_clutter("Mumbai Police"));
        assert!(!is_clutter("Arrest of the accused"));
    }

    #[test]
    fn strips_clutter_nodes_and_orphaned_edges() {
        let stripped = strip_clutter(payload(
            r#"{
                "nodes": [
                    {"id": "p1", "name": "Ramesh Kumar", "label": "Person"},
                    {"id": "s1", "name": "Section 302 IPC", "label": "Event"},
                    {"id": "c1", "name": "State vs. Kumar", "label": "Case"}
                ],
                "edges": [
                    {"source": "p1", "target": "c1", "relation": "ACCUSED_IN"},
                    {"source": "c1", "target": "s1", "relation": "CHARGED_UNDER"}
                ]
            }"#,
        ));

        assert_eq!(stripped.nodes.len(), 2);
        assert!(stripped.nodes.iter().all(|node| node.id != "s1"));
        assert_eq!(stripped.edges.len(), 1);
        assert_eq!(stripped.edges[0].source, "p1");
    }

    #[test]
    fn clean_payloads_pass_through_unchanged() {
        let stripped = strip_clutter(payload(
            r#"{
                "nodes": [{"id": "j1", "name": "Justice Rao", "label": "Judge"}],
                "edges": []
            }"#,
        ));
        assert_eq!(stripped.nodes.len(), 1);
    }
}
