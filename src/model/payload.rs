use serde::Deserialize;
use thiserror::Error;

use super::graph::Category;

/// A payload that fails to decode here never reaches the graph model; every
/// other irregularity (dangling edges, duplicate ids) is dropped leniently
/// downstream instead of aborting the load.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("graph payload is not well-formed: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawNode {
    pub id: String,
    pub name: String,
    pub label: Category,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawEdge {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub relation: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GraphPayload {
    pub nodes: Vec<RawNode>,
    pub edges: Vec<RawEdge>,
}

pub fn parse_graph_payload(raw: &str) -> Result<GraphPayload, ValidationError> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_minimal_payload() {
        let payload = parse_graph_payload(
            r#"{
                "nodes": [
                    {"id": "j1", "name": "Justice Rao", "label": "Judge"},
                    {"id": "c1", "name": "State vs. Sharma", "label": "Case"}
                ],
                "edges": [
                    {"source": "j1", "target": "c1", "relation": "PRESIDED"}
                ]
            }"#,
        )
        .expect("payload decodes");

        assert_eq!(payload.nodes.len(), 2);
        assert_eq!(payload.edges.len(), 1);
        assert_eq!(payload.edges[0].relation.as_deref(), Some("PRESIDED"));
    }

    #[test]
    fn relation_is_optional() {
        let payload = parse_graph_payload(
            r#"{
                "nodes": [
                    {"id": "a", "name": "A", "label": "Person"},
                    {"id": "b", "name": "B", "label": "Person"}
                ],
                "edges": [{"source": "a", "target": "b"}]
            }"#,
        )
        .expect("payload decodes");
        assert!(payload.edges[0].relation.is_none());
    }

    #[test]
    fn rejects_invalid_json() {
        let result = parse_graph_payload("not json at all");
        assert!(matches!(result, Err(ValidationError::Malformed(_))));
    }

    #[test]
    fn rejects_missing_required_fields() {
        let result = parse_graph_payload(
            r#"{"nodes": [{"id": "a", "label": "Person"}], "edges": []}"#,
        );
        assert!(matches!(result, Err(ValidationError::Malformed(_))));
    }

    #[test]
    fn rejects_unknown_categories() {
        let result = parse_graph_payload(
            r#"{"nodes": [{"id": "a", "name": "A", "label": "Spaceship"}], "edges": []}"#,
        );
        assert!(matches!(result, Err(ValidationError::Malformed(_))));
    }
}
