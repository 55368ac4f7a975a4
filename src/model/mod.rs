mod filter;
mod graph;
mod payload;

use std::fs;

use anyhow::{Context, Result};
use tracing::info;

pub use filter::strip_clutter;
pub use graph::{CaseGraph, Category, EntityEdge, EntityNode};
pub use payload::{GraphPayload, ValidationError, parse_graph_payload};

/// Full load pipeline: read the payload file, decode it, strip clutter
/// entities, and build the validated graph the layout engine consumes.
pub fn load_case_graph(path: &str) -> Result<CaseGraph> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read graph payload from {path}"))?;

    let payload = parse_graph_payload(&raw)
        .with_context(|| format!("failed to decode graph payload from {path}"))?;
    let payload = strip_clutter(payload);
    let graph = CaseGraph::build(payload);

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded case graph"
    );
    Ok(graph)
}
