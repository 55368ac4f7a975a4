use std::f32::consts::TAU;

use eframe::egui::vec2;

use crate::util::stable_pair;

use super::super::physics::{Body, Simulation};
use super::super::{RenderGraph, RenderNode, ViewModel, ViewScratch};

impl ViewModel {
    /// Seeds render rows and fresh kinematic state from the validated graph.
    /// Placement is a jittered ring around the origin so identical payloads
    /// relax into identical layouts.
    pub(in crate::app) fn rebuild_render_graph(&mut self) {
        self.graph_dirty = false;
        self.search_match_cache = None;
        self.dragged = None;

        if self.graph.nodes.is_empty() {
            self.graph_cache = None;
            return;
        }

        let count = self.graph.nodes.len();
        let ring_radius = self.config.link_distance * 0.5 + (count as f32).sqrt() * 26.0;

        let bodies = self
            .graph
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let angle = (index as f32 / count as f32) * TAU;
                let (jx, jy) = stable_pair(&node.id);
                let jitter = vec2(jx, jy) * 32.0;
                Body::at(vec2(angle.cos(), angle.sin()) * ring_radius + jitter)
            })
            .collect::<Vec<_>>();

        let nodes = self
            .graph
            .nodes
            .iter()
            .map(|node| RenderNode {
                id: node.id.clone(),
                name: node.name.clone(),
                category: node.category,
            })
            .collect::<Vec<_>>();

        let edges = self
            .graph
            .edges
            .iter()
            .map(|edge| (edge.source, edge.target))
            .collect::<Vec<_>>();

        self.graph_cache = Some(RenderGraph {
            nodes,
            edges,
            simulation: Simulation::new(bodies),
            view_scratch: ViewScratch {
                screen_positions: Vec::new(),
            },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::ViewModel;
    use crate::model::{CaseGraph, parse_graph_payload};

    fn judge_and_case() -> ViewModel {
        let graph = CaseGraph::build(
            parse_graph_payload(
                r#"{
                    "nodes": [
                        {"id": "A", "name": "Justice Rao", "label": "Judge"},
                        {"id": "B", "name": "State vs. Sharma", "label": "Case"}
                    ],
                    "edges": [{"source": "A", "target": "B", "relation": "PRESIDED"}]
                }"#,
            )
            .expect("payload decodes"),
        );
        ViewModel::new(graph)
    }

    #[test]
    fn rebuild_seeds_one_body_per_entity() {
        let mut model = judge_and_case();
        model.rebuild_render_graph();

        let cache = model.graph_cache.as_ref().expect("cache built");
        assert_eq!(cache.nodes.len(), 2);
        assert_eq!(cache.edges, vec![(0, 1)]);
        assert_eq!(cache.simulation.bodies().len(), 2);
    }

    #[test]
    fn loaded_pair_relaxes_to_the_link_rest_distance() {
        let mut model = judge_and_case();
        model.rebuild_render_graph();
        let cache = model.graph_cache.as_mut().expect("cache built");

        let mut ticks = 0;
        while cache.simulation.step(&cache.edges, &model.config) {
            ticks += 1;
            assert!(ticks < 500, "layout failed to settle");
        }

        let bodies = cache.simulation.bodies();
        let distance = (bodies[0].position - bodies[1].position).length();
        assert!(
            (160.0..=200.0).contains(&distance),
            "settled at {distance}, expected roughly the link rest distance"
        );
    }

    #[test]
    fn empty_graph_builds_no_cache() {
        let graph = CaseGraph::build(
            parse_graph_payload(r#"{"nodes": [], "edges": []}"#).expect("payload decodes"),
        );
        let mut model = ViewModel::new(graph);
        model.rebuild_render_graph();
        assert!(model.graph_cache.is_none());
    }
}
