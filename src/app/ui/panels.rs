use eframe::egui::{self, Align, Context, Layout, Vec2};

use crate::model::CaseGraph;

use super::super::{SimulationConfig, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(graph: CaseGraph) -> Self {
        Self {
            graph,
            search: String::new(),
            selected: None,
            pan: Vec2::ZERO,
            zoom: 1.0,
            config: SimulationConfig::default(),
            graph_dirty: true,
            graph_cache: None,
            search_match_cache: None,
            dragged: None,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        graph_path: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        if self.graph_dirty {
            self.rebuild_render_graph();
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("lexgraph");
                    ui.separator();
                    ui.label(format!("payload: {graph_path}"));
                    ui.label(format!("entities: {}", self.graph.node_count()));
                    ui.label(format!("relationships: {}", self.graph.edge_count()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload payload"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!("zoom: {:.2}", self.zoom));
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Building relationship graph...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_graph(ui);
            }
        });
    }
}
