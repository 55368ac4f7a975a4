use eframe::egui::{Sense, Ui, vec2};

use crate::util::ellipsize;

use super::super::ViewModel;
use super::super::render_utils::category_color;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.add_space(4.0);

        let Some(selected_id) = self.selected.clone() else {
            ui.weak("Click an entity to inspect it.");
            return;
        };

        let Some(&index) = self.graph.index_by_id.get(&selected_id) else {
            self.selected = None;
            return;
        };

        let node = &self.graph.nodes[index];
        ui.heading(&node.name);
        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(vec2(14.0, 14.0), Sense::hover());
            ui.painter()
                .circle_filled(rect.center(), 5.0, category_color(node.category));
            ui.label(node.category.label());
        });

        ui.separator();
        ui.heading("Relationships");

        let mut next_selected = None;
        let mut any = false;
        for edge in self.graph.relations_of(index) {
            any = true;
            let (other, arrow) = if edge.source == index {
                (edge.target, "→")
            } else {
                (edge.source, "←")
            };
            let other_node = &self.graph.nodes[other];
            let relation = edge.relation.as_deref().unwrap_or("related to");
            let text = format!("{arrow} {relation} {}", ellipsize(&other_node.name, 40));
            if ui.link(text).clicked() {
                next_selected = Some(other_node.id.clone());
            }
        }
        if !any {
            ui.weak("No relationships.");
        }

        if let Some(id) = next_selected {
            self.selected = Some(id);
        }

        ui.add_space(8.0);
        if ui.button("Clear selection").clicked() {
            self.selected = None;
        }
    }
}
