use eframe::egui::{self, Sense, Ui, Vec2, vec2};

use crate::model::Category;

use super::super::ViewModel;
use super::super::render_utils::category_color;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.add_space(4.0);
        ui.heading("Search");
        if ui.text_edit_singleline(&mut self.search).changed() {
            self.search_match_cache = None;
        }
        if let Some(cached) = &self.search_match_cache {
            ui.weak(format!("{} matching entities", cached.matches.len()));
        }

        ui.separator();
        ui.heading("Legend");
        for category in Category::ALL {
            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(vec2(14.0, 14.0), Sense::hover());
                ui.painter()
                    .circle_filled(rect.center(), 5.0, category_color(category));
                ui.label(category.label());
            });
        }

        ui.separator();
        ui.heading("Layout");
        let mut changed = false;
        changed |= ui
            .add(
                egui::Slider::new(&mut self.config.link_distance, 60.0..=400.0)
                    .text("link distance"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut self.config.charge_strength, -1200.0..=-50.0)
                    .text("charge"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut self.config.collision_radius, 0.0..=120.0)
                    .text("collision radius"),
            )
            .changed();

        if changed && let Some(cache) = self.graph_cache.as_mut() {
            cache.simulation.reheat();
        }
        if let Some(cache) = &self.graph_cache {
            ui.weak(format!("layout energy: {:.3}", cache.simulation.alpha()));
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button("Reheat layout").clicked()
                && let Some(cache) = self.graph_cache.as_mut()
            {
                cache.simulation.reheat();
            }
            if ui.button("Reset view").clicked() {
                self.pan = Vec2::ZERO;
                self.zoom = 1.0;
            }
        });
    }
}
