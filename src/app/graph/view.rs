use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::util::ellipsize;

use super::super::render_utils::{
    HOVER_RADIUS, NODE_RADIUS, category_color, circle_visible, dim_color, draw_background,
    draw_tooltip, world_to_screen,
};
use super::super::{RenderGraph, SearchMatchCache, ViewModel};

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    fn update_screen_space(rect: Rect, pan: Vec2, zoom: f32, cache: &mut RenderGraph) {
        let scratch = &mut cache.view_scratch;
        scratch.screen_positions.clear();
        scratch
            .screen_positions
            .reserve(cache.nodes.len().saturating_sub(scratch.screen_positions.capacity()));
        for body in cache.simulation.bodies() {
            scratch
                .screen_positions
                .push(world_to_screen(rect, pan, zoom, body.position));
        }
    }

    fn hovered_index(ui: &Ui, screen_positions: &[Pos2], hit_radius: f32) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        screen_positions
            .iter()
            .enumerate()
            .filter_map(|(index, position)| {
                let distance = position.distance(pointer);
                (distance <= hit_radius).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    fn cached_search_matches(&mut self) -> Option<Arc<HashSet<usize>>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let cache = self.graph_cache.as_ref()?;
        let matcher = SkimMatcherV2::default();
        let matches = cache
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                fuzzy_match_score(&matcher, &node.name, query).map(|_| index)
            })
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        if self.graph_dirty {
            self.rebuild_render_graph();
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);

        self.handle_zoom(ui, rect, &response);

        let matches = self.cached_search_matches();
        let pan = self.pan;
        let zoom = self.zoom;

        let Some(cache) = self.graph_cache.as_mut() else {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No entities to display",
                FontId::proportional(14.0),
                Color32::from_gray(150),
            );
            return;
        };

        let moving = cache.simulation.step(&cache.edges, &self.config);
        if moving || response.dragged() {
            ui.ctx().request_repaint();
        }

        Self::update_screen_space(rect, pan, zoom, cache);

        let hovered = if response.hovered() {
            Self::hovered_index(ui, &cache.view_scratch.screen_positions, NODE_RADIUS * zoom)
        } else {
            None
        };

        Self::handle_pointer(
            ui,
            rect,
            &response,
            hovered,
            zoom,
            &mut self.pan,
            &mut self.dragged,
            &mut cache.simulation,
        );

        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let positions = &cache.view_scratch.screen_positions;

        let edge_stroke = Stroke::new(
            (1.5 * zoom).clamp(0.5, 4.0),
            Color32::from_rgba_unmultiplied(75, 85, 99, 153),
        );
        for &(source, target) in &cache.edges {
            painter.line_segment([positions[source], positions[target]], edge_stroke);
        }

        let search_active = matches.as_ref().is_some_and(|found| !found.is_empty());
        let label_color = Color32::from_rgb(229, 231, 235);

        for (index, node) in cache.nodes.iter().enumerate() {
            let position = positions[index];
            let is_hovered = hovered == Some(index) || self.dragged == Some(index);
            let radius = (if is_hovered { HOVER_RADIUS } else { NODE_RADIUS }) * zoom;
            if !circle_visible(rect, position, radius) {
                continue;
            }

            let is_selected = self.selected.as_deref() == Some(node.id.as_str());
            let is_match = matches.as_ref().is_some_and(|found| found.contains(&index));
            let base = category_color(node.category);
            let fill = if search_active && !is_match {
                dim_color(base, 0.35)
            } else {
                base
            };

            painter.circle_filled(position, radius, fill);
            let (stroke_width, stroke_color) = if is_selected {
                (2.4, Color32::from_rgb(245, 206, 93))
            } else {
                (1.2, Color32::WHITE)
            };
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(stroke_width * zoom.clamp(0.6, 1.6), stroke_color),
            );

            if zoom > 0.45 || is_hovered || is_selected {
                painter.text(
                    position + vec2(radius + 5.0, 0.0),
                    Align2::LEFT_CENTER,
                    ellipsize(&node.name, 32),
                    FontId::proportional(12.0),
                    label_color,
                );
            }
        }

        if let Some(index) = hovered
            && self.dragged.is_none()
            && let Some(pointer) = ui.input(|input| input.pointer.hover_pos())
        {
            let node = &cache.nodes[index];
            draw_tooltip(&painter, rect, pointer, &node.name, node.category);
        }

        if response.clicked_by(egui::PointerButton::Primary) {
            self.selected = hovered.and_then(|index| cache.nodes.get(index).map(|node| node.id.clone()));
        }
    }
}
