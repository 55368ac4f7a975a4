use eframe::egui::{self, Pos2, Rect, Ui, Vec2};

use super::super::ViewModel;
use super::super::physics::{DRAG_ALPHA_TARGET, Simulation};
use super::super::render_utils::{MAX_ZOOM, MIN_ZOOM, screen_to_world};

/// Anchored zoom: the world point under the pointer stays under the pointer.
pub(in crate::app) fn zoom_toward(
    pointer: Pos2,
    rect: Rect,
    pan: Vec2,
    zoom: f32,
    scroll: f32,
) -> (Vec2, f32) {
    let world_before = screen_to_world(rect, pan, zoom, pointer);
    let factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
    let next_zoom = (zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    let next_pan = pointer - rect.center() - (world_before * next_zoom);
    (next_pan, next_zoom)
}

impl ViewModel {
    pub(in crate::app) fn handle_zoom(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        (self.pan, self.zoom) = zoom_toward(pointer, rect, self.pan, self.zoom, scroll);
    }

    /// Primary drag over a node pins it to the pointer and reheats the
    /// simulation; any other drag pans the view. The two channels never mix:
    /// panning touches no simulation state, dragging touches no transform.
    pub(in crate::app) fn handle_pointer(
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
        hovered: Option<usize>,
        zoom: f32,
        pan: &mut Vec2,
        dragged: &mut Option<usize>,
        simulation: &mut Simulation,
    ) {
        if response.drag_started_by(egui::PointerButton::Primary) {
            *dragged = hovered;
            if let Some(index) = *dragged {
                let start = simulation.bodies()[index].position;
                simulation.pin(index, start);
                simulation.set_alpha_target(DRAG_ALPHA_TARGET);
            }
        }

        if let Some(index) = *dragged {
            if response.dragged_by(egui::PointerButton::Primary)
                && let Some(pointer) = ui.input(|input| input.pointer.interact_pos())
            {
                simulation.pin(index, screen_to_world(rect, *pan, zoom, pointer));
            }

            if response.drag_stopped_by(egui::PointerButton::Primary) {
                simulation.unpin(index);
                simulation.set_alpha_target(0.0);
                *dragged = None;
            }
        } else if response.dragged_by(egui::PointerButton::Primary)
            || response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            *pan += response.drag_delta();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    fn canvas() -> Rect {
        Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0))
    }

    #[test]
    fn zoom_is_clamped_no_matter_how_hard_you_scroll() {
        let rect = canvas();
        let pointer = pos2(400.0, 300.0);

        let mut pan = Vec2::ZERO;
        let mut zoom = 1.0;
        for _ in 0..500 {
            (pan, zoom) = zoom_toward(pointer, rect, pan, zoom, 10_000.0);
        }
        assert!(zoom <= MAX_ZOOM);

        for _ in 0..500 {
            (pan, zoom) = zoom_toward(pointer, rect, pan, zoom, -10_000.0);
        }
        assert!(zoom >= MIN_ZOOM);
    }

    #[test]
    fn zoom_keeps_the_pointer_anchored() {
        let rect = canvas();
        let pointer = pos2(250.0, 410.0);
        let pan = vec2(60.0, -20.0);
        let zoom = 1.0;

        let world_before = screen_to_world(rect, pan, zoom, pointer);
        let (next_pan, next_zoom) = zoom_toward(pointer, rect, pan, zoom, 120.0);
        let world_after = screen_to_world(rect, next_pan, next_zoom, pointer);

        assert!((world_after - world_before).length() < 1e-3);
        assert!(next_zoom > zoom);
    }
}
