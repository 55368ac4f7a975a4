mod forces;
mod quadtree;

use eframe::egui::Vec2;

use forces::{apply_charge, apply_collision, apply_link};

/// Below this energy the layout counts as settled and ticking stops.
pub(in crate::app) const ALPHA_MIN: f32 = 0.001;
/// Geometric decay toward the target; alpha crosses three decades in
/// roughly 300 ticks (1 - 0.001^(1/300)).
const ALPHA_DECAY: f32 = 0.022_805_6;
/// Energy target held while a node is being dragged.
pub(in crate::app) const DRAG_ALPHA_TARGET: f32 = 0.3;

#[derive(Clone, Copy)]
pub(in crate::app) struct SimulationConfig {
    pub link_distance: f32,
    /// Negative repels, positive attracts.
    pub charge_strength: f32,
    /// Minimum allowed center-to-center distance between two nodes.
    pub collision_radius: f32,
    pub center_strength: f32,
    pub velocity_decay: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            link_distance: 180.0,
            charge_strength: -400.0,
            collision_radius: 45.0,
            center_strength: 1.0,
            velocity_decay: 0.4,
        }
    }
}

pub(in crate::app) struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub pin: Option<Vec2>,
}

impl Body {
    pub(in crate::app) fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            pin: None,
        }
    }
}

/// Owns all kinematic state plus the alpha schedule. `step` is independent
/// of any rendering surface; the render loop only reads `bodies()`.
pub(in crate::app) struct Simulation {
    alpha: f32,
    alpha_target: f32,
    bodies: Vec<Body>,
    scratch_positions: Vec<Vec2>,
}

impl Simulation {
    pub(in crate::app) fn new(bodies: Vec<Body>) -> Self {
        Self {
            alpha: 1.0,
            alpha_target: 0.0,
            bodies,
            scratch_positions: Vec::new(),
        }
    }

    pub(in crate::app) fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(in crate::app) fn alpha(&self) -> f32 {
        self.alpha
    }

    pub(in crate::app) fn is_active(&self) -> bool {
        self.alpha >= ALPHA_MIN || self.alpha_target >= ALPHA_MIN
    }

    /// Raising the target above `ALPHA_MIN` restarts an idle simulation;
    /// alpha then converges toward the target instead of zero.
    pub(in crate::app) fn set_alpha_target(&mut self, target: f32) {
        self.alpha_target = target.clamp(0.0, 1.0);
    }

    /// Full restart, used when layout parameters change.
    pub(in crate::app) fn reheat(&mut self) {
        self.alpha = 1.0;
    }

    pub(in crate::app) fn pin(&mut self, index: usize, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(index) {
            body.pin = Some(position);
        }
    }

    pub(in crate::app) fn unpin(&mut self, index: usize) {
        if let Some(body) = self.bodies.get_mut(index) {
            body.pin = None;
        }
    }

    /// Advances one tick. Returns false without touching anything once the
    /// layout has settled; any later reheat resumes ticking.
    pub(in crate::app) fn step(&mut self, edges: &[(usize, usize)], config: &SimulationConfig) -> bool {
        if self.bodies.is_empty() || !self.is_active() {
            return false;
        }

        self.alpha += (self.alpha_target - self.alpha) * ALPHA_DECAY;

        self.scratch_positions.clear();
        self.scratch_positions
            .extend(self.bodies.iter().map(|body| body.position));

        apply_link(&mut self.bodies, edges, config.link_distance, self.alpha);
        apply_charge(
            &mut self.bodies,
            &self.scratch_positions,
            config.charge_strength,
            self.alpha,
        );

        for body in &mut self.bodies {
            if body.pin.is_some() {
                continue;
            }
            body.velocity *= 1.0 - config.velocity_decay;
            body.position += body.velocity;
        }

        apply_collision(&mut self.bodies, config.collision_radius);

        // Centering is suspended while a drag pin is held.
        if self.bodies.iter().all(|body| body.pin.is_none()) {
            self.recenter(config.center_strength);
        }

        // Pins win over every force, every tick.
        for body in &mut self.bodies {
            if let Some(pin) = body.pin {
                body.position = pin;
                body.velocity = Vec2::ZERO;
            }
        }

        self.is_active()
    }

    fn recenter(&mut self, strength: f32) {
        let mut centroid = Vec2::ZERO;
        for body in &self.bodies {
            centroid += body.position;
        }
        centroid /= self.bodies.len() as f32;

        let shift = centroid * strength.clamp(0.0, 1.0);
        if shift.length_sq() <= f32::EPSILON {
            return;
        }
        for body in &mut self.bodies {
            body.position -= shift;
        }
    }
}
