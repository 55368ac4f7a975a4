use eframe::egui::{Vec2, vec2};

use super::Body;
use super::quadtree::QuadTree;

const BARNES_HUT_THETA: f32 = 0.81;
const LINK_STRENGTH: f32 = 0.3;
const EPSILON: f32 = 1e-4;
const SOFTENING: f32 = 1.0;

/// Deterministic direction for coincident bodies; golden-angle spacing keeps
/// repeated fallbacks from stacking along one axis.
fn jitter_direction(seed: usize) -> Vec2 {
    let angle = ((seed as f32) * 0.618_034 + 0.37) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

fn separation(delta: Vec2, seed: usize) -> (f32, Vec2) {
    let distance_sq = delta.length_sq();
    if distance_sq > EPSILON * EPSILON {
        let distance = distance_sq.sqrt();
        (distance, delta / distance)
    } else {
        (0.0, jitter_direction(seed))
    }
}

/// Spring attraction along every edge toward the rest distance, split evenly
/// between the endpoints and scaled by the current alpha.
pub(super) fn apply_link(bodies: &mut [Body], edges: &[(usize, usize)], rest: f32, alpha: f32) {
    let count = bodies.len();
    for &(source, target) in edges {
        debug_assert!(
            source < count && target < count && source != target,
            "unvalidated edge reached the simulation"
        );
        if source >= count || target >= count || source == target {
            continue;
        }

        let delta = bodies[source].position - bodies[target].position;
        let (distance, direction) = separation(delta, source + target);
        let pull = (distance - rest) * LINK_STRENGTH * alpha;
        let correction = direction * (pull * 0.5);

        bodies[source].velocity -= correction;
        bodies[target].velocity += correction;
    }
}

/// Pairwise inverse-square interaction, Barnes-Hut approximated. A negative
/// strength repels (the default); positive attracts.
pub(super) fn apply_charge(bodies: &mut [Body], positions: &[Vec2], strength: f32, alpha: f32) {
    if bodies.len() < 2 {
        return;
    }

    let Some(tree) = QuadTree::build(positions) else {
        return;
    };

    let scaled = -strength * alpha;
    for (index, body) in bodies.iter_mut().enumerate() {
        let mut push = Vec2::ZERO;
        tree.visit_clusters(index, positions, BARNES_HUT_THETA, &mut |cluster, mass| {
            let delta = positions[index] - cluster;
            let distance_sq = delta.length_sq();
            let direction = if distance_sq > EPSILON * EPSILON {
                delta / distance_sq.sqrt()
            } else {
                jitter_direction(index)
            };
            push += direction * (mass / (distance_sq + SOFTENING));
        });
        body.velocity += push * scaled;
    }
}

/// Positional de-overlap: any pair closer than `min_separation` is pushed
/// apart by the overlap. A pinned body never moves; its share of the push
/// goes to the free body. Both pinned means nothing happens.
pub(super) fn apply_collision(bodies: &mut [Body], min_separation: f32) {
    if min_separation <= 0.0 {
        return;
    }

    let count = bodies.len();
    for i in 0..count {
        for j in (i + 1)..count {
            let delta = bodies[i].position - bodies[j].position;
            if delta.length_sq() >= min_separation * min_separation {
                continue;
            }

            let (distance, direction) = separation(delta, i.wrapping_mul(31) ^ j);
            let overlap = min_separation - distance;

            match (bodies[i].pin.is_some(), bodies[j].pin.is_some()) {
                (true, true) => {}
                (true, false) => bodies[j].position -= direction * overlap,
                (false, true) => bodies[i].position += direction * overlap,
                (false, false) => {
                    let push = direction * (overlap * 0.5);
                    bodies[i].position += push;
                    bodies[j].position -= push;
                }
            }
        }
    }
}
