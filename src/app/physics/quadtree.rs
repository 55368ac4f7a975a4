use eframe::egui::{Vec2, vec2};

const LEAF_CAPACITY: usize = 4;
const MAX_DEPTH: usize = 16;

/// Barnes-Hut quadtree over body positions. Leaves keep their member
/// indices; interior cells keep only an aggregate mass and center of mass.
pub(super) struct QuadTree {
    center: Vec2,
    half_extent: f32,
    center_of_mass: Vec2,
    mass: f32,
    members: Vec<usize>,
    children: [Option<Box<QuadTree>>; 4],
}

impl QuadTree {
    pub(super) fn build(positions: &[Vec2]) -> Option<Self> {
        let first = positions.first()?;
        let mut min = *first;
        let mut max = *first;
        for position in &positions[1..] {
            min = min.min(*position);
            max = max.max(*position);
        }

        if !(min.x.is_finite() && min.y.is_finite() && max.x.is_finite() && max.y.is_finite()) {
            return None;
        }

        let center = (min + max) * 0.5;
        let half_extent = ((max.x - min.x).max(max.y - min.y) * 0.5).max(0.5) + 0.5;
        let members = (0..positions.len()).collect();
        Some(Self::subdivide(center, half_extent, members, positions, 0))
    }

    fn subdivide(
        center: Vec2,
        half_extent: f32,
        members: Vec<usize>,
        positions: &[Vec2],
        depth: usize,
    ) -> Self {
        let mut center_of_mass = Vec2::ZERO;
        for &member in &members {
            center_of_mass += positions[member];
        }
        let mass = members.len() as f32;
        if mass > 0.0 {
            center_of_mass /= mass;
        }

        let mut cell = Self {
            center,
            half_extent,
            center_of_mass,
            mass,
            members,
            children: [None, None, None, None],
        };

        if depth >= MAX_DEPTH || cell.members.len() <= LEAF_CAPACITY {
            return cell;
        }

        let mut buckets: [Vec<usize>; 4] = Default::default();
        for &member in &cell.members {
            buckets[quadrant_of(center, positions[member])].push(member);
        }

        // All members in one quadrant means a tight (possibly coincident)
        // cluster; keep it as a leaf rather than recursing forever.
        if buckets.iter().filter(|bucket| !bucket.is_empty()).count() <= 1 {
            return cell;
        }

        let quarter = half_extent * 0.5;
        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            let offset = vec2(
                if quadrant & 1 == 0 { -quarter } else { quarter },
                if quadrant & 2 == 0 { -quarter } else { quarter },
            );
            cell.children[quadrant] = Some(Box::new(Self::subdivide(
                center + offset,
                quarter,
                bucket,
                positions,
                depth + 1,
            )));
        }
        cell.members = Vec::new();
        cell
    }

    fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    fn side_length(&self) -> f32 {
        self.half_extent * 2.0
    }

    /// Walks the tree for one body: distant cells are reported once as
    /// `(center_of_mass, mass)`, near cells are expanded down to individual
    /// members (mass 1), and the body itself is skipped.
    pub(super) fn visit_clusters(
        &self,
        index: usize,
        positions: &[Vec2],
        theta: f32,
        visit: &mut impl FnMut(Vec2, f32),
    ) {
        if self.mass <= 0.0 {
            return;
        }

        if self.is_leaf() {
            for &member in &self.members {
                if member != index {
                    visit(positions[member], 1.0);
                }
            }
            return;
        }

        let point = positions[index];
        let delta = point - self.center_of_mass;
        let distance_sq = delta.length_sq();
        let inside = (point.x - self.center.x).abs() <= self.half_extent
            && (point.y - self.center.y).abs() <= self.half_extent;
        let side = self.side_length();

        if !inside && side * side < theta * theta * distance_sq {
            visit(self.center_of_mass, self.mass);
            return;
        }

        for child in self.children.iter().flatten() {
            child.visit_clusters(index, positions, theta, visit);
        }
    }
}

fn quadrant_of(center: Vec2, point: Vec2) -> usize {
    usize::from(point.x >= center.x) | (usize::from(point.y >= center.y) << 1)
}
