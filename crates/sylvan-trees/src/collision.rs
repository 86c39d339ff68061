//! Removes tree positions that would collide with other ground-level objects.

use glam::DVec2;

use crate::map::{GroundState, Obstacle};

/// A circle on the ground that must stay free of trees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClearanceZone {
    pub center: DVec2,
    pub radius: f64,
}

impl ClearanceZone {
    /// True if `p` lies strictly inside the zone.
    pub fn excludes(&self, p: DVec2) -> bool {
        self.radius > 0.0 && self.center.distance_squared(p) < self.radius * self.radius
    }
}

impl Obstacle {
    /// Zones this obstacle blocks. Bridges and tunnels block nothing.
    pub fn clearance_zones(&self) -> impl Iterator<Item = ClearanceZone> + '_ {
        let radius = self.clearance_radius;
        let blocking = self.ground_state == GroundState::On && radius > 0.0;
        self.positions
            .iter()
            .filter(move |_| blocking)
            .map(move |&center| ClearanceZone { center, radius })
    }
}

/// Collect the clearance zones of every obstacle.
pub fn clearance_zones(obstacles: &[Obstacle]) -> Vec<ClearanceZone> {
    obstacles.iter().flat_map(Obstacle::clearance_zones).collect()
}

/// Drop every point inside a clearance zone of an on-ground obstacle,
/// keeping the order of the remaining points. Returns the number removed.
pub fn filter_collisions(points: &mut Vec<DVec2>, obstacles: &[Obstacle]) -> usize {
    let zones = clearance_zones(obstacles);
    if zones.is_empty() {
        return 0;
    }

    let before = points.len();
    points.retain(|&p| !zones.iter().any(|z| z.excludes(p)));
    let removed = before - points.len();

    tracing::trace!(zones = zones.len(), removed, "filtered tree collisions");
    removed
}
