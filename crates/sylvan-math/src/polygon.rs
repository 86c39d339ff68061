//! Simple polygons with optional holes on the ground plane.

use glam::DVec2;

use crate::AabbXz;

/// A polygon on the ground plane: one outer ring and zero or more hole rings.
///
/// Rings are stored open (the closing vertex is implicit) and may use either
/// winding order.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonXz {
    outer: Vec<DVec2>,
    holes: Vec<Vec<DVec2>>,
}

impl PolygonXz {
    /// Create a polygon without holes. A trailing vertex equal to the first is dropped.
    pub fn new(outer: Vec<DVec2>) -> Self {
        Self::with_holes(outer, Vec::new())
    }

    /// Create a polygon with hole rings.
    pub fn with_holes(outer: Vec<DVec2>, holes: Vec<Vec<DVec2>>) -> Self {
        Self {
            outer: open_ring(outer),
            holes: holes.into_iter().map(open_ring).collect(),
        }
    }

    /// Axis-aligned rectangle spanning two corners.
    pub fn rectangle(a: DVec2, b: DVec2) -> Self {
        let aabb = AabbXz::new(a, b);
        Self::new(vec![
            aabb.min,
            DVec2::new(aabb.max.x, aabb.min.y),
            aabb.max,
            DVec2::new(aabb.min.x, aabb.max.y),
        ])
    }

    pub fn outer(&self) -> &[DVec2] {
        &self.outer
    }

    pub fn holes(&self) -> &[Vec<DVec2>] {
        &self.holes
    }

    /// Ray-casting containment: inside the outer ring and outside every hole.
    pub fn contains(&self, p: DVec2) -> bool {
        ring_contains(&self.outer, p) && !self.holes.iter().any(|h| ring_contains(h, p))
    }

    /// Area of the outer ring minus the area of the holes, never negative.
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| ring_signed_area(h).abs()).sum();
        (ring_signed_area(&self.outer).abs() - holes).max(0.0)
    }

    /// Area of the part of the polygon that lies inside `clip`.
    pub fn clipped_area(&self, clip: &AabbXz) -> f64 {
        let holes: f64 = self
            .holes
            .iter()
            .map(|h| ring_signed_area(&clip_ring(h, clip)).abs())
            .sum();
        (ring_signed_area(&clip_ring(&self.outer, clip)).abs() - holes).max(0.0)
    }

    /// Bounding box of the outer ring, `None` for an empty polygon.
    pub fn bounds(&self) -> Option<AabbXz> {
        AabbXz::from_points(self.outer.iter().copied())
    }

    /// Fewer than three vertices or no enclosed area.
    pub fn is_degenerate(&self) -> bool {
        self.outer.len() < 3 || self.area() <= 0.0
    }
}

fn open_ring(mut ring: Vec<DVec2>) -> Vec<DVec2> {
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

fn ring_contains(ring: &[DVec2], p: DVec2) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
    }
    inside
}

/// Sutherland-Hodgman clip of a ring against each side of a box. Concave
/// rings may come out with zero-width spurs along the box edges; those add
/// no area.
fn clip_ring(ring: &[DVec2], clip: &AabbXz) -> Vec<DVec2> {
    // (axis, bound, keep the side below the bound)
    let sides = [
        (0, clip.min.x, false),
        (0, clip.max.x, true),
        (1, clip.min.y, false),
        (1, clip.max.y, true),
    ];

    let mut out = ring.to_vec();
    for (axis, bound, keep_below) in sides {
        let Some(&last) = out.last() else {
            break;
        };
        let inside = |p: DVec2| {
            if keep_below {
                p[axis] <= bound
            } else {
                p[axis] >= bound
            }
        };
        let crossing = |a: DVec2, b: DVec2| a.lerp(b, (bound - a[axis]) / (b[axis] - a[axis]));

        let input = std::mem::take(&mut out);
        let mut prev = last;
        for &cur in &input {
            match (inside(prev), inside(cur)) {
                (true, true) => out.push(cur),
                (true, false) => out.push(crossing(prev, cur)),
                (false, true) => {
                    out.push(crossing(prev, cur));
                    out.push(cur);
                }
                (false, false) => {}
            }
            prev = cur;
        }
    }
    out
}

/// Shoelace formula; positive for counter-clockwise rings.
fn ring_signed_area(ring: &[DVec2]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice * 0.5
}
