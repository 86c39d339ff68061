use glam::DVec2;

/// Axis-aligned bounding box on the ground plane.
///
/// Invariant: min.x <= max.x, min.y <= max.y.
/// The constructor enforces this by swapping components if needed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AabbXz {
    pub min: DVec2,
    pub max: DVec2,
}

impl AabbXz {
    /// Create a box from two corners. Automatically sorts
    /// components so that min <= max on every axis.
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box enclosing all points, or `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = DVec2>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    /// Returns true if the point lies inside or on the boundary.
    pub fn contains_point(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Returns true if this box overlaps with other
    /// (including touching edges).
    pub fn intersects(&self, other: &AabbXz) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Overlapping region of both boxes, or `None` if they are disjoint.
    pub fn intersection(&self, other: &AabbXz) -> Option<AabbXz> {
        if !self.intersects(other) {
            return None;
        }
        Some(AabbXz {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        })
    }

    /// Returns true if the box has zero area
    /// (degenerate on at least one axis).
    pub fn is_degenerate(&self) -> bool {
        self.min.x == self.max.x || self.min.y == self.max.y
    }
}
