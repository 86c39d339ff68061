//! Point distribution along segments and inside polygons.

use glam::DVec2;
use hashbrown::HashMap;
use rand::Rng;
use sylvan_math::{AabbXz, PolygonXz};

/// Upper bound on the up-front point allocation of an area distribution.
const INITIAL_CAPACITY_LIMIT: usize = 4096;

/// `count` points equally spaced from `start` to `end`, in order.
///
/// With `inclusive` the first and last point sit on the endpoints (a single
/// point sits at the midpoint). Without it each point is the center of one of
/// `count` equal sub-intervals, so consecutive points are `length / count`
/// apart and half that distance from either endpoint.
pub fn equally_distribute_points_along(
    count: usize,
    inclusive: bool,
    start: DVec2,
    end: DVec2,
) -> Vec<DVec2> {
    if count == 0 {
        return Vec::new();
    }
    if inclusive && count == 1 {
        return vec![start.lerp(end, 0.5)];
    }

    (0..count)
        .map(|i| {
            let t = if inclusive {
                i as f64 / (count - 1) as f64
            } else {
                (i as f64 + 0.5) / count as f64
            };
            start.lerp(end, t)
        })
        .collect()
}

/// Number of trees for a row of the given length at the preferred spacing.
/// Always at least one.
pub fn tree_count_along(length: f64, preferred_spacing: f64) -> usize {
    if !(length.is_finite() && preferred_spacing > 0.0) {
        return 1;
    }
    ((length / preferred_spacing).round() as usize).max(1)
}

/// Parameters for [`distribute_points_on`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaSampling {
    /// Target density in points per square meter.
    pub density: f64,
    /// Minimum distance between points as a fraction of `1 / sqrt(density)`.
    pub min_spacing_fraction: f64,
    /// Rejection-sampling attempts allowed per requested point.
    pub max_attempts_per_point: u32,
}

impl AreaSampling {
    /// Minimum allowed distance between two accepted points.
    pub fn min_spacing(&self) -> f64 {
        if self.density > 0.0 {
            self.min_spacing_fraction.max(0.0) / self.density.sqrt()
        } else {
            0.0
        }
    }
}

/// Outcome of an area distribution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Distribution {
    pub points: Vec<DVec2>,
    /// Number of points the density asked for.
    pub requested: usize,
    /// The attempt budget ran out before `requested` points were accepted.
    pub degraded: bool,
}

/// Randomly scatter about `density × area` points inside `polygon`, where
/// `area` only counts the part of the polygon inside `boundary`.
///
/// Candidates are drawn uniformly from the polygon bounds clipped to
/// `boundary` and rejected when they fall outside the polygon or closer than
/// [`AreaSampling::min_spacing`] to an accepted point. The loop is bounded by
/// `requested × max_attempts_per_point` attempts; when that runs out the
/// accepted points are returned and the result is marked degraded.
pub fn distribute_points_on<R: Rng + ?Sized>(
    rng: &mut R,
    polygon: &PolygonXz,
    boundary: &AabbXz,
    sampling: &AreaSampling,
) -> Distribution {
    if !(sampling.density.is_finite() && sampling.density > 0.0) || polygon.is_degenerate() {
        return Distribution::default();
    }

    let Some(region) = polygon.bounds().and_then(|b| b.intersection(boundary)) else {
        return Distribution::default();
    };
    if region.is_degenerate() {
        return Distribution::default();
    }

    let requested = (polygon.clipped_area(&region) * sampling.density).floor() as usize;
    let min_spacing = sampling.min_spacing();
    let budget = requested.saturating_mul(sampling.max_attempts_per_point.max(1) as usize);

    let mut grid = SpacingGrid::new(min_spacing);
    let mut points = Vec::with_capacity(requested.min(INITIAL_CAPACITY_LIMIT));
    let mut attempts = 0usize;

    while points.len() < requested && attempts < budget {
        attempts += 1;

        let candidate = DVec2::new(
            rng.random_range(region.min.x..=region.max.x),
            rng.random_range(region.min.y..=region.max.y),
        );

        if !polygon.contains(candidate) || !boundary.contains_point(candidate) {
            continue;
        }
        if grid.has_point_within(candidate, min_spacing) {
            continue;
        }

        grid.insert(candidate);
        points.push(candidate);
    }

    let degraded = points.len() < requested;
    if degraded {
        tracing::warn!(
            requested,
            placed = points.len(),
            attempts,
            min_spacing,
            "point distribution ran out of attempts; density too high for spacing"
        );
    }

    Distribution {
        points,
        requested,
        degraded,
    }
}

/// Uniform hash grid for local minimum-distance checks.
struct SpacingGrid {
    cell_size: f64,
    cells: HashMap<(i64, i64), Vec<DVec2>>,
}

impl SpacingGrid {
    fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    fn cell_of(&self, p: DVec2) -> (i64, i64) {
        (
            (p.x / self.cell_size).floor() as i64,
            (p.y / self.cell_size).floor() as i64,
        )
    }

    fn insert(&mut self, p: DVec2) {
        if self.cell_size <= 0.0 {
            return;
        }
        let cell = self.cell_of(p);
        self.cells.entry(cell).or_default().push(p);
    }

    /// Any stored point strictly closer than `radius` (radius <= cell size).
    fn has_point_within(&self, p: DVec2, radius: f64) -> bool {
        if self.cell_size <= 0.0 || radius <= 0.0 {
            return false;
        }
        let (cx, cz) = self.cell_of(p);
        let radius_sq = radius * radius;
        for dx in -1..=1 {
            for dz in -1..=1 {
                if let Some(bucket) = self.cells.get(&(cx + dx, cz + dz))
                    && bucket.iter().any(|q| q.distance_squared(p) < radius_sq)
                {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::FeatureId;
    use crate::seed::placement_rng;

    fn sampling(density: f64) -> AreaSampling {
        AreaSampling {
            density,
            min_spacing_fraction: 0.3,
            max_attempts_per_point: 30,
        }
    }

    fn square(size: f64) -> PolygonXz {
        PolygonXz::rectangle(DVec2::ZERO, DVec2::splat(size))
    }

    fn world() -> AabbXz {
        AabbXz::new(DVec2::splat(-1000.0), DVec2::splat(1000.0))
    }

    #[test]
    fn test_line_exclusive_four_points() {
        let points = equally_distribute_points_along(4, false, DVec2::ZERO, DVec2::new(30.0, 0.0));
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![3.75, 11.25, 18.75, 26.25]);
        for pair in points.windows(2) {
            assert!((pair[0].distance(pair[1]) - 7.5).abs() < 1e-12);
        }
        assert!(points.iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn test_line_inclusive_four_points() {
        let points = equally_distribute_points_along(4, true, DVec2::ZERO, DVec2::new(30.0, 0.0));
        assert_eq!(points.len(), 4);
        for (p, expected) in points.iter().zip([0.0, 10.0, 20.0, 30.0]) {
            assert!((p.x - expected).abs() < 1e-9, "expected x={expected}, got {p}");
        }
    }

    #[test]
    fn test_line_diagonal_collinear_and_ordered() {
        let start = DVec2::new(1.0, 2.0);
        let end = DVec2::new(-5.0, 10.0);
        let points = equally_distribute_points_along(5, false, start, end);
        assert_eq!(points.len(), 5);
        let dir = (end - start).normalize();
        let mut last_t = f64::NEG_INFINITY;
        for p in &points {
            let offset = *p - start;
            assert!(offset.perp_dot(dir).abs() < 1e-9, "point {p} off the line");
            let t = offset.dot(dir);
            assert!(t > last_t);
            last_t = t;
        }
    }

    #[test]
    fn test_line_degenerate_counts() {
        assert!(equally_distribute_points_along(0, true, DVec2::ZERO, DVec2::X).is_empty());
        assert_eq!(
            equally_distribute_points_along(1, true, DVec2::ZERO, DVec2::new(4.0, 0.0)),
            vec![DVec2::new(2.0, 0.0)]
        );
        let same = DVec2::new(3.0, 3.0);
        assert_eq!(equally_distribute_points_along(3, false, same, same), vec![same; 3]);
    }

    #[test]
    fn test_tree_count_along() {
        assert_eq!(tree_count_along(30.0, 8.0), 4);
        assert_eq!(tree_count_along(0.0, 8.0), 1);
        assert_eq!(tree_count_along(100.0, 10.0), 10);
        assert_eq!(tree_count_along(10.0, 0.0), 1);
    }

    #[test]
    fn test_area_points_inside_polygon_and_boundary() {
        let triangle = PolygonXz::new(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(200.0, 0.0),
            DVec2::new(0.0, 200.0),
        ]);
        let boundary = AabbXz::new(DVec2::ZERO, DVec2::new(150.0, 150.0));
        let mut rng = placement_rng(FeatureId(11));
        let result = distribute_points_on(&mut rng, &triangle, &boundary, &sampling(0.01));
        assert!(!result.points.is_empty());
        for p in &result.points {
            assert!(triangle.contains(*p), "{p} outside polygon");
            assert!(boundary.contains_point(*p), "{p} outside boundary");
        }
    }

    #[test]
    fn test_area_clipped_by_boundary_keeps_density() {
        let strip = AabbXz::new(DVec2::ZERO, DVec2::new(10.0, 100.0));
        let mut rng = placement_rng(FeatureId(12));
        let result = distribute_points_on(&mut rng, &square(100.0), &strip, &sampling(0.01));

        assert_eq!(result.requested, 10);
        assert_eq!(result.points.len(), 10);
        assert!(!result.degraded);
        assert!(result.points.iter().all(|p| p.x <= 10.0));
    }

    #[test]
    fn test_area_request_beyond_initial_capacity() {
        let params = AreaSampling {
            density: 1.0,
            min_spacing_fraction: 0.0,
            max_attempts_per_point: 1,
        };
        let mut rng = placement_rng(FeatureId(13));
        let result = distribute_points_on(&mut rng, &square(100.0), &world(), &params);

        assert!(result.requested > INITIAL_CAPACITY_LIMIT);
        assert_eq!(result.points.len(), result.requested);
        assert!(!result.degraded);
    }

    #[test]
    fn test_area_respects_min_spacing() {
        let params = sampling(0.05);
        let min = params.min_spacing();
        let mut rng = placement_rng(FeatureId(12));
        let result = distribute_points_on(&mut rng, &square(100.0), &world(), &params);
        for (i, p) in result.points.iter().enumerate() {
            for q in &result.points[i + 1..] {
                assert!(p.distance(*q) >= min, "points {p} and {q} closer than {min}");
            }
        }
    }

    #[test]
    fn test_area_count_matches_density() {
        let mut rng = placement_rng(FeatureId(13));
        let result = distribute_points_on(&mut rng, &square(100.0), &world(), &sampling(0.01));
        assert_eq!(result.requested, 100);
        assert_eq!(result.points.len(), 100);
        assert!(!result.degraded);
    }

    #[test]
    fn test_area_deterministic_per_seed() {
        let a = distribute_points_on(
            &mut placement_rng(FeatureId(77)),
            &square(50.0),
            &world(),
            &sampling(0.02),
        );
        let b = distribute_points_on(
            &mut placement_rng(FeatureId(77)),
            &square(50.0),
            &world(),
            &sampling(0.02),
        );
        assert_eq!(a, b);

        let c = distribute_points_on(
            &mut placement_rng(FeatureId(78)),
            &square(50.0),
            &world(),
            &sampling(0.02),
        );
        assert_ne!(a.points, c.points);
    }

    #[test]
    fn test_area_overfull_terminates_degraded() {
        // Spacing of 2.0 / sqrt(1.0) cannot fit 100 points into 10 x 10.
        let params = AreaSampling {
            density: 1.0,
            min_spacing_fraction: 2.0,
            max_attempts_per_point: 5,
        };
        let mut rng = placement_rng(FeatureId(14));
        let result = distribute_points_on(&mut rng, &square(10.0), &world(), &params);
        assert_eq!(result.requested, 100);
        assert!(result.degraded);
        assert!(result.points.len() < 100);
        assert!(!result.points.is_empty());
    }

    #[test]
    fn test_area_degenerate_inputs_yield_nothing() {
        let mut rng = placement_rng(FeatureId(15));
        let flat = PolygonXz::new(vec![DVec2::ZERO, DVec2::X, DVec2::new(2.0, 0.0)]);
        assert!(distribute_points_on(&mut rng, &flat, &world(), &sampling(0.1)).points.is_empty());
        assert!(distribute_points_on(&mut rng, &square(10.0), &world(), &sampling(0.0)).points.is_empty());

        let far_away = AabbXz::new(DVec2::splat(500.0), DVec2::splat(600.0));
        let result = distribute_points_on(&mut rng, &square(10.0), &far_away, &sampling(0.1));
        assert_eq!(result, Distribution::default());
    }

    #[test]
    fn test_area_tiny_polygon_requests_zero() {
        let mut rng = placement_rng(FeatureId(16));
        let result = distribute_points_on(&mut rng, &square(5.0), &world(), &sampling(0.01));
        assert_eq!(result.requested, 0);
        assert!(result.points.is_empty());
        assert!(!result.degraded);
    }
}
