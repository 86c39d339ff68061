//! Picks tree features out of the map, places their trees and renders them.
//!
//! Placement of single trees and tree rows happens while the map is scanned.
//! Forest placement is lazy: the first render pass that needs a forest at a
//! given density samples it once, and every later pass reuses that set.

use std::sync::Arc;

use glam::DVec2;
use sylvan_config::TreeConfig;
use sylvan_math::AabbXz;

use crate::cache::{PlacementCache, PlacementKey, PlacementSet};
use crate::collision::filter_collisions;
use crate::distribute::{
    AreaSampling, distribute_points_on, equally_distribute_points_along, tree_count_along,
};
use crate::height::{DEFAULT_TREE_HEIGHT, parse_height};
use crate::map::{
    Elevation, FeatureId, GroundState, MapArea, MapData, MapElement, MapNode, MapWaySegment, Tags,
};
use crate::render::{GeometryTarget, ImmediateRenderer, TreeInstance, TreeRenderer, resolve_tree};
use crate::seed::{placement_rng, render_rng};

/// Vertical space kept free above a tree row, in meters.
pub const TREE_ROW_CLEARING_ABOVE: f64 = 5.0;
/// Vertical space kept free above a forest, in meters.
pub const FOREST_CLEARING_ABOVE: f64 = 2.0;

pub fn is_tree(tags: &Tags) -> bool {
    tags.contains("natural", "tree")
}

pub fn is_tree_row(tags: &Tags) -> bool {
    tags.contains("natural", "tree_row")
}

/// Woods, forests and orchards, or any area describing its `wood` type.
pub fn is_forest(tags: &Tags) -> bool {
    tags.contains("natural", "wood")
        || tags.contains_any("landuse", &["forest", "orchard"])
        || tags.contains_key("wood")
}

/// A map feature that carries trees.
#[derive(Clone, Debug)]
pub enum TreeObject<'m> {
    /// One tree standing on a node.
    Tree(&'m MapNode),
    /// Trees evenly spaced along a way segment.
    TreeRow {
        segment: &'m MapWaySegment,
        positions: Vec<DVec2>,
    },
    /// Trees scattered through an area.
    Forest(&'m MapArea),
}

impl<'m> TreeObject<'m> {
    pub fn source(&self) -> &'m dyn MapElement {
        match *self {
            TreeObject::Tree(node) => node,
            TreeObject::TreeRow { segment, .. } => segment,
            TreeObject::Forest(area) => area,
        }
    }

    pub fn id(&self) -> FeatureId {
        self.source().id()
    }

    pub fn ground_state(&self) -> GroundState {
        GroundState::On
    }

    /// Height above the ground other objects must leave free.
    pub fn clearing_above(&self) -> f64 {
        match self {
            TreeObject::Tree(node) => parse_height(&node.tags, DEFAULT_TREE_HEIGHT),
            TreeObject::TreeRow { .. } => TREE_ROW_CLEARING_ABOVE,
            TreeObject::Forest(_) => FOREST_CLEARING_ABOVE,
        }
    }

    pub fn clearing_below(&self) -> f64 {
        0.0
    }
}

/// Totals of one render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub features: usize,
    pub trees: usize,
}

/// Turns tree features into placed, rendered trees.
///
/// Holds the forest placement cache, so one module should serve every render
/// pass over the same map.
pub struct TreeModule {
    config: TreeConfig,
    cache: PlacementCache,
}

impl TreeModule {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            cache: PlacementCache::new(),
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn cache(&self) -> &PlacementCache {
        &self.cache
    }

    /// Immediate renderer honoring the configured billboard mode.
    pub fn immediate_renderer<T: GeometryTarget>(&self, target: T) -> ImmediateRenderer<T> {
        ImmediateRenderer::new(target, self.config.use_billboards)
    }

    /// Collect the tree features of `map`: nodes first, then way segments,
    /// then areas, each in input order.
    pub fn apply_to<'m>(&self, map: &'m MapData) -> Vec<TreeObject<'m>> {
        let trees = map.nodes.iter().filter(|n| is_tree(&n.tags)).map(TreeObject::Tree);

        let rows = map
            .way_segments
            .iter()
            .filter(|s| is_tree_row(&s.tags))
            .map(|segment| TreeObject::TreeRow {
                segment,
                positions: self.tree_row_positions(segment),
            });

        let forests = map
            .areas
            .iter()
            .filter(|a| is_forest(&a.tags))
            .map(TreeObject::Forest);

        let objects: Vec<_> = trees.chain(rows).chain(forests).collect();
        tracing::debug!(objects = objects.len(), "collected tree features");
        objects
    }

    /// Evenly spaced positions along a tree row, away from its endpoints.
    pub fn tree_row_positions(&self, segment: &MapWaySegment) -> Vec<DVec2> {
        let count = tree_count_along(segment.length(), self.config.tree_row_spacing);
        equally_distribute_points_along(count, false, segment.start, segment.end)
    }

    /// Tree positions inside `area` at `density`, sampled on first request.
    pub fn forest_positions(
        &self,
        area: &MapArea,
        boundary: &AabbXz,
        density: f64,
    ) -> PlacementSet {
        let key = PlacementKey::new(area.id, density);
        self.cache.get_or_compute(key, || {
            let sampling = AreaSampling {
                density,
                min_spacing_fraction: self.config.min_spacing_fraction,
                max_attempts_per_point: self.config.max_attempts_per_tree,
            };
            let mut rng = placement_rng(area.id);
            let mut distribution =
                distribute_points_on(&mut rng, &area.outline, boundary, &sampling);
            let removed = filter_collisions(&mut distribution.points, &area.overlaps);

            tracing::debug!(
                feature = area.id.0,
                density,
                placed = distribution.points.len(),
                removed,
                degraded = distribution.degraded,
                "placed forest trees"
            );
            distribution.points
        })
    }

    /// Positions of every tree of `object`.
    pub fn positions(
        &self,
        object: &TreeObject<'_>,
        boundary: &AabbXz,
        density: f64,
    ) -> PlacementSet {
        match object {
            TreeObject::Tree(node) => Arc::from(vec![node.pos]),
            TreeObject::TreeRow { positions, .. } => Arc::from(positions.as_slice()),
            TreeObject::Forest(area) => self.forest_positions(area, boundary, density),
        }
    }

    /// Every tree of `object` paired with its source feature.
    pub fn instances<'m>(
        &self,
        object: &TreeObject<'m>,
        boundary: &AabbXz,
        density: f64,
    ) -> Vec<TreeInstance<'m>> {
        let source = object.source();
        self.positions(object, boundary, density)
            .iter()
            .map(|&position| TreeInstance { position, source })
            .collect()
    }

    /// Render every tree of `objects` through `renderer`.
    ///
    /// The forest density follows the renderer's backend. Per-tree variation
    /// comes from each feature's render stream, so repeating a pass with a
    /// fresh renderer reproduces its output exactly.
    pub fn render<R: TreeRenderer + ?Sized>(
        &self,
        objects: &[TreeObject<'_>],
        boundary: &AabbXz,
        elevation: &dyn Elevation,
        renderer: &mut R,
    ) -> RenderStats {
        let backend = renderer.backend();
        let density = self.config.density_for(backend);
        let mut stats = RenderStats::default();

        for object in objects {
            let mut rng = render_rng(object.id());
            for instance in self.instances(object, boundary, density) {
                let tree = resolve_tree(&instance, elevation, &mut rng);
                renderer.render_tree(&tree);
                stats.trees += 1;
            }
            stats.features += 1;
        }

        tracing::debug!(?backend, features = stats.features, trees = stats.trees, "rendered trees");
        stats
    }
}
