//! Read-only geographic input: tagged nodes, way segments and areas.
//!
//! Tag text has already been parsed upstream; this module only holds the
//! typed features the tree module consumes.

use glam::DVec2;
use hashbrown::HashMap;
use sylvan_math::{AabbXz, PolygonXz};

/// Stable identity of a map feature, also used as its random seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(pub u64);

/// Key/value tags of a feature. Keys are unique; insertion order is irrelevant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tags {
    values: HashMap<String, String>,
}

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a tag, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder-style [`Tags::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// True if `key` is present with exactly `value`.
    pub fn contains(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    /// True if `key` is present with any of `values`.
    pub fn contains_any(&self, key: &str, values: &[&str]) -> bool {
        self.get(key).is_some_and(|v| values.contains(&v))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = Tags::new();
        for (k, v) in iter {
            tags.insert(k, v);
        }
        tags
    }
}

/// Whether an object sits on the terrain or is lifted above / sunk below it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroundState {
    On,
    /// Bridges and other elevated structures.
    Above,
    /// Tunnels and other underground structures.
    Below,
}

/// The geometric kind of a feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Node,
    WaySegment,
    Area,
}

/// Common read access to any tagged feature.
pub trait MapElement {
    fn id(&self) -> FeatureId;
    fn tags(&self) -> &Tags;
    fn kind(&self) -> ElementKind;
}

/// A single point feature.
#[derive(Clone, Debug)]
pub struct MapNode {
    pub id: FeatureId,
    pub pos: DVec2,
    pub tags: Tags,
}

/// A straight segment of a way, between two consecutive nodes.
#[derive(Clone, Debug)]
pub struct MapWaySegment {
    pub id: FeatureId,
    pub start: DVec2,
    pub end: DVec2,
    pub tags: Tags,
}

impl MapWaySegment {
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// Another rendered object whose footprint overlaps an area.
#[derive(Clone, Debug)]
pub struct Obstacle {
    pub id: FeatureId,
    pub ground_state: GroundState,
    /// Ground positions the object occupies.
    pub positions: Vec<DVec2>,
    /// Radius around each position that must stay free of trees.
    pub clearance_radius: f64,
}

/// A closed area feature together with the objects that overlap it.
#[derive(Clone, Debug)]
pub struct MapArea {
    pub id: FeatureId,
    pub outline: PolygonXz,
    pub tags: Tags,
    pub overlaps: Vec<Obstacle>,
}

impl MapElement for MapNode {
    fn id(&self) -> FeatureId {
        self.id
    }
    fn tags(&self) -> &Tags {
        &self.tags
    }
    fn kind(&self) -> ElementKind {
        ElementKind::Node
    }
}

impl MapElement for MapWaySegment {
    fn id(&self) -> FeatureId {
        self.id
    }
    fn tags(&self) -> &Tags {
        &self.tags
    }
    fn kind(&self) -> ElementKind {
        ElementKind::WaySegment
    }
}

impl MapElement for MapArea {
    fn id(&self) -> FeatureId {
        self.id
    }
    fn tags(&self) -> &Tags {
        &self.tags
    }
    fn kind(&self) -> ElementKind {
        ElementKind::Area
    }
}

/// The whole input dataset.
#[derive(Clone, Debug)]
pub struct MapData {
    pub nodes: Vec<MapNode>,
    pub way_segments: Vec<MapWaySegment>,
    pub areas: Vec<MapArea>,
    /// Overall extent of the data; area placement is clipped to it.
    pub boundary: AabbXz,
}

/// Terrain elevation lookup.
pub trait Elevation {
    fn elevation_at(&self, pos: DVec2) -> f64;
}

impl<F> Elevation for F
where
    F: Fn(DVec2) -> f64,
{
    fn elevation_at(&self, pos: DVec2) -> f64 {
        self(pos)
    }
}

/// Terrain at a constant height.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatTerrain {
    pub height: f64,
}

impl Elevation for FlatTerrain {
    fn elevation_at(&self, _pos: DVec2) -> f64 {
        self.height
    }
}
