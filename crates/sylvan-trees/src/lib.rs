//! Procedural tree placement and rendering for mapped vegetation.
//!
//! Single trees, tree rows and forests are picked out of [`MapData`] by the
//! [`TreeModule`], given ground positions (fixed, evenly spaced along a row,
//! or scattered through an area under density and spacing limits), and drawn
//! through a [`TreeRenderer`] backend.

pub mod cache;
pub mod classify;
pub mod collision;
pub mod distribute;
pub mod height;
pub mod map;
pub mod module;
pub mod render;
pub mod seed;

pub use cache::{PlacementCache, PlacementKey, PlacementSet};
pub use classify::{TreeClass, TreeSpecies};
pub use map::{
    Elevation, ElementKind, FeatureId, FlatTerrain, GroundState, MapArea, MapData, MapElement,
    MapNode, MapWaySegment, Obstacle, Tags,
};
pub use module::{RenderStats, TreeModule, TreeObject};
pub use render::{
    GeometryTarget, ImmediateRenderer, PovWriter, PrimitiveRecorder, SceneRenderer, SceneTarget,
    TreeRenderer,
};
