//! Tree rendering through interchangeable backends.
//!
//! [`resolve_tree`] turns a ground position and its source feature into a
//! [`PlacedTree`] (elevation, species, height, rotation). A [`TreeRenderer`]
//! then emits it: [`ImmediateRenderer`] as raw columns or billboards on a
//! [`GeometryTarget`], [`SceneRenderer`] as instances of shared templates on a
//! [`SceneTarget`].

mod immediate;
mod pov;
mod recorder;
mod scene;

use glam::{DVec2, DVec3};
use rand::Rng;
use sylvan_config::RenderBackend;
use sylvan_math::with_elevation;

use crate::classify::{TreeClass, TreeSpecies, classify, parity_choice};
use crate::height::tree_height;
use crate::map::{Elevation, MapElement};

pub use immediate::ImmediateRenderer;
pub use pov::PovWriter;
pub use recorder::{Primitive, PrimitiveRecorder};
pub use scene::{DeclarationState, RenderSession, SceneRenderer, template_name};

/// Crown radius as a fraction of total tree height.
pub const TREE_RADIUS_PER_HEIGHT: f64 = 0.2;

/// Materials the tree geometry refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TreeMaterial {
    TreeTrunk,
    TreeCrown,
    BillboardConiferous,
    BillboardBroadLeaved,
    BillboardBroadLeavedFruit,
}

impl TreeMaterial {
    /// Billboard texture for a tree: fruit trees first, then by species.
    pub fn billboard_for(class: TreeClass) -> Self {
        if class.fruit {
            TreeMaterial::BillboardBroadLeavedFruit
        } else if class.species.is_coniferous() {
            TreeMaterial::BillboardConiferous
        } else {
            TreeMaterial::BillboardBroadLeaved
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TreeMaterial::TreeTrunk => "TREE_TRUNK",
            TreeMaterial::TreeCrown => "TREE_CROWN",
            TreeMaterial::BillboardConiferous => "TREE_BILLBOARD_CONIFEROUS",
            TreeMaterial::BillboardBroadLeaved => "TREE_BILLBOARD_BROAD_LEAVED",
            TreeMaterial::BillboardBroadLeavedFruit => "TREE_BILLBOARD_BROAD_LEAVED_FRUIT",
        }
    }

    /// Linear RGB base color.
    pub fn color(self) -> [f32; 3] {
        match self {
            TreeMaterial::TreeTrunk => [0.26, 0.16, 0.08],
            TreeMaterial::TreeCrown => [0.0, 0.5, 0.0],
            TreeMaterial::BillboardConiferous => [0.05, 0.32, 0.12],
            TreeMaterial::BillboardBroadLeaved => [0.2, 0.55, 0.1],
            TreeMaterial::BillboardBroadLeavedFruit => [0.35, 0.6, 0.12],
        }
    }
}

/// A tapered cylinder standing on `base`.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub material: TreeMaterial,
    pub base: DVec3,
    pub height: f64,
    pub radius_bottom: f64,
    pub radius_top: f64,
    pub cap_bottom: bool,
    pub cap_top: bool,
}

/// Two crossed vertical quads standing on `base`.
#[derive(Clone, Debug, PartialEq)]
pub struct Billboard {
    pub material: TreeMaterial,
    pub base: DVec3,
    pub width: f64,
    pub height: f64,
    /// Flip the texture horizontally.
    pub mirrored: bool,
}

/// Placement of a declared template: rotate about y, scale uniformly, translate.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateInstance {
    pub template: &'static str,
    pub rotation_deg: f64,
    pub scale: f64,
    pub translation: DVec3,
}

/// Receives raw per-primitive geometry.
pub trait GeometryTarget {
    fn draw_column(&mut self, column: &Column);
    fn draw_billboard(&mut self, billboard: &Billboard);
}

/// Receives a scene description. Geometry drawn between `begin_template` and
/// `end_template` forms the body of a named, reusable template.
pub trait SceneTarget: GeometryTarget {
    fn begin_template(&mut self, name: &str);
    fn end_template(&mut self);
    fn instantiate(&mut self, instance: &TemplateInstance);
}

/// A tree position together with the feature it was placed for.
#[derive(Clone, Copy)]
pub struct TreeInstance<'m> {
    pub position: DVec2,
    pub source: &'m dyn MapElement,
}

/// Everything needed to draw one tree.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedTree {
    /// Ground position lifted to terrain elevation.
    pub base: DVec3,
    pub class: TreeClass,
    pub height: f64,
    /// Rotation about the vertical axis, in [0, 360).
    pub rotation_deg: f64,
    /// Billboard flip, derived from the x coordinate.
    pub mirrored: bool,
}

/// Classify and size the tree at `instance`, drawing variation from `rng`.
///
/// `rng` must be the source feature's render stream so output is reproducible.
pub fn resolve_tree<R: Rng + ?Sized>(
    instance: &TreeInstance<'_>,
    elevation: &dyn Elevation,
    rng: &mut R,
) -> PlacedTree {
    let tags = instance.source.tags();
    let pos = instance.position;

    let class = classify(tags, pos);
    let height = tree_height(tags, instance.source.kind(), rng);
    let rotation_deg = rng.random_range(0.0..360.0);

    PlacedTree {
        base: with_elevation(pos, elevation.elevation_at(pos)),
        class,
        height,
        rotation_deg,
        mirrored: parity_choice(pos.x),
    }
}

/// Trunk and crown columns of a tree of the given species and height.
pub fn tree_columns(base: DVec3, species: TreeSpecies, height: f64) -> [Column; 2] {
    let stem_ratio = species.stem_ratio();
    let radius = height * TREE_RADIUS_PER_HEIGHT;
    let stem_height = height * stem_ratio;

    [
        Column {
            material: TreeMaterial::TreeTrunk,
            base,
            height: stem_height,
            radius_bottom: radius / 5.0,
            radius_top: radius / 4.0,
            cap_bottom: false,
            cap_top: true,
        },
        Column {
            material: TreeMaterial::TreeCrown,
            base: base + DVec3::Y * stem_height,
            height: height * (1.0 - stem_ratio),
            radius_bottom: radius,
            radius_top: if species.is_coniferous() { 0.0 } else { radius },
            cap_bottom: true,
            cap_top: true,
        },
    ]
}

/// One output backend able to draw trees.
pub trait TreeRenderer {
    /// Which backend this is; selects the forest density.
    fn backend(&self) -> RenderBackend;

    /// Emit shared declarations if the backend needs them and has not yet
    /// done so in this session.
    fn ensure_declarations(&mut self);

    fn render_tree(&mut self, tree: &PlacedTree);
}
