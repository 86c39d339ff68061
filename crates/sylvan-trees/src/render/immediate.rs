use sylvan_config::RenderBackend;

use super::{Billboard, GeometryTarget, PlacedTree, TreeMaterial, TreeRenderer, tree_columns};

/// Draws every tree as its own geometry: trunk and crown columns, or a
/// crossed billboard in low-fidelity mode.
pub struct ImmediateRenderer<T> {
    target: T,
    use_billboards: bool,
}

impl<T: GeometryTarget> ImmediateRenderer<T> {
    pub fn new(target: T, use_billboards: bool) -> Self {
        Self {
            target,
            use_billboards,
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }
}

impl<T: GeometryTarget> TreeRenderer for ImmediateRenderer<T> {
    fn backend(&self) -> RenderBackend {
        RenderBackend::Immediate
    }

    fn ensure_declarations(&mut self) {}

    fn render_tree(&mut self, tree: &PlacedTree) {
        if self.use_billboards {
            let width_factor = if tree.class.fruit { 1.0 } else { 0.5 };
            self.target.draw_billboard(&Billboard {
                material: TreeMaterial::billboard_for(tree.class),
                base: tree.base,
                width: width_factor * tree.height,
                height: tree.height,
                mirrored: tree.mirrored,
            });
        } else {
            for column in tree_columns(tree.base, tree.class.species, tree.height) {
                self.target.draw_column(&column);
            }
        }
    }
}
