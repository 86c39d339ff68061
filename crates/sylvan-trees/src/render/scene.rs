//! Declarative backend: shared tree templates plus one instance per tree.

use glam::DVec3;
use sylvan_config::RenderBackend;

use super::{PlacedTree, SceneTarget, TemplateInstance, TreeRenderer, tree_columns};
use crate::classify::TreeSpecies;

/// Whether the tree templates have been declared in a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeclarationState {
    #[default]
    NotDeclared,
    Declared,
}

/// Per-target state of one rendering pass.
///
/// The declaration state only ever moves from `NotDeclared` to `Declared`.
#[derive(Debug, Default)]
pub struct RenderSession {
    state: DeclarationState,
}

impl RenderSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DeclarationState {
        self.state
    }

    /// Move to `Declared`. Returns true only for the call that made the move.
    pub fn mark_declared(&mut self) -> bool {
        let first = self.state == DeclarationState::NotDeclared;
        self.state = DeclarationState::Declared;
        first
    }
}

/// Name of the template holding a unit-height tree of `species`.
pub fn template_name(species: TreeSpecies) -> &'static str {
    match species {
        TreeSpecies::Coniferous => "coniferous_tree",
        TreeSpecies::BroadLeaved => "broad_leaved_tree",
    }
}

/// Renders trees as rotated, scaled instances of per-species templates.
///
/// Owns the [`RenderSession`] of its target, so templates are declared once
/// for the renderer's lifetime.
pub struct SceneRenderer<T> {
    target: T,
    session: RenderSession,
}

impl<T: SceneTarget> SceneRenderer<T> {
    pub fn new(target: T) -> Self {
        Self {
            target,
            session: RenderSession::new(),
        }
    }

    pub fn session(&self) -> &RenderSession {
        &self.session
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }
}

impl<T: SceneTarget> TreeRenderer for SceneRenderer<T> {
    fn backend(&self) -> RenderBackend {
        RenderBackend::Scene
    }

    fn ensure_declarations(&mut self) {
        if !self.session.mark_declared() {
            return;
        }
        tracing::debug!("declaring tree templates");
        for species in [TreeSpecies::BroadLeaved, TreeSpecies::Coniferous] {
            self.target.begin_template(template_name(species));
            for column in tree_columns(DVec3::ZERO, species, 1.0) {
                self.target.draw_column(&column);
            }
            self.target.end_template();
        }
    }

    fn render_tree(&mut self, tree: &PlacedTree) {
        self.ensure_declarations();
        self.target.instantiate(&TemplateInstance {
            template: template_name(tree.class.species),
            rotation_deg: tree.rotation_deg,
            scale: tree.height,
            translation: tree.base,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::TreeClass;
    use crate::render::{Primitive, PrimitiveRecorder};

    fn tree(species: TreeSpecies, x: f64) -> PlacedTree {
        PlacedTree {
            base: DVec3::new(x, 0.0, 0.0),
            class: TreeClass {
                species,
                fruit: false,
            },
            height: 11.0,
            rotation_deg: 90.0,
            mirrored: false,
        }
    }

    #[test]
    fn test_session_transition_is_one_way() {
        let mut session = RenderSession::new();
        assert_eq!(session.state(), DeclarationState::NotDeclared);
        assert!(session.mark_declared());
        assert!(!session.mark_declared());
        assert_eq!(session.state(), DeclarationState::Declared);
    }

    #[test]
    fn test_templates_declared_once_across_many_trees() {
        let mut renderer = SceneRenderer::new(PrimitiveRecorder::default());
        for i in 0..25 {
            let species = if i % 3 == 0 {
                TreeSpecies::Coniferous
            } else {
                TreeSpecies::BroadLeaved
            };
            renderer.render_tree(&tree(species, i as f64));
        }
        renderer.ensure_declarations();

        let prims = &renderer.target().primitives;
        for name in ["coniferous_tree", "broad_leaved_tree"] {
            let declarations = prims
                .iter()
                .filter(|p| matches!(p, Primitive::BeginTemplate(n) if n == name))
                .count();
            assert_eq!(declarations, 1, "{name} declared {declarations} times");
        }
        let instances = prims
            .iter()
            .filter(|p| matches!(p, Primitive::Instance(_)))
            .count();
        assert_eq!(instances, 25);
    }

    #[test]
    fn test_first_render_triggers_declaration() {
        let mut renderer = SceneRenderer::new(PrimitiveRecorder::default());
        assert_eq!(renderer.session().state(), DeclarationState::NotDeclared);
        renderer.render_tree(&tree(TreeSpecies::Coniferous, 0.0));
        assert_eq!(renderer.session().state(), DeclarationState::Declared);

        let prims = renderer.into_target().primitives;
        assert!(matches!(&prims[0], Primitive::BeginTemplate(_)));
        let Some(Primitive::Instance(instance)) = prims.last() else {
            panic!("last primitive should be the instance");
        };
        assert_eq!(instance.template, "coniferous_tree");
        assert_eq!(instance.scale, 11.0);
        assert_eq!(instance.rotation_deg, 90.0);
    }

    #[test]
    fn test_template_bodies_are_unit_height() {
        let mut renderer = SceneRenderer::new(PrimitiveRecorder::default());
        renderer.ensure_declarations();
        let total: f64 = renderer
            .target()
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Column(c) => Some(c.height),
                _ => None,
            })
            .sum();
        // Two templates, each trunk + crown = 1.0.
        assert!((total - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_fresh_renderer_starts_new_session() {
        let mut first = SceneRenderer::new(PrimitiveRecorder::default());
        first.render_tree(&tree(TreeSpecies::BroadLeaved, 1.0));
        let mut second = SceneRenderer::new(PrimitiveRecorder::default());
        second.render_tree(&tree(TreeSpecies::BroadLeaved, 1.0));
        assert_eq!(first.target().primitives, second.target().primitives);
    }
}
