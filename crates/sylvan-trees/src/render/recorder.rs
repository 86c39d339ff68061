use super::{Billboard, Column, GeometryTarget, SceneTarget, TemplateInstance};

/// One call received by a [`PrimitiveRecorder`].
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Column(Column),
    Billboard(Billboard),
    BeginTemplate(String),
    EndTemplate,
    Instance(TemplateInstance),
}

/// Target that keeps every call in order, for inspection or replay.
#[derive(Clone, Debug, Default)]
pub struct PrimitiveRecorder {
    pub primitives: Vec<Primitive>,
}

impl PrimitiveRecorder {
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Column(c) => Some(c),
            _ => None,
        })
    }

    pub fn billboards(&self) -> impl Iterator<Item = &Billboard> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Billboard(b) => Some(b),
            _ => None,
        })
    }

    pub fn instances(&self) -> impl Iterator<Item = &TemplateInstance> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Instance(i) => Some(i),
            _ => None,
        })
    }
}

impl GeometryTarget for PrimitiveRecorder {
    fn draw_column(&mut self, column: &Column) {
        self.primitives.push(Primitive::Column(column.clone()));
    }

    fn draw_billboard(&mut self, billboard: &Billboard) {
        self.primitives.push(Primitive::Billboard(billboard.clone()));
    }
}

impl SceneTarget for PrimitiveRecorder {
    fn begin_template(&mut self, name: &str) {
        self.primitives.push(Primitive::BeginTemplate(name.to_string()));
    }

    fn end_template(&mut self) {
        self.primitives.push(Primitive::EndTemplate);
    }

    fn instantiate(&mut self, instance: &TemplateInstance) {
        self.primitives.push(Primitive::Instance(instance.clone()));
    }
}
