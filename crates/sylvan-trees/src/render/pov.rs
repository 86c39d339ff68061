//! POV-Ray scene text output.

use std::io;

use glam::DVec3;

use super::{Billboard, Column, GeometryTarget, SceneTarget, TemplateInstance, TreeMaterial};

/// Scene target producing POV-Ray scene description language.
///
/// Text accumulates in memory; callers decide where to flush it.
#[derive(Clone, Debug, Default)]
pub struct PovWriter {
    out: String,
}

impl PovWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }

    pub fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.out.as_bytes())
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }
}

fn vector(v: DVec3) -> String {
    format!("<{}, {}, {}>", v.x, v.y, v.z)
}

fn texture(material: TreeMaterial) -> String {
    let [r, g, b] = material.color();
    format!("texture {{ pigment {{ color rgb <{r}, {g}, {b}> }} }}")
}

impl GeometryTarget for PovWriter {
    fn draw_column(&mut self, column: &Column) {
        let top = column.base + DVec3::Y * column.height;
        let open = if column.cap_bottom || column.cap_top {
            ""
        } else {
            " open"
        };
        let shape = if column.radius_bottom == column.radius_top {
            format!(
                "cylinder {{ {}, {}, {}{open} {} }}",
                vector(column.base),
                vector(top),
                column.radius_bottom,
                texture(column.material)
            )
        } else {
            format!(
                "cone {{ {}, {}, {}, {}{open} {} }}",
                vector(column.base),
                column.radius_bottom,
                vector(top),
                column.radius_top,
                texture(column.material)
            )
        };
        self.line(&shape);
    }

    fn draw_billboard(&mut self, billboard: &Billboard) {
        let w = billboard.width / 2.0;
        let h = billboard.height;
        let quad = |corners: [DVec3; 4]| {
            format!(
                "  polygon {{ 5, {}, {}, {}, {}, {} }}",
                vector(corners[0]),
                vector(corners[1]),
                vector(corners[2]),
                vector(corners[3]),
                vector(corners[0])
            )
        };

        let along_x = quad([
            DVec3::new(-w, 0.0, 0.0),
            DVec3::new(w, 0.0, 0.0),
            DVec3::new(w, h, 0.0),
            DVec3::new(-w, h, 0.0),
        ]);
        let along_z = quad([
            DVec3::new(0.0, 0.0, -w),
            DVec3::new(0.0, 0.0, w),
            DVec3::new(0.0, h, w),
            DVec3::new(0.0, h, -w),
        ]);

        self.line("object { union {");
        self.line(&along_x);
        self.line(&along_z);
        self.line(&format!("  {} }}", texture(billboard.material)));
        if billboard.mirrored {
            self.line("  scale <-1, 1, 1>");
        }
        self.line(&format!("  translate {} }}", vector(billboard.base)));
    }
}

impl SceneTarget for PovWriter {
    fn begin_template(&mut self, name: &str) {
        self.line(&format!("#ifndef ({name})"));
        self.line(&format!("#declare {name} = object {{ union {{"));
    }

    fn end_template(&mut self) {
        self.line("} }");
        self.line("#end");
        self.line("");
    }

    fn instantiate(&mut self, instance: &TemplateInstance) {
        self.line(&format!(
            "object {{ {} rotate {}*y scale {} translate {} }}",
            instance.template,
            instance.rotation_deg,
            instance.scale,
            vector(instance.translation)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{TreeClass, TreeSpecies};
    use crate::render::{PlacedTree, SceneRenderer, TreeRenderer};

    #[test]
    fn test_instance_statement() {
        let mut pov = PovWriter::new();
        pov.instantiate(&TemplateInstance {
            template: "coniferous_tree",
            rotation_deg: 12.5,
            scale: 10.0,
            translation: DVec3::new(1.0, 2.0, 3.0),
        });
        assert_eq!(
            pov.as_str(),
            "object { coniferous_tree rotate 12.5*y scale 10 translate <1, 2, 3> }\n"
        );
    }

    #[test]
    fn test_cone_and_cylinder() {
        let mut pov = PovWriter::new();
        pov.draw_column(&Column {
            material: TreeMaterial::TreeCrown,
            base: DVec3::ZERO,
            height: 2.0,
            radius_bottom: 1.0,
            radius_top: 0.0,
            cap_bottom: true,
            cap_top: true,
        });
        pov.draw_column(&Column {
            material: TreeMaterial::TreeCrown,
            base: DVec3::ZERO,
            height: 2.0,
            radius_bottom: 1.0,
            radius_top: 1.0,
            cap_bottom: false,
            cap_top: false,
        });
        let text = pov.into_string();
        let mut lines = text.lines();
        let cone = lines.next().unwrap();
        assert!(cone.starts_with("cone { <0, 0, 0>, 1, <0, 2, 0>, 0 texture"));
        let cylinder = lines.next().unwrap();
        assert!(cylinder.starts_with("cylinder { <0, 0, 0>, <0, 2, 0>, 1 open texture"));
    }

    #[test]
    fn test_template_block_is_guarded() {
        let mut renderer = SceneRenderer::new(PovWriter::new());
        for x in 0..3 {
            renderer.render_tree(&PlacedTree {
                base: DVec3::new(x as f64, 0.0, 0.0),
                class: TreeClass {
                    species: TreeSpecies::BroadLeaved,
                    fruit: false,
                },
                height: 9.0,
                rotation_deg: 0.0,
                mirrored: false,
            });
        }
        let text = renderer.into_target().into_string();
        assert_eq!(text.matches("#declare broad_leaved_tree").count(), 1);
        assert_eq!(text.matches("#declare coniferous_tree").count(), 1);
        assert_eq!(text.matches("#ifndef").count(), 2);
        assert_eq!(text.matches("object { broad_leaved_tree").count(), 3);
    }

    #[test]
    fn test_mirrored_billboard() {
        let mut pov = PovWriter::new();
        pov.draw_billboard(&Billboard {
            material: TreeMaterial::BillboardConiferous,
            base: DVec3::new(5.0, 0.0, 5.0),
            width: 4.0,
            height: 8.0,
            mirrored: true,
        });
        let text = pov.as_str();
        assert_eq!(text.matches("polygon").count(), 2);
        assert!(text.contains("scale <-1, 1, 1>"));
        assert!(text.contains("<2, 8, 0>"));
        assert!(text.contains("translate <5, 0, 5> }"));
    }

    #[test]
    fn test_write_to() {
        let mut pov = PovWriter::new();
        pov.begin_template("t");
        pov.end_template();
        let mut buf = Vec::new();
        pov.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), pov.as_str());
    }
}
