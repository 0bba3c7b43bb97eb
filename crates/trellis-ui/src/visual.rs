//! Renderer-facing visual state of a widget.
//!
//! A dirty widget's [`Visual`] is rebuilt during the tree update: a mesh
//! description, a flat map of named shader uniforms and its world transform.
//! The backend turns these into GPU work; nothing here draws.

use crate::dirty::DirtyFlags;
use crate::layout::Anchor;
use crate::property::props;
use crate::tree::UiTree;
use crate::widget::{WidgetKind, WidgetNode};
use indexmap::IndexMap;
use trellis_core::color::Color;
use trellis_core::math::{Mat4, Vec2};

/// Uniform names written by the built-in widget kinds.
pub mod uniforms {
    pub const COLOR: &str = "u_Color";
    pub const FILL_COLOR: &str = "u_FillColor";
    pub const PROGRESS: &str = "u_Progress";
    pub const TEXTURE: &str = "u_Texture";
    pub const TEXT_COLOR: &str = "u_TextColor";
    pub const WORLD: &str = "u_World";
}

/// Geometry the backend should draw for a widget.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Mesh {
    /// Nothing to draw.
    #[default]
    Empty,
    /// Unit quad scaled by the world transform.
    Quad,
    /// Shaped text laid out inside the widget box.
    Text { content: String, font_size: f32 },
}

impl Mesh {
    pub fn is_empty(&self) -> bool {
        matches!(self, Mesh::Empty)
    }
}

/// A single shader uniform value.
#[derive(Debug, Clone, PartialEq)]
pub enum Uniform {
    Color(Color),
    Float(f32),
    Texture(String),
    Matrix(Mat4),
}

pub type Uniforms = IndexMap<&'static str, Uniform>;

/// Where a widget sits in UI space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldTransform {
    /// Bottom-left corner.
    pub position: Vec2,
    /// Width and height.
    pub scale: Vec2,
}

impl WorldTransform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position.extend(0.0)) * Mat4::from_scale(self.scale.extend(1.0))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Visual {
    pub mesh: Mesh,
    pub uniforms: Uniforms,
    pub world: WorldTransform,
}

/// Rebuild the parts of `node`'s visual selected by `flags`.
pub(crate) fn refresh(tree: &UiTree, node: &WidgetNode, flags: DirtyFlags) -> Visual {
    let mut visual = node.visual.clone();

    if flags.needs_geometry() {
        visual.mesh = build_mesh(node);
    }
    if flags.intersects(DirtyFlags::UNIFORMS | DirtyFlags::GEOMETRY) {
        visual.uniforms = build_uniforms(node);
    }
    if flags.needs_transform() {
        visual.world = WorldTransform {
            position: tree.world_position(node.id(), Anchor::BottomLeft, None),
            scale: tree.size(node.id()),
        };
    }
    visual
        .uniforms
        .insert(uniforms::WORLD, Uniform::Matrix(visual.world.matrix()));
    visual
}

fn build_mesh(node: &WidgetNode) -> Mesh {
    match node.kind() {
        WidgetKind::Generic => Mesh::Empty,
        WidgetKind::Box
        | WidgetKind::Button
        | WidgetKind::Container
        | WidgetKind::Item
        | WidgetKind::ProgressBar
        | WidgetKind::Sprite => Mesh::Quad,
        WidgetKind::Label | WidgetKind::TextField => Mesh::Text {
            content: node.property_or(&props::TEXT, String::new()),
            font_size: node.property_or(&props::FONT_SIZE, 16.0),
        },
    }
}

fn build_uniforms(node: &WidgetNode) -> Uniforms {
    let mut out = Uniforms::new();
    let background = node.try_property(&props::BACKGROUND_COLOR);
    let texture = node.try_property(&props::TEXTURE);

    match node.kind() {
        WidgetKind::Generic => {}
        WidgetKind::Box | WidgetKind::Button | WidgetKind::Container => {
            out.insert(uniforms::COLOR, Uniform::Color(background.unwrap_or(Color::TRANSPARENT)));
        }
        WidgetKind::Sprite | WidgetKind::Item => {
            out.insert(uniforms::COLOR, Uniform::Color(background.unwrap_or(Color::WHITE)));
            if let Some(texture) = texture {
                out.insert(uniforms::TEXTURE, Uniform::Texture(texture));
            }
        }
        WidgetKind::ProgressBar => {
            let progress = node.property_or(&props::PROGRESS, 0.0).clamp(0.0, 1.0);
            out.insert(uniforms::COLOR, Uniform::Color(background.unwrap_or(Color::BLACK)));
            out.insert(
                uniforms::FILL_COLOR,
                Uniform::Color(node.property_or(&props::FILL_COLOR, Color::GREEN)),
            );
            out.insert(uniforms::PROGRESS, Uniform::Float(progress));
        }
        WidgetKind::Label => {
            out.insert(
                uniforms::TEXT_COLOR,
                Uniform::Color(node.property_or(&props::TEXT_COLOR, Color::WHITE)),
            );
        }
        WidgetKind::TextField => {
            out.insert(uniforms::COLOR, Uniform::Color(background.unwrap_or(Color::TRANSPARENT)));
            out.insert(
                uniforms::TEXT_COLOR,
                Uniform::Color(node.property_or(&props::TEXT_COLOR, Color::WHITE)),
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_matrix_maps_unit_quad() {
        let world = WorldTransform {
            position: Vec2::new(200.0, 0.0),
            scale: Vec2::new(600.0, 600.0),
        };
        let m = world.matrix();
        assert_eq!(m.transform_point3(glam_point(0.0, 0.0)), glam_point(200.0, 0.0));
        assert_eq!(m.transform_point3(glam_point(1.0, 1.0)), glam_point(800.0, 600.0));
    }

    fn glam_point(x: f32, y: f32) -> trellis_core::math::Vec3 {
        trellis_core::math::Vec3::new(x, y, 0.0)
    }

    #[test]
    fn test_progress_is_clamped() {
        let node = WidgetNode::new(WidgetKind::ProgressBar, "hp").with(&props::PROGRESS, 1.7);
        let built = build_uniforms(&node);
        assert_eq!(built.get(uniforms::PROGRESS), Some(&Uniform::Float(1.0)));
    }

    #[test]
    fn test_label_mesh_carries_text() {
        let node = WidgetNode::new(WidgetKind::Label, "title").with(&props::TEXT, "Hello".to_string());
        assert_eq!(
            build_mesh(&node),
            Mesh::Text {
                content: "Hello".into(),
                font_size: 16.0
            }
        );
    }
}
