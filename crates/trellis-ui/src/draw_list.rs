//! Renderer seam and a retained draw list.
//!
//! The tree never draws. During [`UiTree::render`](crate::tree::UiTree::render)
//! it hands one [`DrawCall`] per visible widget to a [`UiRenderer`]. Backends
//! implement the trait directly; [`DrawList`] records owned commands instead,
//! which is what tests and deferred backends use.

use crate::visual::{Mesh, Uniforms, WorldTransform};
use crate::widget_id::WidgetId;
use trellis_core::alloc::HashMap;

/// One widget's contribution to a frame, borrowed from its [`Visual`](crate::visual::Visual).
#[derive(Debug, Clone, Copy)]
pub struct DrawCall<'a> {
    pub widget: WidgetId,
    pub mesh: &'a Mesh,
    pub uniforms: &'a Uniforms,
    pub world: WorldTransform,
}

/// Consumer of draw calls.
pub trait UiRenderer {
    fn draw(&mut self, call: DrawCall<'_>);
}

/// Owned copy of a [`DrawCall`].
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub widget: WidgetId,
    pub mesh: Mesh,
    pub uniforms: Uniforms,
    pub world: WorldTransform,
}

impl From<DrawCall<'_>> for DrawCommand {
    fn from(call: DrawCall<'_>) -> Self {
        Self {
            widget: call.widget,
            mesh: call.mesh.clone(),
            uniforms: call.uniforms.clone(),
            world: call.world,
        }
    }
}

/// Draw commands in submission order.
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    /// Number of commands per widget, for widgets drawn more than once.
    per_widget: HashMap<WidgetId, usize>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Widgets in the order they were drawn. Repeats are kept.
    pub fn widgets(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.commands.iter().map(|c| c.widget)
    }

    pub fn count_for(&self, widget: WidgetId) -> usize {
        self.per_widget.get(&widget).copied().unwrap_or(0)
    }

    pub fn last(&self) -> Option<&DrawCommand> {
        self.commands.last()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.per_widget.clear();
    }
}

impl UiRenderer for DrawList {
    fn draw(&mut self, call: DrawCall<'_>) {
        *self.per_widget.entry(call.widget).or_insert(0) += 1;
        self.commands.push(call.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::math::Vec2;

    #[test]
    fn test_repeated_widget_is_counted() {
        let widget = WidgetId::next();
        let mesh = Mesh::Quad;
        let uniforms = Uniforms::new();
        let world = WorldTransform {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
        };

        let mut list = DrawList::new();
        for _ in 0..2 {
            list.draw(DrawCall {
                widget,
                mesh: &mesh,
                uniforms: &uniforms,
                world,
            });
        }

        assert_eq!(list.len(), 2);
        assert_eq!(list.count_for(widget), 2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.count_for(widget), 0);
    }
}
