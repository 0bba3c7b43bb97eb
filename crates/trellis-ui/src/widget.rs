//! Widget nodes and widget kinds.

use crate::dirty::DirtyFlags;
use crate::layout::{Anchor, Dock, SizeCache};
use crate::property::{
    Property, PropertySource, PropertyState, PropertyTable, PropertyType, props,
};
use crate::visual::Visual;
use crate::widget_id::WidgetId;
use trellis_core::color::Color;

/// Interaction state of a widget. A widget is in exactly one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WidgetState {
    Disabled,
    #[default]
    Enabled,
    Highlighted,
    Pressed,
}

/// The concrete type of a widget.
///
/// Behaviour that differs per type (default properties, visual refresh,
/// inventory and text input) is switched on this tag explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WidgetKind {
    #[default]
    Generic,
    Box,
    Button,
    Label,
    Container,
    Item,
    ProgressBar,
    Sprite,
    TextField,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 9] = [
        WidgetKind::Generic,
        WidgetKind::Box,
        WidgetKind::Button,
        WidgetKind::Label,
        WidgetKind::Container,
        WidgetKind::Item,
        WidgetKind::ProgressBar,
        WidgetKind::Sprite,
        WidgetKind::TextField,
    ];

    /// Markup tag and skin key of this kind.
    pub fn type_name(self) -> &'static str {
        match self {
            WidgetKind::Generic => "Widget",
            WidgetKind::Box => "Box",
            WidgetKind::Button => "Button",
            WidgetKind::Label => "Label",
            WidgetKind::Container => "Container",
            WidgetKind::Item => "Item",
            WidgetKind::ProgressBar => "ProgressBar",
            WidgetKind::Sprite => "Sprite",
            WidgetKind::TextField => "TextField",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_name() == name)
    }

    pub fn is_container(self) -> bool {
        self == WidgetKind::Container
    }

    pub fn is_item(self) -> bool {
        self == WidgetKind::Item
    }

    pub fn is_text_field(self) -> bool {
        self == WidgetKind::TextField
    }

    /// Seed the type's CodeDefault properties.
    fn seed_defaults(self, table: &mut PropertyTable) {
        const SRC: PropertySource = PropertySource::CodeDefault;
        const ALL: PropertyState = PropertyState::All;

        table.set(&props::ANCHOR, Anchor::Center, SRC, ALL);
        table.set(&props::DOCK, Dock::None, SRC, ALL);

        match self {
            WidgetKind::Generic => {}
            WidgetKind::Box => {
                table.set(&props::BACKGROUND_COLOR, Color::from_rgb_u8(30, 30, 30), SRC, ALL);
            }
            WidgetKind::Button => {
                table.set(&props::WIDTH, 120.0, SRC, ALL);
                table.set(&props::HEIGHT, 32.0, SRC, ALL);
                table.set(&props::BACKGROUND_COLOR, Color::from_rgb_u8(60, 120, 200), SRC, ALL);
                table.set(
                    &props::BACKGROUND_COLOR,
                    Color::from_rgb_u8(80, 140, 220),
                    SRC,
                    PropertyState::Highlighted,
                );
                table.set(
                    &props::BACKGROUND_COLOR,
                    Color::from_rgb_u8(40, 90, 160),
                    SRC,
                    PropertyState::Pressed,
                );
                table.set(
                    &props::BACKGROUND_COLOR,
                    Color::from_rgb_u8(100, 100, 100),
                    SRC,
                    PropertyState::Disabled,
                );
            }
            WidgetKind::Label => {
                table.set(&props::TEXT_COLOR, Color::WHITE, SRC, ALL);
                table.set(&props::FONT_SIZE, 16.0, SRC, ALL);
            }
            WidgetKind::Container => {
                table.set(&props::BACKGROUND_COLOR, Color::from_rgb_u8(40, 40, 40), SRC, ALL);
                table.set(&props::CAPACITY, 8, SRC, ALL);
            }
            WidgetKind::Item => {
                table.set(&props::WIDTH, 48.0, SRC, ALL);
                table.set(&props::HEIGHT, 48.0, SRC, ALL);
            }
            WidgetKind::ProgressBar => {
                table.set(&props::WIDTH, 200.0, SRC, ALL);
                table.set(&props::HEIGHT, 16.0, SRC, ALL);
                table.set(&props::PROGRESS, 0.0, SRC, ALL);
                table.set(&props::BACKGROUND_COLOR, Color::from_rgb_u8(30, 30, 30), SRC, ALL);
                table.set(&props::FILL_COLOR, Color::from_rgb_u8(80, 200, 120), SRC, ALL);
            }
            WidgetKind::Sprite => {
                table.set(&props::BACKGROUND_COLOR, Color::WHITE, SRC, ALL);
            }
            WidgetKind::TextField => {
                table.set(&props::WIDTH, 200.0, SRC, ALL);
                table.set(&props::HEIGHT, 28.0, SRC, ALL);
                table.set(&props::TEXT, String::new(), SRC, ALL);
                table.set(&props::TEXT_COLOR, Color::WHITE, SRC, ALL);
                table.set(&props::FONT_SIZE, 16.0, SRC, ALL);
                table.set(&props::BACKGROUND_COLOR, Color::from_rgb_u8(20, 20, 20), SRC, ALL);
                table.set(&props::MAX_LENGTH, 256, SRC, ALL);
            }
        }
    }
}

/// A node in the widget tree.
///
/// Nodes are created detached and owned by a [`UiTree`](crate::tree::UiTree)
/// once inserted. Structural changes, dirty propagation and state transitions
/// go through the tree, which can reach the node's relatives.
#[derive(Debug)]
pub struct WidgetNode {
    id: WidgetId,
    name: String,
    kind: WidgetKind,
    pub(crate) parent: Option<WidgetId>,
    pub(crate) children: Vec<WidgetId>,
    pub(crate) state: WidgetState,
    pub(crate) hidden: bool,
    pub(crate) dirty: DirtyFlags,
    pub(crate) properties: PropertyTable,
    pub(crate) size_cache: SizeCache,
    pub(crate) visual: Visual,
}

impl WidgetNode {
    /// Create a detached widget with its kind's default properties.
    pub fn new(kind: WidgetKind, name: impl Into<String>) -> Self {
        let mut properties = PropertyTable::new();
        kind.seed_defaults(&mut properties);

        Self {
            id: WidgetId::next(),
            name: name.into(),
            kind,
            parent: None,
            children: Vec::new(),
            state: WidgetState::Enabled,
            hidden: false,
            dirty: DirtyFlags::ALL,
            properties,
            size_cache: SizeCache::new(),
            visual: Visual::default(),
        }
    }

    /// Builder-style WidgetSpecific write for the `All` bucket.
    pub fn with<T: PropertyType>(mut self, key: &Property<T>, value: T) -> Self {
        self.set_property(key, value, PropertySource::WidgetSpecific, PropertyState::All);
        self
    }

    /// Builder-style WidgetSpecific write for one state bucket.
    pub fn with_state<T: PropertyType>(
        mut self,
        key: &Property<T>,
        value: T,
        state: PropertyState,
    ) -> Self {
        self.set_property(key, value, PropertySource::WidgetSpecific, state);
        self
    }

    /// Write a property on this node only.
    ///
    /// Prefer [`UiTree::set_property`](crate::tree::UiTree::set_property) once
    /// the node is in a tree; it also dirties descendants.
    pub fn set_property<T: PropertyType>(
        &mut self,
        key: &Property<T>,
        value: T,
        source: PropertySource,
        state: PropertyState,
    ) -> bool {
        let accepted = self.properties.set(key, value, source, state);
        if accepted {
            self.dirty = DirtyFlags::ALL;
            self.size_cache.invalidate();
        }
        accepted
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    pub fn properties(&self) -> &PropertyTable {
        &self.properties
    }

    /// Whether the size cache currently holds a value.
    pub fn has_cached_size(&self) -> bool {
        self.size_cache.is_valid()
    }

    /// Visual produced by the last refresh.
    pub fn visual(&self) -> &Visual {
        &self.visual
    }

    /// Resolve a property for the current state; `out` keeps its value on a miss.
    pub fn property<T: PropertyType>(&self, key: &Property<T>, out: &mut T) {
        self.properties.get(key, self.state, out);
    }

    pub fn try_property<T: PropertyType>(&self, key: &Property<T>) -> Option<T> {
        self.properties.try_get(key, self.state)
    }

    pub fn property_or<T: PropertyType>(&self, key: &Property<T>, default: T) -> T {
        let mut value = default;
        self.property(key, &mut value);
        value
    }

    pub fn anchor(&self) -> Anchor {
        self.property_or(&props::ANCHOR, Anchor::Center)
    }

    pub fn dock(&self) -> Dock {
        self.property_or(&props::DOCK, Dock::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_widget_is_dirty_and_enabled() {
        let node = WidgetNode::new(WidgetKind::Button, "ok");
        assert!(node.is_dirty());
        assert_eq!(node.state(), WidgetState::Enabled);
        assert_eq!(node.parent(), None);
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_button_defaults_resolve_per_state() {
        let mut node = WidgetNode::new(WidgetKind::Button, "ok");
        let enabled = node.try_property(&props::BACKGROUND_COLOR);
        node.state = WidgetState::Pressed;
        let pressed = node.try_property(&props::BACKGROUND_COLOR);
        assert!(enabled.is_some());
        assert_ne!(enabled, pressed);
    }

    #[test]
    fn test_builder_overrides_defaults() {
        let node = WidgetNode::new(WidgetKind::Button, "ok").with(&props::WIDTH, 300.0);
        assert_eq!(node.property_or(&props::WIDTH, 0.0), 300.0);
    }

    #[test]
    fn test_type_names_round_trip() {
        for kind in WidgetKind::ALL {
            assert_eq!(WidgetKind::from_type_name(kind.type_name()), Some(kind));
        }
        assert_eq!(WidgetKind::from_type_name("Slider"), None);
    }
}
