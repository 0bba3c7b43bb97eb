//! Widget type registry.
//!
//! Maps a widget type name to the factory building it from a markup node, so
//! the loader never needs a central match over tags. The registry also holds
//! the property schema (name to [`PropertyKind`]) used to parse markup values.
//!
//! Registration is explicit: call [`register_builtin_widget_types`] (or
//! [`WidgetRegistry::with_builtins`]) once at startup before loading markup,
//! then add game-specific types and properties on top.

use crate::markup::MarkupNode;
use crate::property::{PropertyKind, props};
use crate::widget::{WidgetKind, WidgetNode};
use crate::widget_id::TypeNameHash;
use trellis_core::alloc::HashMap;

/// Builds a detached widget from its markup node. Property tags and child
/// widgets are applied by the loader afterwards.
pub type WidgetFactory = fn(&dyn MarkupNode) -> WidgetNode;

struct Registration {
    name: String,
    factory: WidgetFactory,
}

#[derive(Default)]
pub struct WidgetRegistry {
    factories: HashMap<TypeNameHash, Registration>,
    properties: HashMap<String, PropertyKind>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in widget type and property.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_builtin_widget_types(&mut registry);
        registry
    }

    /// Register `factory` under `type_name`, replacing any earlier registration.
    pub fn register(&mut self, type_name: &str, factory: WidgetFactory) {
        let registration = Registration {
            name: type_name.to_string(),
            factory,
        };
        if let Some(previous) = self.factories.insert(TypeNameHash::new(type_name), registration) {
            if previous.name != type_name {
                tracing::warn!(
                    "Widget type '{}' hashes like '{}' and replaced it",
                    type_name,
                    previous.name
                );
            } else {
                tracing::debug!("Widget type '{}' registered again", type_name);
            }
        }
    }

    /// Build a widget for `type_name`, or `None` when it is not registered.
    pub fn create_from_name(&self, type_name: &str, node: &dyn MarkupNode) -> Option<WidgetNode> {
        let registration = self.lookup(type_name)?;
        Some((registration.factory)(node))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.lookup(type_name).is_some()
    }

    fn lookup(&self, type_name: &str) -> Option<&Registration> {
        self.factories
            .get(&TypeNameHash::new(type_name))
            .filter(|registration| registration.name == type_name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.factories.values().map(|r| r.name.as_str())
    }

    /// Declare the value kind of a property name used in markup.
    pub fn register_property(&mut self, name: &str, kind: PropertyKind) {
        self.properties.insert(name.to_string(), kind);
    }

    pub fn property_kind(&self, name: &str) -> Option<PropertyKind> {
        self.properties.get(name).copied()
    }

    /// Number of registered widget types.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for WidgetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetRegistry")
            .field("types", &self.type_names().collect::<Vec<_>>())
            .field("properties", &self.properties.len())
            .finish()
    }
}

/// Display name of a widget built from `node`: its `name` attribute, else the tag.
fn display_name(node: &dyn MarkupNode) -> String {
    node.attribute("name").unwrap_or(node.name()).to_string()
}

macro_rules! builtin_factory {
    ($kind:expr) => {
        (|node: &dyn MarkupNode| WidgetNode::new($kind, display_name(node))) as WidgetFactory
    };
}

/// Register every built-in widget type and property name.
pub fn register_builtin_widget_types(registry: &mut WidgetRegistry) {
    let factories = [
        (WidgetKind::Generic, builtin_factory!(WidgetKind::Generic)),
        (WidgetKind::Box, builtin_factory!(WidgetKind::Box)),
        (WidgetKind::Button, builtin_factory!(WidgetKind::Button)),
        (WidgetKind::Label, builtin_factory!(WidgetKind::Label)),
        (WidgetKind::Container, builtin_factory!(WidgetKind::Container)),
        (WidgetKind::Item, builtin_factory!(WidgetKind::Item)),
        (WidgetKind::ProgressBar, builtin_factory!(WidgetKind::ProgressBar)),
        (WidgetKind::Sprite, builtin_factory!(WidgetKind::Sprite)),
        (WidgetKind::TextField, builtin_factory!(WidgetKind::TextField)),
    ];
    for (kind, factory) in factories {
        registry.register(kind.type_name(), factory);
    }

    let properties = [
        (props::ANCHOR.name(), PropertyKind::Anchor),
        (props::DOCK.name(), PropertyKind::Dock),
        (props::OFFSET.name(), PropertyKind::Vec2),
        (props::WIDTH.name(), PropertyKind::Float),
        (props::HEIGHT.name(), PropertyKind::Float),
        (props::BACKGROUND_COLOR.name(), PropertyKind::Color),
        (props::TEXT_COLOR.name(), PropertyKind::Color),
        (props::FILL_COLOR.name(), PropertyKind::Color),
        (props::TEXT.name(), PropertyKind::Text),
        (props::FONT_SIZE.name(), PropertyKind::Float),
        (props::TEXTURE.name(), PropertyKind::Text),
        (props::SOUND.name(), PropertyKind::Text),
        (props::HIDDEN.name(), PropertyKind::Bool),
        (props::PROGRESS.name(), PropertyKind::Float),
        (props::CAPACITY.name(), PropertyKind::Int),
        (props::MAX_LENGTH.name(), PropertyKind::Int),
    ];
    for (name, kind) in properties {
        registry.register_property(name, kind);
    }

    tracing::debug!(
        "Registered {} widget types and {} properties",
        registry.len(),
        registry.properties.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Element;

    #[test]
    fn test_builtins_cover_every_kind() {
        let registry = WidgetRegistry::with_builtins();
        assert_eq!(registry.len(), WidgetKind::ALL.len());
        for kind in WidgetKind::ALL {
            assert!(registry.contains(kind.type_name()));
        }
    }

    #[test]
    fn test_unknown_name_is_none() {
        let registry = WidgetRegistry::with_builtins();
        assert!(registry.create_from_name("Slider", &Element::new("Slider")).is_none());
    }

    #[test]
    fn test_factory_uses_name_attribute() {
        let registry = WidgetRegistry::with_builtins();
        let node = Element::new("Button").with_attr("name", "confirm");
        let widget = registry.create_from_name("Button", &node).unwrap();
        assert_eq!(widget.kind(), WidgetKind::Button);
        assert_eq!(widget.name(), "confirm");
    }

    #[test]
    fn test_custom_type_registration() {
        fn health_bar(node: &dyn MarkupNode) -> WidgetNode {
            WidgetNode::new(WidgetKind::ProgressBar, node.attribute_or("name", "health"))
                .with(&props::FILL_COLOR, trellis_core::color::Color::RED)
        }

        let mut registry = WidgetRegistry::new();
        registry.register("HealthBar", health_bar);
        let widget = registry
            .create_from_name("HealthBar", &Element::new("HealthBar"))
            .unwrap();
        assert_eq!(widget.name(), "health");
        assert_eq!(widget.kind(), WidgetKind::ProgressBar);
    }
}
