//! Skins: named sets of per-widget-type property overrides.
//!
//! A skin is applied with [`PropertySource::Skin`], so it replaces the values a
//! widget type seeds by default but never a value set on the widget itself.
//!
//! # Example
//!
//! ```
//! use trellis_ui::property::{PropertyState, props};
//! use trellis_ui::skin::Skin;
//! use trellis_core::color::Color;
//!
//! let skin = Skin::new("alert")
//!     .with("Button", &props::BACKGROUND_COLOR, Color::RED, PropertyState::All)
//!     .with("Button", &props::SOUND, "click_alert".to_string(), PropertyState::Pressed);
//! assert_eq!(skin.rules_for("Button").len(), 2);
//! ```

use crate::markup::{MarkupError, MarkupNode, PropertyTag};
use crate::property::{Property, PropertySource, PropertyState, PropertyType, PropertyValue, props};
use crate::registry::WidgetRegistry;
use crate::tree::UiTree;
use crate::widget::WidgetKind;
use crate::widget_id::WidgetId;
use indexmap::IndexMap;
use trellis_core::color::Color;
use trellis_core::profiling::profile_function;

/// One override: a property value for a state bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinEntry {
    pub property: String,
    pub value: PropertyValue,
    pub state: PropertyState,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skin {
    name: String,
    /// Widget type name to its overrides, in declaration order.
    rules: IndexMap<String, Vec<SkinEntry>>,
}

impl Skin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_value(
        &mut self,
        widget_type: &str,
        property: &str,
        value: PropertyValue,
        state: PropertyState,
    ) {
        self.rules
            .entry(widget_type.to_string())
            .or_default()
            .push(SkinEntry {
                property: property.to_string(),
                value,
                state,
            });
    }

    pub fn set<T: PropertyType>(
        &mut self,
        widget_type: &str,
        key: &Property<T>,
        value: T,
        state: PropertyState,
    ) {
        self.set_value(widget_type, key.name(), value.into_value(), state);
    }

    /// Builder-style [`Skin::set`].
    pub fn with<T: PropertyType>(
        mut self,
        widget_type: &str,
        key: &Property<T>,
        value: T,
        state: PropertyState,
    ) -> Self {
        self.set(widget_type, key, value, state);
        self
    }

    /// Overrides for a widget type name, empty when the skin has none.
    pub fn rules_for(&self, widget_type: &str) -> &[SkinEntry] {
        self.rules
            .get(widget_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of overrides.
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read a skin document:
    ///
    /// ```text
    /// <Skin name="dark">
    ///     <Button>
    ///         <BackgroundColor value="#aabbcc" state="highlighted"/>
    ///     </Button>
    /// </Skin>
    /// ```
    ///
    /// Every property tag must be valid; the first bad one is returned.
    pub fn from_markup(node: &dyn MarkupNode, registry: &WidgetRegistry) -> Result<Self, MarkupError> {
        let mut skin = Skin::new(node.attribute_or("name", "skin"));
        for index in 0..node.child_count() {
            let Some(widget) = node.child(index) else {
                continue;
            };
            if !registry.contains(widget.name()) {
                tracing::debug!("Skin '{}': no widget type <{}>", skin.name, widget.name());
            }
            for property_index in 0..widget.child_count() {
                let Some(property) = widget.child(property_index) else {
                    continue;
                };
                let tag = PropertyTag::read(property, registry)?;
                skin.set_value(widget.name(), &tag.name, tag.value, tag.state);
            }
        }
        Ok(skin)
    }

    /// Built-in dark skin.
    pub fn dark() -> Self {
        const ALL: PropertyState = PropertyState::All;
        let button = WidgetKind::Button.type_name();

        Skin::new("dark")
            .with(WidgetKind::Box.type_name(), &props::BACKGROUND_COLOR, Color::from_rgb_u8(24, 24, 28), ALL)
            .with(
                WidgetKind::Container.type_name(),
                &props::BACKGROUND_COLOR,
                Color::from_rgb_u8(32, 32, 38),
                ALL,
            )
            .with(button, &props::BACKGROUND_COLOR, Color::from_rgb_u8(48, 48, 56), ALL)
            .with(
                button,
                &props::BACKGROUND_COLOR,
                Color::from_rgb_u8(64, 64, 76),
                PropertyState::Highlighted,
            )
            .with(
                button,
                &props::BACKGROUND_COLOR,
                Color::from_rgb_u8(36, 36, 44),
                PropertyState::Pressed,
            )
            .with(
                button,
                &props::BACKGROUND_COLOR,
                Color::from_rgb_u8(40, 40, 40),
                PropertyState::Disabled,
            )
            .with(WidgetKind::Label.type_name(), &props::TEXT_COLOR, Color::from_rgb_u8(220, 220, 220), ALL)
            .with(
                WidgetKind::TextField.type_name(),
                &props::BACKGROUND_COLOR,
                Color::from_rgb_u8(16, 16, 20),
                ALL,
            )
    }
}

impl UiTree {
    /// Apply `skin` to `id` and its descendants. Returns how many writes were accepted.
    pub fn apply_skin(&mut self, id: WidgetId, skin: &Skin) -> usize {
        profile_function!();
        let mut targets = vec![id];
        targets.extend(self.descendants(id));

        let mut accepted = 0;
        for target in targets {
            let Some(kind) = self.get(target).map(|n| n.kind()) else {
                continue;
            };
            for entry in skin.rules_for(kind.type_name()) {
                if self.set_property_value(
                    target,
                    &entry.property,
                    entry.value.clone(),
                    PropertySource::Skin,
                    entry.state,
                ) {
                    accepted += 1;
                }
            }
        }
        tracing::debug!("Skin '{}' applied {} value(s) under {}", skin.name(), accepted, id);
        accepted
    }
}
