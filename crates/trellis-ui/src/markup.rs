//! Building widget trees from markup.
//!
//! Parsing a document is someone else's job. The loader only needs the
//! abstract node shape exposed by [`MarkupNode`]: a tag, attributes and
//! ordered children. [`Element`] is an owned implementation of it.
//!
//! Under a widget tag, a child tag is either another widget type known to the
//! [`WidgetRegistry`] or a property name known to its schema:
//!
//! ```text
//! <Button name="ok">
//!     <Dock value="bottom"/>
//!     <BackgroundColor value="#3c78c8"/>
//!     <BackgroundColor value="#5090dc" state="highlighted"/>
//!     <Label><Text value="OK"/></Label>
//! </Button>
//! ```

use crate::error::{UiError, UiResult};
use crate::layout::{Anchor, Dock};
use crate::property::{PropertyKind, PropertySource, PropertyState, PropertyValue, props};
use crate::registry::WidgetRegistry;
use crate::tree::UiTree;
use crate::widget_id::WidgetId;
use std::fmt;
use trellis_core::color::Color;
use trellis_core::math::Vec2;
use trellis_core::profiling::profile_function;

/// A node of a parsed markup document.
pub trait MarkupNode {
    /// Tag name.
    fn name(&self) -> &str;

    fn child_count(&self) -> usize;

    fn child(&self, index: usize) -> Option<&dyn MarkupNode>;

    /// Raw attribute text.
    fn attribute(&self, name: &str) -> Option<&str>;

    fn attribute_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.attribute(name).unwrap_or(default)
    }

    fn attribute_f32(&self, name: &str, default: f32) -> f32 {
        self.attribute(name)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn attribute_bool(&self, name: &str, default: bool) -> bool {
        self.attribute(name).and_then(parse_bool).unwrap_or(default)
    }

    fn attribute_vec2(&self, name: &str, default: Vec2) -> Vec2 {
        self.attribute(name).and_then(parse_vec2).unwrap_or(default)
    }

    fn attribute_color(&self, name: &str, default: Color) -> Color {
        self.attribute(name).and_then(Color::parse).unwrap_or(default)
    }
}

/// Owned markup node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Shorthand for a property tag: `<name value="..."/>`.
    pub fn property(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name).with_attr("value", value)
    }
}

impl MarkupNode for Element {
    fn name(&self) -> &str {
        &self.name
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child(&self, index: usize) -> Option<&dyn MarkupNode> {
        self.children.get(index).map(|c| c as &dyn MarkupNode)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Errors produced while interpreting property tags.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupError {
    /// The value text does not parse as the property's declared kind.
    InvalidValue {
        property: String,
        value: String,
        expected: PropertyKind,
    },
    /// A property tag without a `value` attribute.
    MissingValue { property: String },
    /// A `state` attribute that names no property state.
    InvalidState(String),
    /// A property name the registry has no kind for.
    UnknownProperty(String),
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkupError::InvalidValue {
                property,
                value,
                expected,
            } => write!(f, "'{}' is not a valid {} for {}", value, expected, property),
            MarkupError::MissingValue { property } => {
                write!(f, "Property {} has no value attribute", property)
            }
            MarkupError::InvalidState(state) => write!(f, "Unknown property state: {}", state),
            MarkupError::UnknownProperty(name) => write!(f, "Unknown property: {}", name),
        }
    }
}

impl std::error::Error for MarkupError {}

fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") || text == "1" {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") || text == "0" {
        Some(false)
    } else {
        None
    }
}

/// `"x,y"` or `"x y"`.
fn parse_vec2(text: &str) -> Option<Vec2> {
    let mut parts = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty());
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Vec2::new(x, y))
}

/// Parse markup text into a value of the given kind.
pub fn parse_value(kind: PropertyKind, text: &str) -> Option<PropertyValue> {
    match kind {
        PropertyKind::Float => text.trim().parse().ok().map(PropertyValue::Float),
        PropertyKind::Int => text.trim().parse().ok().map(PropertyValue::Int),
        PropertyKind::Bool => parse_bool(text).map(PropertyValue::Bool),
        PropertyKind::Vec2 => parse_vec2(text).map(PropertyValue::Vec2),
        PropertyKind::Color => Color::parse(text).map(PropertyValue::Color),
        PropertyKind::Text => Some(PropertyValue::Text(text.to_string())),
        PropertyKind::Anchor => Anchor::parse(text).map(PropertyValue::Anchor),
        PropertyKind::Dock => Dock::parse(text).map(PropertyValue::Dock),
    }
}

/// A property tag resolved against the registry schema.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PropertyTag {
    pub name: String,
    pub value: PropertyValue,
    pub state: PropertyState,
}

impl PropertyTag {
    pub(crate) fn read(node: &dyn MarkupNode, registry: &WidgetRegistry) -> Result<Self, MarkupError> {
        let name = node.name();
        let kind = registry
            .property_kind(name)
            .ok_or_else(|| MarkupError::UnknownProperty(name.to_string()))?;
        let text = node
            .attribute("value")
            .ok_or_else(|| MarkupError::MissingValue {
                property: name.to_string(),
            })?;
        let state = match node.attribute("state") {
            Some(state) => {
                PropertyState::parse(state).ok_or_else(|| MarkupError::InvalidState(state.to_string()))?
            }
            None => PropertyState::All,
        };
        let value = parse_value(kind, text).ok_or_else(|| MarkupError::InvalidValue {
            property: name.to_string(),
            value: text.to_string(),
            expected: kind,
        })?;

        Ok(Self {
            name: name.to_string(),
            value,
            state,
        })
    }
}

impl UiTree {
    /// Instantiate `node` and its subtree under `parent`.
    ///
    /// An unknown widget tag yields `Ok(None)` and nothing is created. Unknown
    /// child tags are skipped, malformed property values are logged and skipped.
    pub fn load_markup(
        &mut self,
        parent: WidgetId,
        node: &dyn MarkupNode,
        registry: &WidgetRegistry,
    ) -> UiResult<Option<WidgetId>> {
        profile_function!();
        let Some(widget) = registry.create_from_name(node.name(), node) else {
            tracing::debug!("Skipping unknown widget tag <{}>", node.name());
            return Ok(None);
        };
        let id = self.spawn(parent, widget)?;
        self.load_children(id, node, registry, false)?;
        Ok(Some(id))
    }

    /// Like [`UiTree::load_markup`], but unknown tags and malformed values are
    /// errors. Nothing is left attached when loading fails.
    pub fn load_markup_strict(
        &mut self,
        parent: WidgetId,
        node: &dyn MarkupNode,
        registry: &WidgetRegistry,
    ) -> UiResult<WidgetId> {
        let widget = registry
            .create_from_name(node.name(), node)
            .ok_or_else(|| UiError::UnknownWidgetType(node.name().to_string()))?;
        let id = self.spawn(parent, widget)?;
        if let Err(err) = self.load_children(id, node, registry, true) {
            self.destroy(id)?;
            return Err(err);
        }
        Ok(id)
    }

    fn load_children(
        &mut self,
        id: WidgetId,
        node: &dyn MarkupNode,
        registry: &WidgetRegistry,
        strict: bool,
    ) -> UiResult<()> {
        for index in 0..node.child_count() {
            let Some(child) = node.child(index) else {
                continue;
            };
            let tag = child.name();

            if registry.contains(tag) {
                if strict {
                    self.load_markup_strict(id, child, registry)?;
                } else {
                    self.load_markup(id, child, registry)?;
                }
            } else if registry.property_kind(tag).is_some() {
                if tag == props::HIDDEN.name() {
                    let hidden = child.attribute("value").is_some_and(|v| v.trim() != "false");
                    self.set_hidden(id, hidden);
                }
                match PropertyTag::read(child, registry) {
                    Ok(property) => {
                        self.set_property_value(
                            id,
                            &property.name,
                            property.value,
                            PropertySource::WidgetSpecific,
                            property.state,
                        );
                    }
                    Err(err) if strict => return Err(err.into()),
                    Err(err) => tracing::warn!("Skipping <{}> on {}: {}", tag, id, err),
                }
            } else if strict {
                return Err(UiError::UnknownWidgetType(tag.to_string()));
            } else {
                tracing::debug!("Skipping unknown tag <{}> under {}", tag, id);
            }
        }
        Ok(())
    }
}
