//! Named UI events and the sink they are published to.
//!
//! The engine only produces and consumes event names; dispatching them to
//! listeners is up to whatever implements [`EventSink`].

use crate::widget_id::WidgetId;
use indexmap::IndexMap;
use std::borrow::Cow;

/// Event names emitted by the engine.
pub mod names {
    pub const ON_HIGHLIGHT: &str = "OnHighlight";
    pub const ON_PRESSED: &str = "OnPressed";
    pub const ON_RELEASED: &str = "OnReleased";
    pub const ON_SELECTED: &str = "OnSelected";
    pub const PLAY_UI_SOUND: &str = "PlayUISound";
    pub const ON_ITEM_PICKUP: &str = "OnItemPickup";
    pub const ON_ITEM_DROP: &str = "OnItemDrop";
    pub const ON_TEXT_CHANGED: &str = "OnTextChanged";
}

/// A value in an event's parameter bag.
#[derive(Debug, Clone, PartialEq)]
pub enum EventParam {
    Text(String),
    Float(f32),
    Int(i64),
    Bool(bool),
    Widget(WidgetId),
}

impl From<&str> for EventParam {
    fn from(value: &str) -> Self {
        EventParam::Text(value.to_string())
    }
}

impl From<String> for EventParam {
    fn from(value: String) -> Self {
        EventParam::Text(value)
    }
}

impl From<f32> for EventParam {
    fn from(value: f32) -> Self {
        EventParam::Float(value)
    }
}

impl From<i64> for EventParam {
    fn from(value: i64) -> Self {
        EventParam::Int(value)
    }
}

impl From<bool> for EventParam {
    fn from(value: bool) -> Self {
        EventParam::Bool(value)
    }
}

impl From<WidgetId> for EventParam {
    fn from(value: WidgetId) -> Self {
        EventParam::Widget(value)
    }
}

/// Ordered named parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventParams(IndexMap<Cow<'static, str>, EventParam>);

impl EventParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<Cow<'static, str>>, value: impl Into<EventParam>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&EventParam> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EventParam)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiEvent {
    pub name: Cow<'static, str>,
    /// Widget the event originated from.
    pub source: WidgetId,
    pub params: EventParams,
}

impl UiEvent {
    pub fn new(name: impl Into<Cow<'static, str>>, source: WidgetId) -> Self {
        Self {
            name: name.into(),
            source,
            params: EventParams::new(),
        }
    }

    /// Builder-style parameter insert.
    pub fn with(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<EventParam>) -> Self {
        self.params.insert(name, value);
        self
    }

    pub fn param(&self, name: &str) -> Option<&EventParam> {
        self.params.get(name)
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

/// Receiver of engine events.
pub trait EventSink {
    fn publish(&mut self, event: UiEvent);
}

impl EventSink for Vec<UiEvent> {
    fn publish(&mut self, event: UiEvent) {
        self.push(event);
    }
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&mut self, _event: UiEvent) {}
}

/// Per-frame event buffer.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<UiEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all queued events, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = UiEvent> + '_ {
        self.events.drain(..)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UiEvent> {
        self.events.iter()
    }

    /// Number of queued events called `name`.
    pub fn count_named(&self, name: &str) -> usize {
        self.events.iter().filter(|e| e.is(name)).count()
    }

    pub fn last_named(&self, name: &str) -> Option<&UiEvent> {
        self.events.iter().rev().find(|e| e.is(name))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for EventQueue {
    fn publish(&mut self, event: UiEvent) {
        tracing::trace!("Event {} from {}", event.name, event.source);
        self.events.push(event);
    }
}
