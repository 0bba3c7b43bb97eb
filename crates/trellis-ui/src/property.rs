//! Per-widget property storage with state buckets and source priority.
//!
//! Every widget owns one [`PropertyTable`]. A property is stored per
//! [`PropertyState`]: one bucket for each concrete [`WidgetState`] plus an
//! `All` bucket used as the fallback. Writes carry a [`PropertySource`] and are
//! only accepted when they are at least as authoritative as what is stored:
//!
//! ```text
//! CodeDefault < Skin < WidgetSpecific
//! ```
//!
//! # Example
//!
//! ```
//! use trellis_ui::property::{PropertySource, PropertyState, PropertyTable, props};
//! use trellis_ui::widget::WidgetState;
//!
//! let mut table = PropertyTable::new();
//! table.set(&props::WIDTH, 100.0, PropertySource::CodeDefault, PropertyState::All);
//! table.set(&props::WIDTH, 250.0, PropertySource::WidgetSpecific, PropertyState::All);
//! // A skin cannot downgrade a widget-specific value.
//! table.set(&props::WIDTH, 50.0, PropertySource::Skin, PropertyState::All);
//!
//! let mut width = 0.0;
//! table.get(&props::WIDTH, WidgetState::Enabled, &mut width);
//! assert_eq!(width, 250.0);
//! ```

use crate::layout::{Anchor, Dock};
use crate::widget::WidgetState;
use std::fmt;
use std::marker::PhantomData;
use trellis_core::alloc::HashMap;
use trellis_core::color::Color;
use trellis_core::math::Vec2;

/// Where a property value came from. Later variants win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertySource {
    /// Seeded by the widget type's constructor.
    CodeDefault,
    /// Applied from a [`Skin`](crate::skin::Skin).
    Skin,
    /// Set on this widget specifically (markup or code).
    WidgetSpecific,
}

/// The state bucket a property value is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyState {
    Disabled,
    Enabled,
    Highlighted,
    Pressed,
    /// Fallback bucket consulted when the current state has no entry.
    All,
}

impl PropertyState {
    const BUCKETS: usize = 5;

    fn bucket(self) -> usize {
        match self {
            PropertyState::Disabled => 0,
            PropertyState::Enabled => 1,
            PropertyState::Highlighted => 2,
            PropertyState::Pressed => 3,
            PropertyState::All => 4,
        }
    }

    /// Parse the markup spelling (`"enabled"`, `"disabled"`, `"highlighted"`,
    /// `"pressed"`, `"all"`), ignoring ASCII case.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        [
            ("disabled", PropertyState::Disabled),
            ("enabled", PropertyState::Enabled),
            ("highlighted", PropertyState::Highlighted),
            ("pressed", PropertyState::Pressed),
            ("all", PropertyState::All),
        ]
        .into_iter()
        .find(|(name, _)| text.eq_ignore_ascii_case(name))
        .map(|(_, state)| state)
    }
}

impl From<WidgetState> for PropertyState {
    fn from(state: WidgetState) -> Self {
        match state {
            WidgetState::Disabled => PropertyState::Disabled,
            WidgetState::Enabled => PropertyState::Enabled,
            WidgetState::Highlighted => PropertyState::Highlighted,
            WidgetState::Pressed => PropertyState::Pressed,
        }
    }
}

/// The type a property is declared with. Used to parse markup values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Float,
    Int,
    Bool,
    Vec2,
    Color,
    Text,
    Anchor,
    Dock,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PropertyKind::Float => "float",
            PropertyKind::Int => "int",
            PropertyKind::Bool => "bool",
            PropertyKind::Vec2 => "vector2",
            PropertyKind::Color => "color",
            PropertyKind::Text => "string",
            PropertyKind::Anchor => "anchor",
            PropertyKind::Dock => "dock",
        };
        f.write_str(name)
    }
}

/// A stored property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Float(f32),
    Int(i32),
    Bool(bool),
    Vec2(Vec2),
    Color(Color),
    Text(String),
    Anchor(Anchor),
    Dock(Dock),
}

impl PropertyValue {
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Float(_) => PropertyKind::Float,
            PropertyValue::Int(_) => PropertyKind::Int,
            PropertyValue::Bool(_) => PropertyKind::Bool,
            PropertyValue::Vec2(_) => PropertyKind::Vec2,
            PropertyValue::Color(_) => PropertyKind::Color,
            PropertyValue::Text(_) => PropertyKind::Text,
            PropertyValue::Anchor(_) => PropertyKind::Anchor,
            PropertyValue::Dock(_) => PropertyKind::Dock,
        }
    }
}

/// Rust types that can be stored in a [`PropertyTable`].
pub trait PropertyType: Sized {
    const KIND: PropertyKind;

    fn into_value(self) -> PropertyValue;

    fn from_value(value: &PropertyValue) -> Option<Self>;
}

macro_rules! impl_property_type {
    ($ty:ty, $variant:ident) => {
        impl PropertyType for $ty {
            const KIND: PropertyKind = PropertyKind::$variant;

            fn into_value(self) -> PropertyValue {
                PropertyValue::$variant(self)
            }

            fn from_value(value: &PropertyValue) -> Option<Self> {
                match value {
                    PropertyValue::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

impl_property_type!(f32, Float);
impl_property_type!(i32, Int);
impl_property_type!(bool, Bool);
impl_property_type!(Vec2, Vec2);
impl_property_type!(Color, Color);
impl_property_type!(String, Text);
impl_property_type!(Anchor, Anchor);
impl_property_type!(Dock, Dock);

/// A typed property key.
///
/// Reading and writing through the same key always agrees on the value type.
pub struct Property<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Property<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Property<T> {}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Property({})", self.name)
    }
}

/// Built-in property keys.
pub mod props {
    use super::Property;
    use crate::layout::{Anchor, Dock};
    use trellis_core::color::Color;
    use trellis_core::math::Vec2;

    pub const ANCHOR: Property<Anchor> = Property::new("Anchor");
    pub const DOCK: Property<Dock> = Property::new("Dock");
    pub const OFFSET: Property<Vec2> = Property::new("Offset");
    pub const WIDTH: Property<f32> = Property::new("Width");
    pub const HEIGHT: Property<f32> = Property::new("Height");
    pub const BACKGROUND_COLOR: Property<Color> = Property::new("BackgroundColor");
    pub const TEXT_COLOR: Property<Color> = Property::new("TextColor");
    pub const FILL_COLOR: Property<Color> = Property::new("FillColor");
    pub const TEXT: Property<String> = Property::new("Text");
    pub const FONT_SIZE: Property<f32> = Property::new("FontSize");
    pub const TEXTURE: Property<String> = Property::new("Texture");
    pub const SOUND: Property<String> = Property::new("Sound");
    pub const HIDDEN: Property<bool> = Property::new("Hidden");
    pub const PROGRESS: Property<f32> = Property::new("Progress");
    pub const CAPACITY: Property<i32> = Property::new("Capacity");
    pub const MAX_LENGTH: Property<i32> = Property::new("MaxLength");

    /// Properties whose change moves or resizes a widget.
    pub const LAYOUT: [&str; 5] = [
        ANCHOR.name(),
        DOCK.name(),
        OFFSET.name(),
        WIDTH.name(),
        HEIGHT.name(),
    ];

    pub(crate) fn is_layout(name: &str) -> bool {
        LAYOUT.contains(&name)
    }
}

/// One stored value together with the source that wrote it.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEntry {
    pub value: PropertyValue,
    pub source: PropertySource,
}

/// Per-widget property storage.
#[derive(Debug, Clone, Default)]
pub struct PropertyTable {
    buckets: [HashMap<String, PropertyEntry>; PropertyState::BUCKETS],
}

impl PropertyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `(name, state)` if `source` is at least as strong as
    /// the stored entry's source. Returns whether the write was accepted.
    pub fn set_value(
        &mut self,
        name: &str,
        value: PropertyValue,
        source: PropertySource,
        state: PropertyState,
    ) -> bool {
        let bucket = &mut self.buckets[state.bucket()];
        match bucket.get_mut(name) {
            Some(existing) if source < existing.source => {
                tracing::debug!(
                    "Ignoring {:?} write to '{}' ({:?}): {:?} already set",
                    source,
                    name,
                    state,
                    existing.source
                );
                false
            }
            Some(existing) => {
                *existing = PropertyEntry { value, source };
                true
            }
            None => {
                bucket.insert(name.to_string(), PropertyEntry { value, source });
                true
            }
        }
    }

    /// Typed variant of [`PropertyTable::set_value`].
    pub fn set<T: PropertyType>(
        &mut self,
        key: &Property<T>,
        value: T,
        source: PropertySource,
        state: PropertyState,
    ) -> bool {
        self.set_value(key.name(), value.into_value(), source, state)
    }

    /// Value visible to a widget in `state`: the state's own bucket first, then `All`.
    pub fn get_value(&self, name: &str, state: WidgetState) -> Option<&PropertyValue> {
        self.buckets[PropertyState::from(state).bucket()]
            .get(name)
            .or_else(|| self.buckets[PropertyState::All.bucket()].get(name))
            .map(|entry| &entry.value)
    }

    /// Overwrite `out` with the value visible in `state`. Leaves `out`
    /// untouched when nothing is stored.
    pub fn get<T: PropertyType>(&self, key: &Property<T>, state: WidgetState, out: &mut T) {
        if let Some(value) = self.try_get(key, state) {
            *out = value;
        }
    }

    /// Strict lookup with the same order as [`PropertyTable::get`].
    pub fn try_get<T: PropertyType>(&self, key: &Property<T>, state: WidgetState) -> Option<T> {
        let value = self.get_value(key.name(), state)?;
        let typed = T::from_value(value);
        if typed.is_none() {
            tracing::warn!(
                "Property '{}' holds a {} but was read as {}",
                key.name(),
                value.kind(),
                T::KIND
            );
        }
        typed
    }

    /// The entry stored in exactly this bucket, without fallback.
    pub fn entry(&self, name: &str, state: PropertyState) -> Option<&PropertyEntry> {
        self.buckets[state.bucket()].get(name)
    }

    /// Total number of stored entries across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|b| b.is_empty())
    }
}
