//! Trellis UI - retained-mode widget, property and anchor layout engine
//!
//! This crate keeps a tree of widgets and resolves, once per frame:
//! - where each widget sits, from anchor and dock rules
//! - what it looks like, from a per-state property table with source priority
//! - how it reacts to the cursor, through a small interaction state machine
//!
//! Drawing, raw input and event dispatch stay outside: the engine hands draw
//! calls to a [`UiRenderer`], reads an [`InputSnapshot`](trellis_input::InputSnapshot)
//! and publishes named [`UiEvent`]s to an [`EventSink`].
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis_ui::{DrawList, EventQueue, UiConfig, UiManager};
//! use trellis_ui::markup::Element;
//! use trellis_input::InputSnapshot;
//! use trellis_core::math::Vec2;
//!
//! let mut ui = UiManager::new(UiConfig::default());
//! let panel = Element::new("Box")
//!     .with_child(Element::property("Dock", "left"))
//!     .with_child(Element::property("Width", "200"))
//!     .with_child(Element::new("Button").with_attr("name", "play"));
//! ui.load_markup(&panel).unwrap();
//!
//! let mut events = EventQueue::new();
//! let mut draw_list = DrawList::new();
//!
//! // Once per frame:
//! ui.update(&InputSnapshot::at(Vec2::new(100.0, 300.0)), &mut events);
//! ui.render(&mut draw_list);
//! ```

pub mod config;
pub mod dirty;
pub mod draw_list;
pub mod error;
pub mod event;
#[cfg(feature = "inventory")]
pub mod inventory;
pub mod layout;
pub mod manager;
pub mod markup;
pub mod property;
pub mod registry;
pub mod skin;
pub mod text_field;
pub mod tree;
pub mod visual;
pub mod widget;
pub mod widget_id;

pub use config::UiConfig;
pub use dirty::DirtyFlags;
pub use draw_list::{DrawCall, DrawCommand, DrawList, UiRenderer};
pub use error::{UiError, UiResult};
pub use event::{EventParam, EventParams, EventQueue, EventSink, NullSink, UiEvent};
#[cfg(feature = "inventory")]
pub use inventory::HeldItem;
pub use layout::{Anchor, Dock, SizeCache};
pub use manager::UiManager;
pub use markup::{Element, MarkupError, MarkupNode};
pub use property::{
    Property, PropertyKind, PropertySource, PropertyState, PropertyTable, PropertyValue, props,
};
pub use registry::{WidgetFactory, WidgetRegistry, register_builtin_widget_types};
pub use skin::Skin;
pub use tree::UiTree;
pub use visual::{Mesh, Uniform, Visual, WorldTransform};
pub use widget::{WidgetKind, WidgetNode, WidgetState};
pub use widget_id::{TypeNameHash, WidgetId};
