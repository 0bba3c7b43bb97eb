//! Per-frame UI driver.
//!
//! [`UiManager`] owns the widget tree and the registry used to load markup,
//! and turns one frame of input into highlight, press, release and selection
//! changes:
//!
//! 1. refresh dirty visuals,
//! 2. hit-test the cursor and move the highlight (suspended while an item is held),
//! 3. on a press edge, press and select the highlighted widget,
//! 4. on a release edge, release it,
//! 5. route typed text to a selected text field.
//!
//! Input and event delivery are passed in per call; the manager holds no
//! references to the outside world.

use crate::config::UiConfig;
use crate::draw_list::UiRenderer;
use crate::error::UiResult;
use crate::event::{EventSink, UiEvent, names};
#[cfg(feature = "inventory")]
use crate::inventory::HeldItem;
use crate::markup::MarkupNode;
use crate::registry::WidgetRegistry;
use crate::skin::Skin;
use crate::tree::UiTree;
use crate::widget_id::WidgetId;
use trellis_core::geometry::Size;
use trellis_core::math::Vec2;
use trellis_core::profiling::profile_function;
use trellis_input::InputSnapshot;

pub struct UiManager {
    config: UiConfig,
    pub(crate) tree: UiTree,
    registry: WidgetRegistry,
    pub(crate) highlighted: Option<WidgetId>,
    selected: Option<WidgetId>,
    #[cfg(feature = "inventory")]
    pub(crate) held: Option<HeldItem>,
    pub(crate) cursor: Vec2,
}

impl UiManager {
    /// Create a manager with the built-in widget types registered.
    pub fn new(config: UiConfig) -> Self {
        Self::with_registry(config, WidgetRegistry::with_builtins())
    }

    pub fn with_registry(config: UiConfig, registry: WidgetRegistry) -> Self {
        let mut tree = UiTree::with_root_size(config.viewport);
        tree.set_sounds_enabled(config.ui_sounds);
        tracing::debug!(
            "UI manager created ({}x{}, {} widget types)",
            config.viewport.width,
            config.viewport.height,
            registry.len()
        );

        Self {
            config,
            tree,
            registry,
            highlighted: None,
            selected: None,
            #[cfg(feature = "inventory")]
            held: None,
            cursor: Vec2::ZERO,
        }
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn tree(&self) -> &UiTree {
        &self.tree
    }

    /// Mutable tree access. Use [`UiManager::destroy_widget`] rather than
    /// destroying through the tree so references held here are cleared.
    pub fn tree_mut(&mut self) -> &mut UiTree {
        &mut self.tree
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut WidgetRegistry {
        &mut self.registry
    }

    pub fn root(&self) -> WidgetId {
        self.tree.root()
    }

    pub fn highlighted(&self) -> Option<WidgetId> {
        self.highlighted
    }

    pub fn selected(&self) -> Option<WidgetId> {
        self.selected
    }

    /// Cursor position seen by the last update.
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Resize the root widget.
    pub fn set_viewport(&mut self, size: Size<f32>) {
        self.config.viewport = size;
        self.tree.set_root_size(size);
    }

    /// Load a markup document under the root.
    pub fn load_markup(&mut self, node: &dyn MarkupNode) -> UiResult<Option<WidgetId>> {
        let root = self.tree.root();
        self.tree.load_markup(root, node, &self.registry)
    }

    /// Apply a skin to the whole tree.
    pub fn apply_skin(&mut self, skin: &Skin) -> usize {
        let root = self.tree.root();
        self.tree.apply_skin(root, skin)
    }

    /// Make `id` the selected widget, publishing `OnSelected` when it changes.
    pub fn select(&mut self, id: WidgetId, events: &mut dyn EventSink) {
        if self.selected == Some(id) || !self.tree.contains(id) {
            return;
        }
        self.selected = Some(id);
        events.publish(UiEvent::new(names::ON_SELECTED, id));
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Destroy a widget and its subtree, forgetting any highlight, selection or
    /// held item inside it. The root cannot be destroyed.
    pub fn destroy_widget(&mut self, id: WidgetId) -> UiResult<Vec<WidgetId>> {
        let removed = self.tree.destroy(id)?;
        let gone = |slot: Option<WidgetId>| slot.is_some_and(|w| removed.contains(&w));

        if gone(self.highlighted) {
            self.highlighted = None;
        }
        if gone(self.selected) {
            self.selected = None;
        }
        #[cfg(feature = "inventory")]
        if gone(self.held.map(|h| h.item)) {
            self.held = None;
        }
        Ok(removed)
    }

    #[cfg(feature = "inventory")]
    fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    #[cfg(not(feature = "inventory"))]
    fn is_holding(&self) -> bool {
        false
    }

    /// Advance one frame.
    pub fn update(&mut self, input: &InputSnapshot, events: &mut dyn EventSink) {
        profile_function!();
        self.cursor = input.cursor;

        #[cfg(feature = "inventory")]
        self.track_held_item();

        self.tree.update();

        if !self.is_holding() {
            self.update_highlight(events);
        }
        if input.just_pressed() {
            self.handle_press(events);
        }
        if input.just_released() {
            if let Some(id) = self.highlighted {
                self.tree.release(id, events);
            }
        }
        if let Some(id) = self.selected.filter(|_| !input.typed.is_empty()) {
            self.tree.text_field_input(id, &input.typed, events);
        }
    }

    fn update_highlight(&mut self, events: &mut dyn EventSink) {
        let hit = self.tree.find_widget_under_position(self.cursor);
        if hit == self.highlighted {
            return;
        }
        if let Some(previous) = self.highlighted.take() {
            self.tree.unhighlight(previous, events);
        }
        if let Some(id) = hit {
            self.tree.highlight(id, events);
        }
        self.highlighted = hit;
    }

    fn handle_press(&mut self, events: &mut dyn EventSink) {
        #[cfg(feature = "inventory")]
        if self.held.is_some() {
            self.drop_held(events);
            return;
        }

        let Some(id) = self.highlighted else {
            return;
        };
        if !self.tree.press(id, events) {
            return;
        }
        self.select(id, events);

        #[cfg(feature = "inventory")]
        if self.tree.can_pick_up(id) {
            self.pick_up(id, events);
        }
    }

    /// Draw the tree, then the held item on top.
    ///
    /// Widgets dirtied by this frame's input are refreshed first, so nothing is
    /// drawn from a stale visual.
    pub fn render(&mut self, renderer: &mut dyn UiRenderer) {
        profile_function!();
        self.tree.update();
        self.tree.render(renderer);

        #[cfg(feature = "inventory")]
        if let Some(held) = self.held {
            self.tree.render_node(held.item, renderer);
        }
    }
}

impl std::fmt::Debug for UiManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiManager")
            .field("widgets", &self.tree.len())
            .field("highlighted", &self.highlighted)
            .field("selected", &self.selected)
            .field("cursor", &self.cursor)
            .finish()
    }
}
