//! Widget tree: ownership, dirty propagation, interaction state and the
//! per-frame update and render walks.

use crate::dirty::DirtyFlags;
use crate::draw_list::{DrawCall, UiRenderer};
use crate::error::{UiError, UiResult};
use crate::event::{EventSink, UiEvent, names};
use crate::layout::DragOverride;
use crate::property::{Property, PropertySource, PropertyState, PropertyType, PropertyValue, props};
use crate::visual;
use crate::widget::{WidgetKind, WidgetNode, WidgetState};
use crate::widget_id::WidgetId;
use indexmap::IndexMap;
use trellis_core::geometry::Size;
use trellis_core::math::Vec2;
use trellis_core::profiling::{profile_function, profile_scope};

/// Owner of every widget.
///
/// Widgets reachable from the root are "in the tree" and take part in update,
/// render and hit-testing. Widgets removed from their parent stay owned here,
/// detached, until they are destroyed or attached again.
#[derive(Debug)]
pub struct UiTree {
    nodes: IndexMap<WidgetId, WidgetNode>,
    root: WidgetId,
    pub(crate) drag: Option<DragOverride>,
    sounds_enabled: bool,
}

impl UiTree {
    /// Create a tree around `root`. The root is detached from anything it was
    /// parented to and becomes its own coordinate origin.
    pub fn new(mut root: WidgetNode) -> Self {
        root.parent = None;
        let id = root.id();
        let mut nodes = IndexMap::new();
        nodes.insert(id, root);
        Self {
            nodes,
            root: id,
            drag: None,
            sounds_enabled: true,
        }
    }

    /// Create a tree whose root is a generic widget of the given size.
    pub fn with_root_size(size: Size<f32>) -> Self {
        Self::new(
            WidgetNode::new(WidgetKind::Generic, "root")
                .with(&props::WIDTH, size.width)
                .with(&props::HEIGHT, size.height),
        )
    }

    pub fn root(&self) -> WidgetId {
        self.root
    }

    pub fn get(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.nodes.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: WidgetId) -> Option<&mut WidgetNode> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of owned widgets, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WidgetNode> {
        self.nodes.values()
    }

    pub fn set_sounds_enabled(&mut self, enabled: bool) {
        self.sounds_enabled = enabled;
    }

    /// Resize the root. Every widget is re-measured.
    pub fn set_root_size(&mut self, size: Size<f32>) {
        let root = self.root;
        self.set_property(root, &props::WIDTH, size.width, PropertySource::WidgetSpecific, PropertyState::All);
        self.set_property(root, &props::HEIGHT, size.height, PropertySource::WidgetSpecific, PropertyState::All);
    }

    /// Take ownership of a detached widget.
    pub fn insert(&mut self, mut node: WidgetNode) -> WidgetId {
        node.parent = None;
        let id = node.id();
        self.nodes.insert(id, node);
        id
    }

    /// Append `child` to `parent`'s children.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> UiResult<()> {
        if child == self.root {
            return Err(UiError::RootProtected);
        }
        if !self.contains(parent) {
            return Err(UiError::NodeNotFound(parent));
        }
        let child_node = self.get(child).ok_or(UiError::NodeNotFound(child))?;
        if let Some(current) = child_node.parent() {
            return Err(UiError::AlreadyParented {
                child,
                parent: current,
            });
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(UiError::WouldCreateCycle { parent, child });
        }

        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        tracing::trace!("Attached {} to {}", child, parent);
        self.dirty(child);
        Ok(())
    }

    /// Insert `node` and attach it to `parent` in one step.
    pub fn spawn(&mut self, parent: WidgetId, node: WidgetNode) -> UiResult<WidgetId> {
        let id = self.insert(node);
        if let Err(err) = self.add_child(parent, id) {
            self.nodes.shift_remove(&id);
            return Err(err);
        }
        Ok(id)
    }

    /// Remove `child` from `parent`. The child stays owned by the tree, detached.
    pub fn remove_child(&mut self, parent: WidgetId, child: WidgetId) -> UiResult<()> {
        if child == self.root {
            return Err(UiError::RootProtected);
        }
        if !self.contains(child) {
            return Err(UiError::NodeNotFound(child));
        }
        let parent_node = self.get_mut(parent).ok_or(UiError::NodeNotFound(parent))?;
        let Some(index) = parent_node.children.iter().position(|&c| c == child) else {
            return Err(UiError::NotAChild { parent, child });
        };
        parent_node.children.remove(index);

        if let Some(node) = self.get_mut(child) {
            node.parent = None;
        }
        tracing::trace!("Detached {} from {}", child, parent);
        // Later docked siblings regain the space the child claimed.
        self.dirty(parent);
        self.dirty(child);
        Ok(())
    }

    /// Detach `id` from whatever parent it has. No-op for detached widgets.
    pub fn detach(&mut self, id: WidgetId) -> UiResult<()> {
        if id == self.root {
            return Err(UiError::RootProtected);
        }
        match self.get(id).ok_or(UiError::NodeNotFound(id))?.parent() {
            Some(parent) => self.remove_child(parent, id),
            None => Ok(()),
        }
    }

    /// Move `id` under `new_parent`, appending it as the last child.
    pub fn reparent(&mut self, id: WidgetId, new_parent: WidgetId) -> UiResult<()> {
        if id == self.root {
            return Err(UiError::RootProtected);
        }
        if !self.contains(new_parent) {
            return Err(UiError::NodeNotFound(new_parent));
        }
        if id == new_parent || self.is_ancestor(id, new_parent) {
            return Err(UiError::WouldCreateCycle {
                parent: new_parent,
                child: id,
            });
        }
        self.detach(id)?;
        self.add_child(new_parent, id)
    }

    /// Destroy `id` and its whole subtree, children first.
    ///
    /// Returns the destroyed ids in destruction order.
    pub fn destroy(&mut self, id: WidgetId) -> UiResult<Vec<WidgetId>> {
        profile_function!();
        if id == self.root {
            return Err(UiError::RootProtected);
        }
        self.detach(id)?;

        let mut removed = Vec::new();
        self.collect_post_order(id, &mut removed);
        for widget in &removed {
            self.nodes.shift_remove(widget);
        }
        if self.drag.is_some_and(|drag| removed.contains(&drag.widget)) {
            self.drag = None;
        }
        tracing::debug!("Destroyed {} widget(s) under {}", removed.len(), id);
        Ok(removed)
    }

    fn collect_post_order(&self, id: WidgetId, out: &mut Vec<WidgetId>) {
        if let Some(node) = self.get(id) {
            for &child in node.children() {
                self.collect_post_order(child, out);
            }
            out.push(id);
        }
    }

    /// Whether `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut current = self.get(id).and_then(|n| n.parent());
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.get(parent).and_then(|n| n.parent());
        }
        false
    }

    /// All descendants of `id` in pre-order, excluding `id` itself.
    pub fn descendants(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack: Vec<WidgetId> = self
            .get(id)
            .map(|n| n.children().iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(current) = stack.pop() {
            out.push(current);
            if let Some(node) = self.get(current) {
                stack.extend(node.children().iter().rev());
            }
        }
        out
    }

    /// First widget with the given display name.
    pub fn find_by_name(&self, name: &str) -> Option<WidgetId> {
        self.nodes.values().find(|n| n.name() == name).map(|n| n.id())
    }

    /// Mark the whole subtree at `id` dirty.
    pub fn dirty(&mut self, id: WidgetId) {
        self.mark_dirty(id, DirtyFlags::ALL);
    }

    /// Add `flags` to `id` and every descendant. Layout flags also drop the
    /// cached sizes.
    pub fn mark_dirty(&mut self, id: WidgetId, flags: DirtyFlags) {
        profile_function!();
        if flags.is_empty() {
            return;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get_mut(&current) else {
                continue;
            };
            node.dirty |= flags;
            if flags.invalidates_layout() {
                node.size_cache.invalidate();
            }
            stack.extend(node.children.iter().copied());
        }
    }

    /// Typed property write through the tree. See [`UiTree::set_property_value`].
    pub fn set_property<T: PropertyType>(
        &mut self,
        id: WidgetId,
        key: &Property<T>,
        value: T,
        source: PropertySource,
        state: PropertyState,
    ) -> bool {
        self.set_property_value(id, key.name(), value.into_value(), source, state)
    }

    /// Write a property and dirty whatever its value affects.
    ///
    /// An accepted write dirties the widget's subtree. Layout properties of a
    /// docked widget dirty the parent's subtree instead, since later siblings
    /// are measured against it. An accepted Hidden write also sets the hidden flag.
    pub fn set_property_value(
        &mut self,
        id: WidgetId,
        name: &str,
        value: PropertyValue,
        source: PropertySource,
        state: PropertyState,
    ) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        let was_docked = node.dock().is_docked();
        if !node.properties.set_value(name, value, source, state) {
            return false;
        }

        let target = match node.parent {
            Some(parent) if props::is_layout(name) && (was_docked || node.dock().is_docked()) => parent,
            _ => id,
        };
        if name == props::HIDDEN.name() {
            self.sync_hidden(id);
        }
        self.dirty(target);
        true
    }

    /// Copy the resolved Hidden property into the hidden flag. Widgets with no
    /// Hidden value keep the flag they have.
    fn sync_hidden(&mut self, id: WidgetId) {
        let Some(hidden) = self.get(id).and_then(|n| n.try_property(&props::HIDDEN)) else {
            return;
        };
        self.set_hidden(id, hidden);
    }

    /// Strict typed read of a widget's property in its current state.
    pub fn property<T: PropertyType>(&self, id: WidgetId, key: &Property<T>) -> Option<T> {
        self.get(id)?.try_property(key)
    }

    /// Hide or show a widget. Hidden widgets and their subtrees are skipped by
    /// update, render and hit-testing.
    pub fn set_hidden(&mut self, id: WidgetId, hidden: bool) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        if node.hidden != hidden {
            node.hidden = hidden;
            self.dirty(id);
        }
    }

    /// Enabled → Highlighted.
    pub fn highlight(&mut self, id: WidgetId, events: &mut dyn EventSink) -> bool {
        self.transition(
            id,
            &[WidgetState::Enabled],
            WidgetState::Highlighted,
            Some(names::ON_HIGHLIGHT),
            events,
        )
    }

    /// Highlighted or Pressed → Enabled.
    pub fn unhighlight(&mut self, id: WidgetId, events: &mut dyn EventSink) -> bool {
        self.transition(
            id,
            &[WidgetState::Highlighted, WidgetState::Pressed],
            WidgetState::Enabled,
            None,
            events,
        )
    }

    /// Highlighted → Pressed.
    pub fn press(&mut self, id: WidgetId, events: &mut dyn EventSink) -> bool {
        self.transition(
            id,
            &[WidgetState::Highlighted],
            WidgetState::Pressed,
            Some(names::ON_PRESSED),
            events,
        )
    }

    /// Pressed → Highlighted.
    pub fn release(&mut self, id: WidgetId, events: &mut dyn EventSink) -> bool {
        self.transition(
            id,
            &[WidgetState::Pressed],
            WidgetState::Highlighted,
            Some(names::ON_RELEASED),
            events,
        )
    }

    pub fn disable(&mut self, id: WidgetId, events: &mut dyn EventSink) -> bool {
        self.transition(
            id,
            &[WidgetState::Enabled, WidgetState::Highlighted, WidgetState::Pressed],
            WidgetState::Disabled,
            None,
            events,
        )
    }

    pub fn enable(&mut self, id: WidgetId, events: &mut dyn EventSink) -> bool {
        self.transition(
            id,
            &[WidgetState::Disabled],
            WidgetState::Enabled,
            None,
            events,
        )
    }

    fn transition(
        &mut self,
        id: WidgetId,
        from: &[WidgetState],
        to: WidgetState,
        event: Option<&'static str>,
        events: &mut dyn EventSink,
    ) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        let current = node.state;
        if !from.contains(&current) {
            tracing::debug!("{}: ignoring {:?} -> {:?}", id, current, to);
            return false;
        }

        node.state = to;
        let sound = node.property_or(&props::SOUND, String::new());
        // Size may resolve differently per state; docked siblings measure against it.
        let target = match node.parent {
            Some(parent) if node.dock().is_docked() => parent,
            _ => id,
        };
        tracing::trace!("{}: {:?} -> {:?}", id, current, to);
        self.sync_hidden(id);
        self.dirty(target);

        if self.sounds_enabled && !sound.is_empty() {
            events.publish(UiEvent::new(names::PLAY_UI_SOUND, id).with("sound", sound));
        }
        if let Some(name) = event {
            events.publish(UiEvent::new(name, id));
        }
        true
    }

    /// Visible widgets reachable from the root, parents before children.
    fn visible_pre_order(&self) -> Vec<WidgetId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            if node.is_hidden() {
                continue;
            }
            out.push(id);
            stack.extend(node.children().iter().rev());
        }
        out
    }

    /// Refresh the visuals of every dirty, visible widget and clear its flags.
    ///
    /// Returns the number of widgets refreshed.
    pub fn update(&mut self) -> usize {
        profile_function!();
        let mut refreshed = 0;
        for id in self.visible_pre_order() {
            let Some(node) = self.get(id) else {
                continue;
            };
            let flags = node.dirty_flags();
            if flags.is_empty() {
                continue;
            }

            let refreshed_visual = {
                profile_scope!("refresh_visual");
                visual::refresh(self, node, flags)
            };
            if let Some(node) = self.get_mut(id) {
                node.visual = refreshed_visual;
                node.dirty = DirtyFlags::NONE;
            }
            refreshed += 1;
        }
        refreshed
    }

    /// Emit a draw call for every visible widget with something to draw.
    pub fn render(&self, renderer: &mut dyn UiRenderer) {
        profile_function!();
        for id in self.visible_pre_order() {
            self.render_node(id, renderer);
        }
    }

    /// Draw a single widget outside the tree walk. Returns whether anything was drawn.
    pub fn render_node(&self, id: WidgetId, renderer: &mut dyn UiRenderer) -> bool {
        let Some(node) = self.get(id) else {
            return false;
        };
        let visual = node.visual();
        if node.is_hidden() || visual.mesh.is_empty() {
            return false;
        }
        renderer.draw(DrawCall {
            widget: id,
            mesh: &visual.mesh,
            uniforms: &visual.uniforms,
            world: visual.world,
        });
        true
    }

    /// Deepest visible widget under `position`, later siblings first.
    ///
    /// The root is the canvas and is never returned.
    pub fn find_widget_under_position(&self, position: Vec2) -> Option<WidgetId> {
        self.find_widget_under_position_excluding(position, None)
    }

    /// As [`UiTree::find_widget_under_position`], ignoring the subtree at `exclude`.
    pub fn find_widget_under_position_excluding(
        &self,
        position: Vec2,
        exclude: Option<WidgetId>,
    ) -> Option<WidgetId> {
        profile_function!();
        let root = self.get(self.root)?;
        if root.is_hidden() {
            return None;
        }
        root.children()
            .iter()
            .rev()
            .find_map(|&child| self.hit_test(child, position, exclude))
    }

    fn hit_test(&self, id: WidgetId, position: Vec2, exclude: Option<WidgetId>) -> Option<WidgetId> {
        if exclude == Some(id) {
            return None;
        }
        let node = self.get(id)?;
        if node.is_hidden() {
            return None;
        }
        node.children()
            .iter()
            .rev()
            .find_map(|&child| self.hit_test(child, position, exclude))
            .or_else(|| self.is_point_inside(id, position).then_some(id))
    }
}
