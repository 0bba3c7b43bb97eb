//! Container/Item drag and drop.
//!
//! Pressing an `Item` that sits in a `Container` picks it up. The held item
//! stays parented to its container but follows the cursor and is drawn again
//! after the tree. The next press drops it into the container under the
//! cursor if that container has a free slot, otherwise it snaps back.

use crate::dirty::DirtyFlags;
use crate::event::{EventSink, UiEvent, names};
use crate::layout::DragOverride;
use crate::manager::UiManager;
use crate::property::props;
use crate::tree::UiTree;
use crate::widget::WidgetState;
use crate::widget_id::WidgetId;
use trellis_core::math::Vec2;

/// The item currently attached to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldItem {
    pub item: WidgetId,
    /// Container the item was picked up from.
    pub origin: WidgetId,
}

impl UiTree {
    /// An enabled `Item` whose parent is a `Container`.
    pub fn can_pick_up(&self, id: WidgetId) -> bool {
        let Some(node) = self.get(id) else {
            return false;
        };
        node.kind().is_item()
            && node.state() != WidgetState::Disabled
            && node
                .parent()
                .and_then(|parent| self.get(parent))
                .is_some_and(|parent| parent.kind().is_container())
    }

    /// `Capacity` minus the number of `Item` children; zero for anything that
    /// is not a container.
    pub fn container_free_slots(&self, id: WidgetId) -> usize {
        let Some(node) = self.get(id).filter(|n| n.kind().is_container()) else {
            return 0;
        };
        let capacity = node.property_or(&props::CAPACITY, 0).max(0) as usize;
        let items = node
            .children()
            .iter()
            .filter(|&&child| self.get(child).is_some_and(|c| c.kind().is_item()))
            .count();
        capacity.saturating_sub(items)
    }

    /// Container under `position`: the widget hit there or its nearest
    /// `Container` ancestor, ignoring the subtree at `exclude`.
    pub fn container_at(&self, position: Vec2, exclude: Option<WidgetId>) -> Option<WidgetId> {
        let mut current = self.find_widget_under_position_excluding(position, exclude);
        while let Some(id) = current {
            let node = self.get(id)?;
            if node.kind().is_container() {
                return Some(id);
            }
            current = node.parent();
        }
        None
    }
}

impl UiManager {
    /// Attach `item` to the cursor. Returns false when it cannot be picked up
    /// or something is already held.
    pub fn pick_up(&mut self, item: WidgetId, events: &mut dyn EventSink) -> bool {
        if self.held.is_some() || !self.tree.can_pick_up(item) {
            return false;
        }
        let Some(origin) = self.tree.get(item).and_then(|n| n.parent()) else {
            return false;
        };

        self.tree.unhighlight(item, events);
        if self.highlighted == Some(item) {
            self.highlighted = None;
        }
        self.held = Some(HeldItem { item, origin });
        self.track_held_item();

        tracing::debug!("Picked up {} from {}", item, origin);
        events.publish(UiEvent::new(names::ON_ITEM_PICKUP, item).with("container", origin));
        true
    }

    /// Drop the held item at the cursor. Returns the container it ends up in.
    pub fn drop_held(&mut self, events: &mut dyn EventSink) -> Option<WidgetId> {
        let held = self.held.take()?;
        self.tree.drag = None;

        let (container, accepted) = match self.tree.container_at(self.cursor, Some(held.item)) {
            Some(target) if target == held.origin => (target, true),
            Some(target) if self.tree.container_free_slots(target) > 0 => {
                match self.tree.reparent(held.item, target) {
                    Ok(()) => (target, true),
                    Err(err) => {
                        tracing::warn!("Could not move {} into {}: {}", held.item, target, err);
                        (held.origin, false)
                    }
                }
            }
            _ => (held.origin, false),
        };
        self.tree.dirty(held.item);

        tracing::debug!(
            "Dropped {} into {} (accepted: {})",
            held.item,
            container,
            accepted
        );
        events.publish(
            UiEvent::new(names::ON_ITEM_DROP, held.item)
                .with("item", held.item)
                .with("container", container)
                .with("accepted", accepted),
        );
        Some(container)
    }

    pub fn held(&self) -> Option<HeldItem> {
        self.held
    }

    /// Point the drag override at the cursor and mark the held item moved.
    pub(crate) fn track_held_item(&mut self) {
        if let Some(held) = self.held {
            self.tree.drag = Some(DragOverride {
                widget: held.item,
                cursor: self.cursor,
            });
            self.tree.mark_dirty(held.item, DirtyFlags::TRANSFORM);
        }
    }
}
