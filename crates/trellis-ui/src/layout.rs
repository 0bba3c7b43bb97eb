//! Anchor and dock layout.
//!
//! Every widget is positioned by lining up one of its own anchor points with
//! the same anchor point of its parent. Docking overrides the anchor with the
//! docked edge and makes siblings share the parent's space in declaration
//! order: earlier docked children claim their strip first and later ones
//! (including `Fill`) receive what is left.
//!
//! UI space has its origin at the bottom-left, `y` pointing up. The root widget
//! is its own coordinate origin.
//!
//! Sizes are memoized per widget in a [`SizeCache`] filled on first read. The
//! cache is dropped whenever the widget or one of its ancestors is dirtied.

use crate::property::props;
use crate::tree::UiTree;
use crate::widget_id::WidgetId;
use std::cell::Cell;
use trellis_core::geometry::Rect;
use trellis_core::math::Vec2;
use trellis_core::profiling::profile_function;

/// A reference point inside a widget's own box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    TopLeft,
    Top,
    TopRight,
    Left,
    #[default]
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::Top,
        Anchor::TopRight,
        Anchor::Left,
        Anchor::Center,
        Anchor::Right,
        Anchor::BottomLeft,
        Anchor::Bottom,
        Anchor::BottomRight,
    ];

    /// Position of the anchor as a fraction of the box size.
    pub fn fraction(self) -> Vec2 {
        match self {
            Anchor::TopLeft => Vec2::new(0.0, 1.0),
            Anchor::Top => Vec2::new(0.5, 1.0),
            Anchor::TopRight => Vec2::new(1.0, 1.0),
            Anchor::Left => Vec2::new(0.0, 0.5),
            Anchor::Center => Vec2::new(0.5, 0.5),
            Anchor::Right => Vec2::new(1.0, 0.5),
            Anchor::BottomLeft => Vec2::new(0.0, 0.0),
            Anchor::Bottom => Vec2::new(0.5, 0.0),
            Anchor::BottomRight => Vec2::new(1.0, 0.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Anchor::TopLeft => "TopLeft",
            Anchor::Top => "Top",
            Anchor::TopRight => "TopRight",
            Anchor::Left => "Left",
            Anchor::Center => "Center",
            Anchor::Right => "Right",
            Anchor::BottomLeft => "BottomLeft",
            Anchor::Bottom => "Bottom",
            Anchor::BottomRight => "BottomRight",
        }
    }

    /// Parse the markup spelling, ignoring ASCII case.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL
            .into_iter()
            .find(|anchor| text.eq_ignore_ascii_case(anchor.name()))
    }
}

/// Docking mode of a widget within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dock {
    #[default]
    None,
    Left,
    Right,
    Top,
    Bottom,
    Fill,
}

impl Dock {
    pub const ALL: [Dock; 6] = [
        Dock::None,
        Dock::Left,
        Dock::Right,
        Dock::Top,
        Dock::Bottom,
        Dock::Fill,
    ];

    /// The anchor a docked widget is forced to.
    pub fn anchor(self) -> Option<Anchor> {
        match self {
            Dock::None => None,
            Dock::Left => Some(Anchor::Left),
            Dock::Right => Some(Anchor::Right),
            Dock::Top => Some(Anchor::Top),
            Dock::Bottom => Some(Anchor::Bottom),
            Dock::Fill => Some(Anchor::Center),
        }
    }

    pub fn is_docked(self) -> bool {
        self != Dock::None
    }

    fn is_horizontal(self) -> bool {
        matches!(self, Dock::Left | Dock::Right)
    }

    fn is_vertical(self) -> bool {
        matches!(self, Dock::Top | Dock::Bottom)
    }

    /// How far a widget docked `self` is pushed by an earlier sibling docked
    /// `earlier`, as a fraction of that sibling's extent.
    ///
    /// Same edge: past the whole strip. Perpendicular edges and `Fill`: half
    /// the strip, which keeps them centered on the space that remains.
    /// Opposite edge: not at all.
    fn shift_factor(self, earlier: Dock) -> f32 {
        if self == earlier {
            1.0
        } else if self == Dock::Fill
            || (self.is_horizontal() && earlier.is_vertical())
            || (self.is_vertical() && earlier.is_horizontal())
        {
            0.5
        } else {
            0.0
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dock::None => "None",
            Dock::Left => "Left",
            Dock::Right => "Right",
            Dock::Top => "Top",
            Dock::Bottom => "Bottom",
            Dock::Fill => "Fill",
        }
    }

    /// Parse the markup spelling, ignoring ASCII case.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL
            .into_iter()
            .find(|dock| text.eq_ignore_ascii_case(dock.name()))
    }
}

/// Lazily computed `(width, height)` of a widget.
#[derive(Debug, Clone, Default)]
pub struct SizeCache {
    size: Cell<Option<Vec2>>,
}

impl SizeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Vec2> {
        self.size.get()
    }

    pub fn set(&self, size: Vec2) {
        self.size.set(Some(size));
    }

    pub fn invalidate(&self) {
        self.size.set(None);
    }

    pub fn is_valid(&self) -> bool {
        self.size.get().is_some()
    }
}

/// Cursor-tracking position override for the held item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DragOverride {
    pub widget: WidgetId,
    pub cursor: Vec2,
}

impl UiTree {
    /// Size of a widget, served from its cache when valid.
    ///
    /// The base size is the Width/Height properties. A docked widget with a
    /// parent borrows the space its parent offers along the docked axis: height
    /// for Left/Right, width for Top/Bottom, both for Fill. Unknown ids measure
    /// as zero.
    pub fn size(&self, id: WidgetId) -> Vec2 {
        let Some(node) = self.get(id) else {
            return Vec2::ZERO;
        };
        if let Some(size) = node.size_cache.get() {
            return size;
        }

        let mut size = Vec2::new(
            node.property_or(&props::WIDTH, 0.0),
            node.property_or(&props::HEIGHT, 0.0),
        );

        let dock = node.dock();
        if let (true, Some(parent)) = (dock.is_docked(), node.parent()) {
            let offered = self.size_for_child(parent, id);
            match dock {
                Dock::Left | Dock::Right => size.y = offered.y,
                Dock::Top | Dock::Bottom => size.x = offered.x,
                Dock::Fill => size = offered,
                Dock::None => {}
            }
        }

        node.size_cache.set(size);
        size
    }

    /// Space `parent` offers to `child`: its own size minus the strips claimed
    /// by docked children declared before `child`. Never negative.
    pub fn size_for_child(&self, parent: WidgetId, child: WidgetId) -> Vec2 {
        let Some(parent_node) = self.get(parent) else {
            return Vec2::ZERO;
        };

        let mut remaining = self.size(parent);
        for &sibling in parent_node.children() {
            if sibling == child {
                break;
            }
            let Some(dock) = self.get(sibling).map(|n| n.dock()) else {
                continue;
            };
            match dock {
                Dock::Left | Dock::Right => remaining.x -= self.size(sibling).x,
                Dock::Top | Dock::Bottom => remaining.y -= self.size(sibling).y,
                Dock::Fill => remaining -= self.size(sibling),
                Dock::None => {}
            }
        }
        remaining.max(Vec2::ZERO)
    }

    /// Offset of `anchor` from the widget's own bottom-left corner.
    pub fn local_anchor_point(&self, id: WidgetId, anchor: Anchor) -> Vec2 {
        anchor.fraction() * self.size(id)
    }

    /// The anchor a widget is actually aligned by: its Anchor property, or the
    /// docked edge when it is docked.
    pub fn effective_anchor(&self, id: WidgetId) -> Anchor {
        self.get(id)
            .map(|node| node.dock().anchor().unwrap_or_else(|| node.anchor()))
            .unwrap_or_default()
    }

    /// World (UI space) position of `anchor` on the widget.
    ///
    /// `for_child` is set when a child asks where it should sit; the result is
    /// then shifted past the docked siblings declared before that child.
    pub fn world_position(&self, id: WidgetId, anchor: Anchor, for_child: Option<WidgetId>) -> Vec2 {
        profile_function!();
        let Some(node) = self.get(id) else {
            return Vec2::ZERO;
        };

        let mut position = self.local_anchor_point(id, anchor);

        match self.drag {
            Some(drag) if drag.widget == id => {
                position += drag.cursor - self.local_anchor_point(id, Anchor::Center);
            }
            _ => {
                if !node.dock().is_docked() {
                    position += node.property_or(&props::OFFSET, Vec2::ZERO);
                }
                if let Some(parent) = node.parent() {
                    let aligned = self.effective_anchor(id);
                    position += self.world_position(parent, aligned, Some(id))
                        - self.local_anchor_point(id, aligned);
                }
            }
        }

        if let Some(child) = for_child {
            position += self.dock_shift(id, child);
        }
        position
    }

    /// Accumulated displacement of a docked child caused by earlier docked siblings.
    fn dock_shift(&self, parent: WidgetId, child: WidgetId) -> Vec2 {
        let child_dock = self.get(child).map(|n| n.dock()).unwrap_or_default();
        let Some(parent_node) = self.get(parent) else {
            return Vec2::ZERO;
        };
        if !child_dock.is_docked() {
            return Vec2::ZERO;
        }

        let mut shift = Vec2::ZERO;
        for &sibling in parent_node.children() {
            if sibling == child {
                break;
            }
            let Some(dock) = self.get(sibling).map(|n| n.dock()) else {
                continue;
            };
            let factor = child_dock.shift_factor(dock);
            if factor == 0.0 {
                continue;
            }
            let extent = self.size(sibling);
            match dock {
                Dock::Left => shift.x += extent.x * factor,
                Dock::Right => shift.x -= extent.x * factor,
                Dock::Bottom => shift.y += extent.y * factor,
                Dock::Top => shift.y -= extent.y * factor,
                Dock::Fill | Dock::None => {}
            }
        }
        shift
    }

    /// World rectangle spanned by the BottomLeft and TopRight anchors.
    pub fn world_rect(&self, id: WidgetId) -> Rect<f32> {
        Rect::from_corners(
            self.world_position(id, Anchor::BottomLeft, None),
            self.world_position(id, Anchor::TopRight, None),
        )
    }

    /// Hit test against the widget's world rectangle, independent of its anchor.
    pub fn is_point_inside(&self, id: WidgetId, point: Vec2) -> bool {
        self.world_rect(id).contains(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_fractions_corners() {
        assert_eq!(Anchor::BottomLeft.fraction(), Vec2::ZERO);
        assert_eq!(Anchor::TopRight.fraction(), Vec2::ONE);
        assert_eq!(Anchor::Center.fraction(), Vec2::splat(0.5));
        assert_eq!(Anchor::Top.fraction(), Vec2::new(0.5, 1.0));
    }

    #[test]
    fn test_dock_forces_anchor() {
        assert_eq!(Dock::Bottom.anchor(), Some(Anchor::Bottom));
        assert_eq!(Dock::Fill.anchor(), Some(Anchor::Center));
        assert_eq!(Dock::None.anchor(), None);
    }

    #[test]
    fn test_shift_factors() {
        assert_eq!(Dock::Left.shift_factor(Dock::Left), 1.0);
        assert_eq!(Dock::Fill.shift_factor(Dock::Left), 0.5);
        assert_eq!(Dock::Top.shift_factor(Dock::Left), 0.5);
        assert_eq!(Dock::Left.shift_factor(Dock::Bottom), 0.5);
        assert_eq!(Dock::Right.shift_factor(Dock::Left), 0.0);
        assert_eq!(Dock::Bottom.shift_factor(Dock::Top), 0.0);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Anchor::parse("bottomleft"), Some(Anchor::BottomLeft));
        assert_eq!(Dock::parse("Fill"), Some(Dock::Fill));
        assert_eq!(Dock::parse("Middle"), None);
    }

    #[test]
    fn test_size_cache_invalidate() {
        let cache = SizeCache::new();
        assert!(!cache.is_valid());
        cache.set(Vec2::new(3.0, 4.0));
        assert_eq!(cache.get(), Some(Vec2::new(3.0, 4.0)));
        cache.invalidate();
        assert_eq!(cache.get(), None);
    }
}
