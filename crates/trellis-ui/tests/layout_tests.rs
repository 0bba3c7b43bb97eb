//! Anchor/dock layout, size caching and hit-testing.

use trellis_core::geometry::Size;
use trellis_core::math::Vec2;
use trellis_ui::draw_list::DrawList;
use trellis_ui::event::NullSink;
use trellis_ui::layout::{Anchor, Dock};
use trellis_ui::skin::Skin;
use trellis_ui::property::{PropertySource, PropertyState, props};
use trellis_ui::tree::UiTree;
use trellis_ui::widget::{WidgetKind, WidgetNode};
use trellis_ui::widget_id::WidgetId;

fn root_tree(width: f32, height: f32) -> UiTree {
    UiTree::with_root_size(Size::new(width, height))
}

fn docked(dock: Dock, width: f32, height: f32) -> WidgetNode {
    WidgetNode::new(WidgetKind::Box, format!("{dock:?}"))
        .with(&props::DOCK, dock)
        .with(&props::WIDTH, width)
        .with(&props::HEIGHT, height)
}

fn sized(width: f32, height: f32) -> WidgetNode {
    WidgetNode::new(WidgetKind::Box, "box")
        .with(&props::WIDTH, width)
        .with(&props::HEIGHT, height)
}

#[test]
fn test_dock_stacking_left_left_fill() {
    let mut tree = root_tree(800.0, 600.0);
    let root = tree.root();
    let parent = tree.spawn(root, sized(300.0, 100.0)).unwrap();
    let a = tree.spawn(parent, docked(Dock::Left, 50.0, 0.0)).unwrap();
    let b = tree.spawn(parent, docked(Dock::Left, 70.0, 0.0)).unwrap();
    let fill = tree.spawn(parent, docked(Dock::Fill, 0.0, 0.0)).unwrap();

    assert_eq!(tree.size(fill), Vec2::new(180.0, 100.0));
    // Stable across repeated calls and independent of what was measured first.
    assert_eq!(tree.size(fill), Vec2::new(180.0, 100.0));
    assert_eq!(tree.size(b), Vec2::new(70.0, 100.0));
    assert_eq!(tree.size(a), Vec2::new(50.0, 100.0));
    assert_eq!(tree.size(fill), Vec2::new(180.0, 100.0));
}

#[test]
fn test_dock_stacking_order_of_measurement() {
    let mut tree = root_tree(800.0, 600.0);
    let root = tree.root();
    let parent = tree.spawn(root, sized(300.0, 100.0)).unwrap();
    let a = tree.spawn(parent, docked(Dock::Left, 50.0, 0.0)).unwrap();
    let b = tree.spawn(parent, docked(Dock::Left, 70.0, 0.0)).unwrap();
    let fill = tree.spawn(parent, docked(Dock::Fill, 0.0, 0.0)).unwrap();

    // Siblings first this time.
    assert_eq!(tree.size(a).x, 50.0);
    assert_eq!(tree.size(b).x, 70.0);
    assert_eq!(tree.size(fill).x, 180.0);
}

#[test]
fn test_sidebar_and_fill_end_to_end() {
    let mut tree = root_tree(800.0, 600.0);
    let root = tree.root();
    let sidebar = tree.spawn(root, docked(Dock::Left, 200.0, 0.0)).unwrap();
    let content = tree.spawn(root, docked(Dock::Fill, 0.0, 0.0)).unwrap();

    assert_eq!(tree.size(content), Vec2::new(600.0, 600.0));
    assert_eq!(
        tree.world_position(content, Anchor::Center, None),
        Vec2::new(200.0 + 300.0, 300.0)
    );

    let sidebar_rect = tree.world_rect(sidebar);
    assert_eq!(sidebar_rect.bottom_left(), Vec2::ZERO);
    assert_eq!(sidebar_rect.top_right(), Vec2::new(200.0, 600.0));

    let content_rect = tree.world_rect(content);
    assert_eq!(content_rect.bottom_left(), Vec2::new(200.0, 0.0));
    assert_eq!(content_rect.top_right(), Vec2::new(800.0, 600.0));
}

#[test]
fn test_docked_edges_line_up_with_parent() {
    let mut tree = root_tree(800.0, 600.0);
    let root = tree.root();
    let top = tree.spawn(root, docked(Dock::Top, 0.0, 50.0)).unwrap();
    let right = tree.spawn(root, docked(Dock::Right, 120.0, 0.0)).unwrap();

    assert_eq!(tree.size(top), Vec2::new(800.0, 50.0));
    assert_eq!(tree.world_position(top, Anchor::TopLeft, None), Vec2::new(0.0, 600.0));

    // Right docked after a top bar: 550 tall, centered in the remaining band.
    assert_eq!(tree.size(right), Vec2::new(120.0, 550.0));
    assert_eq!(tree.world_position(right, Anchor::Right, None), Vec2::new(800.0, 275.0));
}

#[test]
fn test_root_is_its_own_origin() {
    let tree = root_tree(800.0, 600.0);
    let root = tree.root();
    assert_eq!(tree.world_position(root, Anchor::BottomLeft, None), Vec2::ZERO);
    assert_eq!(tree.world_position(root, Anchor::TopRight, None), Vec2::new(800.0, 600.0));
    assert_eq!(tree.world_position(root, Anchor::Center, None), Vec2::new(400.0, 300.0));
}

/// Builds a chain of centered boxes `depth` levels below an offset box.
fn centered_chain(tree: &mut UiTree, depth: usize) -> Vec<WidgetId> {
    let root = tree.root();
    let mut chain = vec![
        tree.spawn(
            root,
            sized(400.0, 300.0)
                .with(&props::ANCHOR, Anchor::BottomLeft)
                .with(&props::OFFSET, Vec2::new(37.0, 12.0)),
        )
        .unwrap(),
    ];
    for level in 0..depth {
        let parent = *chain.last().unwrap();
        let side = 200.0 / (1_u32 << level) as f32;
        chain.push(tree.spawn(parent, sized(side, side / 2.0)).unwrap());
    }
    chain
}

#[test]
fn test_center_anchor_round_trip_at_depth() {
    for depth in 1..=3 {
        let mut tree = root_tree(800.0, 600.0);
        let chain = centered_chain(&mut tree, depth);

        for pair in chain.windows(2) {
            let (parent, child) = (pair[0], pair[1]);
            let parent_center = tree.world_position(parent, Anchor::Center, None);
            let child_origin = tree.world_position(child, Anchor::BottomLeft, None);

            assert_eq!(tree.world_position(child, Anchor::Center, None), parent_center, "depth {depth}");
            assert_eq!(child_origin, parent_center - tree.size(child) * 0.5, "depth {depth}");
        }
    }
}

#[test]
fn test_offset_ignored_when_docked() {
    let mut tree = root_tree(800.0, 600.0);
    let root = tree.root();
    let panel = tree
        .spawn(
            root,
            docked(Dock::Left, 100.0, 0.0).with(&props::OFFSET, Vec2::new(50.0, 50.0)),
        )
        .unwrap();
    assert_eq!(tree.world_position(panel, Anchor::BottomLeft, None), Vec2::ZERO);

    let floating = tree
        .spawn(
            root,
            sized(10.0, 10.0)
                .with(&props::ANCHOR, Anchor::BottomLeft)
                .with(&props::OFFSET, Vec2::new(50.0, 50.0)),
        )
        .unwrap();
    assert_eq!(
        tree.world_position(floating, Anchor::BottomLeft, None),
        Vec2::new(50.0, 50.0)
    );
}

#[test]
fn test_dirty_reaches_every_descendant() {
    let mut tree = root_tree(800.0, 600.0);
    let root = tree.root();
    let panel = tree.spawn(root, sized(300.0, 300.0)).unwrap();
    let inner = tree.spawn(panel, docked(Dock::Fill, 0.0, 0.0)).unwrap();
    let leaf = tree.spawn(inner, docked(Dock::Bottom, 0.0, 20.0)).unwrap();

    tree.update();
    assert_eq!(tree.size(leaf), Vec2::new(300.0, 20.0));
    for id in [panel, inner, leaf] {
        assert!(!tree.get(id).unwrap().is_dirty());
        assert!(tree.get(id).unwrap().has_cached_size());
    }

    tree.dirty(panel);
    for id in [panel, inner, leaf] {
        assert!(tree.get(id).unwrap().is_dirty());
        assert!(!tree.get(id).unwrap().has_cached_size());
    }
    assert!(!tree.get(root).unwrap().is_dirty());
}

#[test]
fn test_resizing_parent_re_measures_docked_children() {
    let mut tree = root_tree(800.0, 600.0);
    let root = tree.root();
    let panel = tree.spawn(root, sized(300.0, 300.0)).unwrap();
    let fill = tree.spawn(panel, docked(Dock::Fill, 0.0, 0.0)).unwrap();
    assert_eq!(tree.size(fill), Vec2::new(300.0, 300.0));

    tree.set_property(panel, &props::WIDTH, 500.0, PropertySource::WidgetSpecific, PropertyState::All);
    assert_eq!(tree.size(fill), Vec2::new(500.0, 300.0));
}

#[test]
fn test_resizing_docked_sibling_re_measures_later_siblings() {
    let mut tree = root_tree(800.0, 600.0);
    let root = tree.root();
    let sidebar = tree.spawn(root, docked(Dock::Left, 200.0, 0.0)).unwrap();
    let content = tree.spawn(root, docked(Dock::Fill, 0.0, 0.0)).unwrap();
    assert_eq!(tree.size(content).x, 600.0);

    tree.set_property(sidebar, &props::WIDTH, 300.0, PropertySource::WidgetSpecific, PropertyState::All);
    assert_eq!(tree.size(content).x, 500.0);
    assert!(tree.get(content).unwrap().is_dirty());
}

#[test]
fn test_state_specific_width_re_measures_docked_siblings() {
    let mut tree = root_tree(800.0, 600.0);
    let root = tree.root();
    let sidebar = tree
        .spawn(
            root,
            docked(Dock::Left, 200.0, 0.0).with_state(&props::WIDTH, 300.0, PropertyState::Highlighted),
        )
        .unwrap();
    let content = tree.spawn(root, docked(Dock::Fill, 0.0, 0.0)).unwrap();
    tree.update();
    assert_eq!(tree.size(content).x, 600.0);

    tree.highlight(sidebar, &mut NullSink);
    assert!(tree.get(content).unwrap().is_dirty());
    assert_eq!(tree.size(sidebar).x, 300.0);
    assert_eq!(tree.size(content).x, 500.0);
    assert_eq!(
        tree.world_position(content, Anchor::BottomLeft, None),
        Vec2::new(300.0, 0.0)
    );

    tree.unhighlight(sidebar, &mut NullSink);
    assert_eq!(tree.size(content).x, 600.0);
}

#[test]
fn test_hidden_property_hides_widget() {
    let mut tree = root_tree(800.0, 600.0);
    let root = tree.root();
    let panel = tree.spawn(root, sized(200.0, 200.0)).unwrap();
    let center = Vec2::new(400.0, 300.0);

    assert!(tree.set_property(panel, &props::HIDDEN, true, PropertySource::WidgetSpecific, PropertyState::All));
    assert!(tree.get(panel).unwrap().is_hidden());
    assert_eq!(tree.find_widget_under_position(center), None);

    let mut draw_list = DrawList::new();
    tree.update();
    tree.render(&mut draw_list);
    assert_eq!(draw_list.count_for(panel), 0);

    tree.set_property(panel, &props::HIDDEN, false, PropertySource::WidgetSpecific, PropertyState::All);
    assert!(!tree.get(panel).unwrap().is_hidden());
    assert_eq!(tree.find_widget_under_position(center), Some(panel));
}

#[test]
fn test_skin_can_hide_widget_type() {
    let mut tree = root_tree(800.0, 600.0);
    let root = tree.root();
    let panel = tree.spawn(root, sized(200.0, 200.0)).unwrap();
    let label = tree.spawn(root, WidgetNode::new(WidgetKind::Label, "caption")).unwrap();

    let skin = Skin::new("quiet").with("Label", &props::HIDDEN, true, PropertyState::All);
    assert_eq!(tree.apply_skin(root, &skin), 1);
    assert!(tree.get(label).unwrap().is_hidden());
    assert!(!tree.get(panel).unwrap().is_hidden());
}

#[test]
fn test_hit_test_prefers_later_sibling() {
    let mut tree = root_tree(800.0, 600.0);
    let root = tree.root();
    let below = tree.spawn(root, sized(200.0, 200.0)).unwrap();
    let above = tree.spawn(root, sized(100.0, 100.0)).unwrap();
    let center = Vec2::new(400.0, 300.0);

    assert_eq!(tree.find_widget_under_position(center), Some(above));
    // Outside the smaller box only the first one is hit.
    assert_eq!(tree.find_widget_under_position(Vec2::new(320.0, 220.0)), Some(below));
    assert_eq!(tree.find_widget_under_position(Vec2::new(10.0, 10.0)), None);
}

#[test]
fn test_hit_test_returns_deepest_and_skips_hidden() {
    let mut tree = root_tree(800.0, 600.0);
    let root = tree.root();
    let panel = tree.spawn(root, sized(400.0, 400.0)).unwrap();
    let button = tree.spawn(panel, sized(50.0, 50.0)).unwrap();
    let center = Vec2::new(400.0, 300.0);

    assert_eq!(tree.find_widget_under_position(center), Some(button));
    tree.set_hidden(button, true);
    assert_eq!(tree.find_widget_under_position(center), Some(panel));
    tree.set_hidden(panel, true);
    assert_eq!(tree.find_widget_under_position(center), None);
}

#[test]
fn test_hit_test_uses_corners_not_anchor() {
    let mut tree = root_tree(800.0, 600.0);
    let root = tree.root();
    let corner = tree
        .spawn(root, sized(100.0, 100.0).with(&props::ANCHOR, Anchor::TopRight))
        .unwrap();

    assert!(tree.is_point_inside(corner, Vec2::new(750.0, 550.0)));
    assert!(tree.is_point_inside(corner, Vec2::new(700.0, 500.0)));
    assert!(!tree.is_point_inside(corner, Vec2::new(650.0, 550.0)));
}
