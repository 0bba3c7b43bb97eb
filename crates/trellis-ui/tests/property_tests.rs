//! Property priority, state fallback and skin interaction.

use trellis_core::color::Color;
use trellis_core::geometry::Size;
use trellis_ui::event::NullSink;
use trellis_ui::property::{PropertySource, PropertyState, PropertyTable, PropertyValue, props};
use trellis_ui::skin::Skin;
use trellis_ui::tree::UiTree;
use trellis_ui::widget::{WidgetKind, WidgetNode, WidgetState};

const SOURCES: [PropertySource; 3] = [
    PropertySource::CodeDefault,
    PropertySource::Skin,
    PropertySource::WidgetSpecific,
];

const STATES: [WidgetState; 4] = [
    WidgetState::Disabled,
    WidgetState::Enabled,
    WidgetState::Highlighted,
    WidgetState::Pressed,
];

#[test]
fn test_widget_specific_is_never_downgraded() {
    for state in [
        PropertyState::All,
        PropertyState::Enabled,
        PropertyState::Highlighted,
    ] {
        let mut table = PropertyTable::new();
        table.set(&props::WIDTH, 42.0, PropertySource::WidgetSpecific, state);

        assert!(!table.set(&props::WIDTH, 1.0, PropertySource::Skin, state));
        assert!(!table.set(&props::WIDTH, 2.0, PropertySource::CodeDefault, state));
        assert_eq!(
            table.entry("Width", state).map(|e| e.value.clone()),
            Some(PropertyValue::Float(42.0))
        );

        assert!(table.set(&props::WIDTH, 64.0, PropertySource::WidgetSpecific, state));
        assert_eq!(
            table.entry("Width", state).map(|e| e.value.clone()),
            Some(PropertyValue::Float(64.0))
        );
    }
}

#[test]
fn test_priority_order_is_total() {
    for (i, first) in SOURCES.iter().enumerate() {
        for (j, second) in SOURCES.iter().enumerate() {
            let mut table = PropertyTable::new();
            table.set(&props::FONT_SIZE, 10.0, *first, PropertyState::All);
            let accepted = table.set(&props::FONT_SIZE, 20.0, *second, PropertyState::All);
            assert_eq!(accepted, j >= i, "{first:?} then {second:?}");
        }
    }
}

#[test]
fn test_highlighted_fallback_chain() {
    let mut table = PropertyTable::new();
    let mut color = Color::BLACK;

    table.get(&props::BACKGROUND_COLOR, WidgetState::Highlighted, &mut color);
    assert_eq!(color, Color::BLACK);

    table.set(&props::BACKGROUND_COLOR, Color::RED, PropertySource::CodeDefault, PropertyState::All);
    table.get(&props::BACKGROUND_COLOR, WidgetState::Highlighted, &mut color);
    assert_eq!(color, Color::RED);

    table.set(
        &props::BACKGROUND_COLOR,
        Color::GREEN,
        PropertySource::CodeDefault,
        PropertyState::Highlighted,
    );
    table.get(&props::BACKGROUND_COLOR, WidgetState::Highlighted, &mut color);
    assert_eq!(color, Color::GREEN);

    // Other states still fall back to All.
    for state in STATES.into_iter().filter(|s| *s != WidgetState::Highlighted) {
        assert_eq!(table.try_get(&props::BACKGROUND_COLOR, state), Some(Color::RED));
    }
}

#[test]
fn test_state_change_re_resolves_properties() {
    let mut tree = UiTree::with_root_size(Size::new(200.0, 200.0));
    let root = tree.root();
    let button = tree
        .spawn(
            root,
            WidgetNode::new(WidgetKind::Button, "ok")
                .with(&props::TEXT_COLOR, Color::WHITE)
                .with_state(&props::TEXT_COLOR, Color::RED, PropertyState::Pressed),
        )
        .unwrap();

    let mut sink = NullSink;
    assert_eq!(tree.property(button, &props::TEXT_COLOR), Some(Color::WHITE));
    tree.highlight(button, &mut sink);
    tree.press(button, &mut sink);
    assert_eq!(tree.property(button, &props::TEXT_COLOR), Some(Color::RED));
    tree.release(button, &mut sink);
    assert_eq!(tree.property(button, &props::TEXT_COLOR), Some(Color::WHITE));
}

#[test]
fn test_skin_replaces_defaults_but_not_specific_values() {
    let mut tree = UiTree::with_root_size(Size::new(200.0, 200.0));
    let root = tree.root();
    let plain = tree.spawn(root, WidgetNode::new(WidgetKind::Button, "plain")).unwrap();
    let custom = tree
        .spawn(
            root,
            WidgetNode::new(WidgetKind::Button, "custom").with(&props::BACKGROUND_COLOR, Color::BLUE),
        )
        .unwrap();

    let skin = Skin::new("red").with("Button", &props::BACKGROUND_COLOR, Color::RED, PropertyState::All);
    let accepted = tree.apply_skin(root, &skin);

    assert_eq!(accepted, 1);
    assert_eq!(tree.property(plain, &props::BACKGROUND_COLOR), Some(Color::RED));
    assert_eq!(tree.property(custom, &props::BACKGROUND_COLOR), Some(Color::BLUE));

    // Re-applying a skin is allowed: equal source keeps the newest write.
    let green = Skin::new("green").with("Button", &props::BACKGROUND_COLOR, Color::GREEN, PropertyState::All);
    tree.apply_skin(root, &green);
    assert_eq!(tree.property(plain, &props::BACKGROUND_COLOR), Some(Color::GREEN));
}

#[test]
fn test_accepted_write_dirties_rejected_does_not() {
    let mut tree = UiTree::with_root_size(Size::new(200.0, 200.0));
    let root = tree.root();
    let label = tree
        .spawn(root, WidgetNode::new(WidgetKind::Label, "title").with(&props::FONT_SIZE, 24.0))
        .unwrap();
    tree.update();
    assert!(!tree.get(label).unwrap().is_dirty());

    assert!(!tree.set_property(label, &props::FONT_SIZE, 12.0, PropertySource::Skin, PropertyState::All));
    assert!(!tree.get(label).unwrap().is_dirty());

    assert!(tree.set_property(
        label,
        &props::FONT_SIZE,
        30.0,
        PropertySource::WidgetSpecific,
        PropertyState::All
    ));
    assert!(tree.get(label).unwrap().is_dirty());
}
