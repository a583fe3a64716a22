//! Mouse and touch drags through the public API.

use rangekit_core::{Axis, ListenerKind, ListenerRegistry, Point, Rect};
use rangekit_test::{Harness, MockFn};
use rangekit_widgets::{
    RangeSlider, RangeSliderChanged, RangeSliderCommitted, SliderConfig, SliderValue,
};

type Calls = MockFn<(SliderValue, usize)>;

/// A 120px wide slider with 20px thumbs: thumb centers travel from x = 10 to
/// x = 110, one pixel per unit on a 0..100 range.
fn harness(config: SliderConfig) -> Harness<RangeSlider> {
    let mut harness = Harness::new(RangeSlider::new(config).expect("valid config"));
    harness.layout(Rect::new(0.0, 0.0, 120.0, 20.0));
    harness
}

fn at(value: f32) -> Point {
    Point::new(10.0 + value, 10.0)
}

// =============================================================================
// Mouse Tests
// =============================================================================

#[test]
fn test_click_sets_value_and_commits() {
    let before = Calls::new();
    let change = Calls::new();
    let after = Calls::new();
    let slider = RangeSlider::new(SliderConfig::new())
        .expect("valid config")
        .on_before_change(before.recorder())
        .on_change(change.recorder())
        .on_after_change(after.recorder());
    let mut h = Harness::new(slider);
    h.layout(Rect::new(0.0, 0.0, 120.0, 20.0));

    h.click(at(25.0));
    assert_eq!(before.calls(), vec![(SliderValue::Single(0.0), 0)]);
    assert_eq!(change.calls(), vec![(SliderValue::Single(25.0), 0)]);
    assert_eq!(after.calls(), vec![(SliderValue::Single(25.0), 0)]);
    h.assert_message_count::<RangeSliderChanged>(1)
        .assert_message_count::<RangeSliderCommitted>(1);
}

#[test]
fn test_drag_path() {
    let change = Calls::new();
    let slider = RangeSlider::new(SliderConfig::new())
        .expect("valid config")
        .on_change(change.recorder());
    let mut h = Harness::new(slider);
    h.layout(Rect::new(0.0, 0.0, 120.0, 20.0));

    h.drag(at(30.0), &[at(20.0), at(20.0), at(40.0), at(200.0)]);
    let values: Vec<f64> = change
        .calls()
        .into_iter()
        .map(|(v, _)| v.as_slice()[0])
        .collect();
    assert_eq!(values, vec![30.0, 20.0, 40.0, 100.0]);
    assert_eq!(h.widget().value(), SliderValue::Single(100.0));
    assert!(h.widget().session().is_none());
}

#[test]
fn test_drag_registers_mouse_listeners_only_while_pressed() {
    let document = ListenerRegistry::new();
    let slider = RangeSlider::new(SliderConfig::new())
        .expect("valid config")
        .with_document(document.clone());
    let mut h = Harness::new(slider);
    h.layout(Rect::new(0.0, 0.0, 120.0, 20.0));

    h.mouse_down(at(50.0));
    assert_eq!(
        document.active(),
        vec![ListenerKind::MouseMove, ListenerKind::MouseUp]
    );
    h.mouse_move(at(60.0));
    h.mouse_up(at(60.0));
    assert_eq!(document.active_count(), 0);
}

#[test]
fn test_click_without_change_does_not_commit() {
    let after = Calls::new();
    let slider = RangeSlider::new(SliderConfig::new().value(40.0))
        .expect("valid config")
        .on_after_change(after.recorder());
    let mut h = Harness::new(slider);
    h.layout(Rect::new(0.0, 0.0, 120.0, 20.0));

    h.click(at(40.0));
    assert!(!after.was_called());
    assert_eq!(h.message_count(), 0);
}

#[test]
fn test_range_drag_keeps_order() {
    let mut h = harness(SliderConfig::new().value(vec![20.0, 60.0]));

    h.drag(at(60.0), &[at(30.0), at(5.0)]);
    assert_eq!(h.widget().values(), &[20.0, 20.0]);

    // pressing just below a stack grabs the lower thumb
    h.drag(at(12.5), &[at(2.5)]);
    assert_eq!(h.widget().values(), &[10.0, 20.0]);
}

#[test]
fn test_min_distance_enforced_while_dragging() {
    let mut h = harness(SliderConfig::new().value(vec![20.0, 60.0]).min_distance(10.0));

    h.drag(at(20.0), &[at(80.0)]);
    assert_eq!(h.widget().values(), &[50.0, 60.0]);
}

#[test]
fn test_pearling_drag_pushes_neighbors() {
    let mut h = harness(
        SliderConfig::new()
            .value(vec![20.0, 40.0, 60.0])
            .min_distance(5.0)
            .pearling(true),
    );

    h.drag(at(20.0), &[at(90.0)]);
    assert_eq!(h.widget().values(), &[90.0, 95.0, 100.0]);
}

#[test]
fn test_vertical_drag() {
    let slider = RangeSlider::new(SliderConfig::new().orientation(Axis::Vertical))
        .expect("valid config");
    let mut h = Harness::new(slider);
    h.layout(Rect::new(0.0, 0.0, 20.0, 120.0));

    h.drag(Point::new(10.0, 10.0), &[Point::new(10.0, 85.0)]);
    assert_eq!(h.widget().value(), SliderValue::Single(75.0));
}

// =============================================================================
// Touch Pointer Tests
// =============================================================================

#[test]
fn test_touch_drag_follows_its_pointer() {
    let document = ListenerRegistry::new();
    let after = Calls::new();
    let slider = RangeSlider::new(SliderConfig::new())
        .expect("valid config")
        .with_document(document.clone())
        .on_after_change(after.recorder());
    let mut h = Harness::new(slider);
    h.layout(Rect::new(0.0, 0.0, 120.0, 20.0));

    h.pointer_down(7, at(30.0));
    assert_eq!(
        document.active(),
        vec![
            ListenerKind::PointerMove,
            ListenerKind::PointerUp,
            ListenerKind::PointerCancel
        ]
    );
    h.pointer_move(8, at(90.0));
    assert_eq!(h.widget().value(), SliderValue::Single(30.0));
    h.pointer_move(7, at(45.0));
    h.pointer_up(8, at(45.0));
    assert!(h.widget().session().is_some());
    h.pointer_up(7, at(45.0));

    assert_eq!(after.calls(), vec![(SliderValue::Single(45.0), 0)]);
    assert_eq!(document.active_count(), 0);
}

#[test]
fn test_touch_cancel_commits() {
    let after = Calls::new();
    let slider = RangeSlider::new(SliderConfig::new())
        .expect("valid config")
        .on_after_change(after.recorder());
    let mut h = Harness::new(slider);
    h.layout(Rect::new(0.0, 0.0, 120.0, 20.0));

    h.pointer_down(1, at(50.0)).pointer_move(1, at(15.0)).pointer_cancel(1);
    assert_eq!(after.calls(), vec![(SliderValue::Single(15.0), 0)]);
}

#[test]
fn test_disabled_slider_ignores_pointers() {
    let change = Calls::new();
    let slider = RangeSlider::new(SliderConfig::new().disabled(true))
        .expect("valid config")
        .on_change(change.recorder());
    let mut h = Harness::new(slider);
    h.layout(Rect::new(0.0, 0.0, 120.0, 20.0));

    h.click(at(50.0)).pointer_down(1, at(50.0));
    assert!(!change.was_called());
    assert_eq!(h.message_count(), 0);
}
