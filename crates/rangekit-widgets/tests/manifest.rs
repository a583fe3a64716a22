//! YAML manifests and serialized messages.

use rangekit_core::{Axis, Color, Key, Widget};
use rangekit_test::Harness;
use rangekit_widgets::{
    ConfigError, Marks, RangeSlider, RangeSliderChanged, RangeSliderCommitted, SliderConfig,
    SliderValue,
};

const MANIFEST: &str = r##"
min: 0
max: 10
step: 0.5
default_value: [2, 8]
orientation: vertical
invert: true
min_distance: 1
thumb_class_name: test-thumb
aria_label: [Low, High]
aria_valuetext: "{value} of 10"
marks: 5
active_color: "#ff0000"
"##;

#[test]
fn test_manifest_loads() {
    let config = SliderConfig::from_yaml(MANIFEST).expect("valid manifest");
    assert_eq!(config.step, 0.5);
    assert_eq!(config.default_value, SliderValue::Multiple(vec![2.0, 8.0]));
    assert_eq!(config.orientation, Axis::Vertical);
    assert!(config.invert);
    assert_eq!(config.marks, Some(Marks::Interval(5.0)));
    assert_eq!(config.active_color, Color::rgb(1.0, 0.0, 0.0));
    assert_eq!(config.page_multiplier, 10.0);
    assert_eq!(config.mark_values(), vec![0.0, 5.0, 10.0]);
}

#[test]
fn test_manifest_roundtrips_through_yaml() {
    let config = SliderConfig::from_yaml(MANIFEST).expect("valid manifest");
    let yaml = config.to_yaml().expect("serializes");
    assert_eq!(SliderConfig::from_yaml(&yaml).expect("reparses"), config);
}

#[test]
fn test_manifest_drives_a_slider() {
    let slider = RangeSlider::from_yaml(MANIFEST).expect("valid manifest");
    let mut harness = Harness::new(slider);
    harness
        .assert_html_contains(r#"class="slider vertical invert""#)
        .assert_html_contains(r#"aria-label="High""#)
        .assert_html_contains(r#"aria-valuetext="8 of 10""#)
        .assert_verified();

    harness.focus().key_down(Key::PageDown);
    assert_eq!(harness.widget().values(), &[7.0, 8.0]);
    assert_eq!(harness.widget().accessible_name(), Some("Low"));
}

#[test]
fn test_manifest_errors() {
    assert!(matches!(
        SliderConfig::from_yaml("step: 0").and_then(|c| c.validate()),
        Err(ConfigError::StepNotPositive(_))
    ));
    assert!(matches!(
        RangeSlider::from_yaml("min: 5\nmax: 1"),
        Err(ConfigError::InvertedBounds { .. })
    ));
    assert!(matches!(
        RangeSlider::from_yaml("page_multiplier: -2"),
        Err(ConfigError::PageMultiplierNotPositive(_))
    ));
    assert!(matches!(
        RangeSlider::from_yaml("default_value: []"),
        Err(ConfigError::EmptyValue)
    ));
    assert!(matches!(
        RangeSlider::from_yaml("max: 10\nmin_distance: 6\ndefault_value: [1, 2, 3]"),
        Err(ConfigError::ThumbsDoNotFit { count: 3, .. })
    ));
    assert!(matches!(
        RangeSlider::from_yaml("thumb_color: \"#zzzzzz\""),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(RangeSlider::from_yaml("max: [1"), Err(ConfigError::Parse(_))));
}

#[test]
fn test_error_messages() {
    let err = RangeSlider::from_yaml("min_distance: -1").expect_err("rejected");
    assert_eq!(err.to_string(), "min_distance must not be negative, got -1");
}

#[test]
fn test_messages_as_json() {
    let changed = RangeSliderChanged {
        value: SliderValue::Single(3.5),
        index: 0,
    };
    assert_eq!(
        serde_json::to_value(&changed).expect("serializes"),
        serde_json::json!({ "value": 3.5, "index": 0 })
    );

    let committed: RangeSliderCommitted =
        serde_json::from_str(r#"{"value":[1,9],"index":1}"#).expect("deserializes");
    assert_eq!(committed.value, SliderValue::Multiple(vec![1.0, 9.0]));
}
