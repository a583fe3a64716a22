//! Slider configuration, loadable from YAML manifests.

use super::values::{NeighborOptions, SliderValue, ValueBounds};
use rangekit_core::{Axis, Color};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a slider configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `step` is zero or negative.
    #[error("step must be positive, got {0}")]
    StepNotPositive(f64),

    /// `min` is greater than `max`.
    #[error("min ({min}) must not exceed max ({max})")]
    InvertedBounds {
        /// Configured minimum
        min: f64,
        /// Configured maximum
        max: f64,
    },

    /// A numeric field is NaN or infinite.
    #[error("{field} must be finite")]
    NonFinite {
        /// Name of the offending field
        field: &'static str,
    },

    /// `min_distance` is negative.
    #[error("min_distance must not be negative, got {0}")]
    NegativeMinDistance(f64),

    /// `min_distance` is not a whole number of steps.
    #[error("min_distance {min_distance} is not a multiple of step {step}")]
    MinDistanceOffGrid {
        /// Configured gap
        min_distance: f64,
        /// Configured step
        step: f64,
    },

    /// Tick marks spaced closer than one step.
    #[error("marks interval {interval} is smaller than step {step}")]
    MarksTooDense {
        /// Configured interval
        interval: f64,
        /// Configured step
        step: f64,
    },

    /// `page_multiplier` is zero or negative.
    #[error("page_multiplier must be positive, got {0}")]
    PageMultiplierNotPositive(f64),

    /// A multi-thumb value with no thumbs.
    #[error("value must contain at least one thumb")]
    EmptyValue,

    /// The thumbs cannot be spaced `min_distance` apart within the range.
    #[error("{count} thumbs do not fit in [{min}, {max}] with min_distance {min_distance}")]
    ThumbsDoNotFit {
        /// Thumb count
        count: usize,
        /// Configured minimum
        min: f64,
        /// Configured maximum
        max: f64,
        /// Configured gap
        min_distance: f64,
    },

    /// The manifest could not be parsed.
    #[error("failed to parse slider config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

/// Upper limit on interval marks, however wide the range.
const MAX_MARKS: usize = 1_000;

/// Where tick marks are painted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Marks {
    /// Every `n` units from `min`
    Interval(f64),
    /// At these values
    Values(Vec<f64>),
}

/// Configuration for a [`RangeSlider`](super::RangeSlider).
///
/// ```yaml
/// min: 0
/// max: 10
/// default_value: [2, 8]
/// orientation: vertical
/// invert: true
/// thumb_class_name: test-thumb
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Lowest value
    pub min: f64,
    /// Highest value
    pub max: f64,
    /// Value granularity
    pub step: f64,
    /// Controlled value; overrides `default_value` when set
    pub value: Option<SliderValue>,
    /// Uncontrolled starting value
    pub default_value: SliderValue,
    /// Track direction
    pub orientation: Axis,
    /// Put `max` at the start of the track and reverse the arrow keys
    pub invert: bool,
    /// PageUp/PageDown move by `step * page_multiplier`
    pub page_multiplier: f64,
    /// Minimum gap between adjacent thumbs
    pub min_distance: f64,
    /// Moving thumbs push their neighbors
    pub pearling: bool,
    /// Pressing the track does not jump the nearest thumb
    pub snap_drag_disabled: bool,
    /// Ignore all input
    pub disabled: bool,
    /// Tick marks
    pub marks: Option<Marks>,
    /// Root class
    pub class_name: String,
    /// Thumb class; thumbs also get `{thumb_class_name}-{index}`
    pub thumb_class_name: String,
    /// Extra class on the focused or dragged thumb
    pub thumb_active_class_name: String,
    /// Track segment class
    pub track_class_name: String,
    /// Tick mark class
    pub mark_class_name: String,
    /// Paint track segments between thumbs
    pub with_tracks: bool,
    /// Accessible label per thumb
    pub aria_label: Vec<String>,
    /// Accessible value text; `{value}` and `{index}` are substituted
    pub aria_valuetext: Option<String>,
    /// Inactive track color
    pub track_color: Color,
    /// Color of the selected range
    pub active_color: Color,
    /// Thumb color
    pub thumb_color: Color,
    /// Thumb edge length
    pub thumb_size: f32,
    /// Track cross-axis thickness
    pub track_thickness: f32,
    /// Test ID
    pub test_id: Option<String>,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
            value: None,
            default_value: SliderValue::Single(0.0),
            orientation: Axis::Horizontal,
            invert: false,
            page_multiplier: 10.0,
            min_distance: 0.0,
            pearling: false,
            snap_drag_disabled: false,
            disabled: false,
            marks: None,
            class_name: "slider".into(),
            thumb_class_name: "thumb".into(),
            thumb_active_class_name: "active".into(),
            track_class_name: "track".into(),
            mark_class_name: "mark".into(),
            with_tracks: true,
            aria_label: Vec::new(),
            aria_valuetext: None,
            track_color: Color::new(0.8, 0.8, 0.8, 1.0),
            active_color: Color::new(0.2, 0.6, 1.0, 1.0),
            thumb_color: Color::new(0.2, 0.2, 0.2, 1.0),
            thumb_size: 20.0,
            track_thickness: 4.0,
            test_id: None,
        }
    }
}

impl SliderConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML manifest and validate it.
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Set the range.
    #[must_use]
    pub const fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Set the step.
    #[must_use]
    pub const fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Set the controlled value.
    #[must_use]
    pub fn value(mut self, value: impl Into<SliderValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the uncontrolled starting value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<SliderValue>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Set the orientation.
    #[must_use]
    pub const fn orientation(mut self, orientation: Axis) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set inversion.
    #[must_use]
    pub const fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Set the PageUp/PageDown multiplier.
    #[must_use]
    pub const fn page_multiplier(mut self, multiplier: f64) -> Self {
        self.page_multiplier = multiplier;
        self
    }

    /// Set the minimum gap between thumbs.
    #[must_use]
    pub const fn min_distance(mut self, distance: f64) -> Self {
        self.min_distance = distance;
        self
    }

    /// Enable pearling.
    #[must_use]
    pub const fn pearling(mut self, pearling: bool) -> Self {
        self.pearling = pearling;
        self
    }

    /// Keep the drag offset when the track is pressed.
    #[must_use]
    pub const fn snap_drag_disabled(mut self, disabled: bool) -> Self {
        self.snap_drag_disabled = disabled;
        self
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set tick marks.
    #[must_use]
    pub fn marks(mut self, marks: Marks) -> Self {
        self.marks = Some(marks);
        self
    }

    /// Set the root class.
    #[must_use]
    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.class_name = class.into();
        self
    }

    /// Set the thumb class.
    #[must_use]
    pub fn thumb_class_name(mut self, class: impl Into<String>) -> Self {
        self.thumb_class_name = class.into();
        self
    }

    /// Set the active thumb class.
    #[must_use]
    pub fn thumb_active_class_name(mut self, class: impl Into<String>) -> Self {
        self.thumb_active_class_name = class.into();
        self
    }

    /// Set the track class.
    #[must_use]
    pub fn track_class_name(mut self, class: impl Into<String>) -> Self {
        self.track_class_name = class.into();
        self
    }

    /// Set the mark class.
    #[must_use]
    pub fn mark_class_name(mut self, class: impl Into<String>) -> Self {
        self.mark_class_name = class.into();
        self
    }

    /// Show or hide track segments.
    #[must_use]
    pub const fn with_tracks(mut self, with_tracks: bool) -> Self {
        self.with_tracks = with_tracks;
        self
    }

    /// Set one accessible label per thumb.
    #[must_use]
    pub fn aria_label<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aria_label = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Set the accessible value text template.
    #[must_use]
    pub fn aria_valuetext(mut self, template: impl Into<String>) -> Self {
        self.aria_valuetext = Some(template.into());
        self
    }

    /// Set track color.
    #[must_use]
    pub const fn track_color(mut self, color: Color) -> Self {
        self.track_color = color;
        self
    }

    /// Set selected range color.
    #[must_use]
    pub const fn active_color(mut self, color: Color) -> Self {
        self.active_color = color;
        self
    }

    /// Set thumb color.
    #[must_use]
    pub const fn thumb_color(mut self, color: Color) -> Self {
        self.thumb_color = color;
        self
    }

    /// Set thumb size.
    #[must_use]
    pub fn thumb_size(mut self, size: f32) -> Self {
        self.thumb_size = size.max(0.0);
        self
    }

    /// Set track thickness.
    #[must_use]
    pub fn track_thickness(mut self, thickness: f32) -> Self {
        self.track_thickness = thickness.max(0.0);
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id = Some(id.into());
        self
    }

    /// Reject configurations the slider cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, v) in [
            ("min", self.min),
            ("max", self.max),
            ("step", self.step),
            ("page_multiplier", self.page_multiplier),
            ("min_distance", self.min_distance),
        ] {
            if !v.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        if !self.thumb_size.is_finite() {
            return Err(ConfigError::NonFinite { field: "thumb_size" });
        }
        if !self.track_thickness.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "track_thickness",
            });
        }
        if self.step <= 0.0 {
            return Err(ConfigError::StepNotPositive(self.step));
        }
        if self.min > self.max {
            return Err(ConfigError::InvertedBounds {
                min: self.min,
                max: self.max,
            });
        }
        if self.page_multiplier <= 0.0 {
            return Err(ConfigError::PageMultiplierNotPositive(self.page_multiplier));
        }
        if self.min_distance < 0.0 {
            return Err(ConfigError::NegativeMinDistance(self.min_distance));
        }
        let gap_steps = self.min_distance / self.step;
        if (gap_steps - gap_steps.round()).abs() > 1e-6 {
            return Err(ConfigError::MinDistanceOffGrid {
                min_distance: self.min_distance,
                step: self.step,
            });
        }
        if let Some(Marks::Interval(interval)) = &self.marks {
            if *interval < self.step {
                return Err(ConfigError::MarksTooDense {
                    interval: *interval,
                    step: self.step,
                });
            }
        }

        let (field, initial) = match &self.value {
            Some(v) => ("value", v),
            None => ("default_value", &self.default_value),
        };
        if initial.is_empty() {
            return Err(ConfigError::EmptyValue);
        }
        if initial.as_slice().iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::NonFinite { field });
        }
        self.check_fits(initial.len())
    }

    pub(crate) fn check_fits(&self, count: usize) -> Result<(), ConfigError> {
        let needed = count.saturating_sub(1) as f64 * self.min_distance;
        if needed > self.bounds().top() - self.min {
            return Err(ConfigError::ThumbsDoNotFit {
                count,
                min: self.min,
                max: self.max,
                min_distance: self.min_distance,
            });
        }
        Ok(())
    }

    /// Value the slider starts with.
    #[must_use]
    pub fn initial_value(&self) -> &SliderValue {
        self.value.as_ref().unwrap_or(&self.default_value)
    }

    /// Range and step.
    #[must_use]
    pub const fn bounds(&self) -> ValueBounds {
        ValueBounds::new(self.min, self.max, self.step)
    }

    /// Neighbor rules for moving thumbs, bounded by the step grid.
    #[must_use]
    pub fn neighbor_options(&self) -> NeighborOptions {
        NeighborOptions {
            min: self.min,
            max: self.bounds().top(),
            min_distance: self.min_distance,
            pearling: self.pearling,
        }
    }

    /// Values at which tick marks are painted.
    #[must_use]
    pub fn mark_values(&self) -> Vec<f64> {
        match &self.marks {
            None => Vec::new(),
            Some(Marks::Values(values)) => values
                .iter()
                .copied()
                .filter(|v| (self.min..=self.max).contains(v))
                .collect(),
            Some(Marks::Interval(interval)) if *interval > 0.0 => {
                let count = (((self.max - self.min) / interval).floor() as usize).min(MAX_MARKS);
                (0..=count)
                    .map(|i| (i as f64).mul_add(*interval, self.min))
                    .collect()
            }
            Some(Marks::Interval(_)) => Vec::new(),
        }
    }

    /// Accessible value text for a thumb.
    #[must_use]
    pub fn value_text(&self, value: f64, index: usize) -> Option<String> {
        self.aria_valuetext.as_ref().map(|template| {
            template
                .replace("{value}", &rangekit_core::format_number(value))
                .replace("{index}", &index.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SliderConfig::default();
        assert_eq!(config.min, 0.0);
        assert_eq!(config.max, 100.0);
        assert_eq!(config.step, 1.0);
        assert_eq!(config.page_multiplier, 10.0);
        assert_eq!(config.thumb_class_name, "thumb");
        assert_eq!(config.initial_value(), &SliderValue::Single(0.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SliderConfig::new()
            .range(0.0, 10.0)
            .step(2.0)
            .default_value(vec![2.0, 8.0])
            .orientation(Axis::Vertical)
            .invert(true)
            .min_distance(2.0)
            .pearling(true)
            .thumb_size(-1.0);
        assert_eq!(config.bounds(), ValueBounds::new(0.0, 10.0, 2.0));
        assert!(config.neighbor_options().pearling);
        assert_eq!(config.thumb_size, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_controlled_value_wins() {
        let config = SliderConfig::new().default_value(10.0).value(40.0);
        assert_eq!(config.initial_value(), &SliderValue::Single(40.0));
    }

    #[test]
    fn test_validate_step() {
        let err = SliderConfig::new().step(0.0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::StepNotPositive(_)));
        assert_eq!(err.to_string(), "step must be positive, got 0");
    }

    #[test]
    fn test_validate_inverted_bounds() {
        let err = SliderConfig::new().range(10.0, 0.0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvertedBounds { .. }));
    }

    #[test]
    fn test_validate_non_finite() {
        let err = SliderConfig::new().range(0.0, f64::INFINITY).validate().unwrap_err();
        assert!(matches!(err, ConfigError::NonFinite { field: "max" }));

        let err = SliderConfig::new()
            .default_value(vec![1.0, f64::NAN])
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NonFinite { field: "default_value" }));
    }

    #[test]
    fn test_validate_empty_value() {
        let err = SliderConfig::new()
            .value(Vec::<f64>::new())
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyValue));
    }

    #[test]
    fn test_validate_min_distance() {
        let err = SliderConfig::new().min_distance(-1.0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::NegativeMinDistance(_)));

        let err = SliderConfig::new()
            .range(0.0, 10.0)
            .default_value(vec![0.0, 5.0, 10.0])
            .min_distance(6.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ThumbsDoNotFit { count: 3, .. }));
    }

    #[test]
    fn test_validate_min_distance_on_grid() {
        let err = SliderConfig::new()
            .range(0.0, 10.0)
            .min_distance(1.5)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MinDistanceOffGrid { .. }));
        assert_eq!(err.to_string(), "min_distance 1.5 is not a multiple of step 1");

        assert!(SliderConfig::new().step(0.1).min_distance(0.3).validate().is_ok());
        assert!(SliderConfig::new().step(0.5).min_distance(1.5).validate().is_ok());
    }

    #[test]
    fn test_neighbor_limit_is_top_of_grid() {
        let config = SliderConfig::new().range(0.0, 10.0).step(4.0);
        assert_eq!(config.neighbor_options().max, 8.0);
        assert_eq!(config.bounds().top(), 8.0);
    }

    #[test]
    fn test_validate_marks_interval() {
        let err = SliderConfig::new()
            .step(2.0)
            .marks(Marks::Interval(0.5))
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MarksTooDense { .. }));
        assert!(SliderConfig::new().marks(Marks::Interval(0.0)).validate().is_err());
        assert!(SliderConfig::new().marks(Marks::Interval(1.0)).validate().is_ok());
    }

    #[test]
    fn test_interval_marks_are_capped() {
        let config = SliderConfig::new()
            .range(0.0, 1e12)
            .marks(Marks::Interval(1.0));
        assert_eq!(config.mark_values().len(), MAX_MARKS + 1);
    }

    #[test]
    fn test_validate_page_multiplier() {
        let err = SliderConfig::new().page_multiplier(0.0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::PageMultiplierNotPositive(_)));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r##"
min: 0
max: 10
default_value: [2, 8]
orientation: vertical
invert: true
thumb_class_name: test-thumb
track_color: "#ff0000"
marks: 5
"##;
        let config = SliderConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.max, 10.0);
        assert_eq!(config.default_value, SliderValue::Multiple(vec![2.0, 8.0]));
        assert_eq!(config.orientation, Axis::Vertical);
        assert!(config.invert);
        assert_eq!(config.thumb_class_name, "test-thumb");
        assert_eq!(config.track_color, Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(config.mark_values(), vec![0.0, 5.0, 10.0]);
        assert_eq!(config.step, 1.0);
    }

    #[test]
    fn test_from_yaml_rejects_invalid() {
        assert!(matches!(
            SliderConfig::from_yaml("step: -1"),
            Err(ConfigError::StepNotPositive(_))
        ));
        assert!(matches!(
            SliderConfig::from_yaml("min: [oops"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SliderConfig::from_yaml("track_color: \"#zz\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = SliderConfig::new().default_value(vec![1.0, 2.0]).invert(true);
        let yaml = config.to_yaml().unwrap();
        assert_eq!(SliderConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_mark_values() {
        let config = SliderConfig::new()
            .range(0.0, 10.0)
            .marks(Marks::Values(vec![-1.0, 3.0, 7.0, 11.0]));
        assert_eq!(config.mark_values(), vec![3.0, 7.0]);
        assert!(SliderConfig::new().marks(Marks::Interval(0.0)).mark_values().is_empty());
    }

    #[test]
    fn test_value_text() {
        let config = SliderConfig::new().aria_valuetext("Thumb {index}: {value}");
        assert_eq!(config.value_text(4.0, 1).as_deref(), Some("Thumb 1: 4"));
        assert_eq!(SliderConfig::new().value_text(4.0, 0), None);
    }
}
