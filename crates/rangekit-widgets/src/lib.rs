//! Widget implementations for the rangekit toolkit.
//!
//! ```
//! use rangekit_core::{Key, Event, Widget};
//! use rangekit_widgets::{RangeSlider, SliderConfig, SliderValue};
//!
//! let mut slider = RangeSlider::new(SliderConfig::new().range(0.0, 10.0)).unwrap();
//! slider.focus_thumb(0);
//! slider.event(&Event::KeyDown { key: Key::Right });
//! assert_eq!(slider.value(), SliderValue::Single(1.0));
//! ```

pub mod range_slider;

pub use range_slider::{
    clamp_against_neighbors, ConfigError, DefaultThumbRenderer, InteractionSession, KeyAction,
    KeyConsumed, Marks, NeighborOptions, RangeSlider, RangeSliderChanged, RangeSliderCommitted,
    SessionKind, SliderConfig, SliderValue, ThumbProps, ThumbRenderer, ThumbState, ValueBounds,
    ValueSet,
};
