//! Key bindings for a focused thumb.

use super::values::ValueBounds;
use rangekit_core::Key;

/// What a key does to the focused thumb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    /// Move by this many steps (negative moves toward `min`)
    Steps(f64),
    /// Jump to `min`
    ToMin,
    /// Jump to `max`
    ToMax,
}

impl KeyAction {
    /// Resolve a key. Keys the slider does not handle yield `None`.
    ///
    /// Arrow keys step by one, page keys by `page_multiplier`.
    /// `invert` reverses both; Home and End always go to `min` and `max`.
    #[must_use]
    pub fn resolve(key: Key, invert: bool, page_multiplier: f64) -> Option<Self> {
        let sign = if invert { -1.0 } else { 1.0 };
        let action = match key {
            Key::Right | Key::Up => Self::Steps(sign),
            Key::Left | Key::Down => Self::Steps(-sign),
            Key::PageUp => Self::Steps(sign * page_multiplier),
            Key::PageDown => Self::Steps(-sign * page_multiplier),
            Key::Home => Self::ToMin,
            Key::End => Self::ToMax,
            _ => return None,
        };
        Some(action)
    }

    /// Unclamped target value starting from `current`.
    #[must_use]
    pub fn target(self, current: f64, bounds: &ValueBounds) -> f64 {
        match self {
            Self::Steps(n) => n.mul_add(bounds.step, current),
            Self::ToMin => bounds.min,
            Self::ToMax => bounds.max,
        }
    }
}
