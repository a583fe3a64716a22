//! Size limits handed to [`Widget::measure`](crate::Widget::measure).

use crate::geometry::{Axis, Size};
use serde::{Deserialize, Serialize};

/// Smallest and largest size a widget may take.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Lower bound per dimension
    pub min: Size,
    /// Upper bound per dimension, possibly infinite
    pub max: Size,
}

impl Constraints {
    /// Bounds given as `(min_width, max_width, min_height, max_height)`.
    #[must_use]
    pub const fn new(min_width: f32, max_width: f32, min_height: f32, max_height: f32) -> Self {
        Self {
            min: Size::new(min_width, min_height),
            max: Size::new(max_width, max_height),
        }
    }

    /// Exactly `size`.
    #[must_use]
    pub const fn tight(size: Size) -> Self {
        Self {
            min: size,
            max: size,
        }
    }

    /// Anything from zero up to `size`.
    #[must_use]
    pub const fn loose(size: Size) -> Self {
        Self {
            min: Size::ZERO,
            max: size,
        }
    }

    /// No upper bound.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::loose(Size::new(f32::INFINITY, f32::INFINITY))
    }

    /// Clamp a preferred size into range.
    #[must_use]
    pub fn constrain(&self, size: Size) -> Size {
        Size::new(
            size.width.clamp(self.min.width, self.max.width),
            size.height.clamp(self.min.height, self.max.height),
        )
    }

    /// `(min, max)` along one axis.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> (f32, f32) {
        match axis {
            Axis::Horizontal => (self.min.width, self.max.width),
            Axis::Vertical => (self.min.height, self.max.height),
        }
    }

    /// Whether only one size satisfies these constraints.
    #[must_use]
    pub fn is_tight(&self) -> bool {
        self.min == self.max
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::unbounded()
    }
}
