//! Recorded paint operations.

use crate::{Color, Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// One filled shape, as produced by a [`Canvas`](crate::Canvas).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Axis-aligned rectangle
    Rect {
        /// Area covered
        bounds: Rect,
        /// Fill
        fill: Color,
    },
    /// Disc
    Circle {
        /// Middle of the disc
        center: Point,
        /// Radius in pixels
        radius: f32,
        /// Fill
        fill: Color,
    },
}

impl DrawCommand {
    /// The color this shape is filled with.
    #[must_use]
    pub const fn fill_color(&self) -> Color {
        match self {
            Self::Rect { fill, .. } | Self::Circle { fill, .. } => *fill,
        }
    }

    /// Smallest rectangle covering the shape.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match *self {
            Self::Rect { bounds, .. } => bounds,
            Self::Circle { center, radius, .. } => {
                Rect::centered_at(center, Size::new(radius * 2.0, radius * 2.0))
            }
        }
    }
}
