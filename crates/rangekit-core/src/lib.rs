//! Core types and traits for the rangekit widget toolkit.
//!
//! This crate provides foundational types used by rangekit widgets:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`Axis`]
//! - Color representation: [`Color`] with WCAG contrast calculations
//! - Layout constraints: [`Constraints`]
//! - Input: [`Event`], [`Key`], [`MouseButton`]
//! - Rendering: [`Widget`], [`Canvas`], [`RecordingCanvas`], [`DrawCommand`]
//! - Verification: [`Brick`] assertions and budgets
//! - Accessibility: [`AccessibleNode`]
//! - Document listeners: [`ListenerRegistry`] and RAII [`Subscription`]s

pub mod accessibility;
pub mod brick;
mod canvas;
mod color;
mod constraints;
pub mod draw;
mod event;
mod geometry;
pub mod listener;
pub mod widget;

pub use accessibility::{format_number, AccessibleNode, AccessibleNodeId};
pub use brick::{Brick, BrickAssertion, BrickBudget, BrickVerification};
pub use canvas::{Canvas, RecordingCanvas};
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use draw::DrawCommand;
pub use event::{Event, Key, MouseButton, PointerId, PointerType};
pub use geometry::{Axis, Point, Rect, Size};
pub use listener::{ListenerCall, ListenerId, ListenerKind, ListenerRegistry, Subscription};
pub use widget::{AccessibleRole, LayoutResult, TypeId, Widget};
