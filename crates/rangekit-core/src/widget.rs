//! The [`Widget`] trait.
//!
//! A host drives each widget through four steps per frame: `verify` (from
//! [`Brick`]), `measure`, `layout`, then `paint`. Input goes through
//! [`Widget::event`], which can hand a message back to the host.
//!
//! ```
//! use rangekit_core::{AccessibleRole, TypeId};
//!
//! assert_ne!(TypeId::of::<u8>(), TypeId::of::<u16>());
//! assert_eq!(AccessibleRole::Slider.aria_name(), "slider");
//! ```

use crate::brick::Brick;
use crate::canvas::Canvas;
use crate::constraints::Constraints;
use crate::event::Event;
use crate::geometry::{Rect, Size};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Identity of a concrete widget type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(std::any::TypeId);

impl TypeId {
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

/// What [`Widget::layout`] settled on.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutResult {
    pub size: Size,
}

/// An interactive, paintable, verifiable UI element.
pub trait Widget: Brick + Send + Sync {
    fn type_id(&self) -> TypeId;

    /// Preferred size within `constraints`.
    fn measure(&self, constraints: Constraints) -> Size;

    /// Accept the area the host assigned.
    fn layout(&mut self, bounds: Rect) -> LayoutResult;

    fn paint(&self, canvas: &mut dyn Canvas);

    /// React to input. A returned message is for the host to downcast.
    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>>;

    fn is_interactive(&self) -> bool {
        false
    }

    fn is_focusable(&self) -> bool {
        false
    }

    /// Name announced by assistive technology.
    fn accessible_name(&self) -> Option<&str> {
        None
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Generic
    }

    /// Value of the `data-testid` attribute, if any.
    fn test_id(&self) -> Option<&str> {
        None
    }

    /// Area last passed to [`Widget::layout`].
    fn bounds(&self) -> Rect {
        Rect::default()
    }
}

/// ARIA role of a widget or one of its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessibleRole {
    #[default]
    Generic,
    /// Container for several sliders
    Group,
    /// One thumb
    Slider,
}

impl AccessibleRole {
    /// Value for the `role` attribute.
    #[must_use]
    pub const fn aria_name(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Group => "group",
            Self::Slider => "slider",
        }
    }
}
