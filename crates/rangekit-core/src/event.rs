//! Input delivered to widgets.
//!
//! Mouse and pointer events are kept apart: a mouse press is tracked through
//! document-level move/up listeners, while pointer events carry a
//! [`PointerId`] so a drag follows the finger or pen that started it.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    FocusIn,
    FocusOut,
    KeyDown {
        key: Key,
    },
    KeyUp {
        key: Key,
    },
    MouseDown {
        position: Point,
        button: MouseButton,
    },
    MouseMove {
        position: Point,
    },
    MouseUp {
        position: Point,
        button: MouseButton,
    },
    /// Touch, pen, or mouse contact. Only primary pointers start drags.
    PointerDown {
        pointer_id: PointerId,
        pointer_type: PointerType,
        position: Point,
        is_primary: bool,
    },
    PointerMove {
        pointer_id: PointerId,
        position: Point,
    },
    PointerUp {
        pointer_id: PointerId,
        position: Point,
    },
    /// The platform took the pointer away; treated like a release.
    PointerCancel {
        pointer_id: PointerId,
    },
}

impl Event {
    #[must_use]
    pub const fn is_focus(&self) -> bool {
        matches!(self, Self::FocusIn | Self::FocusOut)
    }

    #[must_use]
    pub const fn is_keyboard(&self) -> bool {
        matches!(self, Self::KeyDown { .. } | Self::KeyUp { .. })
    }

    #[must_use]
    pub const fn is_mouse(&self) -> bool {
        matches!(
            self,
            Self::MouseDown { .. } | Self::MouseMove { .. } | Self::MouseUp { .. }
        )
    }

    #[must_use]
    pub const fn is_pointer(&self) -> bool {
        self.pointer_id().is_some()
    }

    /// Where the event happened, for mouse and pointer events that have a
    /// location.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::MouseDown { position, .. }
            | Self::MouseMove { position }
            | Self::MouseUp { position, .. }
            | Self::PointerDown { position, .. }
            | Self::PointerMove { position, .. }
            | Self::PointerUp { position, .. } => Some(*position),
            _ => None,
        }
    }

    #[must_use]
    pub const fn pointer_id(&self) -> Option<PointerId> {
        match self {
            Self::PointerDown { pointer_id, .. }
            | Self::PointerMove { pointer_id, .. }
            | Self::PointerUp { pointer_id, .. }
            | Self::PointerCancel { pointer_id } => Some(*pointer_id),
            _ => None,
        }
    }
}

/// Platform pointer identity, stable for the length of one contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PointerId(pub u32);

impl PointerId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PointerType {
    #[default]
    Mouse,
    Touch,
    Pen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Keys a widget can be sent. Anything printable is a [`Key::Char`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Tab,
    Enter,
    Escape,
    Space,
    Char(char),
}

/// `KeyboardEvent.key` values for the non-character keys.
const DOM_NAMES: [(Key, &str); 12] = [
    (Key::Left, "ArrowLeft"),
    (Key::Right, "ArrowRight"),
    (Key::Up, "ArrowUp"),
    (Key::Down, "ArrowDown"),
    (Key::PageUp, "PageUp"),
    (Key::PageDown, "PageDown"),
    (Key::Home, "Home"),
    (Key::End, "End"),
    (Key::Tab, "Tab"),
    (Key::Enter, "Enter"),
    (Key::Escape, "Escape"),
    (Key::Space, " "),
];

impl Key {
    /// The browser's `KeyboardEvent.key` for this key.
    #[must_use]
    pub fn dom_name(&self) -> String {
        if let Self::Char(c) = self {
            return c.to_string();
        }
        DOM_NAMES
            .iter()
            .find(|(key, _)| key == self)
            .map(|(_, name)| (*name).to_owned())
            .unwrap_or_default()
    }

    /// Inverse of [`Key::dom_name`]. A single unnamed character becomes
    /// [`Key::Char`]; unknown multi-character names give `None`.
    #[must_use]
    pub fn from_dom_name(name: &str) -> Option<Self> {
        if let Some((key, _)) = DOM_NAMES.iter().find(|(_, dom)| *dom == name) {
            return Some(*key);
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Self::Char(c)),
            _ => None,
        }
    }
}
