//! Interaction sessions.
//!
//! A session lasts from the moment a thumb takes control (focus or press)
//! until it releases it (keyup, blur, pointer release). It owns the
//! document listeners it registered; dropping the session removes them.

use rangekit_core::{ListenerKind, ListenerRegistry, PointerId, Subscription};
use tracing::debug;

/// Input source driving a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    /// Keys on a focused thumb
    Keyboard,
    /// Mouse-button drag
    Mouse,
    /// Pointer-event drag from one pointer
    Pointer(PointerId),
}

impl SessionKind {
    /// Document listeners a session of this kind registers, in order.
    #[must_use]
    pub const fn listeners(self) -> &'static [ListenerKind] {
        match self {
            Self::Keyboard => &[
                ListenerKind::KeyDown,
                ListenerKind::KeyUp,
                ListenerKind::FocusOut,
            ],
            Self::Mouse => &[ListenerKind::MouseMove, ListenerKind::MouseUp],
            Self::Pointer(_) => &[
                ListenerKind::PointerMove,
                ListenerKind::PointerUp,
                ListenerKind::PointerCancel,
            ],
        }
    }

    /// Whether this is a drag.
    #[must_use]
    pub const fn is_drag(self) -> bool {
        !matches!(self, Self::Keyboard)
    }
}

/// An open interaction on one thumb.
#[derive(Debug)]
pub struct InteractionSession {
    kind: SessionKind,
    index: usize,
    changed: bool,
    grab_offset: f64,
    subscriptions: Vec<Subscription>,
}

impl InteractionSession {
    /// Open a session and register its listeners on `document`.
    #[must_use]
    pub fn open(document: &ListenerRegistry, kind: SessionKind, index: usize) -> Self {
        let subscriptions = kind
            .listeners()
            .iter()
            .map(|listener| document.subscribe(*listener))
            .collect();
        debug!(?kind, index, "interaction session opened");
        Self {
            kind,
            index,
            changed: false,
            grab_offset: 0.0,
            subscriptions,
        }
    }

    /// Keep `offset` between the pointer and the thumb while dragging.
    #[must_use]
    pub fn with_grab_offset(mut self, offset: f64) -> Self {
        self.grab_offset = offset;
        self
    }

    /// Input source.
    #[must_use]
    pub const fn kind(&self) -> SessionKind {
        self.kind
    }

    /// Thumb under control.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Value offset between pointer and thumb.
    #[must_use]
    pub const fn grab_offset(&self) -> f64 {
        self.grab_offset
    }

    /// Whether an effective change happened in this session.
    #[must_use]
    pub const fn has_changed(&self) -> bool {
        self.changed
    }

    /// Record an effective change. Returns true for the first one.
    pub fn mark_changed(&mut self) -> bool {
        !std::mem::replace(&mut self.changed, true)
    }

    /// Whether this session listens for `kind`.
    #[must_use]
    pub fn listens(&self, kind: ListenerKind) -> bool {
        self.subscriptions.iter().any(|s| s.kind() == kind)
    }

    /// Whether a pointer event from `pointer` belongs to this session.
    #[must_use]
    pub fn tracks_pointer(&self, pointer: PointerId) -> bool {
        self.kind == SessionKind::Pointer(pointer)
    }
}

impl Drop for InteractionSession {
    fn drop(&mut self) {
        debug!(
            kind = ?self.kind,
            index = self.index,
            changed = self.changed,
            "interaction session closed"
        );
    }
}
