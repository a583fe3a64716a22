//! Document-level listener registry.
//!
//! Widgets that track an interaction beyond their own bounds (a drag that
//! leaves the track, keys pressed while a handle is focused) subscribe to
//! document-level events for the duration of that interaction. A
//! [`Subscription`] is a guard: dropping it removes the listener, so every
//! exit path of an interaction releases what it acquired.
//!
//! The registry keeps an ordered log of additions and removals, which hosts
//! use to route events and tests use to check registration order.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Kind of document-level event a listener is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// `keydown`
    KeyDown,
    /// `keyup`
    KeyUp,
    /// `focusout`
    FocusOut,
    /// `mousemove`
    MouseMove,
    /// `mouseup`
    MouseUp,
    /// `pointermove`
    PointerMove,
    /// `pointerup`
    PointerUp,
    /// `pointercancel`
    PointerCancel,
}

impl ListenerKind {
    /// DOM event name.
    #[must_use]
    pub const fn dom_name(self) -> &'static str {
        match self {
            Self::KeyDown => "keydown",
            Self::KeyUp => "keyup",
            Self::FocusOut => "focusout",
            Self::MouseMove => "mousemove",
            Self::MouseUp => "mouseup",
            Self::PointerMove => "pointermove",
            Self::PointerUp => "pointerup",
            Self::PointerCancel => "pointercancel",
        }
    }
}

impl fmt::Display for ListenerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_name())
    }
}

/// Identifier of a single registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// One entry in the registry's call log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerCall {
    /// `addEventListener`
    Added {
        /// Registration id
        id: ListenerId,
        /// Event kind
        kind: ListenerKind,
    },
    /// `removeEventListener`
    Removed {
        /// Registration id
        id: ListenerId,
        /// Event kind
        kind: ListenerKind,
    },
}

#[derive(Debug, Default)]
struct RegistryState {
    next_id: u64,
    active: Vec<(ListenerId, ListenerKind)>,
    log: Vec<ListenerCall>,
}

/// Shared handle to a document's listener table.
///
/// Cloning the handle shares the same table.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    inner: Arc<Mutex<RegistryState>>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays registered until the guard is dropped.
    #[must_use = "dropping the subscription removes the listener immediately"]
    pub fn subscribe(&self, kind: ListenerKind) -> Subscription {
        let mut state = self.lock();
        let id = ListenerId(state.next_id);
        state.next_id += 1;
        state.active.push((id, kind));
        state.log.push(ListenerCall::Added { id, kind });
        Subscription {
            inner: Arc::clone(&self.inner),
            id,
            kind,
        }
    }

    /// Whether at least one listener of this kind is registered.
    #[must_use]
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.lock().active.iter().any(|(_, k)| *k == kind)
    }

    /// Kinds of all active listeners, in registration order.
    #[must_use]
    pub fn active(&self) -> Vec<ListenerKind> {
        self.lock().active.iter().map(|(_, k)| *k).collect()
    }

    /// Number of active listeners.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.lock().active.len()
    }

    /// Full call log.
    #[must_use]
    pub fn log(&self) -> Vec<ListenerCall> {
        self.lock().log.clone()
    }

    /// Kinds passed to every `Added` call, in order.
    #[must_use]
    pub fn added_kinds(&self) -> Vec<ListenerKind> {
        self.lock()
            .log
            .iter()
            .filter_map(|call| match call {
                ListenerCall::Added { kind, .. } => Some(*kind),
                ListenerCall::Removed { .. } => None,
            })
            .collect()
    }

    /// Kinds passed to every `Removed` call, in order.
    #[must_use]
    pub fn removed_kinds(&self) -> Vec<ListenerKind> {
        self.lock()
            .log
            .iter()
            .filter_map(|call| match call {
                ListenerCall::Removed { kind, .. } => Some(*kind),
                ListenerCall::Added { .. } => None,
            })
            .collect()
    }

    /// Forget the call log. Active listeners are kept.
    pub fn clear_log(&self) {
        self.lock().log.clear();
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        lock_state(&self.inner)
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("active", &self.active())
            .finish()
    }
}

/// Registration guard returned by [`ListenerRegistry::subscribe`].
pub struct Subscription {
    inner: Arc<Mutex<RegistryState>>,
    id: ListenerId,
    kind: ListenerKind,
}

impl Subscription {
    /// Registration id.
    #[must_use]
    pub const fn id(&self) -> ListenerId {
        self.id
    }

    /// Event kind this guard listens for.
    #[must_use]
    pub const fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut state = lock_state(&self.inner);
        if let Some(pos) = state.active.iter().position(|(id, _)| *id == self.id) {
            state.active.remove(pos);
            state.log.push(ListenerCall::Removed {
                id: self.id,
                kind: self.kind,
            });
        }
    }
}

// A panic while holding the lock leaves the table itself consistent.
fn lock_state(inner: &Mutex<RegistryState>) -> MutexGuard<'_, RegistryState> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_registers_and_logs() {
        let registry = ListenerRegistry::new();
        let sub = registry.subscribe(ListenerKind::KeyDown);
        assert!(registry.is_listening(ListenerKind::KeyDown));
        assert_eq!(sub.kind(), ListenerKind::KeyDown);
        assert_eq!(
            registry.log(),
            vec![ListenerCall::Added {
                id: sub.id(),
                kind: ListenerKind::KeyDown
            }]
        );
    }

    #[test]
    fn test_drop_removes_listener() {
        let registry = ListenerRegistry::new();
        {
            let _keydown = registry.subscribe(ListenerKind::KeyDown);
            let _keyup = registry.subscribe(ListenerKind::KeyUp);
            assert_eq!(registry.active_count(), 2);
        }
        assert_eq!(registry.active_count(), 0);
        assert_eq!(
            registry.removed_kinds(),
            vec![ListenerKind::KeyUp, ListenerKind::KeyDown]
        );
    }

    #[test]
    fn test_added_kinds_preserve_order() {
        let registry = ListenerRegistry::new();
        let _subs = [
            registry.subscribe(ListenerKind::KeyDown),
            registry.subscribe(ListenerKind::KeyUp),
            registry.subscribe(ListenerKind::FocusOut),
        ];
        assert_eq!(
            registry.added_kinds(),
            vec![ListenerKind::KeyDown, ListenerKind::KeyUp, ListenerKind::FocusOut]
        );
        assert_eq!(
            registry.active(),
            vec![ListenerKind::KeyDown, ListenerKind::KeyUp, ListenerKind::FocusOut]
        );
    }

    #[test]
    fn test_ids_are_unique() {
        let registry = ListenerRegistry::new();
        let a = registry.subscribe(ListenerKind::MouseMove);
        let b = registry.subscribe(ListenerKind::MouseMove);
        assert_ne!(a.id(), b.id());
        drop(a);
        assert!(registry.is_listening(ListenerKind::MouseMove));
        drop(b);
        assert!(!registry.is_listening(ListenerKind::MouseMove));
    }

    #[test]
    fn test_clones_share_table() {
        let registry = ListenerRegistry::new();
        let clone = registry.clone();
        let _sub = clone.subscribe(ListenerKind::PointerUp);
        assert!(registry.is_listening(ListenerKind::PointerUp));
    }

    #[test]
    fn test_clear_log_keeps_active() {
        let registry = ListenerRegistry::new();
        let _sub = registry.subscribe(ListenerKind::FocusOut);
        registry.clear_log();
        assert!(registry.log().is_empty());
        assert_eq!(registry.active_count(), 1);
    }

    #[test]
    fn test_dom_names() {
        assert_eq!(ListenerKind::KeyDown.dom_name(), "keydown");
        assert_eq!(ListenerKind::FocusOut.to_string(), "focusout");
        assert_eq!(ListenerKind::PointerCancel.dom_name(), "pointercancel");
    }
}
