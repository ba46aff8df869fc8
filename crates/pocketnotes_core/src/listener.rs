//! Scoped event-listener registry.
//!
//! # Responsibility
//! - Track which global listeners (window resize, document pointer-down) are
//!   currently attached.
//! - Hand out `Subscription` guards that detach on drop.
//!
//! # Invariants
//! - A listener is attached exactly while its `Subscription` is alive.
//! - Subscriptions never keep the registry alive; dropping one after the
//!   registry is gone is a no-op.
//! - Single-threaded: the registry is owned by the UI loop.

use log::debug;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

/// Global event source a listener is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerTarget {
    /// Process-wide viewport resize events.
    WindowResize,
    /// Pointer-down anywhere in the surface; used for outside-click dismissal.
    DocumentPointerDown,
}

impl ListenerTarget {
    fn label(self) -> &'static str {
        match self {
            Self::WindowResize => "window_resize",
            Self::DocumentPointerDown => "document_pointer_down",
        }
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    next_id: u64,
    active: BTreeMap<u64, ListenerTarget>,
}

/// Shared handle over the set of attached listeners.
///
/// Cloning yields another handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    state: Rc<RefCell<RegistryState>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a listener on `target` until the returned guard is dropped.
    pub fn subscribe(&self, target: ListenerTarget) -> Subscription {
        let id = {
            let mut state = self.state.borrow_mut();
            state.next_id += 1;
            let id = state.next_id;
            state.active.insert(id, target);
            id
        };
        debug!(
            "event=listener_attach module=listener status=ok target={} id={}",
            target.label(),
            id
        );
        Subscription {
            id,
            target,
            registry: Rc::downgrade(&self.state),
        }
    }

    /// Returns whether at least one listener is attached on `target`.
    pub fn is_attached(&self, target: ListenerTarget) -> bool {
        self.active_count(target) > 0
    }

    /// Number of live listeners on `target`.
    pub fn active_count(&self, target: ListenerTarget) -> usize {
        self.state
            .borrow()
            .active
            .values()
            .filter(|attached| **attached == target)
            .count()
    }
}

/// Guard for one attached listener.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    target: ListenerTarget,
    registry: Weak<RefCell<RegistryState>>,
}

impl Subscription {
    pub fn target(&self) -> ListenerTarget {
        self.target
    }

    /// Returns whether this listener is still registered.
    pub fn is_active(&self) -> bool {
        let Some(state) = self.registry.upgrade() else {
            return false;
        };
        let attached = state.borrow().active.contains_key(&self.id);
        attached
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(state) = self.registry.upgrade() else {
            return;
        };
        if state.borrow_mut().active.remove(&self.id).is_some() {
            debug!(
                "event=listener_detach module=listener status=ok target={} id={}",
                self.target.label(),
                self.id
            );
        }
    }
}
