#![forbid(unsafe_code)]

//! Document-level pointer target with scoped listeners.
//!
//! A [`PointerTarget`] stands in for the document: the one place a host
//! delivers every pointer event, wherever it lands. A component that needs
//! to keep tracking the pointer after it leaves its own bounds (a divider
//! drag, say) attaches a listener here and receives a [`ListenerGuard`].
//!
//! # Invariants
//!
//! 1. Every listener is owned by exactly one guard. Releasing or dropping the
//!    guard detaches it; there is no other way to detach.
//! 2. A listener detached during a dispatch is not invoked for the remainder
//!    of that dispatch, even if it was matched before the dispatch began.
//! 3. No registry borrow is held while a callback runs, so callbacks may
//!    attach, detach, or dispatch re-entrantly.
//! 4. Guards hold a weak reference: dropping a guard after the target is gone
//!    is a no-op.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use bitflags::bitflags;

use crate::event::{PointerEvent, PointerEventKind};

bitflags! {
    /// Pointer event kinds a listener subscribes to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PointerKinds: u8 {
        const DOWN   = 0b0_0001;
        const UP     = 0b0_0010;
        const MOVE   = 0b0_0100;
        const CANCEL = 0b0_1000;
        const WHEEL  = 0b1_0000;
    }
}

impl PointerKinds {
    /// The kinds a drag gesture needs after its initial press.
    pub const DRAG: Self = Self::UP.union(Self::MOVE).union(Self::CANCEL);

    /// Flag corresponding to one event kind.
    #[must_use]
    pub const fn of(kind: &PointerEventKind) -> Self {
        match kind {
            PointerEventKind::Down(_) => Self::DOWN,
            PointerEventKind::Up(_) => Self::UP,
            PointerEventKind::Move => Self::MOVE,
            PointerEventKind::Cancel => Self::CANCEL,
            PointerEventKind::Wheel { .. } => Self::WHEEL,
        }
    }
}

/// Stable identifier of an attached listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

type Callback = Rc<dyn Fn(&PointerEvent)>;

struct Entry {
    kinds: PointerKinds,
    owner: &'static str,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: BTreeMap<ListenerId, Entry>,
}

/// The document-wide pointer event stream.
///
/// Cloning yields another handle to the same target.
#[derive(Clone, Default)]
pub struct PointerTarget {
    registry: Rc<RefCell<Registry>>,
}

impl fmt::Debug for PointerTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerTarget")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl PointerTarget {
    /// Create an empty target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener for `kinds`.
    ///
    /// `owner` is a static label used only for diagnostics.
    pub fn listen<F>(&self, owner: &'static str, kinds: PointerKinds, callback: F) -> ListenerGuard
    where
        F: Fn(&PointerEvent) + 'static,
    {
        let (id, total) = {
            let mut registry = self.registry.borrow_mut();
            registry.next_id = registry.next_id.saturating_add(1);
            let id = ListenerId(registry.next_id);
            registry.entries.insert(
                id,
                Entry {
                    kinds,
                    owner,
                    callback: Rc::new(callback),
                },
            );
            (id, registry.entries.len())
        };
        tracing::debug!(
            message = "pointer_target.listener",
            action = "attach",
            id = id.get(),
            owner,
            total
        );
        ListenerGuard {
            registry: Rc::downgrade(&self.registry),
            id,
            owner,
        }
    }

    /// Number of attached listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    /// Number of attached listeners with the given owner label.
    #[must_use]
    pub fn listener_count_for(&self, owner: &str) -> usize {
        self.registry
            .borrow()
            .entries
            .values()
            .filter(|entry| entry.owner == owner)
            .count()
    }

    /// Deliver `event` to every listener subscribed to its kind, in
    /// attachment order. Returns how many listeners were invoked.
    pub fn dispatch(&self, event: &PointerEvent) -> usize {
        let kind = PointerKinds::of(&event.kind);
        let matched: Vec<(ListenerId, Callback)> = self
            .registry
            .borrow()
            .entries
            .iter()
            .filter(|(_, entry)| entry.kinds.intersects(kind))
            .map(|(id, entry)| (*id, Rc::clone(&entry.callback)))
            .collect();

        let mut delivered = 0;
        for (id, callback) in matched {
            if !self.registry.borrow().entries.contains_key(&id) {
                continue;
            }
            callback(event);
            delivered += 1;
        }
        delivered
    }
}

/// Ownership of one attached listener.
///
/// Dropping the guard detaches the listener.
#[must_use = "dropping the guard detaches the listener immediately"]
pub struct ListenerGuard {
    registry: Weak<RefCell<Registry>>,
    id: ListenerId,
    owner: &'static str,
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl ListenerGuard {
    /// Listener identifier.
    #[must_use]
    pub const fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether the listener is still attached to a live target.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().entries.contains_key(&self.id))
    }

    /// Detach now. Equivalent to dropping the guard.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        // The removed entry is dropped after the borrow ends, so a callback
        // that owns guards of its own can detach them without re-borrowing.
        let removed = registry.borrow_mut().entries.remove(&self.id);
        let remaining = registry.borrow().entries.len();
        if removed.is_some() {
            tracing::debug!(
                message = "pointer_target.listener",
                action = "detach",
                id = self.id.get(),
                owner = self.owner,
                total = remaining
            );
        }
        drop(removed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn dispatch_filters_by_kind() {
        let target = PointerTarget::new();
        let moves = Rc::new(Cell::new(0));
        let seen = Rc::clone(&moves);
        let _guard = target.listen("test", PointerKinds::MOVE, move |_| {
            seen.set(seen.get() + 1);
        });

        assert_eq!(target.dispatch(&PointerEvent::moved(1.0, 1.0)), 1);
        assert_eq!(target.dispatch(&PointerEvent::up(1.0, 1.0)), 0);
        assert_eq!(moves.get(), 1);
    }

    #[test]
    fn dropping_guard_detaches() {
        let target = PointerTarget::new();
        let guard = target.listen("test", PointerKinds::DRAG, |_| {});
        assert_eq!(target.listener_count(), 1);
        assert!(guard.is_attached());
        guard.release();
        assert_eq!(target.listener_count(), 0);
        assert_eq!(target.dispatch(&PointerEvent::moved(0.0, 0.0)), 0);
    }

    #[test]
    fn guard_outliving_target_is_harmless() {
        let target = PointerTarget::new();
        let guard = target.listen("test", PointerKinds::MOVE, |_| {});
        drop(target);
        assert!(!guard.is_attached());
        drop(guard);
    }

    #[test]
    fn listener_detached_mid_dispatch_is_skipped() {
        let target = PointerTarget::new();
        let slot: Rc<RefCell<Option<ListenerGuard>>> = Rc::new(RefCell::new(None));
        let second_calls = Rc::new(Cell::new(0));

        let victim = Rc::clone(&slot);
        let _first = target.listen("first", PointerKinds::UP, move |_| {
            victim.borrow_mut().take();
        });
        let calls = Rc::clone(&second_calls);
        let second = target.listen("second", PointerKinds::UP, move |_| {
            calls.set(calls.get() + 1);
        });
        *slot.borrow_mut() = Some(second);

        assert_eq!(target.dispatch(&PointerEvent::up(0.0, 0.0)), 1);
        assert_eq!(second_calls.get(), 0);
        assert_eq!(target.listener_count(), 1);
    }

    #[test]
    fn listener_may_detach_itself() {
        let target = PointerTarget::new();
        let slot: Rc<RefCell<Option<ListenerGuard>>> = Rc::new(RefCell::new(None));
        let own = Rc::clone(&slot);
        let guard = target.listen("self", PointerKinds::UP, move |_| {
            own.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(guard);

        assert_eq!(target.dispatch(&PointerEvent::up(0.0, 0.0)), 1);
        assert_eq!(target.listener_count(), 0);
        assert_eq!(target.dispatch(&PointerEvent::up(0.0, 0.0)), 0);
    }

    #[test]
    fn counts_by_owner() {
        let target = PointerTarget::new();
        let _a = target.listen("pane", PointerKinds::MOVE, |_| {});
        let _b = target.listen("pane", PointerKinds::UP, |_| {});
        let _c = target.listen("strip", PointerKinds::WHEEL, |_| {});
        assert_eq!(target.listener_count_for("pane"), 2);
        assert_eq!(target.listener_count_for("strip"), 1);
        assert_eq!(target.listener_count_for("other"), 0);
    }

    #[test]
    fn kinds_of_event() {
        assert_eq!(
            PointerKinds::of(&PointerEventKind::Wheel {
                delta_x: 1.0,
                delta_y: 0.0
            }),
            PointerKinds::WHEEL
        );
        assert!(PointerKinds::DRAG.contains(PointerKinds::CANCEL));
        assert!(!PointerKinds::DRAG.contains(PointerKinds::DOWN));
    }
}
