#![forbid(unsafe_code)]

//! Viewport width measurement as a subscription.
//!
//! Rendered widths change asynchronously relative to component state, so
//! components never query a width once; they subscribe and react to every
//! report. A [`WidthSource`] must invoke the callback once with the current
//! width during `subscribe` and again after every resize. Reports may repeat
//! the same value; consumers must treat that as a no-op.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::geometry::finite_or_zero;

/// Callback receiving a width in pixels.
pub type WidthCallback = Box<dyn Fn(f64)>;

/// A facility that reports an element's rendered pixel width.
pub trait WidthSource {
    /// Start receiving width reports. Dropping the returned subscription
    /// stops them.
    fn subscribe(&self, callback: WidthCallback) -> WidthSubscription;
}

/// Live width subscription. Dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct WidthSubscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl fmt::Debug for WidthSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidthSubscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

impl WidthSubscription {
    /// Wrap an unsubscribe action.
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// A subscription with nothing to release.
    pub fn detached() -> Self {
        Self { unsubscribe: None }
    }

    /// Unsubscribe now. Equivalent to dropping.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for WidthSubscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

#[derive(Default)]
struct Observers {
    width: f64,
    next_id: u64,
    callbacks: BTreeMap<u64, Rc<dyn Fn(f64)>>,
}

/// A width source driven by the host.
///
/// The host calls [`ManualWidthSource::set_width`] whenever its layout pass
/// measures the element. Cloning yields another handle to the same source.
#[derive(Clone, Default)]
pub struct ManualWidthSource {
    observers: Rc<RefCell<Observers>>,
}

impl fmt::Debug for ManualWidthSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let observers = self.observers.borrow();
        f.debug_struct("ManualWidthSource")
            .field("width", &observers.width)
            .field("subscribers", &observers.callbacks.len())
            .finish()
    }
}

impl ManualWidthSource {
    /// A source reporting zero (not yet laid out).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A source with an initial width.
    #[must_use]
    pub fn with_width(width: f64) -> Self {
        let source = Self::default();
        source.observers.borrow_mut().width = sanitize(width);
        source
    }

    /// Last reported width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.observers.borrow().width
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.observers.borrow().callbacks.len()
    }

    /// Record a new measurement and notify every subscriber.
    ///
    /// Negative and non-finite widths are reported as zero.
    pub fn set_width(&self, width: f64) {
        self.observers.borrow_mut().width = sanitize(width);
        self.notify();
    }

    /// Re-send the current width to every subscriber.
    pub fn notify(&self) {
        let (width, callbacks): (f64, Vec<(u64, Rc<dyn Fn(f64)>)>) = {
            let observers = self.observers.borrow();
            (
                observers.width,
                observers
                    .callbacks
                    .iter()
                    .map(|(id, cb)| (*id, Rc::clone(cb)))
                    .collect(),
            )
        };
        for (id, callback) in callbacks {
            if !self.observers.borrow().callbacks.contains_key(&id) {
                continue;
            }
            callback(width);
        }
    }
}

impl WidthSource for ManualWidthSource {
    fn subscribe(&self, callback: WidthCallback) -> WidthSubscription {
        let callback: Rc<dyn Fn(f64)> = Rc::from(callback);
        let (id, width) = {
            let mut observers = self.observers.borrow_mut();
            observers.next_id = observers.next_id.saturating_add(1);
            let id = observers.next_id;
            observers.callbacks.insert(id, Rc::clone(&callback));
            (id, observers.width)
        };
        callback(width);

        let observers: Weak<RefCell<Observers>> = Rc::downgrade(&self.observers);
        WidthSubscription::new(move || {
            if let Some(observers) = observers.upgrade() {
                let removed = observers.borrow_mut().callbacks.remove(&id);
                drop(removed);
            }
        })
    }
}

fn sanitize(width: f64) -> f64 {
    finite_or_zero(width).max(0.0)
}
