#![forbid(unsafe_code)]

//! Core: geometry, input events, document-level pointer listeners and
//! viewport width measurement.
//!
//! # Role in splitkit
//! `splitkit-core` is the input layer. It owns the normalized event types the
//! layout engine and widgets consume, plus the two host-facing resources that
//! components claim while mounted:
//!
//! - **PointerTarget**: the document-wide pointer stream. Components attach
//!   listeners through it and hold a [`pointer::ListenerGuard`] that detaches
//!   on release or drop.
//! - **WidthSource**: a subscription channel reporting a viewport's rendered
//!   width, immediately on subscribe and again on every resize.
//!
//! Everything here is single-threaded. Handlers run to completion and shared
//! state uses `Rc<RefCell<_>>`.

pub mod event;
pub mod geometry;
pub mod measure;
pub mod pointer;

pub use event::{
    KeyCode, KeyEvent, Modifiers, PointerButton, PointerEvent, PointerEventKind, PointerId,
};
pub use geometry::{Axis, Point, Rect, Size};
pub use measure::{ManualWidthSource, WidthSource, WidthSubscription};
pub use pointer::{ListenerGuard, ListenerId, PointerKinds, PointerTarget};
