#![forbid(unsafe_code)]

//! Split-pane layout engine.
//!
//! Two regions separated by a draggable divider, laid out along an
//! orientation's axis, with an optional collapse toggle.
//!
//! - [`split`] holds the pure machine: [`SplitPaneState`] consumes drag,
//!   keyboard and collapse inputs and computes a [`SplitLayout`]. It has no
//!   knowledge of listeners and is what the property tests drive.
//! - [`pane`] holds the mounted component, [`SplitPane`], which owns the
//!   children and claims the document pointer stream for the duration of a
//!   drag.

pub mod pane;
pub mod split;

pub use pane::{Region, SplitPane, SplitPaneFrame, SplitPaneProps};
pub use split::{
    DragOrigin, DragPhase, Orientation, ResizeDirection, SizeUnit, SplitHit, SplitLayout,
    SplitPaneConfig, SplitPaneEffect, SplitPaneNoopReason, SplitPaneState,
};
pub use splitkit_core::geometry::{Axis, Point, Rect};
