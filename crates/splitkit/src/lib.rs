#![forbid(unsafe_code)]

//! splitkit public facade crate.
//!
//! Headless UI state machines for two layout components:
//!
//! - [`SplitPane`]: two regions separated by a draggable divider, with an
//!   optional collapse toggle. Drags track the pointer at document level
//!   through a [`PointerTarget`].
//! - [`ScrollableTabStrip`]: a horizontal tab strip that scrolls when its
//!   tabs overflow the measured viewport and shows left/right controls.
//!
//! Both consume normalized input events and produce layout descriptions; the
//! host renders them. [`UiConfig`] loads their configuration from TOML or
//! JSON.

use std::fmt;

pub mod config;

pub use config::{ConfigError, UiConfig};

// --- Core re-exports -------------------------------------------------------

pub use splitkit_core::event::{
    KeyCode, KeyEvent, Modifiers, PointerButton, PointerEvent, PointerEventKind, PointerId,
};
pub use splitkit_core::geometry::{Axis, Point, Rect, Size};
pub use splitkit_core::measure::{ManualWidthSource, WidthSource, WidthSubscription};
pub use splitkit_core::pointer::{ListenerGuard, PointerKinds, PointerTarget};

// --- Layout re-exports -----------------------------------------------------

pub use splitkit_layout::{
    Orientation, Region, ResizeDirection, SizeUnit, SplitHit, SplitLayout, SplitPane,
    SplitPaneConfig, SplitPaneEffect, SplitPaneFrame, SplitPaneNoopReason, SplitPaneProps,
    SplitPaneState,
};

// --- Widget re-exports -----------------------------------------------------

pub use splitkit_widgets::{
    ContentLoader, ExactMatcher, FixedTabWidth, LabelWidth, OverflowControls, PathPrefixMatcher,
    RouteMatcher, ScrollDirection, ScrollableTabStrip, ScrollableTabStripState, TabDescriptor,
    TabMeasure, TabPanels, TabStripConfig, TabStripProps, TabStripView, TabView,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for splitkit hosts.
#[derive(Debug)]
pub enum Error {
    /// I/O failure outside configuration loading.
    Io(std::io::Error),
    /// Configuration could not be loaded or failed validation.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "configuration: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for splitkit APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, KeyCode, KeyEvent, ManualWidthSource, Orientation, PathPrefixMatcher,
        PointerEvent, PointerTarget, Rect, Result, ScrollableTabStrip, SplitPane,
        SplitPaneConfig, SplitPaneProps, TabDescriptor, TabStripConfig, TabStripProps, UiConfig,
        WidthSource,
    };

    pub use crate::{core, layout, widgets};
}

pub use splitkit_core as core;
pub use splitkit_layout as layout;
pub use splitkit_widgets as widgets;
