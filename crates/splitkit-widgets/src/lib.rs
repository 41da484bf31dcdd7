#![forbid(unsafe_code)]

//! Tab navigation widgets.
//!
//! - [`strip`]: [`ScrollableTabStripState`], the overflow-aware horizontal
//!   strip. Pure state driven by width measurements and scroll inputs.
//! - [`scrollable`]: [`ScrollableTabStrip`], the mounted strip subscribed to
//!   a [`WidthSource`](splitkit_core::WidthSource).
//! - [`tab`], [`measure`], [`route`]: descriptors, width estimation and
//!   active-route resolution consumed by the strip.
//! - [`panels`]: [`TabPanels`], content for every tab loaded at mount and
//!   kept mounted; only visibility changes.

pub mod measure;
pub mod panels;
pub mod route;
pub mod scrollable;
pub mod strip;
pub mod tab;

pub use measure::{FixedTabWidth, LabelWidth, TabMeasure};
pub use panels::{ContentLoader, Panel, TabPanels};
pub use route::{ExactMatcher, PathPrefixMatcher, RouteMatcher};
pub use scrollable::ScrollableTabStrip;
pub use strip::{
    OverflowControls, ScrollDirection, ScrollableTabStripState, TabStripConfig, TabStripView,
    TabView,
};
pub use tab::{TabDescriptor, TabStripProps};
