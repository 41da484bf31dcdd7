#![forbid(unsafe_code)]

//! Mounted scrollable tab strip.
//!
//! [`ScrollableTabStrip`] subscribes to a [`WidthSource`] on mount. The
//! subscription reports the current width immediately and again after every
//! resize; each report updates the measured viewport and re-clamps the
//! offset. The subscription callback holds only a `Weak` reference to the
//! strip state and is released when the strip unmounts.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use splitkit_core::event::{PointerEvent, PointerEventKind};
use splitkit_core::measure::{WidthSource, WidthSubscription};

use crate::measure::TabMeasure;
use crate::route::RouteMatcher;
use crate::strip::{
    OverflowControls, ScrollDirection, ScrollableTabStripState, TabStripConfig, TabStripView,
};
use crate::tab::{TabDescriptor, TabStripProps};

/// A tab strip bound to a width measurement source.
pub struct ScrollableTabStrip {
    state: Rc<RefCell<ScrollableTabStripState>>,
    class_name: Option<String>,
    heading: Option<String>,
    measurement: WidthSubscription,
}

impl fmt::Debug for ScrollableTabStrip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollableTabStrip")
            .field("state", &self.state.borrow())
            .field("class_name", &self.class_name)
            .field("heading", &self.heading)
            .field("measurement", &self.measurement)
            .finish()
    }
}

impl ScrollableTabStrip {
    /// Mount the strip and subscribe to `viewport` width reports.
    pub fn mount(
        props: TabStripProps,
        measure: impl TabMeasure + 'static,
        config: TabStripConfig,
        viewport: &dyn WidthSource,
    ) -> Self {
        let TabStripProps {
            tabs,
            class_name,
            heading,
        } = props;
        let state = Rc::new(RefCell::new(ScrollableTabStripState::new(
            tabs, measure, config,
        )));
        let weak = Rc::downgrade(&state);
        let measurement = viewport.subscribe(Box::new(move |width: f64| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().set_viewport_width(width);
            }
        }));
        Self {
            state,
            class_name,
            heading,
            measurement,
        }
    }

    /// Stop measuring and drop the strip.
    pub fn unmount(self) {
        tracing::debug!(
            message = "tab_strip.unmount",
            tabs = self.state.borrow().tabs().len()
        );
        drop(self);
    }

    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.state.borrow().scroll_offset()
    }

    #[must_use]
    pub fn measured_viewport_width(&self) -> f64 {
        self.state.borrow().measured_viewport_width()
    }

    #[must_use]
    pub fn content_width(&self) -> f64 {
        self.state.borrow().content_width()
    }

    #[must_use]
    pub fn controls(&self) -> OverflowControls {
        self.state.borrow().controls()
    }

    #[must_use]
    pub fn tab_count(&self) -> usize {
        self.state.borrow().tabs().len()
    }

    /// Left control clicked.
    pub fn scroll_left(&self) -> f64 {
        self.state.borrow_mut().scroll_by(ScrollDirection::Left)
    }

    /// Right control clicked.
    pub fn scroll_right(&self) -> f64 {
        self.state.borrow_mut().scroll_by(ScrollDirection::Right)
    }

    /// The viewport reported a native scroll.
    pub fn on_scroll(&self, offset: f64) -> f64 {
        self.state.borrow_mut().on_scroll(offset)
    }

    /// Pointer event routed to the strip. Only wheel events are consumed.
    pub fn on_pointer(&self, event: &PointerEvent) -> bool {
        let PointerEventKind::Wheel { delta_x, delta_y } = event.kind else {
            return false;
        };
        let mut state = self.state.borrow_mut();
        let before = state.scroll_offset();
        state.on_wheel(delta_x, delta_y) != before
    }

    pub fn reveal(&self, index: usize) -> f64 {
        self.state.borrow_mut().reveal(index)
    }

    #[must_use]
    pub fn tab_at(&self, viewport_x: f64) -> Option<usize> {
        self.state.borrow().tab_at(viewport_x)
    }

    pub fn set_tabs(&self, tabs: Vec<TabDescriptor>) {
        self.state.borrow_mut().set_tabs(tabs);
    }

    /// Describe the strip for rendering against the active route.
    ///
    /// A strip without tabs reports its heading, if it has one, for the host
    /// to show in place of the strip.
    #[must_use]
    pub fn render(&self, matcher: &dyn RouteMatcher) -> TabStripView {
        let mut view = self.state.borrow().view(matcher);
        view.class_name.clone_from(&self.class_name);
        if view.tabs.is_empty() {
            view.heading.clone_from(&self.heading);
        }
        view
    }
}
