#![forbid(unsafe_code)]

//! Overflow-aware horizontal tab strip state.
//!
//! Tabs are laid out left to right at their measured widths, separated by a
//! fixed gap. When their total width exceeds the measured viewport, the
//! strip scrolls horizontally and offers left/right controls.
//!
//! # Invariants
//!
//! 1. While the viewport is measured,
//!    `0 <= scroll_offset <= max_scroll_offset`, where
//!    `max_scroll_offset = max(0, content_width - viewport_width)`.
//! 2. Control visibility is derived, never stored:
//!    `left = scroll_offset > 0`, `right = scroll_offset < max_scroll_offset`.
//! 3. A viewport of zero width (not laid out yet, or hidden for a moment)
//!    shows no controls. The offset is kept as it was and re-clamped by the
//!    next nonzero measurement.
//! 4. Every mutation that changes a measured viewport, the tabs or the offset
//!    re-clamps the offset before returning.

use std::fmt;

use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::measure::TabMeasure;
use crate::route::RouteMatcher;
use crate::tab::TabDescriptor;

/// Default page size for control clicks, as a fraction of the viewport.
pub const TAB_STRIP_DEFAULT_PAGE_FRACTION: f64 = 0.8;

/// Default scroll distance of one wheel notch, in pixels.
pub const TAB_STRIP_DEFAULT_WHEEL_STEP: f64 = 40.0;

/// Tab strip configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabStripConfig {
    /// Fraction of the viewport one control click scrolls by.
    pub page_fraction: f64,
    /// Pixels one wheel notch scrolls by.
    pub wheel_step: f64,
    /// Space between adjacent tabs, in pixels.
    pub gap: f64,
}

impl Default for TabStripConfig {
    fn default() -> Self {
        Self {
            page_fraction: TAB_STRIP_DEFAULT_PAGE_FRACTION,
            wheel_step: TAB_STRIP_DEFAULT_WHEEL_STEP,
            gap: 0.0,
        }
    }
}

impl TabStripConfig {
    #[must_use]
    pub fn page_fraction(mut self, fraction: f64) -> Self {
        self.page_fraction = fraction;
        self
    }

    #[must_use]
    pub fn wheel_step(mut self, step: f64) -> Self {
        self.wheel_step = step;
        self
    }

    #[must_use]
    pub fn gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// List out-of-range values. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.page_fraction.is_finite() || self.page_fraction <= 0.0 || self.page_fraction > 1.0
        {
            errors.push(format!(
                "tab_strip.page_fraction must be in (0, 1] (got {})",
                self.page_fraction
            ));
        }
        if !self.wheel_step.is_finite() || self.wheel_step <= 0.0 {
            errors.push(format!(
                "tab_strip.wheel_step must be > 0 (got {})",
                self.wheel_step
            ));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            errors.push(format!("tab_strip.gap must be >= 0 (got {})", self.gap));
        }
        errors
    }

    fn sanitized(mut self) -> Self {
        if !self.page_fraction.is_finite() || self.page_fraction <= 0.0 {
            self.page_fraction = TAB_STRIP_DEFAULT_PAGE_FRACTION;
        }
        self.page_fraction = self.page_fraction.min(1.0);
        if !self.wheel_step.is_finite() || self.wheel_step <= 0.0 {
            self.wheel_step = TAB_STRIP_DEFAULT_WHEEL_STEP;
        }
        self.gap = non_negative(self.gap);
        self
    }
}

/// Direction of a control click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    Left,
    Right,
}

/// Derived control visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverflowControls {
    pub show_left: bool,
    pub show_right: bool,
}

/// One tab in a [`TabStripView`].
#[derive(Debug, Clone, PartialEq)]
pub struct TabView {
    pub index: usize,
    pub tab: TabDescriptor,
    /// Left edge in content coordinates.
    pub x: f64,
    pub width: f64,
    pub active: bool,
    /// Whether any part of the tab intersects the viewport.
    pub visible: bool,
}

/// Render description of a tab strip.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabStripView {
    pub tabs: Vec<TabView>,
    pub scroll_offset: f64,
    pub content_width: f64,
    pub viewport_width: f64,
    pub controls: OverflowControls,
    pub class_name: Option<String>,
    /// Label to show instead of the strip. Only set when there are no tabs.
    pub heading: Option<String>,
}

impl TabStripView {
    /// Index of the first active tab.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.tabs.iter().find(|tab| tab.active).map(|tab| tab.index)
    }
}

/// Canonical tab strip state.
pub struct ScrollableTabStripState {
    tabs: Vec<TabDescriptor>,
    measure: Box<dyn TabMeasure>,
    widths: Vec<f64>,
    offsets: Vec<f64>,
    content_width: f64,
    viewport_width: f64,
    scroll_offset: f64,
    config: TabStripConfig,
}

impl fmt::Debug for ScrollableTabStripState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollableTabStripState")
            .field("tabs", &self.tabs.len())
            .field("content_width", &self.content_width)
            .field("viewport_width", &self.viewport_width)
            .field("scroll_offset", &self.scroll_offset)
            .finish_non_exhaustive()
    }
}

impl ScrollableTabStripState {
    /// State for `tabs` with an unmeasured viewport.
    pub fn new(
        tabs: Vec<TabDescriptor>,
        measure: impl TabMeasure + 'static,
        config: TabStripConfig,
    ) -> Self {
        let mut state = Self {
            tabs: Vec::new(),
            measure: Box::new(measure),
            widths: Vec::new(),
            offsets: Vec::new(),
            content_width: 0.0,
            viewport_width: 0.0,
            scroll_offset: 0.0,
            config: config.sanitized(),
        };
        state.replace_tabs(tabs);
        state
    }

    #[must_use]
    pub fn tabs(&self) -> &[TabDescriptor] {
        &self.tabs
    }

    #[must_use]
    pub fn config(&self) -> &TabStripConfig {
        &self.config
    }

    #[must_use]
    pub const fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    #[must_use]
    pub const fn measured_viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Total width of all tabs and gaps.
    #[must_use]
    pub const fn content_width(&self) -> f64 {
        self.content_width
    }

    /// Largest valid scroll offset. Zero when the content fits or the
    /// viewport has not been measured.
    #[must_use]
    pub fn max_scroll_offset(&self) -> f64 {
        if self.viewport_width <= 0.0 {
            return 0.0;
        }
        (self.content_width - self.viewport_width).max(0.0)
    }

    #[must_use]
    pub fn show_left_control(&self) -> bool {
        self.viewport_width > 0.0 && self.scroll_offset > 0.0
    }

    #[must_use]
    pub fn show_right_control(&self) -> bool {
        self.scroll_offset < self.max_scroll_offset()
    }

    #[must_use]
    pub fn controls(&self) -> OverflowControls {
        OverflowControls {
            show_left: self.show_left_control(),
            show_right: self.show_right_control(),
        }
    }

    /// `(x, width)` of the tab at `index`, in content coordinates.
    #[must_use]
    pub fn tab_bounds(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.offsets.get(index)?, *self.widths.get(index)?))
    }

    /// Record a width measurement. Returns whether it differed from the last.
    pub fn set_viewport_width(&mut self, width: f64) -> bool {
        let width = non_negative(width);
        if width == self.viewport_width {
            return false;
        }
        let previous = self.viewport_width;
        self.viewport_width = width;
        self.reclamp();
        let controls = self.controls();
        tracing::debug!(
            message = "tab_strip.measure",
            previous,
            width,
            content_width = self.content_width,
            show_left = controls.show_left,
            show_right = controls.show_right
        );
        true
    }

    /// Control click: jump one page in `direction`.
    pub fn scroll_by(&mut self, direction: ScrollDirection) -> f64 {
        let page = self.config.page_fraction * self.viewport_width;
        let target = match direction {
            ScrollDirection::Left => self.scroll_offset - page,
            ScrollDirection::Right => self.scroll_offset + page,
        };
        self.scroll_to(target, "control")
    }

    /// The viewport scrolled on its own (touch, scrollbar, keyboard focus).
    pub fn on_scroll(&mut self, offset: f64) -> f64 {
        self.scroll_to(offset, "native")
    }

    /// One wheel event. The dominant axis decides the direction; each event
    /// scrolls `wheel_step` pixels.
    pub fn on_wheel(&mut self, delta_x: f64, delta_y: f64) -> f64 {
        let delta = if delta_x.abs() >= delta_y.abs() {
            delta_x
        } else {
            delta_y
        };
        if !delta.is_finite() || delta == 0.0 {
            return self.scroll_offset;
        }
        let target = self.scroll_offset + self.config.wheel_step * delta.signum();
        self.scroll_to(target, "wheel")
    }

    /// Scroll the minimum distance that brings tab `index` into view.
    pub fn reveal(&mut self, index: usize) -> f64 {
        let Some((x, width)) = self.tab_bounds(index) else {
            return self.scroll_offset;
        };
        let target = if x < self.scroll_offset || width >= self.viewport_width {
            x
        } else if x + width > self.scroll_offset + self.viewport_width {
            x + width - self.viewport_width
        } else {
            return self.scroll_offset;
        };
        self.scroll_to(target, "reveal")
    }

    /// Tab under `viewport_x` (relative to the viewport's left edge).
    /// Gaps hit nothing.
    #[must_use]
    pub fn tab_at(&self, viewport_x: f64) -> Option<usize> {
        if !viewport_x.is_finite() || viewport_x < 0.0 || viewport_x >= self.viewport_width {
            return None;
        }
        let content_x = self.scroll_offset + viewport_x;
        let candidate = self.offsets.partition_point(|&x| x <= content_x);
        let index = candidate.checked_sub(1)?;
        let (x, width) = self.tab_bounds(index)?;
        (content_x < x + width).then_some(index)
    }

    /// Replace the tab list, re-measuring and re-clamping the offset.
    pub fn set_tabs(&mut self, tabs: Vec<TabDescriptor>) {
        self.replace_tabs(tabs);
    }

    /// Describe every tab for rendering.
    #[must_use]
    pub fn view(&self, matcher: &dyn RouteMatcher) -> TabStripView {
        let start = Instant::now();
        let span = tracing::debug_span!(
            "tab_strip.view",
            tab_count = self.tabs.len(),
            overflow = self.max_scroll_offset() > 0.0,
            active_tab = tracing::field::Empty,
            view_duration_us = tracing::field::Empty
        );
        let _guard = span.enter();

        let viewport_end = self.scroll_offset + self.viewport_width;
        let tabs: Vec<TabView> = self
            .tabs
            .iter()
            .enumerate()
            .map(|(index, tab)| {
                let x = self.offsets[index];
                let width = self.widths[index];
                TabView {
                    index,
                    tab: tab.clone(),
                    x,
                    width,
                    active: matcher.is_active(tab.destination()),
                    visible: x < viewport_end && x + width > self.scroll_offset,
                }
            })
            .collect();

        let view = TabStripView {
            tabs,
            scroll_offset: self.scroll_offset,
            content_width: self.content_width,
            viewport_width: self.viewport_width,
            controls: self.controls(),
            class_name: None,
            heading: None,
        };
        if let Some(active) = view.active_index() {
            span.record("active_tab", active);
        }
        span.record(
            "view_duration_us",
            u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
        );
        view
    }

    fn replace_tabs(&mut self, tabs: Vec<TabDescriptor>) {
        self.widths = tabs
            .iter()
            .map(|tab| non_negative(self.measure.tab_width(tab)))
            .collect();
        self.offsets = Vec::with_capacity(self.widths.len());
        let mut x = 0.0;
        for (index, width) in self.widths.iter().enumerate() {
            if index > 0 {
                x += self.config.gap;
            }
            self.offsets.push(x);
            x += width;
        }
        self.content_width = x;
        self.tabs = tabs;
        self.reclamp();
    }

    /// Clamp the stored offset against a measured viewport. While the width
    /// is zero the offset is kept for the next measurement.
    fn reclamp(&mut self) {
        if self.viewport_width > 0.0 {
            self.scroll_offset = self.clamp_offset(self.scroll_offset);
        }
    }

    fn scroll_to(&mut self, target: f64, source: &'static str) -> f64 {
        let next = self.clamp_offset(target);
        if next != self.scroll_offset {
            let from = self.scroll_offset;
            self.scroll_offset = next;
            tracing::debug!(
                message = "tab_strip.scroll",
                source,
                from,
                to = next,
                max = self.max_scroll_offset()
            );
        }
        self.scroll_offset
    }

    fn clamp_offset(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, self.max_scroll_offset())
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::FixedTabWidth;
    use crate::route::PathPrefixMatcher;

    fn tabs(count: usize) -> Vec<TabDescriptor> {
        (0..count)
            .map(|i| TabDescriptor::new(format!("Tab {i}"), format!("/t{i}")))
            .collect()
    }

    fn strip(count: usize, viewport: f64) -> ScrollableTabStripState {
        let mut state =
            ScrollableTabStripState::new(tabs(count), FixedTabWidth(100.0), TabStripConfig::default());
        state.set_viewport_width(viewport);
        state
    }

    #[test]
    fn eight_tabs_in_five_hundred_pixels() {
        let mut state = strip(8, 500.0);
        assert_eq!(state.max_scroll_offset(), 300.0);
        assert_eq!(
            state.controls(),
            OverflowControls {
                show_left: false,
                show_right: true
            }
        );

        state.on_scroll(300.0);
        assert_eq!(
            state.controls(),
            OverflowControls {
                show_left: true,
                show_right: false
            }
        );

        state.on_scroll(150.0);
        assert_eq!(
            state.controls(),
            OverflowControls {
                show_left: true,
                show_right: true
            }
        );
    }

    #[test]
    fn fitting_content_hides_controls_at_any_offset() {
        let mut state = strip(3, 800.0);
        for offset in [0.0, 50.0, 1_000.0, -10.0] {
            state.on_scroll(offset);
            assert_eq!(state.scroll_offset(), 0.0);
            assert_eq!(state.controls(), OverflowControls::default());
        }
    }

    #[test]
    fn empty_strip_has_no_controls() {
        let state = strip(0, 500.0);
        assert_eq!(state.content_width(), 0.0);
        assert_eq!(state.controls(), OverflowControls::default());
        assert!(state.view(&PathPrefixMatcher::new("/")).tabs.is_empty());
    }

    #[test]
    fn unmeasured_viewport_hides_controls() {
        let state = strip(8, 0.0);
        assert_eq!(state.controls(), OverflowControls::default());
    }

    #[test]
    fn control_click_pages_by_fraction() {
        let mut state = strip(20, 500.0);
        assert_eq!(state.scroll_by(ScrollDirection::Right), 400.0);
        assert_eq!(state.scroll_by(ScrollDirection::Right), 800.0);
        assert_eq!(state.scroll_by(ScrollDirection::Left), 400.0);
        assert_eq!(state.scroll_by(ScrollDirection::Left), 0.0);
        assert_eq!(state.scroll_by(ScrollDirection::Left), 0.0);
    }

    #[test]
    fn control_click_clamps_at_max() {
        let mut state = strip(8, 500.0);
        assert_eq!(state.scroll_by(ScrollDirection::Right), 300.0);
        assert!(!state.show_right_control());
    }

    #[test]
    fn repeated_measurement_is_idempotent() {
        let mut state = strip(8, 500.0);
        state.on_scroll(200.0);
        assert!(!state.set_viewport_width(500.0));
        assert_eq!(state.scroll_offset(), 200.0);
    }

    #[test]
    fn transient_zero_width_keeps_offset() {
        let mut state = strip(8, 500.0);
        state.on_scroll(200.0);
        assert!(state.set_viewport_width(0.0));
        assert_eq!(state.controls(), OverflowControls::default());
        assert_eq!(state.scroll_offset(), 200.0);

        assert!(state.set_viewport_width(500.0));
        assert_eq!(state.scroll_offset(), 200.0);
        assert_eq!(
            state.controls(),
            OverflowControls {
                show_left: true,
                show_right: true
            }
        );
    }

    #[test]
    fn zero_width_then_wider_viewport_reclamps() {
        let mut state = strip(8, 500.0);
        state.on_scroll(300.0);
        state.set_viewport_width(0.0);
        state.set_tabs(tabs(4));
        assert_eq!(state.scroll_offset(), 300.0);
        state.set_viewport_width(300.0);
        assert_eq!(state.scroll_offset(), 100.0);
    }

    #[test]
    fn growing_viewport_reclamps_offset() {
        let mut state = strip(8, 500.0);
        state.on_scroll(300.0);
        assert!(state.set_viewport_width(700.0));
        assert_eq!(state.scroll_offset(), 100.0);
        assert!(!state.show_right_control());
        state.set_viewport_width(900.0);
        assert_eq!(state.scroll_offset(), 0.0);
        assert_eq!(state.controls(), OverflowControls::default());
    }

    #[test]
    fn wheel_scrolls_by_step() {
        let mut state = strip(8, 500.0);
        assert_eq!(state.on_wheel(0.0, 3.0), 40.0);
        assert_eq!(state.on_wheel(-1.0, 0.5), 0.0);
        assert_eq!(state.on_wheel(0.0, 0.0), 0.0);
    }

    #[test]
    fn reveal_scrolls_minimally() {
        let mut state = strip(8, 500.0);
        assert_eq!(state.reveal(2), 0.0);
        assert_eq!(state.reveal(6), 200.0);
        assert_eq!(state.reveal(3), 200.0);
        assert_eq!(state.reveal(1), 100.0);
        assert_eq!(state.reveal(99), 100.0);
    }

    #[test]
    fn tab_at_accounts_for_offset_and_gaps() {
        let mut state = ScrollableTabStripState::new(
            tabs(8),
            FixedTabWidth(100.0),
            TabStripConfig::default().gap(10.0),
        );
        state.set_viewport_width(500.0);
        assert_eq!(state.content_width(), 870.0);
        assert_eq!(state.tab_at(5.0), Some(0));
        assert_eq!(state.tab_at(105.0), None);
        assert_eq!(state.tab_at(115.0), Some(1));
        state.on_scroll(220.0);
        assert_eq!(state.tab_at(0.0), Some(2));
        assert_eq!(state.tab_at(-1.0), None);
        assert_eq!(state.tab_at(500.0), None);
    }

    #[test]
    fn set_tabs_reclamps() {
        let mut state = strip(8, 500.0);
        state.on_scroll(300.0);
        state.set_tabs(tabs(6));
        assert_eq!(state.scroll_offset(), 100.0);
        state.set_tabs(Vec::new());
        assert_eq!(state.scroll_offset(), 0.0);
        assert_eq!(state.controls(), OverflowControls::default());
    }

    #[test]
    fn view_marks_active_and_visible_tabs() {
        let mut state = strip(8, 500.0);
        state.on_scroll(150.0);
        let view = state.view(&PathPrefixMatcher::new("/t3/details"));
        assert_eq!(view.active_index(), Some(3));
        assert_eq!(view.tabs[3].x, 300.0);
        let visible: Vec<usize> = view
            .tabs
            .iter()
            .filter(|tab| tab.visible)
            .map(|tab| tab.index)
            .collect();
        assert_eq!(visible, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(
            view.controls,
            OverflowControls {
                show_left: true,
                show_right: true
            }
        );
    }

    #[test]
    fn validate_reports_bad_values() {
        assert!(TabStripConfig::default().validate().is_empty());
        let errors = TabStripConfig::default()
            .page_fraction(1.5)
            .wheel_step(0.0)
            .gap(-1.0)
            .validate();
        assert_eq!(errors.len(), 3);
    }
}
