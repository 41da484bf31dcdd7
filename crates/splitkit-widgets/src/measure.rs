#![forbid(unsafe_code)]

//! Tab width measurement.
//!
//! The strip needs each tab's rendered width to compute its content width
//! and tab offsets. Hosts that measure real elements implement
//! [`TabMeasure`] themselves; [`FixedTabWidth`] and [`LabelWidth`] cover
//! uniform tabs and monospace-like estimation.

use unicode_width::UnicodeWidthStr;

use crate::tab::TabDescriptor;

/// Reports the rendered width of a tab, in pixels.
pub trait TabMeasure {
    fn tab_width(&self, tab: &TabDescriptor) -> f64;
}

impl<F> TabMeasure for F
where
    F: Fn(&TabDescriptor) -> f64,
{
    fn tab_width(&self, tab: &TabDescriptor) -> f64 {
        self(tab)
    }
}

/// Every tab has the same width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTabWidth(pub f64);

impl TabMeasure for FixedTabWidth {
    fn tab_width(&self, _tab: &TabDescriptor) -> f64 {
        self.0
    }
}

/// Width estimated from the label's display columns plus decorations.
///
/// `width = padding + columns(label) * char_width + decorations`, where wide
/// characters count as two columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelWidth {
    pub char_width: f64,
    /// Horizontal padding, both sides combined.
    pub padding: f64,
    pub icon_width: f64,
    pub badge_width: f64,
    pub spinner_width: f64,
}

impl Default for LabelWidth {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            padding: 24.0,
            icon_width: 20.0,
            badge_width: 36.0,
            spinner_width: 16.0,
        }
    }
}

impl LabelWidth {
    #[must_use]
    pub fn char_width(mut self, width: f64) -> Self {
        self.char_width = width;
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    fn columns(&self, text: &str) -> f64 {
        f64::from(u32::try_from(text.width()).unwrap_or(u32::MAX)) * self.char_width
    }
}

impl TabMeasure for LabelWidth {
    fn tab_width(&self, tab: &TabDescriptor) -> f64 {
        let mut width = self.padding + self.columns(tab.label());
        if tab.icon_name().is_some() {
            width += self.icon_width;
        }
        if tab.is_beta() {
            width += self.badge_width;
        }
        if tab.is_loading() {
            width += self.spinner_width;
        }
        if let Some(trailing) = tab.trailing() {
            width += self.char_width + self.columns(trailing);
        }
        width
    }
}
