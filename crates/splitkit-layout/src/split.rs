#![forbid(unsafe_code)]

//! Split-pane state machine and layout solver.
//!
//! ```text
//! Idle --pointer down on divider--> Dragging
//! Dragging --pointer move--> Dragging   (size = clamp(origin + delta))
//! Dragging --pointer up / cancel--> Idle
//! ```
//!
//! `collapsed` is a flag orthogonal to the drag phase. Toggling it never
//! touches the stored size or the drag origin, so expanding restores the
//! size the first region had before it collapsed.
//!
//! # Invariants
//!
//! 1. `size` always lies within [`SplitPaneState::bounds`].
//! 2. While dragging, every move computes `origin.size_at_drag_start + delta`
//!    against the origin captured at drag start; nothing accumulates per move.
//! 3. Moves, ups and cancels arriving in `Idle` are no-ops.
//! 4. At most one drag is active; a second press while dragging is a no-op.
//! 5. No drag starts before the container has been measured.
//!
//! # Failure Modes
//!
//! None surface. Negative, non-finite or out-of-range sizes are clamped;
//! stray events are reported as [`SplitPaneEffect::Noop`] with a reason.

use serde::{Deserialize, Serialize};
use splitkit_core::event::{KeyCode, KeyEvent, PointerId};
use splitkit_core::geometry::{Axis, Point, Rect};

/// Default hit-test thickness of the divider, in pixels.
pub const SPLIT_DEFAULT_DIVIDER_THICKNESS: f64 = 6.0;

/// Default extent of the square collapse toggle, in pixels.
pub const SPLIT_DEFAULT_TOGGLE_EXTENT: f64 = 16.0;

/// Default keyboard resize step, in the configured unit.
pub const SPLIT_DEFAULT_KEYBOARD_STEP: f64 = 10.0;

/// Steps applied per key press while Shift is held.
pub const SPLIT_COARSE_KEYBOARD_STEPS: u16 = 10;

/// Container extent in percent mode.
const PERCENT_TOTAL: f64 = 100.0;

/// Orientation of a split pane.
///
/// `Horizontal` lays the regions out side by side (row), `Vertical` stacks
/// them (column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Axis along which the regions are laid out.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Horizontal => Axis::Horizontal,
            Self::Vertical => Axis::Vertical,
        }
    }
}

/// Unit of `initial_size`, `min_size`, `keyboard_step` and the stored size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeUnit {
    /// Absolute pixels; bounds are `[min, container - min]`.
    #[default]
    Pixels,
    /// Percent of the container; bounds are `[min, 100 - min]` and pointer
    /// deltas are scaled by `100 / container_px`.
    Percent,
}

/// Split pane configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitPaneConfig {
    pub orientation: Orientation,
    /// Size of the first region at mount.
    pub initial_size: f64,
    /// Minimum size of either region.
    pub min_size: f64,
    /// Whether the collapse toggle is offered.
    pub collapsible: bool,
    pub unit: SizeUnit,
    /// Divider hit-test thickness in pixels. The divider overlays the region
    /// boundary and takes no space from either region.
    pub divider_thickness: f64,
    /// Collapse toggle extent in pixels.
    pub toggle_extent: f64,
    /// Keyboard resize step in the configured unit.
    pub keyboard_step: f64,
}

impl Default for SplitPaneConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            initial_size: 300.0,
            min_size: 0.0,
            collapsible: true,
            unit: SizeUnit::Pixels,
            divider_thickness: SPLIT_DEFAULT_DIVIDER_THICKNESS,
            toggle_extent: SPLIT_DEFAULT_TOGGLE_EXTENT,
            keyboard_step: SPLIT_DEFAULT_KEYBOARD_STEP,
        }
    }
}

impl SplitPaneConfig {
    /// Config with the given orientation and initial size.
    #[must_use]
    pub fn new(orientation: Orientation, initial_size: f64) -> Self {
        Self {
            orientation,
            initial_size,
            ..Self::default()
        }
    }

    /// Side-by-side regions.
    #[must_use]
    pub fn horizontal(initial_size: f64) -> Self {
        Self::new(Orientation::Horizontal, initial_size)
    }

    /// Stacked regions.
    #[must_use]
    pub fn vertical(initial_size: f64) -> Self {
        Self::new(Orientation::Vertical, initial_size)
    }

    #[must_use]
    pub fn min_size(mut self, min_size: f64) -> Self {
        self.min_size = min_size;
        self
    }

    #[must_use]
    pub fn collapsible(mut self, collapsible: bool) -> Self {
        self.collapsible = collapsible;
        self
    }

    #[must_use]
    pub fn unit(mut self, unit: SizeUnit) -> Self {
        self.unit = unit;
        self
    }

    #[must_use]
    pub fn divider_thickness(mut self, thickness: f64) -> Self {
        self.divider_thickness = thickness;
        self
    }

    #[must_use]
    pub fn toggle_extent(mut self, extent: f64) -> Self {
        self.toggle_extent = extent;
        self
    }

    #[must_use]
    pub fn keyboard_step(mut self, step: f64) -> Self {
        self.keyboard_step = step;
        self
    }

    /// List out-of-range values. An empty list means the config is valid.
    ///
    /// Invalid values are still accepted and clamped when a state is built.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.initial_size.is_finite() || self.initial_size < 0.0 {
            errors.push(format!(
                "split_pane.initial_size must be a non-negative number (got {})",
                self.initial_size
            ));
        }
        if !self.min_size.is_finite() || self.min_size < 0.0 {
            errors.push(format!(
                "split_pane.min_size must be a non-negative number (got {})",
                self.min_size
            ));
        }
        if self.unit == SizeUnit::Percent {
            if self.initial_size > PERCENT_TOTAL {
                errors.push(format!(
                    "split_pane.initial_size must be <= 100 in percent mode (got {})",
                    self.initial_size
                ));
            }
            if self.min_size > PERCENT_TOTAL / 2.0 {
                errors.push(format!(
                    "split_pane.min_size must be <= 50 in percent mode (got {})",
                    self.min_size
                ));
            }
        }
        if !self.divider_thickness.is_finite() || self.divider_thickness <= 0.0 {
            errors.push(format!(
                "split_pane.divider_thickness must be > 0 (got {})",
                self.divider_thickness
            ));
        }
        if !self.toggle_extent.is_finite() || self.toggle_extent < 0.0 {
            errors.push(format!(
                "split_pane.toggle_extent must be >= 0 (got {})",
                self.toggle_extent
            ));
        }
        if !self.keyboard_step.is_finite() || self.keyboard_step <= 0.0 {
            errors.push(format!(
                "split_pane.keyboard_step must be > 0 (got {})",
                self.keyboard_step
            ));
        }
        errors
    }

    fn sanitized(mut self) -> Self {
        self.initial_size = non_negative(self.initial_size);
        self.min_size = non_negative(self.min_size);
        if !self.divider_thickness.is_finite() || self.divider_thickness <= 0.0 {
            self.divider_thickness = SPLIT_DEFAULT_DIVIDER_THICKNESS;
        }
        self.toggle_extent = non_negative(self.toggle_extent);
        if !self.keyboard_step.is_finite() || self.keyboard_step <= 0.0 {
            self.keyboard_step = SPLIT_DEFAULT_KEYBOARD_STEP;
        }
        self
    }
}

/// Captured once when a drag starts; never mutated while it runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOrigin {
    /// Pointer coordinate on the active axis at press time.
    pub axis_coordinate: f64,
    /// Size of the first region at press time.
    pub size_at_drag_start: f64,
    /// Pointer that owns the drag.
    pub pointer_id: PointerId,
}

/// Drag lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging(DragOrigin),
}

/// Direction for discrete resize commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeDirection {
    /// Move the divider away from the first region's start.
    Grow,
    /// Move the divider toward the first region's start.
    Shrink,
}

/// Why an input was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitPaneNoopReason {
    IdleWithoutActiveDrag,
    ActiveDragAlreadyInProgress,
    ActiveStateDisallowsDiscreteInput,
    PointerMismatch,
    NonPrimaryButton,
    InvalidCoordinate,
    /// The container has not been measured, so there are no bounds to drag
    /// within.
    UnmeasuredContainer,
    OutsideDivider,
    NotCollapsible,
    UnhandledKey,
    Unchanged,
}

/// Outcome of one input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitPaneEffect {
    DragStarted { origin: DragOrigin },
    Resized { from: f64, to: f64 },
    DragEnded { size: f64, total_delta: f64 },
    DragCanceled { restored: f64 },
    CollapseToggled { collapsed: bool },
    Nudged { from: f64, to: f64 },
    Noop { reason: SplitPaneNoopReason },
}

impl SplitPaneEffect {
    const fn noop(reason: SplitPaneNoopReason) -> Self {
        Self::Noop { reason }
    }

    /// Whether the input was ignored.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::Noop { .. })
    }
}

/// Part of a split pane under a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitHit {
    First,
    Divider,
    CollapseToggle,
    Second,
}

/// Solved split-pane geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitLayout {
    pub orientation: Orientation,
    pub collapsed: bool,
    pub first: Rect,
    pub divider: Rect,
    pub second: Rect,
    pub collapse_toggle: Option<Rect>,
}

impl SplitLayout {
    /// Rendered extent of the first region along the active axis.
    #[must_use]
    pub fn first_extent(&self) -> f64 {
        self.first.extent(self.orientation.axis())
    }

    /// Classify `point`. The toggle wins over the divider, which wins over
    /// the regions it overlays.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<SplitHit> {
        if self
            .collapse_toggle
            .is_some_and(|toggle| toggle.contains(point))
        {
            return Some(SplitHit::CollapseToggle);
        }
        if self.divider.contains(point) {
            return Some(SplitHit::Divider);
        }
        if self.first.contains(point) {
            return Some(SplitHit::First);
        }
        if self.second.contains(point) {
            return Some(SplitHit::Second);
        }
        None
    }
}

/// Canonical split-pane state.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPaneState {
    config: SplitPaneConfig,
    container_px: f64,
    size: f64,
    collapsed: bool,
    phase: DragPhase,
}

impl SplitPaneState {
    /// State for a container whose extent is not known yet.
    ///
    /// In pixel mode the upper bound is open until
    /// [`SplitPaneState::set_container_extent`] reports a size.
    #[must_use]
    pub fn new(config: SplitPaneConfig) -> Self {
        Self::with_container(config, 0.0)
    }

    /// State for a container with a known extent (pixels, active axis).
    #[must_use]
    pub fn with_container(config: SplitPaneConfig, container_px: f64) -> Self {
        let config = config.sanitized();
        let mut state = Self {
            size: config.initial_size,
            config,
            container_px: non_negative(container_px),
            collapsed: false,
            phase: DragPhase::Idle,
        };
        state.size = state.clamp_size(state.size);
        state
    }

    #[must_use]
    pub fn config(&self) -> &SplitPaneConfig {
        &self.config
    }

    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    /// Stored size of the first region, in the configured unit.
    ///
    /// Preserved while collapsed.
    #[must_use]
    pub const fn size_of_first_region(&self) -> f64 {
        self.size
    }

    /// Size the first region renders at: zero while collapsed.
    #[must_use]
    pub const fn rendered_size(&self) -> f64 {
        if self.collapsed { 0.0 } else { self.size }
    }

    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    #[must_use]
    pub const fn phase(&self) -> DragPhase {
        self.phase
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    #[must_use]
    pub const fn drag_origin(&self) -> Option<DragOrigin> {
        match self.phase {
            DragPhase::Dragging(origin) => Some(origin),
            DragPhase::Idle => None,
        }
    }

    /// Container extent in pixels along the active axis (0 = unknown).
    #[must_use]
    pub const fn container_extent(&self) -> f64 {
        self.container_px
    }

    /// Inclusive `(min, max)` bounds for the stored size.
    ///
    /// When the container is smaller than two minimum sizes both bounds
    /// collapse to its centre.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        let min = self.config.min_size;
        let Some(total) = self.total() else {
            return (min, f64::INFINITY);
        };
        let max = total - min;
        if max < min {
            let centre = total / 2.0;
            (centre, centre)
        } else {
            (min, max)
        }
    }

    /// Report a new container extent and re-clamp the stored size.
    pub fn set_container_extent(&mut self, container_px: f64) -> SplitPaneEffect {
        let container_px = non_negative(container_px);
        if container_px == self.container_px {
            return SplitPaneEffect::noop(SplitPaneNoopReason::Unchanged);
        }
        self.container_px = container_px;
        let clamped = self.clamp_size(self.size);
        self.apply_size(clamped)
    }

    /// Start a drag from `position`.
    ///
    /// Refused until a container extent is known.
    pub fn begin_drag(&mut self, position: Point, pointer_id: PointerId) -> SplitPaneEffect {
        if self.is_dragging() {
            return SplitPaneEffect::noop(SplitPaneNoopReason::ActiveDragAlreadyInProgress);
        }
        if self.container_px <= 0.0 {
            return SplitPaneEffect::noop(SplitPaneNoopReason::UnmeasuredContainer);
        }
        let axis_coordinate = position.along(self.config.orientation.axis());
        if !axis_coordinate.is_finite() {
            return SplitPaneEffect::noop(SplitPaneNoopReason::InvalidCoordinate);
        }
        let origin = DragOrigin {
            axis_coordinate,
            size_at_drag_start: self.size,
            pointer_id,
        };
        self.phase = DragPhase::Dragging(origin);
        tracing::debug!(
            message = "split_pane.drag_start",
            axis_coordinate,
            size = self.size,
            pointer = pointer_id.0
        );
        SplitPaneEffect::DragStarted { origin }
    }

    /// Apply a pointer move during a drag.
    pub fn drag_to(&mut self, position: Point, pointer_id: PointerId) -> SplitPaneEffect {
        let DragPhase::Dragging(origin) = self.phase else {
            return SplitPaneEffect::noop(SplitPaneNoopReason::IdleWithoutActiveDrag);
        };
        if pointer_id != origin.pointer_id {
            return SplitPaneEffect::noop(SplitPaneNoopReason::PointerMismatch);
        }
        let coordinate = position.along(self.config.orientation.axis());
        if !coordinate.is_finite() {
            return SplitPaneEffect::noop(SplitPaneNoopReason::InvalidCoordinate);
        }
        let delta = self.px_to_units(coordinate - origin.axis_coordinate);
        let next = self.clamp_size(origin.size_at_drag_start + delta);
        self.apply_size(next)
    }

    /// Finish the drag owned by `pointer_id`, applying the release position.
    pub fn end_drag(&mut self, position: Point, pointer_id: PointerId) -> SplitPaneEffect {
        let DragPhase::Dragging(origin) = self.phase else {
            return SplitPaneEffect::noop(SplitPaneNoopReason::IdleWithoutActiveDrag);
        };
        if pointer_id != origin.pointer_id {
            return SplitPaneEffect::noop(SplitPaneNoopReason::PointerMismatch);
        }
        let _ = self.drag_to(position, pointer_id);
        self.phase = DragPhase::Idle;
        let total_delta = self.size - origin.size_at_drag_start;
        tracing::debug!(
            message = "split_pane.drag_end",
            size = self.size,
            total_delta
        );
        SplitPaneEffect::DragEnded {
            size: self.size,
            total_delta,
        }
    }

    /// Abort the drag and restore the size captured at drag start.
    pub fn cancel_drag(&mut self) -> SplitPaneEffect {
        let DragPhase::Dragging(origin) = self.phase else {
            return SplitPaneEffect::noop(SplitPaneNoopReason::IdleWithoutActiveDrag);
        };
        self.phase = DragPhase::Idle;
        self.size = self.clamp_size(origin.size_at_drag_start);
        tracing::debug!(message = "split_pane.drag_cancel", restored = self.size);
        SplitPaneEffect::DragCanceled { restored: self.size }
    }

    /// Flip the collapsed flag.
    pub fn toggle_collapse(&mut self) -> SplitPaneEffect {
        self.set_collapsed(!self.collapsed)
    }

    /// Set the collapsed flag.
    pub fn set_collapsed(&mut self, collapsed: bool) -> SplitPaneEffect {
        if !self.config.collapsible {
            return SplitPaneEffect::noop(SplitPaneNoopReason::NotCollapsible);
        }
        if collapsed == self.collapsed {
            return SplitPaneEffect::noop(SplitPaneNoopReason::Unchanged);
        }
        self.collapsed = collapsed;
        tracing::debug!(
            message = "split_pane.collapse",
            collapsed,
            preserved_size = self.size
        );
        SplitPaneEffect::CollapseToggled { collapsed }
    }

    /// Move the divider by `steps` keyboard steps.
    pub fn nudge(&mut self, direction: ResizeDirection, steps: u16) -> SplitPaneEffect {
        let magnitude = self.config.keyboard_step * f64::from(steps);
        let delta = match direction {
            ResizeDirection::Grow => magnitude,
            ResizeDirection::Shrink => -magnitude,
        };
        match self.set_size(self.size + delta) {
            SplitPaneEffect::Resized { from, to } => SplitPaneEffect::Nudged { from, to },
            other => other,
        }
    }

    /// Set the size directly (clamped). Ignored while dragging.
    pub fn set_size(&mut self, size: f64) -> SplitPaneEffect {
        if self.is_dragging() {
            return SplitPaneEffect::noop(SplitPaneNoopReason::ActiveStateDisallowsDiscreteInput);
        }
        let next = self.clamp_size(size);
        self.apply_size(next)
    }

    /// Restore the configured initial size.
    pub fn reset(&mut self) -> SplitPaneEffect {
        self.set_size(self.config.initial_size)
    }

    /// Keyboard handling for a focused divider.
    ///
    /// Arrows along the active axis nudge (Shift = coarse), `Home`/`End`
    /// jump to the bounds, `Enter` toggles collapse, `Escape` cancels a drag.
    pub fn handle_key(&mut self, key: &KeyEvent) -> SplitPaneEffect {
        let steps = if key.shift() {
            SPLIT_COARSE_KEYBOARD_STEPS
        } else {
            1
        };
        match (self.config.orientation, key.code) {
            (Orientation::Horizontal, KeyCode::Left) | (Orientation::Vertical, KeyCode::Up) => {
                self.nudge(ResizeDirection::Shrink, steps)
            }
            (Orientation::Horizontal, KeyCode::Right) | (Orientation::Vertical, KeyCode::Down) => {
                self.nudge(ResizeDirection::Grow, steps)
            }
            (_, KeyCode::Home) => {
                let (min, _) = self.bounds();
                self.set_size(min)
            }
            (_, KeyCode::End) => {
                let (_, max) = self.bounds();
                if max.is_finite() {
                    self.set_size(max)
                } else {
                    SplitPaneEffect::noop(SplitPaneNoopReason::Unchanged)
                }
            }
            (_, KeyCode::Enter) => self.toggle_collapse(),
            (_, KeyCode::Escape) => self.cancel_drag(),
            _ => SplitPaneEffect::noop(SplitPaneNoopReason::UnhandledKey),
        }
    }

    /// Solve region geometry inside `area`.
    ///
    /// Percent sizes resolve against `area`; pixel sizes are clipped to it.
    #[must_use]
    pub fn layout(&self, area: Rect) -> SplitLayout {
        let axis = self.config.orientation.axis();
        let total = area.extent(axis);
        let first_px = if self.collapsed {
            0.0
        } else {
            let px = match self.config.unit {
                SizeUnit::Pixels => self.size,
                SizeUnit::Percent => self.size * total / PERCENT_TOTAL,
            };
            px.clamp(0.0, total)
        };

        let thickness = self.config.divider_thickness;
        let collapse_toggle = (self.config.collapsible && self.config.toggle_extent > 0.0)
            .then(|| toggle_rect(area, axis, first_px, self.config.toggle_extent));

        SplitLayout {
            orientation: self.config.orientation,
            collapsed: self.collapsed,
            first: area.band(axis, 0.0, first_px),
            divider: area.band(axis, first_px - thickness / 2.0, thickness),
            second: area.band(axis, first_px, total - first_px),
            collapse_toggle,
        }
    }

    fn total(&self) -> Option<f64> {
        match self.config.unit {
            SizeUnit::Pixels => (self.container_px > 0.0).then_some(self.container_px),
            SizeUnit::Percent => Some(PERCENT_TOTAL),
        }
    }

    fn px_to_units(&self, delta_px: f64) -> f64 {
        match self.config.unit {
            SizeUnit::Pixels => delta_px,
            SizeUnit::Percent if self.container_px > 0.0 => {
                delta_px * PERCENT_TOTAL / self.container_px
            }
            SizeUnit::Percent => 0.0,
        }
    }

    fn clamp_size(&self, size: f64) -> f64 {
        let (min, max) = self.bounds();
        if size.is_nan() {
            return min;
        }
        size.clamp(min, max)
    }

    fn apply_size(&mut self, next: f64) -> SplitPaneEffect {
        if next == self.size {
            return SplitPaneEffect::noop(SplitPaneNoopReason::Unchanged);
        }
        let from = self.size;
        self.size = next;
        SplitPaneEffect::Resized { from, to: next }
    }
}

fn toggle_rect(area: Rect, axis: Axis, boundary: f64, extent: f64) -> Rect {
    let total = area.extent(axis);
    let cross_total = area.extent(axis.cross());
    let along = (boundary - extent / 2.0).clamp(0.0, (total - extent).max(0.0));
    let cross = ((cross_total - extent) / 2.0).max(0.0);
    let along_extent = extent.min(total);
    let cross_extent = extent.min(cross_total);
    match axis {
        Axis::Horizontal => Rect::new(area.x + along, area.y + cross, along_extent, cross_extent),
        Axis::Vertical => Rect::new(area.x + cross, area.y + along, cross_extent, along_extent),
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
