#![forbid(unsafe_code)]

//! Mounted split-pane component.
//!
//! [`SplitPane`] owns its two children and a [`SplitPaneState`]. A press on
//! the divider starts a drag and attaches one listener to the document
//! [`PointerTarget`] for moves, releases and cancels; the listener lives in
//! an `ActiveDrag` handle and is detached when that handle is dropped, which
//! happens on drag end, cancel or unmount.
//!
//! The listener captures only a `Weak` reference to the component's shared
//! state, so a leaked listener could never keep a torn-down pane alive, and
//! an unmounted pane always leaves the document with zero listeners.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use splitkit_core::event::{KeyEvent, PointerEvent, PointerEventKind};
use splitkit_core::geometry::Rect;
use splitkit_core::pointer::{ListenerGuard, PointerKinds, PointerTarget};
use web_time::Instant;

use crate::split::{
    Orientation, ResizeDirection, SplitHit, SplitLayout, SplitPaneConfig, SplitPaneEffect,
    SplitPaneNoopReason, SplitPaneState,
};

/// Owner label of the document listener attached during a drag.
pub const SPLIT_PANE_LISTENER_OWNER: &str = "split_pane";

/// Mount-time properties.
#[derive(Debug, Clone)]
pub struct SplitPaneProps<A, B> {
    pub first_child: A,
    pub second_child: B,
    pub config: SplitPaneConfig,
    /// Presentation hint for the container.
    pub class_name: Option<String>,
    pub first_class_name: Option<String>,
    pub second_class_name: Option<String>,
    /// Container extent along the active axis, if the host knows it at
    /// mount. Otherwise the first [`SplitPane::layout`] supplies it.
    pub container_extent: Option<f64>,
}

impl<A, B> SplitPaneProps<A, B> {
    #[must_use]
    pub fn new(first_child: A, second_child: B, config: SplitPaneConfig) -> Self {
        Self {
            first_child,
            second_child,
            config,
            class_name: None,
            first_class_name: None,
            second_class_name: None,
            container_extent: None,
        }
    }

    #[must_use]
    pub fn container_extent(mut self, extent: f64) -> Self {
        self.container_extent = Some(extent);
        self
    }

    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn first_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.first_class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn second_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.second_class_name = Some(class_name.into());
        self
    }
}

/// One rendered region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region<'a, C> {
    pub rect: Rect,
    pub class_name: Option<&'a str>,
    pub child: &'a C,
    /// False for the first region while collapsed.
    pub visible: bool,
}

/// Render output of a [`SplitPane`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitPaneFrame<'a, A, B> {
    pub layout: SplitLayout,
    pub class_name: Option<&'a str>,
    /// `"row"` or `"column"`.
    pub flex_direction: &'static str,
    pub dragging: bool,
    pub first: Region<'a, A>,
    pub second: Region<'a, B>,
}

/// Owns the document listener for one drag.
struct ActiveDrag {
    listener: ListenerGuard,
}

struct Shared {
    state: SplitPaneState,
    active: Option<ActiveDrag>,
    last_layout: Option<SplitLayout>,
    effects: Vec<SplitPaneEffect>,
}

impl Shared {
    fn record(&mut self, effect: SplitPaneEffect) -> SplitPaneEffect {
        if !effect.is_noop() {
            self.effects.push(effect);
        }
        effect
    }

    /// Take the drag handle once the machine has left `Dragging`.
    fn finished_drag(&mut self) -> Option<ActiveDrag> {
        if self.state.is_dragging() {
            None
        } else {
            self.active.take()
        }
    }
}

/// A resizable, collapsible two-region container.
///
/// Every input method returns the [`SplitPaneEffect`] it produced. Effects
/// that changed something are also queued, including those produced by the
/// document listener, and can be collected with
/// [`SplitPane::drain_effects`].
pub struct SplitPane<A, B> {
    first_child: A,
    second_child: B,
    class_name: Option<String>,
    first_class_name: Option<String>,
    second_class_name: Option<String>,
    document: PointerTarget,
    shared: Rc<RefCell<Shared>>,
}

impl<A, B> fmt::Debug for SplitPane<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("SplitPane")
            .field("state", &shared.state)
            .field("listening", &shared.active.is_some())
            .finish_non_exhaustive()
    }
}

impl<A, B> SplitPane<A, B> {
    /// Mount a pane against the document pointer target.
    ///
    /// No listener is attached until a drag starts, and no drag starts
    /// until the container extent is known from the props or a layout pass.
    #[must_use]
    pub fn mount(props: SplitPaneProps<A, B>, document: &PointerTarget) -> Self {
        let SplitPaneProps {
            first_child,
            second_child,
            config,
            class_name,
            first_class_name,
            second_class_name,
            container_extent,
        } = props;
        Self {
            first_child,
            second_child,
            class_name,
            first_class_name,
            second_class_name,
            document: document.clone(),
            shared: Rc::new(RefCell::new(Shared {
                state: SplitPaneState::with_container(config, container_extent.unwrap_or(0.0)),
                active: None,
                last_layout: None,
                effects: Vec::new(),
            })),
        }
    }

    /// Release the drag listener, if any, and drop the pane.
    pub fn unmount(self) {
        let released = self.shared.borrow_mut().active.take();
        tracing::debug!(
            message = "split_pane.unmount",
            released_listener = released.is_some()
        );
        drop(released);
    }

    /// Snapshot of the canonical state.
    #[must_use]
    pub fn state(&self) -> SplitPaneState {
        self.shared.borrow().state.clone()
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.shared.borrow().state.orientation()
    }

    #[must_use]
    pub fn size_of_first_region(&self) -> f64 {
        self.shared.borrow().state.size_of_first_region()
    }

    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.shared.borrow().state.is_collapsed()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.shared.borrow().state.is_dragging()
    }

    /// Whether a document listener is currently attached for this pane.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.shared
            .borrow()
            .active
            .as_ref()
            .is_some_and(|drag| drag.listener.is_attached())
    }

    #[must_use]
    pub fn first_child(&self) -> &A {
        &self.first_child
    }

    #[must_use]
    pub fn second_child(&self) -> &B {
        &self.second_child
    }

    pub fn first_child_mut(&mut self) -> &mut A {
        &mut self.first_child
    }

    pub fn second_child_mut(&mut self) -> &mut B {
        &mut self.second_child
    }

    /// Take every queued effect, oldest first.
    pub fn drain_effects(&self) -> Vec<SplitPaneEffect> {
        std::mem::take(&mut self.shared.borrow_mut().effects)
    }

    /// Route a press inside the pane.
    ///
    /// The position is hit-tested against the last computed layout: the
    /// collapse toggle flips collapse, the divider starts a drag, anything
    /// else is ignored.
    pub fn pointer_down(&self, event: &PointerEvent) -> SplitPaneEffect {
        if !event.is_primary_down() {
            return self.noop(SplitPaneNoopReason::NonPrimaryButton);
        }
        let hit = self
            .shared
            .borrow()
            .last_layout
            .and_then(|layout| layout.hit_test(event.position));
        match hit {
            Some(SplitHit::CollapseToggle) => self.toggle_collapse(),
            Some(SplitHit::Divider) => self.start_drag(event),
            _ => self.noop(SplitPaneNoopReason::OutsideDivider),
        }
    }

    /// A press the host already routed to the divider element.
    pub fn divider_pointer_down(&self, event: &PointerEvent) -> SplitPaneEffect {
        if !event.is_primary_down() {
            return self.noop(SplitPaneNoopReason::NonPrimaryButton);
        }
        self.start_drag(event)
    }

    /// Abort the active drag, restoring the size it started from.
    pub fn cancel_drag(&self) -> SplitPaneEffect {
        let (effect, released) = {
            let mut shared = self.shared.borrow_mut();
            let effect = shared.state.cancel_drag();
            let released = shared.finished_drag();
            (shared.record(effect), released)
        };
        drop(released);
        effect
    }

    pub fn toggle_collapse(&self) -> SplitPaneEffect {
        self.apply(SplitPaneState::toggle_collapse)
    }

    pub fn set_collapsed(&self, collapsed: bool) -> SplitPaneEffect {
        self.apply(|state| state.set_collapsed(collapsed))
    }

    pub fn nudge(&self, direction: ResizeDirection, steps: u16) -> SplitPaneEffect {
        self.apply(|state| state.nudge(direction, steps))
    }

    pub fn set_size(&self, size: f64) -> SplitPaneEffect {
        self.apply(|state| state.set_size(size))
    }

    pub fn reset(&self) -> SplitPaneEffect {
        self.apply(SplitPaneState::reset)
    }

    /// Keyboard input for the focused divider.
    pub fn handle_key(&self, key: &KeyEvent) -> SplitPaneEffect {
        let (effect, released) = {
            let mut shared = self.shared.borrow_mut();
            let effect = shared.state.handle_key(key);
            let released = shared.finished_drag();
            (shared.record(effect), released)
        };
        drop(released);
        effect
    }

    /// Solve the layout for `area`.
    ///
    /// The area's extent along the active axis becomes the container size,
    /// so the stored size is re-clamped whenever the pane is laid out in a
    /// different area.
    pub fn layout(&self, area: Rect) -> SplitLayout {
        let mut shared = self.shared.borrow_mut();
        let axis = shared.state.orientation().axis();
        let resized = shared.state.set_container_extent(area.extent(axis));
        shared.record(resized);

        let start = Instant::now();
        let span = tracing::debug_span!(
            "split_pane.layout",
            orientation = ?shared.state.orientation(),
            collapsed = shared.state.is_collapsed(),
            dragging = shared.state.is_dragging(),
            first_extent = tracing::field::Empty,
            layout_duration_us = tracing::field::Empty
        );
        let _guard = span.enter();
        let layout = shared.state.layout(area);
        shared.last_layout = Some(layout);
        span.record("first_extent", layout.first_extent());
        span.record(
            "layout_duration_us",
            u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
        );
        layout
    }

    /// Lay out and describe both regions for the host renderer.
    pub fn render(&self, area: Rect) -> SplitPaneFrame<'_, A, B> {
        let layout = self.layout(area);
        let dragging = self.is_dragging();
        SplitPaneFrame {
            layout,
            class_name: self.class_name.as_deref(),
            flex_direction: layout.orientation.axis().flex_direction(),
            dragging,
            first: Region {
                rect: layout.first,
                class_name: self.first_class_name.as_deref(),
                child: &self.first_child,
                visible: !layout.collapsed,
            },
            second: Region {
                rect: layout.second,
                class_name: self.second_class_name.as_deref(),
                child: &self.second_child,
                visible: true,
            },
        }
    }

    fn start_drag(&self, event: &PointerEvent) -> SplitPaneEffect {
        let effect = self
            .shared
            .borrow_mut()
            .state
            .begin_drag(event.position, event.pointer_id);
        if matches!(effect, SplitPaneEffect::DragStarted { .. }) {
            let weak = Rc::downgrade(&self.shared);
            let listener = self.document.listen(
                SPLIT_PANE_LISTENER_OWNER,
                PointerKinds::DRAG,
                move |event| on_document_event(&weak, event),
            );
            self.shared.borrow_mut().active = Some(ActiveDrag { listener });
        }
        self.shared.borrow_mut().record(effect)
    }

    fn apply(&self, f: impl FnOnce(&mut SplitPaneState) -> SplitPaneEffect) -> SplitPaneEffect {
        let mut shared = self.shared.borrow_mut();
        let effect = f(&mut shared.state);
        shared.record(effect)
    }

    fn noop(&self, reason: SplitPaneNoopReason) -> SplitPaneEffect {
        SplitPaneEffect::Noop { reason }
    }
}

fn on_document_event(shared: &Weak<RefCell<Shared>>, event: &PointerEvent) {
    let Some(shared) = shared.upgrade() else {
        return;
    };
    let released = {
        let mut inner = shared.borrow_mut();
        let effect = match event.kind {
            PointerEventKind::Move => inner.state.drag_to(event.position, event.pointer_id),
            PointerEventKind::Up(_) => {
                let released_at = inner.state.drag_to(event.position, event.pointer_id);
                inner.record(released_at);
                inner.state.end_drag(event.position, event.pointer_id)
            }
            PointerEventKind::Cancel => match inner.state.drag_origin() {
                Some(origin) if origin.pointer_id == event.pointer_id => inner.state.cancel_drag(),
                Some(_) => SplitPaneEffect::Noop {
                    reason: SplitPaneNoopReason::PointerMismatch,
                },
                None => SplitPaneEffect::Noop {
                    reason: SplitPaneNoopReason::IdleWithoutActiveDrag,
                },
            },
            PointerEventKind::Down(_) | PointerEventKind::Wheel { .. } => return,
        };
        inner.record(effect);
        inner.finished_drag()
    };
    drop(released);
}
