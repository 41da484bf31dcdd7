#![forbid(unsafe_code)]

//! Canonical input event types.
//!
//! Pointer coordinates are document pixels. Hosts translate their native
//! events (DOM pointer events, winit cursor events, terminal mouse reports)
//! into these before handing them to components.
//!
//! # Design Notes
//!
//! - `PointerId` distinguishes concurrent pointers (mouse, touches, pens).
//! - Wheel scrolling is a pointer event kind carrying a pixel delta.
//! - `Modifiers` use bitflags for easy combination.

use bitflags::bitflags;

use crate::geometry::Point;

/// Identifier of a physical pointer. The primary mouse is `PointerId::MOUSE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PointerId(pub u32);

impl PointerId {
    /// The primary mouse pointer.
    pub const MOUSE: Self = Self(1);
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button, touch contact, or pen tip.
    Primary,
    /// Right mouse button.
    Secondary,
    /// Middle mouse button (wheel click).
    Middle,
}

/// The kind of pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEventKind {
    /// Button pressed.
    Down(PointerButton),
    /// Button released.
    Up(PointerButton),
    /// Pointer moved, with or without a button held.
    Move,
    /// The platform aborted the pointer sequence (touch stolen, window blur).
    Cancel,
    /// Wheel or trackpad scroll with pixel deltas.
    Wheel { delta_x: f64, delta_y: f64 },
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Point,
    pub pointer_id: PointerId,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a pointer event for the primary mouse with no modifiers.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
            pointer_id: PointerId::MOUSE,
            modifiers: Modifiers::NONE,
        }
    }

    /// Primary-button press at `(x, y)`.
    #[must_use]
    pub const fn down(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down(PointerButton::Primary), x, y)
    }

    /// Pointer move to `(x, y)`.
    #[must_use]
    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    /// Primary-button release at `(x, y)`.
    #[must_use]
    pub const fn up(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up(PointerButton::Primary), x, y)
    }

    /// Set the pointer id.
    #[must_use]
    pub const fn with_pointer(mut self, pointer_id: PointerId) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    /// Set modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether this is a primary-button press.
    #[must_use]
    pub const fn is_primary_down(&self) -> bool {
        matches!(self.kind, PointerEventKind::Down(PointerButton::Primary))
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes the components react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Home,
    End,
    Up,
    Down,
    Left,
    Right,
}

bitflags! {
    /// Modifier keys held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE  = 0b0000;
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_constructors() {
        let down = PointerEvent::down(3.0, 4.0);
        assert!(down.is_primary_down());
        assert_eq!(down.position, Point::new(3.0, 4.0));
        assert_eq!(down.pointer_id, PointerId::MOUSE);

        let up = PointerEvent::up(1.0, 1.0).with_pointer(PointerId(7));
        assert!(!up.is_primary_down());
        assert_eq!(up.pointer_id, PointerId(7));

        let right = PointerEvent::new(PointerEventKind::Down(PointerButton::Secondary), 0.0, 0.0);
        assert!(!right.is_primary_down());
    }

    #[test]
    fn key_modifiers() {
        let key = KeyEvent::new(KeyCode::Left).with_modifiers(Modifiers::SHIFT | Modifiers::CTRL);
        assert!(key.shift());
        assert!(!KeyEvent::new(KeyCode::Left).shift());
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }
}
