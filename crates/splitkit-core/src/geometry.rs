#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are CSS-style pixels (`f64`, origin at top-left). Layout code
//! treats non-finite inputs as zero rather than propagating NaN.

/// Axis along which a container lays out its children.
///
/// `Horizontal` places children side by side (row, x coordinate);
/// `Vertical` stacks them (column, y coordinate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// CSS flex-direction equivalent.
    #[must_use]
    pub const fn flex_direction(self) -> &'static str {
        match self {
            Self::Horizontal => "row",
            Self::Vertical => "column",
        }
    }
}

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Coordinate along `axis`.
    #[inline]
    #[must_use]
    pub const fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Extent along `axis`.
    #[inline]
    #[must_use]
    pub const fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// An axis-aligned rectangle used for layout bounds and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle. Negative or non-finite extents become zero.
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: finite_or_zero(x),
            y: finite_or_zero(y),
            width: finite_or_zero(width).max(0.0),
            height: finite_or_zero(height).max(0.0),
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    #[must_use]
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Start coordinate along `axis`.
    #[inline]
    #[must_use]
    pub fn start(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Extent along `axis`.
    #[inline]
    #[must_use]
    pub fn extent(&self, axis: Axis) -> f64 {
        self.size().along(axis)
    }

    /// Slice a band out of this rectangle along `axis`.
    ///
    /// `offset` is relative to [`Rect::start`]; the band keeps the full cross
    /// extent. The result is clipped to this rectangle.
    #[must_use]
    pub fn band(&self, axis: Axis, offset: f64, extent: f64) -> Rect {
        let total = self.extent(axis);
        let offset = finite_or_zero(offset).clamp(0.0, total);
        let extent = finite_or_zero(extent).clamp(0.0, total - offset);
        match axis {
            Axis::Horizontal => Rect::new(self.x + offset, self.y, extent, self.height),
            Axis::Vertical => Rect::new(self.x, self.y + offset, self.width, extent),
        }
    }
}

#[inline]
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
