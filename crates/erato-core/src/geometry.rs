//! Geometric primitives for grid layout and drawing.
//!
//! This module provides the small set of geometric types the sieve animation
//! needs to place cells and labels on a drawing surface.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in display units
//! - [`Size`] - Width and height dimensions
//! - [`Rect`] - An axis-aligned rectangle anchored at its top-left corner
//!
//! # Coordinate System
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! This convention matches canvas and terminal coordinate systems.

/// A 2D point representing a position in display units.
///
/// # Examples
///
/// ```
/// # use erato_core::geometry::Point;
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x(), 10.0);
/// assert_eq!(p.y(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }
}

/// Width and height in display units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    /// Creates a new size with the specified width and height
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns true if either dimension is zero or negative
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle defined by its top-left corner and size.
///
/// # Examples
///
/// ```
/// # use erato_core::geometry::{Point, Rect, Size};
/// let rect = Rect::new(Point::new(10.0, 10.0), Size::new(20.0, 5.0));
/// assert_eq!(rect.max_x(), 30.0);
/// assert_eq!(rect.max_y(), 15.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    origin: Point,
    size: Size,
}

impl Rect {
    /// Creates a new rectangle from its top-left corner and size
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Returns the size
    pub fn size(self) -> Size {
        self.size
    }

    pub fn min_x(self) -> f32 {
        self.origin.x
    }

    pub fn min_y(self) -> f32 {
        self.origin.y
    }

    pub fn max_x(self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn max_y(self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Returns the overlapping region of two rectangles, if any.
    pub fn intersection(self, other: Rect) -> Option<Rect> {
        let min_x = self.min_x().max(other.min_x());
        let min_y = self.min_y().max(other.min_y());
        let max_x = self.max_x().min(other.max_x());
        let max_y = self.max_y().min(other.max_y());

        if max_x <= min_x || max_y <= min_y {
            return None;
        }

        Some(Rect::new(
            Point::new(min_x, min_y),
            Size::new(max_x - min_x, max_y - min_y),
        ))
    }
}
