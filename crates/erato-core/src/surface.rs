//! Rendering and display collaborators.
//!
//! The sieve engine never draws pixels itself. It talks to a [`Surface`]
//! sized to the canvas it computes, and reads the available room once from
//! a [`DisplayMetrics`] implementation.
//!
//! # Overview
//!
//! - [`Surface`]: rectangle fill, text fill, text measurement, clear and resize
//! - [`TextStyle`]: font size and color for a label
//! - [`DisplayMetrics`]: how much room the display offers
//! - [`RecordingSurface`]: an in-memory surface that keeps every command
//!
//! # Example
//!
//! ```
//! # use erato_core::color::Color;
//! # use erato_core::geometry::{Point, Rect, Size};
//! # use erato_core::surface::{DrawCommand, RecordingSurface, Surface};
//! let mut surface = RecordingSurface::new();
//! surface.resize(Size::new(100.0, 100.0)).unwrap();
//!
//! let cell = Rect::new(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
//! surface.fill_rect(cell, &Color::new("blue").unwrap()).unwrap();
//!
//! assert_eq!(surface.commands().len(), 2);
//! assert!(matches!(surface.commands()[1], DrawCommand::FillRect { .. }));
//! ```

use std::io;

use thiserror::Error;

use crate::{
    color::Color,
    geometry::{Point, Rect, Size},
};

mod recording;

pub use recording::{DrawCommand, RecordingSurface};

/// Errors raised by a drawing surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Surface unavailable: {0}")]
    Unavailable(String),

    #[error("Drawing outside the surface at ({x}, {y})")]
    OutOfBounds { x: f32, y: f32 },
}

/// Font size and color used to draw a label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    font_size: f32,
    color: Color,
}

impl TextStyle {
    pub fn new(font_size: f32, color: Color) -> Self {
        Self { font_size, color }
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn color(&self) -> &Color {
        &self.color
    }
}

/// A drawing surface the engine paints cells and labels onto.
///
/// Coordinates are display units with the origin at the top-left corner.
pub trait Surface {
    /// Resize the surface. Resizing discards everything drawn so far.
    fn resize(&mut self, size: Size) -> Result<(), SurfaceError>;

    /// Current surface extent.
    fn size(&self) -> Size;

    /// Fill `rect` with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: &Color) -> Result<(), SurfaceError>;

    /// Draw `text` with its baseline starting at `baseline`.
    fn fill_text(
        &mut self,
        text: &str,
        baseline: Point,
        style: &TextStyle,
    ) -> Result<(), SurfaceError>;

    /// Width `text` would occupy when drawn with `style`.
    fn measure_text(&self, text: &str, style: &TextStyle) -> f32;

    /// Erase everything drawn on the surface, keeping its size.
    fn clear(&mut self) -> Result<(), SurfaceError>;
}

/// Exposes the room available for the canvas.
pub trait DisplayMetrics {
    fn available_width(&self) -> u32;

    /// Vertical room, when the display has a hard limit on it.
    ///
    /// Displays that scroll report `None` and only the width constrains the
    /// cell size.
    fn available_height(&self) -> Option<u32> {
        None
    }
}

/// A display with a fixed, known width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDisplay(pub u32);

impl DisplayMetrics for FixedDisplay {
    fn available_width(&self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_display_has_no_height_limit() {
        let display = FixedDisplay(640);
        assert_eq!(display.available_width(), 640);
        assert_eq!(display.available_height(), None);
    }
}
