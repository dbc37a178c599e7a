//! An in-memory [`Surface`] that records every drawing command.

use log::trace;

use crate::{
    color::Color,
    geometry::{Point, Rect, Size},
    surface::{Surface, SurfaceError, TextStyle},
};

/// Average glyph advance relative to the font size, used for measurement.
const GLYPH_ADVANCE: f32 = 0.6;

/// A single command received by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize(Size),
    FillRect { rect: Rect, color: Color },
    FillText {
        text: String,
        baseline: Point,
        style: TextStyle,
    },
    Clear,
}

/// Surface that keeps a log of what was drawn instead of drawing it.
///
/// It can be told to start failing after a number of drawing operations,
/// which makes it possible to exercise the fault path of a run.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    size: Size,
    commands: Vec<DrawCommand>,
    fail_after: Option<usize>,
    draw_count: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every fill after the first `draws` fills fail with [`SurfaceError::Unavailable`].
    pub fn failing_after(mut self, draws: usize) -> Self {
        self.fail_after = Some(draws);
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// All rectangles filled so far, in order.
    pub fn filled_rects(&self) -> impl Iterator<Item = (&Rect, &Color)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillRect { rect, color } => Some((rect, color)),
            _ => None,
        })
    }

    /// All labels drawn so far, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    fn count_draw(&mut self) -> Result<(), SurfaceError> {
        if self.fail_after.is_some_and(|limit| self.draw_count >= limit) {
            return Err(SurfaceError::Unavailable(format!(
                "recording surface stopped after {} draws",
                self.draw_count
            )));
        }
        self.draw_count += 1;
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, size: Size) -> Result<(), SurfaceError> {
        trace!(width = size.width(), height = size.height(); "Recording resize");
        self.size = size;
        self.commands.push(DrawCommand::Resize(size));
        Ok(())
    }

    fn size(&self) -> Size {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: &Color) -> Result<(), SurfaceError> {
        self.count_draw()?;
        self.commands.push(DrawCommand::FillRect {
            rect,
            color: *color,
        });
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        baseline: Point,
        style: &TextStyle,
    ) -> Result<(), SurfaceError> {
        self.count_draw()?;
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            baseline,
            style: style.clone(),
        });
        Ok(())
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> f32 {
        text.chars().count() as f32 * style.font_size() * GLYPH_ADVANCE
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::Clear);
        Ok(())
    }
}
