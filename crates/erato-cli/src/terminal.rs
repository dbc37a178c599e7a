//! Terminal rendering surface and display metrics.
//!
//! One display unit is one terminal cell. The surface keeps a shadow copy of
//! the background color under every cell so that labels printed on top of a
//! filled rectangle keep its fill.

use std::io::Write;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use log::debug;

use erato::{
    color::Color,
    geometry::{Point, Rect, Size},
    surface::{DisplayMetrics, Surface, SurfaceError, TextStyle},
};

/// Width assumed when the terminal size cannot be queried.
pub const FALLBACK_WIDTH: u32 = 80;

/// Height assumed when the terminal size cannot be queried.
pub const FALLBACK_HEIGHT: u16 = 24;

/// Rows kept free below the canvas for the prompt and the status line.
pub const RESERVED_ROWS: u32 = 2;

/// Reads the available room from the controlling terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalMetrics;

impl TerminalMetrics {
    /// Bottom row of the terminal, where notices are shown during a run.
    pub fn status_row(&self) -> u16 {
        match terminal::size() {
            Ok((_, rows)) => rows.saturating_sub(1),
            Err(_) => FALLBACK_HEIGHT - 1,
        }
    }
}

impl DisplayMetrics for TerminalMetrics {
    fn available_width(&self) -> u32 {
        match terminal::size() {
            Ok((columns, _)) => u32::from(columns),
            Err(err) => {
                debug!(err:%, fallback = FALLBACK_WIDTH; "Terminal size unavailable");
                FALLBACK_WIDTH
            }
        }
    }

    /// Terminal rows minus the reserved ones. `None` without a terminal,
    /// where the output scrolls and height does not matter.
    fn available_height(&self) -> Option<u32> {
        terminal::size()
            .ok()
            .map(|(_, rows)| u32::from(rows).saturating_sub(RESERVED_ROWS))
    }
}

fn to_term_color(color: &Color) -> TermColor {
    let (r, g, b) = color.to_rgb8();
    TermColor::Rgb { r, g, b }
}

/// Number of whole terminal cells needed to cover `extent` units.
fn cells_covering(extent: f32) -> u16 {
    extent.max(0.0).ceil().min(f32::from(u16::MAX)) as u16
}

/// A [`Surface`] drawing with ANSI escape sequences into any writer.
#[derive(Debug)]
pub struct TerminalSurface<W: Write> {
    out: W,
    size: Size,
    columns: u16,
    rows: u16,
    backgrounds: Vec<Option<TermColor>>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            size: Size::default(),
            columns: 0,
            rows: 0,
            backgrounds: Vec::new(),
        }
    }

    /// Background color currently under the terminal cell at `(column, row)`.
    pub fn background_at(&self, column: u16, row: u16) -> Option<TermColor> {
        self.index(column, row)
            .and_then(|index| self.backgrounds[index])
    }

    /// Number of terminal rows the canvas occupies.
    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn index(&self, column: u16, row: u16) -> Option<usize> {
        (column < self.columns && row < self.rows)
            .then(|| usize::from(row) * usize::from(self.columns) + usize::from(column))
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn resize(&mut self, size: Size) -> Result<(), SurfaceError> {
        self.size = size;
        self.columns = cells_covering(size.width());
        self.rows = cells_covering(size.height());
        self.backgrounds = vec![None; usize::from(self.columns) * usize::from(self.rows)];

        if !size.is_empty() {
            queue!(self.out, ResetColor, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn size(&self) -> Size {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: &Color) -> Result<(), SurfaceError> {
        if rect.size().is_empty() {
            return Ok(());
        }

        let canvas = Rect::new(Point::default(), self.size);
        let visible = rect
            .intersection(canvas)
            .ok_or(SurfaceError::OutOfBounds {
                x: rect.min_x(),
                y: rect.min_y(),
            })?;

        let first_column = visible.min_x().floor() as u16;
        let last_column = cells_covering(visible.max_x()).min(self.columns);
        let first_row = visible.min_y().floor() as u16;
        let last_row = cells_covering(visible.max_y()).min(self.rows);

        let background = to_term_color(color);
        let blank = " ".repeat(usize::from(last_column.saturating_sub(first_column)));

        for row in first_row..last_row {
            queue!(
                self.out,
                MoveTo(first_column, row),
                SetBackgroundColor(background),
                Print(&blank)
            )?;
            for column in first_column..last_column {
                if let Some(index) = self.index(column, row) {
                    self.backgrounds[index] = Some(background);
                }
            }
        }

        queue!(self.out, ResetColor)?;
        self.out.flush()?;
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        baseline: Point,
        style: &TextStyle,
    ) -> Result<(), SurfaceError> {
        // Glyphs sit on the row just above the baseline
        let row = baseline.y().floor() as i64 - 1;
        if row < 0 || row >= i64::from(self.rows) {
            return Ok(());
        }
        let row = row as u16;

        let foreground = to_term_color(style.color());
        let start = baseline.x().floor() as i64;

        for (offset, glyph) in text.chars().enumerate() {
            let column = start + offset as i64;
            if column < 0 || column >= i64::from(self.columns) {
                continue;
            }
            let column = column as u16;

            queue!(self.out, MoveTo(column, row), ResetColor)?;
            if let Some(background) = self.background_at(column, row) {
                queue!(self.out, SetBackgroundColor(background))?;
            }
            queue!(self.out, SetForegroundColor(foreground), Print(glyph))?;
        }

        queue!(self.out, ResetColor)?;
        self.out.flush()?;
        Ok(())
    }

    fn measure_text(&self, text: &str, _style: &TextStyle) -> f32 {
        text.chars().count() as f32
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        let blank = " ".repeat(usize::from(self.columns));
        for row in 0..self.rows {
            queue!(self.out, MoveTo(0, row), ResetColor, Print(&blank))?;
        }
        self.backgrounds.fill(None);
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(width: f32, height: f32) -> TerminalSurface<Vec<u8>> {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.resize(Size::new(width, height)).unwrap();
        surface
    }

    fn blue() -> Color {
        Color::new("blue").unwrap()
    }

    #[test]
    fn test_resize_covers_fractional_extent() {
        let surface = surface(10.5, 3.0);
        assert_eq!(surface.columns, 11);
        assert_eq!(surface.rows(), 3);
        assert_eq!(surface.size(), Size::new(10.5, 3.0));
    }

    #[test]
    fn test_fill_rect_updates_shadow_buffer() {
        let mut surface = surface(10.0, 10.0);
        let rect = Rect::new(Point::new(2.0, 3.0), Size::new(3.0, 2.0));

        surface.fill_rect(rect, &blue()).unwrap();

        let expected = Some(TermColor::Rgb { r: 0, g: 0, b: 255 });
        assert_eq!(surface.background_at(2, 3), expected);
        assert_eq!(surface.background_at(4, 4), expected);
        assert_eq!(surface.background_at(5, 3), None);
        assert_eq!(surface.background_at(2, 5), None);
    }

    #[test]
    fn test_fill_rect_clips_partial_overlap() {
        let mut surface = surface(4.0, 4.0);
        let rect = Rect::new(Point::new(2.0, 2.0), Size::new(5.0, 5.0));

        surface.fill_rect(rect, &blue()).unwrap();

        assert!(surface.background_at(3, 3).is_some());
        assert!(surface.background_at(4, 4).is_none());
    }

    #[test]
    fn test_fill_rect_outside_is_error() {
        let mut surface = surface(4.0, 4.0);
        let rect = Rect::new(Point::new(10.0, 10.0), Size::new(2.0, 2.0));

        let err = surface.fill_rect(rect, &blue()).unwrap_err();
        assert!(matches!(err, SurfaceError::OutOfBounds { .. }));
    }

    #[test]
    fn test_fill_rect_empty_is_noop() {
        let mut surface = surface(4.0, 4.0);
        let rect = Rect::new(Point::new(10.0, 10.0), Size::new(0.0, 0.0));
        assert!(surface.fill_rect(rect, &blue()).is_ok());
    }

    #[test]
    fn test_fill_text_writes_glyphs() {
        let mut surface = surface(7.0, 7.0);
        let style = TextStyle::new(4.0, Color::new("white").unwrap());

        surface
            .fill_text("97", Point::new(2.5, 5.5), &style)
            .unwrap();

        // Each glyph follows its foreground color sequence
        let output = String::from_utf8(surface.into_inner()).unwrap();
        assert!(output.contains("255;255;255m9"));
        assert!(output.contains("255;255;255m7"));
    }

    #[test]
    fn test_fill_text_outside_rows_is_skipped() {
        let mut surface = surface(7.0, 7.0);
        let style = TextStyle::new(4.0, Color::new("white").unwrap());
        let before = surface.out.len();

        surface.fill_text("5", Point::new(1.0, 0.5), &style).unwrap();
        surface.fill_text("5", Point::new(1.0, 40.0), &style).unwrap();

        assert_eq!(surface.out.len(), before);
    }

    #[test]
    fn test_measure_text_counts_chars() {
        let surface = surface(1.0, 1.0);
        let style = TextStyle::new(25.0, Color::default());
        assert_eq!(surface.measure_text("4999", &style), 4.0);
    }

    #[test]
    fn test_clear_resets_shadow_buffer() {
        let mut surface = surface(4.0, 4.0);
        let rect = Rect::new(Point::new(0.0, 0.0), Size::new(4.0, 4.0));
        surface.fill_rect(rect, &blue()).unwrap();

        surface.clear().unwrap();

        assert!(surface.background_at(0, 0).is_none());
        assert!(surface.background_at(3, 3).is_none());
    }
}
