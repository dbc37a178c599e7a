//! Virtual coordinate space of the sieve grid.
//!
//! [`GridLayout`] is computed once per engine from the grid dimensions and
//! the room the display offers, and never changes afterwards.
//!
//! ```text
//!  pad ┌──────┐ pad ┌──────┐ pad
//!      │ cell │     │ cell │
//!      └──────┘     └──────┘
//!        pad          pad
//!      ┌──────┐     ┌──────┐
//!      │ cell │     │ cell │
//!      └──────┘     └──────┘
//! ```
//!
//! Cells are drawn at `index * (cell + padding)`; the canvas reserves one
//! extra padding strip on the far edge of each axis.

use erato_core::{
    geometry::{Point, Rect, Size},
    grid::CellPosition,
};

/// Cell size, padding and canvas extent for one grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    cell_size: u32,
    padding: u32,
    rows: usize,
    columns: usize,
}

impl GridLayout {
    /// Lay out a `rows x columns` grid on a display `available_width` units wide.
    ///
    /// The cell shrinks so that `columns + 1` cells fit across the display,
    /// and never grows beyond `max_cell_size`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use erato::layout::GridLayout;
    /// let layout = GridLayout::compute(10, 10, 1920, 50);
    /// assert_eq!(layout.cell_size(), 50);
    /// assert_eq!(layout.padding(), 5);
    /// assert_eq!(layout.canvas_size().width(), 555.0);
    ///
    /// let layout = GridLayout::compute(71, 71, 1920, 50);
    /// assert_eq!(layout.cell_size(), 26);
    /// assert_eq!(layout.padding(), 2);
    /// ```
    pub fn compute(rows: usize, columns: usize, available_width: u32, max_cell_size: u32) -> Self {
        let slots = u32::try_from(columns).unwrap_or(u32::MAX).saturating_add(1);
        let cell_size = (available_width / slots).min(max_cell_size);
        let padding = cell_size / 10;

        Self {
            cell_size,
            padding,
            rows,
            columns,
        }
    }

    /// Largest cell size whose canvas is at most `available_height` tall
    /// with `rows` rows.
    ///
    /// Never below 1, so a grid with more rows than the display can hold
    /// still overflows it.
    ///
    /// ```
    /// # use erato::layout::GridLayout;
    /// // 10 rows on a 22-row terminal: floor(220 / 111) = 1
    /// assert_eq!(GridLayout::max_cell_for_height(10, 22), 1);
    /// assert_eq!(GridLayout::max_cell_for_height(3, 1000), 294);
    /// ```
    pub fn max_cell_for_height(rows: usize, available_height: u32) -> u32 {
        // canvas <= cell * (11 * rows + 1) / 10 since padding <= cell / 10
        let rows = u64::try_from(rows).unwrap_or(u64::MAX);
        let cap = u64::from(available_height) * 10 / rows.saturating_mul(11).saturating_add(1);
        u32::try_from(cap).unwrap_or(u32::MAX).max(1)
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn padding(&self) -> u32 {
        self.padding
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Distance between the origins of two neighbouring cells.
    fn pitch(&self) -> f32 {
        (self.cell_size + self.padding) as f32
    }

    /// Full canvas extent: `(cell + padding) * count + padding` on each axis.
    pub fn canvas_size(&self) -> Size {
        let extent = |count: usize| self.pitch() * count as f32 + self.padding as f32;
        Size::new(extent(self.columns), extent(self.rows))
    }

    /// Top-left corner of the cell at `position`.
    pub fn cell_origin(&self, position: CellPosition) -> Point {
        Point::new(
            position.col as f32 * self.pitch(),
            position.row as f32 * self.pitch(),
        )
    }

    /// The rectangle covered by the cell at `position`.
    pub fn cell_rect(&self, position: CellPosition) -> Rect {
        let edge = self.cell_size as f32;
        Rect::new(self.cell_origin(position), Size::new(edge, edge))
    }

    /// Label font size: half the cell, rounded up.
    pub fn font_size(&self) -> f32 {
        self.cell_size.div_ceil(2) as f32
    }

    /// Vertical offset from the cell's middle to the label baseline.
    pub fn font_padding(&self) -> f32 {
        (self.font_size() / 2.0).ceil()
    }

    /// Baseline origin that centers a label `text_width` wide in the cell.
    pub fn label_baseline(&self, position: CellPosition, text_width: f32) -> Point {
        let origin = self.cell_origin(position);
        let half_cell = self.cell_size as f32 / 2.0;
        Point::new(
            origin.x() + half_cell - text_width / 2.0,
            origin.y() + half_cell + self.font_padding(),
        )
    }
}
