//! The number grid the sieve runs over.
//!
//! This module provides the Matrix Builder ([`build_matrix`]), the immutable
//! [`Grid`] it produces, and the mutable [`CellStates`] copy the engine uses
//! to remember which composites have already been marked.
//!
//! # Shape
//!
//! For a bound `N` the grid is as close to square as possible:
//!
//! ```text
//! rows    = ceil(sqrt(N))
//! columns = ceil(N / rows)
//! ```
//!
//! Values `2..=N` are placed row-major. The last row may be shorter than
//! `columns`, and a row that would be empty is never appended, so the grid
//! can have fewer than `rows` rows.
//!
//! # Example
//!
//! ```
//! # use erato_core::grid::build_matrix;
//! let grid = build_matrix(10);
//! assert_eq!(grid.rows(), &[vec![2, 3, 4], vec![5, 6, 7], vec![8, 9, 10]]);
//! ```

/// The row and column of a cell inside a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// The `rows x columns` envelope computed for a bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixShape {
    rows: usize,
    columns: usize,
}

impl MatrixShape {
    /// Compute the near-square envelope for `bound`.
    ///
    /// Uses exact integer arithmetic, so perfect squares never round up.
    ///
    /// # Examples
    ///
    /// ```
    /// # use erato_core::grid::MatrixShape;
    /// let shape = MatrixShape::for_bound(100);
    /// assert_eq!((shape.rows(), shape.columns()), (10, 10));
    ///
    /// let shape = MatrixShape::for_bound(10);
    /// assert_eq!((shape.rows(), shape.columns()), (4, 3));
    /// ```
    pub fn for_bound(bound: u32) -> Self {
        let bound = bound as usize;
        if bound == 0 {
            return Self {
                rows: 0,
                columns: 0,
            };
        }

        let rows = ceil_sqrt(bound);
        Self {
            rows,
            columns: bound.div_ceil(rows),
        }
    }

    pub fn rows(self) -> usize {
        self.rows
    }

    pub fn columns(self) -> usize {
        self.columns
    }
}

/// Smallest `r` with `r * r >= n`.
fn ceil_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while root * root < n {
        root += 1;
    }
    root
}

/// Build the row-major grid of every integer from 2 up to `bound`.
///
/// Bounds below 2 produce an empty grid.
pub fn build_matrix(bound: u32) -> Grid {
    let shape = MatrixShape::for_bound(bound);
    let mut rows = Vec::with_capacity(shape.rows());
    let mut next = 2u32;

    for _ in 0..shape.rows() {
        let mut row = Vec::with_capacity(shape.columns());
        for _ in 0..shape.columns() {
            if next <= bound {
                row.push(next);
                next += 1;
            }
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }

    Grid { rows }
}

/// An immutable row-major arrangement of the integers being sieved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<u32>>,
}

impl Grid {
    /// Wrap existing rows as a grid.
    ///
    /// No shape is enforced; [`build_matrix`] is the usual constructor.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the grid, taken from the first row.
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, position: CellPosition) -> Option<u32> {
        self.rows.get(position.row)?.get(position.col).copied()
    }

    /// Iterate over every cell in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (CellPosition, u32)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, values)| {
            values
                .iter()
                .enumerate()
                .map(move |(col, &value)| (CellPosition::new(row, col), value))
        })
    }

    /// Flatten the grid row-major.
    pub fn values(&self) -> Vec<u32> {
        self.rows.iter().flatten().copied().collect()
    }

    /// Locate `value` by scanning rows, then columns.
    ///
    /// Returns `None` when the value is not in the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// # use erato_core::grid::{CellPosition, build_matrix};
    /// let grid = build_matrix(10);
    /// assert_eq!(grid.find_position(9), Some(CellPosition::new(2, 1)));
    /// assert_eq!(grid.find_position(11), None);
    /// ```
    pub fn find_position(&self, value: u32) -> Option<CellPosition> {
        self.rows.iter().enumerate().find_map(|(row, values)| {
            values
                .iter()
                .position(|&candidate| candidate == value)
                .map(|col| CellPosition::new(row, col))
        })
    }
}

/// State of a single cell during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Still holds its original value.
    Pending(u32),
    /// Already drawn as a composite.
    Processed,
}

/// The engine's private, mutable copy of a [`Grid`].
///
/// Mutating it never touches the grid it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellStates {
    cells: Vec<Vec<CellState>>,
}

impl CellStates {
    pub fn from_grid(grid: &Grid) -> Self {
        let cells = grid
            .rows()
            .iter()
            .map(|row| row.iter().map(|&value| CellState::Pending(value)).collect())
            .collect();
        Self { cells }
    }

    pub fn get(&self, position: CellPosition) -> Option<CellState> {
        self.cells.get(position.row)?.get(position.col).copied()
    }

    /// Out-of-range positions count as not processed.
    pub fn is_processed(&self, position: CellPosition) -> bool {
        matches!(self.get(position), Some(CellState::Processed))
    }

    /// Replace the cell with the processed sentinel. Out-of-range positions are ignored.
    pub fn mark_processed(&mut self, position: CellPosition) {
        if let Some(cell) = self
            .cells
            .get_mut(position.row)
            .and_then(|row| row.get_mut(position.col))
        {
            *cell = CellState::Processed;
        }
    }

    /// Number of cells carrying the processed sentinel.
    pub fn processed_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| matches!(cell, CellState::Processed))
            .count()
    }
}
