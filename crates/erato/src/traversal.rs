//! The sieve traversal as a sequence of visual steps.
//!
//! [`SieveTraversal`] walks the grid row-major. Every value is classified;
//! composites met by the scan are skipped without a step. A prime yields a
//! [`Mark::Prime`] step and then sweeps its multiples up to the bound,
//! yielding a [`Mark::Composite`] step for each multiple that has not been
//! marked by an earlier sweep.
//!
//! The iterator neither sleeps nor draws. Whoever drives it decides how the
//! steps are paced and rendered.
//!
//! ```
//! # use erato::traversal::{Mark, SieveTraversal};
//! # use erato_core::grid::{CellStates, build_matrix};
//! let grid = build_matrix(10);
//! let mut cells = CellStates::from_grid(&grid);
//!
//! let values: Vec<(Mark, u32)> = SieveTraversal::new(&grid, &mut cells, 10)
//!     .map(|step| (step.mark, step.value))
//!     .collect();
//!
//! assert_eq!(values[..3], [(Mark::Prime, 2), (Mark::Composite, 4), (Mark::Composite, 6)]);
//! ```

use log::trace;

use erato_core::{
    grid::{CellPosition, CellStates, Grid},
    primality::classify,
};

/// What a step shows a cell to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Prime,
    Composite,
}

/// One visual emission of the sieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SieveStep {
    pub mark: Mark,
    pub value: u32,
    pub position: CellPosition,
}

/// Running tally of emitted steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkCounts {
    pub primes: usize,
    pub composites: usize,
}

impl MarkCounts {
    pub fn record(&mut self, mark: Mark) {
        match mark {
            Mark::Prime => self.primes += 1,
            Mark::Composite => self.composites += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.primes + self.composites
    }
}

/// Multiples of `prime` still to visit, starting at `next`.
#[derive(Debug, Clone, Copy)]
struct Sweep {
    prime: u32,
    next: u64,
}

/// Iterator over the visual steps of one sieve run.
///
/// Marking a composite flips its slot in the borrowed [`CellStates`] to the
/// processed sentinel, so each value is emitted at most once.
#[derive(Debug)]
pub struct SieveTraversal<'a> {
    grid: &'a Grid,
    cells: &'a mut CellStates,
    bound: u32,
    cursor: CellPosition,
    sweep: Option<Sweep>,
}

impl<'a> SieveTraversal<'a> {
    pub fn new(grid: &'a Grid, cells: &'a mut CellStates, bound: u32) -> Self {
        Self {
            grid,
            cells,
            bound,
            cursor: CellPosition::new(0, 0),
            sweep: None,
        }
    }

    /// Next cell of the row-major scan.
    fn advance_scan(&mut self) -> Option<(CellPosition, u32)> {
        while let Some(row) = self.grid.rows().get(self.cursor.row) {
            if let Some(&value) = row.get(self.cursor.col) {
                let position = self.cursor;
                self.cursor.col += 1;
                return Some((position, value));
            }
            self.cursor = CellPosition::new(self.cursor.row + 1, 0);
        }
        None
    }

    /// Next unmarked multiple of the active sweep, if any.
    fn advance_sweep(&mut self) -> Option<SieveStep> {
        let sweep = self.sweep.as_mut()?;

        while sweep.next <= u64::from(self.bound) {
            // `next` never exceeds `bound`, which is a u32
            let multiple = sweep.next as u32;
            sweep.next += u64::from(sweep.prime);

            let Some(position) = self.grid.find_position(multiple) else {
                trace!(multiple; "Multiple not present in grid");
                continue;
            };
            if self.cells.is_processed(position) {
                continue;
            }

            self.cells.mark_processed(position);
            return Some(SieveStep {
                mark: Mark::Composite,
                value: multiple,
                position,
            });
        }

        self.sweep = None;
        None
    }
}

impl Iterator for SieveTraversal<'_> {
    type Item = SieveStep;

    fn next(&mut self) -> Option<SieveStep> {
        if let Some(step) = self.advance_sweep() {
            return Some(step);
        }

        loop {
            let (position, value) = self.advance_scan()?;
            if !classify(value).is_prime() {
                continue;
            }

            self.sweep = Some(Sweep {
                prime: value,
                next: u64::from(value) * 2,
            });
            return Some(SieveStep {
                mark: Mark::Prime,
                value,
                position,
            });
        }
    }
}
