//! The sieve engine: lays out the grid and animates the sieve on a surface.
//!
//! An engine is built once per bound with an [`EngineBuilder`]. Building
//! computes the [`GridLayout`], takes a private copy of the grid as cell
//! state, and sizes the surface to the canvas. [`SieveEngine::run`] then
//! drives a [`SieveTraversal`], pausing before and drawing each step.

use std::time::Duration;

use log::{debug, error, info, trace};

use erato_core::{
    color::Color,
    geometry::Size,
    grid::{CellStates, Grid},
    surface::{DisplayMetrics, Surface, SurfaceError, TextStyle},
};

use crate::{
    SieveError,
    config::{AppConfig, DEFAULT_MAX_CELL_SIZE, DEFAULT_STEP_DELAY},
    layout::GridLayout,
    pacing::Pacer,
    run_flag::RunFlag,
    traversal::{Mark, MarkCounts, SieveStep, SieveTraversal},
};

/// Fill and label colors used while animating.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    prime: Color,
    composite: Color,
    text: Color,
}

impl Palette {
    pub fn new(prime: Color, composite: Color, text: Color) -> Self {
        Self {
            prime,
            composite,
            text,
        }
    }

    pub fn prime(&self) -> &Color {
        &self.prime
    }

    /// Also used for any value that is not a prime candidate.
    pub fn composite(&self) -> &Color {
        &self.composite
    }

    pub fn text(&self) -> &Color {
        &self.text
    }

    /// Cell fill for a step.
    pub fn fill_for(&self, mark: Mark) -> &Color {
        match mark {
            Mark::Prime => &self.prime,
            Mark::Composite => &self.composite,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(
            Color::new("blue").expect("'blue' is a valid CSS color"),
            Color::new("red").expect("'red' is a valid CSS color"),
            Color::new("white").expect("'white' is a valid CSS color"),
        )
    }
}

/// What a finished run drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub primes: usize,
    pub composites: usize,
    /// `false` when a fault ended the traversal early.
    pub completed: bool,
}

impl From<MarkCounts> for RunSummary {
    fn from(counts: MarkCounts) -> Self {
        Self {
            primes: counts.primes,
            composites: counts.composites,
            completed: false,
        }
    }
}

/// Builder for [`SieveEngine`].
///
/// # Examples
///
/// ```
/// # use std::time::Duration;
/// # use erato::{EngineBuilder, pacing::NoDelay};
/// # use erato_core::{grid::build_matrix, surface::{FixedDisplay, RecordingSurface}};
/// let mut engine = EngineBuilder::new()
///     .with_step_delay(Duration::ZERO)
///     .build(build_matrix(10), 10, &FixedDisplay(800), RecordingSurface::new())
///     .expect("recording surface never fails to resize");
///
/// let summary = engine.run(&mut NoDelay);
/// assert_eq!((summary.primes, summary.composites), (4, 5));
/// assert!(summary.completed);
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    max_cell_size: u32,
    step_delay: Duration,
    palette: Palette,
    display_width: Option<u32>,
    display_height: Option<u32>,
    run_flag: RunFlag,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            max_cell_size: DEFAULT_MAX_CELL_SIZE,
            step_delay: DEFAULT_STEP_DELAY,
            palette: Palette::default(),
            display_width: None,
            display_height: None,
            run_flag: RunFlag::new(),
        }
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-filled from an [`AppConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::Config`] if a configured color is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, SieveError> {
        let mut builder = Self::new()
            .with_max_cell_size(config.layout().max_cell_size())
            .with_step_delay(config.animation().step_delay())
            .with_palette(config.style().palette()?);
        builder.display_width = config.layout().display_width();
        builder.display_height = config.layout().display_height();
        Ok(builder)
    }

    pub fn with_max_cell_size(mut self, max_cell_size: u32) -> Self {
        self.max_cell_size = max_cell_size;
        self
    }

    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Use a fixed display width instead of asking the display metrics.
    pub fn with_display_width(mut self, width: u32) -> Self {
        self.display_width = Some(width);
        self
    }

    /// Fit the canvas into a fixed height instead of asking the display metrics.
    pub fn with_display_height(mut self, height: u32) -> Self {
        self.display_height = Some(height);
        self
    }

    /// Share `run_flag` with every engine this builder creates.
    pub fn with_run_flag(mut self, run_flag: RunFlag) -> Self {
        self.run_flag = run_flag;
        self
    }

    pub fn run_flag(&self) -> &RunFlag {
        &self.run_flag
    }

    /// Lay out `grid` for `bound` and prepare `surface` for drawing.
    ///
    /// When a display height is known the cell size is further capped so the
    /// canvas fits it.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::Surface`] if the surface cannot be resized to
    /// the canvas.
    pub fn build<S: Surface>(
        &self,
        grid: Grid,
        bound: u32,
        display: &dyn DisplayMetrics,
        mut surface: S,
    ) -> Result<SieveEngine<S>, SieveError> {
        let available_width = self
            .display_width
            .unwrap_or_else(|| display.available_width());
        let available_height = self
            .display_height
            .or_else(|| display.available_height());
        let max_cell_size = match available_height {
            Some(height) => self
                .max_cell_size
                .min(GridLayout::max_cell_for_height(grid.row_count(), height)),
            None => self.max_cell_size,
        };
        let layout = GridLayout::compute(
            grid.row_count(),
            grid.column_count(),
            available_width,
            max_cell_size,
        );

        debug!(
            bound,
            rows = layout.rows(),
            columns = layout.columns(),
            cell_size = layout.cell_size(),
            padding = layout.padding(),
            available_width,
            available_height:?;
            "Grid layout computed"
        );

        surface.resize(layout.canvas_size())?;
        let cells = CellStates::from_grid(&grid);

        Ok(SieveEngine {
            grid,
            bound,
            layout,
            cells,
            palette: self.palette.clone(),
            step_delay: self.step_delay,
            run_flag: self.run_flag.clone(),
            surface,
        })
    }
}

/// Animates the sieve for one bound on one surface.
#[derive(Debug)]
pub struct SieveEngine<S> {
    grid: Grid,
    bound: u32,
    layout: GridLayout,
    cells: CellStates,
    palette: Palette,
    step_delay: Duration,
    run_flag: RunFlag,
    surface: S,
}

impl<S: Surface> SieveEngine<S> {
    /// Run the sieve animation to completion.
    ///
    /// Sets the shared run flag for the duration of the call. Every step is
    /// preceded by a pause of the configured delay. A surface fault is
    /// logged and ends the run early; it is never returned to the caller,
    /// and the run flag is released either way.
    pub fn run(&mut self, pacer: &mut dyn Pacer) -> RunSummary {
        let _guard = self.run_flag.acquire();
        info!(bound = self.bound, cells = self.grid.len(); "Starting sieve run");

        // Each run starts from a fresh copy of the grid
        self.cells = CellStates::from_grid(&self.grid);

        let mut counts = MarkCounts::default();
        let result = self.animate(pacer, &mut counts);

        let mut summary = RunSummary::from(counts);
        match result {
            Ok(()) => {
                summary.completed = true;
                info!(
                    primes = summary.primes,
                    composites = summary.composites;
                    "Sieve run finished"
                );
            }
            Err(err) => {
                error!(
                    err:%,
                    steps_drawn = counts.total();
                    "Sieve run aborted"
                );
            }
        }

        summary
    }

    fn animate(
        &mut self,
        pacer: &mut dyn Pacer,
        counts: &mut MarkCounts,
    ) -> Result<(), SurfaceError> {
        let text_style = TextStyle::new(self.layout.font_size(), *self.palette.text());

        for step in SieveTraversal::new(&self.grid, &mut self.cells, self.bound) {
            pacer.pause(self.step_delay);
            trace!(value = step.value, mark:? = step.mark; "Drawing step");
            draw_step(
                &mut self.surface,
                &self.layout,
                &self.palette,
                &text_style,
                &step,
            )?;
            counts.record(step.mark);
        }

        Ok(())
    }

    /// Whether any engine sharing this engine's run flag is animating.
    pub fn is_running(&self) -> bool {
        self.run_flag.is_running()
    }

    /// Clear the surface and shrink it to nothing.
    ///
    /// The run flag is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::Surface`] if the surface refuses to clear or resize.
    pub fn reset(&mut self) -> Result<(), SieveError> {
        debug!(bound = self.bound; "Resetting surface");
        self.surface.clear()?;
        self.surface.resize(Size::default())?;
        Ok(())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn bound(&self) -> u32 {
        self.bound
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn cells(&self) -> &CellStates {
        &self.cells
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

/// Fill the step's cell, then center its number on top.
fn draw_step<S: Surface>(
    surface: &mut S,
    layout: &GridLayout,
    palette: &Palette,
    text_style: &TextStyle,
    step: &SieveStep,
) -> Result<(), SurfaceError> {
    surface.fill_rect(layout.cell_rect(step.position), palette.fill_for(step.mark))?;

    let label = step.value.to_string();
    let width = surface.measure_text(&label, text_style);
    surface.fill_text(
        &label,
        layout.label_baseline(step.position, width),
        text_style,
    )
}
