//! Erato - an animated Sieve of Eratosthenes.
//!
//! Numbers `2..=N` are laid out on a near-square grid. The engine scans the
//! grid, marks every prime it finds and sweeps that prime's multiples,
//! drawing each mark on a [`surface::Surface`] with a fixed pause in
//! between so the sieve can be watched as it runs.
//!
//! # Pipeline
//!
//! 1. [`bound::parse_bound`] validates user input.
//! 2. [`grid::build_matrix`] builds the grid.
//! 3. [`EngineBuilder::build`] lays it out and prepares the surface.
//! 4. [`SieveEngine::run`] animates the [`traversal::SieveTraversal`].
//!
//! [`Session`] wraps these steps behind the single-run-at-a-time contract.
//!
//! ```rust
//! use erato::{EngineBuilder, pacing::NoDelay};
//! use erato::grid::build_matrix;
//! use erato::surface::{FixedDisplay, RecordingSurface};
//!
//! let mut engine = EngineBuilder::new()
//!     .build(build_matrix(100), 100, &FixedDisplay(1280), RecordingSurface::new())
//!     .expect("recording surface never fails to resize");
//!
//! let summary = engine.run(&mut NoDelay);
//! assert_eq!(summary.primes, 25);
//! ```

pub mod bound;
pub mod config;
pub mod engine;
pub mod layout;
pub mod pacing;
pub mod run_flag;
pub mod traversal;

mod error;
mod session;

pub use erato_core::{color, geometry, grid, primality, surface};

pub use engine::{EngineBuilder, Palette, RunSummary, SieveEngine};
pub use error::SieveError;
pub use session::Session;
