//! Error types for Erato operations.
//!
//! This module provides the main error type [`SieveError`]. Only caller-side
//! failures reach it: a run never returns an error, faults during traversal
//! are logged and end the run early instead.

use std::io;

use thiserror::Error;

use erato_core::surface::SurfaceError;

use crate::bound::BoundError;

/// The main error type for Erato operations.
#[derive(Debug, Error)]
pub enum SieveError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    InvalidBound(#[from] BoundError),

    #[error("Already running, please wait!")]
    AlreadyRunning,

    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("Configuration error: {0}")]
    Config(String),
}
