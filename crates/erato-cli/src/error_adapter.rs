//! Error adapter for converting SieveError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error
//! type and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use erato::{
    SieveError,
    bound::{MAX_BOUND, MIN_BOUND},
};

/// Adapter giving a [`SieveError`] a diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a SieveError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            SieveError::Io(_) => "erato::io",
            SieveError::InvalidBound(_) => "erato::bound",
            SieveError::AlreadyRunning => "erato::busy",
            SieveError::Surface(_) => "erato::surface",
            SieveError::Config(_) => "erato::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            SieveError::InvalidBound(_) => Some(Box::new(format!(
                "the bound must be a whole number from {MIN_BOUND} to {MAX_BOUND}"
            ))),
            SieveError::AlreadyRunning => {
                Some(Box::new("wait for the current animation to finish"))
            }
            _ => None,
        }
    }
}
