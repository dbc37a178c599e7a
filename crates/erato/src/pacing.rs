//! Pacing between visual steps.
//!
//! The engine asks a [`Pacer`] to wait before each emission instead of
//! sleeping itself, so tests and headless drivers can skip the delay.

use std::{thread, time::Duration};

/// Suspends the driver between two visual steps.
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Blocks the calling thread for the requested delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Pacer for NoDelay {
    fn pause(&mut self, _delay: Duration) {}
}
