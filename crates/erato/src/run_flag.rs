//! The shared "an animation is in progress" flag.
//!
//! One [`RunFlag`] is shared by every engine an orchestrator creates, so at
//! most one animation is started at a time. The whole system is
//! single-threaded, hence `Rc<Cell<bool>>` rather than an atomic.

use std::{cell::Cell, rc::Rc};

/// Handle to a shared running flag. Clones observe and update the same flag.
///
/// # Examples
///
/// ```
/// # use erato::run_flag::RunFlag;
/// let flag = RunFlag::new();
/// let shared = flag.clone();
///
/// {
///     let _guard = flag.acquire();
///     assert!(shared.is_running());
/// }
/// assert!(!shared.is_running());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RunFlag {
    running: Rc<Cell<bool>>,
}

impl RunFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn begin_run(&self) {
        self.running.set(true);
    }

    pub fn end_run(&self) {
        self.running.set(false);
    }

    /// Set the flag and return a guard that clears it when dropped.
    ///
    /// The flag is released on every exit path of the guard's scope,
    /// including early returns and panics.
    #[must_use = "the flag is cleared as soon as the guard is dropped"]
    pub fn acquire(&self) -> RunGuard {
        self.begin_run();
        RunGuard { flag: self.clone() }
    }
}

/// Clears its [`RunFlag`] on drop.
#[derive(Debug)]
pub struct RunGuard {
    flag: RunFlag,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.flag.end_run();
    }
}
