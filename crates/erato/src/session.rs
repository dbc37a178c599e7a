//! Orchestration of successive sieve runs.
//!
//! A [`Session`] is the caller the engine expects: it validates what the
//! user typed, refuses to start while an animation is in progress, cleans
//! up the previous engine's surface and replaces it with a fresh engine.

use log::{info, warn};

use erato_core::{
    grid::build_matrix,
    surface::{DisplayMetrics, Surface},
};

use crate::{
    SieveError,
    bound::parse_bound,
    engine::{EngineBuilder, RunSummary, SieveEngine},
    pacing::Pacer,
    run_flag::RunFlag,
};

/// Owns the shared run flag and the most recent engine.
///
/// # Examples
///
/// ```
/// # use erato::{EngineBuilder, Session, SieveError, pacing::NoDelay};
/// # use erato_core::surface::{FixedDisplay, RecordingSurface};
/// let mut session = Session::new(EngineBuilder::new());
///
/// let summary = session
///     .submit("10", &FixedDisplay(800), RecordingSurface::new(), &mut NoDelay)
///     .unwrap();
/// assert_eq!(summary.primes, 4);
///
/// let err = session
///     .submit("3.5", &FixedDisplay(800), RecordingSurface::new(), &mut NoDelay)
///     .unwrap_err();
/// assert!(matches!(err, SieveError::InvalidBound(_)));
/// ```
#[derive(Debug)]
pub struct Session<S> {
    builder: EngineBuilder,
    run_flag: RunFlag,
    engine: Option<SieveEngine<S>>,
}

impl<S: Surface> Session<S> {
    /// Start a session whose engines share the builder's run flag.
    pub fn new(builder: EngineBuilder) -> Self {
        let run_flag = builder.run_flag().clone();
        Self {
            builder,
            run_flag,
            engine: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.run_flag.is_running()
    }

    pub fn run_flag(&self) -> &RunFlag {
        &self.run_flag
    }

    /// The engine created by the last accepted submission.
    pub fn engine(&self) -> Option<&SieveEngine<S>> {
        self.engine.as_ref()
    }

    /// Validate `input`, replace the current engine and animate the new bound.
    ///
    /// # Errors
    ///
    /// - [`SieveError::AlreadyRunning`] if an animation is in progress; nothing
    ///   is validated or replaced.
    /// - [`SieveError::InvalidBound`] if `input` is not an acceptable bound;
    ///   the run flag is not touched.
    /// - [`SieveError::Surface`] if the new surface cannot be prepared.
    ///
    /// Faults during the animation itself are not errors; they show up as an
    /// incomplete [`RunSummary`].
    pub fn submit(
        &mut self,
        input: &str,
        display: &dyn DisplayMetrics,
        surface: S,
        pacer: &mut dyn Pacer,
    ) -> Result<RunSummary, SieveError> {
        if self.run_flag.is_running() {
            info!("Rejected submission while a run is in progress");
            return Err(SieveError::AlreadyRunning);
        }

        let bound = parse_bound(input)?;

        if let Some(mut previous) = self.engine.take() {
            if let Err(err) = previous.reset() {
                warn!(err:%; "Failed to reset previous surface");
            }
        }

        let engine = self
            .builder
            .build(build_matrix(bound), bound, display, surface)?;
        let engine = self.engine.insert(engine);

        Ok(engine.run(pacer))
    }
}

#[cfg(test)]
mod tests {
    use erato_core::surface::{DrawCommand, FixedDisplay, RecordingSurface};

    use super::*;
    use crate::{bound::BoundError, pacing::NoDelay};

    fn submit(
        session: &mut Session<RecordingSurface>,
        input: &str,
    ) -> Result<RunSummary, SieveError> {
        session.submit(input, &FixedDisplay(1000), RecordingSurface::new(), &mut NoDelay)
    }

    #[test]
    fn test_accepted_submission_runs() {
        let mut session = Session::new(EngineBuilder::new());
        let summary = submit(&mut session, "100").unwrap();

        assert_eq!(summary.primes, 25);
        assert_eq!(summary.composites, 74);
        assert!(summary.completed);
        assert!(!session.is_running());
        assert_eq!(session.engine().map(|e| e.bound()), Some(100));
    }

    #[test]
    fn test_invalid_inputs_are_rejected_without_touching_flag() {
        let mut session = Session::new(EngineBuilder::new());

        for input in ["0", "1", "5001", "3.5", ""] {
            let err = submit(&mut session, input).unwrap_err();
            assert!(
                matches!(err, SieveError::InvalidBound(_)),
                "{input:?} gave {err:?}"
            );
            assert!(!session.is_running());
            assert!(session.engine().is_none());
        }
    }

    #[test]
    fn test_invalid_input_keeps_previous_engine() {
        let mut session = Session::new(EngineBuilder::new());
        submit(&mut session, "20").unwrap();

        let err = submit(&mut session, "abc").unwrap_err();
        assert!(matches!(
            err,
            SieveError::InvalidBound(BoundError::NotANumber(_))
        ));
        assert_eq!(session.engine().map(|e| e.bound()), Some(20));
    }

    #[test]
    fn test_busy_session_rejects_submission() {
        let mut session = Session::new(EngineBuilder::new());
        submit(&mut session, "10").unwrap();

        session.run_flag().begin_run();
        let err = submit(&mut session, "50").unwrap_err();

        assert!(matches!(err, SieveError::AlreadyRunning));
        assert!(session.is_running());
        assert_eq!(session.engine().map(|e| e.bound()), Some(10));

        session.run_flag().end_run();
        assert!(submit(&mut session, "50").is_ok());
    }

    #[test]
    fn test_replacement_uses_new_surface() {
        let mut session = Session::new(EngineBuilder::new());
        submit(&mut session, "10").unwrap();
        submit(&mut session, "2").unwrap();

        let engine = session.engine().unwrap();
        let commands = engine.surface().commands();
        assert!(matches!(commands[0], DrawCommand::Resize(_)));
        assert_eq!(engine.surface().texts().collect::<Vec<_>>(), vec!["2"]);
    }
}
