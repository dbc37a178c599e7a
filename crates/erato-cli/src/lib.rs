//! CLI logic for the Erato sieve animation.
//!
//! This module wires the terminal surface, configuration loading and the
//! interactive prompt around an [`erato::Session`].

pub mod error_adapter;
pub mod pacer;
pub mod terminal;

mod args;
mod config;

pub use args::Args;

use std::io::{self, BufRead, Write};

use crossterm::{cursor::MoveTo, queue, style::ResetColor};
use log::info;

use erato::{
    EngineBuilder, RunSummary, Session, SieveError,
    bound::{MAX_BOUND, MIN_BOUND},
    pacing::Pacer,
    surface::{DisplayMetrics, Surface},
};

use pacer::{LineEvents, TerminalEvents, TerminalPacer};
use terminal::{TerminalMetrics, TerminalSurface};

/// Run the Erato CLI application on the process's stdin and stdout.
///
/// # Errors
///
/// See [`run_with`].
pub fn run(args: &Args) -> Result<(), SieveError> {
    let stdin = io::stdin();
    run_with(args, stdin.lock(), io::stdout, TerminalEvents::default())
}

/// Run the Erato CLI application.
///
/// With a bound in `args` a single animation is drawn. Without one, bounds
/// are read line by line from `input` until end of input or `q`; rejected
/// bounds are reported and the prompt continues.
///
/// `output` is called whenever a fresh handle to the terminal is needed.
/// While a grid animates, lines arriving through `events` are answered with
/// the busy notice and discarded.
///
/// # Errors
///
/// Returns `SieveError` for:
/// - Configuration loading errors
/// - An invalid bound given on the command line
/// - Terminal I/O errors outside of an animation
pub fn run_with<R, W, F, E>(
    args: &Args,
    input: R,
    mut output: F,
    events: E,
) -> Result<(), SieveError>
where
    R: BufRead,
    W: Write,
    F: FnMut() -> W,
    E: LineEvents,
{
    let app_config = config::load_config(args.config.as_ref())?;
    let mut session = Session::new(EngineBuilder::from_config(&app_config)?);

    let mut pacer = TerminalPacer::new(
        events,
        output(),
        session.run_flag().clone(),
        TerminalMetrics.status_row(),
    );
    if args.no_delay {
        pacer = pacer.without_delay();
    }

    match &args.bound {
        Some(bound) => {
            info!(bound; "Animating a single bound");
            let surface = TerminalSurface::new(output());
            let summary = session.submit(bound, &TerminalMetrics, surface, &mut pacer)?;
            report(&session, summary, &mut output())
        }
        None => prompt(
            &mut session,
            input,
            &mut output,
            &TerminalMetrics,
            &mut pacer,
        ),
    }
}

/// Read bounds from `input` and animate each accepted one.
fn prompt<R, W, F>(
    session: &mut Session<TerminalSurface<W>>,
    input: R,
    output: &mut F,
    display: &dyn DisplayMetrics,
    pacer: &mut dyn Pacer,
) -> Result<(), SieveError>
where
    R: BufRead,
    W: Write,
    F: FnMut() -> W,
{
    let mut lines = input.lines();

    loop {
        let mut out = output();
        write!(out, "Enter a bound ({MIN_BOUND}-{MAX_BOUND}), or q to quit: ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            return Ok(());
        };
        let line = line?;
        if line.trim().eq_ignore_ascii_case("q") {
            return Ok(());
        }

        let surface = TerminalSurface::new(output());
        match session.submit(&line, display, surface, pacer) {
            Ok(summary) => report(session, summary, &mut output())?,
            Err(err @ (SieveError::InvalidBound(_) | SieveError::AlreadyRunning)) => {
                info!(err:%; "Submission rejected");
                writeln!(output(), "{err}")?;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Print a one-line summary below the canvas.
fn report<S, W>(session: &Session<S>, summary: RunSummary, out: &mut W) -> Result<(), SieveError>
where
    S: Surface,
    W: Write,
{
    let Some(engine) = session.engine() else {
        return Ok(());
    };

    let below_canvas = engine.surface().size().height().ceil() as u16;
    queue!(out, ResetColor, MoveTo(0, below_canvas))?;

    if summary.completed {
        writeln!(
            out,
            "{} primes and {} composites up to {}",
            summary.primes,
            summary.composites,
            engine.bound()
        )?;
    } else {
        writeln!(
            out,
            "Animation stopped early after {} steps",
            summary.primes + summary.composites
        )?;
    }

    out.flush()?;
    Ok(())
}
