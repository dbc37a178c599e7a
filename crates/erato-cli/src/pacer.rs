//! Pacing that keeps listening to the keyboard while the grid animates.
//!
//! Between two steps the [`TerminalPacer`] waits on input events instead of
//! sleeping. A line entered while a run is in progress is answered with the
//! busy notice on the status row and then thrown away, so it never reaches
//! the prompt once the run is over.

use std::{
    io::{self, Write},
    mem,
    thread,
    time::{Duration, Instant},
};

use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use log::{info, warn};

use erato::{SieveError, pacing::Pacer, run_flag::RunFlag};

/// Source of lines the user types while an animation is drawing.
pub trait LineEvents {
    /// Wait up to `timeout` for input and return a line once it is complete.
    ///
    /// Returns `Ok(None)` when the timeout elapses or the input seen so far
    /// does not finish a line.
    fn poll_line(&mut self, timeout: Duration) -> io::Result<Option<String>>;
}

/// Keyboard events read through crossterm.
#[derive(Debug, Default)]
pub struct TerminalEvents {
    pending: String,
}

impl LineEvents for TerminalEvents {
    fn poll_line(&mut self, timeout: Duration) -> io::Result<Option<String>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(KeyEvent {
                code: KeyCode::Enter,
                kind: KeyEventKind::Press,
                ..
            }) => Ok(Some(mem::take(&mut self.pending))),
            Event::Key(KeyEvent {
                code: KeyCode::Char(c),
                kind: KeyEventKind::Press,
                ..
            }) => {
                self.pending.push(c);
                Ok(None)
            }
            Event::Key(KeyEvent {
                code: KeyCode::Backspace,
                kind: KeyEventKind::Press,
                ..
            }) => {
                self.pending.pop();
                Ok(None)
            }
            _ => Ok(None),
        }
    }
}

/// A [`Pacer`] that waits on [`LineEvents`] and rejects lines entered mid-run.
#[derive(Debug)]
pub struct TerminalPacer<E, W: Write> {
    events: E,
    out: W,
    run_flag: RunFlag,
    status_row: u16,
    no_delay: bool,
    listening: bool,
}

impl<E: LineEvents, W: Write> TerminalPacer<E, W> {
    /// Pace runs guarded by `run_flag`, printing notices to `out` on `status_row`.
    pub fn new(events: E, out: W, run_flag: RunFlag, status_row: u16) -> Self {
        Self {
            events,
            out,
            run_flag,
            status_row,
            no_delay: false,
            listening: true,
        }
    }

    /// Check for input between steps without waiting.
    pub fn without_delay(mut self) -> Self {
        self.no_delay = true;
        self
    }

    fn reject(&mut self, line: &str) {
        if !self.run_flag.is_running() {
            return;
        }

        let notice = SieveError::AlreadyRunning.to_string();
        info!(input = line; "Rejected input entered during a run");

        let written = queue!(
            self.out,
            MoveTo(0, self.status_row),
            Clear(ClearType::CurrentLine),
            Print(&notice)
        )
        .and_then(|()| self.out.flush());
        if let Err(err) = written {
            warn!(err:%; "Failed to show busy notice");
        }
    }
}

impl<E: LineEvents, W: Write> Pacer for TerminalPacer<E, W> {
    fn pause(&mut self, delay: Duration) {
        let delay = if self.no_delay { Duration::ZERO } else { delay };
        let deadline = Instant::now() + delay;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !self.listening {
                thread::sleep(remaining);
                return;
            }

            match self.events.poll_line(remaining) {
                Ok(Some(line)) => self.reject(&line),
                Ok(None) => {}
                Err(err) => {
                    warn!(err:%; "Keyboard input unavailable, pausing without it");
                    self.listening = false;
                }
            }

            if Instant::now() >= deadline {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Hands out one queued line per poll.
    #[derive(Default)]
    struct QueuedLines {
        lines: VecDeque<String>,
        polls: usize,
    }

    impl QueuedLines {
        fn new(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|line| line.to_string()).collect(),
                polls: 0,
            }
        }
    }

    impl LineEvents for QueuedLines {
        fn poll_line(&mut self, _timeout: Duration) -> io::Result<Option<String>> {
            self.polls += 1;
            Ok(self.lines.pop_front())
        }
    }

    struct BrokenInput;

    impl LineEvents for BrokenInput {
        fn poll_line(&mut self, _timeout: Duration) -> io::Result<Option<String>> {
            Err(io::Error::other("no terminal"))
        }
    }

    fn output(pacer: TerminalPacer<impl LineEvents, Vec<u8>>) -> String {
        String::from_utf8(pacer.out).unwrap()
    }

    #[test]
    fn test_line_during_run_prints_busy_notice() {
        let flag = RunFlag::new();
        let mut pacer =
            TerminalPacer::new(QueuedLines::new(&["50"]), Vec::new(), flag.clone(), 23)
                .without_delay();

        flag.begin_run();
        pacer.pause(Duration::from_millis(10));
        flag.end_run();

        assert!(pacer.events.lines.is_empty());
        let output = output(pacer);
        assert!(output.contains("Already running, please wait!"));
        assert!(!output.contains("50"));
    }

    #[test]
    fn test_line_outside_run_is_ignored() {
        let flag = RunFlag::new();
        let mut pacer =
            TerminalPacer::new(QueuedLines::new(&["50"]), Vec::new(), flag, 23).without_delay();

        pacer.pause(Duration::from_millis(10));

        assert!(output(pacer).is_empty());
    }

    #[test]
    fn test_zero_delay_polls_once() {
        let mut pacer =
            TerminalPacer::new(QueuedLines::default(), Vec::new(), RunFlag::new(), 0)
                .without_delay();

        pacer.pause(Duration::from_secs(60));

        assert_eq!(pacer.events.polls, 1);
    }

    #[test]
    fn test_broken_input_falls_back_to_sleeping() {
        let mut pacer = TerminalPacer::new(BrokenInput, Vec::new(), RunFlag::new(), 0);

        let start = Instant::now();
        pacer.pause(Duration::from_millis(5));
        pacer.pause(Duration::from_millis(5));

        assert!(!pacer.listening);
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
