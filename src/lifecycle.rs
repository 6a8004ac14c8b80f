//! Lifecycle phases and the two stdout lines that mark them.

use std::io::{self, Write};

use tracing::debug;

pub const READY_LINE: &str = "ready";
pub const SHUTDOWN_LINE: &str = "shutting down";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Starting,
    Ready,
    ShuttingDown,
    Terminated,
}

impl Phase {
    /// Další fáze; jde se jen dopředu, z `Terminated` už nikam.
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Starting => Some(Phase::Ready),
            Phase::Ready => Some(Phase::ShuttingDown),
            Phase::ShuttingDown => Some(Phase::Terminated),
            Phase::Terminated => None,
        }
    }

    /// Line written to stdout when this phase is entered, if any.
    pub fn announcement(self) -> Option<&'static str> {
        match self {
            Phase::Ready => Some(READY_LINE),
            Phase::ShuttingDown => Some(SHUTDOWN_LINE),
            Phase::Starting | Phase::Terminated => None,
        }
    }
}

/// Drives the phase sequence and writes the announcements to `out`.
pub struct Reporter<W: Write> {
    phase: Phase,
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            phase: Phase::Starting,
            out,
        }
    }

    #[allow(dead_code)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Moves to the next phase and prints its line, flushed immediately.
    pub fn advance(&mut self) -> io::Result<Phase> {
        let Some(next) = self.phase.next() else {
            return Ok(self.phase);
        };

        if let Some(line) = next.announcement() {
            writeln!(self.out, "{line}")?;
            self.out.flush()?;
        }

        debug!(from = ?self.phase, to = ?next, "phase transition");
        self.phase = next;
        Ok(next)
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}
