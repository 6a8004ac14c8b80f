//! Blocking wait for SIGINT / SIGTERM.

use std::{fmt, io};

#[cfg(unix)]
use tokio::signal::unix::{Signal, SignalKind, signal};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationSignal::Interrupt => f.write_str("SIGINT"),
            TerminationSignal::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// Handlery jsou zaregistrované už v `register()`, ne až při čekání.
/// Signál poslaný mezi registrací a `wait()` se tak neztratí.
pub struct SignalWaiter {
    #[cfg(unix)]
    interrupt: Signal,
    #[cfg(unix)]
    terminate: Signal,
}

impl SignalWaiter {
    /// Registers SIGINT and SIGTERM handlers. Must run inside a tokio runtime.
    #[cfg(unix)]
    pub fn register() -> io::Result<Self> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    #[cfg(not(unix))]
    pub fn register() -> io::Result<Self> {
        Ok(Self {})
    }

    /// Waits, without timeout, for the first of the registered signals.
    #[cfg(unix)]
    pub async fn wait(mut self) -> TerminationSignal {
        let received = tokio::select! {
            _ = self.interrupt.recv() => TerminationSignal::Interrupt,
            _ = self.terminate.recv() => TerminationSignal::Terminate,
        };
        info!(signal = %received, "received termination signal");
        received
    }

    #[cfg(not(unix))]
    pub async fn wait(self) -> TerminationSignal {
        // mimo unix máme jen Ctrl+C; pokud handler nejde nainstalovat, čekáme navždy
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
        info!(signal = %TerminationSignal::Interrupt, "received termination signal");
        TerminationSignal::Interrupt
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::time::Duration;

    use super::*;

    // signál jde celému testovacímu procesu; handler musí být zaregistrovaný dřív
    #[tokio::test]
    async fn sigterm_ends_the_wait() {
        let waiter = SignalWaiter::register().unwrap();
        unsafe {
            libc::kill(libc::getpid(), libc::SIGTERM);
        }

        let got = tokio::time::timeout(Duration::from_secs(5), waiter.wait())
            .await
            .expect("wait did not finish");
        assert_eq!(got, TerminationSignal::Terminate);
    }

    #[test]
    fn display_names_the_signal() {
        assert_eq!(TerminationSignal::Interrupt.to_string(), "SIGINT");
        assert_eq!(TerminationSignal::Terminate.to_string(), "SIGTERM");
    }
}
