//! OS signal handling.
//!
//! Signal reception lives here; what a signal means for the application
//! is decided by [`ShutdownContext`]. SIGINT and SIGTERM both request a
//! drain. Repeated signals are logged and ignored.

use std::fmt;
use std::io;

use tokio::task::JoinHandle;

use crate::lifecycle::shutdown::ShutdownContext;

/// A termination signal received from the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interrupt => f.write_str("SIGINT"),
            Self::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// Registered termination signal streams.
pub struct Signals {
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

impl Signals {
    /// Register handlers. Must be called from within the Tokio runtime.
    #[cfg(unix)]
    pub fn install() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    #[cfg(not(unix))]
    pub fn install() -> io::Result<Self> {
        Ok(Self {})
    }

    /// Wait for the next termination signal.
    ///
    /// Returns `None` if the signal streams have been closed.
    #[cfg(unix)]
    pub async fn recv(&mut self) -> Option<TerminationSignal> {
        tokio::select! {
            received = self.interrupt.recv() => received.map(|_| TerminationSignal::Interrupt),
            received = self.terminate.recv() => received.map(|_| TerminationSignal::Terminate),
        }
    }

    #[cfg(not(unix))]
    pub async fn recv(&mut self) -> Option<TerminationSignal> {
        match tokio::signal::ctrl_c().await {
            Ok(()) => Some(TerminationSignal::Interrupt),
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                None
            }
        }
    }
}

/// Spawn a task that requests a drain on the first termination signal.
///
/// Handlers are registered before this returns, so a registration failure
/// surfaces as a startup error.
pub fn spawn_signal_watcher(ctx: ShutdownContext) -> io::Result<JoinHandle<()>> {
    let mut signals = Signals::install()?;

    Ok(tokio::spawn(async move {
        while let Some(signal) = signals.recv().await {
            if ctx.request_drain() {
                tracing::info!(%signal, "Shutdown signal received");
            } else {
                tracing::warn!(%signal, "Shutdown already in progress, ignoring signal");
            }
        }
    }))
}
