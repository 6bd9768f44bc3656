//! Shutdown coordination.
//!
//! # States
//! ```text
//! Running ──request_drain()──▶ Draining ──mark_terminated()──▶ Terminated
//! ```
//!
//! The draining flag only ever moves forward, so readers need no lock.
//! Once draining, every response asks the client to close its connection.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

/// Lifecycle state of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LifecycleState {
    Running = 0,
    Draining = 1,
    Terminated = 2,
}

impl LifecycleState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Running,
            1 => Self::Draining,
            _ => Self::Terminated,
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

struct Inner {
    state: AtomicU8,
    /// Fires once, on the Running → Draining transition.
    tx: broadcast::Sender<()>,
}

/// Shared shutdown context.
///
/// Cheap to clone; every clone observes the same state. The signal watcher
/// is the writer, the connection-drain middleware and the listener are readers.
#[derive(Clone)]
pub struct ShutdownContext {
    inner: Arc<Inner>,
}

impl ShutdownContext {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            inner: Arc::new(Inner {
                state: AtomicU8::new(LifecycleState::Running as u8),
                tx,
            }),
        }
    }

    pub fn state(&self) -> LifecycleState {
        LifecycleState::from_u8(self.inner.state.load(Ordering::Acquire))
    }

    /// True once a drain has been requested, for the rest of the process lifetime.
    pub fn is_draining(&self) -> bool {
        self.state() >= LifecycleState::Draining
    }

    /// Move from Running to Draining.
    ///
    /// Returns `true` only for the call that performed the transition;
    /// later calls are no-ops.
    pub fn request_drain(&self) -> bool {
        let transitioned = self
            .inner
            .state
            .compare_exchange(
                LifecycleState::Running as u8,
                LifecycleState::Draining as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok();

        if transitioned {
            tracing::info!("Draining: new responses will close their connections");
            let _ = self.inner.tx.send(());
        }
        transitioned
    }

    /// Resolve once draining has begun (immediately if it already has).
    pub async fn drained(&self) {
        let mut rx = self.inner.tx.subscribe();
        if self.is_draining() {
            return;
        }
        let _ = rx.recv().await;
    }

    /// Record that the listener has finished draining.
    pub fn mark_terminated(&self) {
        let previous = self
            .inner
            .state
            .swap(LifecycleState::Terminated as u8, Ordering::AcqRel);
        if previous != LifecycleState::Terminated as u8 {
            tracing::info!(previous = %LifecycleState::from_u8(previous), "Terminated");
        }
    }
}

impl Default for ShutdownContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ShutdownContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShutdownContext")
            .field("state", &self.state())
            .finish()
    }
}
