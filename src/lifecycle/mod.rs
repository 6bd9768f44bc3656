//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load env file → Build config → Compose server → Watch signals → Listen
//!
//! Shutdown (shutdown.rs):
//!     Running → request_drain() → Draining → listener drained → Terminated
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → request_drain() (once; repeats are ignored)
//! ```
//!
//! # Design Decisions
//! - Fail fast: a missing environment file aborts before any socket is bound
//! - Explicit composition: dependencies are passed, not discovered
//! - One shared shutdown context; only the signal watcher requests a drain

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{LifecycleState, ShutdownContext};
pub use signals::{spawn_signal_watcher, TerminationSignal};
pub use startup::{bootstrap, Application, StartupError, StartupOptions};
