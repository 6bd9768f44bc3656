//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → access log lines (target "access") from the HTTP middleware
//!
//! Consumers:
//!     → logging.rs subscriber (stdout; JSON in production)
//! ```

pub mod logging;

pub use logging::init_tracing;
