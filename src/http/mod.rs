//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum::serve, graceful shutdown)
//!     → middleware/ (CORS → compression → access log → security headers → drain gate)
//!     → /api/* routes | /document | 404 fallback
//!     → validation.rs (ValidatedJson rejects with a single Bad Request)
//!     → error.rs (JSON error body)
//! ```

pub mod error;
pub mod middleware;
pub mod server;
pub mod validation;

pub use error::{ApiError, ErrorBody};
pub use server::HttpServer;
pub use validation::{normalize, FieldFailure, Validate, ValidatedJson, ValidationFailureTree};
