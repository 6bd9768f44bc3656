//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! RUNTIME_MODE (process environment / CLI)
//!     → loader.rs (<app_root>/.env.<mode>, fatal if unreadable)
//!     → store.rs (file values overlaid by process environment)
//!     → schema.rs (AppConfig, typed and immutable)
//!     → passed by value to the HTTP server
//! ```
//!
//! # Design Decisions
//! - Loaded exactly once, before any listener is bound
//! - Missing keys are not errors; callers choose defaults
//! - The process environment is read, never written

pub mod loader;
pub mod schema;
pub mod store;

pub use loader::{load_env_file, ConfigError, EnvFile, RuntimeMode};
pub use schema::{AppConfig, DocsConfig, HttpConfig, ListenerConfig, DEFAULT_PORT};
pub use store::ConfigStore;
