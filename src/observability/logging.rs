//! Structured logging.
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - JSON lines in production, human-readable output elsewhere
//! - Level filter from `RUST_LOG`, falling back to [`DEFAULT_DIRECTIVES`]
//! - Initialised before configuration loads so that load failures are logged

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::RuntimeMode;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVES: &str = "api_skeleton=info,access=info,tower_http=info";

/// Initialize the global tracing subscriber for `mode`.
pub fn init_tracing(mode: &RuntimeMode) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_DIRECTIVES.into());
    let registry = tracing_subscriber::registry().with(filter);

    if mode.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
