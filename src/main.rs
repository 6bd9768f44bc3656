//! Application bootstrap skeleton.
//!
//! # Architecture Overview
//!
//! ```text
//!   RUNTIME_MODE ──▶ .env.<mode> ──▶ ConfigStore ──▶ AppConfig
//!                                                       │
//!                                                       ▼
//!   Client ──▶ CORS ▶ compression ▶ access log ▶ security headers ▶ drain gate ──▶ /api/*
//!                                                                              ├─▶ /document
//!                                                                              └─▶ 404
//!
//!   SIGINT/SIGTERM ──▶ ShutdownContext (Running → Draining → Terminated)
//! ```

use std::path::PathBuf;

use clap::Parser;

use api_skeleton::config::RuntimeMode;
use api_skeleton::lifecycle::{bootstrap, StartupOptions};
use api_skeleton::observability::init_tracing;
use api_skeleton::routing::app_routes;

#[derive(Parser, Debug)]
#[command(name = "api-skeleton", version, about = "HTTP API bootstrap skeleton")]
struct Cli {
    /// Runtime mode; selects `<app-root>/.env.<mode>`.
    #[arg(long, env = "RUNTIME_MODE")]
    mode: String,

    /// Directory containing the environment files.
    #[arg(long, env = "APP_ROOT", default_value = ".")]
    app_root: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mode = RuntimeMode::new(cli.mode)?;

    init_tracing(&mode);
    tracing::info!("api-skeleton v{} starting", env!("CARGO_PKG_VERSION"));

    let options = StartupOptions {
        app_root: cli.app_root,
        mode,
    };

    if let Err(e) = bootstrap(options, app_routes()).await {
        tracing::error!(error = %e, "Startup failed");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
