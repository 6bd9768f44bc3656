//! Startup orchestration.
//!
//! # Sequence
//! ```text
//! load .env.<mode> (fatal if unreadable)
//!     → ConfigStore → AppConfig
//!     → HttpServer (middleware chain installed)
//!     → signal watcher registered
//!     → bind listener, serve until drained
//! ```
//!
//! Nothing binds a socket before configuration has loaded.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::{load_env_file, AppConfig, ConfigError, ConfigStore, RuntimeMode};
use crate::http::HttpServer;
use crate::lifecycle::shutdown::ShutdownContext;
use crate::lifecycle::signals::spawn_signal_watcher;
use crate::routing::ApiRoutes;

/// Error type for startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install signal handlers: {0}")]
    Signals(#[source] std::io::Error),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Inputs fixed before the process starts.
#[derive(Debug, Clone)]
pub struct StartupOptions {
    /// Directory holding the `.env.<mode>` files.
    pub app_root: PathBuf,

    pub mode: RuntimeMode,
}

/// A fully configured application that has not yet bound its listener.
pub struct Application {
    server: HttpServer,
    shutdown: ShutdownContext,
}

impl Application {
    /// Load configuration for `options` and compose the application.
    pub fn prepare(options: &StartupOptions, routes: ApiRoutes) -> Result<Self, StartupError> {
        let env_file = load_env_file(&options.app_root, &options.mode)?;
        let store = ConfigStore::from_env_file(env_file);
        Ok(Self::from_store(&store, routes))
    }

    /// Compose the application from an already built configuration store.
    pub fn from_store(store: &ConfigStore, routes: ApiRoutes) -> Self {
        Self::new(AppConfig::from_store(store), routes)
    }

    pub fn new(config: AppConfig, routes: ApiRoutes) -> Self {
        let shutdown = ShutdownContext::new();
        let server = HttpServer::new(config, routes, shutdown.clone());
        Self { server, shutdown }
    }

    pub fn config(&self) -> &AppConfig {
        self.server.config()
    }

    /// Address the listener will bind.
    pub fn bind_addr(&self) -> SocketAddr {
        self.config().listener.socket_addr()
    }

    pub fn shutdown_context(&self) -> ShutdownContext {
        self.shutdown.clone()
    }

    pub fn router(&self) -> Router {
        self.server.router()
    }

    /// Bind the configured address and serve until drained.
    pub async fn listen(self) -> Result<(), StartupError> {
        let addr = self.bind_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| StartupError::Bind { addr, source })?;
        self.listen_on(listener).await
    }

    /// Serve on an already bound listener until drained.
    pub async fn listen_on(self, listener: TcpListener) -> Result<(), StartupError> {
        if let Ok(local) = listener.local_addr() {
            tracing::info!(port = local.port(), "Server initialized on port {}", local.port());
        }
        self.server.run(listener).await.map_err(StartupError::Serve)
    }
}

/// Run the whole process lifecycle: load, compose, watch signals, serve.
pub async fn bootstrap(options: StartupOptions, routes: ApiRoutes) -> Result<(), StartupError> {
    tracing::info!(
        mode = %options.mode,
        app_root = %options.app_root.display(),
        "Bootstrapping"
    );

    let app = Application::prepare(&options, routes)?;
    let watcher = spawn_signal_watcher(app.shutdown_context()).map_err(StartupError::Signals)?;

    let result = app.listen().await;
    watcher.abort();
    result
}
