//! HTTP server setup.
//!
//! # Responsibilities
//! - Nest the registered API routes under the API prefix
//! - Mount the API description at the docs path
//! - Answer unmatched requests with a 404 error body
//! - Wrap everything in the middleware chain
//! - Serve on a listener until the shutdown context starts draining

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::docs::{self, OpenApi};
use crate::http::{error::not_found, middleware};
use crate::lifecycle::ShutdownContext;
use crate::routing::ApiRoutes;

/// HTTP server for the application.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    shutdown: ShutdownContext,
}

impl HttpServer {
    /// Create a new HTTP server serving `routes`.
    pub fn new(config: AppConfig, routes: ApiRoutes, shutdown: ShutdownContext) -> Self {
        let router = Self::build_router(&config, routes, shutdown.clone());
        Self {
            router,
            config,
            shutdown,
        }
    }

    fn build_router(config: &AppConfig, routes: ApiRoutes, shutdown: ShutdownContext) -> Router {
        let (api, route_docs) = routes.into_parts();
        let document = OpenApi::generate(&config.docs, &config.http.api_prefix, &route_docs);

        tracing::debug!(
            routes = route_docs.len(),
            prefix = %config.http.api_prefix,
            docs_path = %config.http.docs_path,
            "Router built"
        );

        let router = Router::new()
            .nest(&config.http.api_prefix, api)
            .merge(docs::router(&config.http.docs_path, document))
            .fallback(not_found);

        middleware::install(router, shutdown)
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns once draining has begun and in-flight connections have closed.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();
        let shutdown = self.shutdown.clone();

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.drained().await;
                tracing::info!("Listener closed, draining in-flight connections");
            })
            .await;

        self.shutdown.mark_terminated();
        result?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
