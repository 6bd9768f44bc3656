//! Middleware chain.
//!
//! # Order
//! ```text
//! request
//!     → CORS (permissive; answers preflight)
//!     → compression (negotiated from Accept-Encoding)
//!     → access_log.rs (common log format line)
//!     → security_headers.rs (CSP + hardening headers)
//!     → connection.rs (Connection: close while draining)
//!     → router (API routes, docs, 404 fallback)
//! ```
//!
//! The order is fixed. Everything behind the gate, including the fallback,
//! only runs after all five layers.

pub mod access_log;
pub mod connection;
pub mod security_headers;

use axum::{http::Method, middleware, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowHeaders, Any, CorsLayer},
};

use crate::lifecycle::ShutdownContext;

pub use access_log::{access_log, AccessLogEntry};
pub use connection::connection_drain;
pub use security_headers::{security_headers, CONTENT_SECURITY_POLICY, SECURITY_HEADERS};

/// Cross-origin policy: any origin, the common methods, requested headers mirrored.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
}

/// Wrap `router` in the full middleware chain.
pub fn install(router: Router, shutdown: ShutdownContext) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(cors_layer())
            .layer(CompressionLayer::new())
            .layer(middleware::from_fn(access_log))
            .layer(middleware::from_fn(security_headers))
            .layer(middleware::from_fn_with_state(shutdown, connection_drain)),
    )
}
