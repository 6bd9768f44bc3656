//! API documentation publisher.
//!
//! # Data Flow
//! ```text
//! DocsConfig + RouteDoc list
//!     → openapi.rs (OpenAPI 3.0 document, built once at startup)
//!     → served as JSON at the docs path (outside the /api prefix)
//! ```

pub mod openapi;

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

pub use openapi::{OpenApi, BEARER_SCHEME};

/// Router serving `document` at `path`.
pub fn router(path: &str, document: OpenApi) -> Router {
    Router::new()
        .route(path, get(serve_document))
        .with_state(Arc::new(document))
}

async fn serve_document(State(document): State<Arc<OpenApi>>) -> Json<OpenApi> {
    Json(document.as_ref().clone())
}
