//! API route registry.
//!
//! # Data Flow
//! ```text
//! ApiRoutes::route(RouteDoc, MethodRouter)
//!     → axum Router (nested under the /api prefix by the server)
//!     → RouteDoc list (fed to the API documentation publisher)
//! ```
//!
//! No routes are registered by default.

use axum::{http::Method, routing::MethodRouter, Router};

/// Documentation metadata for one registered route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDoc {
    /// HTTP method.
    pub method: Method,

    /// Path relative to the API prefix, in axum syntax (`/users/{id}`).
    pub path: String,

    /// One-line summary shown in the API description.
    pub summary: Option<String>,

    /// Whether the route expects a bearer token.
    pub bearer_auth: bool,
}

impl RouteDoc {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            summary: None,
            bearer_auth: false,
        }
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn bearer_auth(mut self) -> Self {
        self.bearer_auth = true;
        self
    }
}

/// Routes served under the API prefix, with their documentation.
#[derive(Debug, Default)]
pub struct ApiRoutes {
    router: Router,
    docs: Vec<RouteDoc>,
}

impl ApiRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Methods for the same path may be registered separately.
    pub fn route(mut self, doc: RouteDoc, handler: MethodRouter) -> Self {
        self.router = self.router.route(&doc.path, handler);
        self.docs.push(doc);
        self
    }

    pub fn docs(&self) -> &[RouteDoc] {
        &self.docs
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn into_parts(self) -> (Router, Vec<RouteDoc>) {
        (self.router, self.docs)
    }
}

/// The application's route table. Empty until feature routes are added.
pub fn app_routes() -> ApiRoutes {
    ApiRoutes::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::{get, post};

    #[test]
    fn test_app_routes_start_empty() {
        assert!(app_routes().is_empty());
    }

    #[test]
    fn test_route_docs_are_recorded_in_order() {
        let routes = ApiRoutes::new()
            .route(
                RouteDoc::new(Method::GET, "/users").summary("List users"),
                get(|| async { "[]" }),
            )
            .route(
                RouteDoc::new(Method::POST, "/users").bearer_auth(),
                post(|| async { "created" }),
            );

        let docs = routes.docs();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].summary.as_deref(), Some("List users"));
        assert_eq!(docs[1].method, Method::POST);
        assert!(docs[1].bearer_auth);
    }
}
