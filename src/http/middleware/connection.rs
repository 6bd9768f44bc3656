//! Connection-drain gate.
//!
//! While the process is draining, HTTP/1.x responses carry
//! `Connection: close` so clients reconnect elsewhere instead of reusing
//! this connection. The flag is read after the handler runs, so requests
//! that were already in flight when the drain began are covered too.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, Version},
    middleware::Next,
    response::Response,
};

use crate::lifecycle::ShutdownContext;

pub async fn connection_drain(
    State(shutdown): State<ShutdownContext>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let version = request.version();
    let mut response = next.run(request).await;

    // HTTP/2 has no Connection header; the listener's GOAWAY covers it.
    if shutdown.is_draining() && version <= Version::HTTP_11 {
        response
            .headers_mut()
            .insert(header::CONNECTION, HeaderValue::from_static("close"));
    }

    response
}
