//! Security response headers.
//!
//! Applied to every response, including errors and the fallback 404, so the
//! values here are byte-identical across all responses.

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// Content-Security-Policy: configured directives first, then the remaining defaults.
pub const CONTENT_SECURITY_POLICY: &str = concat!(
    "default-src 'self';",
    "style-src 'self' 'unsafe-inline';",
    "img-src 'self' data: validator.swagger.io;",
    "script-src 'self' https: 'unsafe-inline';",
    "base-uri 'self';",
    "font-src 'self' https: data:;",
    "form-action 'self';",
    "frame-ancestors 'self';",
    "object-src 'none';",
    "script-src-attr 'none';",
    "upgrade-insecure-requests",
);

/// Headers set on every response.
pub const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("content-security-policy", CONTENT_SECURITY_POLICY),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    ("origin-agent-cluster", "?1"),
    ("referrer-policy", "no-referrer"),
    ("strict-transport-security", "max-age=15552000; includeSubDomains"),
    ("x-content-type-options", "nosniff"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-permitted-cross-domain-policies", "none"),
    ("x-xss-protection", "0"),
];

/// Headers that reveal implementation details.
const REMOVED_HEADERS: &[&str] = &["x-powered-by"];

pub async fn security_headers(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    for &(name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    for &name in REMOVED_HEADERS {
        headers.remove(name);
    }

    response
}
